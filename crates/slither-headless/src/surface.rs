use glam::{Vec2, Vec4};
use serde::Serialize;
use slither_core::{StrokeStyle, TrailGeometry, TrailStyle};
use slither_platform::{DrawSurface, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Stroke {
        points: Vec<Vec2>,
        width: f32,
        color: Vec4,
        round_joins: bool,
    },
    Fill {
        points: Vec<Vec2>,
        color: Vec4,
    },
}

/// In-memory surface that keeps what the current frame drew, plus a
/// staging buffer of packed vertices as a GPU backend would upload.
pub struct RecordingSurface {
    pub id: String,
    pub size: Vec2,
    center: Vec2,
    commands: Vec<DrawCommand>,
    staging: Vec<u8>,
    clears: u64,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    center: Vec2,
    staged_bytes: usize,
    commands: &'a [DrawCommand],
}

impl RecordingSurface {
    pub fn new(id: impl Into<String>, size: Vec2) -> Self {
        Self {
            id: id.into(),
            size,
            center: Vec2::ZERO,
            commands: Vec::new(),
            staging: Vec::new(),
            clears: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn staged_bytes(&self) -> &[u8] {
        &self.staging
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// One JSON object describing the current frame.
    pub fn frame_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&FrameRecord {
            frame: self.clears,
            center: self.center,
            staged_bytes: self.staging.len(),
            commands: &self.commands,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> Result<()> {
        self.commands.clear();
        self.staging.clear();
        self.clears += 1;
        Ok(())
    }

    fn place(&mut self, center: Vec2) -> Result<()> {
        if !center.is_finite() {
            return Err(format!("non-finite surface placement {center}").into());
        }
        self.center = center;
        Ok(())
    }

    fn submit(&mut self, geometry: &TrailGeometry, stroke: &StrokeStyle) -> Result<()> {
        self.staging.extend_from_slice(&geometry.vertex_bytes());
        let points = geometry.points.clone();
        self.commands.push(match geometry.style {
            TrailStyle::Polyline => DrawCommand::Stroke {
                points,
                width: stroke.line_width,
                color: stroke.color,
                round_joins: stroke.round_joins,
            },
            TrailStyle::Ribbon => DrawCommand::Fill {
                points,
                color: stroke.color,
            },
        });
        Ok(())
    }
}
