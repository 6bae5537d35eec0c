//! Converts the chain into drawable geometry in the surface's local frame.
//!
//! The surface itself is re-centred on the smoothed position every frame, so
//! node positions are shifted by `surface_center - smoothed` to stay docked
//! under it.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailStyle {
    /// Stroke the centre line through every node.
    #[default]
    Polyline,
    /// Fill a closed band as tall as the tracked marker.
    Ribbon,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub line_width: f32,
    pub color: Vec4,
    pub round_joins: bool,
}

/// GPU-friendly vertex for uploading trail outlines.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailGeometry {
    pub style: TrailStyle,
    /// Open path for `Polyline`, closed outline for `Ribbon`.
    pub points: Vec<Vec2>,
}

impl TrailGeometry {
    pub fn empty(style: TrailStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn vertices(&self) -> Vec<TrailVertex> {
        self.points
            .iter()
            .map(|p| TrailVertex { pos: p.to_array() })
            .collect()
    }

    pub fn vertex_bytes(&self) -> Vec<u8> {
        let vertices = self.vertices();
        bytemuck::cast_slice::<TrailVertex, u8>(&vertices).to_vec()
    }
}

pub fn build(
    style: TrailStyle,
    nodes: &[Vec2],
    smoothed: Vec2,
    size: Size,
    surface_center: Vec2,
) -> TrailGeometry {
    if nodes.len() < 2 {
        return TrailGeometry::empty(style);
    }
    let offset = surface_center - smoothed;
    let points = match style {
        TrailStyle::Polyline => nodes.iter().map(|&n| n + offset).collect(),
        TrailStyle::Ribbon => {
            let half = Vec2::new(0.0, size.half_height());
            let mut outline = Vec::with_capacity(nodes.len() * 2);
            outline.extend(nodes.iter().map(|&n| n + offset + half));
            outline.extend(nodes.iter().rev().map(|&n| n + offset - half));
            outline
        }
    };
    TrailGeometry { style, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<Vec2> {
        vec![
            Vec2::new(100.0, 50.0),
            Vec2::new(96.0, 50.0),
            Vec2::new(92.0, 50.0),
        ]
    }

    #[test]
    fn single_node_draws_nothing() {
        let geometry = build(
            TrailStyle::Polyline,
            &[Vec2::ONE],
            Vec2::ONE,
            Size::default(),
            Vec2::splat(250.0),
        );
        assert!(geometry.is_empty());
    }

    #[test]
    fn polyline_is_docked_to_surface_center() {
        let geometry = build(
            TrailStyle::Polyline,
            &nodes(),
            Vec2::new(100.0, 50.0),
            Size::default(),
            Vec2::splat(250.0),
        );
        assert_eq!(
            geometry.points,
            vec![
                Vec2::new(250.0, 250.0),
                Vec2::new(246.0, 250.0),
                Vec2::new(242.0, 250.0),
            ]
        );
    }

    #[test]
    fn ribbon_is_closed_band_of_marker_height() {
        let geometry = build(
            TrailStyle::Ribbon,
            &nodes(),
            Vec2::new(100.0, 50.0),
            Size::new(2.0, 18.0),
            Vec2::splat(250.0),
        );
        assert_eq!(geometry.points.len(), 6);
        assert_eq!(geometry.points[0], Vec2::new(250.0, 259.0));
        assert_eq!(geometry.points[2], Vec2::new(242.0, 259.0));
        assert_eq!(geometry.points[3], Vec2::new(242.0, 241.0));
        assert_eq!(geometry.points[5], Vec2::new(250.0, 241.0));
        let top = geometry.points[0];
        let bottom = geometry.points[5];
        assert_eq!(top.y - bottom.y, 18.0);
    }

    #[test]
    fn vertex_bytes_are_tightly_packed() {
        let geometry = build(
            TrailStyle::Polyline,
            &nodes(),
            Vec2::new(100.0, 50.0),
            Size::default(),
            Vec2::ZERO,
        );
        let bytes = geometry.vertex_bytes();
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<TrailVertex>());
        assert_eq!(&bytes[0..4], &0.0f32.to_ne_bytes());
    }
}
