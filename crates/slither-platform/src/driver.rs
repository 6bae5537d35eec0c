use slither_core::{Frame, TrailEngine};
use tracing::trace;

use crate::{DrawSurface, Result, TargetTracker};

/// Runs one pipeline step per host frame: sample, simulate, redraw.
pub struct FrameDriver<T, S> {
    engine: TrailEngine,
    tracker: T,
    surface: S,
    frames: u64,
}

impl<T: TargetTracker, S: DrawSurface> FrameDriver<T, S> {
    pub fn new(engine: TrailEngine, tracker: T, surface: S) -> Self {
        Self {
            engine,
            tracker,
            surface,
            frames: 0,
        }
    }

    pub fn tick(&mut self, dt: f32) -> Result<Frame> {
        let sample = self.tracker.sample();
        let frame = self.engine.tick(sample, dt);

        self.surface.clear()?;
        self.surface.place(frame.placement)?;
        if !frame.geometry.is_empty() {
            self.surface.submit(&frame.geometry, &frame.stroke)?;
        }
        self.frames += 1;
        trace!(
            frame = self.frames,
            tracked = sample.is_some(),
            points = frame.geometry.points.len(),
            "frame driven"
        );
        Ok(frame)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn engine(&self) -> &TrailEngine {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use slither_core::{StrokeStyle, TargetSample, TrailGeometry};

    struct Fixed(Option<TargetSample>);

    impl TargetTracker for Fixed {
        fn sample(&mut self) -> Option<TargetSample> {
            self.0
        }
    }

    #[derive(Default)]
    struct Log {
        calls: Vec<&'static str>,
        placements: Vec<Vec2>,
    }

    impl DrawSurface for Log {
        fn clear(&mut self) -> Result<()> {
            self.calls.push("clear");
            Ok(())
        }
        fn place(&mut self, center: Vec2) -> Result<()> {
            self.calls.push("place");
            self.placements.push(center);
            Ok(())
        }
        fn submit(&mut self, _geometry: &TrailGeometry, _stroke: &StrokeStyle) -> Result<()> {
            self.calls.push("submit");
            Ok(())
        }
    }

    #[test]
    fn clears_before_each_submission() {
        let mut engine = TrailEngine::default();
        engine.snap_to(Vec2::new(100.0, 100.0));
        let tracker = Fixed(Some(TargetSample::new(400.0, 100.0, 2.0, 18.0)));
        let mut driver = FrameDriver::new(engine, tracker, Log::default());
        for _ in 0..4 {
            driver.tick(1.0 / 60.0).unwrap();
        }
        assert_eq!(driver.frames(), 4);
        let calls = &driver.surface().calls;
        assert_eq!(&calls[..2], &["clear", "place"]);
        assert!(calls.contains(&"submit"));
        for (i, call) in calls.iter().enumerate() {
            if *call == "submit" {
                assert_eq!(calls[i - 1], "place");
                assert_eq!(calls[i - 2], "clear");
            }
        }
    }

    #[test]
    fn idle_frames_place_without_drawing() {
        let mut engine = TrailEngine::default();
        engine.snap_to(Vec2::new(100.0, 100.0));
        let mut driver = FrameDriver::new(engine, Fixed(None), Log::default());
        driver.tick(1.0 / 60.0).unwrap();
        let surface = driver.surface();
        assert_eq!(surface.calls, vec!["clear", "place"]);
        assert_eq!(surface.placements, vec![Vec2::new(100.0, 100.0)]);
    }
}
