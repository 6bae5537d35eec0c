use slither_core::{Rect, TargetSample};
use slither_platform::{sample_from_markers, MarkerRect, TargetTracker};

use crate::config::Keyframe;

/// Replays caret keyframes, one call to `sample` per frame.
pub struct ScriptedTracker {
    container: Rect,
    keyframes: Vec<Keyframe>,
    frame: u64,
}

impl ScriptedTracker {
    pub fn new(container: Rect, mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by_key(|k| k.frame);
        Self {
            container,
            keyframes,
            frame: 0,
        }
    }

    fn current(&self) -> Option<&Keyframe> {
        self.keyframes
            .iter()
            .take_while(|k| k.frame <= self.frame)
            .last()
    }
}

impl TargetTracker for ScriptedTracker {
    fn sample(&mut self) -> Option<TargetSample> {
        let markers: Vec<MarkerRect> = self
            .current()
            .map(|k| MarkerRect {
                rect: Rect::new(
                    k.x - k.width * 0.5,
                    k.y - k.height * 0.5,
                    k.width,
                    k.height,
                ),
                visible: k.visible,
            })
            .into_iter()
            .collect();
        self.frame += 1;
        sample_from_markers(self.container, &markers)
    }
}
