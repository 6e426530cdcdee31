//! # Locomotion Blending
//!
//! Keeps track of which locomotion clip the player model shows and cross-fades
//! between clips when the controller's [`Locomotion`] changes. Clip playback
//! itself belongs to the renderer; this only produces blend weights.
//!
//! Every clip that is not current fades out on its own from whatever weight it
//! had, so switching clips mid-fade never makes a clip pop.

use crate::simulation::player::Locomotion;

/// Cross-fade length used by the explorer
pub const DEFAULT_FADE_SECONDS: f32 = 0.2;

const CLIP_COUNT: usize = 3;

fn slot(clip: Locomotion) -> usize {
    match clip {
        Locomotion::Idle => 0,
        Locomotion::Walking => 1,
        Locomotion::Dancing => 2,
    }
}

#[derive(Debug, Clone)]
pub struct AnimationBlender {
    current: Locomotion,
    /// Per-clip weight; always sums to 1.
    weights: [f32; CLIP_COUNT],
    fade_duration: f32,
}

impl AnimationBlender {
    pub fn new(initial: Locomotion) -> Self {
        let mut weights = [0.0; CLIP_COUNT];
        weights[slot(initial)] = 1.0;
        Self {
            current: initial,
            weights,
            fade_duration: DEFAULT_FADE_SECONDS,
        }
    }

    pub fn with_fade(mut self, seconds: f32) -> Self {
        self.fade_duration = seconds.max(0.0);
        self
    }

    pub fn current(&self) -> Locomotion {
        self.current
    }

    /// Switch to `clip`, fading out whatever is showing
    ///
    /// # Returns
    /// `true` if a new fade started
    pub fn request(&mut self, clip: Locomotion) -> bool {
        if clip == self.current {
            return false;
        }
        log::debug!("Blending {:?} -> {:?}", self.current, clip);
        self.current = clip;
        if self.fade_duration == 0.0 {
            self.finish();
        }
        true
    }

    pub fn update(&mut self, delta_time: f32) {
        if !self.is_blending() || !(delta_time > 0.0) {
            return;
        }

        let step = delta_time / self.fade_duration;
        for (i, weight) in self.weights.iter_mut().enumerate() {
            if i != slot(self.current) {
                *weight = (*weight - step).max(0.0);
            }
        }

        let fading: f32 = self
            .weights
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != slot(self.current))
            .map(|(_, w)| *w)
            .sum();
        if fading <= 0.0 {
            self.finish();
        } else {
            self.weights[slot(self.current)] = 1.0 - fading;
        }
    }

    pub fn is_blending(&self) -> bool {
        self.weights[slot(self.current)] < 1.0
    }

    /// Blend weight of `clip`; weights over all clips sum to 1
    pub fn weight(&self, clip: Locomotion) -> f32 {
        self.weights[slot(clip)]
    }

    fn finish(&mut self) {
        self.weights = [0.0; CLIP_COUNT];
        self.weights[slot(self.current)] = 1.0;
    }
}

impl Default for AnimationBlender {
    fn default() -> Self {
        Self::new(Locomotion::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIPS: [Locomotion; 3] = [Locomotion::Idle, Locomotion::Walking, Locomotion::Dancing];

    fn total(blender: &AnimationBlender) -> f32 {
        CLIPS.iter().map(|c| blender.weight(*c)).sum()
    }

    #[test]
    fn test_same_clip_is_noop() {
        let mut blender = AnimationBlender::default();
        assert!(!blender.request(Locomotion::Idle));
        assert!(!blender.is_blending());
        assert_eq!(blender.weight(Locomotion::Idle), 1.0);
    }

    #[test]
    fn test_cross_fade() {
        let mut blender = AnimationBlender::default();
        assert!(blender.request(Locomotion::Walking));
        assert_eq!(blender.weight(Locomotion::Idle), 1.0);
        assert_eq!(blender.weight(Locomotion::Walking), 0.0);

        blender.update(0.1);
        assert!((blender.weight(Locomotion::Walking) - 0.5).abs() < 1e-5);
        assert!((total(&blender) - 1.0).abs() < 1e-5);

        // Requesting the clip already fading in changes nothing
        assert!(!blender.request(Locomotion::Walking));

        blender.update(0.15);
        assert!(!blender.is_blending());
        assert_eq!(blender.weight(Locomotion::Walking), 1.0);
        assert_eq!(blender.weight(Locomotion::Idle), 0.0);
    }

    #[test]
    fn test_interrupted_fade_keeps_outgoing_weight() {
        let mut blender = AnimationBlender::default();
        blender.request(Locomotion::Walking);
        blender.update(0.05);
        let idle = blender.weight(Locomotion::Idle);
        assert!((idle - 0.75).abs() < 1e-5);

        blender.request(Locomotion::Dancing);
        assert_eq!(blender.current(), Locomotion::Dancing);
        // No clip jumps when the fade target changes
        assert_eq!(blender.weight(Locomotion::Idle), idle);
        assert!((blender.weight(Locomotion::Walking) - 0.25).abs() < 1e-5);
        assert_eq!(blender.weight(Locomotion::Dancing), 0.0);

        blender.update(0.05);
        assert!((blender.weight(Locomotion::Idle) - 0.5).abs() < 1e-5);
        assert!(blender.weight(Locomotion::Walking) < 1e-5);
        assert!((blender.weight(Locomotion::Dancing) - 0.5).abs() < 1e-5);
        assert!((total(&blender) - 1.0).abs() < 1e-5);

        blender.update(0.2);
        assert!(!blender.is_blending());
        assert_eq!(blender.weight(Locomotion::Dancing), 1.0);
    }

    #[test]
    fn test_zero_fade_switches_immediately() {
        let mut blender = AnimationBlender::default().with_fade(0.0);
        blender.request(Locomotion::Dancing);
        assert!(!blender.is_blending());
        assert_eq!(blender.weight(Locomotion::Dancing), 1.0);
    }
}
