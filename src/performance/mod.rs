//! # Performance Metrics
//!
//! Frame timing statistics for the explorer loop. Frame deltas are fed in by
//! whoever drives the loop, so a headless run and a windowed run report the
//! same way.
//!
//! ## Usage
//!
//! ```rust
//! use colony_explorer::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::with_window(4);
//! for _ in 0..8 {
//!     monitor.record_frame(0.02);
//! }
//! assert!((monitor.get_metrics().fps - 50.0).abs() < 0.01);
//! ```

use std::collections::VecDeque;
use std::fmt;

/// Frame timing summary over the current window
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Current frames per second
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
    /// Frames recorded since the last reset
    pub total_frames: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            total_frames: 0,
        }
    }
}

impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} fps, {:.2}ms avg ({:.2}..{:.2}ms)",
            self.fps, self.frame_time_ms, self.min_frame_time_ms, self.max_frame_time_ms
        )
    }
}

/// Rolling frame time monitor
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times in seconds
    frame_times: VecDeque<f32>,
    /// Maximum number of frame times to keep for averaging
    max_samples: usize,
    current_metrics: PerformanceMetrics,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_window(120) // ~2 seconds at 60fps
    }

    pub fn with_window(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: PerformanceMetrics::default(),
        }
    }

    /// Add a frame time sample in seconds and refresh the metrics
    pub fn record_frame(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return;
        }
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta_time);
        self.current_metrics.total_frames += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: f32 = self.frame_times.iter().sum();
        let avg_frame_time_ms = total_time / self.frame_times.len() as f32 * 1000.0;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        let (min, max) = self
            .frame_times
            .iter()
            .fold((f32::MAX, 0.0f32), |(lo, hi), t| (lo.min(*t), hi.max(*t)));
        self.current_metrics.min_frame_time_ms = min * 1000.0;
        self.current_metrics.max_frame_time_ms = max * 1000.0;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times.iter().map(|t| t * 1000.0).collect()
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_drops_oldest() {
        let mut monitor = PerformanceMonitor::with_window(3);
        for dt in [0.1, 0.01, 0.02, 0.03] {
            monitor.record_frame(dt);
        }

        let history = monitor.get_frame_time_history();
        assert_eq!(history.len(), 3);
        assert!((history[0] - 10.0).abs() < 1e-3);

        let metrics = monitor.get_metrics();
        assert_eq!(metrics.total_frames, 4);
        assert!((metrics.frame_time_ms - 20.0).abs() < 1e-3);
        assert!((metrics.fps - 50.0).abs() < 1e-2);
        assert!((metrics.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((metrics.max_frame_time_ms - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_ignores_bad_samples_and_resets() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(f32::NAN);
        monitor.record_frame(-0.5);
        assert_eq!(monitor.get_metrics().total_frames, 0);

        monitor.record_frame(0.016);
        monitor.reset();
        assert!(monitor.get_frame_time_history().is_empty());
        assert_eq!(monitor.get_metrics().fps, 0.0);
    }
}
