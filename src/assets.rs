//! # Asset Readiness
//!
//! Loading itself happens elsewhere; this module records how far it got.
//! [`AssetSlot`] replaces sentinel values for "not loaded yet" and "failed",
//! and [`LoadTracker`] gates when the colony may be assembled and when the
//! simulation may start stepping.

use std::fmt;

/// Load state of a single asset
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetSlot<T> {
    #[default]
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> AssetSlot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AssetSlot::Pending)
    }

    /// Loaded or failed; either way nothing more will arrive
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            AssetSlot::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Counts registered assets and how many have settled
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    total: usize,
    settled: usize,
    failed: Vec<String>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` assets that are expected to settle
    pub fn register(&mut self, count: usize) {
        self.total += count;
    }

    pub fn mark_loaded(&mut self, name: &str) {
        self.settle();
        log::debug!("Loaded {name} ({}%)", self.percent());
    }

    pub fn mark_failed(&mut self, name: &str, reason: &str) {
        self.settle();
        log::warn!("Failed to load {name}: {reason}");
        self.failed.push(name.to_string());
    }

    /// Whole percent of registered assets that have settled
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.settled * 100 / self.total) as u32
    }

    pub fn is_finished(&self) -> bool {
        self.settled >= self.total
    }

    pub fn failures(&self) -> &[String] {
        &self.failed
    }

    fn settle(&mut self) {
        if self.settled < self.total {
            self.settled += 1;
        } else {
            log::warn!("More assets settled than were registered");
        }
    }
}

impl fmt::Display for LoadTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} assets ({}%)", self.settled, self.total, self.percent())
    }
}

/// Whether the colony can be assembled
///
/// Bases need their model; the NPC model only has to have settled, since the
/// colony is built without NPCs when it fails.
pub fn colony_ready<B, N>(base: &AssetSlot<B>, npc: &AssetSlot<N>) -> bool {
    base.loaded().is_some() && npc.is_settled()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_states() {
        let pending: AssetSlot<u32> = AssetSlot::default();
        assert!(pending.is_pending());
        assert_eq!(pending.loaded(), None);

        let failed: AssetSlot<u32> = AssetSlot::Failed("missing file".into());
        assert!(failed.is_settled());
        assert_eq!(failed.loaded(), None);

        assert_eq!(AssetSlot::Loaded(7).loaded(), Some(&7));
    }

    #[test]
    fn test_progress_floors() {
        let mut tracker = LoadTracker::new();
        tracker.register(3);
        assert_eq!(tracker.percent(), 0);
        assert!(!tracker.is_finished());

        tracker.mark_loaded("base");
        assert_eq!(tracker.percent(), 33);
        tracker.mark_failed("npc", "not found");
        assert_eq!(tracker.percent(), 66);
        tracker.mark_loaded("radar");
        assert_eq!(tracker.percent(), 100);
        assert!(tracker.is_finished());
        assert_eq!(tracker.failures(), ["npc".to_string()]);
        assert_eq!(tracker.to_string(), "3/3 assets (100%)");
    }

    #[test]
    fn test_empty_tracker_is_finished() {
        let tracker = LoadTracker::new();
        assert!(tracker.is_finished());
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn test_colony_ready() {
        let base = AssetSlot::Loaded("base");
        let failed_base: AssetSlot<&str> = AssetSlot::Failed("bad".into());

        assert!(!colony_ready(&base, &AssetSlot::<()>::Pending));
        assert!(colony_ready(&base, &AssetSlot::<()>::Failed("gone".into())));
        assert!(colony_ready(&base, &AssetSlot::Loaded(())));
        assert!(!colony_ready(&failed_base, &AssetSlot::Loaded(())));
    }
}
