//! Readiness tracking for a prefetch pass.
//!
//! A deck is ready once every card has settled, or once enough cards have settled
//! that the user can start browsing while the rest keep loading. Each pass carries a
//! generation so settlements from a superseded pass are ignored.

/// Settled count out of the deck total, for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub ready_count: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction settled in `0.0..=1.0`; an empty deck counts as complete
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.ready_count as f64 / self.total as f64
        }
    }
}

#[derive(Debug)]
pub struct ReadinessTracker {
    generation: u64,
    settled: Vec<bool>,
    ready_count: usize,
    early_threshold: usize,
}

impl ReadinessTracker {
    pub fn new(early_threshold: usize) -> Self {
        Self {
            generation: 0,
            settled: Vec::new(),
            ready_count: 0,
            early_threshold,
        }
    }

    /// Start a new pass over `total` items and return its generation
    pub fn begin(&mut self, total: usize) -> u64 {
        self.generation += 1;
        self.settled = vec![false; total];
        self.ready_count = 0;
        self.generation
    }

    /// Invalidate the current pass without starting another
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.settled.clear();
        self.ready_count = 0;
    }

    /// Count one settled item. Stale generations, unknown indices and repeats are ignored.
    pub fn record(&mut self, generation: u64, index: usize) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.settled.get_mut(index) {
            Some(settled) if !*settled => {
                *settled = true;
                self.ready_count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        let total = self.total();
        total == 0
            || self.ready_count == total
            || self.ready_count >= self.early_threshold.min(total)
    }

    pub fn is_complete(&self) -> bool {
        self.ready_count == self.total()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ready_count(&self) -> usize {
        self.ready_count
    }

    pub fn total(&self) -> usize {
        self.settled.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            ready_count: self.ready_count,
            total: self.total(),
        }
    }
}

impl Default for ReadinessTracker {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pass_is_ready_immediately() {
        let mut tracker = ReadinessTracker::default();
        tracker.begin(0);
        assert!(tracker.is_ready());
        assert!(tracker.is_complete());
        assert_eq!(tracker.progress().ratio(), 1.0);
    }

    #[test]
    fn test_ready_after_all_settle() {
        for total in 0..8 {
            let mut tracker = ReadinessTracker::default();
            let generation = tracker.begin(total);
            for index in 0..total {
                assert!(tracker.record(generation, index));
            }
            assert!(tracker.is_ready());
            assert_eq!(tracker.ready_count(), total);
        }
    }

    #[test]
    fn test_early_threshold_before_completion() {
        let mut tracker = ReadinessTracker::default();
        let generation = tracker.begin(12);

        tracker.record(generation, 7);
        tracker.record(generation, 0);
        assert!(!tracker.is_ready());

        tracker.record(generation, 11);
        assert!(tracker.is_ready());
        assert!(!tracker.is_complete());
    }

    #[test]
    fn test_small_deck_needs_every_item() {
        let mut tracker = ReadinessTracker::default();
        let generation = tracker.begin(2);

        tracker.record(generation, 1);
        assert!(!tracker.is_ready());
        tracker.record(generation, 0);
        assert!(tracker.is_ready());
    }

    #[test]
    fn test_repeat_settlement_counts_once() {
        let mut tracker = ReadinessTracker::default();
        let generation = tracker.begin(4);

        assert!(tracker.record(generation, 2));
        assert!(!tracker.record(generation, 2));
        assert!(!tracker.record(generation, 4));
        assert_eq!(tracker.ready_count(), 1);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut tracker = ReadinessTracker::default();
        let old = tracker.begin(3);
        tracker.record(old, 0);

        let new = tracker.begin(3);
        assert_ne!(old, new);
        assert_eq!(tracker.ready_count(), 0);

        assert!(!tracker.record(old, 1));
        assert!(!tracker.record(old, 2));
        assert_eq!(tracker.ready_count(), 0);
        assert!(!tracker.is_ready());
    }

    #[test]
    fn test_cancel_invalidates_pass() {
        let mut tracker = ReadinessTracker::default();
        let generation = tracker.begin(5);
        tracker.cancel();

        assert!(!tracker.record(generation, 0));
        assert_eq!(tracker.ready_count(), 0);
    }

    #[test]
    fn test_progress_ratio() {
        let mut tracker = ReadinessTracker::new(1);
        let generation = tracker.begin(4);
        tracker.record(generation, 3);

        let progress = tracker.progress();
        assert_eq!(progress, Progress { ready_count: 1, total: 4 });
        assert_eq!(progress.ratio(), 0.25);
        assert!(tracker.is_ready());
    }
}
