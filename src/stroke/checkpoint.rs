/// Counts interior landmarks hit in strict 1-based order.
///
/// Out-of-order and repeated hits are ignored, never errors. No time component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CheckpointTracker {
    total: u32,
    hit: u32,
}

impl CheckpointTracker {
    /// Tracker expecting `total` checkpoints.
    pub fn new(total: u32) -> Self {
        Self { total, hit: 0 }
    }

    /// Register a hit; counts only when `index == hit_count() + 1`.
    pub fn register(&mut self, index: u32) -> bool {
        if index != self.hit + 1 {
            return false;
        }
        self.hit += 1;
        tracing::debug!(index, total = self.total, "checkpoint hit");
        true
    }

    /// `true` once the running count reached the configured total.
    pub fn all_hit(&self) -> bool {
        self.hit >= self.total
    }

    /// Checkpoints counted so far.
    pub fn hit_count(&self) -> u32 {
        self.hit
    }

    /// Configured total.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Zero the running count.
    pub fn reset(&mut self) {
        self.hit = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/checkpoint.rs"]
mod tests;
