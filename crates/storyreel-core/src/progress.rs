//! Segment states for the per-collection progress track

/// Render state of one progress segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentState {
    /// Item already shown
    Completed,
    /// Item on screen, filled to the given fraction
    Active(f64),
    /// Item not reached yet
    Pending,
}

impl SegmentState {
    /// Fill ratio in [0.0, 1.0]
    pub fn fill(&self) -> f64 {
        match self {
            SegmentState::Completed => 1.0,
            SegmentState::Active(fraction) => fraction.clamp(0.0, 1.0),
            SegmentState::Pending => 0.0,
        }
    }
}

/// One segment per item of the current collection
pub fn segments(item_count: usize, current: usize, fraction: f64) -> Vec<SegmentState> {
    (0..item_count)
        .map(|index| match index.cmp(&current) {
            std::cmp::Ordering::Less => SegmentState::Completed,
            std::cmp::Ordering::Equal => SegmentState::Active(fraction.clamp(0.0, 1.0)),
            std::cmp::Ordering::Greater => SegmentState::Pending,
        })
        .collect()
}
