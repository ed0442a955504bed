//! Per-step timing for the dynamical core.

/// Timing collected during one `advance` call.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Time spent in contained physics.
    pub physics_us: u64,
    /// Time spent in kernel calls, from the first push to the last pull.
    pub kernel_us: u64,
    /// Whether the spectral state was rebuilt this step.
    pub resynchronized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.physics_us, 0);
        assert_eq!(m.kernel_us, 0);
        assert!(!m.resynchronized);
    }
}
