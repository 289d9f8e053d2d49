//! Per-tick metrics for the simulation clock.
//!
//! [`StepMetrics`] captures timing and population data for a single tick.

/// Timing and population metrics collected during a single tick.
///
/// All durations are in microseconds. A paused tick reports zero rule
/// and restock time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the automaton rule, in microseconds.
    pub rule_us: u64,
    /// Time spent in the restock check and any repopulation, in microseconds.
    pub restock_us: u64,
    /// Time spent publishing the frame, in microseconds.
    pub publish_us: u64,
    /// Cells holding the alive tag after the tick.
    pub live_cells: usize,
    /// `live_cells` over the total cell count.
    pub life_fraction: f64,
    /// Ticks since the last restock or restart.
    pub iterations_since_reset: u64,
    /// Cumulative number of restocks.
    pub restocks_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.rule_us, 0);
        assert_eq!(m.restock_us, 0);
        assert_eq!(m.publish_us, 0);
        assert_eq!(m.live_cells, 0);
        assert_eq!(m.life_fraction, 0.0);
        assert_eq!(m.iterations_since_reset, 0);
        assert_eq!(m.restocks_total, 0);
    }
}
