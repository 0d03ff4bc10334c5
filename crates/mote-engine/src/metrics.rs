//! Per-step performance metrics.
//!
//! [`StepMetrics`] captures timing for the most recent step call,
//! letting a host correlate frame budget overruns with the active
//! mode and iteration count without a profiler attached.

/// Timing metrics for a single `step()` call.
///
/// Durations are in microseconds and cover all iterations of the
/// call. Populated after each step; read via
/// [`Engine::last_metrics`](crate::Engine::last_metrics).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Tick counter after the step completed.
    pub tick: u64,
    /// Number of iterations the call advanced.
    pub iterations: u32,
    /// Time spent in the force pass, summed over iterations.
    pub force_us: u64,
    /// Time spent integrating and wrapping, summed over iterations.
    pub integrate_us: u64,
    /// Wall-clock time of the whole call.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.tick, 0);
        assert_eq!(m.iterations, 0);
        assert_eq!(m.force_us, 0);
        assert_eq!(m.integrate_us, 0);
        assert_eq!(m.total_us, 0);
    }
}
