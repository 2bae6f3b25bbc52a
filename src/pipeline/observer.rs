//! Stage hooks for the pipeline runner
//!
//! An observer is told when each stage starts and ends. The default hooks
//! do nothing, so [`NoopObserver`] costs nothing; [`StageTimingObserver`]
//! records the elapsed time of every stage.

use std::time::Instant;

pub const STAGE_REGISTRY: &str = "registry";
pub const STAGE_FEATURES: &str = "features";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_COMPONENTS: &str = "components";
pub const STAGE_MERGE: &str = "merge";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    /// Milliseconds since [`start`](Self::start)
    pub fn elapsed(&self) -> f64 {
        self.0.elapsed().as_secs_f64() * 1000.0
    }
}

/// What a finished stage reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageReport {
    pub elapsed_ms: f64,
    /// Number of things the stage produced (texts, edges, components...)
    pub items: usize,
}

impl StageReport {
    pub fn new(elapsed_ms: f64, items: usize) -> Self {
        Self { elapsed_ms, items }
    }
}

/// Receives stage boundaries from [`Pipeline`](super::Pipeline)
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that keeps every stage report in execution order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in execution order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report of one stage
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage times
    pub fn total_ms(&self) -> f64 {
        self.reports.iter().map(|(_, r)| r.elapsed_ms).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_observer_keeps_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_GRAPH);
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(2.0, 5));
        obs.on_stage_end(STAGE_MERGE, &StageReport::new(1.5, 2));

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_GRAPH, STAGE_MERGE]);
        assert_eq!(obs.report(STAGE_MERGE).unwrap().items, 2);
        assert!(obs.report(STAGE_FEATURES).is_none());
        assert!((obs.total_ms() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        assert!(clock.elapsed() >= 0.0);
    }
}
