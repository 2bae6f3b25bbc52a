//! Pipeline execution and stage observation.
//!
//! - [`runner`] runs the stages in order and threads their outputs
//! - [`observer`] hooks for stage timing and reporting

pub mod observer;
pub mod runner;

pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::{Pipeline, PipelineOutput, PipelineStats};
