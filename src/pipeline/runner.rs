//! Pipeline runner: one sequential batch pass from rows to merged graph.
//!
//! Stages, in order:
//! 1. Register the distinct texts of all rows
//! 2. Extract a feature set per text
//! 3. Build the similarity graph
//! 4. Find components
//! 5. Collapse components and re-project relations
//!
//! Each stage runs inside a `pipeline_stage` tracing span and is reported to
//! a [`PipelineObserver`].

use super::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_COMPONENTS, STAGE_FEATURES,
    STAGE_GRAPH, STAGE_MERGE, STAGE_REGISTRY,
};
use crate::errors::Result;
use crate::graph::{ComponentMerger, Components, MergedGraph, SimilarityGraph, SimilarityGraphBuilder};
use crate::nlp::{FeatureExtractor, MorphAnalyzer};
use crate::registry::TextRegistry;
use crate::types::{FeatureSet, GraphConfig, Row};
use serde::Serialize;

/// Enter a tracing span for a pipeline stage until the end of the block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Counts and timings of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub rows: usize,
    pub texts: usize,
    pub similarity_edges: usize,
    pub components: usize,
    pub largest_component: usize,
    pub merged_edges: usize,
    pub elapsed_ms: f64,
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub registry: TextRegistry,
    /// Feature set of every text, indexed by registry id
    pub features: Vec<FeatureSet>,
    pub graph: SimilarityGraph,
    pub components: Components,
    pub merged: MergedGraph,
    pub stats: PipelineStats,
}

/// Rows-to-merged-graph pipeline over a morphological analyzer
#[derive(Debug, Clone)]
pub struct Pipeline<A> {
    config: GraphConfig,
    analyzer: A,
}

impl<A: MorphAnalyzer> Pipeline<A> {
    /// Create a pipeline, rejecting an invalid config.
    pub fn new(config: GraphConfig, analyzer: A) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, analyzer })
    }

    /// Create a pipeline with the default config
    pub fn with_analyzer(analyzer: A) -> Self {
        Self {
            config: GraphConfig::default(),
            analyzer,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Run every stage over `rows`.
    pub fn run(&self, rows: &[Row]) -> Result<PipelineOutput> {
        self.run_with_observer(rows, &mut NoopObserver)
    }

    /// Run every stage over `rows`, reporting stage boundaries to `observer`.
    ///
    /// Any analyzer failure or a relation text without a component aborts
    /// the run; no partial graph is returned.
    pub fn run_with_observer(
        &self,
        rows: &[Row],
        observer: &mut impl PipelineObserver,
    ) -> Result<PipelineOutput> {
        let total = StageClock::start();
        let cfg = &self.config;

        let registry = {
            trace_stage!(STAGE_REGISTRY);
            observer.on_stage_start(STAGE_REGISTRY);
            let clock = StageClock::start();
            let registry = TextRegistry::from_rows(rows, cfg.duplicate_policy);
            observer.on_stage_end(STAGE_REGISTRY, &StageReport::new(clock.elapsed(), registry.len()));
            registry
        };

        let features = {
            trace_stage!(STAGE_FEATURES);
            observer.on_stage_start(STAGE_FEATURES);
            let clock = StageClock::start();
            let features = FeatureExtractor::from_config(cfg).extract_all(&self.analyzer, &registry)?;
            observer.on_stage_end(STAGE_FEATURES, &StageReport::new(clock.elapsed(), features.len()));
            features
        };

        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = SimilarityGraphBuilder::from_config(cfg).build(&registry, &features)?;
            observer.on_stage_end(STAGE_GRAPH, &StageReport::new(clock.elapsed(), graph.edge_count()));
            graph
        };

        let merger = ComponentMerger::from_config(cfg);

        let components = {
            trace_stage!(STAGE_COMPONENTS);
            observer.on_stage_start(STAGE_COMPONENTS);
            let clock = StageClock::start();
            let components = merger.components(&graph);
            observer.on_stage_end(STAGE_COMPONENTS, &StageReport::new(clock.elapsed(), components.len()));
            components
        };

        let merged = {
            trace_stage!(STAGE_MERGE);
            observer.on_stage_start(STAGE_MERGE);
            let clock = StageClock::start();
            let merged = merger.collapse(&graph, &components, rows)?;
            observer.on_stage_end(STAGE_MERGE, &StageReport::new(clock.elapsed(), merged.edge_count()));
            merged
        };

        let stats = PipelineStats {
            rows: rows.len(),
            texts: registry.len(),
            similarity_edges: graph.edge_count(),
            components: components.len(),
            largest_component: components.largest(),
            merged_edges: merged.edge_count(),
            elapsed_ms: total.elapsed(),
        };
        tracing::info!(
            rows = stats.rows,
            texts = stats.texts,
            similarity_edges = stats.similarity_edges,
            components = stats.components,
            merged_edges = stats.merged_edges,
            elapsed_ms = stats.elapsed_ms,
            "pipeline finished"
        );

        Ok(PipelineOutput {
            registry,
            features,
            graph,
            components,
            merged,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;
    use crate::nlp::{PretokenizedAnalyzer, ScriptAnalyzer};
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::{PosTag, Word};

    fn analyzer() -> PretokenizedAnalyzer {
        let nouns = |lemmas: &[&str]| -> Vec<Word> {
            lemmas
                .iter()
                .map(|l| Word::new(*l, PosTag::Noun, *l))
                .collect()
        };
        PretokenizedAnalyzer::new()
            .with_text("A", nouns(&["機械", "故障"]))
            .with_text("B", nouns(&["機械", "故障", "停止"]))
            .with_text("C", nouns(&["停止", "機械"]))
            .with_text("X", nouns(&["別件", "無関係"]))
            .with_text("Y", nouns(&["別件"]))
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new("0", "A", "B", "0", "1"),
            Row::new("1", "B", "C", "0", "1"),
            Row::new("2", "X", "Y", "0", "1"),
            Row::new("3", "C", "X", "0", "1"),
        ]
    }

    #[test]
    fn test_run() {
        let pipeline = Pipeline::with_analyzer(analyzer());
        let out = pipeline.run(&rows()).unwrap();

        assert_eq!(out.stats.rows, 4);
        assert_eq!(out.stats.texts, 5);
        assert_eq!(out.stats.components, 2);
        assert_eq!(out.stats.largest_component, 3);
        // last occurrence wins: B, C and X are relabelled by later rows
        assert_eq!(out.merged.vertex(0).unwrap().texts, vec!["00 A", "10 B", "30 C"]);
        assert_eq!(out.merged.vertex(1).unwrap().texts, vec!["31 X", "21 Y"]);
        assert_eq!(out.merged.edges(), &[(0, 1)]);
        assert_eq!(out.features.len(), out.registry.len());
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let pipeline = Pipeline::with_analyzer(analyzer());
        let mut obs = StageTimingObserver::new();
        pipeline.run_with_observer(&rows(), &mut obs).unwrap();

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![STAGE_REGISTRY, STAGE_FEATURES, STAGE_GRAPH, STAGE_COMPONENTS, STAGE_MERGE]
        );
        assert_eq!(obs.report(STAGE_COMPONENTS).unwrap().items, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GraphConfig::default().with_similarity_threshold(1.5);
        let err = Pipeline::new(config, ScriptAnalyzer::new()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidConfig { .. }));
    }

    #[test]
    fn test_analyzer_failure_aborts() {
        let pipeline = Pipeline::with_analyzer(analyzer());
        let err = pipeline
            .run(&[Row::new("0", "A", "unknown", "0", "1")])
            .unwrap_err();
        assert!(matches!(err, GraphError::Tokenizer { .. }));
    }

    #[test]
    fn test_empty_rows() {
        let out = Pipeline::with_analyzer(ScriptAnalyzer::new()).run(&[]).unwrap();
        assert!(out.merged.is_empty());
        assert_eq!(out.stats, PipelineStats { elapsed_ms: out.stats.elapsed_ms, ..Default::default() });
    }
}
