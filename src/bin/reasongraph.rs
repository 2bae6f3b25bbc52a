//! reasongraph - merge similar reasons and results into one causal graph
//!
//! # Usage
//!
//! ```bash
//! # Merged graph as JSON on stdout
//! reasongraph relations.csv
//!
//! # Dictionary-based analysis, stricter threshold, written to a file
//! reasongraph relations.csv --dictionary dict.csv --threshold 0.5 -o graph.json
//!
//! # Export a layout request, then render the layout an external tool produced
//! reasongraph relations.csv --layout-request request.json
//! reasongraph relations.csv --layout layout.json --svg graph.svg
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reasongraph::{
    load_rows, render_svg, DictionaryAnalyzer, DuplicatePolicy, GraphConfig, Layout, LayoutHints,
    LayoutRequest, MorphAnalyzer, Pipeline, PretokenizedAnalyzer, Reachability, ScriptAnalyzer,
    SvgStyle,
};

/// Merge similar texts of a reason/result table into a causal graph
#[derive(Parser, Debug)]
#[command(name = "reasongraph", version, about)]
struct Args {
    /// CSV (or .tsv) file with columns index,reason,result,reasonIndex,resultIndex
    data: PathBuf,

    /// Dictionary CSV (surface,pos,basic_form) for morphological analysis
    #[arg(long, conflicts_with = "tokens")]
    dictionary: Option<PathBuf>,

    /// JSON file mapping each text to its analyzed words
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum Jaccard similarity for two texts to be merged
    #[arg(long)]
    threshold: Option<f64>,

    /// Edge directions followed when grouping texts
    #[arg(long, value_enum)]
    reachability: Option<ReachabilityArg>,

    /// Which occurrence labels a text seen in several rows
    #[arg(long, value_enum)]
    duplicates: Option<DuplicatesArg>,

    /// Write the merged graph JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a layout request (graph plus box sizes) for an external layouter
    #[arg(long)]
    layout_request: Option<PathBuf>,

    /// Layout JSON produced by an external layouter
    #[arg(long, requires = "svg")]
    layout: Option<PathBuf>,

    /// Render the merged graph with --layout to this SVG file
    #[arg(long, requires = "layout")]
    svg: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReachabilityArg {
    Undirected,
    OutEdges,
}

impl From<ReachabilityArg> for Reachability {
    fn from(arg: ReachabilityArg) -> Self {
        match arg {
            ReachabilityArg::Undirected => Reachability::Undirected,
            ReachabilityArg::OutEdges => Reachability::OutEdges,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicatesArg {
    Last,
    First,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Last => DuplicatePolicy::LastWriteWins,
            DuplicatesArg::First => DuplicatePolicy::FirstWins,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args)?;
    let analyzer = load_analyzer(&args, &config)?;
    let rows = load_rows(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    let pipeline = Pipeline::new(config, analyzer).context("invalid configuration")?;
    let output = pipeline.run(&rows)?;
    let merged = &output.merged;

    let json = serde_json::to_string_pretty(merged)?;
    match &args.output {
        Some(path) => write_file(path, &json)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    if let Some(path) = &args.layout_request {
        let request = LayoutRequest::new(merged, &LayoutHints::default());
        write_file(path, &serde_json::to_string_pretty(&request)?)?;
    }

    if let (Some(layout_path), Some(svg_path)) = (&args.layout, &args.svg) {
        let text = fs::read_to_string(layout_path)
            .with_context(|| format!("failed to read {}", layout_path.display()))?;
        let layout = Layout::from_json(&text)
            .with_context(|| format!("invalid layout {}", layout_path.display()))?;
        let svg = render_svg(merged, &layout, &SvgStyle::default())?;
        write_file(svg_path, &svg)?;
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(args: &Args) -> Result<GraphConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => GraphConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_similarity_threshold(threshold);
    }
    if let Some(reachability) = args.reachability {
        config = config.with_reachability(reachability.into());
    }
    if let Some(duplicates) = args.duplicates {
        config = config.with_duplicate_policy(duplicates.into());
    }
    Ok(config)
}

fn load_analyzer(args: &Args, config: &GraphConfig) -> Result<Box<dyn MorphAnalyzer>> {
    let marker = config.unknown_basic_form.as_str();
    if let Some(path) = &args.tokens {
        let analyzer = PretokenizedAnalyzer::from_path(path)
            .with_context(|| format!("failed to load tokens {}", path.display()))?;
        return Ok(Box::new(analyzer));
    }
    if let Some(path) = &args.dictionary {
        let analyzer = DictionaryAnalyzer::from_path(path)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?
            .with_unknown_basic_form(marker);
        return Ok(Box::new(analyzer));
    }
    Ok(Box::new(ScriptAnalyzer::new().with_unknown_basic_form(marker)))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
