use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lexcap_core::config::{Config, EngineKind, Settings};
use lexcap_core::pacing::{pacer_from_settings, Pause};
use lexcap_core::traits::KnowledgeSearch;
use lexcap_core::types::{is_actionable_query, retain_types, ItemType, SearchResult};
use lexcap_core::KnowledgeBase;
use lexcap_graph::{layout, GraphBuilder};
use lexcap_hybrid::HybridSearch;
use lexcap_matter::{format_time, MatterAssistant, MatterLibrary};
use lexcap_roi::{calculate_roi_with, RecoverySession, DEFAULT_LAWYERS};
use lexcap_search::SemanticScorer;
use lexcap_text::Bm25Engine;
use lexcap_workflow::export::{now_timestamp, write_export};
use lexcap_workflow::{CanvasBuilder, NodeCategory, Palette, Position, StepListBuilder};

#[derive(Parser)]
#[command(name = "lexcap", version, about = "Legal knowledge capture: search, graph, workflows, ROI and matter Q&A")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the knowledge base
    Search {
        query: String,
        /// Keep only these item types (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<ItemType>,
        /// Override the configured engine
        #[arg(short, long)]
        engine: Option<EngineArg>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Relationship graph around one knowledge item
    Graph {
        /// Center item id; omitted uses the first item
        id: Option<String>,
        /// Print positioned nodes and edges instead of the raw graph
        #[arg(long)]
        layout: bool,
    },
    /// Annual savings estimate for a firm
    Roi {
        #[arg(short, long, default_value_t = DEFAULT_LAWYERS)]
        lawyers: u32,
    },
    /// Analyze unbilled time and show recoverable value
    Recover {
        /// Flip the selection of these activity ids after analysis
        #[arg(long)]
        toggle: Vec<String>,
    },
    /// Ask a question about the sample matter documents
    Ask {
        question: Option<String>,
        /// List the suggested questions
        #[arg(long)]
        samples: bool,
    },
    #[command(subcommand)]
    Workflow(WorkflowCommand),
}

#[derive(Subcommand)]
enum WorkflowCommand {
    /// List palette nodes
    Palette {
        #[arg(short, long)]
        category: Option<NodeCategory>,
    },
    /// List workflow templates
    Templates,
    /// Build a workflow and write it to the export directory
    Export {
        /// Start from this template
        #[arg(short, long)]
        template: Option<String>,
        /// Palette node ids or types to append, in order
        #[arg(short, long, value_delimiter = ',')]
        nodes: Vec<String>,
        #[arg(long)]
        name: Option<String>,
        /// Export the canvas variant (nodes plus connections)
        #[arg(long)]
        canvas: bool,
        /// Directory to write into; defaults to data.export_dir
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EngineArg {
    Semantic,
    Bm25,
    Hybrid,
}

impl From<EngineArg> for EngineKind {
    fn from(e: EngineArg) -> Self {
        match e {
            EngineArg::Semantic => EngineKind::Semantic,
            EngineArg::Bm25 => EngineKind::Bm25,
            EngineArg::Hybrid => EngineKind::Hybrid,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    let settings = config.settings()?;

    match cli.command {
        Command::Search { query, types, engine, limit } => {
            let base = load_base(&config, &settings)?;
            let kind = engine.map_or(settings.search.engine, EngineKind::from);
            let engine = build_engine(kind, base, &settings)?;
            let limit = limit.unwrap_or(settings.search.limit);
            let mut results = if is_actionable_query(&query, settings.search.min_query_len) {
                pacer_from_settings(&settings.pacing).pause(Pause::Search);
                engine.search(&query, limit).with_context(|| format!("{} search failed", engine.name()))?
            } else {
                Vec::new()
            };
            retain_types(&mut results, &types);
            tracing::debug!(engine = engine.name(), results = results.len(), "search finished");
            if cli.json { print_json(&results)?; } else { print_results(&query, engine.name(), &results); }
        }
        Command::Graph { id, layout: positioned } => {
            let base = load_base(&config, &settings)?;
            let builder = GraphBuilder::with_settings(&base, settings.graph.clone());
            let graph = match id.as_deref() {
                Some(id) => builder.build_for_id(id)?,
                None => builder.build(base.items().first()),
            };
            if positioned {
                let placed = layout(&graph, &settings.graph);
                if cli.json { return print_json(&placed); }
                for n in &placed.nodes {
                    println!("{:<10} ({:>7.1}, {:>7.1})  {}{}", n.id, n.position.x, n.position.y, n.label, if n.is_center { "  [center]" } else { "" });
                }
                for e in &placed.edges {
                    println!("  {} -> {}  width={:.1}{}", e.source, e.target, e.stroke_width, if e.animated { " animated" } else { "" });
                }
            } else if cli.json {
                print_json(&graph)?;
            } else {
                for n in &graph.nodes { println!("{:<10} {:<9} {:?}  {}", n.id, n.item_type.as_str(), n.role, n.label); }
                for e in &graph.edges { println!("  {} -> {}  {:?} ({})", e.source, e.target, e.kind, e.weight); }
            }
        }
        Command::Roi { lawyers } => {
            let report = calculate_roi_with(lawyers, &settings.roi);
            if cli.json { return print_json(&report); }
            println!("💼 {} lawyers", report.lawyers);
            println!("  Annual savings:   ${:.0}", report.annual_savings);
            println!("  Hours saved:      {:.0}", report.time_saved_hours);
            println!("  Value per lawyer: ${:.0}", report.cost_per_lawyer);
            for b in &report.breakdown_items { println!("  - {:<26} ${:.0}", b.category, b.amount); }
        }
        Command::Recover { toggle } => {
            let mut session = RecoverySession::sample(settings.roi.clone())?;
            session.analyze(pacer_from_settings(&settings.pacing).as_ref());
            for id in &toggle { session.toggle(id)?; }
            let summary = session.summary();
            if cli.json { return print_json(&summary); }
            println!("🔍 Found {} unbilled activities worth ${:.0} ({:.1} h)", session.activities().len(), session.found_value(), session.found_hours());
            for a in session.activities() {
                let mark = if session.is_selected(&a.id) { "x" } else { " " };
                println!("  [{mark}] {:>2} {:<10} {:>3}% ${:>6.0}  {} / {}: {}", a.id, a.client, a.confidence, a.value, a.matter, a.source, a.description);
            }
            println!("\n✅ {} selected: ${:.0} over {:.1} h, {:.1}x the ${:.0} monthly subscription", summary.selected, summary.total_recovered, summary.total_hours, summary.roi_multiple, summary.monthly_subscription);
        }
        Command::Ask { question, samples } => {
            let library = MatterLibrary::builtin().context("loading matter documents")?;
            if samples || question.is_none() {
                if cli.json { return print_json(library.sample_questions()); }
                for (i, q) in library.sample_questions().iter().enumerate() { println!("{}. {}", i + 1, q.question); }
                return Ok(());
            }
            let assistant = MatterAssistant::with_pacer(library, pacer_from_settings(&settings.pacing));
            let response = assistant.ask(question.as_deref().unwrap_or_default())?;
            if cli.json { return print_json(&response); }
            println!("{}\n", response.answer);
            println!("⏱  {}", format_time(response.processing_time));
        }
        Command::Workflow(cmd) => run_workflow(cmd, &config, &settings, cli.json)?,
    }
    Ok(())
}

fn run_workflow(cmd: WorkflowCommand, config: &Config, settings: &Settings, json: bool) -> Result<()> {
    let palette = Palette::builtin()?;
    match cmd {
        WorkflowCommand::Palette { category } => {
            let nodes = palette.by_category(category);
            if json { return print_json(&nodes); }
            for n in nodes { println!("{:<20} {:<9} {:<22} {}", n.id, n.category.as_str(), n.label, n.description); }
        }
        WorkflowCommand::Templates => {
            if json { return print_json(palette.templates()); }
            for t in palette.templates() {
                println!("{:<24} {} ({} nodes, {} connections)\n    {}", t.id, t.name, t.nodes.len(), t.connections.len(), t.description);
            }
        }
        WorkflowCommand::Export { template, nodes, name, canvas, out } => {
            let template = template.as_deref().map(|id| palette.template(id)).transpose()?;
            if template.is_none() && nodes.is_empty() { bail!("nothing to export: pass --template or --nodes"); }
            let dir = out.unwrap_or_else(|| config.resolve(&settings.data.export_dir));
            let timestamp = now_timestamp();
            let path = if canvas {
                let mut builder = CanvasBuilder::new();
                if let Some(t) = template { builder.load_template(t); }
                let mut x = 100.0;
                for id in &nodes {
                    builder.drop_node(palette.node(id)?, Position::new(x, 100.0));
                    x += 200.0;
                }
                if let Some(name) = name { builder.set_name(name); }
                println!("{}", builder.run()?);
                write_export(&dir, builder.name(), &builder.export(&timestamp)?)?
            } else {
                let mut builder = StepListBuilder::new();
                if let Some(t) = template { builder.load_template(t); }
                for id in &nodes { builder.append(palette.node(id)?); }
                if let Some(name) = name { builder.set_name(name); }
                println!("{}", builder.run()?);
                write_export(&dir, builder.name(), &builder.export(&timestamp)?)?
            };
            println!("\n✅ Exported to {}", path.display());
        }
    }
    Ok(())
}

fn load_base(config: &Config, settings: &Settings) -> Result<Arc<KnowledgeBase>> {
    let extra = (!settings.data.knowledge_dir.is_empty()).then(|| config.resolve(&settings.data.knowledge_dir));
    let base = KnowledgeBase::load(extra.as_deref()).context("loading knowledge base")?;
    Ok(Arc::new(base))
}

fn build_engine(kind: EngineKind, base: Arc<KnowledgeBase>, settings: &Settings) -> Result<Box<dyn KnowledgeSearch>> {
    let search = settings.search.clone();
    let engine: Box<dyn KnowledgeSearch> = match kind {
        EngineKind::Semantic => Box::new(SemanticScorer::with_settings(base, search)),
        EngineKind::Bm25 => Box::new(Bm25Engine::build(base, search)?),
        EngineKind::Hybrid => {
            let text = Bm25Engine::build(base.clone(), search.clone())?;
            Box::new(HybridSearch::new(SemanticScorer::with_settings(base, search), text))
        }
    };
    Ok(engine)
}

fn print_results(query: &str, engine: &str, results: &[SearchResult]) {
    println!("🔍 Found {} results for: \"{}\" ({engine})", results.len(), query);
    for (i, r) in results.iter().enumerate() {
        println!("\n  {}. {:.0}% {:?}  {}  [{} | {} | {}]", i + 1, r.semantic_score * 100.0, r.confidence_band(), r.item.title, r.item.item_type, r.item.category, r.item.access_level().label());
        println!("     {} ({} years)", r.item.author, r.item.author_years_experience.unwrap_or_default());
        for h in &r.highlights { println!("     📝 {h}"); }
        if !r.semantic_reasons.is_empty() { println!("     Why: {}", r.semantic_reasons.join("; ")); }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
