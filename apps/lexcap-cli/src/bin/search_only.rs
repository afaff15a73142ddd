use std::env;
use std::sync::Arc;

use lexcap_core::config::Config;
use lexcap_core::KnowledgeBase;
use lexcap_search::SemanticScorer;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [limit]", args[0]);
        eprintln!("Example: {} 'earnout disputes' 5", args[0]);
        std::process::exit(1);
    }
    let query_text = &args[1];
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    let settings = config.settings()?;
    let limit = args.get(2).and_then(|l| l.parse::<usize>().ok()).unwrap_or(settings.search.limit);
    println!("🔍 lexcap-search\n==================");
    println!("Query: {query_text}");
    let extra = (!settings.data.knowledge_dir.is_empty()).then(|| config.resolve(&settings.data.knowledge_dir));
    let base = KnowledgeBase::load(extra.as_deref())?;
    println!("Knowledge items: {}", base.len());
    let scorer = SemanticScorer::with_settings(Arc::new(base), settings.search);
    let results = scorer.search_top(query_text, limit);
    println!("\n🔍 Found {} results for: \"{}\"", results.len(), query_text);
    for (i, result) in results.iter().enumerate() {
        println!("\n  {}. score={:.2}  id={}  type={}  category={}", i + 1, result.semantic_score, result.item.id, result.item.item_type, result.item.category);
        println!("     {}", result.item.title);
        for h in &result.highlights { println!("     📝 {h}"); }
    }
    Ok(())
}
