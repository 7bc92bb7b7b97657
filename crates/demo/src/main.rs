use llm::{create_language_model, LanguageModel, ScriptedModel};
use log::{info, warn};
use router::ConversationRouter;
use router_core::{Config, LlmConfig};
use std::sync::Arc;
use tooling::{builtin_registry, RandomSource};

const DEMO_QUERIES: [&str; 4] = [
    "What's the weather like in Tokyo?",
    "Calculate 5 * 3",
    "Find me news about machine learning",
    "Hello! How are you doing today?",
];

/// Replies for DEMO_QUERIES: a routing answer, then an extraction or chat reply, per query.
fn offline_model() -> ScriptedModel {
    ScriptedModel::with_replies([
        "weather_search",
        "Tokyo",
        "calculator",
        "5 * 3",
        "news_search",
        "machine learning",
        "general_chat",
        "Hi! I'm running in offline mode, but I'm doing well. Ask me about weather, math or news.",
    ])
    .with_fallback("general_chat")
}

/// The scripted replies only fit DEMO_QUERIES, so custom queries need a real model.
fn select_model(cfg: &LlmConfig, custom_queries: bool) -> anyhow::Result<Arc<dyn LanguageModel>> {
    if cfg.provider == "gemini" && !cfg.has_api_key() {
        if custom_queries {
            anyhow::bail!("GOOGLE_API_KEY is required to answer custom queries");
        }
        warn!("No Google API key found. Using scripted responses for the demo.");
        return Ok(Arc::new(offline_model()));
    }
    create_language_model(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Config::load_from_env().unwrap_or_else(|e| {
        warn!("Could not load config ({:#}), using development defaults", e);
        Config::default()
    });
    let args: Vec<String> = std::env::args().skip(1).collect();
    let custom_queries = !args.is_empty();
    let queries: Vec<String> = if custom_queries {
        args
    } else {
        DEMO_QUERIES.iter().map(|q| q.to_string()).collect()
    };

    let llm_cfg = config.llm.with_env_overrides();
    let model = select_model(&llm_cfg, custom_queries)?;

    let registry = Arc::new(builtin_registry(RandomSource::from_entropy()));
    info!("Registered tools: {:?}", registry.names());
    let mut router = ConversationRouter::with_model(registry, model).with_config(&config.router);

    println!("Tool Router Demo");
    println!("{}", "=".repeat(40));
    for query in &queries {
        println!("\nUser: {}", query);
        let response = router.process_message(query).await;
        println!("Assistant: {}", response);
    }

    info!(
        "Conversation finished with {} turns in history",
        router.history().len()
    );
    Ok(())
}
