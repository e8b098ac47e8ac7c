use std::sync::Arc;

use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use agile_point::adapters::ai::{AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider};
use agile_point::adapters::analysis::{DisabledStoryAnalyzer, LlmStoryAnalyzer};
use agile_point::adapters::http::{estimation_routes, EstimationHandlers};
use agile_point::adapters::storage::InMemorySessionRepository;
use agile_point::config::{AiConfig, AiProvider, AppConfig, ServerConfig};
use agile_point::ports::{AIError, AIProvider, StoryAnalyzer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let analyzer = story_analyzer(&config.ai)?;
    let repository = Arc::new(InMemorySessionRepository::new());
    let handlers = EstimationHandlers::new(repository, analyzer, &config.estimation);

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::permissive(),
        origins => {
            let origins = origins
                .iter()
                .map(|o| o.parse::<axum::http::HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new().allow_origin(origins)
        }
    };

    let app = estimation_routes(handlers)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "agile-point listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Honors `RUST_LOG`, falling back to the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Picks the analyzer for the configured provider. Without an API key the
/// service runs with analysis switched off.
fn story_analyzer(config: &AiConfig) -> Result<Arc<dyn StoryAnalyzer>, AIError> {
    let Some(api_key) = config.api_key() else {
        tracing::warn!(provider = ?config.provider, "no API key configured, story analysis disabled");
        return Ok(Arc::new(DisabledStoryAnalyzer));
    };

    let provider: Arc<dyn AIProvider> = match config.provider {
        AiProvider::Anthropic => {
            let mut provider_config = AnthropicConfig::new(api_key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(AnthropicProvider::new(provider_config)?)
        }
        AiProvider::Gemini => {
            let mut provider_config = GeminiConfig::new(api_key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(GeminiProvider::new(provider_config)?)
        }
    };

    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "story analysis enabled");

    Ok(Arc::new(
        LlmStoryAnalyzer::new(provider).with_max_tokens(config.max_tokens),
    ))
}
