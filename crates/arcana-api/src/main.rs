//! Arcana API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use arcana_catalog::decks::FileDeckProvider;
use arcana_catalog::personas::load_personas;
use arcana_catalog::spreads::FileSpreadRepository;
use arcana_core::clock::SystemClock;
use arcana_core::rng::{DeterministicRng, StdRngSource};
use arcana_interpretation::application::gateway::InterpretationGateway;
use arcana_interpretation::domain::persona::{PersonaRegistry, StaticPersonaRegistry};
use arcana_interpretation::infrastructure::http_client::HttpInterpretationService;
use arcana_session::domain::draw::DrawPolicy;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use arcana_api::config::ServerConfig;
use arcana_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Arcana API server");

    let config = ServerConfig::from_env()?;

    // Load catalog and wire adapters.
    let spreads = FileSpreadRepository::load(&config.spreads_path).await?;
    let decks = FileDeckProvider::new(&config.decks_dir);
    let personas: Arc<dyn PersonaRegistry> = match &config.personas_path {
        Some(path) => Arc::new(load_personas(path).await?),
        None => {
            tracing::warn!("PERSONAS_PATH not set, accepting every persona");
            Arc::new(StaticPersonaRegistry::open())
        }
    };
    let service =
        HttpInterpretationService::new(&config.interpretation_url, config.interpretation_timeout)?;
    let gateway = InterpretationGateway::new(Arc::new(service), personas);

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(StdRngSource::from_os_rng()));
    let app_state = AppState::new(
        Arc::new(SystemClock),
        rng,
        Arc::new(spreads),
        Arc::new(decks),
        gateway,
        DrawPolicy {
            reversal_probability: config.reversal_probability,
        },
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = arcana_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
