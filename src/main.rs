use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use midi_bridge::application::ports::StagingStore;
use midi_bridge::application::services::ConversionService;
use midi_bridge::infrastructure::bridge::{BridgeProcessRunner, WslPathTranslator};
use midi_bridge::infrastructure::delivery::FileDelivery;
use midi_bridge::infrastructure::observability::{
    TracingConfig, TracingConversionEvents, init_tracing,
};
use midi_bridge::infrastructure::storage::LocalStagingStore;
use midi_bridge::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .parse()
        .map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        &TracingConfig::new(environment.as_str(), settings.logging.json)
            .with_default_filter(settings.logging.level.as_str()),
    );

    let local_store = Arc::new(LocalStagingStore::new(PathBuf::from(
        &settings.storage.root,
    ))?);
    let staging_store: Arc<dyn StagingStore> = local_store.clone();

    let runner = Arc::new(BridgeProcessRunner::new(
        settings.bridge.program.as_str(),
        settings.bridge.shell.as_str(),
    ));
    let translator = Arc::new(WslPathTranslator::new(settings.bridge.mount_root.as_str()));

    let conversion_service = Arc::new(ConversionService::new(
        runner,
        translator,
        Arc::clone(&staging_store),
        Arc::new(TracingConversionEvents),
        settings.conversion_options(),
    ));

    let state = AppState {
        conversion_service,
        staging_store,
        file_delivery: Arc::new(FileDelivery::new(local_store.root())),
        max_upload_bytes: settings.storage.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!(
        address = %addr,
        bridge = %settings.bridge.program,
        storage_root = %local_store.root().display(),
        timeout_secs = settings.bridge.timeout_secs,
        "Listening"
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
