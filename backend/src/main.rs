//! Backend entry-point: loads settings, wires adapters, and starts the server.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use medquiz::domain::ModelHandle;
use medquiz::domain::ports::ImageClassifier;
use medquiz::inbound::http::health::HealthState;
use medquiz::outbound::classifier::BurnImageClassifier;
use medquiz::outbound::persistence::{MongoStore, MongoUserRepository, StoreConfig};
use medquiz::outbound::webhook::{SvixWebhookVerifier, WebhookSecret};
use medquiz::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Connect to MongoDB when configured; `None` selects fixture repositories.
async fn connect_store(settings: &AppSettings) -> color_eyre::Result<Option<MongoStore>> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("MEDQUIZ_DATABASE_URL is not set; serving empty fixture data");
        return Ok(None);
    };
    let mut store_config = StoreConfig::new(url);
    if let Some(name) = settings.database_name.as_deref() {
        store_config = store_config.with_database_name(name);
    }
    let store = MongoStore::connect(store_config)
        .await
        .wrap_err("failed to connect to MongoDB")?;
    MongoUserRepository::new(&store)
        .ensure_indexes()
        .await
        .wrap_err("failed to create user indexes")?;
    info!(database = store.database_name(), "connected to MongoDB");
    Ok(Some(store))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;

    let raw_secret = settings
        .webhook_secret
        .as_deref()
        .ok_or_else(|| eyre!("MEDQUIZ_WEBHOOK_SECRET must be set"))?;
    let secret = WebhookSecret::parse(raw_secret).wrap_err("invalid webhook secret")?;
    info!(fingerprint = %secret.fingerprint(), "webhook secret loaded");
    let verifier =
        SvixWebhookVerifier::new(secret).with_tolerance(settings.webhook_tolerance());

    let store = connect_store(&settings).await?;

    let model_dir = settings.model_dir();
    info!(model_dir = %model_dir.display(), "loading classifier");
    let model = ModelHandle::new();
    // Requests are served while the model loads; /predict reports 500 until then.
    drop(model.spawn_load(move || {
        BurnImageClassifier::load(&model_dir)
            .map(|classifier| Arc::new(classifier) as Arc<dyn ImageClassifier>)
    }));

    let health_state = web::Data::new(HealthState::new().with_model(model.clone()));
    let mut config = ServerConfig::new(settings.bind_addr(), verifier, model)
        .with_collection_policy(settings.collection_policy())
        .with_upload_limit(settings.max_upload_bytes());
    if let Some(store) = store {
        config = config.with_store(store);
    }

    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
