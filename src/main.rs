use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use contact_service::app;
use contact_service::controller::assets::StaticAssets;
use contact_service::controller::contact::ContactPolicy;
use contact_service::settings::Settings;
use contact_service::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber = telemetry::create_subscriber(settings.log.filter(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    // Storage first, so the listener never accepts requests it cannot persist
    let store = app::connect_store(&settings.database).await?;

    let listener = TcpListener::bind(settings.app.addr()).context("Failed to bind listener")?;
    tracing::info!("App listening on {}", listener.local_addr()?);

    let static_assets = StaticAssets::new(settings.app.static_dir());
    let policy = ContactPolicy {
        validate_email_format: settings.app.validate_email_format(),
    };

    app::run(listener, Arc::new(store), static_assets, policy)?
        .await
        .context("Failed to run app")
}
