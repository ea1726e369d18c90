use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use anyhow::Context;

use sqlx::postgres::PgPoolOptions;

use tracing_actix_web::TracingLogger;

use crate::controller::assets::{self, StaticAssets};
use crate::controller::contact::{self, ContactPolicy};
use crate::repo::{ContactStore, PgContactStore};
use crate::settings::DatabaseSettings;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Open the contacts collection, failing if the database is not reachable in time
///
/// Must complete before the listener is bound so no request arrives ahead of storage.
#[tracing::instrument(name = "Connect to database", skip(settings))]
pub async fn connect_store(settings: &DatabaseSettings) -> anyhow::Result<PgContactStore> {
    let pool = PgPoolOptions::new()
        .acquire_timeout(settings.connect_timeout())
        .connect_with(settings.connect_options()?)
        .await
        .context("Failed to connect to the database")?;

    if settings.run_migrations() {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    Ok(PgContactStore::new(pool))
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn ContactStore>,
    static_assets: StaticAssets,
    policy: ContactPolicy,
) -> anyhow::Result<Server> {
    tracing::info!(
        "Serving static files from {}",
        static_assets.dir().display()
    );

    // Wrap application data
    let store: web::Data<dyn ContactStore> = web::Data::from(store);
    let static_assets = web::Data::new(static_assets);
    let policy = web::Data::new(policy);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(static_assets.clone())
            .app_data(policy.clone())
            .service(health_check)
            .service(contact::create)
            .service(assets::index)
            .service(static_assets.files())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
