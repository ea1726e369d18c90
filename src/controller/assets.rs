use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::dev::HttpServiceFactory;
use actix_web::{guard, route, web};

/// Directory of publicly served files
#[derive(Debug, Clone)]
pub struct StaticAssets {
    dir: PathBuf,
}

impl StaticAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The document served for `GET /`
    pub fn index(&self) -> PathBuf {
        self.dir.join("index.html")
    }

    /// File service for everything else under the directory
    ///
    /// Only `GET`/`HEAD` are routed here so other methods fall through to 404.
    pub fn files(&self) -> impl HttpServiceFactory {
        Files::new("/", self.dir.clone()).guard(guard::Any(guard::Get()).or(guard::Head()))
    }
}

/// Serve the index page
#[tracing::instrument(name = "Serve index page", skip(assets))]
#[route("/", method = "GET", method = "HEAD")]
async fn index(assets: web::Data<StaticAssets>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(assets.index()).await?)
}
