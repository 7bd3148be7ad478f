//! Bookshelf application library
//!
//! Project modules plus the bootstrap that wires settings, the SQLite pool,
//! the module registry and the HTTP server together.

pub mod modules;

use anyhow::Context;
use axum::Router;
use bookshelf_db::DbPool;
use bookshelf_kernel::{InitCtx, ModuleRegistry, Settings};

/// Re-export commonly used types
pub use modules::*;

/// Registry with every project module registered.
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Open the configured store and create the schema if it is missing.
///
/// Returns the number of table definitions executed.
pub fn init_db(settings: &Settings) -> anyhow::Result<usize> {
    let db = open_pool(settings)?;
    build_registry().ensure_schema(&db)
}

fn open_pool(settings: &Settings) -> anyhow::Result<DbPool> {
    bookshelf_db::create_pool(&settings.database.path, settings.database.runtime())
        .with_context(|| format!("failed to open database '{}'", settings.database.path))
}

/// A started application: modules initialized, schema ensured, pool open.
pub struct App {
    settings: Settings,
    registry: ModuleRegistry,
    db: DbPool,
}

impl App {
    /// Open the store and run the startup half of the module lifecycle.
    pub async fn prepare(settings: Settings) -> anyhow::Result<Self> {
        let db = open_pool(&settings)?;
        Self::with_pool(settings, db).await
    }

    /// Like [`App::prepare`] with an already opened pool.
    pub async fn with_pool(settings: Settings, db: DbPool) -> anyhow::Result<Self> {
        let app = Self {
            settings,
            registry: build_registry(),
            db,
        };

        let ctx = app.ctx();
        app.registry.init_modules(&ctx).await?;
        app.registry.ensure_schema(app.db())?;
        app.registry.start_modules(&ctx).await?;

        Ok(app)
    }

    pub fn ctx(&self) -> InitCtx<'_> {
        InitCtx {
            settings: &self.settings,
            db: &self.db,
        }
    }

    pub fn db(&self) -> &DbPool {
        &self.db
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The fully layered router, as served.
    pub fn router(&self) -> anyhow::Result<Router> {
        bookshelf_http::build_router(&self.registry, &self.ctx())
    }

    /// Serve until shutdown, then stop modules.
    pub async fn serve(self) -> anyhow::Result<()> {
        bookshelf_http::start_server(&self.registry, &self.ctx()).await?;
        self.registry.stop_modules().await
    }
}

/// Prepare and serve with the given settings.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    App::prepare(settings).await?.serve().await
}
