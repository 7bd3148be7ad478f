use anyhow::Context;
use std::sync::Arc;

use bookshelf_db::{DbPool, TableDef};

use crate::module::{InitCtx, Module};

/// Module registry for managing module lifecycle
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module; modules are initialized and started in
    /// registration order and stopped in reverse
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Initialize modules
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start modules
    pub async fn start_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect table definitions from all modules, in registration order
    pub fn collect_schema(&self) -> Vec<TableDef> {
        self.modules
            .iter()
            .flat_map(|module| module.schema())
            .collect()
    }

    /// Create every contributed table that does not exist yet.
    ///
    /// Safe to call on every startup.
    pub fn ensure_schema(&self, db: &DbPool) -> anyhow::Result<usize> {
        let defs = self.collect_schema();
        let conn = db
            .get()
            .with_context(|| "failed to check out a connection for schema setup")?;

        let executed = bookshelf_db::ensure_schema(&conn, &defs)
            .with_context(|| "failed to ensure database schema")?;

        tracing::info!(tables = executed, "database schema ready");
        Ok(executed)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
