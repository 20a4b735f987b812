//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use store_core::catalog::CatalogStore;
use store_core::config::StoreConfig;
use store_core::CartController;
use tracing::debug;

use crate::output::Output;

/// Config file names searched for, in order, from the working directory up.
const CONFIG_NAMES: [&str; 3] = ["store.toml", ".store.toml", "store.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Effective store configuration.
    pub config: StoreConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file, applying a seed override.
    pub fn load(config_path: Option<&str>, seed: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            let config = StoreConfig::load(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;
            (anchor_seed_path(config, &path), Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StoreConfig::default(), None),
            }
        };

        if let Some(seed) = seed {
            config.seed_path = Some(resolve_path(&cwd, seed));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StoreConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StoreConfig::load(&config_path) {
                        return Some((anchor_seed_path(config, &config_path), config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the catalog named by the config.
    pub fn catalog(&self) -> Result<Arc<CatalogStore>> {
        debug!(seed = ?self.config.seed_path, currency = %self.config.currency, "loading catalog");
        let catalog = CatalogStore::from_config(&self.config).with_context(|| {
            match &self.config.seed_path {
                Some(path) => format!("Failed to load seed file: {}", path.display()),
                None => "Failed to load bundled catalog".to_string(),
            }
        })?;
        Ok(Arc::new(catalog))
    }

    /// Build a controller over the configured catalog.
    pub fn controller(&self) -> Result<CartController> {
        Ok(CartController::new(self.catalog()?, &self.config))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }
}

/// Make a relative seed path in a config file relative to that file's directory.
fn anchor_seed_path(mut config: StoreConfig, config_file: &Path) -> StoreConfig {
    if let (Some(seed), Some(dir)) = (&config.seed_path, config_file.parent()) {
        if seed.is_relative() {
            config.seed_path = Some(dir.join(seed));
        }
    }
    config
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
