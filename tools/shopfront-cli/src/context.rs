//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shopfront_cache::Cache;
use shopfront_commerce::cart::CartStore;
use shopfront_commerce::catalog::{CatalogStore, Product, StaticCatalog};
use shopfront_commerce::ids::ProductId;
use shopfront_commerce::session::Session;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::{Output, OutputNotifier};

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/products.json");

const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// Global options shared by every command.
pub struct GlobalOptions<'a> {
    pub config: Option<&'a str>,
    pub data_dir: Option<&'a str>,
    pub catalog: Option<&'a str>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory the cart cache lives in.
    pub data_dir: PathBuf,
    /// Where the config was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
}

impl Context {
    /// Load context from flags and the nearest config file.
    pub fn load(options: GlobalOptions<'_>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match options.config {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            None => Self::find_config(&cwd),
        };

        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        // Paths in the config file are relative to the file itself.
        let base = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        let data_dir = match (options.data_dir, &config.data_dir) {
            (Some(flag), _) => resolve(&cwd, Path::new(flag)),
            (None, Some(dir)) => resolve(&base, dir),
            (None, None) => base.join(".shopfront"),
        };

        let catalog_path = match (options.catalog, &config.catalog) {
            (Some(flag), _) => Some(resolve(&cwd, Path::new(flag))),
            (None, Some(path)) => Some(resolve(&base, path)),
            (None, None) => None,
        };

        debug!(
            config = ?config_path,
            data_dir = %data_dir.display(),
            catalog = ?catalog_path,
            "context loaded"
        );

        Ok(Self {
            config,
            output,
            cwd,
            data_dir,
            config_path,
            catalog_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load the product catalog.
    pub fn catalog(&self) -> Result<StaticCatalog> {
        let currency = self.config.store.currency;
        match &self.catalog_path {
            Some(path) => Ok(StaticCatalog::load(path, currency)?),
            None => StaticCatalog::from_json(BUNDLED_CATALOG, currency)
                .context("Bundled catalog is malformed"),
        }
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Result<Product> {
        Ok(self.catalog()?.get_product(&ProductId::new(id))?)
    }

    /// Open the persisted cart.
    pub fn open_store(&self) -> Result<CartStore> {
        let cache = Cache::open(&self.data_dir).with_context(|| {
            format!("Failed to open cart data in {}", self.data_dir.display())
        })?;
        let notifier = Arc::new(OutputNotifier::new(self.output.clone()));
        Ok(CartStore::open(cache, self.config.store.clone(), notifier)?)
    }

    /// The current shopper.
    pub fn session(&self) -> Session {
        self.config.session()
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, Path::new(path))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
