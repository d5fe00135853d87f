//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::catalog::Menu;
use storefront_commerce::config::StorefrontConfig;
use storefront_commerce::mirror::CacheMirror;
use tracing::debug;

use crate::output::Output;

/// File names searched for when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            let config = StorefrontConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            (config, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        debug!(config = ?config_path, "configuration loaded");
        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let path = current.join(name);
                if path.exists() {
                    match StorefrontConfig::load(&path) {
                        Ok(config) => return Some((config, path)),
                        Err(e) => debug!(path = %path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// The menu in effect.
    pub fn menu(&self) -> Menu {
        self.config.menu()
    }

    /// Open the cache the cart is mirrored into.
    pub fn mirror_cache(&self) -> Result<Cache> {
        match &self.config.mirror.dir {
            Some(dir) => {
                let dir = resolve(&self.cwd, dir);
                Cache::open(&dir)
                    .with_context(|| format!("Failed to open mirror directory {}", dir.display()))
            }
            None => Ok(Cache::open_default()),
        }
    }

    /// The configured mirror, or `None` when mirroring is off.
    pub fn mirror(&self) -> Result<Option<CacheMirror>> {
        if !self.config.mirror.enabled {
            return Ok(None);
        }
        let cache = self.mirror_cache()?;
        Ok(Some(CacheMirror::new(cache, self.config.mirror.key.clone())))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
