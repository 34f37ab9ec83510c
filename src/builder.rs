use crate::api::{ForkifyClient, RecipeSource};
use crate::config::AppConfig;
use crate::controller::App;
use crate::error::ForkifyError;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::view::{TerminalView, View};
use log::debug;

/// Builder for configuring an [`App`]
///
/// Anything not set explicitly is derived from [`AppConfig`]: the recipe
/// source is a [`ForkifyClient`] against the configured API and likes are
/// stored in the configured storage directory.
#[derive(Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
    source: Option<Box<dyn RecipeSource>>,
    view: Option<Box<dyn View>>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl AppBuilder {
    /// Use this configuration instead of loading `forkify.toml` and the environment
    ///
    /// # Example
    /// ```
    /// use forkify::{App, AppConfig};
    ///
    /// let builder = App::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fetch recipes from a custom source
    pub fn source(mut self, source: impl RecipeSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Send render calls to a custom view (defaults to [`TerminalView`])
    pub fn view(mut self, view: impl View + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    /// Persist likes in a custom store
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Keep likes in memory only; nothing survives the process
    ///
    /// # Example
    /// ```
    /// use forkify::{App, AppConfig};
    ///
    /// let app = App::builder()
    ///     .config(AppConfig::default())
    ///     .ephemeral()
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn ephemeral(self) -> Self {
        self.store(MemoryStore::new())
    }

    /// Build the [`App`]
    ///
    /// # Errors
    /// Returns `ForkifyError` if:
    /// - configuration cannot be loaded
    /// - the HTTP client cannot be created
    /// - no storage directory can be determined
    pub fn build(self) -> Result<App, ForkifyError> {
        let config = match self.config {
            Some(config) => config,
            None if self.source.is_none() || self.store.is_none() => AppConfig::load()?,
            None => AppConfig::default(),
        };

        let source: Box<dyn RecipeSource> = match self.source {
            Some(source) => source,
            None => {
                let client = ForkifyClient::new(&config.api)?;
                debug!("Using recipe API at {}", client.base_url());
                Box::new(client)
            }
        };

        let store: Box<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => {
                let dir = config.storage.resolved_dir().ok_or_else(|| {
                    ForkifyError::BuilderError(
                        "No storage directory configured and no data directory found".to_string(),
                    )
                })?;
                let store = FileStore::new(dir);
                debug!("Storing likes in {}", store.dir().display());
                Box::new(store)
            }
        };

        let view = self.view.unwrap_or_else(|| Box::new(TerminalView::new()));

        Ok(App::new(source, view, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_build_with_config() {
        let config = AppConfig {
            storage: StorageConfig {
                dir: Some(std::env::temp_dir().join("forkify-builder-test")),
            },
            ..AppConfig::default()
        };
        let app = AppBuilder::default().config(config).build();
        assert!(app.is_ok());
    }

    #[test]
    fn test_build_ephemeral_starts_empty() {
        let app = AppBuilder::default()
            .config(AppConfig::default())
            .ephemeral()
            .build()
            .unwrap();
        assert_eq!(app.with_state(|state| state.likes.num_likes()), 0);
        assert!(app.with_state(|state| state.search.is_none()));
    }
}
