pub mod api;
pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod sequence;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use api::{ForkifyClient, RecipePayload, RecipeSource, RecipeSummary};
pub use builder::AppBuilder;
pub use config::AppConfig;
pub use controller::{App, AppState, Outcome};
pub use error::{FetchError, ForkifyError, StorageError};
pub use model::{
    Ingredient, Like, Likes, ListItem, ParseQuality, Recipe, Search, ServingsDirection,
    ShoppingList,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{Region, TerminalView, View};

/// Search the configured API for `query`
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let search = forkify::search_recipes("pizza").await?;
/// println!("{} results", search.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str) -> Result<Search, ForkifyError> {
    let config = AppConfig::load()?;
    let client = ForkifyClient::new(&config.api)?;
    Ok(Search::fetch(&client, query).await?)
}

/// Fetch and parse one recipe from the configured API
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = forkify::fetch_recipe("47746").await?;
/// println!("{} serves {}", recipe.title, recipe.servings);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipe(id: &str) -> Result<Recipe, ForkifyError> {
    let config = AppConfig::load()?;
    let client = ForkifyClient::new(&config.api)?;
    Ok(Recipe::fetch(&client, id).await?)
}
