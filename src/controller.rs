//! Controllers: user events in, model updates and render calls out.
//!
//! [`App`] owns every piece of application state. Controller methods take
//! `&self`, so invocations may overlap at their await points; each kind of
//! fetch carries a [`RequestToken`](crate::sequence::RequestToken) and a result
//! that resolves after a newer request started is dropped.

use crate::api::RecipeSource;
use crate::error::ForkifyError;
use crate::model::{Likes, Recipe, Search, ServingsDirection, ShoppingList};
use crate::sequence::RequestSequence;
use crate::storage::KeyValueStore;
use crate::view::{Region, View};
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

const SEARCH_ERROR: &str = "Something wrong with the search...";
const RECIPE_ERROR: &str = "Error processing recipe!";
const LIKES_ERROR: &str = "Could not save your liked recipes.";
const RESTORE_ERROR: &str = "Could not restore your liked recipes.";

/// Everything the controllers read and write
#[derive(Debug)]
pub struct AppState {
    /// Latest successful search
    pub search: Option<Search>,
    /// Recipe currently on screen
    pub recipe: Option<Recipe>,
    pub list: ShoppingList,
    pub likes: Likes,
}

/// What a controller invocation ended up doing
#[derive(Debug)]
pub enum Outcome {
    /// State changed and the view was updated
    Rendered,
    /// Nothing to act on (blank input, no current recipe, unknown id)
    Ignored,
    /// A newer request of the same kind started first; the result was dropped
    Stale,
    /// The error was shown to the user; previous state is untouched
    Failed(ForkifyError),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Outcome::Rendered)
    }
}

pub struct App {
    source: Box<dyn RecipeSource>,
    view: Box<dyn View>,
    state: Mutex<AppState>,
    searches: RequestSequence,
    recipes: RequestSequence,
}

impl App {
    pub fn new(
        source: Box<dyn RecipeSource>,
        view: Box<dyn View>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        App {
            source,
            view,
            state: Mutex::new(AppState {
                search: None,
                recipe: None,
                list: ShoppingList::new(),
                likes: Likes::with_store(store),
            }),
            searches: RequestSequence::new(),
            recipes: RequestSequence::new(),
        }
    }

    /// Create a new builder for an [`App`]
    pub fn builder() -> crate::builder::AppBuilder {
        crate::builder::AppBuilder::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read state without going through a controller
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    /// Search for `query` and show the first page of results
    pub async fn control_search(&self, query: &str) -> Outcome {
        let query = query.trim();
        if query.is_empty() {
            return Outcome::Ignored;
        }

        let token = self.searches.begin();
        self.view.clear_input();
        self.view.clear_results();
        self.view.render_loader(Region::SearchResults);

        let result = Search::fetch(self.source.as_ref(), query).await;

        let mut state = self.lock();
        if !self.searches.is_current(token) {
            debug!(
                "Dropping results for '{}' from stale request {}",
                query,
                token.value()
            );
            return Outcome::Stale;
        }
        self.view.clear_loader(Region::SearchResults);

        match result {
            Ok(search) => {
                info!(
                    "Found {} recipes for '{}' on {}",
                    search.results.len(),
                    query,
                    self.source.source_name()
                );
                self.view.render_results(&search, 0);
                state.search = Some(search);
                Outcome::Rendered
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                self.view.alert(SEARCH_ERROR);
                Outcome::Failed(e.into())
            }
        }
    }

    /// Show another page of the retained results without fetching again
    pub fn go_to_page(&self, page: usize) -> Outcome {
        let state = self.lock();
        let Some(search) = state.search.as_ref() else {
            return Outcome::Ignored;
        };
        self.view.clear_results();
        self.view.render_results(search, page);
        Outcome::Rendered
    }

    /// Load the recipe with `id` and show it
    pub async fn control_recipe(&self, id: &str) -> Outcome {
        let id = id.trim();
        if id.is_empty() {
            return Outcome::Ignored;
        }

        let token = self.recipes.begin();
        self.view.clear_recipe();
        self.view.render_loader(Region::Recipe);
        let has_search = self.lock().search.is_some();
        if has_search {
            self.view.highlight_selected(id);
        }

        let result = Recipe::fetch(self.source.as_ref(), id).await;

        let mut state = self.lock();
        if !self.recipes.is_current(token) {
            debug!(
                "Dropping recipe '{}' from stale request {}",
                id,
                token.value()
            );
            return Outcome::Stale;
        }
        self.view.clear_loader(Region::Recipe);

        match result {
            Ok(recipe) => {
                debug!(
                    "Loaded recipe '{}' from {}",
                    recipe.id,
                    self.source.source_name()
                );
                let liked = state.likes.is_liked(&recipe.id);
                self.view.render_recipe(&recipe, liked);
                state.recipe = Some(recipe);
                Outcome::Rendered
            }
            Err(e) => {
                warn!("Loading recipe '{}' failed: {}", id, e);
                self.view.alert(RECIPE_ERROR);
                Outcome::Failed(e.into())
            }
        }
    }

    /// Scale the current recipe one serving up or down
    pub fn control_servings(&self, direction: ServingsDirection) -> Outcome {
        let mut state = self.lock();
        let Some(recipe) = state.recipe.as_mut() else {
            return Outcome::Ignored;
        };
        if !recipe.update_servings(direction) {
            return Outcome::Ignored;
        }
        self.view.update_servings_ingredients(recipe);
        Outcome::Rendered
    }

    /// Add every ingredient of the current recipe to the shopping list
    pub fn control_list(&self) -> Outcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(recipe) = state.recipe.as_ref() else {
            return Outcome::Ignored;
        };

        for ingredient in &recipe.ingredients {
            let item = state.list.add_item(
                ingredient.quantity(),
                ingredient.unit.clone(),
                ingredient.ingredient.clone(),
            );
            self.view.render_item(item);
        }
        debug!(
            "Shopping list has {} items after adding '{}'",
            state.list.len(),
            recipe.id
        );
        Outcome::Rendered
    }

    pub fn delete_list_item(&self, id: &str) -> Outcome {
        let mut state = self.lock();
        match state.list.delete_item(id) {
            Some(_) => {
                self.view.delete_item(id);
                Outcome::Rendered
            }
            None => Outcome::Ignored,
        }
    }

    pub fn update_list_count(&self, id: &str, count: f64) -> Outcome {
        if self.lock().list.update_count(id, count) {
            Outcome::Rendered
        } else {
            Outcome::Ignored
        }
    }

    /// Like the current recipe, or unlike it when it is already liked
    pub fn control_like(&self) -> Outcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(recipe) = state.recipe.as_ref() else {
            return Outcome::Ignored;
        };

        let persisted = if !state.likes.is_liked(&recipe.id) {
            let persisted = state
                .likes
                .add_like(
                    recipe.id.clone(),
                    recipe.title.clone(),
                    recipe.author.clone(),
                    recipe.img.clone(),
                )
                .map(|_| ());
            self.view.toggle_like_btn(true);
            if let Some(like) = state.likes.likes().last() {
                self.view.render_like(like);
            }
            persisted
        } else {
            let persisted = state.likes.delete_like(&recipe.id).map(|_| ());
            self.view.toggle_like_btn(false);
            self.view.delete_like(&recipe.id);
            persisted
        };
        self.view.toggle_like_menu(state.likes.num_likes());

        match persisted {
            Ok(()) => Outcome::Rendered,
            Err(e) => {
                warn!("Failed to persist likes: {}", e);
                self.view.alert(LIKES_ERROR);
                Outcome::Failed(e.into())
            }
        }
    }

    /// Load liked recipes from storage and show them. Run once at start.
    pub fn restore_likes(&self) -> Outcome {
        let mut state = self.lock();
        let restored = state.likes.read_storage();
        self.view.toggle_like_menu(state.likes.num_likes());

        match restored {
            Ok(_) => {
                for like in state.likes.likes() {
                    self.view.render_like(like);
                }
                Outcome::Rendered
            }
            Err(e) => {
                warn!("Failed to restore likes: {}", e);
                self.view.alert(RESTORE_ERROR);
                Outcome::Failed(e.into())
            }
        }
    }
}
