#![allow(dead_code)]

use async_trait::async_trait;
use forkify::model::{Like, ListItem, Recipe, Search};
use forkify::{FetchError, RecipePayload, RecipeSource, RecipeSummary, Region, View};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A render call, as seen by [`RecordingView`]
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loader(Region),
    ClearLoader(Region),
    Alert(String),
    ClearInput,
    ClearResults,
    Results { query: String, page: usize, ids: Vec<String> },
    Highlight(String),
    ClearRecipe,
    Recipe { id: String, liked: bool },
    Servings { servings: u32, counts: Vec<Option<f64>> },
    Item(ListItem),
    DeleteItem(String),
    LikeBtn(bool),
    Like(String),
    DeleteLike(String),
    LikeMenu(usize),
}

/// Records every render call; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl View for RecordingView {
    fn render_loader(&self, region: Region) {
        self.push(ViewEvent::Loader(region));
    }

    fn clear_loader(&self, region: Region) {
        self.push(ViewEvent::ClearLoader(region));
    }

    fn alert(&self, message: &str) {
        self.push(ViewEvent::Alert(message.to_string()));
    }

    fn clear_input(&self) {
        self.push(ViewEvent::ClearInput);
    }

    fn clear_results(&self) {
        self.push(ViewEvent::ClearResults);
    }

    fn render_results(&self, search: &Search, page: usize) {
        self.push(ViewEvent::Results {
            query: search.query.clone(),
            page,
            ids: search.page(page).iter().map(|r| r.id.clone()).collect(),
        });
    }

    fn highlight_selected(&self, id: &str) {
        self.push(ViewEvent::Highlight(id.to_string()));
    }

    fn clear_recipe(&self) {
        self.push(ViewEvent::ClearRecipe);
    }

    fn render_recipe(&self, recipe: &Recipe, liked: bool) {
        self.push(ViewEvent::Recipe {
            id: recipe.id.clone(),
            liked,
        });
    }

    fn update_servings_ingredients(&self, recipe: &Recipe) {
        self.push(ViewEvent::Servings {
            servings: recipe.servings,
            counts: recipe.ingredients.iter().map(|i| i.count).collect(),
        });
    }

    fn render_item(&self, item: &ListItem) {
        self.push(ViewEvent::Item(item.clone()));
    }

    fn delete_item(&self, id: &str) {
        self.push(ViewEvent::DeleteItem(id.to_string()));
    }

    fn toggle_like_btn(&self, liked: bool) {
        self.push(ViewEvent::LikeBtn(liked));
    }

    fn render_like(&self, like: &Like) {
        self.push(ViewEvent::Like(like.id.clone()));
    }

    fn delete_like(&self, id: &str) {
        self.push(ViewEvent::DeleteLike(id.to_string()));
    }

    fn toggle_like_menu(&self, num_likes: usize) {
        self.push(ViewEvent::LikeMenu(num_likes));
    }
}

/// In-memory recipe source with optional per-key delays
#[derive(Debug, Clone, Default)]
pub struct StubSource {
    searches: HashMap<String, Vec<RecipeSummary>>,
    recipes: HashMap<String, RecipePayload>,
    delays: HashMap<String, Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn with_search(mut self, query: &str, results: Vec<RecipeSummary>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_recipe(mut self, payload: RecipePayload) -> Self {
        self.recipes.insert(payload.id.clone(), payload);
        self
    }

    /// Delay answers for this query or recipe id
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    /// Number of fetches made through any clone of this source
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn wait(&self, key: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl RecipeSource for StubSource {
    fn source_name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        self.wait(query).await;
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| FetchError::Api(format!("no results for '{}'", query)))
    }

    async fn recipe(&self, id: &str) -> Result<RecipePayload, FetchError> {
        self.wait(id).await;
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::Api(format!("unknown recipe '{}'", id)))
    }
}

pub fn summaries(prefix: &str, n: usize) -> Vec<RecipeSummary> {
    (0..n)
        .map(|i| RecipeSummary {
            id: format!("{}{}", prefix, i),
            title: format!("Recipe {} {}", prefix, i),
            publisher: "Closet Cooking".to_string(),
            image_url: format!("http://example.com/{}{}.jpg", prefix, i),
            source_url: format!("http://example.com/{}{}", prefix, i),
        })
        .collect()
}

pub fn payload(id: &str, servings: Option<u32>, lines: &[&str]) -> RecipePayload {
    RecipePayload {
        id: id.to_string(),
        title: format!("Recipe {}", id),
        publisher: "The Pioneer Woman".to_string(),
        image_url: format!("http://example.com/{}.jpg", id),
        source_url: format!("http://example.com/{}", id),
        ingredients: lines.iter().map(|l| l.to_string()).collect(),
        servings,
    }
}
