mod terminal;

pub use terminal::{format_count, limit_title, TerminalView};

use crate::model::{Like, ListItem, Recipe, Search};

/// Screen area that can show a loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    SearchResults,
    Recipe,
}

/// One-way render calls made by the controllers.
///
/// Nothing a view returns feeds back into application state.
pub trait View: Send + Sync {
    fn render_loader(&self, region: Region);
    fn clear_loader(&self, region: Region);
    /// Blocking, user-facing error message
    fn alert(&self, message: &str);

    fn clear_input(&self);
    fn clear_results(&self);
    /// Show the 0-based `page` of `search`
    fn render_results(&self, search: &Search, page: usize);
    fn highlight_selected(&self, id: &str);

    fn clear_recipe(&self);
    fn render_recipe(&self, recipe: &Recipe, liked: bool);
    fn update_servings_ingredients(&self, recipe: &Recipe);

    fn render_item(&self, item: &ListItem);
    fn delete_item(&self, id: &str);

    fn toggle_like_btn(&self, liked: bool);
    fn render_like(&self, like: &Like);
    fn delete_like(&self, id: &str);
    fn toggle_like_menu(&self, num_likes: usize);
}
