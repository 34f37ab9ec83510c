use crate::model::{Like, ListItem, Recipe, Search};
use crate::view::{Region, View};

/// Titles longer than this are shortened in result and like lists
const TITLE_LIMIT: usize = 17;

/// Denominators a count may be shown with, smallest first
const DENOMINATORS: [u32; 4] = [2, 3, 4, 8];

/// Renders everything as plain lines on stdout
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        TerminalView
    }
}

/// Keep whole words while the running letter count stays within the limit
pub fn limit_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LIMIT {
        return title.to_string();
    }

    let mut kept = Vec::new();
    let mut total = 0;
    for word in title.split(' ') {
        if total + word.chars().count() <= TITLE_LIMIT {
            kept.push(word);
        }
        total += word.chars().count();
    }
    format!("{} ...", kept.join(" "))
}

/// `1.5` → `1 1/2`, `0.333` → `1/3`, missing → `?`
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count else {
        return "?".to_string();
    };

    let whole = count.trunc();
    let fraction = count - whole;
    if fraction.abs() < 1e-9 {
        return format!("{}", whole as i64);
    }

    for denominator in DENOMINATORS {
        let numerator = (fraction * f64::from(denominator)).round();
        if numerator > 0.0
            && numerator < f64::from(denominator)
            && (fraction - numerator / f64::from(denominator)).abs() < 0.01
        {
            return if whole == 0.0 {
                format!("{}/{}", numerator, denominator)
            } else {
                format!("{} {}/{}", whole, numerator, denominator)
            };
        }
    }

    let decimal = format!("{:.2}", count);
    decimal.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_ingredient(count: Option<f64>, unit: &str, ingredient: &str) -> String {
    if unit.is_empty() {
        format!("{} {}", format_count(count), ingredient)
    } else {
        format!("{} {} {}", format_count(count), unit, ingredient)
    }
}

fn region_name(region: Region) -> &'static str {
    match region {
        Region::SearchResults => "results",
        Region::Recipe => "recipe",
    }
}

impl View for TerminalView {
    fn render_loader(&self, region: Region) {
        println!("... loading {}", region_name(region));
    }

    fn clear_loader(&self, _region: Region) {}

    fn alert(&self, message: &str) {
        eprintln!("!! {}", message);
    }

    fn clear_input(&self) {}

    fn clear_results(&self) {}

    fn render_results(&self, search: &Search, page: usize) {
        let results = search.page(page);
        if results.is_empty() {
            println!("No results for '{}'", search.query);
            return;
        }
        println!(
            "Results for '{}' (page {}/{})",
            search.query,
            page + 1,
            search.page_count()
        );
        for summary in results {
            println!(
                "  [{}] {} ({})",
                summary.id,
                limit_title(&summary.title),
                summary.publisher
            );
        }
        let pagination = search.pagination(page);
        if let Some(prev) = pagination.prev {
            println!("  < page {}", prev + 1);
        }
        if let Some(next) = pagination.next {
            println!("  > page {}", next + 1);
        }
    }

    fn highlight_selected(&self, _id: &str) {}

    fn clear_recipe(&self) {}

    fn render_recipe(&self, recipe: &Recipe, liked: bool) {
        let heart = if liked { "♥" } else { "♡" };
        println!("{} {} by {}", heart, recipe.title, recipe.author);
        println!(
            "   {} minutes, {} servings",
            recipe.cooking_time, recipe.servings
        );
        for ingredient in &recipe.ingredients {
            println!(
                "   - {}",
                format_ingredient(ingredient.count, &ingredient.unit, &ingredient.ingredient)
            );
        }
        println!("   Directions: {}", recipe.url);
    }

    fn update_servings_ingredients(&self, recipe: &Recipe) {
        println!("   {} servings", recipe.servings);
        for ingredient in &recipe.ingredients {
            println!(
                "   - {}",
                format_ingredient(ingredient.count, &ingredient.unit, &ingredient.ingredient)
            );
        }
    }

    fn render_item(&self, item: &ListItem) {
        println!(
            "  + [{}] {}",
            item.id,
            format_ingredient(Some(item.count), &item.unit, &item.ingredient)
        );
    }

    fn delete_item(&self, id: &str) {
        println!("  - removed {}", id);
    }

    fn toggle_like_btn(&self, liked: bool) {
        println!("{}", if liked { "♥ liked" } else { "♡ unliked" });
    }

    fn render_like(&self, like: &Like) {
        println!("  ♥ [{}] {} ({})", like.id, limit_title(&like.title), like.author);
    }

    fn delete_like(&self, id: &str) {
        println!("  ♡ removed {}", id);
    }

    fn toggle_like_menu(&self, num_likes: usize) {
        if num_likes > 0 {
            println!("{} liked recipes", num_likes);
        }
    }
}
