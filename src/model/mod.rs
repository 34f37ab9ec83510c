pub mod ingredient;
pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;

pub use ingredient::{parse_ingredient, parse_ingredients, Ingredient, ParseQuality, ParsedIngredient};
pub use likes::{Like, Likes, LIKES_KEY};
pub use list::{ListItem, ShoppingList};
pub use recipe::{Recipe, ServingsDirection};
pub use search::{Pagination, Search, RESULTS_PER_PAGE};
