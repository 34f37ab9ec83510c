use crate::api::{RecipePayload, RecipeSource};
use crate::error::FetchError;
use crate::model::ingredient::{parse_ingredients, Ingredient, ParseQuality};
use log::debug;
use serde::Serialize;
use std::str::FromStr;

/// Servings assumed when the source does not report any
pub const DEFAULT_SERVINGS: u32 = 4;

/// Which way to move the serving count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsDirection {
    Inc,
    Dec,
}

impl FromStr for ServingsDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inc" | "+" => Ok(ServingsDirection::Inc),
            "dec" | "-" => Ok(ServingsDirection::Dec),
            other => Err(format!("unknown servings direction '{}'", other)),
        }
    }
}

/// A fetched recipe with parsed, scalable ingredients
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    /// Estimated minutes, see [`calc_time`]
    pub cooking_time: u32,
    /// Ingredient lines as the source wrote them
    pub source_lines: Vec<String>,
    #[serde(skip)]
    per_serving: Vec<Option<f64>>,
    #[serde(skip)]
    quality: Vec<ParseQuality>,
}

impl Recipe {
    /// Fetch a recipe by id and parse it
    pub async fn fetch(source: &dyn RecipeSource, id: &str) -> Result<Self, FetchError> {
        let payload = source.recipe(id).await?;
        Ok(Self::from_payload(payload))
    }

    /// Parse ingredients and derive servings and cooking time from raw API data
    pub fn from_payload(payload: RecipePayload) -> Self {
        let servings = payload.servings.unwrap_or(DEFAULT_SERVINGS).max(1);
        let parsed = parse_ingredients(&payload.ingredients);

        let mut ingredients = Vec::with_capacity(parsed.len());
        let mut per_serving = Vec::with_capacity(parsed.len());
        let mut quality = Vec::with_capacity(parsed.len());
        for item in parsed {
            per_serving.push(item.ingredient.count.map(|c| c / f64::from(servings)));
            quality.push(item.quality);
            ingredients.push(item.ingredient);
        }

        let defaulted = quality
            .iter()
            .filter(|q| **q == ParseQuality::Defaulted)
            .count();
        debug!(
            "Parsed {} ingredients for recipe '{}' ({} defaulted)",
            ingredients.len(),
            payload.id,
            defaulted
        );

        Recipe {
            cooking_time: calc_time(ingredients.len()),
            id: payload.id,
            title: payload.title,
            author: payload.publisher,
            img: payload.image_url,
            url: payload.source_url,
            ingredients,
            servings,
            source_lines: payload.ingredients,
            per_serving,
            quality,
        }
    }

    /// Move servings one step and rescale every ingredient count.
    ///
    /// Decreasing at one serving is a no-op. Returns whether servings changed.
    pub fn update_servings(&mut self, direction: ServingsDirection) -> bool {
        let new_servings = match direction {
            ServingsDirection::Inc => self.servings.saturating_add(1),
            ServingsDirection::Dec if self.servings > 1 => self.servings - 1,
            ServingsDirection::Dec => return false,
        };

        for (ingredient, ratio) in self.ingredients.iter_mut().zip(&self.per_serving) {
            if let Some(ratio) = ratio {
                ingredient.count = Some(round_significant(ratio * f64::from(new_servings), 3));
            }
        }
        self.servings = new_servings;
        true
    }

    /// Ingredients the parser could only partially understand
    pub fn defaulted_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients
            .iter()
            .zip(&self.quality)
            .filter(|(_, quality)| **quality == ParseQuality::Defaulted)
            .map(|(ingredient, _)| ingredient)
    }
}

/// Fifteen minutes for every three ingredients
pub fn calc_time(ingredient_count: usize) -> u32 {
    let periods = (ingredient_count as f64 / 3.0).round() as u32;
    periods * 15
}

/// Round to `digits` significant figures
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits - 1 - magnitude;
    if shift >= 0 {
        let factor = 10f64.powi(shift);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}
