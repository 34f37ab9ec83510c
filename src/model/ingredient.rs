//! Best-effort parsing of free-text ingredient lines.
//!
//! A line like `"1 1/2 cups (12 ounces) of flour"` becomes a count, a short
//! unit, and an ingredient name. Parsing never fails: anything that cannot be
//! recognized is left in the ingredient name, and the result carries a
//! [`ParseQuality`] telling callers whether it parsed cleanly.

use serde::{Deserialize, Serialize};

/// Long unit spellings and the short form they normalize to
const UNIT_SYNONYMS: [(&str, &str); 22] = [
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("cups", "cup"),
    ("pounds", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("grams", "g"),
    ("gram", "g"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kgs", "kg"),
    ("milliliters", "ml"),
    ("milliliter", "ml"),
    ("millilitres", "ml"),
    ("millilitre", "ml"),
    ("mls", "ml"),
];

/// Every unit a parsed ingredient can carry
pub const UNITS: [&str; 8] = ["tbsp", "tsp", "oz", "cup", "pound", "kg", "g", "ml"];

const UNICODE_FRACTIONS: [(char, &str); 15] = [
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Dropped when they lead the ingredient name ("cup of flour")
const FILLER_WORDS: [&str; 1] = ["of"];

/// A normalized ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// `None` when the line had no leading quantity
    pub count: Option<f64>,
    /// Short unit form, empty when no unit was recognized
    pub unit: String,
    pub ingredient: String,
}

impl Ingredient {
    /// The count to use where a number is required; a missing count means one
    pub fn quantity(&self) -> f64 {
        self.count.unwrap_or(1.0)
    }
}

/// How much of a line the parser understood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseQuality {
    /// A quantity was found and an ingredient name remains
    Clean,
    /// The count or the name fell back to a default
    Defaulted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub ingredient: Ingredient,
    pub quality: ParseQuality,
}

/// Parse every line, in order
pub fn parse_ingredients<I, S>(lines: I) -> Vec<ParsedIngredient>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| parse_ingredient(line.as_ref()))
        .collect()
}

/// Parse a single free-text ingredient line
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let lowered = line.to_lowercase();
    let without_asides = strip_parentheticals(&lowered);
    let normalized = replace_unicode_fractions(&without_asides);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let (mut count, mut idx) = leading_quantity(&tokens);

    let mut unit = String::new();
    if count.is_none() {
        // "250g", "2lbs"
        if let Some((value, short)) = tokens.first().and_then(|token| attached_unit(token)) {
            count = Some(value);
            unit = short.to_string();
            idx = 1;
        }
    }
    if unit.is_empty() {
        if let Some(short) = tokens.get(idx).and_then(|token| normalize_unit(token)) {
            unit = short.to_string();
            idx += 1;
        }
    }

    let rest = &tokens[idx..];
    let skip = rest
        .iter()
        .take_while(|token| FILLER_WORDS.contains(*token))
        .count();
    let ingredient = rest[skip..].join(" ");

    let quality = if count.is_some() && !ingredient.is_empty() {
        ParseQuality::Clean
    } else {
        ParseQuality::Defaulted
    };

    ParsedIngredient {
        ingredient: Ingredient {
            count,
            unit,
            ingredient,
        },
        quality,
    }
}

/// Reads a leading number, or an integer followed by a proper fraction.
/// Returns the value and the index of the first token after it.
fn leading_quantity(tokens: &[&str]) -> (Option<f64>, usize) {
    let Some(first) = tokens.first().and_then(|token| parse_number(token)) else {
        return (None, 0);
    };

    if first.fract() == 0.0 {
        if let Some(second) = tokens.get(1) {
            if second.contains('/') {
                if let Some(fraction) = parse_simple(second).filter(|value| *value < 1.0) {
                    return (Some(first + fraction), 2);
                }
            }
        }
    }

    (Some(first), 1)
}

/// `1`, `1.5`, `.5`, `1/2`, `1-1/2` (mixed) or `2-3` (range, lower bound)
fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim_end_matches(',');
    match token.split_once('-') {
        Some((whole, part)) => {
            let whole = parse_simple(whole)?;
            let part_value = parse_simple(part)?;
            if part.contains('/') {
                Some(whole + part_value)
            } else {
                Some(whole)
            }
        }
        None => parse_simple(token),
    }
}

fn parse_simple(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator)?;
            let denominator = parse_decimal(denominator)?;
            if denominator == 0.0 {
                None
            } else {
                Some(numerator / denominator)
            }
        }
        None => parse_decimal(token),
    }
}

fn parse_decimal(token: &str) -> Option<f64> {
    let well_formed = token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.');
    if well_formed {
        token.parse().ok()
    } else {
        None
    }
}

/// A number with a known unit written straight after it
fn attached_unit(token: &str) -> Option<(f64, &'static str)> {
    let split = token.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))?;
    let (number, unit) = token.split_at(split);
    Some((parse_simple(number)?, normalize_unit(unit)?))
}

fn normalize_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches([',', '.', ';', ':']);
    if let Some(short) = UNITS.iter().copied().find(|unit| *unit == token) {
        return Some(short);
    }
    UNIT_SYNONYMS
        .iter()
        .find(|(long, _)| *long == token)
        .map(|(_, short)| *short)
}

/// Removes `(...)` asides together with the spaces around them
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        out.push_str(rest[..open].trim_end_matches(' '));
        out.push(' ');
        rest = rest[open + close + 1..].trim_start_matches(' ');
    }
    out.push_str(rest);
    out
}

fn replace_unicode_fractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\u{2044}' {
            out.push('/');
        } else if let Some((_, fraction)) = UNICODE_FRACTIONS.iter().find(|(f, _)| *f == c) {
            out.push(' ');
            out.push_str(fraction);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
