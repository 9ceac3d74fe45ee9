use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ingredients::prompt::NO_INGREDIENTS_PHRASES;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-–—•*·▫️]+|\d+[.)])\s*").expect("valid list marker regex"));

fn clean_item(raw: &str) -> String {
    let item = LIST_MARKER.replace(raw.trim(), "");
    item.trim().trim_end_matches('.').trim().to_string()
}

/// Splits a free-text list into ingredient names.
///
/// Commas win when present; otherwise every line is an item with its bullet or number
/// stripped. Empty items are dropped and duplicates (ignoring case) keep their first
/// spelling.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    let items: Vec<String> = if text.contains(',') {
        text.split(',').map(clean_item).collect()
    } else {
        text.lines().map(clean_item).collect()
    };

    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if item.is_empty() {
            continue;
        }
        let lowered = item.to_lowercase();
        if unique.iter().any(|seen| seen.to_lowercase() == lowered) {
            continue;
        }
        unique.push(item);
    }
    unique
}

/// True when a vision answer carries nothing usable.
pub fn is_empty_response(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    lowered.is_empty()
        || NO_INGREDIENTS_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase))
}
