//! Equipment vocabulary.
//!
//! The catalog went through two generations of equipment names. Weight tables
//! are keyed by the current vocabulary, so legacy tokens are expanded through
//! a fixed alias table before any lookup.

pub const EQUIPMENT_ALIASES_VERSION: u32 = 2;

static EQUIPMENT_ALIASES: [(&str, &[&str]); 7] = [
    ("cable stack", &["cable", "machine"]),
    ("kettlebell", &["kettlebells"]),
    ("dumbbell", &["dumbbells"]),
    ("band", &["resistance band"]),
    ("bodyweight", &["body only"]),
    ("pull up bar", &["pull-up bar"]),
    ("smith machine", &["machine", "barbell"]),
];

/// Lower-case, trim and treat underscores like spaces.
#[must_use]
pub fn normalize_equipment(token: &str) -> String {
    token
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn equipment_aliases(normalized: &str) -> &'static [&'static str] {
    match EQUIPMENT_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == normalized)
    {
        Some((_, aliases)) => *aliases,
        None => &[],
    }
}

/// The normalized token followed by its aliases, without duplicates.
#[must_use]
pub fn expand_equipment(token: &str) -> Vec<String> {
    let normalized = normalize_equipment(token);
    if normalized.is_empty() {
        return vec![];
    }
    let mut result = vec![normalized.clone()];
    for alias in equipment_aliases(&normalized) {
        if !result.iter().any(|r| r == alias) {
            result.push((*alias).to_string());
        }
    }
    result
}

/// Expand a whole equipment list, keeping first occurrences only.
#[must_use]
pub fn expand_equipment_list(tokens: &[String]) -> Vec<String> {
    let mut result: Vec<String> = vec![];
    for key in tokens.iter().flat_map(|t| expand_equipment(t)) {
        if !result.contains(&key) {
            result.push(key);
        }
    }
    result
}
