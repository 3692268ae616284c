//! Allergen declaration and cross-contamination ("trazas") lookup.

use serde::{Deserialize, Serialize};

/// One row of the traces table: an allergen code and what products
/// declaring it may also contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracesEntry {
    pub contains: String,
    pub may_contain: String,
}

impl TracesEntry {
    pub fn new(contains: impl Into<String>, may_contain: impl Into<String>) -> Self {
        Self {
            contains: contains.into(),
            may_contain: may_contain.into(),
        }
    }
}

/// Whether the primary allergen is dropped from its own "may contain" list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracesPolicy {
    /// Return the table text unchanged
    #[default]
    Keep,
    /// Remove list items equal to the primary allergen
    ExcludePrimary,
}

/// Normalize an allergen code for comparison: trim, collapse inner
/// whitespace, uppercase.
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Look up the "may contain" text for `primary_allergen`.
///
/// The first row whose normalized code equals the normalized allergen wins.
/// A miss, or an empty allergen, yields an empty string.
pub fn resolve_traces(primary_allergen: &str, table: &[TracesEntry], policy: TracesPolicy) -> String {
    let key = normalize_code(primary_allergen);
    if key.is_empty() {
        return String::new();
    }

    let Some(entry) = table.iter().find(|e| normalize_code(&e.contains) == key) else {
        return String::new();
    };

    let text = entry.may_contain.trim();
    match policy {
        TracesPolicy::Keep => text.to_string(),
        TracesPolicy::ExcludePrimary => split_list(text)
            .into_iter()
            .filter(|item| normalize_code(item) != key)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Build the allergen sentence printed on the label.
///
/// `"Contiene PESCADO."`, plus `" Puede contener trazas de ..."` when
/// `traces` is non-empty. An empty allergen gives an empty declaration.
pub fn allergen_declaration(primary_allergen: &str, traces: &str) -> String {
    let allergen = normalize_code(primary_allergen);
    if allergen.is_empty() {
        return String::new();
    }

    let traces = traces.trim();
    if traces.is_empty() {
        format!("Contiene {}.", allergen)
    } else {
        format!("Contiene {}. Puede contener trazas de {}.", allergen, traces)
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .flat_map(|part| part.split(" y "))
        .map(|item| item.trim().trim_end_matches('.').trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
