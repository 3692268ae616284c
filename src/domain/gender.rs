//! Grammatical gender of product names and adjective agreement.
//!
//! Spanish commercial names combine the species with qualifiers that must
//! agree in gender: "Merluza fileteada congelada" but "Bacalao fileteado
//! congelado". The gender is decided from the base name alone.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Noun stems of species sold under a feminine name.
///
/// Matched case-insensitively as substrings of the base name, so "merluz"
/// also covers "Merluza del Cabo" and "MERLUZA".
pub const FEMININE_STEMS: &[&str] = &[
    "merluz",
    "pescadill",
    "dorada",
    "lubina",
    "sardina",
    "caballa",
    "corvina",
    "anchoa",
    "breca",
    "platija",
    "raya",
    "trucha",
    "palometa",
    "bacaladilla",
    "acedía",
    "acedia",
    "japuta",
    "faneca",
    "melva",
    "bacoreta",
    "lamprea",
    "morena",
    "pintarroja",
    "tintorera",
    "gallineta",
    "gamba",
    "quisquilla",
    "cigala",
    "langosta",
    "nécora",
    "necora",
    "centolla",
    "sepia",
    "pota",
    "almeja",
    "chirla",
    "navaja",
    "ostra",
    "vieira",
    "zamburiña",
    "coquina",
];

/// Suffix rewrites applied to feminine names, in application order.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("descongelado", "descongelada"),
    ("ado", "ada"),
    ("ero", "era"),
    ("ido", "ida"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Masculine,
    Feminine,
}

impl Gender {
    /// Parse a supplied gender marker (`F`, `Femenino`, `M`, `Masculino`).
    ///
    /// Returns `None` for blank or unrecognized values so callers can fall
    /// back to [`derive_gender`].
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_lowercase().as_str() {
            "f" | "fem" | "femenino" | "feminine" => Some(Gender::Feminine),
            "m" | "masc" | "masculino" | "masculine" => Some(Gender::Masculine),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Masculine => write!(f, "masculine"),
            Gender::Feminine => write!(f, "feminine"),
        }
    }
}

/// How suffixes are located when rewriting for agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementMode {
    /// Replace every occurrence of a tracked suffix anywhere in the text
    #[default]
    Substring,
    /// Replace tracked suffixes only at the end of a word
    WordFinal,
}

/// Infer the gender of a base name from the built-in feminine stems.
pub fn derive_gender(base_name: &str) -> Gender {
    derive_gender_with(base_name, &[])
}

/// Infer the gender of a base name, also consulting `extra_stems`.
pub fn derive_gender_with(base_name: &str, extra_stems: &[String]) -> Gender {
    let name = base_name.to_lowercase();

    let builtin = FEMININE_STEMS.iter().any(|stem| name.contains(stem));
    let extra = extra_stems
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .any(|stem| name.contains(&stem));

    if builtin || extra {
        Gender::Feminine
    } else {
        Gender::Masculine
    }
}

/// Rewrite masculine suffixes to feminine when `gender` is feminine.
///
/// Uses blind substring replacement: "Pescado" becomes "Pescada" too.
pub fn agree(text: &str, gender: Gender) -> String {
    agree_with(text, gender, AgreementMode::Substring)
}

pub fn agree_with(text: &str, gender: Gender, mode: AgreementMode) -> String {
    if gender == Gender::Masculine {
        return text.to_string();
    }

    match mode {
        AgreementMode::Substring => SUFFIX_RULES
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to)),
        AgreementMode::WordFinal => word_final_suffix()
            .replace_all(text, "${stem}a")
            .into_owned(),
    }
}

fn word_final_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "descongelado" is covered by the "ado" branch.
    RE.get_or_init(|| Regex::new(r"(?P<stem>ad|er|id)o\b").expect("static regex"))
}
