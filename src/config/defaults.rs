//! Default values and configuration sections with default implementations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{AgreementMode, TracesPolicy, PLACEHOLDER};
use crate::label::LabelRules;
use crate::render::OutputFormat;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

/// Published spreadsheet holding the reference tabs
pub const DEFAULT_SPREADSHEET_ID: &str = "1gMEnVHqQmTqfhwMWmyybliH_ar4veAFq179FKpU6ZTA";

/// Tab gids of the published spreadsheet, by sheet name
pub const DEFAULT_GIDS: [(&str, &str); 8] = [
    ("PRODUCTOS", "0"),
    ("FORMAS_TRANSFORMACION", "1141842769"),
    ("ESTADOS_PRODUCTO", "57656075"),
    ("METODO_PRODUCCION", "1900442476"),
    ("ZONAS_FAO", "907306114"),
    ("ARTES_PESCA", "1510153858"),
    ("EXPEDIDORES", "1402611266"),
    ("TRAZAS_CONFIG", "1059656739"),
];

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(
    default_spreadsheet_id,
    String,
    DEFAULT_SPREADSHEET_ID.to_string()
);
default_fn!(
    default_gids,
    HashMap<String, String>,
    DEFAULT_GIDS
        .iter()
        .map(|(name, gid)| (name.to_string(), gid.to_string()))
        .collect()
);
default_fn!(default_timeout_secs, u64, 30);
default_fn!(default_placeholder, String, PLACEHOLDER.to_string());
default_fn!(default_date_format, String, "%d/%m/%Y".to_string());
default_fn!(default_output_dir, String, "./etiquetas/".to_string());
default_fn!(default_copies, usize, 1);

// =========================================================================
// CONFIG SECTIONS WITH DEFAULTS
// =========================================================================

/// Where the reference tables are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    /// Sheet name → gid of its tab
    #[serde(default = "default_gids")]
    pub gids: HashMap<String, String>,
    /// Read `{dir}/{SHEET}.csv` instead of the spreadsheet
    #[serde(default)]
    pub dir: Option<String>,
    /// Per-request timeout for the spreadsheet export (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            gids: default_gids(),
            dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Wording rules applied while deriving a label
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelsConfig {
    /// Text a selection list shows when nothing is chosen
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Extra name stems treated as feminine
    #[serde(default)]
    pub feminine_stems: Vec<String>,
    #[serde(default)]
    pub agreement: AgreementMode,
    #[serde(default)]
    pub traces_policy: TracesPolicy,
    /// chrono format for printed dates (default: %d/%m/%Y)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            feminine_stems: Vec::new(),
            agreement: AgreementMode::default(),
            traces_policy: TracesPolicy::default(),
            date_format: default_date_format(),
        }
    }
}

impl LabelsConfig {
    pub fn to_rules(&self) -> LabelRules {
        LabelRules {
            placeholder: self.placeholder.clone(),
            agreement: self.agreement,
            traces_policy: self.traces_policy,
            feminine_stems: self.feminine_stems.clone(),
            date_format: self.date_format.clone(),
        }
    }
}

/// Where and how generated documents are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output directory; `~` is expanded (default: ./etiquetas/)
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory with `sheet.html` / `label.html` overriding the built-in templates
    #[serde(default)]
    pub template_dir: Option<String>,
    /// Copies printed when none are requested (default: 1)
    #[serde(default = "default_copies")]
    pub copies: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
            template_dir: None,
            copies: default_copies(),
        }
    }
}
