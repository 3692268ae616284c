//! Turning a resolved label into a downloadable document.
//!
//! Renderers never decide anything about the label: they receive a
//! [`LabelFields`] that already passed validation and a copy count.

pub mod html;
pub mod json;
pub mod layout;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::label::LabelFields;

pub use html::HtmlSheetRenderer;
pub use json::JsonRenderer;
pub use layout::{LayoutError, Placement, SheetLayout};
pub use text::TextRenderer;

/// A finished document and the name it should be saved under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum RenderError {
    NoCopies,
    /// No label has been derived for the current selection
    NothingSubmitted,
    Layout(LayoutError),
    Template(tera::Error),
    Json(serde_json::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoCopies => write!(f, "At least one copy must be requested"),
            RenderError::NothingSubmitted => {
                write!(f, "No validated label to render; submit the selection first")
            }
            RenderError::Layout(e) => write!(f, "Invalid sheet layout: {}", e),
            RenderError::Template(e) => write!(f, "Failed to render label template: {}", e),
            RenderError::Json(e) => write!(f, "Failed to serialize label: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Layout(e) => Some(e),
            RenderError::Template(e) => Some(e),
            RenderError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for RenderError {
    fn from(e: LayoutError) -> Self {
        RenderError::Layout(e)
    }
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        RenderError::Template(e)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Json(e)
    }
}

/// Trait for document renderers
pub trait DocumentRenderer {
    fn render(&self, label: &LabelFields, copies: usize) -> Result<RenderedDocument, RenderError>;

    /// File extension, without the dot
    fn extension(&self) -> &'static str;
}

/// Output formats selectable from config and command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["html", "text", "json"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown format: {}. Supported formats: {}",
                other,
                OutputFormat::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Build the renderer for `format`.
pub fn renderer_for(
    format: OutputFormat,
    layout: &SheetLayout,
) -> Result<Box<dyn DocumentRenderer>, RenderError> {
    Ok(match format {
        OutputFormat::Html => Box::new(HtmlSheetRenderer::new(layout.clone())?),
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    })
}

pub(crate) fn document_name(label: &LabelFields, extension: &str) -> String {
    format!("{}.{}", label.file_stem(), extension)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::label::LabelFields;

    pub fn label() -> LabelFields {
        LabelFields {
            commercial_name: "Merluza Filete congelada".to_string(),
            base_name: "Merluza".to_string(),
            scientific_name: "Merluccius merluccius".to_string(),
            ingredients: None,
            allergens: "Contiene PESCADO.".to_string(),
            production_method: "Capturado".to_string(),
            zone: Some("FAO 27".to_string()),
            gear: Some("Arrastre".to_string()),
            state: "congelado".to_string(),
            conservation: crate::domain::conservation::NOTICE_FROZEN.to_string(),
            lot: "L26006".to_string(),
            expiry_date: "01/12/2026".to_string(),
            freeze_date: Some("01/10/2026".to_string()),
            thaw_date: None,
            distributor: "Pescados del Norte S.L.".to_string(),
            sanitary_oval: "ES 12.00000/C CE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("txt".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!(" json ".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("pdf".parse::<OutputFormat>().unwrap_err().contains("pdf"));
    }

    #[test]
    fn test_renderer_extensions() {
        let layout = SheetLayout::default();
        for (format, ext) in [
            (OutputFormat::Html, "html"),
            (OutputFormat::Text, "txt"),
            (OutputFormat::Json, "json"),
        ] {
            assert_eq!(renderer_for(format, &layout).unwrap().extension(), ext);
        }
    }

    #[test]
    fn test_file_names_are_deterministic() {
        let label = fixtures::label();
        let a = TextRenderer.render(&label, 1).unwrap();
        let b = TextRenderer.render(&label, 3).unwrap();
        assert_eq!(a.file_name, b.file_name);
        assert_eq!(a.file_name, "etiqueta_merluza_l26006.txt");
    }
}
