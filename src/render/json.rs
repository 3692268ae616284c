//! JSON field map, for handing the label to another renderer.

use serde::Serialize;

use super::{document_name, DocumentRenderer, RenderError, RenderedDocument};
use crate::label::LabelFields;

#[derive(Serialize)]
struct JsonDocument<'a> {
    file_stem: String,
    copies: usize,
    fields: &'a LabelFields,
}

pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn render(&self, label: &LabelFields, copies: usize) -> Result<RenderedDocument, RenderError> {
        if copies == 0 {
            return Err(RenderError::NoCopies);
        }

        let doc = JsonDocument {
            file_stem: label.file_stem(),
            copies,
            fields: label,
        };
        let bytes = serde_json::to_vec_pretty(&doc)?;

        Ok(RenderedDocument {
            file_name: document_name(label, self.extension()),
            media_type: "application/json",
            bytes,
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_json_field_map() {
        let doc = JsonRenderer.render(&fixtures::label(), 2).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&doc.bytes).unwrap();

        assert_eq!(value["copies"], 2);
        assert_eq!(value["file_stem"], "etiqueta_merluza_l26006");
        assert_eq!(value["fields"]["zone"], "FAO 27");
        assert!(value["fields"]["thaw_date"].is_null());
    }
}
