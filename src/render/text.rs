//! Plain-text label summary.

use super::{document_name, DocumentRenderer, RenderError, RenderedDocument};
use crate::label::LabelFields;
use crate::ui::format::field_line;

/// Renders `Caption: value` lines, the same summary shown after a
/// successful validation.
pub struct TextRenderer;

impl TextRenderer {
    pub fn summary(label: &LabelFields) -> String {
        let rows = label.rows();
        let width = rows
            .iter()
            .map(|(caption, _)| caption.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for (caption, value) in rows {
            out.push_str(&field_line(caption, value, width));
            out.push('\n');
        }
        out
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, label: &LabelFields, copies: usize) -> Result<RenderedDocument, RenderError> {
        if copies == 0 {
            return Err(RenderError::NoCopies);
        }

        let mut text = Self::summary(label);
        text.push_str(&format!("\nCopias: {}\n", copies));

        Ok(RenderedDocument {
            file_name: document_name(label, self.extension()),
            media_type: "text/plain; charset=utf-8",
            bytes: text.into_bytes(),
        })
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
