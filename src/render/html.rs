//! Printable HTML label sheet.
//!
//! Pages are sized in millimetres through CSS `@page`, so printing the file
//! from a browser ("Save as PDF") reproduces the configured sheet.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tera::Tera;

use super::layout::{Placement, SheetLayout};
use super::{document_name, DocumentRenderer, RenderError, RenderedDocument};
use crate::label::LabelFields;

/// Embedded default templates
pub mod embedded {
    pub const SHEET_HTML: &str = include_str!("../../templates/label/sheet.html");
    pub const LABEL_HTML: &str = include_str!("../../templates/label/label.html");
}

#[derive(Debug, Serialize)]
struct PageData {
    slots: Vec<Placement>,
}

pub struct HtmlSheetRenderer {
    layout: SheetLayout,
    tera: Tera,
}

impl HtmlSheetRenderer {
    pub fn new(layout: SheetLayout) -> Result<Self, RenderError> {
        Ok(Self {
            layout,
            tera: Self::create_embedded_tera()?,
        })
    }

    /// Use `sheet.html` / `label.html` from `template_dir`, falling back to
    /// the embedded templates when the directory does not exist.
    pub fn with_template_dir(layout: SheetLayout, template_dir: &Path) -> Result<Self, RenderError> {
        let tera = if template_dir.exists() {
            let pattern = format!("{}/**/*.html", template_dir.display());
            let mut tera = Tera::new(&pattern)?;
            tera.set_escape_fn(escape_html);
            tera
        } else {
            Self::create_embedded_tera()?
        };
        Ok(Self { layout, tera })
    }

    fn create_embedded_tera() -> Result<Tera, tera::Error> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);
        tera.add_raw_template("label.html", embedded::LABEL_HTML)?;
        tera.add_raw_template("sheet.html", embedded::SHEET_HTML)?;
        Ok(tera)
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }
}

/// HTML escaping that leaves `/` alone, so dates and sanitary ovals
/// ("ES 12.00000/C CE") print as typed.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

impl DocumentRenderer for HtmlSheetRenderer {
    fn render(&self, label: &LabelFields, copies: usize) -> Result<RenderedDocument, RenderError> {
        if copies == 0 {
            return Err(RenderError::NoCopies);
        }

        let mut pages: BTreeMap<usize, Vec<Placement>> = BTreeMap::new();
        for placement in self.layout.placements(copies)? {
            pages.entry(placement.page).or_default().push(placement);
        }
        let pages: Vec<PageData> = pages
            .into_values()
            .map(|slots| PageData { slots })
            .collect();

        let mut context = tera::Context::new();
        context.insert("title", &format!("{} - {}", label.commercial_name, label.lot));
        context.insert("page_width", &self.layout.page_width_mm);
        context.insert("page_height", &self.layout.page_height_mm);
        context.insert("label_width", &self.layout.label_width_mm);
        context.insert("label_height", &self.layout.label_height_mm);
        context.insert("pages", &pages);
        context.insert("label", label);

        let html = self.tera.render("sheet.html", &context)?;

        Ok(RenderedDocument {
            file_name: document_name(label, self.extension()),
            media_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    fn render(copies: usize) -> String {
        let renderer = HtmlSheetRenderer::new(SheetLayout::default()).unwrap();
        let doc = renderer.render(&fixtures::label(), copies).unwrap();
        assert_eq!(doc.file_name, "etiqueta_merluza_l26006.html");
        String::from_utf8(doc.bytes).unwrap()
    }

    #[test]
    fn test_one_label_per_copy() {
        let html = render(3);
        assert_eq!(html.matches("class=\"label\"").count(), 3);
        assert_eq!(html.matches("class=\"page\"").count(), 1);
        assert!(html.contains("Merluza Filete congelada"));
        assert!(html.contains("Zona de captura: FAO 27"));
        assert!(html.contains("Estado: congelado"));
        assert!(html.contains("Fecha de congelación: 01/10/2026"));
        assert!(!html.contains("Fecha de descongelación"));
    }

    #[test]
    fn test_page_break_after_full_sheet() {
        let html = render(9);
        assert_eq!(html.matches("class=\"label\"").count(), 9);
        assert_eq!(html.matches("class=\"page\"").count(), 2);
    }

    #[test]
    fn test_values_are_escaped() {
        let renderer = HtmlSheetRenderer::new(SheetLayout::default()).unwrap();
        let mut label = fixtures::label();
        label.distributor = "Mar & Tierra <S.L.>".to_string();
        let doc = renderer.render(&label, 1).unwrap();
        let html = String::from_utf8(doc.bytes).unwrap();
        assert!(html.contains("Mar &amp; Tierra &lt;S.L.&gt;"));
        assert!(html.contains("ES 12.00000/C CE"));
    }

    #[test]
    fn test_zero_copies_rejected() {
        let renderer = HtmlSheetRenderer::new(SheetLayout::default()).unwrap();
        assert!(matches!(
            renderer.render(&fixtures::label(), 0),
            Err(RenderError::NoCopies)
        ));
    }

    #[test]
    fn test_missing_template_dir_uses_embedded() {
        let renderer = HtmlSheetRenderer::with_template_dir(
            SheetLayout::default(),
            Path::new("/nonexistent/etiquetas/templates"),
        )
        .unwrap();
        assert!(renderer.render(&fixtures::label(), 1).is_ok());
    }

    #[test]
    fn test_custom_template_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("label.html"), "{{ label.lot }}").unwrap();
        std::fs::write(
            dir.path().join("sheet.html"),
            "{% for page in pages %}[{% for slot in page.slots %}{% include \"label.html\" %};{% endfor %}]{% endfor %}",
        )
        .unwrap();

        let renderer = HtmlSheetRenderer::with_template_dir(SheetLayout::default(), dir.path()).unwrap();
        let doc = renderer.render(&fixtures::label(), 2).unwrap();
        assert_eq!(String::from_utf8(doc.bytes).unwrap(), "[L26006;L26006;]");
    }
}
