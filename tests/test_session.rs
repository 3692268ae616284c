//! Library-level flow: fixture tables → session → rendered document

use chrono::NaiveDate;
use std::path::Path;

use etiquetas::domain::{FormField, TracesPolicy};
use etiquetas::label::{LabelError, LabelRules};
use etiquetas::reference::{DirSource, Table};
use etiquetas::render::{DocumentRenderer, HtmlSheetRenderer, JsonRenderer, SheetLayout};
use etiquetas::session::Session;

fn open(rules: LabelRules) -> Session {
    let source = DirSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tablas"));
    let mut loaded = Vec::new();
    let session = Session::open(&source, rules, &mut |table| loaded.push(table)).unwrap();
    assert_eq!(loaded, Table::ALL.to_vec());
    session
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn fill_merluza(session: &mut Session) {
    for (field, value) in [
        (FormField::Product, "Merluza"),
        (FormField::Form, "Filete"),
        (FormField::State, "Congelado"),
        (FormField::Method, "Capturado"),
        (FormField::Zone, "FAO 27"),
        (FormField::Gear, "Arrastre"),
        (FormField::Lot, "L26006"),
        (FormField::ExpiryDate, "2026-12-01"),
        (FormField::FreezeDate, "2026-10-01"),
        (FormField::Distributor, "Pescados del Norte S.L."),
    ] {
        session.set(field, value);
    }
}

#[test]
fn test_fixture_tables_load() {
    let session = open(LabelRules::default());
    let reference = session.reference();

    assert_eq!(reference.products.len(), 4);
    assert_eq!(reference.forms, vec!["Entero", "Filete", "Troceado"]);
    assert_eq!(reference.zones.len(), 3);
    assert_eq!(
        reference.distributor("Mariscos Sur S.A.").unwrap().sanitary_oval,
        "ES 12.04567/SE CE"
    );
}

#[test]
fn test_merluza_frozen_label_renders() {
    let mut session = open(LabelRules::default());
    fill_merluza(&mut session);

    let label = session.submit(today()).unwrap();
    assert_eq!(label.commercial_name, "Merluza Filete congelada");
    assert_eq!(label.sanitary_oval, "ES 12.00000/C CE");

    let renderer = HtmlSheetRenderer::new(SheetLayout::default()).unwrap();
    let doc = session.render(&renderer, 2).unwrap();
    assert_eq!(doc.file_name, "etiqueta_merluza_l26006.html");
    assert_eq!(doc.media_type, "text/html; charset=utf-8");

    let html = String::from_utf8(doc.bytes).unwrap();
    assert_eq!(html.matches("class=\"label\"").count(), 2);
    assert!(html.contains("Contiene PESCADO. Puede contener trazas de CRUSTÁCEOS y MOLUSCOS."));
}

#[test]
fn test_exclude_primary_policy() {
    let rules = LabelRules {
        traces_policy: TracesPolicy::ExcludePrimary,
        ..LabelRules::default()
    };
    let mut session = open(rules);
    fill_merluza(&mut session);

    let label = session.submit(today()).unwrap();
    assert_eq!(
        label.allergens,
        "Contiene PESCADO. Puede contener trazas de CRUSTÁCEOS, MOLUSCOS."
    );
}

#[test]
fn test_unknown_distributor_has_no_oval() {
    let mut session = open(LabelRules::default());
    fill_merluza(&mut session);
    session.set(FormField::Distributor, "Desconocido");

    let err = session.submit(today()).unwrap_err();
    assert_eq!(err, LabelError::Incomplete(vec![FormField::SanitaryOval]));
    assert!(session.render(&JsonRenderer, 1).is_err());
}
