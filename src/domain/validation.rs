//! Mandatory-field and date validation for label selections.
//!
//! Validation fails closed: every missing field is reported and nothing is
//! defaulted on the caller's behalf.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::conservation::ProductState;
use crate::label::LabelSelection;

/// Sentinel shown by selectors before the user picks a value.
pub const PLACEHOLDER: &str = "Selecciona una opción";

/// Accepted input formats for dates, tried in order.
const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// A user-facing field of the label form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Product,
    Form,
    State,
    Method,
    Zone,
    Gear,
    Lot,
    ExpiryDate,
    FreezeDate,
    ThawDate,
    Distributor,
    SanitaryOval,
}

impl FormField {
    /// Field name as printed in warnings
    pub fn label(self) -> &'static str {
        match self {
            FormField::Product => "Nombre base",
            FormField::Form => "Forma de transformación",
            FormField::State => "Estado del producto",
            FormField::Method => "Método de producción",
            FormField::Zone => "Zona de captura (FAO)",
            FormField::Gear => "Arte de pesca",
            FormField::Lot => "Lote",
            FormField::ExpiryDate => "Fecha de caducidad",
            FormField::FreezeDate => "Fecha de congelación",
            FormField::ThawDate => "Fecha de descongelación",
            FormField::Distributor => "Expedidor",
            FormField::SanitaryOval => "Óvalo sanitario",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionMethod {
    Captured,
    Aquaculture,
}

impl ProductionMethod {
    /// Classify a method label. Only aquaculture is recognized explicitly;
    /// every other value, blank included, is treated as captured.
    pub fn from_label(method: &str) -> Self {
        let method = method.to_lowercase();
        if method.contains("acuicult") || method.contains("criad") {
            ProductionMethod::Aquaculture
        } else {
            ProductionMethod::Captured
        }
    }

    /// Catch zone and gear are printed for everything that is not farmed
    pub fn needs_catch_details(self) -> bool {
        self != ProductionMethod::Aquaculture
    }
}

/// True when `value` is blank or still shows the selector placeholder.
pub fn is_missing(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.to_lowercase() == placeholder.trim().to_lowercase()
}

/// Collect every mandatory field missing from `selection`.
pub fn validate(selection: &LabelSelection) -> Vec<FormField> {
    validate_with(selection, PLACEHOLDER)
}

pub fn validate_with(selection: &LabelSelection, placeholder: &str) -> Vec<FormField> {
    let missing = |value: &str| is_missing(value, placeholder);
    let mut fields = Vec::new();

    let always = [
        (FormField::Product, &selection.product),
        (FormField::Form, &selection.form),
        (FormField::State, &selection.state),
        (FormField::Method, &selection.method),
    ];
    for (field, value) in always {
        if missing(value) {
            fields.push(field);
        }
    }

    if ProductionMethod::from_label(&selection.method).needs_catch_details() {
        if missing(&selection.zone) {
            fields.push(FormField::Zone);
        }
        if missing(&selection.gear) {
            fields.push(FormField::Gear);
        }
    }

    if missing(&selection.lot) {
        fields.push(FormField::Lot);
    }
    if missing(&selection.expiry_date) {
        fields.push(FormField::ExpiryDate);
    }

    let state = ProductState::from_label(&selection.state);
    if state.needs_freeze_date() && missing(&selection.freeze_date) {
        fields.push(FormField::FreezeDate);
    }
    if state.needs_thaw_date() && missing(&selection.thaw_date) {
        fields.push(FormField::ThawDate);
    }

    if missing(&selection.distributor) {
        fields.push(FormField::Distributor);
    }
    if missing(&selection.sanitary_oval) {
        fields.push(FormField::SanitaryOval);
    }

    fields
}

/// A date that is present but unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateIssue {
    Unparseable { field: FormField, value: String },
    ExpiryInPast { expiry: NaiveDate, today: NaiveDate },
}

impl fmt::Display for DateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateIssue::Unparseable { field, value } => {
                write!(f, "{}: invalid date '{}'", field, value)
            }
            DateIssue::ExpiryInPast { expiry, today } => write!(
                f,
                "{} {} is before today ({})",
                FormField::ExpiryDate,
                expiry.format("%d/%m/%Y"),
                today.format("%d/%m/%Y")
            ),
        }
    }
}

/// Parse a date typed as `YYYY-MM-DD`, `DD/MM/YYYY` or `DD-MM-YYYY`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Print `date` with a chrono format string. `None` when the format asks
/// for something a calendar date does not have, such as a time or zone.
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Check every date the label will carry. Blank dates are skipped; they
/// are the concern of [`validate`]. Freeze and thaw dates the product
/// state does not print are ignored.
pub fn check_dates(selection: &LabelSelection, today: NaiveDate) -> Vec<DateIssue> {
    let mut issues = Vec::new();
    let state = ProductState::from_label(&selection.state);

    let dates = [
        (FormField::ExpiryDate, &selection.expiry_date, true),
        (
            FormField::FreezeDate,
            &selection.freeze_date,
            state.needs_freeze_date(),
        ),
        (
            FormField::ThawDate,
            &selection.thaw_date,
            state.needs_thaw_date(),
        ),
    ];

    for (field, value, printed) in dates {
        if !printed || value.trim().is_empty() {
            continue;
        }
        match parse_date(value) {
            Some(date) if field == FormField::ExpiryDate && date < today => {
                issues.push(DateIssue::ExpiryInPast {
                    expiry: date,
                    today,
                });
            }
            Some(_) => {}
            None => issues.push(DateIssue::Unparseable {
                field,
                value: value.trim().to_string(),
            }),
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> LabelSelection {
        LabelSelection {
            product: "Merluza".to_string(),
            form: "Filete".to_string(),
            state: "Congelado".to_string(),
            method: "Capturado".to_string(),
            zone: "FAO 27".to_string(),
            gear: "Arrastre".to_string(),
            lot: "L26006".to_string(),
            expiry_date: "2026-12-01".to_string(),
            freeze_date: "2026-10-01".to_string(),
            thaw_date: String::new(),
            distributor: "Pescados del Norte S.L.".to_string(),
            sanitary_oval: "ES 12.00000/C CE".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_complete_frozen_selection_is_valid() {
        assert!(validate(&complete()).is_empty());
        assert!(check_dates(&complete(), today()).is_empty());
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing("", PLACEHOLDER));
        assert!(is_missing("   \t", PLACEHOLDER));
        assert!(is_missing("Selecciona una opción", PLACEHOLDER));
        assert!(is_missing("  SELECCIONA UNA OPCIÓN ", PLACEHOLDER));
        assert!(!is_missing("Filete", PLACEHOLDER));
    }

    #[test]
    fn test_empty_selection_reports_everything() {
        let missing = validate(&LabelSelection::default());
        assert_eq!(
            missing,
            vec![
                FormField::Product,
                FormField::Form,
                FormField::State,
                FormField::Method,
                FormField::Zone,
                FormField::Gear,
                FormField::Lot,
                FormField::ExpiryDate,
                FormField::Distributor,
                FormField::SanitaryOval,
            ]
        );
    }

    #[test]
    fn test_captured_requires_zone_and_gear() {
        let mut selection = complete();
        selection.zone = PLACEHOLDER.to_string();
        assert_eq!(validate(&selection), vec![FormField::Zone]);

        selection.gear = " ".to_string();
        assert_eq!(validate(&selection), vec![FormField::Zone, FormField::Gear]);
    }

    #[test]
    fn test_aquaculture_never_requires_zone_or_gear() {
        let mut selection = complete();
        selection.method = "Acuicultura".to_string();
        selection.zone = String::new();
        selection.gear = PLACEHOLDER.to_string();
        assert!(validate(&selection).is_empty());

        selection.method = "Criado en acuicultura".to_string();
        assert!(validate(&selection).is_empty());
    }

    #[test]
    fn test_thawed_requires_both_dates() {
        let mut selection = complete();
        selection.state = "Descongelado".to_string();
        assert_eq!(validate(&selection), vec![FormField::ThawDate]);

        selection.freeze_date = String::new();
        assert_eq!(
            validate(&selection),
            vec![FormField::FreezeDate, FormField::ThawDate]
        );
    }

    #[test]
    fn test_fresh_requires_no_state_dates() {
        let mut selection = complete();
        selection.state = "Fresco".to_string();
        selection.freeze_date = String::new();
        assert!(validate(&selection).is_empty());
    }

    #[test]
    fn test_distributor_and_oval_are_mandatory() {
        let mut selection = complete();
        selection.sanitary_oval = String::new();
        assert_eq!(validate(&selection), vec![FormField::SanitaryOval]);

        selection.distributor = PLACEHOLDER.to_string();
        assert_eq!(
            validate(&selection),
            vec![FormField::Distributor, FormField::SanitaryOval]
        );
    }

    #[test]
    fn test_custom_placeholder() {
        let mut selection = complete();
        selection.form = "--".to_string();
        assert_eq!(validate_with(&selection, "--"), vec![FormField::Form]);
        assert!(validate(&selection).is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 5);
        assert_eq!(parse_date("2026-03-05"), expected);
        assert_eq!(parse_date(" 05/03/2026 "), expected);
        assert_eq!(parse_date("05-03-2026"), expected);
        assert_eq!(parse_date("5 de marzo"), None);
    }

    #[test]
    fn test_expiry_today_is_accepted() {
        let mut selection = complete();
        selection.expiry_date = "16/10/2026".to_string();
        assert!(check_dates(&selection, today()).is_empty());
    }

    #[test]
    fn test_expiry_in_past_is_rejected() {
        let mut selection = complete();
        selection.expiry_date = "2026-10-15".to_string();
        let issues = check_dates(&selection, today());
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], DateIssue::ExpiryInPast { .. }));
    }

    #[test]
    fn test_unparseable_dates_are_reported() {
        let mut selection = complete();
        selection.state = "Descongelado".to_string();
        selection.freeze_date = "ayer".to_string();
        selection.thaw_date = "31/02/2026".to_string();
        let issues = check_dates(&selection, today());
        assert_eq!(
            issues,
            vec![
                DateIssue::Unparseable {
                    field: FormField::FreezeDate,
                    value: "ayer".to_string()
                },
                DateIssue::Unparseable {
                    field: FormField::ThawDate,
                    value: "31/02/2026".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unprinted_state_dates_are_not_checked() {
        let mut selection = complete();
        selection.state = "Fresco".to_string();
        selection.freeze_date = "ayer".to_string();
        selection.thaw_date = "n/a".to_string();
        assert!(check_dates(&selection, today()).is_empty());

        selection.state = "Congelado".to_string();
        assert_eq!(
            check_dates(&selection, today()),
            vec![DateIssue::Unparseable {
                field: FormField::FreezeDate,
                value: "ayer".to_string()
            }]
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y").as_deref(), Some("05/03/2026"));
        assert_eq!(format_date(date, "%d/%m/%Y %H:%M"), None);
        assert_eq!(format_date(date, "%Z"), None);
    }
}
