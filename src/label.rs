//! Label derivation: from a user selection and the reference tables to the
//! resolved field set a renderer prints.
//!
//! The pipeline is validate → check dates → look up product and
//! distributor → derive name, allergens, notice → format dates. Any failure
//! stops it; a label is never produced with a defaulted field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{
    agree_with, allergen_declaration, check_dates, derive_gender_with, format_date, parse_date,
    resolve_traces,
    validate_with, AgreementMode, DateIssue, FormField, Gender, ProductState, ProductionMethod,
    TracesPolicy, PLACEHOLDER,
};
use crate::reference::ReferenceData;

/// Raw user choices, as submitted by a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSelection {
    pub product: String,
    pub form: String,
    pub state: String,
    pub method: String,
    pub zone: String,
    pub gear: String,
    pub lot: String,
    pub expiry_date: String,
    pub freeze_date: String,
    pub thaw_date: String,
    pub distributor: String,
    /// Filled from the distributor row, never typed by the user
    pub sanitary_oval: String,
}

impl LabelSelection {
    /// Copy the sanitary oval of the selected distributor from the
    /// reference table. An unknown distributor clears it.
    pub fn attach_sanitary_oval(&mut self, reference: &ReferenceData) {
        self.sanitary_oval = reference
            .distributor(&self.distributor)
            .map(|d| d.sanitary_oval.clone())
            .unwrap_or_default();
    }
}

/// Rules that vary between deployments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRules {
    pub placeholder: String,
    pub agreement: AgreementMode,
    pub traces_policy: TracesPolicy,
    pub feminine_stems: Vec<String>,
    /// chrono format for printed dates
    pub date_format: String,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER.to_string(),
            agreement: AgreementMode::Substring,
            traces_policy: TracesPolicy::Keep,
            feminine_stems: Vec::new(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Fully resolved label, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelFields {
    pub commercial_name: String,
    pub base_name: String,
    pub scientific_name: String,
    pub ingredients: Option<String>,
    pub allergens: String,
    pub production_method: String,
    /// Present iff the method is not aquaculture
    pub zone: Option<String>,
    pub gear: Option<String>,
    pub state: String,
    pub conservation: String,
    pub lot: String,
    pub expiry_date: String,
    /// Present iff the product is frozen or thawed
    pub freeze_date: Option<String>,
    /// Present iff the product is thawed
    pub thaw_date: Option<String>,
    pub distributor: String,
    pub sanitary_oval: String,
}

impl LabelFields {
    /// `(caption, value)` pairs in print order, optional fields skipped.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![
            ("Nombre comercial", self.commercial_name.as_str()),
            ("Nombre científico", self.scientific_name.as_str()),
        ];
        if let Some(ingredients) = &self.ingredients {
            rows.push(("Ingredientes", ingredients.as_str()));
        }
        if !self.allergens.is_empty() {
            rows.push(("Alérgenos", self.allergens.as_str()));
        }
        rows.push(("Método de producción", self.production_method.as_str()));
        if let Some(zone) = &self.zone {
            rows.push(("Zona FAO", zone.as_str()));
        }
        if let Some(gear) = &self.gear {
            rows.push(("Arte de pesca", gear.as_str()));
        }
        rows.push(("Estado", self.state.as_str()));
        rows.push(("Conservación", self.conservation.as_str()));
        rows.push(("Lote", self.lot.as_str()));
        if let Some(date) = &self.freeze_date {
            rows.push(("Fecha de congelación", date.as_str()));
        }
        if let Some(date) = &self.thaw_date {
            rows.push(("Fecha de descongelación", date.as_str()));
        }
        rows.push(("Fecha de caducidad", self.expiry_date.as_str()));
        rows.push(("Expedidor", self.distributor.as_str()));
        rows.push(("Óvalo sanitario", self.sanitary_oval.as_str()));
        rows
    }

    /// File name stem shared by every rendered format:
    /// `etiqueta_{product}_{lot}`.
    pub fn file_stem(&self) -> String {
        format!("etiqueta_{}_{}", slugify(&self.base_name), slugify(&self.lot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Mandatory fields left empty; all of them, in form order
    Incomplete(Vec<FormField>),
    InvalidDates(Vec<DateIssue>),
    UnknownProduct(String),
    UnknownDistributor(String),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::Incomplete(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                write!(f, "Missing mandatory fields: {}", names.join(" | "))
            }
            LabelError::InvalidDates(issues) => {
                let issues: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                write!(f, "Invalid dates: {}", issues.join(" | "))
            }
            LabelError::UnknownProduct(name) => {
                write!(f, "Product '{}' is not in the products table", name)
            }
            LabelError::UnknownDistributor(name) => {
                write!(f, "Distributor '{}' is not in the distributors table", name)
            }
        }
    }
}

impl std::error::Error for LabelError {}

/// Commercial name: base name, then form and state agreed in gender.
///
/// The state is lower-cased first: "Merluza Filete congelada".
pub fn commercial_name(
    base_name: &str,
    form: &str,
    state: &str,
    gender: Gender,
    mode: AgreementMode,
) -> String {
    let form = agree_with(form.trim(), gender, mode);
    let state = agree_with(&state.trim().to_lowercase(), gender, mode);
    [base_name.trim(), form.as_str(), state.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate `selection` and derive the label fields.
///
/// `today` bounds the expiry date. Errors are reported in pipeline order:
/// missing fields first, then date problems, then lookup misses.
pub fn derive_label(
    selection: &LabelSelection,
    reference: &ReferenceData,
    rules: &LabelRules,
    today: NaiveDate,
) -> Result<LabelFields, LabelError> {
    let missing = validate_with(selection, &rules.placeholder);
    if !missing.is_empty() {
        return Err(LabelError::Incomplete(missing));
    }

    let issues = check_dates(selection, today);
    if !issues.is_empty() {
        return Err(LabelError::InvalidDates(issues));
    }

    let product = reference
        .product(&selection.product)
        .ok_or_else(|| LabelError::UnknownProduct(selection.product.trim().to_string()))?;
    let distributor = reference
        .distributor(&selection.distributor)
        .ok_or_else(|| LabelError::UnknownDistributor(selection.distributor.trim().to_string()))?;

    let gender = product
        .gender
        .unwrap_or_else(|| derive_gender_with(&product.base_name, &rules.feminine_stems));

    let traces = resolve_traces(&product.allergen, &reference.traces, rules.traces_policy);
    let state = ProductState::from_label(&selection.state);
    let method = ProductionMethod::from_label(&selection.method);

    let format_date = |value: &str| -> String {
        // Parsed by check_dates already; the raw text covers formats a
        // calendar date cannot print.
        parse_date(value)
            .and_then(|d| format_date(d, &rules.date_format))
            .unwrap_or_else(|| value.trim().to_string())
    };

    let (zone, gear) = if method.needs_catch_details() {
        (
            Some(selection.zone.trim().to_string()),
            Some(selection.gear.trim().to_string()),
        )
    } else {
        (None, None)
    };

    Ok(LabelFields {
        commercial_name: commercial_name(
            &product.base_name,
            &selection.form,
            &selection.state,
            gender,
            rules.agreement,
        ),
        base_name: product.base_name.clone(),
        scientific_name: product.scientific_name.clone(),
        ingredients: product.ingredients.clone(),
        allergens: allergen_declaration(&product.allergen, &traces),
        production_method: selection.method.trim().to_string(),
        zone,
        gear,
        state: selection.state.trim().to_lowercase(),
        conservation: state.notice().to_string(),
        lot: selection.lot.trim().to_string(),
        expiry_date: format_date(&selection.expiry_date),
        freeze_date: state
            .needs_freeze_date()
            .then(|| format_date(&selection.freeze_date)),
        thaw_date: state
            .needs_thaw_date()
            .then(|| format_date(&selection.thaw_date)),
        distributor: distributor.name.clone(),
        sanitary_oval: distributor.sanitary_oval.clone(),
    })
}

/// Lowercase ASCII-ish slug for file names.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            c if c.is_ascii_alphanumeric() => c,
            _ => '-',
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
