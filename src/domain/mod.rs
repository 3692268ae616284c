//! Domain logic module containing the pure label rules.
//!
//! Nothing in here performs I/O: reference rows and user selections come
//! in, resolved strings and validation results go out.

pub mod conservation;
pub mod gender;
pub mod traces;
pub mod validation;

pub use conservation::{conservation_notice, ProductState};
pub use gender::{agree, agree_with, derive_gender, derive_gender_with, AgreementMode, Gender};
pub use traces::{allergen_declaration, resolve_traces, TracesEntry, TracesPolicy};
pub use validation::{
    check_dates, format_date, parse_date, validate, validate_with, DateIssue, FormField, ProductionMethod,
    PLACEHOLDER,
};
