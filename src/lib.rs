//! # Etiquetas - fish product labels
//!
//! Etiquetas turns a handful of product choices into a complete, legally
//! worded label for fresh, frozen or thawed fish sold in Spain.
//!
//! ## Overview
//!
//! Reference tables (species, processing forms, states, FAO zones, fishing
//! gear, distributors and allergen traces) are read once from a published
//! spreadsheet or a directory of CSV files. A [`label::LabelSelection`] is
//! validated against them and turned into [`label::LabelFields`], which a
//! [`render::DocumentRenderer`] prints.
//!
//! ## Modules
//!
//! - [`domain`] - gender agreement, traces lookup, conservation notice, validation
//! - [`label`] - the derivation pipeline
//! - [`reference`] - reference tables and where they come from
//! - [`render`] - sheet geometry and document renderers
//! - [`session`] - state of one label-making interaction
//! - [`config`] - project and global configuration
//!
//! ## Example
//!
//! ```no_run
//! use etiquetas::config::Config;
//! use etiquetas::domain::FormField;
//! use etiquetas::session::Session;
//!
//! let config = Config::load().expect("Failed to load config");
//! let source = config.reference_source(None);
//! let mut session = Session::open(source.as_ref(), config.labels.to_rules(), &mut |_| {})
//!     .expect("Failed to load reference tables");
//!
//! session.set(FormField::Product, "Merluza");
//! session.set(FormField::Form, "Filete");
//! session.set(FormField::State, "Congelado");
//!
//! match session.submit(chrono::Local::now().date_naive()) {
//!     Ok(label) => println!("{}", label.commercial_name),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod config;
pub mod domain;
pub mod label;
pub mod reference;
pub mod render;
pub mod session;
pub mod ui;

/// Default path constants for the etiquetas directory structure.
pub mod paths {
    /// Project directory: `.etiquetas`
    pub const PROJECT_DIR: &str = ".etiquetas";
    /// Project configuration: `.etiquetas/config.md`
    pub const CONFIG_FILE: &str = ".etiquetas/config.md";
    /// Custom label templates: `.etiquetas/templates`
    pub const TEMPLATES_DIR: &str = ".etiquetas/templates";
}

/// Today's date in local time, the bound for expiry dates.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
