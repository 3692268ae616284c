//! Reference data: the spreadsheet tabs the label options come from.
//!
//! All tables are fetched once per session through a [`ReferenceSource`]
//! and kept in a [`ReferenceData`] value that the rest of the session
//! borrows.

pub mod csv;
pub mod source;
pub mod tables;

use std::fmt;

use crate::domain::TracesEntry;

pub use source::{DirSource, ReferenceSource, SheetSource};
pub use tables::{Distributor, Product, Table};

use self::csv::CsvTable;

#[derive(Debug)]
pub enum ReferenceError {
    /// The source could not be reached or answered with an error
    Fetch { table: Table, message: String },
    /// A local CSV file could not be read
    Io {
        table: Table,
        path: String,
        source: std::io::Error,
    },
    MissingColumn { table: Table, column: String },
    Empty { table: Table },
    /// The source configuration has no entry for a table
    Unconfigured { table: Table },
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::Fetch { table, message } => {
                write!(f, "Failed to fetch table {}: {}", table, message)
            }
            ReferenceError::Io { table, path, source } => {
                write!(f, "Failed to read table {} from {}: {}", table, path, source)
            }
            ReferenceError::MissingColumn { table, column } => {
                write!(f, "Table {} must have a column {}", table, column)
            }
            ReferenceError::Empty { table } => write!(f, "Table {} is empty", table),
            ReferenceError::Unconfigured { table } => {
                write!(f, "No sheet id (gid) configured for table {}", table)
            }
        }
    }
}

impl std::error::Error for ReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Every reference table, parsed and ready for lookups
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub products: Vec<Product>,
    pub forms: Vec<String>,
    pub states: Vec<String>,
    pub methods: Vec<String>,
    pub zones: Vec<String>,
    pub gears: Vec<String>,
    pub distributors: Vec<Distributor>,
    pub traces: Vec<TracesEntry>,
}

impl ReferenceData {
    /// Fetch and parse all tables from `source`, one request per table.
    ///
    /// `on_table` is called after each table is loaded (progress display).
    /// The first failure aborts the load.
    pub fn load(
        source: &dyn ReferenceSource,
        on_table: &mut dyn FnMut(Table),
    ) -> Result<Self, ReferenceError> {
        let mut data = ReferenceData::default();
        for table in Table::ALL {
            let text = source.fetch(table)?;
            data.insert(table, &text)?;
            on_table(table);
        }
        Ok(data)
    }

    /// Parse `text` as the CSV export of `table` and store it.
    pub fn insert(&mut self, table: Table, text: &str) -> Result<(), ReferenceError> {
        let csv = CsvTable::parse(text);
        match table {
            Table::Products => self.products = tables::parse_products(&csv)?,
            Table::Distributors => self.distributors = tables::parse_distributors(&csv)?,
            Table::Traces => self.traces = tables::parse_traces(&csv)?,
            Table::ProcessingForms => self.forms = tables::parse_options(table, &csv)?,
            Table::ProductStates => self.states = tables::parse_options(table, &csv)?,
            Table::ProductionMethods => self.methods = tables::parse_options(table, &csv)?,
            Table::FaoZones => self.zones = tables::parse_options(table, &csv)?,
            Table::FishingGear => self.gears = tables::parse_options(table, &csv)?,
        }
        Ok(())
    }

    /// Find a product by exact base name.
    pub fn product(&self, base_name: &str) -> Option<&Product> {
        let base_name = base_name.trim();
        self.products.iter().find(|p| p.base_name == base_name)
    }

    pub fn distributor(&self, name: &str) -> Option<&Distributor> {
        let name = name.trim();
        self.distributors.iter().find(|d| d.name == name)
    }

    /// Selectable values of a table, as a form would list them.
    pub fn options(&self, table: Table) -> Vec<String> {
        match table {
            Table::Products => self.products.iter().map(|p| p.base_name.clone()).collect(),
            Table::ProcessingForms => self.forms.clone(),
            Table::ProductStates => self.states.clone(),
            Table::ProductionMethods => self.methods.clone(),
            Table::FaoZones => self.zones.clone(),
            Table::FishingGear => self.gears.clone(),
            Table::Distributors => self.distributors.iter().map(|d| d.name.clone()).collect(),
            Table::Traces => self.traces.iter().map(|t| t.contains.clone()).collect(),
        }
    }
}
