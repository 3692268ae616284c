//! Reference tables and their typed rows.

use serde::Serialize;
use std::fmt;

use super::csv::CsvTable;
use super::ReferenceError;
use crate::domain::{Gender, TracesEntry};

/// A named tab of the reference spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Products,
    ProcessingForms,
    ProductStates,
    ProductionMethods,
    FaoZones,
    FishingGear,
    Distributors,
    Traces,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::Products,
        Table::ProcessingForms,
        Table::ProductStates,
        Table::ProductionMethods,
        Table::FaoZones,
        Table::FishingGear,
        Table::Distributors,
        Table::Traces,
    ];

    /// Sheet (tab) name in the spreadsheet; also the CSV file stem.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Table::Products => "PRODUCTOS",
            Table::ProcessingForms => "FORMAS_TRANSFORMACION",
            Table::ProductStates => "ESTADOS_PRODUCTO",
            Table::ProductionMethods => "METODO_PRODUCCION",
            Table::FaoZones => "ZONAS_FAO",
            Table::FishingGear => "ARTES_PESCA",
            Table::Distributors => "EXPEDIDORES",
            Table::Traces => "TRAZAS_CONFIG",
        }
    }

    /// Parse a sheet name case-insensitively.
    pub fn from_sheet_name(name: &str) -> Option<Table> {
        let name = name.trim().to_uppercase();
        Table::ALL.into_iter().find(|t| t.sheet_name() == name)
    }

    /// Tables that are plain option lists read from their first column
    pub fn is_option_list(self) -> bool {
        matches!(
            self,
            Table::ProcessingForms
                | Table::ProductStates
                | Table::ProductionMethods
                | Table::FaoZones
                | Table::FishingGear
        )
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

pub mod columns {
    pub const BASE_NAME: &str = "NOMBRE_BASE";
    pub const SCIENTIFIC_NAME: &str = "NOMBRE_CIENTIFICO";
    pub const INGREDIENTS: &str = "INGREDIENTES";
    pub const ALLERGENS: &str = "ALERGENOS";
    pub const GENDER: &str = "GENERO";
    pub const DISTRIBUTOR: &str = "EXPEDIDOR";
    pub const SANITARY_OVAL: &str = "OVALO_SANITARIO";
    pub const CONTAINS: &str = "CONTIENE";
    pub const MAY_CONTAIN: &str = "PUEDE_CONTENER";
}

/// A species row from PRODUCTOS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub base_name: String,
    pub scientific_name: String,
    pub ingredients: Option<String>,
    pub allergen: String,
    /// Gender given by the sheet, if it has a GENERO column with a value
    pub gender: Option<Gender>,
}

/// A row from EXPEDIDORES
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distributor {
    pub name: String,
    pub sanitary_oval: String,
}

fn require_column(table: Table, csv: &CsvTable, name: &str) -> Result<usize, ReferenceError> {
    csv.column(name).ok_or_else(|| ReferenceError::MissingColumn {
        table,
        column: name.to_string(),
    })
}

pub(crate) fn parse_products(csv: &CsvTable) -> Result<Vec<Product>, ReferenceError> {
    let table = Table::Products;
    let base = require_column(table, csv, columns::BASE_NAME)?;
    let scientific = require_column(table, csv, columns::SCIENTIFIC_NAME)?;
    let allergens = require_column(table, csv, columns::ALLERGENS)?;
    let ingredients = csv.column(columns::INGREDIENTS);
    let gender = csv.column(columns::GENDER);

    let mut products: Vec<Product> = Vec::new();
    for row in 0..csv.rows.len() {
        let base_name = csv.cell(row, base);
        // Blank names are dropped and the first row per name wins.
        if base_name.is_empty() || products.iter().any(|p| p.base_name == base_name) {
            continue;
        }
        products.push(Product {
            base_name: base_name.to_string(),
            scientific_name: csv.cell(row, scientific).to_string(),
            ingredients: ingredients
                .map(|col| csv.cell(row, col))
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            allergen: csv.cell(row, allergens).to_string(),
            gender: gender.and_then(|col| Gender::from_marker(csv.cell(row, col))),
        });
    }
    Ok(products)
}

pub(crate) fn parse_distributors(csv: &CsvTable) -> Result<Vec<Distributor>, ReferenceError> {
    let table = Table::Distributors;
    let name = require_column(table, csv, columns::DISTRIBUTOR)?;
    let oval = require_column(table, csv, columns::SANITARY_OVAL)?;

    let mut distributors: Vec<Distributor> = Vec::new();
    for row in 0..csv.rows.len() {
        let distributor = csv.cell(row, name);
        if distributor.is_empty() || distributors.iter().any(|d| d.name == distributor) {
            continue;
        }
        distributors.push(Distributor {
            name: distributor.to_string(),
            sanitary_oval: csv.cell(row, oval).to_string(),
        });
    }
    Ok(distributors)
}

pub(crate) fn parse_traces(csv: &CsvTable) -> Result<Vec<TracesEntry>, ReferenceError> {
    let table = Table::Traces;
    let contains = require_column(table, csv, columns::CONTAINS)?;
    let may_contain = require_column(table, csv, columns::MAY_CONTAIN)?;

    Ok((0..csv.rows.len())
        .map(|row| TracesEntry::new(csv.cell(row, contains), csv.cell(row, may_contain)))
        .collect())
}

/// Option lists come from the first column whatever its header says.
pub(crate) fn parse_options(table: Table, csv: &CsvTable) -> Result<Vec<String>, ReferenceError> {
    if csv.headers.is_empty() {
        return Err(ReferenceError::Empty { table });
    }
    Ok(csv.unique_values(0))
}
