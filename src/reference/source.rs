//! Where reference tables come from.
//!
//! Supports a published spreadsheet (CSV export over HTTP) and a local
//! directory of CSV files named after each sheet.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};
use url::Url;

use super::{ReferenceError, Table};

/// Trait for reference data sources
pub trait ReferenceSource {
    /// Return the CSV text of `table`.
    fn fetch(&self, table: Table) -> Result<String, ReferenceError>;

    /// Human-readable origin, for messages
    fn describe(&self) -> String;
}

/// Spreadsheet export endpoint
const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d/";

/// Published spreadsheet, one tab per table, addressed by gid
pub struct SheetSource {
    pub spreadsheet_id: String,
    pub gids: HashMap<String, String>,
    agent: Agent,
}

impl SheetSource {
    pub fn new(spreadsheet_id: &str, gids: HashMap<String, String>, timeout: Duration) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            gids,
            agent: AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// CSV export URL of `table`.
    pub fn export_url(&self, table: Table) -> Result<Url, ReferenceError> {
        let gid = self
            .gids
            .iter()
            .find(|(name, _)| Table::from_sheet_name(name) == Some(table))
            .map(|(_, gid)| gid.trim())
            .filter(|gid| !gid.is_empty())
            .ok_or(ReferenceError::Unconfigured { table })?;

        let mut url = Url::parse(EXPORT_BASE)
            .and_then(|base| base.join(&format!("{}/export", self.spreadsheet_id)))
            .map_err(|e| ReferenceError::Fetch {
                table,
                message: format!("invalid spreadsheet id '{}': {}", self.spreadsheet_id, e),
            })?;
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("gid", gid);
        Ok(url)
    }
}

impl ReferenceSource for SheetSource {
    fn fetch(&self, table: Table) -> Result<String, ReferenceError> {
        let url = self.export_url(table)?;

        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| ReferenceError::Fetch {
                table,
                message: match e {
                    ureq::Error::Status(code, _) => format!("HTTP {} from {}", code, url),
                    other => other.to_string(),
                },
            })?;

        response.into_string().map_err(|e| ReferenceError::Fetch {
            table,
            message: format!("unreadable response body: {}", e),
        })
    }

    fn describe(&self) -> String {
        format!("spreadsheet {}", self.spreadsheet_id)
    }
}

/// Directory holding `PRODUCTOS.csv`, `ZONAS_FAO.csv`, ...
pub struct DirSource {
    pub dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.dir.join(format!("{}.csv", table.sheet_name()))
    }
}

impl ReferenceSource for DirSource {
    fn fetch(&self, table: Table) -> Result<String, ReferenceError> {
        let path = self.path_for(table);
        fs::read_to_string(&path).map_err(|source| ReferenceError::Io {
            table,
            path: path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}
