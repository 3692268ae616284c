//! Product state classification and the storage notice it implies.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOTICE_CHILLED: &str = "Conservar entre 0 y 4 °C.";
pub const NOTICE_FROZEN: &str = "Una vez descongelado, no volver a congelar. Conservar a -18 °C.";
pub const NOTICE_THAWED: &str = "Producto descongelado. No volver a congelar. Conservar a -18 °C.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductState {
    Fresh,
    Frozen,
    Thawed,
}

impl ProductState {
    /// Classify a free-text state from the reference list.
    ///
    /// Case-insensitive substring test. "descongel" is checked before
    /// "congel" since every thawed label also contains the frozen stem.
    /// Anything else is fresh.
    pub fn from_label(state: &str) -> Self {
        let state = state.to_lowercase();
        if state.contains("descongel") {
            ProductState::Thawed
        } else if state.contains("congel") {
            ProductState::Frozen
        } else {
            ProductState::Fresh
        }
    }

    /// A freeze date is printed for frozen and thawed products
    pub fn needs_freeze_date(self) -> bool {
        matches!(self, ProductState::Frozen | ProductState::Thawed)
    }

    pub fn needs_thaw_date(self) -> bool {
        self == ProductState::Thawed
    }

    pub fn notice(self) -> &'static str {
        match self {
            ProductState::Fresh => NOTICE_CHILLED,
            ProductState::Frozen => NOTICE_FROZEN,
            ProductState::Thawed => NOTICE_THAWED,
        }
    }
}

impl fmt::Display for ProductState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductState::Fresh => write!(f, "fresh"),
            ProductState::Frozen => write!(f, "frozen"),
            ProductState::Thawed => write!(f, "thawed"),
        }
    }
}

/// Storage notice for a raw state string.
pub fn conservation_notice(state: &str) -> &'static str {
    ProductState::from_label(state).notice()
}
