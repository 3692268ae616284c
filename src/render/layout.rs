//! Label sheet geometry.
//!
//! Labels are fixed-size rectangles tiled left to right, top to bottom on a
//! fixed page, with a new page once a page is full. All lengths are in
//! millimetres.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    #[serde(default = "default_page_width")]
    pub page_width_mm: f64,
    #[serde(default = "default_page_height")]
    pub page_height_mm: f64,
    #[serde(default = "default_label_width")]
    pub label_width_mm: f64,
    #[serde(default = "default_label_height")]
    pub label_height_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_mm: f64,
    #[serde(default = "default_gap")]
    pub gap_mm: f64,
}

fn default_page_width() -> f64 {
    210.0
}
fn default_page_height() -> f64 {
    297.0
}
fn default_label_width() -> f64 {
    90.0
}
fn default_label_height() -> f64 {
    60.0
}
fn default_margin() -> f64 {
    10.0
}
fn default_gap() -> f64 {
    5.0
}

impl Default for SheetLayout {
    /// A4 portrait, 90 × 60 mm labels: 2 columns × 4 rows
    fn default() -> Self {
        Self {
            page_width_mm: default_page_width(),
            page_height_mm: default_page_height(),
            label_width_mm: default_label_width(),
            label_height_mm: default_label_height(),
            margin_mm: default_margin(),
            gap_mm: default_gap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A dimension is zero, negative or not a number
    InvalidDimension(&'static str),
    /// Not even one label fits inside the margins
    LabelTooLarge {
        label: (f64, f64),
        printable: (f64, f64),
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::InvalidDimension(name) => {
                write!(f, "layout.{} must be a positive number", name)
            }
            LayoutError::LabelTooLarge { label, printable } => write!(
                f,
                "A {} × {} mm label does not fit the {} × {} mm printable area",
                label.0, label.1, printable.0, printable.1
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Where one copy of the label lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Zero-based page index
    pub page: usize,
    pub column: usize,
    pub row: usize,
    pub x_mm: f64,
    pub y_mm: f64,
}

impl SheetLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let dims = [
            ("page_width_mm", self.page_width_mm, false),
            ("page_height_mm", self.page_height_mm, false),
            ("label_width_mm", self.label_width_mm, false),
            ("label_height_mm", self.label_height_mm, false),
            ("margin_mm", self.margin_mm, true),
            ("gap_mm", self.gap_mm, true),
        ];
        for (name, value, zero_ok) in dims {
            let ok = value.is_finite() && (value > 0.0 || (zero_ok && value == 0.0));
            if !ok {
                return Err(LayoutError::InvalidDimension(name));
            }
        }

        if self.columns() == 0 || self.rows() == 0 {
            return Err(LayoutError::LabelTooLarge {
                label: (self.label_width_mm, self.label_height_mm),
                printable: self.printable_area(),
            });
        }
        Ok(())
    }

    fn printable_area(&self) -> (f64, f64) {
        (
            self.page_width_mm - 2.0 * self.margin_mm,
            self.page_height_mm - 2.0 * self.margin_mm,
        )
    }

    fn fit(available: f64, size: f64, gap: f64) -> usize {
        if available < size {
            return 0;
        }
        // n labels take n*size + (n-1)*gap
        ((available + gap) / (size + gap)).floor() as usize
    }

    pub fn columns(&self) -> usize {
        Self::fit(self.printable_area().0, self.label_width_mm, self.gap_mm)
    }

    pub fn rows(&self) -> usize {
        Self::fit(self.printable_area().1, self.label_height_mm, self.gap_mm)
    }

    pub fn per_page(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Number of pages needed for `copies` labels.
    pub fn pages(&self, copies: usize) -> Result<usize, LayoutError> {
        self.validate()?;
        Ok(copies.div_ceil(self.per_page()))
    }

    /// Position of every copy, in print order.
    pub fn placements(&self, copies: usize) -> Result<Vec<Placement>, LayoutError> {
        self.validate()?;
        let columns = self.columns();
        let per_page = self.per_page();

        Ok((0..copies)
            .map(|i| {
                let slot = i % per_page;
                let column = slot % columns;
                let row = slot / columns;
                Placement {
                    page: i / per_page,
                    column,
                    row,
                    x_mm: self.margin_mm + column as f64 * (self.label_width_mm + self.gap_mm),
                    y_mm: self.margin_mm + row as f64 * (self.label_height_mm + self.gap_mm),
                }
            })
            .collect())
    }
}
