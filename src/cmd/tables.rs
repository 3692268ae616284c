//! `etiquetas tables`: show what the reference tables offer.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use etiquetas::reference::{ReferenceData, Table};
use etiquetas::ui::colors;

pub fn cmd_tables(data_dir: Option<&Path>, table: Option<&str>) -> Result<()> {
    let tables: Vec<Table> = match table {
        Some(name) => match Table::from_sheet_name(name) {
            Some(table) => vec![table],
            None => anyhow::bail!(
                "Unknown table '{}'. Known tables: {}",
                name,
                Table::ALL
                    .iter()
                    .map(|t| t.sheet_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        None => Table::ALL.to_vec(),
    };

    let config = super::load_config()?;
    let session = super::open_session(&config, data_dir)?;

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_table(session.reference(), *table);
    }
    Ok(())
}

fn print_table(reference: &ReferenceData, table: Table) {
    let options = reference.options(table);
    println!(
        "{} {}",
        colors::heading(table.sheet_name()),
        colors::secondary(&format!("({})", options.len()))
    );

    match table {
        Table::Products => {
            for product in &reference.products {
                println!(
                    "  {} {} {}",
                    "•".cyan(),
                    product.base_name,
                    colors::secondary(&product.scientific_name).italic()
                );
            }
        }
        Table::Distributors => {
            for distributor in &reference.distributors {
                println!(
                    "  {} {} {}",
                    "•".cyan(),
                    distributor.name,
                    colors::secondary(&distributor.sanitary_oval)
                );
            }
        }
        Table::Traces => {
            for entry in &reference.traces {
                println!(
                    "  {} {} → {}",
                    "•".cyan(),
                    entry.contains,
                    if entry.may_contain.is_empty() {
                        colors::secondary("-")
                    } else {
                        entry.may_contain.normal()
                    }
                );
            }
        }
        _ => {
            for option in options {
                println!("  {} {}", "•".cyan(), option);
            }
        }
    }
}
