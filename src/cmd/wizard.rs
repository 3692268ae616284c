//! `etiquetas wizard`: interactive label entry.
//!
//! Asks for each field in form order, skipping the catch details for
//! aquaculture and the dates the chosen state does not need.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use std::path::Path;

use etiquetas::domain::{parse_date, FormField, ProductState, ProductionMethod};
use etiquetas::reference::Table;
use etiquetas::render::TextRenderer;
use etiquetas::session::Session;
use etiquetas::ui::{self, colors};

use super::generate::{report_label_error, write_document};
use crate::cli::OutputArgs;

pub fn cmd_wizard(data_dir: Option<&Path>, output: &OutputArgs) -> Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!(
            "The wizard needs an interactive terminal. Use {} with flags instead.",
            "etiquetas generate".cyan()
        );
    }

    let config = super::load_config()?;
    let mut session = super::open_session(&config, data_dir)?;

    loop {
        fill_selection(&mut session)?;

        match session.submit(etiquetas::today()) {
            Ok(label) => {
                println!();
                println!("{}", colors::heading("Etiqueta"));
                println!("{}", ui::format::separator(40));
                print!("{}", TextRenderer::summary(label));
                println!("{}", ui::format::separator(40));
            }
            Err(e) => {
                report_label_error(&e);
                let again = Confirm::new()
                    .with_prompt("Start over?")
                    .default(true)
                    .interact()?;
                if again {
                    continue;
                }
                std::process::exit(1);
            }
        }

        let write = Confirm::new()
            .with_prompt("Write this label?")
            .default(true)
            .interact()?;
        if !write {
            println!("{}", "Nothing written.".yellow());
            return Ok(());
        }

        let path = write_document(&config, &session, output)?;
        ui::success(&format!(
            "Label written to {}",
            colors::identifier(&path.display().to_string())
        ));
        return Ok(());
    }
}

fn fill_selection(session: &mut Session) -> Result<()> {
    choose(session, FormField::Product, Table::Products)?;
    choose(session, FormField::Form, Table::ProcessingForms)?;
    choose(session, FormField::State, Table::ProductStates)?;
    choose(session, FormField::Method, Table::ProductionMethods)?;

    if ProductionMethod::from_label(&session.selection.method).needs_catch_details() {
        choose(session, FormField::Zone, Table::FaoZones)?;
        choose(session, FormField::Gear, Table::FishingGear)?;
    } else {
        session.set(FormField::Zone, "");
        session.set(FormField::Gear, "");
    }

    let lot: String = Input::new()
        .with_prompt(FormField::Lot.label())
        .with_initial_text(session.selection.lot.clone())
        .interact_text()?;
    session.set(FormField::Lot, lot);

    ask_date(session, FormField::ExpiryDate)?;
    let state = ProductState::from_label(&session.selection.state);
    if state.needs_freeze_date() {
        ask_date(session, FormField::FreezeDate)?;
    } else {
        session.set(FormField::FreezeDate, "");
    }
    if state.needs_thaw_date() {
        ask_date(session, FormField::ThawDate)?;
    } else {
        session.set(FormField::ThawDate, "");
    }

    choose(session, FormField::Distributor, Table::Distributors)?;
    let oval = session.selection.sanitary_oval.clone();
    println!(
        "  {} {}",
        colors::secondary(FormField::SanitaryOval.label()),
        oval
    );
    Ok(())
}

fn choose(session: &mut Session, field: FormField, table: Table) -> Result<()> {
    let options = session.reference().options(table);
    if options.is_empty() {
        ui::warn(&format!("Table {} has no options", table));
        return Ok(());
    }

    let current = options
        .iter()
        .position(|o| *o == session.selection_value(field))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt(field.label())
        .items(&options)
        .default(current)
        .interact()?;

    session.set(field, options[index].clone());
    Ok(())
}

fn ask_date(session: &mut Session, field: FormField) -> Result<()> {
    let value: String = Input::new()
        .with_prompt(format!("{} (dd/mm/aaaa)", field.label()))
        .with_initial_text(session.selection_value(field))
        .validate_with(|input: &String| -> Result<(), String> {
            if parse_date(input).is_some() {
                Ok(())
            } else {
                Err(format!("'{}' is not a date", input.trim()))
            }
        })
        .interact_text()?;
    session.set(field, value);
    Ok(())
}
