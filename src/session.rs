//! Per-session state of one label-making interaction.
//!
//! A session owns the reference tables (loaded once), the selection being
//! filled in and the last successfully derived label. Nothing here is
//! global: callers hand the session to whatever renders it.

use chrono::NaiveDate;

use crate::domain::FormField;
use crate::label::{derive_label, LabelError, LabelFields, LabelRules, LabelSelection};
use crate::reference::{ReferenceData, ReferenceError, ReferenceSource, Table};
use crate::render::{DocumentRenderer, RenderError, RenderedDocument};

#[derive(Debug, Clone)]
pub struct Session {
    reference: ReferenceData,
    rules: LabelRules,
    pub selection: LabelSelection,
    last_label: Option<LabelFields>,
}

impl Session {
    pub fn new(reference: ReferenceData, rules: LabelRules) -> Self {
        Self {
            reference,
            rules,
            selection: LabelSelection::default(),
            last_label: None,
        }
    }

    /// Load all reference tables from `source` and start a session.
    pub fn open(
        source: &dyn ReferenceSource,
        rules: LabelRules,
        on_table: &mut dyn FnMut(Table),
    ) -> Result<Self, ReferenceError> {
        let reference = ReferenceData::load(source, on_table)?;
        Ok(Self::new(reference, rules))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn rules(&self) -> &LabelRules {
        &self.rules
    }

    /// Set one field of the selection. Changing anything invalidates the
    /// last derived label.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let selection = &mut self.selection;
        match field {
            FormField::Product => selection.product = value,
            FormField::Form => selection.form = value,
            FormField::State => selection.state = value,
            FormField::Method => selection.method = value,
            FormField::Zone => selection.zone = value,
            FormField::Gear => selection.gear = value,
            FormField::Lot => selection.lot = value,
            FormField::ExpiryDate => selection.expiry_date = value,
            FormField::FreezeDate => selection.freeze_date = value,
            FormField::ThawDate => selection.thaw_date = value,
            FormField::Distributor => {
                selection.distributor = value;
                selection.attach_sanitary_oval(&self.reference);
            }
            // Derived from the distributor; typed values are ignored.
            FormField::SanitaryOval => selection.attach_sanitary_oval(&self.reference),
        }
        self.last_label = None;
    }

    /// Current value of one field of the selection.
    pub fn selection_value(&self, field: FormField) -> &str {
        let selection = &self.selection;
        match field {
            FormField::Product => &selection.product,
            FormField::Form => &selection.form,
            FormField::State => &selection.state,
            FormField::Method => &selection.method,
            FormField::Zone => &selection.zone,
            FormField::Gear => &selection.gear,
            FormField::Lot => &selection.lot,
            FormField::ExpiryDate => &selection.expiry_date,
            FormField::FreezeDate => &selection.freeze_date,
            FormField::ThawDate => &selection.thaw_date,
            FormField::Distributor => &selection.distributor,
            FormField::SanitaryOval => &selection.sanitary_oval,
        }
    }

    /// Replace the whole selection at once.
    pub fn load_selection(&mut self, selection: LabelSelection) {
        self.selection = selection;
        self.selection.attach_sanitary_oval(&self.reference);
        self.last_label = None;
    }

    /// Validate and derive the label for the current selection.
    pub fn submit(&mut self, today: NaiveDate) -> Result<&LabelFields, LabelError> {
        self.last_label = None;
        let label = derive_label(&self.selection, &self.reference, &self.rules, today)?;
        Ok(self.last_label.insert(label))
    }

    pub fn last_label(&self) -> Option<&LabelFields> {
        self.last_label.as_ref()
    }

    /// Render the last submitted label. Fails if nothing was submitted
    /// since the selection last changed.
    pub fn render(
        &self,
        renderer: &dyn DocumentRenderer,
        copies: usize,
    ) -> Result<RenderedDocument, RenderError> {
        let label = self.last_label.as_ref().ok_or(RenderError::NothingSubmitted)?;
        renderer.render(label, copies)
    }
}
