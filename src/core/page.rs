//! Page-level state for one entity type
//!
//! A [`Page`] is what a management screen binds to: the current
//! collection, the search query and status tab, the view/edit/add dialog
//! flags, the selected record and the form buffer. Every mutation swaps in
//! a new [`Collection`] and reports a literal [`Notice`].

use crate::core::entity::Entity;
use crate::core::error::DeskError;
use crate::core::form::{Form, FormController, FormMode, Submitted};
use crate::core::notify::{Confirmer, Notice, Notifier};
use crate::core::number::NumberFormat;
use crate::core::query;
use crate::core::store::Collection;
use std::sync::Arc;

/// The three modal dialogs a page can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    View,
    Edit,
    Add,
}

/// Independent visibility flags, one per dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub view: bool,
    pub edit: bool,
    pub add: bool,
}

impl Dialogs {
    pub fn is_open(&self, dialog: Dialog) -> bool {
        match dialog {
            Dialog::View => self.view,
            Dialog::Edit => self.edit,
            Dialog::Add => self.add,
        }
    }

    fn set(&mut self, dialog: Dialog, open: bool) {
        match dialog {
            Dialog::View => self.view = open,
            Dialog::Edit => self.edit = open,
            Dialog::Add => self.add = open,
        }
    }
}

/// What a save or delete did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The collection changed; carries the affected record
    Applied(T),
    /// Nothing to do (no selection, missing id, declined prompt)
    Unchanged,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Management page state for the entity edited by `F`
pub struct Page<F: Form> {
    records: Collection<F::Record>,
    query: String,
    status_filter: Option<<F::Record as Entity>::Status>,
    selected: Option<F::Record>,
    dialogs: Dialogs,
    form: FormController<F>,
    numbers: NumberFormat,
    notifier: Arc<dyn Notifier>,
}

impl<F: Form> Page<F> {
    pub fn new(records: Collection<F::Record>, numbers: NumberFormat, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            records,
            query: String::new(),
            status_filter: None,
            selected: None,
            dialogs: Dialogs::default(),
            form: FormController::new(),
            numbers,
            notifier,
        }
    }

    /// The full collection
    pub fn records(&self) -> &Collection<F::Record> {
        &self.records
    }

    /// Records shown under the current query and status tab
    pub fn visible(&self) -> Vec<F::Record> {
        query::filter_by_status(self.records.as_slice(), &self.query, self.status_filter)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status_filter(&self) -> Option<<F::Record as Entity>::Status> {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, status: Option<<F::Record as Entity>::Status>) {
        self.status_filter = status;
    }

    pub fn dialogs(&self) -> Dialogs {
        self.dialogs
    }

    pub fn selected(&self) -> Option<&F::Record> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &F {
        self.form.buffer()
    }

    pub fn form_mut(&mut self) -> &mut F {
        self.form.buffer_mut()
    }

    /// Show a record read-only. Returns false when `id` is unknown.
    pub fn open_view(&mut self, id: u64) -> bool {
        let Some(record) = self.records.get(id).cloned() else {
            return false;
        };
        self.selected = Some(record);
        self.dialogs.set(Dialog::View, true);
        true
    }

    /// Select a record and seed the form from it. Returns false when `id`
    /// is unknown.
    pub fn open_edit(&mut self, id: u64) -> bool {
        let Some(record) = self.records.get(id).cloned() else {
            return false;
        };
        self.form.open_for_edit(&record, &self.numbers);
        self.selected = Some(record);
        self.dialogs.set(Dialog::Edit, true);
        true
    }

    /// Clear the selection and reset the form to defaults
    pub fn open_add(&mut self) {
        self.selected = None;
        self.form.open_for_add();
        self.dialogs.set(Dialog::Add, true);
    }

    /// Cancel or dismiss a dialog
    pub fn close(&mut self, dialog: Dialog) {
        self.dialogs.set(dialog, false);
    }

    /// On-blur normalisation of the form's numeric inputs
    pub fn reformat_numbers(&mut self) {
        self.form.reformat_numbers(&self.numbers);
    }

    /// Submit the edit form for the selected record
    pub fn save_edit(&mut self) -> Result<Outcome<F::Record>, DeskError> {
        let Some(id) = self.selected.as_ref().map(|record| record.id()) else {
            return Ok(Outcome::Unchanged);
        };

        let submitted = self.submit(FormMode::Edit(id))?;
        self.records = submitted.records;
        self.dialogs.set(Dialog::Edit, false);

        match submitted.record {
            Some(record) => {
                self.notifier.notify(Notice::success(F::updated_notice(&record)));
                self.selected = Some(record.clone());
                Ok(Outcome::Applied(record))
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    /// Submit the add form
    pub fn save_add(&mut self) -> Result<Outcome<F::Record>, DeskError> {
        let submitted = self.submit(FormMode::Add)?;
        self.records = submitted.records;
        self.dialogs.set(Dialog::Add, false);

        match submitted.record {
            Some(record) => {
                self.notifier.notify(Notice::success(F::created_notice(&record)));
                self.form.open_for_add();
                Ok(Outcome::Applied(record))
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    /// Delete `id` after `confirmer` agrees.
    ///
    /// Deleting the selected record also closes the view and edit dialogs
    /// showing it.
    pub fn delete(&mut self, id: u64, confirmer: &dyn Confirmer) -> Outcome<F::Record> {
        let Some(record) = self.records.get(id).cloned() else {
            return Outcome::Unchanged;
        };

        if !confirmer.confirm(&F::delete_prompt(&record)) {
            let entity = <F::Record as Entity>::resource_name_singular();
            tracing::debug!(entity, id, "delete declined");
            return Outcome::Unchanged;
        }

        self.records = self.records.remove(id);
        if self.selected.as_ref().is_some_and(|selected| selected.id() == id) {
            self.selected = None;
            self.dialogs.set(Dialog::View, false);
            self.dialogs.set(Dialog::Edit, false);
        }
        self.notifier.notify(Notice::success(F::deleted_notice(&record)));
        Outcome::Applied(record)
    }

    /// Swap in `records` produced by an entity-specific action and report
    /// `notice`. A selected record is refreshed from the new collection.
    pub fn commit(&mut self, records: Collection<F::Record>, notice: Notice) {
        if let Some(id) = self.selected.as_ref().map(|selected| selected.id()) {
            self.selected = records.get(id).cloned();
        }
        self.records = records;
        self.notifier.notify(notice);
    }

    fn submit(&self, mode: FormMode) -> Result<Submitted<F::Record>, DeskError> {
        self.form.submit_as(mode, &self.records).inspect_err(|err| {
            let entity = <F::Record as Entity>::resource_name_singular();
            tracing::warn!(entity, error = %err, "submit rejected");
            self.notifier.notify(Notice::error(err.message()));
        })
    }
}
