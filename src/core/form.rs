//! Edit buffers and their submission rules
//!
//! A [`Form`] is the editable shape of one entity: text inputs are kept as
//! raw strings (numbers included) and the status as its enum. A
//! [`FormController`] owns one buffer, knows whether it edits an existing
//! record or adds a new one, and turns a submit into a new
//! [`Collection`](crate::core::store::Collection) or an error.

use crate::core::entity::Entity;
use crate::core::error::{DeskError, ValidationError};
use crate::core::number::NumberFormat;
use crate::core::store::Collection;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Editable fields of one entity type
pub trait Form: Default + Clone + std::fmt::Debug + Serialize + Send + Sync + 'static {
    type Record: Entity;

    /// Literal notice shown when required fields are missing
    const REQUIRED_MESSAGE: &'static str;

    /// Seed a buffer from an existing record
    fn from_record(record: &Self::Record, numbers: &NumberFormat) -> Self;

    /// Copy with every text field trimmed
    fn trimmed(&self) -> Self;

    /// Required fields that are empty, checked on a trimmed buffer
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Build the record to store. `previous` is the record being edited,
    /// `None` when adding. The id is assigned by the store.
    fn build(&self, previous: Option<&Self::Record>) -> Self::Record;

    /// Rewrite numeric inputs as `format(parse(input))`
    fn reformat_numbers(&mut self, _numbers: &NumberFormat) {}

    fn created_notice(record: &Self::Record) -> String;

    fn updated_notice(record: &Self::Record) -> String;

    fn deleted_notice(record: &Self::Record) -> String;

    /// Question asked before deleting
    fn delete_prompt(record: &Self::Record) -> String;

    /// Trim and check required fields
    fn validate(&self) -> Result<Self, ValidationError> {
        let trimmed = self.trimmed();
        let missing = trimmed.missing_fields();

        if missing.is_empty() {
            Ok(trimmed)
        } else {
            Err(ValidationError::MissingFields {
                entity_type: <Self::Record as Entity>::resource_name_singular(),
                fields: missing,
                message: Self::REQUIRED_MESSAGE,
            })
        }
    }
}

/// What a submit writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(u64),
}

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct Submitted<T> {
    /// The collection after the write
    pub records: Collection<T>,
    /// The stored record; `None` when the edited id no longer exists
    pub record: Option<T>,
}

/// One buffered copy of an entity's editable fields
#[derive(Debug, Clone)]
pub struct FormController<F: Form> {
    buffer: F,
    mode: FormMode,
}

impl<F: Form> Default for FormController<F> {
    fn default() -> Self {
        Self {
            buffer: F::default(),
            mode: FormMode::Add,
        }
    }
}

impl<F: Form> FormController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the buffer to defaults for a new record
    pub fn open_for_add(&mut self) {
        self.buffer = F::default();
        self.mode = FormMode::Add;
    }

    /// Seed the buffer from `record`
    pub fn open_for_edit(&mut self, record: &F::Record, numbers: &NumberFormat) {
        self.buffer = F::from_record(record, numbers);
        self.mode = FormMode::Edit(record.id());
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn buffer(&self) -> &F {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut F {
        &mut self.buffer
    }

    /// On-blur normalisation of numeric inputs
    pub fn reformat_numbers(&mut self, numbers: &NumberFormat) {
        self.buffer.reformat_numbers(numbers);
    }

    /// Validate the buffer and write it into `records`.
    ///
    /// On error nothing is written. Editing an id that has disappeared is a
    /// no-op returning the unchanged collection.
    pub fn submit(&self, records: &Collection<F::Record>) -> Result<Submitted<F::Record>, DeskError> {
        self.submit_as(self.mode, records)
    }

    /// Like [`submit`](Self::submit) but with an explicit target
    pub fn submit_as(
        &self,
        mode: FormMode,
        records: &Collection<F::Record>,
    ) -> Result<Submitted<F::Record>, DeskError> {
        let form = self.buffer.validate()?;

        match mode {
            FormMode::Add => {
                let (records, record) = records.add(form.build(None))?;
                Ok(Submitted {
                    records,
                    record: Some(record),
                })
            }
            FormMode::Edit(id) => {
                let Some(previous) = records.get(id) else {
                    return Ok(Submitted {
                        records: records.clone(),
                        record: None,
                    });
                };

                let record = form.build(Some(previous));
                let records = records.replace(id, record);
                let record = records.get(id).cloned();

                Ok(Submitted { records, record })
            }
        }
    }
}

/// Deserialize a text input that may arrive as a JSON string, number or null
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

/// Deserialize a request body, reporting serde errors as an invalid `body`
pub fn from_json<T: DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|err| ValidationError::InvalidValue {
        field: "body".to_string(),
        value: err.to_string(),
    })
}

/// Overlay the fields present in `patch` on `base`.
///
/// `patch` must be a JSON object; omitted fields keep the value from `base`.
pub fn merge_json<T>(base: &T, patch: Value) -> Result<T, ValidationError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = patch else {
        return Err(ValidationError::InvalidValue {
            field: "body".to_string(),
            value: patch.to_string(),
        });
    };

    let mut merged = match serde_json::to_value(base) {
        Ok(Value::Object(fields)) => fields,
        _ => serde_json::Map::new(),
    };
    merged.extend(patch);

    from_json(Value::Object(merged))
}
