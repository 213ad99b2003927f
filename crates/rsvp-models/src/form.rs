//! Event form input and its validation.
//!
//! Validation happens at the boundary: front ends turn an [`EventForm`]
//! into an [`EventDraft`] with [`EventForm::validate`] before handing it to
//! the store, which never validates on its own.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{parse_event_date, Category};

/// Raw event form as submitted by a user.
///
/// Missing fields deserialize to empty values so that they are reported by
/// validation instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// Date as entered, see [`parse_event_date`] for accepted formats.
    pub date: String,
    pub location: String,
    pub category: Category,
}

/// A validated form, ready to become an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub category: Category,
}

/// Partial update of an event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub category: Option<Category>,
}

impl EventPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.category.is_none()
    }
}

impl From<EventDraft> for EventPatch {
    fn from(draft: EventDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            date: Some(draft.date),
            location: Some(draft.location),
            category: Some(draft.category),
        }
    }
}

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Description,
    Date,
    Location,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Date => "date",
            FormField::Location => "location",
        };
        f.pad(name)
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All validation failures of a form, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event: {}", summary(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the message for `field`, if it failed.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl EventForm {
    /// Checks every field and converts the form into a draft.
    ///
    /// Text fields must be non-blank and the date must parse and must not be
    /// before `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<EventDraft, ValidationErrors> {
        let mut errors = Vec::new();
        let mut push = |field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if self.title.trim().is_empty() {
            push(FormField::Title, "Title is required");
        }
        if self.description.trim().is_empty() {
            push(FormField::Description, "Description is required");
        }

        let date = if self.date.trim().is_empty() {
            push(FormField::Date, "Date is required");
            None
        } else {
            match parse_event_date(&self.date) {
                Some(date) if date < today => {
                    push(FormField::Date, "Date cannot be in the past");
                    None
                }
                Some(date) => Some(date),
                None => {
                    push(FormField::Date, "Date must be a valid date (YYYY-MM-DD)");
                    None
                }
            }
        };

        if self.location.trim().is_empty() {
            push(FormField::Location, "Location is required");
        }

        match date {
            Some(date) if errors.is_empty() => Ok(EventDraft {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                date,
                location: self.location.trim().to_string(),
                category: self.category,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}
