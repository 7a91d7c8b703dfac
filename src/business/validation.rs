use std::fmt;

use entity::response_plan;

pub const BLANK: &str = "can't be blank";
pub const NOT_INCLUDED: &str = "is not included in the list";
pub const NOT_A_NUMBER: &str = "is not a number";
pub const NOT_A_DATE: &str = "is not a valid date";
pub const TAKEN: &str = "has already been taken";
pub const SELF_APPROVAL: &str = "can not be the person who authored the plan";
pub const APPROVAL_TIME_MISSING: &str = "must be set in order to be approved";
pub const APPROVER_MISSING: &str = "cannot be set without an approver";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every rule violation found while validating a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded against one field.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self.is_empty() {
            true => Ok(()),
            false => Err(self),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|error| format!("{} {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&messages)
    }
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check the plan-level rules. Field parse errors are collected separately by the form.
pub fn validate_plan(plan: &response_plan::Model, errors: &mut ValidationErrors) {
    if plan.date_of_birth.is_none() {
        errors.add("date_of_birth", BLANK);
    }
    if is_blank(plan.first_name.as_deref()) {
        errors.add("first_name", BLANK);
    }
    if is_blank(plan.last_name.as_deref()) {
        errors.add("last_name", BLANK);
    }

    if plan.approver_id == Some(plan.author_id) {
        errors.add("approver", SELF_APPROVAL);
    }

    // approver and approved_at come as a pair
    if plan.approver_id.is_some() && plan.approved_at.is_none() {
        errors.add("approved_at", APPROVAL_TIME_MISSING);
    }
    if plan.approved_at.is_some() && plan.approver_id.is_none() {
        errors.add("approved_at", APPROVER_MISSING);
    }
}
