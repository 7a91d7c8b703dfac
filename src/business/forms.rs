//! Payloads accepted when creating or editing a response plan.
//!
//! Values arrive the way an edit form submits them: as strings, with blank meaning "clear".
//! A field missing from the payload leaves the stored value alone.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use entity::demographics::{Race, Sex};
use entity::response_plan;

use super::nested::{AliasFields, ContactFields, ImageFields, NestedFields, StrategyFields};
use super::validation::{is_blank, ValidationErrors, NOT_A_DATE, NOT_A_NUMBER, NOT_INCLUDED};

const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// One row of a nested child collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nested<T> {
    /// Existing child to update or destroy; new rows have none.
    #[serde(default, deserialize_with = "record_id")]
    pub id: Option<i32>,
    #[serde(default, rename = "_destroy", deserialize_with = "truthy")]
    pub destroy: bool,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Nested<T> {
    pub fn new(fields: T) -> Self {
        Nested {
            id: None,
            destroy: false,
            fields,
        }
    }

    pub fn existing(id: i32, fields: T) -> Self {
        Nested {
            id: Some(id),
            destroy: false,
            fields,
        }
    }

    pub fn marked_for_destruction(id: i32) -> Self
    where
        T: Default,
    {
        Nested {
            id: Some(id),
            destroy: true,
            fields: T::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    /// Full name, split into first and last name.
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<String>,
    pub race: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub height_in_inches: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub weight_in_pounds: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub date_of_birth: Option<String>,
    pub scars_and_marks: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub background_info: Option<String>,
    pub private_notes: Option<String>,
    /// Replaces the whole alias collection when given.
    pub alias_list: Option<Vec<String>>,
    pub aliases: Vec<Nested<AliasFields>>,
    pub contacts: Vec<Nested<ContactFields>>,
    pub images: Vec<Nested<ImageFields>>,
    pub response_strategies: Vec<Nested<StrategyFields>>,
}

impl PlanForm {
    /// Copy the submitted values onto `plan`, recording values that can't be parsed.
    pub fn apply(&self, plan: &mut response_plan::Model, errors: &mut ValidationErrors) {
        if let Some(name) = &self.name {
            plan.set_name(name);
        }

        assign_text(&mut plan.first_name, &self.first_name);
        assign_text(&mut plan.last_name, &self.last_name);
        assign_text(&mut plan.hair_color, &self.hair_color);
        assign_text(&mut plan.eye_color, &self.eye_color);
        assign_text(&mut plan.scars_and_marks, &self.scars_and_marks);
        assign_text(&mut plan.location_name, &self.location_name);
        assign_text(&mut plan.location_address, &self.location_address);
        assign_text(&mut plan.background_info, &self.background_info);
        assign_text(&mut plan.private_notes, &self.private_notes);

        assign_parsed(&mut plan.sex, &self.sex, "sex", errors, |v| {
            Sex::parse(v).ok_or(NOT_INCLUDED)
        });
        assign_parsed(&mut plan.race, &self.race, "race", errors, |v| {
            Race::parse(v).ok_or(NOT_INCLUDED)
        });
        assign_parsed(&mut plan.height_in_inches, &self.height_in_inches, "height_in_inches", errors, parse_integer);
        assign_parsed(&mut plan.weight_in_pounds, &self.weight_in_pounds, "weight_in_pounds", errors, parse_integer);
        assign_parsed(&mut plan.date_of_birth, &self.date_of_birth, "date_of_birth", errors, |v| {
            parse_date(v).ok_or(NOT_A_DATE)
        });
    }

    /// Validate the nested rows that will be written.
    pub fn check_children(&self, errors: &mut ValidationErrors) {
        check_rows(&self.aliases, errors);
        check_rows(&self.contacts, errors);
        check_rows(&self.images, errors);
        check_rows(&self.response_strategies, errors);
    }
}

fn check_rows<T: NestedFields>(rows: &[Nested<T>], errors: &mut ValidationErrors) {
    for row in rows.iter().filter(|row| !row.destroy) {
        if row.id.is_none() && row.fields.is_blank() {
            continue;
        }
        row.fields.check(errors);
    }
}

/// Blank strings become `None`.
pub fn present(value: &str) -> Option<String> {
    match is_blank(Some(value)) {
        true => None,
        false => Some(value.to_owned()),
    }
}

fn assign_text(target: &mut Option<String>, submitted: &Option<String>) {
    if let Some(value) = submitted {
        *target = present(value);
    }
}

fn assign_parsed<T, F>(
    target: &mut Option<T>,
    submitted: &Option<String>,
    field: &'static str,
    errors: &mut ValidationErrors,
    parse: F,
) where
    F: Fn(&str) -> Result<T, &'static str>,
{
    let Some(value) = submitted else {
        return;
    };

    if is_blank(Some(value.as_str())) {
        *target = None;
        return;
    }

    match parse(value.as_str()) {
        Ok(parsed) => *target = Some(parsed),
        Err(message) => errors.add(field, message),
    }
}

pub fn parse_integer(value: &str) -> Result<i32, &'static str> {
    value.trim().parse().map_err(|_| NOT_A_NUMBER)
}

/// Dates are entered as `mm-dd-yyyy`; ISO dates are accepted too.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

/// Accept form strings as well as JSON numbers.
pub(crate) fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Integer(number) => number.to_string(),
    }))
}

// A blank id is a new row.
fn record_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match scalar(deserializer)? {
        Some(text) if !is_blank(Some(text.as_str())) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
    Integer(i64),
}

// Checkboxes submit "1"/"0" or "true"/"false".
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => matches!(text.trim(), "1" | "true" | "t" | "yes"),
        Flag::Integer(number) => number != 0,
    })
}
