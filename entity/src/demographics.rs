//! Closed vocabularies used to describe the subject of a response plan.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Sex {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

impl Sex {
    /// Parse the stored label. Matching is exact and case-sensitive.
    pub fn parse(label: &str) -> Option<Self> {
        Self::try_from_value(&label.to_owned()).ok()
    }

    pub fn code(self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Race {
    #[sea_orm(string_value = "AFRICAN AMERICAN/BLACK")]
    #[serde(rename = "AFRICAN AMERICAN/BLACK")]
    AfricanAmericanBlack,
    #[sea_orm(string_value = "AMERICAN INDIAN/ALASKAN NATIVE")]
    #[serde(rename = "AMERICAN INDIAN/ALASKAN NATIVE")]
    AmericanIndianAlaskanNative,
    #[sea_orm(string_value = "ASIAN (ALL)/PACIFIC ISLANDER")]
    #[serde(rename = "ASIAN (ALL)/PACIFIC ISLANDER")]
    AsianPacificIslander,
    #[sea_orm(string_value = "UNKNOWN")]
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "WHITE")]
    #[serde(rename = "WHITE")]
    White,
}

impl Race {
    /// Parse the stored label. Matching is exact and case-sensitive.
    pub fn parse(label: &str) -> Option<Self> {
        Self::try_from_value(&label.to_owned()).ok()
    }

    pub fn code(self) -> char {
        match self {
            Race::AfricanAmericanBlack => 'B',
            Race::AmericanIndianAlaskanNative => 'I',
            Race::AsianPacificIslander => 'A',
            Race::Unknown => 'U',
            Race::White => 'W',
        }
    }
}

/// Eye colours offered by plan forms. Stored values are free text.
pub const EYE_COLORS: [&str; 10] = [
    "black",
    "blue",
    "brown",
    "gray",
    "green",
    "hazel",
    "maroon",
    "multicolored",
    "pink",
    "unknown",
];

/// Hair colours offered by plan forms. Stored values are free text.
pub const HAIR_COLORS: [&str; 6] = ["bald", "black", "blonde", "brown", "grey", "red"];
