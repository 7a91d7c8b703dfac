use chrono::Duration;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::demographics::{Race, Sex};

/// Placeholder read back for eye and hair colour when nothing was recorded.
pub const UNKNOWN_COLOR: &str = "Unknown";

const SHORTHAND_SEPARATOR: &str = " – ";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "response_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub approver_id: Option<i32>,
    pub approved_at: Option<DateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub background_info: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub private_notes: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<Sex>,
    pub race: Option<Race>,
    pub height_in_inches: Option<i32>,
    pub weight_in_pounds: Option<i32>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub date_of_birth: Option<Date>,
    pub scars_and_marks: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::officer::Entity",
        from = "Column::AuthorId",
        to = "super::officer::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::officer::Entity",
        from = "Column::ApproverId",
        to = "super::officer::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Approver,
    #[sea_orm(has_many = "super::alias::Entity")]
    Aliases,
    #[sea_orm(has_many = "super::contact::Entity")]
    Contacts,
    #[sea_orm(has_many = "super::image::Entity")]
    Images,
    #[sea_orm(has_many = "super::response_strategy::Entity")]
    ResponseStrategies,
    #[sea_orm(has_many = "super::safety_warning::Entity")]
    SafetyWarnings,
}

impl Related<super::alias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aliases.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::response_strategy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponseStrategies.def()
    }
}

impl Related<super::safety_warning::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SafetyWarnings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A fresh, unsaved plan authored by `author_id`.
    pub fn draft(author_id: i32, now: DateTime) -> Self {
        Model {
            id: 0,
            author_id,
            approver_id: None,
            approved_at: None,
            background_info: None,
            private_notes: None,
            first_name: None,
            last_name: None,
            sex: None,
            race: None,
            height_in_inches: None,
            weight_in_pounds: None,
            hair_color: None,
            eye_color: None,
            date_of_birth: None,
            scars_and_marks: None,
            location_name: None,
            location_address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set or clear the approver. Approval time follows the approver: it is stamped with the
    /// current time when an approver is given and cleared otherwise.
    pub fn assign_approver(&mut self, approver_id: Option<i32>) {
        self.approver_id = approver_id;
        self.approved_at = approver_id.map(|_| chrono::Utc::now().naive_utc());
    }

    /// Approval only counts if it was given no more than a second before the last change to
    /// the plan.
    pub fn is_approved(&self) -> bool {
        match (self.approver_id, self.approved_at) {
            (Some(_), Some(approved_at)) => approved_at > self.updated_at - Duration::seconds(1),
            _ => false,
        }
    }

    pub fn display_name(&self) -> String {
        format!(
            "{}, {}",
            self.last_name.as_deref().unwrap_or_default(),
            self.first_name.as_deref().unwrap_or_default()
        )
    }

    pub fn name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    /// Split a full name on whitespace into first and last name. Extra words are dropped.
    pub fn set_name(&mut self, full_name: &str) {
        let mut parts = full_name.split_whitespace().map(str::to_owned);
        self.first_name = parts.next();
        self.last_name = parts.next();
    }

    pub fn eye_color(&self) -> &str {
        self.eye_color.as_deref().unwrap_or(UNKNOWN_COLOR)
    }

    pub fn hair_color(&self) -> &str {
        self.hair_color.as_deref().unwrap_or(UNKNOWN_COLOR)
    }

    /// Height as `feet'inches"`, e.g. `5'10"`.
    pub fn height_in_feet_and_inches(&self) -> Option<String> {
        self.height_in_inches
            .map(|inches| format!("{}'{}\"", inches / 12, inches % 12))
    }

    /// Compact description used on search results, e.g. `WM – 5'10" – 180 lb`.
    pub fn shorthand_description(&self) -> String {
        let codes: String = self
            .race
            .map(Race::code)
            .into_iter()
            .chain(self.sex.map(Sex::code))
            .collect();

        let segments = [
            Some(codes).filter(|codes| !codes.is_empty()),
            self.height_in_feet_and_inches(),
            self.weight_in_pounds.map(|pounds| format!("{} lb", pounds)),
        ];

        segments
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(SHORTHAND_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime {
        chrono::Utc::now().naive_utc()
    }

    fn described(race: Option<Race>, sex: Option<Sex>, height: Option<i32>, weight: Option<i32>) -> String {
        let mut plan = Model::draft(1, now());
        plan.race = race;
        plan.sex = sex;
        plan.height_in_inches = height;
        plan.weight_in_pounds = weight;
        plan.shorthand_description()
    }

    #[test]
    fn shorthand_starts_with_race_then_sex() {
        let full = described(Some(Race::White), Some(Sex::Male), Some(70), Some(180));
        assert!(full.starts_with("WM"));
        assert_eq!(full, "WM – 5'10\" – 180 lb");

        let female = described(Some(Race::AfricanAmericanBlack), Some(Sex::Female), None, None);
        assert_eq!(female, "BF");
    }

    #[test]
    fn shorthand_omits_missing_measurements() {
        let no_height = described(Some(Race::Unknown), Some(Sex::Male), None, Some(160));
        assert_eq!(no_height.matches('–').count(), 1);
        assert!(no_height.contains("160 lb"));

        let no_weight = described(Some(Race::Unknown), Some(Sex::Male), Some(66), None);
        assert_eq!(no_weight.matches('–').count(), 1);
        assert!(no_weight.contains("5'6\""));

        let neither = described(Some(Race::Unknown), Some(Sex::Male), None, None);
        assert!(!neither.contains('–'));
    }

    #[test]
    fn shorthand_without_demographics() {
        assert_eq!(described(None, None, Some(72), None), "6'0\"");
        assert_eq!(described(None, Some(Sex::Female), None, None), "F");
        assert_eq!(described(None, None, None, None), "");
    }

    #[test]
    fn display_name_is_last_comma_first() {
        let mut plan = Model::draft(1, now());
        plan.first_name = Some("John".to_owned());
        plan.last_name = Some("Doe".to_owned());
        assert_eq!(plan.display_name(), "Doe, John");
        assert_eq!(plan.name(), "John Doe");
    }

    #[test]
    fn set_name_splits_on_whitespace() {
        let mut plan = Model::draft(1, now());
        plan.set_name("  Jane   Roe  Extra");
        assert_eq!(plan.first_name.as_deref(), Some("Jane"));
        assert_eq!(plan.last_name.as_deref(), Some("Roe"));
    }

    #[test]
    fn colors_default_to_unknown() {
        let mut plan = Model::draft(1, now());
        assert_eq!(plan.eye_color(), "Unknown");
        assert_eq!(plan.hair_color(), "Unknown");
        plan.eye_color = Some("blue".to_owned());
        assert_eq!(plan.eye_color(), "blue");
    }

    #[test]
    fn assigning_an_approver_stamps_and_clears_approval_time() {
        let mut plan = Model::draft(1, now());
        let before = now();
        plan.assign_approver(Some(2));
        assert_eq!(plan.approver_id, Some(2));
        let approved_at = plan.approved_at.expect("approval time should be stamped");
        assert!(approved_at >= before);

        plan.assign_approver(None);
        assert_eq!(plan.approver_id, None);
        assert_eq!(plan.approved_at, None);
    }

    #[test]
    fn approval_goes_stale_after_later_edits() {
        let mut plan = Model::draft(1, now());
        plan.assign_approver(Some(2));
        plan.updated_at = plan.approved_at.unwrap();
        assert!(plan.is_approved());

        plan.updated_at = plan.approved_at.unwrap() + Duration::milliseconds(900);
        assert!(plan.is_approved());

        plan.updated_at = plan.approved_at.unwrap() + Duration::seconds(2);
        assert!(!plan.is_approved());
    }

    #[test]
    fn approval_requires_both_fields() {
        let mut plan = Model::draft(1, now());
        plan.approved_at = Some(now());
        assert!(!plan.is_approved());

        plan.approved_at = None;
        plan.approver_id = Some(2);
        assert!(!plan.is_approved());
    }
}
