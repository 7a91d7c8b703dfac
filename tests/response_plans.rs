mod common;

use chrono::{Duration, NaiveDate};
use entity::demographics::Sex;
use entity::sea_orm::entity::*;
use entity::sea_orm::PaginatorTrait;
use entity::{alias, contact, image, response_plan};
use response_plans::business::response_plans as plans;
use response_plans::business::validation::{BLANK, NOT_INCLUDED, SELF_APPROVAL, TAKEN};
use response_plans::Error;
use serde_json::json;

use common::{form, john_doe, officer, setup};

#[tokio::test]
async fn creates_a_plan_with_children() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let plan = plans::create(
        &conn,
        author.id,
        &form(json!({
            "name": "John Doe",
            "date_of_birth": "1980-01-30",
            "sex": "Male",
            "race": "WHITE",
            "height_in_inches": 70,
            "weight_in_pounds": "180",
            "contacts": [
                { "name": "Sam Smith", "relationship": "case worker" },
                { "name": "", "cell": " " }
            ],
            "response_strategies": [
                { "priority": 3, "title": "Third" },
                { "priority": 1, "title": "First" },
                { "priority": 2, "title": "Second" }
            ],
            "alias_list": ["Johnny", "JD"]
        })),
    )
    .await
    .unwrap();

    assert_eq!(plan.plan.author_id, author.id);
    assert_eq!(plan.plan.display_name(), "Doe, John");
    assert_eq!(plan.plan.date_of_birth, NaiveDate::from_ymd_opt(1980, 1, 30));
    assert_eq!(plan.plan.shorthand_description(), "WM – 5'10\" – 180 lb");
    assert!(!plan.is_approved());

    assert_eq!(plan.contacts.len(), 1);
    assert_eq!(plan.contacts[0].name.as_deref(), Some("Sam Smith"));

    let titles: Vec<_> = plan
        .response_strategies
        .iter()
        .map(|strategy| strategy.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    assert_eq!(plan.alias_list(), vec!["Johnny", "JD"]);
}

#[tokio::test]
async fn invalid_plans_are_not_saved() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let result = plans::create(
        &conn,
        author.id,
        &form(json!({
            "first_name": "John",
            "sex": "FEMALE",
            "contacts": [{ "name": "Sam Smith" }]
        })),
    )
    .await;

    let error = result.unwrap_err();
    let errors = error.validation_errors().unwrap();
    assert_eq!(errors.on("last_name"), vec![BLANK]);
    assert_eq!(errors.on("date_of_birth"), vec![BLANK]);
    assert_eq!(errors.on("sex"), vec![NOT_INCLUDED]);

    assert_eq!(response_plan::Entity::find().count(&conn).await.unwrap(), 0);
    assert_eq!(contact::Entity::find().count(&conn).await.unwrap(), 0);
}

#[tokio::test]
async fn sex_accepts_exact_values_or_nothing() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut female = john_doe();
    female.sex = Some("Female".to_owned());
    let plan = plans::create(&conn, author.id, &female).await.unwrap();
    assert_eq!(plan.plan.sex, Some(Sex::Female));

    let unset = form(json!({
        "first_name": "Jane",
        "last_name": "Roe",
        "date_of_birth": "02-14-1975",
        "sex": null
    }));
    let plan = plans::create(&conn, author.id, &unset).await.unwrap();
    assert_eq!(plan.plan.sex, None);
}

#[tokio::test]
async fn unknown_author_is_not_found() {
    let conn = setup().await;
    let error = plans::create(&conn, 42, &john_doe()).await.unwrap_err();
    assert!(matches!(error, Error::NotFound { entity: "officer", id: 42 }));
}

#[tokio::test]
async fn nested_rows_are_created_updated_and_destroyed() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut create = john_doe();
    create.contacts = form(json!({
        "contacts": [{ "name": "Sam Smith" }, { "name": "Pat Jones" }]
    }))
    .contacts;
    let plan = plans::create(&conn, author.id, &create).await.unwrap();
    let sam = plan.contacts[0].id;
    let pat = plan.contacts[1].id;

    let plan = plans::update(
        &conn,
        plan.id(),
        &form(json!({
            "contacts": [
                { "id": sam, "relationship": "brother" },
                { "id": pat, "_destroy": "1" },
                { "name": "Lee Park", "organization": "Crisis Clinic" },
                { "name": "  " }
            ]
        })),
    )
    .await
    .unwrap();

    assert_eq!(plan.contacts.len(), 2);
    assert_eq!(plan.contacts[0].id, sam);
    assert_eq!(plan.contacts[0].name.as_deref(), Some("Sam Smith"));
    assert_eq!(plan.contacts[0].relationship.as_deref(), Some("brother"));
    assert_eq!(plan.contacts[1].name.as_deref(), Some("Lee Park"));
    assert!(contact::Entity::find_by_id(pat).one(&conn).await.unwrap().is_none());
}

#[tokio::test]
async fn nested_rows_of_another_plan_are_not_found() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut other = john_doe();
    other.contacts = form(json!({ "contacts": [{ "name": "Sam Smith" }] })).contacts;
    let other = plans::create(&conn, author.id, &other).await.unwrap();
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let foreign = other.contacts[0].id;
    let error = plans::update(
        &conn,
        plan.id(),
        &form(json!({ "contacts": [{ "id": foreign, "_destroy": true }] })),
    )
    .await
    .unwrap_err();

    assert!(matches!(error, Error::NotFound { entity: "contact", .. }));
    assert!(contact::Entity::find_by_id(foreign).one(&conn).await.unwrap().is_some());
}

#[tokio::test]
async fn updated_at_only_moves_when_plan_columns_change() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let same = plans::update(&conn, plan.id(), &john_doe()).await.unwrap();
    assert_eq!(same.plan.updated_at, plan.plan.updated_at);

    let children_only = plans::update(
        &conn,
        plan.id(),
        &form(json!({ "images": [{ "source": "/uploads/1.jpg" }] })),
    )
    .await
    .unwrap();
    assert_eq!(children_only.plan.updated_at, plan.plan.updated_at);
    assert_eq!(children_only.images.len(), 1);

    let renamed = plans::update(&conn, plan.id(), &form(json!({ "first_name": "Johnny" })))
        .await
        .unwrap();
    assert_eq!(renamed.plan.first_name.as_deref(), Some("Johnny"));
    assert!(renamed.plan.updated_at >= plan.plan.updated_at);
}

#[tokio::test]
async fn profile_image_falls_back_to_default() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();
    assert_eq!(plan.profile_image_url(), image::DEFAULT_PROFILE_IMAGE);

    let plan = plans::update(
        &conn,
        plan.id(),
        &form(json!({
            "images": [{ "source": "/uploads/front.jpg" }, { "source": "/uploads/side.jpg" }]
        })),
    )
    .await
    .unwrap();
    assert_eq!(plan.profile_image_url(), "/uploads/front.jpg");
}

#[tokio::test]
async fn alias_list_replaces_aliases() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let names = vec!["Bob".to_owned(), "Robert".to_owned(), "Bob".to_owned()];
    let aliases = plans::set_alias_list(&conn, plan.id(), &names).await.unwrap();
    assert_eq!(aliases, vec!["Bob", "Robert"]);
    let bob = plans::find(&conn, plan.id()).await.unwrap().aliases[0].id;

    let aliases = plans::set_alias_list(&conn, plan.id(), &["Bob".to_owned()])
        .await
        .unwrap();
    assert_eq!(aliases, vec!["Bob"]);

    let plan = plans::find(&conn, plan.id()).await.unwrap();
    assert_eq!(plan.aliases.len(), 1);
    assert_eq!(plan.aliases[0].id, bob);
}

#[tokio::test]
async fn renaming_an_alias_to_a_taken_name_is_rejected() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut create = john_doe();
    create.alias_list = Some(vec!["Bob".to_owned(), "Robert".to_owned()]);
    let plan = plans::create(&conn, author.id, &create).await.unwrap();
    let bob = plan.aliases[0].id;
    let robert = plan.aliases[1].id;

    let error = plans::update(
        &conn,
        plan.id(),
        &form(json!({ "aliases": [{ "id": bob, "name": "Robert" }] })),
    )
    .await
    .unwrap_err();
    assert_eq!(error.validation_errors().unwrap().on("aliases.name"), vec![TAKEN]);
    assert_eq!(plans::alias_list(&conn, plan.id()).await.unwrap(), vec!["Bob", "Robert"]);

    // Freed up earlier in the same payload
    let plan = plans::update(
        &conn,
        plan.id(),
        &form(json!({
            "aliases": [
                { "id": robert, "_destroy": "1" },
                { "id": bob, "name": "Robert" }
            ]
        })),
    )
    .await
    .unwrap();
    assert_eq!(plan.alias_list(), vec!["Robert"]);
    assert_eq!(plan.aliases[0].id, bob);
}

#[tokio::test]
async fn duplicate_alias_names_in_one_payload() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut create = john_doe();
    create.aliases = form(json!({
        "aliases": [{ "name": "Bob" }, { "name": "Bob" }]
    }))
    .aliases;
    let plan = plans::create(&conn, author.id, &create).await.unwrap();
    assert_eq!(plan.alias_list(), vec!["Bob"]);
    let bob = plan.aliases[0].id;

    let error = plans::update(
        &conn,
        plan.id(),
        &form(json!({
            "aliases": [{ "name": "Rob" }, { "id": bob, "name": "Rob" }]
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(error.validation_errors().unwrap().on("aliases.name"), vec![TAKEN]);
    assert_eq!(alias::Entity::find().count(&conn).await.unwrap(), 1);
}

#[tokio::test]
async fn destroy_without_an_id_is_ignored() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let plan = plans::update(
        &conn,
        plan.id(),
        &form(json!({
            "contacts": [{ "name": "Sam Smith", "_destroy": "1" }],
            "aliases": [{ "name": "Johnny", "_destroy": true }]
        })),
    )
    .await
    .unwrap();

    assert!(plan.contacts.is_empty());
    assert!(plan.aliases.is_empty());
    assert_eq!(contact::Entity::find().count(&conn).await.unwrap(), 0);
}

#[tokio::test]
async fn strategies_without_priority_come_last() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut create = john_doe();
    create.response_strategies = form(json!({
        "response_strategies": [
            { "title": "NoPriority" },
            { "priority": "2", "title": "Two" },
            { "priority": 1, "title": "One" }
        ]
    }))
    .response_strategies;
    let plan = plans::create(&conn, author.id, &create).await.unwrap();

    let titles: Vec<_> = plan
        .response_strategies
        .iter()
        .map(|strategy| strategy.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["One", "Two", "NoPriority"]);
}

#[tokio::test]
async fn approval_workflow() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let approver = officer(&conn, "Bob Approver").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let error = plans::find_approved(&conn, plan.id()).await.unwrap_err();
    assert!(error.is_not_found());

    let approved = plans::approve(&conn, plan.id(), approver.id).await.unwrap();
    assert!(approved.is_approved());
    assert_eq!(approved.plan.approver_id, Some(approver.id));
    assert!(approved.plan.approved_at.is_some());
    assert!(plans::find_approved(&conn, plan.id()).await.is_ok());

    let revoked = plans::revoke_approval(&conn, plan.id()).await.unwrap();
    assert!(!revoked.is_approved());
    assert_eq!(revoked.plan.approver_id, None);
    assert_eq!(revoked.plan.approved_at, None);
}

#[tokio::test]
async fn authors_cannot_approve_their_own_plans() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let error = plans::approve(&conn, plan.id(), author.id).await.unwrap_err();
    assert_eq!(error.validation_errors().unwrap().on("approver"), vec![SELF_APPROVAL]);

    let plan = plans::find(&conn, plan.id()).await.unwrap();
    assert_eq!(plan.plan.approver_id, None);
}

#[tokio::test]
async fn later_edits_make_an_approval_stale() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let approver = officer(&conn, "Bob Approver").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();
    let plan = plans::approve(&conn, plan.id(), approver.id).await.unwrap();

    let mut edited: response_plan::ActiveModel = plan.plan.clone().into();
    edited.updated_at = Set(plan.plan.updated_at + Duration::seconds(2));
    edited.update(&conn).await.unwrap();

    let stale = plans::find(&conn, plan.id()).await.unwrap();
    assert!(!stale.is_approved());
    assert!(plans::find_approved(&conn, plan.id())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn safety_warnings_are_added_and_removed() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;
    let plan = plans::create(&conn, author.id, &john_doe()).await.unwrap();
    let other = plans::create(&conn, author.id, &john_doe()).await.unwrap();

    let warning = plans::add_safety_warning(&conn, plan.id(), "Carries a knife")
        .await
        .unwrap();
    let blank = plans::add_safety_warning(&conn, plan.id(), "  ").await.unwrap_err();
    assert_eq!(blank.validation_errors().unwrap().on("description"), vec![BLANK]);

    let loaded = plans::find(&conn, plan.id()).await.unwrap();
    assert_eq!(loaded.safety_warnings.len(), 1);
    assert_eq!(loaded.safety_warnings[0].description, "Carries a knife");

    let wrong_plan = plans::remove_safety_warning(&conn, other.id(), warning.id)
        .await
        .unwrap_err();
    assert!(wrong_plan.is_not_found());

    plans::remove_safety_warning(&conn, plan.id(), warning.id)
        .await
        .unwrap();
    assert!(plans::remove_safety_warning(&conn, plan.id(), warning.id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn deleting_a_plan_removes_its_children() {
    let conn = setup().await;
    let author = officer(&conn, "Alice Author").await;

    let mut create = john_doe();
    create.contacts = form(json!({ "contacts": [{ "name": "Sam Smith" }] })).contacts;
    create.alias_list = Some(vec!["Johnny".to_owned()]);
    let plan = plans::create(&conn, author.id, &create).await.unwrap();
    plans::add_safety_warning(&conn, plan.id(), "Carries a knife")
        .await
        .unwrap();

    plans::delete(&conn, plan.id()).await.unwrap();

    assert!(plans::find(&conn, plan.id()).await.unwrap_err().is_not_found());
    assert_eq!(contact::Entity::find().count(&conn).await.unwrap(), 0);
    assert_eq!(entity::alias::Entity::find().count(&conn).await.unwrap(), 0);
    assert_eq!(entity::safety_warning::Entity::find().count(&conn).await.unwrap(), 0);
}
