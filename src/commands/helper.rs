use entity::officer;
use response_plans::business::ResponsePlan;
use response_plans::Error as PlanError;

pub fn describe_officer(officer: &officer::Model) -> String {
    let mut lines = vec![format!("#{} {}", officer.id, officer.name)];
    if let Some(title) = &officer.title {
        lines.push(format!("  title:    {}", title));
    }
    if let Some(unit) = &officer.unit {
        lines.push(format!("  unit:     {}", unit));
    }
    if let Some(phone) = &officer.phone {
        lines.push(format!("  phone:    {}", phone));
    }
    if let Some(username) = &officer.username {
        lines.push(format!("  username: {}", username));
    }
    lines.join("\n")
}

pub fn describe_plan(plan: &ResponsePlan) -> String {
    let model = &plan.plan;
    let status = match (plan.is_approved(), model.approver_id) {
        (true, Some(approver)) => format!("approved by officer #{}", approver),
        (false, Some(_)) => "approval is stale".to_owned(),
        _ => "not approved".to_owned(),
    };

    let mut lines = vec![
        format!("#{} {} ({})", model.id, model.display_name(), status),
        format!("  {}", model.shorthand_description()),
        format!("  eyes: {}, hair: {}", model.eye_color(), model.hair_color()),
        format!("  profile image: {}", plan.profile_image_url()),
    ];

    let aliases = plan.alias_list();
    if !aliases.is_empty() {
        lines.push(format!("  aliases: {}", aliases.join(", ")));
    }

    for warning in &plan.safety_warnings {
        lines.push(format!("  ! {} (#{})", warning.description, warning.id));
    }

    for strategy in &plan.response_strategies {
        let priority = strategy
            .priority
            .map_or_else(|| "-".to_owned(), |priority| priority.to_string());
        let title = strategy.title.as_deref().unwrap_or("");
        lines.push(format!("  {}. {}", priority, title));
    }

    for contact in &plan.contacts {
        let name = contact.name.as_deref().unwrap_or("(no name)");
        match &contact.relationship {
            Some(relationship) => lines.push(format!("  contact: {} ({})", name, relationship)),
            None => lines.push(format!("  contact: {}", name)),
        }
    }

    lines.join("\n")
}

/// Validation failures are printed field by field, everything else as is.
pub fn describe_error(error: &PlanError) -> String {
    match error.validation_errors() {
        Some(errors) => errors
            .iter()
            .map(|error| format!("{} {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("\n"),
        None => error.to_string(),
    }
}
