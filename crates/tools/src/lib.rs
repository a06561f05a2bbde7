//! Command implementations behind the `collect` binary.

use std::fmt::Write as _;

use catalog::Category;
use collector::{MapFormController, SubmissionResult};
use foundation::GeoPoint;
use scoring::{Scorer, ScoringConfig};
use widgets::filter_options;

/// `name=value` from a `--field` flag.
pub fn parse_field_arg(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>().map_err(|e| e.to_string())
}

pub fn categories_report() -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let _ = writeln!(out, "{} ({})", category.as_str(), category.label());
        if category.fields().is_empty() {
            let _ = writeln!(out, "  (no fields)");
        }
        for field in category.fields() {
            let flag = if field.mandatory { "required" } else { "optional" };
            let _ = writeln!(
                out,
                "  {} - {} [{flag}, {} options]",
                field.name,
                field.label,
                field.options.len()
            );
        }
    }
    out
}

/// Effective scoring configuration, as hosts will see it.
pub fn config_report(config: &ScoringConfig) -> String {
    let timeout = config
        .timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());
    let key = config.map_provider_key.as_deref().unwrap_or("(unset)");
    format!(
        "base_url: {}\npredict: {}\ntimeout: {timeout}\nmap_provider_key: {key}\n",
        config.base_url,
        scoring::predict_url(&config.base_url, Category::default()),
    )
}

/// Options of `field`, filtered the way the dropdown filters them.
pub fn options_report(category: Category, field: &str, query: Option<&str>) -> Result<String, String> {
    let spec = category
        .field(field)
        .ok_or_else(|| format!("category {category} has no field named {field}"))?;
    let visible = filter_options(spec.options, query.unwrap_or(""));
    let mut out = String::new();
    for option in visible {
        let _ = writeln!(out, "{option}");
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitPlan {
    pub category: Category,
    pub point: GeoPoint,
    pub fields: Vec<(String, String)>,
}

/// Drives `controller` like a user would: click the map, pick the tab,
/// choose each option through its dropdown, then submit.
pub async fn run_submit<S: Scorer>(
    controller: &mut MapFormController,
    scorer: &S,
    plan: &SubmitPlan,
) -> Result<SubmissionResult, String> {
    if !plan.point.is_finite() {
        return Err("latitude and longitude must be finite numbers".to_string());
    }
    tracing::debug!(category = %plan.category, fields = plan.fields.len(), "driving controller");
    controller.map_click(plan.point);
    controller.select_tab(plan.category);

    for (field, value) in &plan.fields {
        if plan.category.field(field).is_none() {
            return Err(format!("category {} has no field named {field}", plan.category));
        }
        controller.toggle_field(field);
        controller.filter_field(field, value.as_str());
        controller.choose_option_text(field, value);
        if controller.form_data().value(plan.category, field) != value {
            return Err(format!("{value:?} is not an option of {field}"));
        }
    }

    if !controller.can_submit() {
        let missing = controller.form_data().missing_mandatory(plan.category);
        return Err(format!("submit is not enabled; missing: {}", missing.join(", ")));
    }

    controller
        .submit(scorer)
        .await
        .map_err(|err| err.user_message())
}

pub fn format_result(result: &SubmissionResult) -> String {
    format!(
        "Demand Score: {}\nRecommendations: {}\n",
        result.demand_score_text(),
        result.recommendations
    )
}
