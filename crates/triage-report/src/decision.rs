//! Final decision → headline decision panel.

use triage_contracts::{
    markup::SafeText,
    pipeline::{CommunityAction, FinalDecision},
    view::DecisionView,
};

/// Build the decision panel shown above the report.
pub fn build_decision(decision: &FinalDecision) -> DecisionView {
    let case_id = decision
        .report
        .case_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or("-");
    let severity = decision
        .severity_band
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let specialties = decision.specialties.clone().unwrap_or_default().join(", ");

    DecisionView {
        case_id: SafeText::escape(case_id),
        severity_band: SafeText::escape(severity),
        priority: SafeText::escape(decision.priority.as_deref().unwrap_or("UNCLASSIFIED")),
        specialties: SafeText::escape(specialties),
        community_plan: decision.community_plan.iter().map(plan_line).collect(),
    }
}

/// `action — resource (detail)`; missing parts are left empty.
fn plan_line(action: &CommunityAction) -> SafeText {
    SafeText::escape(format!(
        "{} — {} ({})",
        action.action.as_deref().unwrap_or_default(),
        action.resource.as_deref().unwrap_or_default(),
        action.detail.as_deref().unwrap_or_default(),
    ))
}
