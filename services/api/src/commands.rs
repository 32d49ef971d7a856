use crate::reports::{
    journey_schedule, profile_completeness, JourneyScheduleInput, JourneyScheduleView,
};
use chrono::NaiveDate;
use clap::Args;
use onboarding_ai::error::AppError;
use onboarding_ai::workflows::completeness::{ManualProfile, ProfileCompleteness, ProfileKind};
use onboarding_ai::workflows::journey::PhaseType;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct JourneyReportArgs {
    /// Phase the journey is currently in (e.g. DESIGN_WEEK)
    #[arg(long, value_parser = crate::infra::parse_phase)]
    pub(crate) phase: PhaseType,
    /// Date the current phase started (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: NaiveDate,
    /// Date the journey began (defaults to --start)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) journey_start: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct CompletenessScoreArgs {
    /// Profile to score: business or technical
    #[arg(long, value_parser = crate::infra::parse_profile)]
    pub(crate) profile: ProfileKind,
    /// Extraction CSV export (Item ID, Type, Status, Source Session)
    #[arg(long)]
    pub(crate) items_csv: PathBuf,
    /// Optional JSON file with manually entered profile fields
    #[arg(long)]
    pub(crate) manual_json: Option<PathBuf>,
}

pub(crate) fn run_journey_report(args: JourneyReportArgs) -> Result<(), AppError> {
    let JourneyReportArgs {
        phase,
        start,
        journey_start,
    } = args;

    let view = journey_schedule(JourneyScheduleInput {
        current_phase: phase,
        current_phase_start: start,
        journey_start,
        records: Vec::new(),
    })?;

    for line in render_journey_report(&view) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_completeness_score(args: CompletenessScoreArgs) -> Result<(), AppError> {
    let CompletenessScoreArgs {
        profile,
        items_csv,
        manual_json,
    } = args;

    let csv = std::fs::read_to_string(&items_csv)?;
    let manual = manual_json.as_deref().map(load_manual_profile).transpose()?;
    let report = profile_completeness(profile, Vec::new(), Some(&csv), manual.as_ref())?;

    for line in render_completeness(&report) {
        println!("{line}");
    }
    Ok(())
}

fn load_manual_profile(path: &Path) -> Result<ManualProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::InvalidInput(format!(
            "manual profile {} is not valid JSON ({err})",
            path.display()
        ))
    })
}

pub(crate) fn render_journey_report(view: &JourneyScheduleView) -> Vec<String> {
    let report = &view.timeline;
    let mut lines = vec![
        "Digital Employee journey".to_string(),
        format!(
            "Current phase: {} (started {}, standard {} business days, planned end {})",
            view.current_phase_label,
            view.current_phase_start,
            view.standard_duration_days,
            view.planned_phase_end
        ),
        format!(
            "Projected go-live: {} ({} business days remaining, estimate)",
            report.projected_go_live, view.remaining_days
        ),
        String::new(),
        format!("Phase plan from {}", report.journey_start),
    ];

    for entry in &report.phases {
        let mut line = format!(
            "{}. {}: {} -> {} [{}]",
            entry.order,
            entry.phase_label,
            entry.planned_start,
            entry.planned_end,
            entry.status_label
        );
        if let Some(label) = &entry.variance_label {
            line.push_str(&format!(" {label}"));
        }
        lines.push(line);
    }

    lines
}

pub(crate) fn render_completeness(report: &ProfileCompleteness) -> Vec<String> {
    let mut lines = vec![format!("{}: {}% complete", report.profile_label, report.overall)];

    for entry in &report.sections {
        let scores = &entry.completeness;
        lines.push(format!(
            "- {}: {}% (items {}%, coverage {}/{} types, {} approved, {} pending)",
            entry.section_label,
            scores.percentage,
            scores.item_count_score,
            scores.covered_types_count,
            scores.total_types_count,
            scores.approved_count,
            scores.pending_count
        ));
        if !entry.missing_types.is_empty() {
            let missing: Vec<&str> = entry
                .missing_types
                .iter()
                .map(|item_type| item_type.label())
                .collect();
            lines.push(format!("    missing: {}", missing.join(", ")));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_report_lists_every_phase() {
        let view = journey_schedule(JourneyScheduleInput {
            current_phase: PhaseType::SalesHandover,
            current_phase_start: NaiveDate::from_ymd_opt(2026, 2, 9).expect("valid date"),
            journey_start: None,
            records: Vec::new(),
        })
        .expect("schedule builds");

        let lines = render_journey_report(&view);

        assert!(lines[1].contains("Sales Handover"));
        assert!(lines[1].contains("planned end 2026-02-11"));
        assert!(lines.iter().any(|line| {
            line.starts_with("1. Sales Handover: 2026-02-09 -> 2026-02-11 [In Progress]")
        }));
        assert!(lines.iter().any(|line| line.starts_with("8. Handover to Support")));
    }

    #[test]
    fn completeness_lists_missing_types() {
        let csv = "Item ID,Type,Status,Source Session\nk-1,KPI,APPROVED,\n";
        let report = profile_completeness(ProfileKind::Business, Vec::new(), Some(csv), None)
            .expect("scores");

        let lines = render_completeness(&report);

        assert_eq!(lines[0], "Business Profile: 8% complete");
        assert!(lines.iter().any(|line| line.contains("Objectives & Volumes: 50%")));
        assert!(lines
            .iter()
            .any(|line| line.trim() == "missing: Stakeholder, Goal"));
    }

    #[test]
    fn invalid_manual_json_is_an_input_error() {
        let path = std::env::temp_dir().join(format!(
            "onboarding-ai-manual-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").expect("temp file written");

        let error = load_manual_profile(&path).expect_err("invalid json");
        std::fs::remove_file(&path).ok();

        assert!(matches!(error, AppError::InvalidInput(_)));
    }
}
