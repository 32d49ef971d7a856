use chrono::NaiveDate;
use onboarding_ai::error::AppError;
use onboarding_ai::workflows::completeness::{
    score_profile, ExtractedItem, ExtractedItemImporter, ManualProfile, ProfileCompleteness,
    ProfileKind, SectionMapping,
};
use onboarding_ai::workflows::journey::{
    format_variance, variance, JourneyError, JourneyReport, JourneyTimeline, PhaseRecord,
    PhaseScheduler, PhaseType, ScheduleVariance,
};
use serde::Serialize;
use std::io::Cursor;

#[derive(Debug)]
pub(crate) struct JourneyScheduleInput {
    pub(crate) current_phase: PhaseType,
    pub(crate) current_phase_start: NaiveDate,
    pub(crate) journey_start: Option<NaiveDate>,
    pub(crate) records: Vec<PhaseRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JourneyScheduleView {
    pub(crate) current_phase: PhaseType,
    pub(crate) current_phase_label: &'static str,
    pub(crate) current_phase_start: NaiveDate,
    pub(crate) standard_duration_days: u32,
    pub(crate) planned_phase_end: NaiveDate,
    /// Business days left until go-live, assuming standard durations.
    pub(crate) remaining_days: u32,
    pub(crate) projected_completion: NaiveDate,
    pub(crate) timeline: JourneyReport,
}

#[derive(Debug, Serialize)]
pub(crate) struct VarianceView {
    pub(crate) planned_days: u32,
    pub(crate) actual_days: u32,
    #[serde(flatten)]
    pub(crate) variance: ScheduleVariance,
    pub(crate) status_label: &'static str,
    pub(crate) label: String,
}

pub(crate) fn journey_schedule(
    input: JourneyScheduleInput,
) -> Result<JourneyScheduleView, AppError> {
    let JourneyScheduleInput {
        current_phase,
        current_phase_start,
        journey_start,
        records,
    } = input;

    let journey_start = journey_start.unwrap_or(current_phase_start);
    if journey_start > current_phase_start {
        return Err(AppError::InvalidInput(format!(
            "journey start {journey_start} is after the {} start {current_phase_start}",
            current_phase.label()
        )));
    }
    check_records_against_current_phase(current_phase, current_phase_start, &records)?;

    let scheduler = PhaseScheduler::standard();
    let has_current = records.iter().any(|record| record.phase == current_phase);
    let mut timeline = JourneyTimeline::with_records(scheduler, journey_start, records)?;
    if !has_current {
        timeline.record(PhaseRecord {
            phase: current_phase,
            started_on: current_phase_start,
            completed_on: None,
        })?;
    }

    let report = timeline.report()?;
    let planned_phase_end = scheduler
        .planned_end_date(current_phase_start, current_phase)
        .ok_or(JourneyError::OutOfRange {
            phase: current_phase,
        })?;

    Ok(JourneyScheduleView {
        current_phase: report.current_phase,
        current_phase_label: report.current_phase_label,
        current_phase_start,
        standard_duration_days: scheduler.standard_duration(current_phase),
        planned_phase_end,
        remaining_days: scheduler.remaining_days(current_phase),
        projected_completion: report.projected_go_live,
        timeline: report,
    })
}

/// Recorded actuals must agree with the phase the caller says is underway:
/// same start date, still open, and nothing recorded for a later phase.
fn check_records_against_current_phase(
    current_phase: PhaseType,
    current_phase_start: NaiveDate,
    records: &[PhaseRecord],
) -> Result<(), AppError> {
    for record in records {
        if record.phase > current_phase {
            return Err(AppError::InvalidInput(format!(
                "a {} record puts the journey past the current phase {}",
                record.phase.label(),
                current_phase.label()
            )));
        }
        if record.phase != current_phase {
            continue;
        }
        if record.started_on != current_phase_start {
            return Err(AppError::InvalidInput(format!(
                "{} record starts on {} but the current phase start is {current_phase_start}",
                current_phase.label(),
                record.started_on
            )));
        }
        if let Some(completed_on) = record.completed_on {
            return Err(AppError::InvalidInput(format!(
                "{} completed on {completed_on}, so it is no longer the current phase",
                current_phase.label()
            )));
        }
    }
    Ok(())
}

pub(crate) fn variance_view(planned_days: u32, actual_days: u32) -> VarianceView {
    let variance = variance(planned_days, actual_days);
    VarianceView {
        planned_days,
        actual_days,
        variance,
        status_label: variance.status.label(),
        label: format_variance(planned_days, actual_days),
    }
}

/// Scores `profile` from inline items plus an optional extraction CSV export.
pub(crate) fn profile_completeness(
    profile: ProfileKind,
    mut items: Vec<ExtractedItem>,
    items_csv: Option<&str>,
    manual: Option<&ManualProfile>,
) -> Result<ProfileCompleteness, AppError> {
    if let Some(csv) = items_csv {
        let imported = ExtractedItemImporter::from_reader(Cursor::new(csv.as_bytes()))?;
        items.extend(imported);
    }

    Ok(score_profile(&items, SectionMapping::standard(), profile, manual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboarding_ai::workflows::completeness::{ExtractedItemType, ItemStatus};
    use onboarding_ai::workflows::journey::{PhaseStatus, VarianceStatus};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn schedule_marks_the_current_phase_in_progress() {
        let view = journey_schedule(JourneyScheduleInput {
            current_phase: PhaseType::DesignWeek,
            current_phase_start: date(2026, 2, 9),
            journey_start: Some(date(2026, 2, 2)),
            records: Vec::new(),
        })
        .expect("schedule builds");

        assert_eq!(view.planned_phase_end, date(2026, 2, 23));
        assert_eq!(view.remaining_days, 21);
        assert_eq!(view.timeline.current_phase, PhaseType::DesignWeek);
        assert_eq!(view.timeline.phases[2].status, PhaseStatus::InProgress);
        assert_eq!(view.timeline.projected_go_live, view.projected_completion);
    }

    #[test]
    fn journey_start_after_phase_start_is_rejected() {
        let error = journey_schedule(JourneyScheduleInput {
            current_phase: PhaseType::Kickoff,
            current_phase_start: date(2026, 2, 9),
            journey_start: Some(date(2026, 2, 10)),
            records: Vec::new(),
        })
        .expect_err("invalid journey start");
        assert!(matches!(error, AppError::InvalidInput(_)));
    }

    #[test]
    fn recorded_current_phase_keeps_one_projection() {
        let view = journey_schedule(JourneyScheduleInput {
            current_phase: PhaseType::DesignWeek,
            current_phase_start: date(2026, 2, 16),
            journey_start: Some(date(2026, 2, 9)),
            records: vec![
                PhaseRecord {
                    phase: PhaseType::Kickoff,
                    started_on: date(2026, 2, 11),
                    completed_on: Some(date(2026, 2, 13)),
                },
                PhaseRecord {
                    phase: PhaseType::DesignWeek,
                    started_on: date(2026, 2, 16),
                    completed_on: None,
                },
            ],
        })
        .expect("schedule builds");

        assert_eq!(view.current_phase, view.timeline.current_phase);
        assert_eq!(view.projected_completion, view.timeline.projected_go_live);
        assert_eq!(
            Some(view.projected_completion),
            PhaseScheduler::standard()
                .projected_completion_date(PhaseType::DesignWeek, date(2026, 2, 16))
        );
    }

    #[test]
    fn dates_at_the_end_of_the_calendar_are_input_errors() {
        let error = journey_schedule(JourneyScheduleInput {
            current_phase: PhaseType::Kickoff,
            current_phase_start: NaiveDate::MAX,
            journey_start: None,
            records: Vec::new(),
        })
        .expect_err("no room for the plan");

        assert!(matches!(
            error,
            AppError::Journey(JourneyError::OutOfRange { .. })
        ));
        assert_eq!(error.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn variance_view_carries_label() {
        let view = variance_view(5, 7);
        assert_eq!(view.variance.status, VarianceStatus::Late);
        assert_eq!(view.label, "2 days over");
        assert_eq!(view.status_label, "Late");
    }

    #[test]
    fn inline_and_imported_items_are_combined() {
        let items = vec![ExtractedItem::new(
            "c-1",
            ExtractedItemType::Channel,
            ItemStatus::Approved,
        )];
        let csv = "Item ID,Type,Status,Source Session\n\
s-1,STAKEHOLDER,APPROVED,\n\
g-1,GOAL,APPROVED,\n";

        let report = profile_completeness(ProfileKind::Business, items, Some(csv), None)
            .expect("scores");

        // identity and channels complete out of six sections
        assert_eq!(report.overall, 33);
    }
}
