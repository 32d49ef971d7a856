use super::calendar::add_business_days;
use super::domain::{PhaseRecord, PhaseStatus, PhaseType, ScheduleVariance};
use super::schedule::{format_variance, variance, PhaseScheduler};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("phase {phase} cannot complete on {completed_on} before starting on {started_on}")]
    CompletedBeforeStart {
        phase: PhaseType,
        started_on: NaiveDate,
        completed_on: NaiveDate,
    },
    #[error("planned dates for phase {phase} fall past the end of the supported calendar")]
    OutOfRange { phase: PhaseType },
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseTimelineEntry {
    pub phase: PhaseType,
    pub phase_label: &'static str,
    pub order: u8,
    pub standard_duration_days: u32,
    pub planned_start: NaiveDate,
    pub planned_end: NaiveDate,
    pub status: PhaseStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<ScheduleVariance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyReport {
    pub journey_start: NaiveDate,
    pub current_phase: PhaseType,
    pub current_phase_label: &'static str,
    /// Heuristic estimate unless go-live has actually completed.
    pub projected_go_live: NaiveDate,
    pub go_live_confirmed: bool,
    pub phases: Vec<PhaseTimelineEntry>,
}

/// Planned-versus-actual view of one Digital Employee's journey.
#[derive(Debug, Clone)]
pub struct JourneyTimeline<'a> {
    scheduler: PhaseScheduler<'a>,
    journey_start: NaiveDate,
    records: HashMap<PhaseType, PhaseRecord>,
}

impl<'a> JourneyTimeline<'a> {
    pub fn new(scheduler: PhaseScheduler<'a>, journey_start: NaiveDate) -> Self {
        Self {
            scheduler,
            journey_start,
            records: HashMap::new(),
        }
    }

    pub fn with_records<I>(
        scheduler: PhaseScheduler<'a>,
        journey_start: NaiveDate,
        records: I,
    ) -> Result<Self, JourneyError>
    where
        I: IntoIterator<Item = PhaseRecord>,
    {
        let mut timeline = Self::new(scheduler, journey_start);
        for record in records {
            timeline.record(record)?;
        }
        Ok(timeline)
    }

    /// Stores actuals for a phase, replacing any earlier record for it.
    pub fn record(&mut self, record: PhaseRecord) -> Result<(), JourneyError> {
        if let Some(completed_on) = record.completed_on {
            if completed_on < record.started_on {
                return Err(JourneyError::CompletedBeforeStart {
                    phase: record.phase,
                    started_on: record.started_on,
                    completed_on,
                });
            }
        }

        self.records.insert(record.phase, record);
        Ok(())
    }

    /// Latest phase with recorded actuals, or the one following it once that
    /// phase has completed.
    pub fn current_phase(&self) -> PhaseType {
        let latest = PhaseType::ordered()
            .into_iter()
            .rev()
            .find_map(|phase| self.records.get(&phase));

        match latest {
            None => PhaseType::SalesHandover,
            Some(record) if record.completed_on.is_some() => {
                record.phase.next().unwrap_or(record.phase)
            }
            Some(record) => record.phase,
        }
    }

    /// Fails only when a planned or projected date would fall past
    /// [`NaiveDate::MAX`].
    pub fn report(&self) -> Result<JourneyReport, JourneyError> {
        let mut phases = Vec::with_capacity(PhaseType::COUNT);
        let mut planned_start = self.journey_start;

        for definition in self.scheduler.catalog().definitions() {
            let planned_end = add_business_days(planned_start, definition.standard_duration_days)
                .ok_or(JourneyError::OutOfRange {
                    phase: definition.phase,
                })?;
            let record = self.records.get(&definition.phase);

            let status = match record {
                Some(PhaseRecord {
                    completed_on: Some(_),
                    ..
                }) => PhaseStatus::Completed,
                Some(_) => PhaseStatus::InProgress,
                None => PhaseStatus::Upcoming,
            };

            let actual_days = record.and_then(|record| {
                record.completed_on.map(|completed_on| {
                    self.scheduler
                        .actual_duration(record.started_on, completed_on)
                })
            });

            phases.push(PhaseTimelineEntry {
                phase: definition.phase,
                phase_label: definition.phase.label(),
                order: definition.order,
                standard_duration_days: definition.standard_duration_days,
                planned_start,
                planned_end,
                status,
                status_label: status.label(),
                started_on: record.map(|record| record.started_on),
                completed_on: record.and_then(|record| record.completed_on),
                actual_days,
                variance: actual_days
                    .map(|actual| variance(definition.standard_duration_days, actual)),
                variance_label: actual_days
                    .map(|actual| format_variance(definition.standard_duration_days, actual)),
            });

            planned_start = planned_end;
        }

        let current_phase = self.current_phase();
        let confirmed_go_live = self
            .records
            .get(&PhaseType::GoLive)
            .and_then(|record| record.completed_on);

        let projected_go_live = match confirmed_go_live {
            Some(date) => date,
            None => {
                let current_start = self
                    .records
                    .get(&current_phase)
                    .map(|record| record.started_on)
                    .or_else(|| {
                        current_phase
                            .previous()
                            .and_then(|previous| self.records.get(&previous))
                            .and_then(|record| record.completed_on)
                    })
                    .unwrap_or(phases[current_phase.index()].planned_start);
                self.scheduler
                    .projected_completion_date(current_phase, current_start)
                    .ok_or(JourneyError::OutOfRange {
                        phase: current_phase,
                    })?
            }
        };

        Ok(JourneyReport {
            journey_start: self.journey_start,
            current_phase,
            current_phase_label: current_phase.label(),
            projected_go_live,
            go_live_confirmed: confirmed_go_live.is_some(),
            phases,
        })
    }
}
