use super::calendar::{add_business_days, business_days_between};
use super::catalog::PhaseCatalog;
use super::domain::{PhaseType, ScheduleVariance, VarianceStatus};
use chrono::NaiveDate;

/// Stateless calculator over a phase catalog.
#[derive(Debug, Clone, Copy)]
pub struct PhaseScheduler<'a> {
    catalog: &'a PhaseCatalog,
}

impl PhaseScheduler<'static> {
    pub fn standard() -> Self {
        Self::new(PhaseCatalog::standard())
    }
}

impl<'a> PhaseScheduler<'a> {
    pub fn new(catalog: &'a PhaseCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a PhaseCatalog {
        self.catalog
    }

    pub fn standard_duration(&self, phase: PhaseType) -> u32 {
        self.catalog.standard_duration(phase)
    }

    pub fn phase_display_name(&self, phase: PhaseType) -> &'static str {
        self.catalog.phase_display_name(phase)
    }

    /// `None` only when the end date falls past the supported calendar.
    pub fn planned_end_date(&self, start: NaiveDate, phase: PhaseType) -> Option<NaiveDate> {
        add_business_days(start, self.standard_duration(phase))
    }

    pub fn actual_duration(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        business_days_between(start, end)
    }

    /// Estimated go-live date when `current_phase` began on
    /// `current_phase_start`.
    ///
    /// This is a heuristic, not a committed date: the current phase is
    /// assumed half elapsed, every later delivery phase is assumed to run to
    /// its standard duration, and post-completion phases are left out.
    pub fn projected_completion_date(
        &self,
        current_phase: PhaseType,
        current_phase_start: NaiveDate,
    ) -> Option<NaiveDate> {
        add_business_days(current_phase_start, self.remaining_days(current_phase))
    }

    pub fn remaining_days(&self, current_phase: PhaseType) -> u32 {
        let current = self.standard_duration(current_phase).div_ceil(2);
        let following: u32 = self
            .catalog
            .phases_after(current_phase)
            .iter()
            .take_while(|definition| !definition.post_completion)
            .map(|definition| definition.standard_duration_days)
            .sum();

        current + following
    }
}

/// `percent` rounds halves upward, so -12.5% reports as -12 and 12.5% as 13.
pub fn variance(planned_days: u32, actual_days: u32) -> ScheduleVariance {
    let days = i64::from(actual_days) - i64::from(planned_days);
    let planned = i64::from(planned_days);
    let percent = if planned == 0 {
        0
    } else {
        // floor(100 * days / planned + 1/2)
        (200 * days + planned).div_euclid(2 * planned)
    };

    let status = match days {
        d if d < 0 => VarianceStatus::Early,
        d if d > 0 => VarianceStatus::Late,
        _ => VarianceStatus::OnTime,
    };

    ScheduleVariance {
        days,
        percent,
        status,
    }
}

pub fn format_variance(planned_days: u32, actual_days: u32) -> String {
    let ScheduleVariance { days, status, .. } = variance(planned_days, actual_days);
    let magnitude = days.unsigned_abs();
    let unit = if magnitude == 1 { "day" } else { "days" };

    match status {
        VarianceStatus::OnTime => "On time".to_string(),
        VarianceStatus::Early => format!("{magnitude} {unit} early"),
        VarianceStatus::Late => format!("{magnitude} {unit} over"),
    }
}
