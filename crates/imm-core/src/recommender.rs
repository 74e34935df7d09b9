//! Due-now recommendations from the loaded schedule definitions.
//!
//! NIP entries are due when `due <= age <= max` (inclusive, an absent max is
//! unbounded). IAP doses are due during `[due, due + 30]` days; the yearly
//! token applies from day 180 on and post-exposure doses are never
//! recommended. A vaccine appears once per dose window it currently
//! satisfies.

use std::cmp::Ordering;
use std::path::Path;

use tracing::debug;

use imm_model::{
    ANNUAL_TOKEN, AgeDialect, AgeInput, AllSchedules, DAYS_PER_MONTH, DayCount,
    FormattedIapEntry, FormattedSchedule, IapSchedule, NipSchedule, POST_EXPOSURE_TOKEN,
    Recommendation, ScheduleType,
};
use imm_standards::{iap_schedule_path, load_iap_schedule, load_nip_schedule, nip_schedule_path};

use crate::age::{ANNUAL_START_DAYS, normalize_age, normalize_max_age};
use crate::format::format_iap_schedule;

/// Width of an IAP dose window after its due day.
pub const IAP_WINDOW_DAYS: u32 = DAYS_PER_MONTH;

/// `due_age` shown for yearly IAP doses.
pub const ANNUAL_DUE_AGE: &str = "Annual";

fn within(age_days: f64, due: DayCount, max: DayCount) -> bool {
    due.cmp_age(age_days) != Ordering::Greater && max.cmp_age(age_days) != Ordering::Less
}

/// Query engine over one immutable pair of schedule definitions.
#[derive(Debug, Clone)]
pub struct VaccineRecommender {
    nip: NipSchedule,
    iap: IapSchedule,
}

impl VaccineRecommender {
    pub fn new(nip: NipSchedule, iap: IapSchedule) -> Self {
        Self { nip, iap }
    }

    /// Load both definitions; a missing or corrupt file is an error.
    pub fn from_files(nip_path: &Path, iap_path: &Path) -> imm_standards::Result<Self> {
        let nip = load_nip_schedule(nip_path)?;
        let iap = load_iap_schedule(iap_path)?;
        Ok(Self::new(nip, iap))
    }

    pub fn from_standards_dir(root: &Path) -> imm_standards::Result<Self> {
        Self::from_files(&nip_schedule_path(root), &iap_schedule_path(root))
    }

    pub fn nip_schedule(&self) -> &NipSchedule {
        &self.nip
    }

    pub fn iap_schedule(&self) -> &IapSchedule {
        &self.iap
    }

    pub fn get_nip_recommendations(&self, age_days: f64) -> Vec<Recommendation> {
        let recommendations: Vec<Recommendation> = self
            .nip
            .schedule
            .iter()
            .filter(|entry| {
                let due = normalize_age(&entry.due_age, AgeDialect::Nip);
                let max = normalize_max_age(entry.max_age.as_deref(), AgeDialect::Nip);
                within(age_days, due, max)
            })
            .map(Recommendation::from_nip)
            .collect();
        debug!(
            recommendation_count = recommendations.len(),
            "computed NIP recommendations"
        );
        recommendations
    }

    pub fn get_iap_recommendations(&self, age_days: f64) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        for vaccine in &self.iap.schedule {
            for token in &vaccine.schedule {
                match token.as_str() {
                    ANNUAL_TOKEN => {
                        if age_days >= f64::from(ANNUAL_START_DAYS) {
                            recommendations.push(Recommendation::from_iap(
                                vaccine,
                                ANNUAL_DUE_AGE,
                                true,
                            ));
                        }
                    }
                    POST_EXPOSURE_TOKEN => {}
                    _ => {
                        let due = normalize_age(token, AgeDialect::Iap);
                        if within(age_days, due, due.plus_days(IAP_WINDOW_DAYS)) {
                            recommendations.push(Recommendation::from_iap(vaccine, token, false));
                        }
                    }
                }
            }
        }
        debug!(
            recommendation_count = recommendations.len(),
            "computed IAP recommendations"
        );
        recommendations
    }

    /// NIP recommendations for a validated age, followed by IAP ones when
    /// `include_iap` is set.
    pub fn recommend(&self, age: &AgeInput, include_iap: bool) -> Vec<Recommendation> {
        let age_days = age.to_days();
        let mut recommendations = self.get_nip_recommendations(age_days);
        if include_iap {
            recommendations.extend(self.get_iap_recommendations(age_days));
        }
        recommendations
    }

    pub fn get_all_schedules(&self) -> AllSchedules<'_> {
        AllSchedules {
            nip: &self.nip.schedule,
            iap: &self.iap.schedule,
            iap_categories: &self.iap.categories,
        }
    }

    pub fn get_formatted_schedule(&self, schedule_type: ScheduleType) -> FormattedSchedule {
        match schedule_type {
            ScheduleType::Nip => FormattedSchedule::Nip(self.nip.schedule.clone()),
            ScheduleType::Iap => FormattedSchedule::Iap(
                self.iap
                    .schedule
                    .iter()
                    .map(|vaccine| FormattedIapEntry {
                        vaccine: vaccine.vaccine.clone(),
                        schedule: format_iap_schedule(&vaccine.schedule, &self.iap.age_units),
                        category: vaccine.category.clone(),
                    })
                    .collect(),
            ),
        }
    }
}
