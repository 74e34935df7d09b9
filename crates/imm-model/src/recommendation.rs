use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schedule::{IapVaccine, NipScheduleEntry};

/// Category attached to every NIP recommendation.
pub const NIP_CATEGORY: &str = "Government Program";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    #[serde(rename = "NIP")]
    Nip,
    #[serde(rename = "IAP")]
    Iap,
}

impl ScheduleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nip => "NIP",
            Self::Iap => "IAP",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vaccine due for a given child age.
///
/// Built fresh per query from an immutable schedule entry; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub vaccine: String,
    pub schedule_type: ScheduleType,
    pub category: String,
    /// Display form of the age this dose is due at.
    pub due_age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Full IAP schedule of the vaccine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<String>,
    /// Only set for IAP recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_annual: Option<bool>,
}

impl Recommendation {
    pub fn from_nip(entry: &NipScheduleEntry) -> Self {
        Self {
            vaccine: entry.vaccine.clone(),
            schedule_type: ScheduleType::Nip,
            category: NIP_CATEGORY.to_string(),
            due_age: entry.due_age.clone(),
            max_age: entry.max_age.clone(),
            dose: Some(entry.dose.clone()),
            route: Some(entry.route.clone()),
            site: Some(entry.site.clone()),
            schedule: Vec::new(),
            is_annual: None,
        }
    }

    pub fn from_iap(vaccine: &IapVaccine, due_age: &str, is_annual: bool) -> Self {
        Self {
            vaccine: vaccine.vaccine.clone(),
            schedule_type: ScheduleType::Iap,
            category: vaccine.category.clone(),
            due_age: due_age.to_string(),
            max_age: None,
            dose: None,
            route: None,
            site: None,
            schedule: vaccine.schedule.clone(),
            is_annual: Some(is_annual),
        }
    }

    pub fn is_annual(&self) -> bool {
        self.is_annual.unwrap_or(false)
    }
}

/// An IAP vaccine with its schedule rendered for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedIapEntry {
    pub vaccine: String,
    /// Human-readable ages joined with ", ".
    pub schedule: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedSchedule {
    Nip(Vec<NipScheduleEntry>),
    Iap(Vec<FormattedIapEntry>),
}

impl FormattedSchedule {
    pub fn len(&self) -> usize {
        match self {
            Self::Nip(entries) => entries.len(),
            Self::Iap(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Both programmes side by side, borrowed from the loaded definitions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AllSchedules<'a> {
    pub nip: &'a [NipScheduleEntry],
    pub iap: &'a [IapVaccine],
    pub iap_categories: &'a [String],
}
