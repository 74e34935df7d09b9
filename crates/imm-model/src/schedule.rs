//! Canonical schedule definitions, one document per programme.
//!
//! ```text
//! NIP: {"schedule": [{vaccine, due_age, max_age?, dose, route, site}, ...]}
//! IAP: {"schedule": [{vaccine, category, schedule: [token, ...]}, ...],
//!       "age_units": {"w": "weeks", ...}, "categories": [...]}
//! ```
//!
//! Definitions are loaded once and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// IAP token for a dose given at birth.
pub const BIRTH_TOKEN: &str = "Birth";
/// IAP token for a yearly dose starting at six months.
pub const ANNUAL_TOKEN: &str = "Annually from 6m";
/// IAP token for a dose only given after exposure.
pub const POST_EXPOSURE_TOKEN: &str = "Post-exposure";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NipScheduleEntry {
    pub vaccine: String,
    pub due_age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub site: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NipSchedule {
    pub schedule: Vec<NipScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IapVaccine {
    pub vaccine: String,
    #[serde(default)]
    pub category: String,
    /// Age tokens in schedule order.
    pub schedule: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IapSchedule {
    pub schedule: Vec<IapVaccine>,
    /// Unit suffix letter to display name.
    #[serde(default = "default_age_units")]
    pub age_units: BTreeMap<String, String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Default for IapSchedule {
    fn default() -> Self {
        Self {
            schedule: Vec::new(),
            age_units: default_age_units(),
            categories: Vec::new(),
        }
    }
}

pub fn default_age_units() -> BTreeMap<String, String> {
    [("w", "weeks"), ("m", "months"), ("y", "years")]
        .into_iter()
        .map(|(suffix, name)| (suffix.to_string(), name.to_string()))
        .collect()
}
