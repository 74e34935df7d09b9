//! Records produced by table extraction.
//!
//! Serde names match the headers of the persisted intermediate tables, so the
//! same types are used for writing and re-reading them.

use serde::{Deserialize, Serialize};

/// One row of the linear (NIP) schedule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineRecord {
    #[serde(rename = "Vaccine")]
    pub vaccine: String,
    /// Raw age expression, possibly several comma-separated phrases.
    #[serde(rename = "When to give")]
    pub when_to_give: String,
    #[serde(rename = "Dose")]
    pub dose: String,
    #[serde(rename = "Route")]
    pub route: String,
    #[serde(rename = "Site", default)]
    pub site: String,
    /// Upper age bound; never present in the extracted table.
    #[serde(skip)]
    pub max_age: Option<String>,
}

impl VaccineRecord {
    pub fn new(
        vaccine: impl Into<String>,
        when_to_give: impl Into<String>,
        dose: impl Into<String>,
        route: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        Self {
            vaccine: vaccine.into(),
            when_to_give: when_to_give.into(),
            dose: dose.into(),
            route: route.into(),
            site: site.into(),
            max_age: None,
        }
    }

    /// Apply `f` to every text cell, producing a new record.
    #[must_use]
    pub fn map_cells(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            vaccine: f(&self.vaccine),
            when_to_give: f(&self.when_to_give),
            dose: f(&self.dose),
            route: f(&self.route),
            site: f(&self.site),
            max_age: self.max_age.as_deref().map(&f),
        }
    }
}

/// One (vaccine, age column, dose code) cell of the matrix (IAP) schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    #[serde(rename = "Vaccine")]
    pub vaccine: String,
    #[serde(rename = "Age")]
    pub age_token: String,
    #[serde(rename = "Dose")]
    pub dose_code: String,
}

impl MatrixEntry {
    pub fn new(
        vaccine: impl Into<String>,
        age_token: impl Into<String>,
        dose_code: impl Into<String>,
    ) -> Self {
        Self {
            vaccine: vaccine.into(),
            age_token: age_token.into(),
            dose_code: dose_code.into(),
        }
    }

    #[must_use]
    pub fn map_cells(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            vaccine: f(&self.vaccine),
            age_token: f(&self.age_token),
            dose_code: f(&self.dose_code),
        }
    }
}
