pub mod age;
pub mod error;
pub mod recommendation;
pub mod records;
pub mod schedule;

pub use age::{
    AgeDialect, AgeInput, AgeUnit, DAYS_PER_MONTH, DAYS_PER_WEEK, DAYS_PER_YEAR, DayCount,
};
pub use error::{AgeInputError, Result};
pub use recommendation::{
    AllSchedules, FormattedIapEntry, FormattedSchedule, NIP_CATEGORY, Recommendation,
    ScheduleType,
};
pub use records::{MatrixEntry, VaccineRecord};
pub use schedule::{
    ANNUAL_TOKEN, BIRTH_TOKEN, IapSchedule, IapVaccine, NipSchedule, NipScheduleEntry,
    POST_EXPOSURE_TOKEN, default_age_units,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nip_recommendation_carries_source_fields() {
        let entry = NipScheduleEntry {
            vaccine: "BCG".to_string(),
            due_age: "At birth".to_string(),
            max_age: Some("1 year".to_string()),
            dose: "0.1 ml".to_string(),
            route: "Intra-dermal".to_string(),
            site: "Left Upper Arm".to_string(),
        };
        let rec = Recommendation::from_nip(&entry);
        assert_eq!(rec.vaccine, "BCG");
        assert_eq!(rec.schedule_type, ScheduleType::Nip);
        assert_eq!(rec.category, NIP_CATEGORY);
        assert_eq!(rec.due_age, "At birth");
        assert_eq!(rec.max_age.as_deref(), Some("1 year"));
        assert_eq!(rec.is_annual, None);
    }

    #[test]
    fn recommendation_serializes_without_empty_fields() {
        let vaccine = IapVaccine {
            vaccine: "Influenza".to_string(),
            category: "Routine".to_string(),
            schedule: vec![ANNUAL_TOKEN.to_string()],
        };
        let rec = Recommendation::from_iap(&vaccine, "Annual", true);
        let json = serde_json::to_value(&rec).expect("serialize recommendation");
        assert_eq!(json["schedule_type"], "IAP");
        assert_eq!(json["is_annual"], true);
        assert!(json.get("dose").is_none());
        assert!(json.get("max_age").is_none());
    }
}
