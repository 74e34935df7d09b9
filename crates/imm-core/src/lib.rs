pub mod age;
pub mod format;
pub mod recommender;

pub use age::{ANNUAL_START_DAYS, normalize_age, normalize_max_age};
pub use format::{format_iap_schedule, format_iap_token};
pub use recommender::{ANNUAL_DUE_AGE, IAP_WINDOW_DAYS, VaccineRecommender};
