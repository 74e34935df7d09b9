#![deny(unsafe_code)]

pub mod builder;
pub mod error;
pub mod loaders;
pub mod paths;

pub use crate::builder::{
    UNCATEGORIZED, build_iap_definition, build_nip_definition, write_definition,
};
pub use crate::error::{Result, StandardsError};
pub use crate::loaders::{
    load_default_iap_schedule, load_default_nip_schedule, load_iap_schedule, load_nip_schedule,
    load_schedules,
};
pub use crate::paths::{
    IAP_SCHEDULE_FILE, NIP_SCHEDULE_FILE, STANDARDS_ENV_VAR, VOCABULARY_FILE, iap_schedule_path,
    nip_schedule_path, resolve_standards_root, standards_root, vocabulary_path,
};
