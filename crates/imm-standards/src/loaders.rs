use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use imm_model::{IapSchedule, NipSchedule};

use crate::error::{Result, StandardsError};
use crate::paths::{iap_schedule_path, nip_schedule_path, standards_root};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Err(StandardsError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| StandardsError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StandardsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_nip_schedule(path: &Path) -> Result<NipSchedule> {
    let schedule: NipSchedule = read_json(path)?;
    debug!(
        path = %path.display(),
        entry_count = schedule.schedule.len(),
        "loaded NIP schedule"
    );
    Ok(schedule)
}

pub fn load_iap_schedule(path: &Path) -> Result<IapSchedule> {
    let schedule: IapSchedule = read_json(path)?;
    debug!(
        path = %path.display(),
        vaccine_count = schedule.schedule.len(),
        category_count = schedule.categories.len(),
        "loaded IAP schedule"
    );
    Ok(schedule)
}

/// Load both definitions from one standards directory.
pub fn load_schedules(root: &Path) -> Result<(NipSchedule, IapSchedule)> {
    let nip = load_nip_schedule(&nip_schedule_path(root))?;
    let iap = load_iap_schedule(&iap_schedule_path(root))?;
    Ok((nip, iap))
}

pub fn load_default_nip_schedule() -> Result<NipSchedule> {
    load_nip_schedule(&nip_schedule_path(&standards_root()))
}

pub fn load_default_iap_schedule() -> Result<IapSchedule> {
    load_iap_schedule(&iap_schedule_path(&standards_root()))
}
