//! Canonical definitions built from extracted tables.
//!
//! NIP records map one-to-one onto schedule entries with `due_age` taken
//! verbatim from "When to give". Matrix entries are grouped per vaccine in
//! first-seen order; a group's age tokens are de-duplicated keeping their
//! first occurrence, and the header token `birth` becomes [`BIRTH_TOKEN`].

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use imm_model::{
    BIRTH_TOKEN, IapSchedule, IapVaccine, MatrixEntry, NipSchedule, NipScheduleEntry,
    VaccineRecord, default_age_units,
};

use crate::error::{Result, StandardsError};

/// Category used when the caller has none for a vaccine.
pub const UNCATEGORIZED: &str = "Uncategorized";

pub fn build_nip_definition(records: &[VaccineRecord]) -> NipSchedule {
    let schedule = records
        .iter()
        .map(|record| NipScheduleEntry {
            vaccine: record.vaccine.clone(),
            due_age: record.when_to_give.clone(),
            max_age: None,
            dose: record.dose.clone(),
            route: record.route.clone(),
            site: record.site.clone(),
        })
        .collect();
    NipSchedule { schedule }
}

fn canonical_token(raw: &str) -> String {
    let token = raw.trim();
    if token.eq_ignore_ascii_case("birth") {
        BIRTH_TOKEN.to_string()
    } else {
        token.to_string()
    }
}

/// Group matrix entries into an IAP definition.
///
/// `categories` maps vaccine names to their category; vaccines missing from
/// it get [`UNCATEGORIZED`].
pub fn build_iap_definition(
    entries: &[MatrixEntry],
    categories: &BTreeMap<String, String>,
) -> IapSchedule {
    let mut vaccines: Vec<IapVaccine> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let index = *positions.entry(entry.vaccine.as_str()).or_insert_with(|| {
            let category = categories
                .get(&entry.vaccine)
                .map_or(UNCATEGORIZED, String::as_str);
            vaccines.push(IapVaccine {
                vaccine: entry.vaccine.clone(),
                category: category.to_string(),
                schedule: Vec::new(),
            });
            vaccines.len() - 1
        });
        let token = canonical_token(&entry.age_token);
        if token.is_empty() {
            continue;
        }
        let schedule = &mut vaccines[index].schedule;
        if !schedule.contains(&token) {
            schedule.push(token);
        }
    }

    let mut distinct: Vec<String> = Vec::new();
    for vaccine in &vaccines {
        if !distinct.contains(&vaccine.category) {
            distinct.push(vaccine.category.clone());
        }
    }

    IapSchedule {
        schedule: vaccines,
        age_units: default_age_units(),
        categories: distinct,
    }
}

/// Write a definition as pretty JSON, creating parent directories.
pub fn write_definition<T: Serialize>(path: &Path, definition: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StandardsError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| StandardsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, definition).map_err(|source| {
        StandardsError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| StandardsError::io(path, e))?;
    info!(path = %path.display(), "wrote schedule definition");
    Ok(())
}
