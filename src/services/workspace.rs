use std::collections::HashSet;

use crate::backend::{row_id, Backend, SourceKind, TABLES};
use crate::domain::models::{CheckItem, DoctorReport};
use crate::services::output::Notify;
use crate::services::storage;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("row in {0} is missing a non-empty id")]
    EmptyId(String),
    #[error("duplicate id in {0}: {1}")]
    DuplicateId(String, String),
    #[error("{0} row {1} references unknown client: {2}")]
    UnknownClient(String, String, String),
}

/// Dataset sanity: every row has a non-empty id, unique within its table;
/// quotes and opportunities that carry a client_id must point at an
/// existing client. Fails on the first violation.
pub fn validate(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<()> {
    let mut client_ids: HashSet<String> = HashSet::new();
    for table in TABLES {
        let rows = backend.select_values(table, notify)?;
        let mut seen = HashSet::new();
        for row in &rows {
            let id =
                row_id(row).ok_or_else(|| ValidationError::EmptyId(table.to_string()))?;
            if !seen.insert(id.to_string()) {
                return Err(
                    ValidationError::DuplicateId(table.to_string(), id.to_string()).into(),
                );
            }
            if *table == "clients" {
                client_ids.insert(id.to_string());
            }
        }
        // clients is first in TABLES, so the id set is complete here
        if *table == "quotes" || *table == "opportunities" {
            for row in &rows {
                if let Some(client_id) = row.get("client_id").and_then(|v| v.as_str()) {
                    if !client_ids.contains(client_id) {
                        return Err(ValidationError::UnknownClient(
                            table.to_string(),
                            row_id(row).unwrap_or("?").to_string(),
                            client_id.to_string(),
                        )
                        .into());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Environment report. Never fails the process; each check reports ok or
/// warn.
fn ok_warn(cond: bool) -> String {
    let status = if cond { "ok" } else { "warn" };
    status.to_string()
}

pub fn doctor(backend: &Backend) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(CheckItem {
        name: "config_file".to_string(),
        status: ok_warn(storage::config_file_exists()),
    });
    checks.push(CheckItem {
        name: "state_file".to_string(),
        status: ok_warn(storage::state_file_exists()),
    });
    checks.push(CheckItem {
        name: "session_token".to_string(),
        status: ok_warn(backend.token.is_some()),
    });
    checks.push(CheckItem {
        name: format!("backend_source:{}", backend.kind().name()),
        status: match backend.kind() {
            SourceKind::Remote => ok_warn(crate::backend::cached_tables(&backend.source) > 0),
            _ => ok_warn(std::path::Path::new(&backend.source).exists()),
        },
    });

    let overall = if checks.iter().all(|c| c.status == "ok") {
        "ok"
    } else {
        "warn"
    };
    DoctorReport {
        overall: overall.to_string(),
        checks,
    }
}
