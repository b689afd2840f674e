use crate::backend::{Backend, BackendError};
use crate::domain::models::Receivable;
use crate::services::output::Notify;

const TABLE: &str = "receivables";

pub const STATUS_PAID: &str = "pagado";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Receivable>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Receivable> {
    list(backend, notify)?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

pub fn upsert(backend: &Backend, receivable: &Receivable) -> anyhow::Result<()> {
    backend.upsert(TABLE, serde_json::to_value(receivable)?)
}

pub fn mark_paid(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Receivable> {
    let mut receivable = get(backend, notify, id)?;
    receivable.status = Some(STATUS_PAID.to_string());
    upsert(backend, &receivable)?;
    Ok(receivable)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}

/// Case-insensitive paid check; the source data capitalizes statuses
/// inconsistently.
pub fn is_paid(status: Option<&str>) -> bool {
    status
        .map(|s| s.eq_ignore_ascii_case(STATUS_PAID))
        .unwrap_or(false)
}
