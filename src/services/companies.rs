use crate::backend::{Backend, BackendError};
use crate::domain::models::Company;
use crate::services::output::Notify;

const TABLE: &str = "companies";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Company>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Company> {
    list(backend, notify)?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

pub fn upsert(backend: &Backend, company: &Company) -> anyhow::Result<()> {
    backend.upsert(TABLE, serde_json::to_value(company)?)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}
