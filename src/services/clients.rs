use crate::backend::{Backend, BackendError};
use crate::domain::models::Client;
use crate::services::output::Notify;

const TABLE: &str = "clients";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Client>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Client> {
    list(backend, notify)?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

pub fn upsert(backend: &Backend, client: &Client) -> anyhow::Result<()> {
    backend.upsert(TABLE, serde_json::to_value(client)?)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}
