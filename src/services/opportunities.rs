use crate::backend::{Backend, BackendError};
use crate::domain::models::Opportunity;
use crate::services::output::Notify;

const TABLE: &str = "opportunities";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Opportunity>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Opportunity> {
    list(backend, notify)?
        .into_iter()
        .find(|o| o.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

pub fn upsert(backend: &Backend, opportunity: &Opportunity) -> anyhow::Result<()> {
    backend.upsert(TABLE, serde_json::to_value(opportunity)?)
}

pub fn set_stage(
    backend: &Backend,
    notify: &dyn Notify,
    id: &str,
    stage: &str,
) -> anyhow::Result<Opportunity> {
    let mut opportunity = get(backend, notify, id)?;
    opportunity.stage = Some(stage.to_string());
    upsert(backend, &opportunity)?;
    Ok(opportunity)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}
