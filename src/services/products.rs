use crate::backend::{Backend, BackendError};
use crate::domain::models::Product;
use crate::services::output::Notify;

const TABLE: &str = "products";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Product>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Product> {
    list(backend, notify)?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

pub fn upsert(backend: &Backend, product: &Product) -> anyhow::Result<()> {
    if !product.unit_price.is_finite() || product.unit_price < 0.0 {
        anyhow::bail!("unit price must be a non-negative number");
    }
    backend.upsert(TABLE, serde_json::to_value(product)?)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}
