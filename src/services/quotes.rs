use crate::backend::{Backend, BackendError};
use crate::domain::models::{Quote, QuoteItem};
use crate::services::output::Notify;

const TABLE: &str = "quotes";

pub fn list(backend: &Backend, notify: &dyn Notify) -> anyhow::Result<Vec<Quote>> {
    backend.select(TABLE, notify)
}

pub fn get(backend: &Backend, notify: &dyn Notify, id: &str) -> anyhow::Result<Quote> {
    list(backend, notify)?
        .into_iter()
        .find(|q| q.id == id)
        .ok_or_else(|| BackendError::NotFound(TABLE.to_string(), id.to_string()).into())
}

/// Upsert with the total kept consistent: when the quote carries line items,
/// the stored total is recomputed from them.
pub fn upsert(backend: &Backend, quote: &Quote) -> anyhow::Result<()> {
    let mut quote = quote.clone();
    if !quote.items.is_empty() {
        quote.total = Some(quote_total(&quote.items));
    }
    backend.upsert(TABLE, serde_json::to_value(&quote)?)
}

pub fn remove(backend: &Backend, id: &str) -> anyhow::Result<()> {
    backend.delete(TABLE, id)
}

pub fn quote_total(items: &[QuoteItem]) -> f64 {
    items.iter().map(|i| i.quantity * i.unit_price).sum()
}

/// Parse a `--item` flag of the form `DESCRIPTION:QTY:UNIT_PRICE`. The
/// description may itself contain colons; quantity and price may not.
pub fn parse_item(raw: &str) -> anyhow::Result<QuoteItem> {
    let mut parts = raw.rsplitn(3, ':');
    let price = parts.next().unwrap_or_default();
    let qty = parts.next();
    let description = parts.next();
    let (Some(qty), Some(description)) = (qty, description) else {
        anyhow::bail!("invalid item: {} (expected DESCRIPTION:QTY:UNIT_PRICE)", raw);
    };
    let quantity: f64 = qty
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid item quantity: {}", qty))?;
    let unit_price: f64 = price
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid item price: {}", price))?;
    Ok(QuoteItem {
        product_id: None,
        description: description.trim().to_string(),
        quantity,
        unit_price,
    })
}
