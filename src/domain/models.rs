use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::Filterable;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub unit_price: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuoteItem {
    #[serde(default)]
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Quote {
    pub id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    pub client_name: String,
    /// Human-facing quote number, e.g. "COT-2024-017".
    #[serde(default)]
    pub folio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub issued: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub total: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Receivable {
    pub id: String,
    pub client_name: String,
    /// Invoice/document number backing this collection item.
    #[serde(default)]
    pub invoice: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Filterable for Receivable {
    fn id(&self) -> &str {
        &self.id
    }
    fn subject(&self) -> &str {
        &self.client_name
    }
    fn reference(&self) -> Option<&str> {
        self.invoice.as_deref()
    }
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
    fn amount(&self) -> Option<f64> {
        self.amount
    }
}

impl Filterable for Quote {
    fn id(&self) -> &str {
        &self.id
    }
    fn subject(&self) -> &str {
        &self.client_name
    }
    fn reference(&self) -> Option<&str> {
        self.folio.as_deref()
    }
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn due_date(&self) -> Option<NaiveDate> {
        self.valid_until
    }
    fn amount(&self) -> Option<f64> {
        self.total
    }
}

#[derive(Debug, Serialize)]
pub struct AgendaEntry {
    pub id: String,
    pub client_name: String,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub total: f64,
    pub overdue: bool,
    pub entries: Vec<AgendaEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatusBucket {
    pub status: String,
    pub count: usize,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_count: usize,
    pub total_amount: f64,
    pub buckets: Vec<StatusBucket>,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub backend: String,
}

#[derive(Serialize)]
pub struct BackendInfo {
    pub source: String,
    pub kind: String,
    pub cached_tables: usize,
}
