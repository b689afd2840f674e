//! Table-style backend client.
//!
//! A backend *source* is one of:
//! - a directory holding one `<table>.json` array per table,
//! - a single workspace `.json` file mapping table names to row arrays,
//! - an HTTP(S) base URL serving `GET/PUT/DELETE {base}/{table}[/{id}]`
//!   (a bare `host.tld/name` shorthand is normalized to `https://`).
//!
//! Remote reads are cached under `~/.cache/cartera/`; when the backend is
//! unreachable and a cache exists, the cached rows are served and the
//! notification sink is told. Reads of a missing local table yield an empty
//! table rather than an error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::output::Notify;

pub const TABLES: &[&str] = &[
    "clients",
    "companies",
    "products",
    "quotes",
    "opportunities",
    "receivables",
];

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("row not found: {0}/{1}")]
    NotFound(String, String),
    #[error("row in {0} is missing a non-empty id")]
    EmptyId(String),
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("unsupported operation for source: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    WorkspaceFile,
    Remote,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Directory => "directory",
            SourceKind::WorkspaceFile => "file",
            SourceKind::Remote => "remote",
        }
    }
}

fn looks_like_host_shorthand(source: &str) -> bool {
    match source.split_once('/') {
        Some((host, _)) => host.contains('.') && !source.contains("://") && !source.starts_with('.'),
        None => false,
    }
}

fn normalize_source(source: &str) -> String {
    if looks_like_host_shorthand(source) {
        format!("https://{}", source)
    } else {
        source.to_string()
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://")
        || source.starts_with("https://")
        || looks_like_host_shorthand(source)
}

pub fn source_kind(source: &str) -> SourceKind {
    if is_remote(source) {
        SourceKind::Remote
    } else if Path::new(source).is_dir() {
        SourceKind::Directory
    } else {
        SourceKind::WorkspaceFile
    }
}

fn cache_dir(source: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("cartera")
        .join("tables")
        .join(id))
}

pub fn cached_tables(source: &str) -> usize {
    let Ok(dir) = cache_dir(source) else {
        return 0;
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .count()
}

pub fn row_id(row: &Value) -> Option<&str> {
    row.get("id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct Backend {
    pub source: String,
    pub token: Option<String>,
    pub timeout_ms: u64,
}

impl Backend {
    pub fn kind(&self) -> SourceKind {
        source_kind(&self.source)
    }

    fn table_url(&self, table: &str) -> String {
        let base = normalize_source(&self.source);
        format!("{}/{}", base.trim_end_matches('/'), table)
    }

    fn http_client(&self) -> anyhow::Result<reqwest::blocking::Client> {
        Ok(reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()?)
    }

    fn fetch_table_text(&self, table: &str) -> anyhow::Result<String> {
        let client = self.http_client()?;
        let mut req = client.get(self.table_url(table));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?.error_for_status()?;
        Ok(resp.text()?)
    }

    /// Re-fetch and cache every table. Local sources have nothing to
    /// refresh and report zero.
    pub fn refresh(&self) -> anyhow::Result<usize> {
        if self.kind() != SourceKind::Remote {
            return Ok(0);
        }
        let dir = cache_dir(&self.source)?;
        std::fs::create_dir_all(&dir)?;
        let mut refreshed = 0usize;
        for table in TABLES {
            let body = self
                .fetch_table_text(table)
                .map_err(|e| BackendError::Unreachable(e.to_string()))?;
            parse_row_array(&body)?;
            std::fs::write(dir.join(format!("{}.json", table)), body)?;
            refreshed += 1;
        }
        Ok(refreshed)
    }

    pub fn select_values(&self, table: &str, notify: &dyn Notify) -> anyhow::Result<Vec<Value>> {
        match self.kind() {
            SourceKind::Remote => {
                let dir = cache_dir(&self.source)?;
                let cached = dir.join(format!("{}.json", table));
                match self.fetch_table_text(table) {
                    Ok(body) => {
                        let rows = parse_row_array(&body)?;
                        std::fs::create_dir_all(&dir)?;
                        std::fs::write(&cached, &body)?;
                        Ok(rows)
                    }
                    Err(_) if cached.exists() => {
                        notify.notice(&format!(
                            "backend unreachable, using cached data for {}",
                            table
                        ));
                        let raw = std::fs::read_to_string(cached)?;
                        parse_row_array(&raw)
                    }
                    Err(e) => Err(BackendError::Unreachable(e.to_string()).into()),
                }
            }
            SourceKind::Directory => {
                let path = Path::new(&self.source).join(format!("{}.json", table));
                if !path.exists() {
                    return Ok(vec![]);
                }
                let raw = std::fs::read_to_string(path)?;
                parse_row_array(&raw)
            }
            SourceKind::WorkspaceFile => {
                let path = Path::new(&self.source);
                if !path.exists() {
                    return Ok(vec![]);
                }
                let doc: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
                match doc.get(table) {
                    Some(Value::Array(rows)) => Ok(rows.clone()),
                    _ => Ok(vec![]),
                }
            }
        }
    }

    pub fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        notify: &dyn Notify,
    ) -> anyhow::Result<Vec<T>> {
        let rows = self.select_values(table, notify)?;
        Ok(serde_json::from_value(Value::Array(rows))?)
    }

    /// Insert-or-replace by id.
    pub fn upsert(&self, table: &str, row: Value) -> anyhow::Result<()> {
        let id = row_id(&row)
            .ok_or_else(|| BackendError::EmptyId(table.to_string()))?
            .to_string();
        match self.kind() {
            SourceKind::Remote => {
                let client = self.http_client()?;
                let url = format!("{}/{}", self.table_url(table), id);
                let mut req = client.put(url).json(&row);
                if let Some(token) = &self.token {
                    req = req.bearer_auth(token);
                }
                req.send()
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| BackendError::Unreachable(e.to_string()))?;
                Ok(())
            }
            _ => self.mutate_local(table, |rows| {
                match rows.iter_mut().find(|r| row_id(r) == Some(id.as_str())) {
                    Some(existing) => *existing = row.clone(),
                    None => rows.push(row.clone()),
                }
                Ok(())
            }),
        }
    }

    pub fn delete(&self, table: &str, id: &str) -> anyhow::Result<()> {
        match self.kind() {
            SourceKind::Remote => {
                let client = self.http_client()?;
                let url = format!("{}/{}", self.table_url(table), id);
                let mut req = client.delete(url);
                if let Some(token) = &self.token {
                    req = req.bearer_auth(token);
                }
                let resp = req
                    .send()
                    .map_err(|e| BackendError::Unreachable(e.to_string()))?;
                if resp.status() == reqwest::StatusCode::NOT_FOUND {
                    return Err(
                        BackendError::NotFound(table.to_string(), id.to_string()).into(),
                    );
                }
                resp.error_for_status()
                    .map_err(|e| BackendError::Unreachable(e.to_string()))?;
                Ok(())
            }
            _ => self.mutate_local(table, |rows| {
                let before = rows.len();
                rows.retain(|r| row_id(r) != Some(id));
                if rows.len() == before {
                    return Err(
                        BackendError::NotFound(table.to_string(), id.to_string()).into(),
                    );
                }
                Ok(())
            }),
        }
    }

    fn mutate_local(
        &self,
        table: &str,
        op: impl FnOnce(&mut Vec<Value>) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        match self.kind() {
            SourceKind::Directory => {
                let path = Path::new(&self.source).join(format!("{}.json", table));
                let mut rows = if path.exists() {
                    parse_row_array(&std::fs::read_to_string(&path)?)?
                } else {
                    vec![]
                };
                op(&mut rows)?;
                std::fs::create_dir_all(&self.source)?;
                std::fs::write(path, serde_json::to_string_pretty(&rows)?)?;
                Ok(())
            }
            SourceKind::WorkspaceFile => {
                let path = Path::new(&self.source);
                let mut doc: Value = if path.exists() {
                    serde_json::from_str(&std::fs::read_to_string(path)?)?
                } else {
                    serde_json::json!({})
                };
                if !doc.is_object() {
                    anyhow::bail!("workspace file must hold a JSON object of tables");
                }
                let mut rows = match doc.get(table) {
                    Some(Value::Array(rows)) => rows.clone(),
                    _ => vec![],
                };
                op(&mut rows)?;
                doc[table] = Value::Array(rows);
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
                Ok(())
            }
            SourceKind::Remote => {
                Err(BackendError::Unsupported(self.source.clone()).into())
            }
        }
    }
}

fn parse_row_array(raw: &str) -> anyhow::Result<Vec<Value>> {
    let doc: Value = serde_json::from_str(raw)?;
    match doc {
        Value::Array(rows) => Ok(rows),
        _ => anyhow::bail!("expected a JSON array of rows"),
    }
}
