use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::domain::models::{AgendaDay, AgendaEntry, Receivable, StatusBucket, StatusSummary};
use crate::services::receivables::is_paid;

pub fn parse_month(raw: &str) -> anyhow::Result<(i32, u32)> {
    let parts = raw.trim().split_once('-');
    let parsed = parts.and_then(|(y, m)| {
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        (1..=12).contains(&month).then_some((year, month))
    });
    parsed.ok_or_else(|| anyhow::anyhow!("invalid month: {} (expected YYYY-MM)", raw))
}

/// Bucket receivables by due date within one month. Days without entries
/// are omitted; a past day with at least one unpaid entry is flagged
/// overdue. Entries without a due date never appear in an agenda.
pub fn month_agenda(
    rows: &[Receivable],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Vec<AgendaDay> {
    let mut days: BTreeMap<NaiveDate, Vec<&Receivable>> = BTreeMap::new();
    for r in rows {
        let Some(due) = r.due_date else {
            continue;
        };
        if due.year() == year && due.month() == month {
            days.entry(due).or_default().push(r);
        }
    }

    days.into_iter()
        .map(|(date, entries)| AgendaDay {
            date,
            total: entries.iter().filter_map(|r| r.amount).sum(),
            overdue: date < today && entries.iter().any(|r| !is_paid(r.status.as_deref())),
            entries: entries
                .iter()
                .map(|r| AgendaEntry {
                    id: r.id.clone(),
                    client_name: r.client_name.clone(),
                    amount: r.amount,
                    status: r.status.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Count and total per status, case-insensitively; rows without a status
/// land in a "none" bucket. Buckets come out sorted by status name.
pub fn status_summary(rows: &[Receivable]) -> StatusSummary {
    let mut buckets: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    let mut total_amount = 0.0;
    for r in rows {
        let key = r
            .status
            .as_deref()
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "none".to_string());
        let entry = buckets.entry(key).or_default();
        entry.0 += 1;
        entry.1 += r.amount.unwrap_or(0.0);
        total_amount += r.amount.unwrap_or(0.0);
    }
    StatusSummary {
        total_count: rows.len(),
        total_amount,
        buckets: buckets
            .into_iter()
            .map(|(status, (count, amount))| StatusBucket {
                status,
                count,
                amount,
            })
            .collect(),
    }
}
