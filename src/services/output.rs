use crate::domain::models::JsonOut;
use serde::Serialize;

/// Sink for non-fatal, user-visible notices (cache fallbacks, skipped
/// checks). Kept apart from the error channel so collaborators can surface
/// advisories without failing the command.
pub trait Notify {
    fn notice(&self, message: &str);
}

/// Default sink: stderr, so `--json` output on stdout stays parseable.
pub struct StderrNotifier;

impl Notify for StderrNotifier {
    fn notice(&self, message: &str) {
        eprintln!("note: {}", message);
    }
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(json: bool, data: T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn fmt_amount(amount: Option<f64>) -> String {
    match amount {
        Some(a) => format!("{:.2}", a),
        None => "n/a".to_string(),
    }
}

pub fn fmt_opt(value: Option<&str>) -> String {
    value.unwrap_or("n/a").to_string()
}
