use clap::Parser;

mod backend;
mod cli;
mod commands;
mod domain;
mod filter;
mod services;

pub use backend::{cached_tables, Backend, BackendError, SourceKind};
pub use cli::*;
pub use domain::models::*;
pub use filter::{FilterCriteria, Filterable};
pub use services::output::*;
pub use services::{
    clients, companies, opportunities, products, quotes, receivables, reports, storage, workspace,
};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        report_failure(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let notify = StderrNotifier;
    let config = storage::load_config()?;
    let state = storage::load_state()?;
    let backend = resolve_backend(cli, &config, &state);

    if commands::handle_entity_commands(cli, &backend, &notify)? {
        return Ok(());
    }
    if commands::handle_admin_commands(cli, &backend, &notify)? {
        return Ok(());
    }
    anyhow::bail!("command not handled: {:?}", cli.command)
}

// Precedence: --backend flag, then config file, then the local default.
fn resolve_backend(cli: &Cli, config: &storage::Config, state: &State) -> Backend {
    let source = cli
        .backend
        .clone()
        .or_else(|| config.backend.source.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_SOURCE.to_string());
    Backend {
        source,
        token: state.token.clone(),
        timeout_ms: config.backend.timeout_ms,
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(be) = e.downcast_ref::<BackendError>() {
        return match be {
            BackendError::NotFound(..) => "NOT_FOUND",
            BackendError::EmptyId(..) => "VALIDATION",
            BackendError::Unreachable(..) => "BACKEND_UNREACHABLE",
            BackendError::Unsupported(..) => "UNSUPPORTED",
        };
    }
    if e.downcast_ref::<workspace::ValidationError>().is_some() {
        return "VALIDATION";
    }
    "ERROR"
}

fn report_failure(cli: &Cli, e: &anyhow::Error) {
    if cli.json {
        let out = serde_json::json!({
            "ok": false,
            "error": { "code": error_code(e), "message": format!("{:#}", e) }
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
    } else {
        eprintln!("error: {:#}", e);
    }
}
