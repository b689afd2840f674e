use crate::*;

pub fn handle_admin_commands(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Backend { command } => match command {
            BackendCommands::Show => {
                let info = BackendInfo {
                    source: backend.source.clone(),
                    kind: backend.kind().name().to_string(),
                    cached_tables: cached_tables(&backend.source),
                };
                print_one(cli.json, info, |i| {
                    format!("{}\t{}\tcached_tables={}", i.source, i.kind, i.cached_tables)
                })?;
            }
            BackendCommands::Set { source } => {
                let mut config = storage::load_config()?;
                config.backend.source = Some(source.clone());
                storage::save_config(&config)?;
                storage::audit("backend_set", serde_json::json!({"source": source}));
                print_one(cli.json, source.clone(), |s| format!("backend set to {}", s))?;
            }
            BackendCommands::Refresh => {
                let refreshed = backend.refresh()?;
                if refreshed == 0 {
                    notify.notice("local source, nothing to refresh");
                }
                print_one(cli.json, refreshed, |n| format!("refreshed {} tables", n))?;
            }
        },
        Commands::Auth { command } => match command {
            AuthCommands::Login { token } => {
                let mut state = storage::load_state()?;
                state.token = Some(token.clone());
                storage::save_state(&state)?;
                storage::audit("auth_login", serde_json::json!({}));
                print_one(cli.json, "logged_in", |_| "session token stored".to_string())?;
            }
            AuthCommands::Logout => {
                let mut state = storage::load_state()?;
                state.token = None;
                storage::save_state(&state)?;
                storage::audit("auth_logout", serde_json::json!({}));
                print_one(cli.json, "logged_out", |_| "session token cleared".to_string())?;
            }
            AuthCommands::Status => {
                let status = SessionStatus {
                    logged_in: backend.token.is_some(),
                    backend: backend.source.clone(),
                };
                print_one(cli.json, status, |s| {
                    format!("logged_in={} backend={}", s.logged_in, s.backend)
                })?;
            }
        },
        Commands::Validate => {
            workspace::validate(backend, notify)?;
            print_one(cli.json, "valid", |_| "workspace valid".to_string())?;
        }
        Commands::Doctor => {
            let report = workspace::doctor(backend);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: report.overall == "ok",
                        data: report
                    })?
                );
            } else {
                println!("overall: {}", report.overall);
                for c in report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
