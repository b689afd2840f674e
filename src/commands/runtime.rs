use crate::*;

use crate::filter::{self, FilterCriteria};
use chrono::Datelike;

pub fn handle_entity_commands(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Clients { command } => handle_clients(cli, backend, notify, command)?,
        Commands::Companies { command } => handle_companies(cli, backend, notify, command)?,
        Commands::Products { command } => handle_products(cli, backend, notify, command)?,
        Commands::Quotes { command } => handle_quotes(cli, backend, notify, command)?,
        Commands::Opportunities { command } => {
            handle_opportunities(cli, backend, notify, command)?
        }
        Commands::Receivables { command } => handle_receivables(cli, backend, notify, command)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn name_matches(query: &Option<String>, id: &str, name: &str) -> bool {
    match query {
        None => true,
        Some(q) => {
            let q = q.to_lowercase();
            id.to_lowercase().contains(&q) || name.to_lowercase().contains(&q)
        }
    }
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "n/a".to_string(),
    }
}

fn handle_clients(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &ClientCommands,
) -> anyhow::Result<()> {
    match command {
        ClientCommands::List { query } => {
            let mut items = clients::list(backend, notify)?;
            items.retain(|c| name_matches(query, &c.id, &c.name));
            print_out(cli.json, &items, |c| {
                format!("{}\t{}\t{}", c.id, c.name, fmt_opt(c.city.as_deref()))
            })?;
        }
        ClientCommands::Show { id } => {
            let c = clients::get(backend, notify, id)?;
            print_one(cli.json, c, |c| {
                format!(
                    "{}\t{}\t{}\t{}",
                    c.id,
                    c.name,
                    fmt_opt(c.email.as_deref()),
                    fmt_opt(c.phone.as_deref())
                )
            })?;
        }
        ClientCommands::Add {
            id,
            name,
            company_id,
            email,
            phone,
            city,
        } => {
            let entry = Client {
                id: id.clone(),
                name: name.clone(),
                company_id: company_id.clone(),
                email: email.clone(),
                phone: phone.clone(),
                city: city.clone(),
            };
            clients::upsert(backend, &entry)?;
            storage::audit("client_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |c| format!("saved client {}", c.id))?;
        }
        ClientCommands::Remove { id } => {
            clients::remove(backend, id)?;
            storage::audit("client_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed client {}", i))?;
        }
    }
    Ok(())
}

fn handle_companies(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &CompanyCommands,
) -> anyhow::Result<()> {
    match command {
        CompanyCommands::List { query } => {
            let mut items = companies::list(backend, notify)?;
            items.retain(|c| name_matches(query, &c.id, &c.name));
            print_out(cli.json, &items, |c| {
                format!("{}\t{}\t{}", c.id, c.name, fmt_opt(c.sector.as_deref()))
            })?;
        }
        CompanyCommands::Show { id } => {
            let c = companies::get(backend, notify, id)?;
            print_one(cli.json, c, |c| {
                format!(
                    "{}\t{}\t{}\t{}",
                    c.id,
                    c.name,
                    fmt_opt(c.tax_id.as_deref()),
                    fmt_opt(c.city.as_deref())
                )
            })?;
        }
        CompanyCommands::Add {
            id,
            name,
            tax_id,
            city,
            sector,
        } => {
            let entry = Company {
                id: id.clone(),
                name: name.clone(),
                tax_id: tax_id.clone(),
                city: city.clone(),
                sector: sector.clone(),
            };
            companies::upsert(backend, &entry)?;
            storage::audit("company_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |c| format!("saved company {}", c.id))?;
        }
        CompanyCommands::Remove { id } => {
            companies::remove(backend, id)?;
            storage::audit("company_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed company {}", i))?;
        }
    }
    Ok(())
}

fn handle_products(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &ProductCommands,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List { query, active } => {
            let mut items = products::list(backend, notify)?;
            items.retain(|p| name_matches(query, &p.id, &p.name));
            if *active {
                items.retain(|p| p.active);
            }
            print_out(cli.json, &items, |p| {
                format!(
                    "{}\t{}\t{}\t{:.2}",
                    p.id,
                    p.name,
                    fmt_opt(p.sku.as_deref()),
                    p.unit_price
                )
            })?;
        }
        ProductCommands::Show { id } => {
            let p = products::get(backend, notify, id)?;
            print_one(cli.json, p, |p| {
                format!("{}\t{}\t{:.2}\tactive={}", p.id, p.name, p.unit_price, p.active)
            })?;
        }
        ProductCommands::Add {
            id,
            name,
            sku,
            unit_price,
        } => {
            let entry = Product {
                id: id.clone(),
                name: name.clone(),
                sku: sku.clone(),
                unit_price: *unit_price,
                active: true,
            };
            products::upsert(backend, &entry)?;
            storage::audit("product_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |p| format!("saved product {}", p.id))?;
        }
        ProductCommands::Remove { id } => {
            products::remove(backend, id)?;
            storage::audit("product_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed product {}", i))?;
        }
    }
    Ok(())
}

fn handle_quotes(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &QuoteCommands,
) -> anyhow::Result<()> {
    match command {
        QuoteCommands::List { query, status } => {
            let rows = quotes::list(backend, notify)?;
            let mut criteria = FilterCriteria::default();
            if let Some(q) = query {
                criteria.text_query = q.clone();
            }
            if let Some(s) = status {
                criteria.status = s.clone();
            }
            let view = filter::filter(&rows, &criteria);
            print_out(cli.json, &view, |q| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    q.id,
                    q.client_name,
                    fmt_opt(q.folio.as_deref()),
                    fmt_opt(q.status.as_deref()),
                    fmt_amount(q.total)
                )
            })?;
        }
        QuoteCommands::Show { id } => {
            let q = quotes::get(backend, notify, id)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: q })?
                );
            } else {
                println!("id: {}", q.id);
                println!("client: {}", q.client_name);
                println!("folio: {}", fmt_opt(q.folio.as_deref()));
                println!("status: {}", fmt_opt(q.status.as_deref()));
                println!("valid_until: {}", fmt_date(q.valid_until));
                for item in &q.items {
                    println!(
                        "item: {}\t{} x {:.2}",
                        item.description, item.quantity, item.unit_price
                    );
                }
                println!("total: {}", fmt_amount(q.total));
            }
        }
        QuoteCommands::Add {
            id,
            client,
            client_id,
            folio,
            status,
            issued,
            valid_until,
            items,
            total,
        } => {
            let parsed: Vec<QuoteItem> = items
                .iter()
                .map(|raw| quotes::parse_item(raw))
                .collect::<anyhow::Result<_>>()?;
            let entry = Quote {
                id: id.clone(),
                client_id: client_id.clone(),
                client_name: client.clone(),
                folio: folio.clone(),
                status: status.clone(),
                issued: *issued,
                valid_until: *valid_until,
                items: parsed,
                total: *total,
            };
            quotes::upsert(backend, &entry)?;
            storage::audit("quote_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |q| format!("saved quote {}", q.id))?;
        }
        QuoteCommands::Remove { id } => {
            quotes::remove(backend, id)?;
            storage::audit("quote_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed quote {}", i))?;
        }
    }
    Ok(())
}

fn handle_opportunities(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &OpportunityCommands,
) -> anyhow::Result<()> {
    match command {
        OpportunityCommands::List { query, stage } => {
            let mut items = opportunities::list(backend, notify)?;
            items.retain(|o| name_matches(query, &o.id, &o.name));
            if let Some(stage) = stage {
                items.retain(|o| {
                    o.stage
                        .as_deref()
                        .map(|s| s.eq_ignore_ascii_case(stage))
                        .unwrap_or(false)
                });
            }
            print_out(cli.json, &items, |o| {
                format!(
                    "{}\t{}\t{}\t{}",
                    o.id,
                    o.name,
                    fmt_opt(o.stage.as_deref()),
                    fmt_amount(o.estimated_value)
                )
            })?;
        }
        OpportunityCommands::Show { id } => {
            let o = opportunities::get(backend, notify, id)?;
            print_one(cli.json, o, |o| {
                format!(
                    "{}\t{}\t{}\tclose={}",
                    o.id,
                    o.name,
                    fmt_opt(o.stage.as_deref()),
                    fmt_date(o.close_date)
                )
            })?;
        }
        OpportunityCommands::Add {
            id,
            name,
            client_id,
            stage,
            value,
            close_date,
        } => {
            let entry = Opportunity {
                id: id.clone(),
                name: name.clone(),
                client_id: client_id.clone(),
                stage: stage.clone(),
                estimated_value: *value,
                close_date: *close_date,
            };
            opportunities::upsert(backend, &entry)?;
            storage::audit("opportunity_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |o| format!("saved opportunity {}", o.id))?;
        }
        OpportunityCommands::SetStage { id, stage } => {
            let updated = opportunities::set_stage(backend, notify, id, stage)?;
            storage::audit(
                "opportunity_set_stage",
                serde_json::json!({"id": id, "stage": stage}),
            );
            print_one(cli.json, updated, |o| {
                format!("{} now in stage {}", o.id, fmt_opt(o.stage.as_deref()))
            })?;
        }
        OpportunityCommands::Remove { id } => {
            opportunities::remove(backend, id)?;
            storage::audit("opportunity_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed opportunity {}", i))?;
        }
    }
    Ok(())
}

fn handle_receivables(
    cli: &Cli,
    backend: &Backend,
    notify: &dyn Notify,
    command: &ReceivableCommands,
) -> anyhow::Result<()> {
    match command {
        ReceivableCommands::List {
            query,
            status,
            due_from,
            due_to,
            min_amount,
            max_amount,
        } => {
            let rows = receivables::list(backend, notify)?;
            let mut criteria = FilterCriteria::default();
            if let Some(q) = query {
                criteria.text_query = q.clone();
            }
            if let Some(s) = status {
                criteria.status = s.clone();
            }
            criteria.due_from = *due_from;
            criteria.due_to = *due_to;
            criteria.amount_min = min_amount.as_deref().and_then(filter::parse_amount);
            criteria.amount_max = max_amount.as_deref().and_then(filter::parse_amount);
            let view = filter::filter(&rows, &criteria);
            print_out(cli.json, &view, |r| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    r.id,
                    r.client_name,
                    fmt_opt(r.invoice.as_deref()),
                    fmt_opt(r.status.as_deref()),
                    fmt_date(r.due_date),
                    fmt_amount(r.amount)
                )
            })?;
        }
        ReceivableCommands::Show { id } => {
            let r = receivables::get(backend, notify, id)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: r })?
                );
            } else {
                println!("id: {}", r.id);
                println!("client: {}", r.client_name);
                println!("invoice: {}", fmt_opt(r.invoice.as_deref()));
                println!("status: {}", fmt_opt(r.status.as_deref()));
                println!("due: {}", fmt_date(r.due_date));
                println!("amount: {}", fmt_amount(r.amount));
                if let Some(notes) = &r.notes {
                    println!("notes: {}", notes);
                }
            }
        }
        ReceivableCommands::Add {
            id,
            client,
            invoice,
            status,
            due,
            amount,
            method,
            notes,
        } => {
            let entry = Receivable {
                id: id.clone(),
                client_name: client.clone(),
                invoice: invoice.clone(),
                status: status.clone(),
                due_date: *due,
                amount: *amount,
                method: method.clone(),
                notes: notes.clone(),
            };
            receivables::upsert(backend, &entry)?;
            storage::audit("receivable_add", serde_json::json!({"id": entry.id}));
            print_one(cli.json, entry, |r| format!("saved receivable {}", r.id))?;
        }
        ReceivableCommands::MarkPaid { id } => {
            let updated = receivables::mark_paid(backend, notify, id)?;
            storage::audit("receivable_mark_paid", serde_json::json!({"id": id}));
            print_one(cli.json, updated, |r| format!("marked {} paid", r.id))?;
        }
        ReceivableCommands::Agenda { month } => {
            let rows = receivables::list(backend, notify)?;
            let today = chrono::Local::now().date_naive();
            let (year, month) = match month {
                Some(raw) => reports::parse_month(raw)?,
                None => (today.year(), today.month()),
            };
            let agenda = reports::month_agenda(&rows, year, month, today);
            print_out(cli.json, &agenda, |day| {
                format!(
                    "{}\t{} due\t{:.2}{}",
                    day.date,
                    day.entries.len(),
                    day.total,
                    if day.overdue { "\toverdue" } else { "" }
                )
            })?;
        }
        ReceivableCommands::Summary => {
            let rows = receivables::list(backend, notify)?;
            let summary = reports::status_summary(&rows);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: summary
                    })?
                );
            } else {
                println!("receivables: {}", summary.total_count);
                println!("total: {:.2}", summary.total_amount);
                for b in &summary.buckets {
                    println!("{}\t{}\t{:.2}", b.status, b.count, b.amount);
                }
            }
        }
        ReceivableCommands::Remove { id } => {
            receivables::remove(backend, id)?;
            storage::audit("receivable_remove", serde_json::json!({"id": id}));
            print_one(cli.json, id.clone(), |i| format!("removed receivable {}", i))?;
        }
    }
    Ok(())
}
