use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub const DEFAULT_BACKEND_SOURCE: &str = "./data";

#[derive(Parser, Debug)]
#[command(name = "cartera", version, about = "Cartera CRM workspace CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Backend source (dir of <table>.json files, workspace .json file, or https base URL)"
    )]
    pub backend: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },
    Companies {
        #[command(subcommand)]
        command: CompanyCommands,
    },
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    Quotes {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    Opportunities {
        #[command(subcommand)]
        command: OpportunityCommands,
    },
    Receivables {
        #[command(subcommand)]
        command: ReceivableCommands,
    },
    Backend {
        #[command(subcommand)]
        command: BackendCommands,
    },
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    Validate,
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    List {
        query: Option<String>,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        name: String,
        #[arg(long)]
        company_id: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    List {
        query: Option<String>,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        name: String,
        #[arg(long)]
        tax_id: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        sector: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    List {
        query: Option<String>,
        #[arg(long, default_value_t = false, help = "Only active products")]
        active: bool,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        name: String,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        unit_price: f64,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    List {
        #[arg(long, help = "Free-text match on client, folio, or id")]
        query: Option<String>,
        #[arg(long, help = "Exact status match, case-insensitive ('all' disables)")]
        status: Option<String>,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        #[arg(long, help = "Client display name")]
        client: String,
        #[arg(long)]
        client_id: Option<String>,
        #[arg(long)]
        folio: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        issued: Option<NaiveDate>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        valid_until: Option<NaiveDate>,
        #[arg(long = "item", help = "Line item DESCRIPTION:QTY:UNIT_PRICE, repeatable")]
        items: Vec<String>,
        #[arg(long, help = "Explicit total; ignored when line items are given")]
        total: Option<f64>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OpportunityCommands {
    List {
        query: Option<String>,
        #[arg(long)]
        stage: Option<String>,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        name: String,
        #[arg(long)]
        client_id: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        value: Option<f64>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        close_date: Option<NaiveDate>,
    },
    SetStage {
        id: String,
        stage: String,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReceivableCommands {
    List {
        #[arg(long, help = "Free-text match on client, invoice, or id")]
        query: Option<String>,
        #[arg(long, help = "Exact status match, case-insensitive ('all' disables)")]
        status: Option<String>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        due_from: Option<NaiveDate>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        due_to: Option<NaiveDate>,
        #[arg(long, help = "Lower amount bound; non-numeric input is ignored")]
        min_amount: Option<String>,
        #[arg(long, help = "Upper amount bound; non-numeric input is ignored")]
        max_amount: Option<String>,
    },
    Show {
        id: String,
    },
    Add {
        id: String,
        #[arg(long, help = "Client display name")]
        client: String,
        #[arg(long)]
        invoice: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, value_parser = crate::filter::parse_date)]
        due: Option<NaiveDate>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    MarkPaid {
        id: String,
    },
    Agenda {
        #[arg(long, help = "Month as YYYY-MM, defaults to the current month")]
        month: Option<String>,
    },
    Summary,
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackendCommands {
    Show,
    Set { source: String },
    Refresh,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    Login {
        #[arg(long)]
        token: String,
    },
    Logout,
    Status,
}
