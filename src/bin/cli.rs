//! Salesboard CLI
//!
//! Command-line interface for Salesboard operations:
//! - Sign in and out of the demo account
//! - Fetch one widget or the whole dashboard
//! - Seed the local SQLite store
//! - Print a default config

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use salesboard::config::{generate_default_config, Config, StoreBackend};
use salesboard::notify::{Notifier, ToastLevel};
use salesboard::session::SessionContext;
use salesboard::store::SqliteStore;
use salesboard::views::{
    format_number, DisplayField, MonthlyComparisonRow, ProductRow, SalesChartPoint, SalesTableRow,
};
use salesboard::widgets::{Dashboard, DataSources, Panel, PanelData, WidgetKind, WidgetState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales analytics dashboard from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with the demo account
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show session and data source status
    Status,

    /// Fetch a single widget
    Widget {
        /// One of: sales-overview, monthly-comparison, user-metrics,
        /// sales-comparison, inventory-status, product-performance
        slug: String,
    },

    /// Fetch all six widgets
    Dashboard,

    /// Create the SQLite tables and fill them with demo rows
    Seed {
        /// Database path (default: store.sqlite_path from config)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints toasts to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        let tag = match level {
            ToastLevel::Success => "ok",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warn",
            ToastLevel::Error => "error",
        };
        eprintln!("[{}] {}", tag, message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    config.logging.init();

    let notifier = Arc::new(ConsoleNotifier);

    match cli.command {
        Commands::Login { username, password } => {
            let mut session = SessionContext::from_config(&config.session, notifier);
            if !session.authenticate(&username, &password) {
                std::process::exit(1);
            }
            println!("Signed in as {}", username);
        }

        Commands::Logout => {
            let mut session = SessionContext::from_config(&config.session, notifier);
            session.clear();
        }

        Commands::Status => {
            let session = SessionContext::from_config(&config.session, notifier);

            println!("Salesboard v{}", env!("CARGO_PKG_VERSION"));
            println!();
            match session.username() {
                Some(username) => println!("Session: signed in as {}", username),
                None if session.is_authenticated() => println!("Session: signed in"),
                None => println!("Session: signed out"),
            }
            println!("Metrics API: {}", config.remote.base_url);
            match config.store.backend {
                StoreBackend::Sqlite => println!("Tables: sqlite ({})", config.store.sqlite_path),
                StoreBackend::Rest => println!("Tables: rest ({})", config.store.rest_url),
            }
        }

        Commands::Widget { slug } => {
            let Some(kind) = WidgetKind::from_slug(&slug) else {
                let known: Vec<_> = WidgetKind::ALL.iter().map(|k| k.slug()).collect();
                bail!("Unknown widget '{}'. Known widgets: {}", slug, known.join(", "));
            };
            let sources = signed_in_sources(&config, notifier)?;
            let panel = Dashboard::mount_one(sources, kind).await;
            print_panels(&[panel], cli.format)?;
        }

        Commands::Dashboard => {
            let sources = signed_in_sources(&config, notifier)?;
            let panels = Dashboard::mount(sources).await;
            print_panels(&panels, cli.format)?;
        }

        Commands::Seed { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(&config.store.sqlite_path));
            let store = SqliteStore::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            let summary = store.seed_demo().await?;
            println!("Seeded {}", path.display());
            println!("  monthly_comparison: {} rows", summary.monthly_comparison);
            println!("  sales_data: {} rows", summary.sales_data);
            println!("  product_data: {} rows", summary.product_data);
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Data sources, but only with a signed-in session
fn signed_in_sources(
    config: &Config,
    notifier: Arc<ConsoleNotifier>,
) -> anyhow::Result<Arc<DataSources>> {
    let session = SessionContext::from_config(&config.session, notifier.clone());
    if !session.is_authenticated() {
        bail!("Not signed in. Run: salesboard-cli login -u <username> -p <password>");
    }
    let sources = DataSources::from_config(config, notifier)
        .context("Failed to set up data sources")?;
    Ok(Arc::new(sources))
}

fn print_panels(panels: &[Panel], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(panels)?);
        }
        OutputFormat::Text => {
            for (i, panel) in panels.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_panel(panel);
            }
        }
    }
    Ok(())
}

fn print_panel(panel: &Panel) {
    println!("== {} ==", panel.title);
    match &panel.state {
        WidgetState::Ready(data) => print_data(data),
        WidgetState::Failed(e) => println!("  No data available ({})", e),
        other => println!("  {}", other.label()),
    }
}

fn print_data(data: &PanelData) {
    match data {
        PanelData::SalesOverview(view) => print_fields(&view.fields()),
        PanelData::UserMetrics(view) => print_fields(&view.fields()),
        PanelData::InventoryStatus(view) => print_fields(&view.fields()),
        PanelData::MonthlyComparison(rows) => print_monthly(rows),
        PanelData::ProductPerformance(rows) => print_products(rows),
        PanelData::SalesComparison(panel) => {
            match &panel.chart {
                Some(points) => print_chart(points),
                None => println!("  No data available for sales comparison chart"),
            }
            println!();
            print_sales_table(&panel.table);
        }
    }
}

fn print_fields(fields: &[DisplayField]) {
    for field in fields {
        println!("  {:<16} {}", format!("{}:", field.label), field.value);
    }
}

fn print_monthly(rows: &[MonthlyComparisonRow]) {
    println!("  {:<4} {:<12} {:>14} {:>14}", "ID", "Month", "This Year", "Last Year");
    for row in rows {
        println!(
            "  {:<4} {:<12} {:>14} {:>14}",
            row.id,
            row.name,
            format_number(row.value),
            format_number(row.previous_value)
        );
    }
}

fn print_chart(points: &[SalesChartPoint]) {
    println!("  {:<8} {:>12} {:>14}", "Time", "Web", "Offline");
    for point in points {
        println!(
            "  {:<8} {:>12} {:>14}",
            point.date,
            format_number(point.web_sales),
            format_number(point.offline_sales)
        );
    }
}

fn print_sales_table(rows: &[SalesTableRow]) {
    println!("  {:<4} {:<22} {:>12} {:>14}", "ID", "Date", "Web Sales", "Offline Sales");
    for row in rows {
        println!(
            "  {:<4} {:<22} {:>12} {:>14}",
            row.id,
            row.date,
            format_number(row.web_sales),
            format_number(row.offline_sales)
        );
    }
}

fn print_products(rows: &[ProductRow]) {
    println!(
        "  {:<4} {:<20} {:>10} {:>12} {:>14} {:>7}",
        "ID", "Product", "Sold", "Unit Price", "Revenue", "Rating"
    );
    for row in rows {
        println!(
            "  {:<4} {:<20} {:>10} {:>12} {:>14} {:>7}",
            row.id,
            row.product,
            format_number(row.sold_amount),
            format!("${}", format_number(row.unit_price)),
            format!("${}", format_number(row.revenue)),
            format_number(row.rating)
        );
    }
}
