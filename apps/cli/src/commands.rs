//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use climatemap_core::{
    CatalogReport, FacetField, FilterCriteria, NormalizeContext, ProgressReporter,
    build_catalog, fetch_report, filter_entries, unique_values,
};
use climatemap_shared::{AppConfig, Entry, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// climatemap — geocoded catalog of climate robotics organizations.
#[derive(Parser)]
#[command(
    name = "climatemap",
    version,
    about = "Build and query the climate robotics catalog from its public spreadsheet.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.climatemap/climatemap.toml.
    #[arg(long = "config", global = true, env = "CLIMATEMAP_CONFIG")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Entry output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Table,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Download the spreadsheet and print matching entries.
    Fetch {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sheet tab id, overriding the config.
        #[arg(long)]
        gid: Option<String>,

        /// Output format.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Build the catalog from a local CSV export.
    Import {
        /// Path to the CSV file.
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output format.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the distinct values of one entry field.
    Facets {
        /// Field name, e.g. continentHq, roboticsType, biome-type.
        field: FacetField,

        /// Read a local CSV export instead of downloading.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Filter flags shared by `fetch` and `import`.
#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Case-insensitive text matched against name, description, and HQ country.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact headquarters continent.
    #[arg(long)]
    pub continent: Option<String>,

    /// Exact robotics type (e.g. "Aerial Robot").
    #[arg(long)]
    pub robotics_type: Option<String>,

    /// Exact main application.
    #[arg(long)]
    pub application: Option<String>,

    /// Exact biome type.
    #[arg(long)]
    pub biome: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self {
            search: args.search,
            continent: args.continent,
            robotics_type: args.robotics_type,
            application: args.application,
            biome: args.biome,
        }
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "climatemap=info",
        1 => "climatemap=debug",
        _ => "climatemap=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_file;
    match cli.command {
        Command::Fetch {
            filters,
            gid,
            format,
        } => {
            let mut config = resolve_config(config_path.as_deref())?;
            if let Some(gid) = gid {
                config.sheet.gid = gid;
            }
            cmd_fetch(&config, filters.into(), format).await
        }
        Command::Import {
            file,
            filters,
            format,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_import(&config, &file, filters.into(), format)
        }
        Command::Facets { field, file } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_facets(&config, field, file.as_deref()).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(
    config: &AppConfig,
    criteria: FilterCriteria,
    format: OutputFormat,
) -> Result<()> {
    let report = download(config).await?;
    print_entries(&report, &criteria, format)
}

fn cmd_import(
    config: &AppConfig,
    file: &Path,
    criteria: FilterCriteria,
    format: OutputFormat,
) -> Result<()> {
    let report = read_local(config, file)?;
    print_entries(&report, &criteria, format)
}

async fn cmd_facets(config: &AppConfig, field: FacetField, file: Option<&Path>) -> Result<()> {
    let report = match file {
        Some(path) => read_local(config, path)?,
        None => download(config).await?,
    };

    let values = unique_values(&report.entries, field);
    if values.is_empty() {
        eprintln!("no text values for field '{field}'");
    }
    for value in values {
        println!("{value}");
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn download(config: &AppConfig) -> Result<CatalogReport> {
    let ctx = NormalizeContext::from_config(config)?;
    info!(url = %config.sheet.export_url(), "fetching spreadsheet export");

    let reporter = CliProgress::new();
    let result = fetch_report(&config.sheet, &ctx, &reporter).await;
    reporter.spinner.finish_and_clear();

    Ok(result?)
}

fn read_local(config: &AppConfig, file: &Path) -> Result<CatalogReport> {
    let ctx = NormalizeContext::from_config(config)?;
    let text = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;

    let report = build_catalog(&text, &ctx);
    info!(
        file = %file.display(),
        entries = report.entries.len(),
        rows = report.rows_seen,
        "built catalog from local file"
    );
    Ok(report)
}

fn print_entries(
    report: &CatalogReport,
    criteria: &FilterCriteria,
    format: OutputFormat,
) -> Result<()> {
    let matched = filter_entries(&report.entries, criteria);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matched)?),
        OutputFormat::Table => {
            for entry in &matched {
                println!("{}", table_row(entry));
            }
        }
    }

    print_summary(report, matched.len());
    Ok(())
}

fn table_row(entry: &Entry) -> String {
    let founded = entry
        .founded
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{:<10} {:<32} {:<20} {:<14} {:<18} {}",
        entry.id.to_string(),
        entry.name,
        entry.country_hq,
        entry.continent_hq,
        entry.robotics_type,
        founded
    )
}

/// Row counts go to stderr so JSON on stdout stays clean.
fn print_summary(report: &CatalogReport, shown: usize) {
    let skipped = &report.skipped;
    eprintln!();
    eprintln!("  Rows:     {}", report.rows_seen);
    eprintln!("  Entries:  {}", report.entries.len());
    eprintln!("  Shown:    {shown}");
    eprintln!(
        "  Skipped:  {} (no name: {}, header rows: {}, unknown country: {})",
        skipped.total(),
        skipped.missing_name,
        skipped.header_echo,
        skipped.unresolved_country
    );
    if !skipped.unknown_countries.is_empty() {
        let list: Vec<String> = skipped
            .unknown_countries
            .iter()
            .map(|(country, n)| format!("{country} ({n})"))
            .collect();
        eprintln!("  Unknown:  {}", list.join(", "));
    }
    eprintln!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _report: &CatalogReport) {
        self.spinner.finish_and_clear();
    }
}
