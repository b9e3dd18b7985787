//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sitescout_core::pipeline::{EnrichConfig, ProgressReporter, RunSummary, run_enrich};
use sitescout_search::{DuckDuckGoSearch, GoogleSearch, QUERY_PACING, SearchProvider};
use sitescout_shared::{
    AppConfig, VerifyConfig, google_credentials, init_config, load_config,
};
use sitescout_verifier::Verifier;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SiteScout, find and verify official websites for a list of organizations.
#[derive(Parser)]
#[command(
    name = "sitescout",
    version,
    about = "Enrich a CSV of organization names with verified official websites.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enrich a table: dedup, find missing websites, verify, classify.
    Enrich {
        /// Input CSV path.
        input: PathBuf,

        /// Output CSV path (defaults to <input>_enriched.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Search provider: google or duckduckgo.
        #[arg(short, long)]
        provider: Option<String>,

        /// Duplicate similarity threshold, 0.0 to 1.0.
        #[arg(long)]
        threshold: Option<f64>,

        /// Query variants to try per unresolved name.
        #[arg(long)]
        max_queries: Option<usize>,

        /// Concurrent URL verifications.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request verification timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Skip the search stage entirely; only dedup, verify, classify.
        #[arg(long)]
        offline: bool,
    },

    /// Verify a single URL and print the result.
    Check {
        /// URL to check (http:// is assumed when no scheme is given).
        url: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
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
        0 => "sitescout=info",
        1 => "sitescout=debug",
        _ => "sitescout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Enrich {
            input,
            output,
            provider,
            threshold,
            max_queries,
            concurrency,
            timeout,
            offline,
        } => {
            cmd_enrich(EnrichArgs {
                input,
                output,
                provider,
                threshold,
                max_queries,
                concurrency,
                timeout,
                offline,
            })
            .await
        }
        Command::Check { url } => cmd_check(&url).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// enrich
// ---------------------------------------------------------------------------

struct EnrichArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    provider: Option<String>,
    threshold: Option<f64>,
    max_queries: Option<usize>,
    concurrency: Option<usize>,
    timeout: Option<u64>,
    offline: bool,
}

async fn cmd_enrich(args: EnrichArgs) -> Result<()> {
    let config = load_config()?;

    let threshold = args.threshold.unwrap_or(config.defaults.similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(eyre!("threshold {threshold} out of range: expected 0.0 to 1.0"));
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    let mut verify = VerifyConfig::from(&config);
    if let Some(concurrency) = args.concurrency {
        verify.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        verify.timeout_secs = timeout;
    }

    let provider_name = args
        .provider
        .unwrap_or_else(|| config.defaults.provider.clone());

    let provider = build_provider(&provider_name, &config, args.offline)?;

    let enrich_config = EnrichConfig {
        input: args.input.clone(),
        output: output.clone(),
        similarity_threshold: threshold,
        max_queries: args.max_queries.unwrap_or(config.defaults.max_queries),
        query_pacing: QUERY_PACING,
        verify,
    };

    info!(
        input = %args.input.display(),
        output = %output.display(),
        provider = %provider_name,
        offline = args.offline,
        "starting enrich run"
    );

    let reporter = CliProgress::new();
    let summary = run_enrich(&enrich_config, provider.as_deref(), &reporter).await?;

    println!();
    println!("  Enrichment complete!");
    println!("  Rows:       {}", summary.total);
    println!("  Duplicates: {}", summary.duplicates);
    println!("  Found URLs: {}", summary.found);
    println!("  Working:    {}", summary.working);
    println!("  Failing:    {}", summary.failing);
    println!("  No URL:     {}", summary.no_url);
    println!("  Output:     {}", output.display());
    println!("  Time:       {:.1}s", summary.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// `names.csv` becomes `names_enriched.csv`, next to the input.
fn default_output_path(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{stem}_enriched.{ext}"))
}

/// Construct the configured search provider, validating credentials up
/// front so a bad key fails before any table work starts.
fn build_provider(
    name: &str,
    config: &AppConfig,
    offline: bool,
) -> Result<Option<Box<dyn SearchProvider>>> {
    if offline {
        return Ok(None);
    }

    match name {
        "google" => {
            let (api_key, cse_id) = google_credentials(config)?;
            Ok(Some(Box::new(GoogleSearch::new(api_key, cse_id)?)))
        }
        "duckduckgo" => Ok(Some(Box::new(DuckDuckGoSearch::new()?))),
        other => Err(eyre!(
            "unknown provider '{other}': expected 'google' or 'duckduckgo'"
        )),
    }
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
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn name_resolved(&self, name: &str, found: bool, current: usize, total: usize) {
        let mark = if found { "+" } else { "-" };
        self.spinner
            .set_message(format!("Resolving [{current}/{total}] {mark} {name}"));
    }

    fn done(&self, _summary: &RunSummary) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

async fn cmd_check(url: &str) -> Result<()> {
    let verifier = Verifier::with_defaults()?;
    let verification = verifier.verify(url).await;

    println!();
    println!("  URL:     {url}");
    println!("  Works:   {}", if verification.works { "yes" } else { "no" });
    println!("  Status:  {}", verification.status);
    println!("  Checked: {}", verification.checked_at.to_rfc3339());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
