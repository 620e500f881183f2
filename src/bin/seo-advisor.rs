use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use seo_advisor::render::{AnalysisView, RenderSurface, render_text};
use seo_advisor::{FormInput, Lifecycle, Settings, SubmitOutcome, country};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "seo-advisor",
    version,
    about = "Submit a page to the on-page SEO advisor and print the findings"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a URL for a target keyword.
    Analyze(AnalyzeArgs),
    /// Print the two-letter code a country name resolves to.
    Country {
        /// Country name or code (e.g., "United Kingdom", "ie")
        name: Option<String>,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Page to analyze (absolute URL)
    #[arg(short, long)]
    url: String,
    /// Target keyword
    #[arg(short, long)]
    keyword: String,
    /// Country name or two-letter code (defaults to us)
    #[arg(short, long, default_value = "")]
    country: String,
    /// Analysis endpoint.
    #[arg(long, env = "SEO_ADVISOR_API_URL", default_value = seo_advisor::config::DEFAULT_API_URL)]
    api_url: String,
    /// Request deadline in milliseconds.
    #[arg(long, env = "SEO_ADVISOR_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,
    /// Locale for grouping counts (en, de, fr, es, it, pt, nl).
    #[arg(long, env = "SEO_ADVISOR_LOCALE", default_value = "en")]
    locale: String,
    /// Print the projected panels as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Terminal rendering surface: results to stdout, progress and errors to stderr.
struct Terminal {
    json: bool,
}

impl RenderSurface for Terminal {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            eprintln!("Analyzing...");
        }
    }

    fn show_results(&mut self, view: &AnalysisView) {
        if self.json {
            match serde_json::to_string_pretty(view) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("failed to serialize results: {}", e),
            }
        } else {
            print!("{}", render_text(view));
        }
    }

    fn hide_results(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Country { name } => {
            println!("{}", country::resolve(name.as_deref()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    let settings = Settings::default()
        .with_api_url(args.api_url)
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .with_locale(args.locale);
    let form = FormInput::new(args.url, args.keyword, args.country);
    let mut surface = Terminal { json: args.json };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let lifecycle = Lifecycle::new(settings);
    let outcome = runtime.block_on(lifecycle.submit(&form, &mut surface));

    Ok(match outcome {
        SubmitOutcome::Succeeded(_) => ExitCode::SUCCESS,
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy => ExitCode::FAILURE,
    })
}
