use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use whoq::lookup::{self, LookupRequest};
use whoq::{batch, output};

#[derive(Parser)]
#[command(name = "whoq")]
#[command(about = "WHOIS lookup tool with referral following", long_about = None)]
struct Args {
    /// Domain(s) to query, e.g. example.com
    domains: Vec<String>,

    /// WHOIS server override (skips discovery)
    #[arg(short, long)]
    server: Option<String>,

    /// WHOIS server port
    #[arg(short, long, default_value_t = lookup::DEFAULT_PORT)]
    port: u16,

    /// Per-query timeout in seconds (fractions allowed)
    #[arg(short, long, default_value = "8", value_parser = parse_timeout)]
    timeout: Duration,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// File with one domain per line (blank lines and # comments skipped)
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Suppress the startup banner
    #[arg(short, long)]
    quiet: bool,

    /// Hide referral fields from the output
    #[arg(long)]
    no_referral: bool,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse a timeout in seconds, accepting fractional values like `0.5`.
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("'{}' is not a valid timeout", value))
}

/// Process all domains strictly sequentially, in input order. Individual
/// lookup failures are reported in the output and never abort the batch.
async fn run(args: Args) {
    output::print_banner(args.quiet);

    let mut domains = args.domains.clone();
    if let Some(path) = &args.batch {
        match batch::load_batch(path) {
            Ok(more) => domains.extend(more),
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                process::exit(2);
            }
        }
    }

    if domains.is_empty() {
        eprintln!("{}", "No domains specified. Use --help for usage.".yellow());
        process::exit(1);
    }

    let mut results = Vec::with_capacity(domains.len());

    for domain in domains {
        let request = LookupRequest {
            domain,
            server: args.server.clone(),
            port: args.port,
            timeout: args.timeout,
        };
        let result = lookup::lookup(&request).await;

        if args.output == OutputFormat::Text {
            print!("{}", output::format_text(&result, args.no_referral));
        }
        results.push(result);
    }

    if args.output == OutputFormat::Json {
        println!("{}", output::format_json(&results));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    rt.block_on(run(args));
    Ok(())
}
