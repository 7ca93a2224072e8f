use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use wordcheck::banner::{PROMPT, print_banner};
use wordcheck::consts::{DEFAULT_LOOKUP_TIMEOUT, DICTIONARY_API_URL};
use wordcheck::dictionary::free::FreeDictionary;
use wordcheck::engine::Engine;
use wordcheck::engine::fanout::{EngineConfig, FanOutEngine};
use wordcheck::events::EventBus;
use wordcheck::report;
use wordcheck::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "wordcheck",
    version,
    about = "Check a word: definition, palindrome, repeated letters, permutations."
)]
struct Cli {
    /// Word to check. Prompts for one when omitted.
    word: Option<String>,

    /// Dictionary service base URL (the word is appended as a path segment)
    #[arg(long, default_value = DICTIONARY_API_URL)]
    api_url: String,

    /// Definition lookup timeout in seconds (0 waits indefinitely)
    #[arg(short, long, default_value_t = DEFAULT_LOOKUP_TIMEOUT.as_secs())]
    timeout: u64,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log debug output to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let word = match cli.word.clone() {
        Some(word) => word,
        None => prompt_for_word().await?,
    };

    let dictionary =
        FreeDictionary::with_base_url(&cli.api_url).context("failed to set up dictionary client")?;
    let config = EngineConfig {
        lookup_timeout: (cli.timeout > 0).then(|| std::time::Duration::from_secs(cli.timeout)),
        ..EngineConfig::default()
    };

    let events = Arc::new(EventBus::default());
    let engine = FanOutEngine::new(Arc::new(dictionary), config).with_events(Arc::clone(&events));

    let spinner = (cli.format == Format::Text && io::stderr().is_terminal())
        .then(|| Spinner::start(&format!("analyzing {word}"), Some(events.subscribe())));

    let result = engine.analyze(&word).await;

    if let Some(spinner) = spinner {
        spinner.stop().await;
    }

    let result = result.context("analysis failed")?;
    match cli.format {
        Format::Text => print!("{}", report::text(&result)),
        Format::Json => println!("{}", report::json(&result)?),
    }
    Ok(())
}

/// Read one line from stdin. Any failure here is fatal.
async fn prompt_for_word() -> anyhow::Result<String> {
    print_banner();
    print!("{PROMPT}");
    io::stdout().flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    match lines.next_line().await.context("failed to read word")? {
        Some(line) => Ok(line.trim_end_matches('\r').to_string()),
        None => bail!("no word provided"),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "wordcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
