//! Command-line interface for html-normalizer.

mod error;
mod fetch;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use html_normalizer_rs::{
    HeadingLevel, NormalizeOptions, decode_html_bytes, is_known_encoding, normalize_html_with_summary,
};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::fetch::{DEFAULT_USER_AGENT, fetch_url};

/// Normalize HTML for rendering: keep body content, collapse headings to one
/// level, flatten unordered lists into paragraphs.
#[derive(Parser, Debug)]
#[command(name = "html-normalizer", version)]
struct Cli {
    /// Input HTML file (omit or use "-" to read stdin)
    #[arg(value_name = "FILE", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Fetch the HTML from a URL instead of a file
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// User-Agent header sent with --url
    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input character encoding (e.g. utf-8, windows-1252); sniffed when omitted
    #[arg(long, value_name = "ENCODING")]
    encoding: Option<String>,

    /// Heading level every h1-h6 is rewritten to
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(1..=6))]
    heading_level: Option<u8>,

    /// Flatten ordered lists (<ol>) as well as unordered ones
    #[arg(long)]
    flatten_ordered_lists: bool,

    /// Do not append a line break to paragraphs
    #[arg(long)]
    no_paragraph_breaks: bool,

    /// JSON file with normalization options; flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug information to stderr
    #[arg(long)]
    debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    generate_completion: Option<Shell>,

    /// Print a man page and exit
    #[arg(long, exclusive = true)]
    generate_man: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; that one wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.generate_completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "html-normalizer", &mut io::stdout());
        return Ok(());
    }
    if cli.generate_man {
        let man = clap_mangen::Man::new(Cli::command());
        return man.render(&mut io::stdout()).map_err(CliError::WriteStdout);
    }

    let options = resolve_options(cli)?;
    let html = read_input(cli)?;
    let (normalized, summary) = normalize_html_with_summary(&html, &options);
    tracing::debug!(?summary, "normalization finished");

    write_output(cli.output.as_deref(), &normalized)
}

/// Defaults, then the `--config` file, then individual flags.
fn resolve_options(cli: &Cli) -> Result<NormalizeOptions, CliError> {
    let mut options = match &cli.config {
        Some(path) => load_config(path)?,
        None => NormalizeOptions::default(),
    };

    if let Some(level) = cli.heading_level {
        options.heading_level = HeadingLevel::try_from(level)?;
    }
    if cli.flatten_ordered_lists {
        options.flatten_ordered_lists = true;
    }
    if cli.no_paragraph_breaks {
        options.paragraph_breaks = false;
    }

    tracing::debug!(?options, "resolved options");
    Ok(options)
}

fn load_config(path: &Path) -> Result<NormalizeOptions, CliError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseConfig { path: display, source })
}

fn read_input(cli: &Cli) -> Result<String, CliError> {
    let (bytes, declared_charset) = if let Some(url) = &cli.url {
        let page = fetch_url(url, &cli.user_agent).map_err(|source| CliError::Fetch {
            url: url.clone(),
            source,
        })?;
        (page.body, page.charset)
    } else {
        match cli.input.as_deref() {
            Some(path) if path != Path::new("-") => {
                let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
                    path: path.display().to_string(),
                    source,
                })?;
                (bytes, None)
            }
            _ => {
                let mut bytes = Vec::new();
                io::stdin().read_to_end(&mut bytes).map_err(CliError::ReadStdin)?;
                (bytes, None)
            }
        }
    };

    // A server charset encoding_rs does not know falls back to sniffing.
    let declared_charset = declared_charset.filter(|charset| {
        let known = is_known_encoding(charset);
        if !known {
            tracing::warn!(charset = charset.as_str(), "ignoring unknown charset declared by server");
        }
        known
    });
    // An explicit --encoding overrides whatever the server declared.
    let label = cli.encoding.as_deref().or(declared_charset.as_deref());
    Ok(decode_html_bytes(&bytes, label)?)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, content).map_err(|source| CliError::WriteFile {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes()).map_err(CliError::WriteStdout)?;
            stdout.flush().map_err(CliError::WriteStdout)
        }
    }
}
