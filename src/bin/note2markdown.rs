use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use note2markdown::{extract_markdown, read_html_source, Error, FetchOptions};
use tracing_subscriber::EnvFilter;

/// Fetch a notes page and print its Markdown contents.
#[derive(Debug, Parser)]
#[command(name = "note2markdown", version, about)]
struct Cli {
    /// Page URL (e.g. https://notes.sjtu.edu.cn/s/abcdefg)
    url: String,

    /// Local HTML file to use instead of downloading
    #[arg(long, value_name = "PATH")]
    html_file: Option<PathBuf>,

    /// File to write the Markdown to (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", err.prefix());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let html = read_html_source(&cli.url, cli.html_file.as_deref(), &FetchOptions::default())?;
    let markdown = extract_markdown(&html);

    match &cli.output {
        Some(path) => fs::write(path, &markdown).map_err(|source| Error::WriteOutput {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut stdout = io::stdout().lock();
            // A closed pipe is not worth reporting.
            if let Err(err) = stdout.write_all(markdown.as_bytes()).and_then(|()| stdout.flush()) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(Error::WriteOutput {
                        path: PathBuf::from("<stdout>"),
                        source: err,
                    });
                }
            }
        }
    }
    tracing::debug!(bytes = markdown.len(), "wrote markdown");
    Ok(())
}

/// Log to stderr so stdout carries nothing but Markdown. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}
