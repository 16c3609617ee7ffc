/// CLI for onionfetch.
use crate::fetcher::{FetchStatus, Fetcher};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(
    name = "onionfetch",
    about = "Fetch URLs over HTTP, routing hidden-service hosts through a local SOCKS5 proxy"
)]
struct Cli {
    /// URL to fetch
    url: String,

    /// Write the response body to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Send a POST request with the given body
    #[arg(long, value_name = "BODY", conflicts_with = "output")]
    post: Option<String>,
}

pub fn run() {
    env_logger::init();
    let cli = Cli::parse();

    // Validate the URL shape up front; the fetcher itself leaves validation
    // to the transport.
    match Url::parse(&cli.url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        _ => {
            eprintln!("Error: URL must start with http:// or https://");
            std::process::exit(1);
        }
    }

    let fetcher = Fetcher::new();

    let status = match (&cli.output, &cli.post) {
        (Some(path), _) => {
            eprintln!("Downloading {} to {}...", cli.url, path.display());
            fetcher.download(path, &cli.url)
        }
        (None, Some(body)) => {
            eprintln!("Posting to {}...", cli.url);
            let mut buf = Vec::new();
            let status = fetcher.post(&mut buf, &cli.url, body);
            emit(&buf);
            status
        }
        (None, None) => {
            eprintln!("Fetching {}...", cli.url);
            let mut buf = Vec::new();
            let status = fetcher.get(&mut buf, &cli.url);
            emit(&buf);
            status
        }
    };

    match status {
        FetchStatus::Failed => {
            eprintln!("Error: transfer failed");
            std::process::exit(1);
        }
        FetchStatus::Unknown => eprintln!("✓ Done (status unknown)"),
        FetchStatus::Http(code) => eprintln!("✓ Done (status {})", code),
    }
}

fn emit(body: &[u8]) {
    use std::io::Write;
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(body);
    let _ = stdout.flush();
}
