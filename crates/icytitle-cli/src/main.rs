//! icytitle CLI — print the current track of an internet radio stream

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use icytitle::config::{network, FetchConfig};
use icytitle::stream::{
    HttpTransport, SocketTransport, StreamSession, TitleFetcher, TitleOutcome, TrackInfo, Transport,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransportKind {
    /// Blocking HTTP client (TLS, redirects)
    Http,
    /// Raw TCP socket speaking HTTP/1.0 (plain http only)
    Socket,
}

#[derive(Parser)]
#[command(
    name = "icytitle",
    about = "Show the current track of an internet radio stream",
    version
)]
struct Cli {
    /// Stream or playlist URL
    url: String,

    /// How to reach the stream server
    #[arg(long, value_enum, default_value = "http")]
    transport: TransportKind,

    /// User-Agent header for outgoing requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Upper bound on the metadata block length in bytes (1-4080)
    #[arg(long, default_value_t = 4080)]
    meta_max_length: usize,

    /// Report failures as errors instead of a silent "no result"
    #[arg(long)]
    show_errors: bool,

    /// Print artist and song tab-separated when the title splits
    #[arg(long)]
    split: bool,

    /// Poll every N seconds and print the title whenever it changes
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let user_agent = cli
        .user_agent
        .unwrap_or_else(|| network::USER_AGENT.to_string());
    let config = FetchConfig::new(user_agent, cli.show_errors, cli.meta_max_length)
        .context("invalid configuration")?;

    let transport: &dyn Transport = match cli.transport {
        TransportKind::Http => &HttpTransport,
        TransportKind::Socket => &SocketTransport,
    };

    match cli.watch {
        Some(secs) => watch(
            &cli.url,
            config,
            transport,
            Duration::from_secs(secs.max(1)),
            cli.split,
        ),
        None => fetch_once(&cli.url, config, transport, cli.split),
    }
}

fn fetch_once(
    url: &str,
    config: FetchConfig,
    transport: &dyn Transport,
    split: bool,
) -> anyhow::Result<()> {
    let fetcher = TitleFetcher::new(config);
    match fetcher.fetch(url, transport)? {
        TitleOutcome::Title(title) => {
            print_title(&title, split);
            Ok(())
        }
        TitleOutcome::NoTitle => {
            eprintln!("No title in the current metadata frame.");
            Ok(())
        }
        TitleOutcome::Suppressed => std::process::exit(1),
    }
}

fn watch(
    url: &str,
    config: FetchConfig,
    transport: &dyn Transport,
    interval: Duration,
    split: bool,
) -> anyhow::Result<()> {
    let session = StreamSession::new(url, config);
    let mut last: Option<String> = None;
    loop {
        match session.poll(transport) {
            Ok(TitleOutcome::Title(title)) => {
                if last.as_deref() != Some(title.as_str()) {
                    print_title(&title, split);
                    last = Some(title);
                }
            }
            Ok(TitleOutcome::NoTitle) | Ok(TitleOutcome::Suppressed) => {}
            Err(e) => eprintln!("Error: {e}"),
        }
        thread::sleep(interval);
    }
}

fn print_title(title: &str, split: bool) {
    if split {
        let track = TrackInfo::from_title(title);
        if let (Some(artist), Some(song)) = (track.artist, track.song) {
            println!("{artist}\t{song}");
            return;
        }
    }
    println!("{title}");
}
