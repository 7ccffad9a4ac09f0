//! icytitle — current-track extraction for Icecast/Shoutcast streams
//!
//! Servers that support ICY metadata interleave the audio payload with
//! length-prefixed metadata blocks at a fixed byte stride advertised in the
//! `icy-metaint` response header. This crate negotiates that metadata,
//! decodes one block, and returns the `StreamTitle` it carries.
//!
//! ## Quick start
//!
//! ```no_run
//! use icytitle::config::FetchConfig;
//! use icytitle::stream::{HttpTransport, TitleFetcher, TitleOutcome};
//!
//! let fetcher = TitleFetcher::new(FetchConfig::default());
//! match fetcher.fetch("https://radio.example.com/stream", &HttpTransport)? {
//!     TitleOutcome::Title(title) => println!("{title}"),
//!     TitleOutcome::NoTitle => println!("nothing announced"),
//!     TitleOutcome::Suppressed => {}
//! }
//! # Ok::<(), icytitle::error::TitleError>(())
//! ```

pub mod config;
pub mod error;
pub mod stream;
