//! Title fetch orchestration
//!
//! Ties the pieces together: resolve playlist indirection, open the stream
//! through the injected transport, read the interleaved prefix, assemble the
//! metadata frame, and extract the title. Also applies the error-verbosity
//! policy: with `show_errors` off, every runtime failure collapses into a
//! silent [`TitleOutcome::Suppressed`].

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use tracing::debug;

use crate::config::meta::READ_CHUNK_SIZE;
use crate::config::FetchConfig;
use crate::error::{Result, TitleError};
use crate::stream::assembler::{AppendStatus, FrameAssembler};
use crate::stream::headers::IcyHeaders;
use crate::stream::playlist::resolve_playlist_url;
use crate::stream::title::extract_song_title;
use crate::stream::transport::Transport;

/// Result of a title fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    /// The extracted song title
    Title(String),
    /// The metadata frame was empty: the server announced no title change
    NoTitle,
    /// A failure occurred while error reporting is disabled
    Suppressed,
}

/// One-shot title fetcher.
///
/// Stateless between calls; for repeated polls of the same stream use
/// [`StreamSession`], which caches the resolved stride.
pub struct TitleFetcher {
    config: FetchConfig,
}

impl TitleFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch the currently playing title from `url`.
    pub fn fetch(&self, url: &str, transport: &dyn Transport) -> Result<TitleOutcome> {
        self.fetch_with_stop(url, transport, &AtomicBool::new(false))
    }

    /// Like [`fetch`](Self::fetch), but aborts with
    /// [`TitleError::Cancelled`] once `stop` is set. No partial state is
    /// observable after an abort.
    pub fn fetch_with_stop(
        &self,
        url: &str,
        transport: &dyn Transport,
        stop: &AtomicBool,
    ) -> Result<TitleOutcome> {
        let attempt = self
            .run(url, transport, stop, None)
            .map(|(outcome, _)| outcome);
        apply_verbosity(self.config.show_errors, attempt)
    }

    /// The full sequence; returns the outcome plus the stride that was used
    /// so sessions can cache it.
    fn run(
        &self,
        url: &str,
        transport: &dyn Transport,
        stop: &AtomicBool,
        known_stride: Option<usize>,
    ) -> Result<(TitleOutcome, usize)> {
        let target = resolve_playlist_url(transport, url, &self.config)?;
        let handle = transport.open(&target, &self.config)?;

        let stride = match known_stride {
            Some(stride) => stride,
            None => IcyHeaders::parse(&handle.headers)?.metaint,
        };
        debug!(stride, url = %target, "reading stream prefix");

        let outcome = collect_title(handle.body, stride, &self.config, stop)?;
        Ok((outcome, stride))
    }
}

/// Repeated polls of one stream.
///
/// The stride never changes for the lifetime of a stream session, so it is
/// resolved once and cached immutable-after-set; concurrent polls may read
/// it freely.
pub struct StreamSession {
    url: String,
    fetcher: TitleFetcher,
    stride: OnceLock<usize>,
}

impl StreamSession {
    pub fn new(url: impl Into<String>, config: FetchConfig) -> Self {
        Self {
            url: url.into(),
            fetcher: TitleFetcher::new(config),
            stride: OnceLock::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The cached stride, once a poll has resolved it
    pub fn stride(&self) -> Option<usize> {
        self.stride.get().copied()
    }

    /// Fetch the current title, reusing the cached stride when present.
    pub fn poll(&self, transport: &dyn Transport) -> Result<TitleOutcome> {
        self.poll_with_stop(transport, &AtomicBool::new(false))
    }

    pub fn poll_with_stop(
        &self,
        transport: &dyn Transport,
        stop: &AtomicBool,
    ) -> Result<TitleOutcome> {
        let known = self.stride.get().copied();
        let attempt = self
            .fetcher
            .run(&self.url, transport, stop, known)
            .map(|(outcome, stride)| {
                let _ = self.stride.set(stride);
                outcome
            });
        apply_verbosity(self.fetcher.config.show_errors, attempt)
    }
}

fn apply_verbosity(show_errors: bool, attempt: Result<TitleOutcome>) -> Result<TitleOutcome> {
    match attempt {
        Err(e) if !show_errors => {
            debug!("title fetch failed: {e}");
            Ok(TitleOutcome::Suppressed)
        }
        other => other,
    }
}

/// Read the stream prefix, assemble the metadata frame, extract the title.
///
/// Reads are capped at the bytes still missing, so the transport is never
/// asked for more than `stride + meta_max_length` bytes in total.
fn collect_title(
    mut body: Box<dyn Read + Send>,
    stride: usize,
    config: &FetchConfig,
    stop: &AtomicBool,
) -> Result<TitleOutcome> {
    let mut assembler = FrameAssembler::new(stride, config.meta_max_length)?;
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    let deadline = Instant::now() + config.read_timeout;

    loop {
        if stop.load(Ordering::Relaxed) {
            return Err(TitleError::Cancelled);
        }
        if Instant::now() >= deadline {
            return Err(TitleError::Timeout(format!(
                "no complete metadata frame within {:?}",
                config.read_timeout
            )));
        }

        let want = chunk
            .len()
            .min(assembler.required_len() - assembler.buffered_len());
        match body.read(&mut chunk[..want]) {
            Ok(0) => {
                return Err(TitleError::FrameIncomplete {
                    received: assembler.buffered_len(),
                    required: assembler.required_len(),
                })
            }
            Ok(n) => {
                if assembler.append(&chunk[..n]) == AppendStatus::FrameReady {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e)
                if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
                    || Instant::now() >= deadline =>
            {
                return Err(TitleError::Timeout(e.to_string()));
            }
            Err(e) => return Err(TitleError::Io(e)),
        }
    }

    let frame = assembler
        .frame()
        .ok_or_else(|| TitleError::Stream("metadata frame missing after assembly".to_string()))?;

    if frame.is_empty() {
        debug!("empty metadata block, no title change announced");
        return Ok(TitleOutcome::NoTitle);
    }
    Ok(TitleOutcome::Title(extract_song_title(frame)?))
}
