//! Stream access and ICY metadata handling
//!
//! Negotiates ICY metadata with Icecast/Shoutcast servers, resolves playlist
//! indirection, assembles the interleaved metadata frame, and extracts the
//! current track title. Transport choice (HTTP client, raw socket, canned
//! replay) sits behind the [`Transport`] trait; the parsing core is
//! transport-agnostic.

pub mod assembler;
pub mod fetcher;
pub mod headers;
pub mod http;
pub mod playlist;
pub mod replay;
pub mod socket;
pub mod title;
pub mod transport;

pub use assembler::{AppendStatus, FrameAssembler};
pub use fetcher::{StreamSession, TitleFetcher, TitleOutcome};
pub use headers::IcyHeaders;
pub use http::HttpTransport;
pub use replay::ReplayTransport;
pub use socket::SocketTransport;
pub use title::TrackInfo;
pub use transport::{StreamHandle, Transport};
