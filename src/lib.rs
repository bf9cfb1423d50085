//! # recompress
//!
//! Pick one image, re-encode it as a JPEG at 70% quality, and get it back
//! under a name that says how big it is now.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! SourceFile ──check type──▶ bytes ──decode──▶ DecodedImage ──render──▶ canvas
//!                                                                        │
//!                    Download ◀── CompressedArtifact ◀──encode (JPEG q)──┘
//! ```
//!
//! Every step either hands its output to the next or ends the attempt with a
//! [`RecompressError`](pipeline::RecompressError). Nothing is retried.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | The async conversion: type check, read, decode, render, encode, artifact |
//! | [`session`] | Presentation adapter: control state, status updates, one-shot download |
//! | [`imaging`] | Codec trait, `image`-crate codec, canvas render, encode parameters |
//! | [`source`] | The selected file and its declared media type |
//! | [`naming`] | `<stem>_compressed_<size>kb.jpg` filename derivation |
//! | [`types`] | [`SizeKb`](types::SizeKb) |
//! | [`config`] | `recompress.toml` loading and validation |
//! | [`output`] | Terminal rendering of statuses and the JSON report |
//!
//! # Design Decisions
//!
//! ## Fixed Quality and Format
//!
//! Quality 0.7 and JPEG are defaults in [`config`], not per-run options. A
//! config file can change them; the CLI deliberately has no flag for it.
//!
//! ## Single Flight
//!
//! [`Session::convert`](session::Session::convert) takes `&mut self`, so the
//! borrow checker guarantees only one conversion per session at a time. The
//! control goes back to ready after every outcome.
//!
//! ## Blocking Work Off the Async Task
//!
//! Decode and encode are CPU-bound and run on tokio's blocking pool; the
//! caller simply awaits them in order.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
