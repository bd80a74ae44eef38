#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Configurable URI normalization with a fixed, documented transform order.
//!
//! A URI reference is parsed into [`UriComponents`], normalized with a
//! selected set of [`Flags`], and serialized back into a string. URIs that
//! mean the same thing under the selected flags end up as the same string,
//! which makes them suitable for deduplication and cache keys.
//!
//! ```
//! use uri_normalize::{Flags, UriComponents};
//!
//! let uri = UriComponents::parse("HTTP://Example.COM:80/a/../b/")?;
//! let uri = uri.normalized(Flags::SEMANTICS_PRESERVING | Flags::REMOVE_TRAILING_SLASH);
//! assert_eq!(uri.build().unwrap(), "http://example.com/b");
//! # Ok::<_, uri_normalize::ParseError>(())
//! ```
//!
//! Each flag selects one transform, and the selected transforms always run
//! in the order documented on [`normalize`](normalize()). Normalization never
//! fails: a transform whose precondition does not hold is skipped. Errors only
//! come from [parsing] and [serialization].
//!
//! [parsing]: UriComponents::parse
//! [serialization]: UriComponents::build
//!
//! # Logging
//!
//! Each applied transform emits a `TRACE` event through [`tracing`], and
//! a failure to re-derive the components after removing dot segments emits
//! a `DEBUG` event. No subscriber is installed by this crate.
//!
//! # Feature flags
//!
//! - `std` (default): Enables `std` support. This includes [`Error`] implementations.
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`UriComponents`],
//!   as its URI reference string, and for [`Flags`], as a sequence of flag names.
//!
//! [`Error`]: std::error::Error

extern crate alloc;

mod component;
mod error;
mod fmt;
mod normalize;
mod parse;
pub mod pct_enc;
mod resolve;

#[cfg(feature = "serde")]
mod serde_impl;

pub use component::{QueryPairs, UriComponents};
pub use error::{BuildError, Component, NormalizeStrError, ParseError, ParseErrorKind};
pub use normalize::{normalize, normalize_str, Flags, Iter, Normalizer};
