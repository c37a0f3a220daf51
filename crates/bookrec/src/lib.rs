#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookrec
//!
//! bookrec is a library which searches public book metadata APIs, normalizes their results into
//! [`Candidate`]s and reduces them to a short list of recommendations.
//!
//! The default recommendation is a pass-through of the first five [`provider::OpenLibrary`]
//! results. Other providers and a filter for the recency and format selections can be configured
//! on a [`Recommender`].

mod api;
pub mod candidate;
pub mod config;
mod error;
pub mod provider;
pub mod recommend;

pub use api::Client;
pub use candidate::{Candidate, Format};
pub use config::ProviderConfig;
pub use error::{Error, ErrorKind};
pub use recommend::{Recency, Recommender};

use log::trace;
use provider::OpenLibrary;

/// The HTTP client providers use outside of tests.
pub type HttpClient = reqwest::blocking::Client;

/// Recommends books on the `topics` using the default Open Library configuration.
///
/// The `recency` and `formats` selections are accepted but do not change the result, see
/// [`recommend::PreferenceFilter`] to apply them.
///
/// # Errors
///
/// An `Err` is returned when Open Library cannot be reached.
/// An `Err` is returned when the response from Open Library cannot be decoded.
#[inline]
pub fn recommendations(
    topics: &str,
    recency: Recency,
    formats: &[Format],
) -> Result<Vec<Candidate>, Error> {
    trace!("Recommend books on '{topics}' using the default providers");
    default_recommender().recommend(topics, recency, formats)
}

/// The [`Recommender`] used by [`recommendations`].
#[must_use]
pub fn default_recommender() -> Recommender {
    Recommender::new(OpenLibrary::new(
        HttpClient::default(),
        ProviderConfig::open_library(),
    ))
}
