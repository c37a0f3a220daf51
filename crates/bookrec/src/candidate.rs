//! The normalized, provider agnostic record of a single book.

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{Error, ErrorKind};

/// The formats a book may be available in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    /// Digital edition.
    Ebook,
    /// Physical edition.
    Print,
    /// Spoken edition.
    Audiobook,
}

impl Format {
    /// All formats in display order.
    pub const ALL: [Self; 3] = [Self::Ebook, Self::Print, Self::Audiobook];

    /// The lowercase key used for this format in a [`Formats`] mapping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ebook => "ebook",
            Self::Print => "print",
            Self::Audiobook => "audiobook",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ebook => "Ebook",
            Self::Print => "Print",
            Self::Audiobook => "Audiobook",
        })
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.key() == normalized)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("unknown format '{s}', expected one of: ebook, print, audiobook"),
                )
            })
    }
}

/// Availability of a book per [`Format`].
///
/// A format that is missing from the mapping is unknown, which is different from a format that is
/// known to be unavailable.
pub type Formats = BTreeMap<Format, bool>;

/// A display ready book, normalized from the result of any provider.
///
/// A `Candidate` cannot be changed once built, use [`Candidate::builder`] to construct one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Candidate {
    title: Option<String>,
    authors: Vec<String>,
    description: String,
    pub_year: Option<i32>,
    page_count: Option<u32>,
    subjects: Vec<String>,
    average_rating: Option<f64>,
    ratings_count: Option<u32>,
    formats: Formats,
    cover_url: Option<String>,
    preview_link: Option<String>,
    identifier: Option<String>,
}

impl Candidate {
    /// Returns a builder for a new `Candidate` with every field unknown.
    #[must_use]
    pub fn builder() -> CandidateBuilder {
        CandidateBuilder::default()
    }

    /// Title of the book, providers may omit it.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Authors in the order the provider listed them.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Description or an empty string when unknown.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// First publish year.
    #[must_use]
    pub const fn pub_year(&self) -> Option<i32> {
        self.pub_year
    }

    /// Number of pages.
    #[must_use]
    pub const fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    /// Subjects or categories of the book.
    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Average rating given by the provider's users.
    #[must_use]
    pub const fn average_rating(&self) -> Option<f64> {
        self.average_rating
    }

    /// Number of ratings behind [`Candidate::average_rating`].
    #[must_use]
    pub const fn ratings_count(&self) -> Option<u32> {
        self.ratings_count
    }

    /// Known format availability.
    #[must_use]
    pub const fn formats(&self) -> &Formats {
        &self.formats
    }

    /// Whether the book is known to be available in the `format`.
    #[must_use]
    pub fn available_as(&self, format: Format) -> bool {
        self.formats.get(&format).copied().unwrap_or(false)
    }

    /// URL of a cover image, derived and not guaranteed to resolve.
    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    /// Link to the provider's detail page.
    #[must_use]
    pub fn preview_link(&self) -> Option<&str> {
        self.preview_link.as_deref()
    }

    /// Provider specific identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

/// Builder for a [`Candidate`].
#[derive(Debug, Default)]
pub struct CandidateBuilder {
    inner: Candidate,
}

impl CandidateBuilder {
    /// Sets the title, `None` keeps it unknown.
    #[must_use]
    pub fn title(mut self, title: Option<String>) -> Self {
        self.inner.title = title;
        self
    }

    /// Sets the authors.
    #[must_use]
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.inner.authors = authors;
        self
    }

    /// Sets the description, `None` is stored as an empty description.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.inner.description = description.unwrap_or_default();
        self
    }

    /// Sets the first publish year.
    #[must_use]
    pub fn pub_year(mut self, year: Option<i32>) -> Self {
        self.inner.pub_year = year;
        self
    }

    /// Sets the number of pages.
    #[must_use]
    pub fn page_count(mut self, pages: Option<u32>) -> Self {
        self.inner.page_count = pages;
        self
    }

    /// Sets the subjects.
    #[must_use]
    pub fn subjects(mut self, subjects: Vec<String>) -> Self {
        self.inner.subjects = subjects;
        self
    }

    /// Sets the rating and the number of ratings it was computed from.
    #[must_use]
    pub fn rating(mut self, average: Option<f64>, count: Option<u32>) -> Self {
        self.inner.average_rating = average;
        self.inner.ratings_count = count;
        self
    }

    /// Marks the availability of a single format.
    #[must_use]
    pub fn format(mut self, format: Format, available: bool) -> Self {
        self.inner.formats.insert(format, available);
        self
    }

    /// Sets the cover image URL.
    #[must_use]
    pub fn cover_url(mut self, url: Option<String>) -> Self {
        self.inner.cover_url = url;
        self
    }

    /// Sets the link to the provider's detail page.
    #[must_use]
    pub fn preview_link(mut self, link: Option<String>) -> Self {
        self.inner.preview_link = link;
        self
    }

    /// Sets the provider specific identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: Option<String>) -> Self {
        self.inner.identifier = identifier;
        self
    }

    /// Finishes the [`Candidate`].
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // can't be const
    pub fn build(self) -> Candidate {
        self.inner
    }
}
