//! Static configuration handed to a provider when it is constructed.

/// Search endpoint of Open Library.
pub const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/search.json";

/// Volumes endpoint of Google Books.
pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Number of results requested from a provider when nothing else is configured.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Where and how a provider is queried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    base_url: String,
    api_key: Option<String>,
    result_limit: usize,
}

impl ProviderConfig {
    /// Configuration with an explicit endpoint, no credential and the default result limit.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Default configuration for Open Library.
    #[must_use]
    pub fn open_library() -> Self {
        Self::new(OPEN_LIBRARY_URL)
    }

    /// Default configuration for Google Books.
    #[must_use]
    pub fn google_books() -> Self {
        Self::new(GOOGLE_BOOKS_URL)
    }

    /// Overrides the endpoint.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the access credential, an empty key is treated as no key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Sets the default page size, a zero limit falls back to [`DEFAULT_RESULT_LIMIT`].
    #[must_use]
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = if limit == 0 {
            DEFAULT_RESULT_LIMIT
        } else {
            limit
        };
        self
    }

    /// The endpoint searched.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The access credential, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The default page size.
    #[must_use]
    pub const fn result_limit(&self) -> usize {
        self.result_limit
    }
}
