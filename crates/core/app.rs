use bookrec::{
    config::DEFAULT_RESULT_LIMIT,
    provider::{GoogleBooks, OpenLibrary, Provider},
    recommend::PreferenceFilter,
    HttpClient, ProviderConfig, Recommender,
};

use clap::{ArgEnum, Args};
use log::{info, trace};

/// Options describing which providers are queried and how.
#[derive(Debug, Default, Args)]
pub struct ProviderOpts {
    /// Override the Open Library search endpoint
    #[clap(long, global = true)]
    open_library_url: Option<String>,

    /// Override the Google Books volumes endpoint
    #[clap(long, global = true)]
    google_books_url: Option<String>,

    /// API key sent with Google Books requests
    #[clap(long, env = "BOOKREC_GOOGLE_API_KEY", hide_env_values = true, global = true)]
    google_api_key: Option<String>,

    /// Number of results asked from each provider
    #[clap(long, global = true)]
    limit: Option<usize>,

    /// Also search Google Books and merge its results with Open Library, dropping duplicates
    #[clap(long, global = true)]
    merge: bool,

    /// Apply the recency and format preferences to the results
    ///
    /// Without this flag the preferences are asked for but do not change the recommendations.
    #[clap(long, global = true)]
    apply_filters: bool,
}

/// The providers that can be searched directly.
#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    OpenLibrary,
    GoogleBooks,
}

impl ProviderOpts {
    fn open_library_config(&self) -> ProviderConfig {
        let config = ProviderConfig::open_library()
            .with_result_limit(self.limit.unwrap_or(DEFAULT_RESULT_LIMIT));
        match &self.open_library_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        }
    }

    fn google_books_config(&self) -> ProviderConfig {
        let config = ProviderConfig::google_books()
            .with_result_limit(self.limit.unwrap_or(DEFAULT_RESULT_LIMIT))
            .with_api_key(self.google_api_key.clone());
        match &self.google_books_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        }
    }

    fn open_library(&self) -> OpenLibrary<HttpClient> {
        OpenLibrary::new(HttpClient::default(), self.open_library_config())
    }

    fn google_books(&self) -> GoogleBooks<HttpClient> {
        GoogleBooks::new(HttpClient::default(), self.google_books_config())
    }

    pub fn recommender(&self) -> Recommender {
        let mut recommender = Recommender::new(self.open_library());

        if self.merge {
            info!("--merge used - Google Books results are merged into the recommendations");
            recommender = recommender.with_provider(self.google_books());
        }

        if self.apply_filters {
            trace!("Recency and format preferences will filter the recommendations");
            recommender = recommender.with_filter(PreferenceFilter::this_year());
        }

        recommender
    }

    pub fn provider(&self, kind: ProviderKind) -> Box<dyn Provider> {
        match kind {
            ProviderKind::OpenLibrary => Box::new(self.open_library()),
            ProviderKind::GoogleBooks => Box::new(self.google_books()),
        }
    }
}

#[test]
fn options_are_carried_into_provider_configs() {
    let opts = ProviderOpts {
        google_books_url: Some("http://localhost:9000/volumes".to_owned()),
        google_api_key: Some("key".to_owned()),
        limit: Some(8),
        ..ProviderOpts::default()
    };

    let open_library = opts.open_library_config();
    assert_eq!(bookrec::config::OPEN_LIBRARY_URL, open_library.base_url());
    assert_eq!(8, open_library.result_limit());
    assert_eq!(None, open_library.api_key());

    let google_books = opts.google_books_config();
    assert_eq!("http://localhost:9000/volumes", google_books.base_url());
    assert_eq!(Some("key"), google_books.api_key());
}

#[test]
fn merge_adds_google_books_after_open_library() {
    let opts = ProviderOpts::default();
    assert_eq!(vec!["Open Library"], opts.recommender().provider_names());

    let opts = ProviderOpts {
        merge: true,
        ..ProviderOpts::default()
    };
    assert_eq!(
        vec!["Open Library", "Google Books"],
        opts.recommender().provider_names()
    );
}
