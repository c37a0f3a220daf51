//! Turns free text topics and filter selections into a short ordered list of [`Candidate`]s.

use std::{collections::HashSet, fmt, str::FromStr};

use chrono::Datelike;
use log::{info, trace};

use crate::{
    candidate::{Candidate, Format},
    provider::Provider,
    Error, ErrorKind,
};

/// Number of candidates a recommendation returns when nothing else is configured.
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// How recently a recommended book should have been first published.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Recency {
    /// No preference.
    #[default]
    Any,
    /// Published within the last ten years.
    Last10Years,
    /// Published within the last three years.
    Last3Years,
}

impl Recency {
    /// All choices in display order.
    pub const ALL: [Self; 3] = [Self::Any, Self::Last10Years, Self::Last3Years];

    /// Number of years covered, `None` for [`Recency::Any`].
    #[must_use]
    pub const fn years(self) -> Option<i32> {
        match self {
            Self::Any => None,
            Self::Last10Years => Some(10),
            Self::Last3Years => Some(3),
        }
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "Any",
            Self::Last10Years => "Last 10 years",
            Self::Last3Years => "Last 3 years",
        })
    }
}

impl FromStr for Recency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "any" => Ok(Self::Any),
            "last-10-years" => Ok(Self::Last10Years),
            "last-3-years" => Ok(Self::Last3Years),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("unknown recency '{s}', expected one of: any, last-10-years, last-3-years"),
            )),
        }
    }
}

/// The selections a user made alongside their topics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Recency selection.
    pub recency: Recency,
    /// Preferred formats, empty when there is no preference.
    pub formats: Vec<Format>,
}

/// Decides which candidates survive the user's [`Preferences`].
pub trait CandidateFilter {
    /// Returns `true` to keep the `candidate`.
    fn keep(&self, candidate: &Candidate, preferences: &Preferences) -> bool;
}

/// Keeps every candidate, the selections have no effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unfiltered;

impl CandidateFilter for Unfiltered {
    fn keep(&self, _: &Candidate, _: &Preferences) -> bool {
        true
    }
}

/// Keeps candidates first published inside the recency window and available in at least one of the
/// preferred formats.
///
/// A candidate without a known publish year never falls inside a window other than
/// [`Recency::Any`].
#[derive(Clone, Copy, Debug)]
pub struct PreferenceFilter {
    reference_year: i32,
}

impl PreferenceFilter {
    /// Filter with windows ending at `reference_year`.
    #[must_use]
    pub const fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Filter with windows ending at the current local year.
    #[must_use]
    pub fn this_year() -> Self {
        Self::new(chrono::Local::now().year())
    }
}

impl CandidateFilter for PreferenceFilter {
    fn keep(&self, candidate: &Candidate, preferences: &Preferences) -> bool {
        let recent = match preferences.recency.years() {
            None => true,
            Some(years) => candidate
                .pub_year()
                .map_or(false, |year| year >= self.reference_year - years),
        };

        recent
            && (preferences.formats.is_empty()
                || preferences
                    .formats
                    .iter()
                    .any(|format| candidate.available_as(*format)))
    }
}

/// Queries the configured providers and reduces their results to a handful of candidates.
///
/// With a single provider its results are passed through in order. When more than one provider is
/// configured they are queried in order and merged, dropping candidates that share a title and
/// first author with an earlier one.
pub struct Recommender {
    providers: Vec<Box<dyn Provider>>,
    filter: Box<dyn CandidateFilter>,
    search_limit: Option<usize>,
    result_count: usize,
}

impl Recommender {
    /// Creates a recommender over a single `provider`, without filtering.
    pub fn new<P: Provider + 'static>(provider: P) -> Self {
        Self {
            providers: vec![Box::new(provider)],
            filter: Box::new(Unfiltered),
            search_limit: None,
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    /// Adds another provider whose results are merged after those already configured.
    #[must_use]
    pub fn with_provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Replaces the filter applied to the selections.
    #[must_use]
    pub fn with_filter<F: CandidateFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Number of results asked from every provider, instead of each provider's default.
    ///
    /// A zero limit keeps each provider's default.
    #[must_use]
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = Some(limit).filter(|limit| *limit > 0);
        self
    }

    /// Maximum number of candidates returned.
    #[must_use]
    pub fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }

    /// Names of the configured providers, in query order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Recommends books on the `topics`.
    ///
    /// # Errors
    ///
    /// An `Err` is returned as soon as any provider fails, no partial result is returned.
    pub fn recommend(
        &self,
        topics: &str,
        recency: Recency,
        formats: &[Format],
    ) -> Result<Vec<Candidate>, Error> {
        let preferences = Preferences {
            recency,
            formats: formats.to_vec(),
        };
        trace!("Recommending for '{topics}' with {preferences:?}");

        let mut candidates = Vec::new();
        for provider in &self.providers {
            let limit = self
                .search_limit
                .unwrap_or_else(|| provider.default_limit());
            let found = provider.search(topics, limit)?;
            info!("{} returned {} candidates", provider.name(), found.len());
            candidates.extend(found);
        }

        if self.providers.len() > 1 {
            candidates = merge(candidates);
        }

        let candidates = candidates
            .into_iter()
            .filter(|c| self.filter.keep(c, &preferences))
            .take(self.result_count)
            .collect::<Vec<_>>();

        trace!("{} candidates recommended", candidates.len());
        Ok(candidates)
    }
}

impl fmt::Debug for Recommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recommender")
            .field("providers", &self.provider_names())
            .field("search_limit", &self.search_limit)
            .field("result_count", &self.result_count)
            .finish_non_exhaustive()
    }
}

fn merge(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(dedup_key(c)))
        .collect()
}

fn dedup_key(candidate: &Candidate) -> (String, String) {
    let normalize = |s: &str| s.trim().to_lowercase();
    (
        candidate.title().map(normalize).unwrap_or_default(),
        candidate
            .authors()
            .first()
            .map(|a| normalize(a.as_str()))
            .unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::{CandidateFilter, PreferenceFilter, Preferences, Recency, Recommender, Unfiltered};
    use crate::{
        api::{
            assert_url, impl_text_producer, EmptyObjectProducer, MalformedJsonProducer, MockClient,
            NetworkErrorProducer,
        },
        candidate::{Candidate, Format},
        config::ProviderConfig,
        provider::{GoogleBooks, OpenLibrary},
        ErrorKind,
    };

    impl_text_producer! {
        SearchProducer => Ok(include_str!("../tests/data/open_library_search.json").to_owned()),
        VolumesProducer => Ok(include_str!("../tests/data/google_books_volumes.json").to_owned()),
        TwoDocsProducer => Ok(
            r#"{
                "docs": [
                    { "title": "Pair Programming", "author_name": ["A", "B"] },
                    { "title": "Solo", "author_name": ["C"], "first_publish_year": 2001 }
                ]
            }"#.to_owned()
        ),
        TwentyDocsProducer => Ok(docs_json(20)),
        ThreeDocsProducer => Ok(docs_json(3)),
    }

    fn docs_json(n: usize) -> String {
        let docs = (0..n)
            .map(|i| format!(r#"{{ "title": "Book {i}", "author_name": ["Author {i}"] }}"#))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{ "docs": [{docs}] }}"#)
    }

    fn open_library<P: crate::api::Producer<String>>() -> OpenLibrary<MockClient<P>> {
        OpenLibrary::new(MockClient::<P>::default(), ProviderConfig::open_library())
    }

    fn titles(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().filter_map(Candidate::title).collect()
    }

    #[test]
    fn output_is_truncated_to_five() {
        let recommender = Recommender::new(open_library::<TwentyDocsProducer>());
        let candidates = recommender.recommend("books", Recency::Any, &[]).unwrap();

        assert_eq!(
            vec!["Book 0", "Book 1", "Book 2", "Book 3", "Book 4"],
            titles(&candidates)
        );
    }

    #[test]
    fn fewer_than_five_results_are_all_returned() {
        let recommender = Recommender::new(open_library::<ThreeDocsProducer>());
        assert_eq!(3, recommender.recommend("x", Recency::Any, &[]).unwrap().len());

        let recommender = Recommender::new(open_library::<EmptyObjectProducer>());
        assert!(recommender.recommend("x", Recency::Any, &[]).unwrap().is_empty());
    }

    #[test]
    fn missing_publish_year_maps_to_none() {
        let recommender = Recommender::new(open_library::<TwoDocsProducer>());
        let candidates = recommender.recommend("pairs", Recency::Any, &[]).unwrap();

        assert_eq!(2, candidates.len());
        assert_eq!(["A".to_owned(), "B".to_owned()], candidates[0].authors());
        assert_eq!(None, candidates[0].pub_year());
        assert_eq!(Some(2001), candidates[1].pub_year());
    }

    // Recency and formats are accepted but do not change the result unless a filter is configured.
    #[test]
    fn selections_do_not_filter_by_default() {
        let recommender = Recommender::new(open_library::<SearchProducer>());
        let baseline = recommender.recommend("science fiction", Recency::Any, &[]).unwrap();

        let selections: [&[Format]; 3] = [&[], &[Format::Audiobook], &Format::ALL];
        for recency in Recency::ALL {
            for formats in selections {
                let candidates = recommender
                    .recommend("science fiction", recency, formats)
                    .unwrap();
                assert_eq!(baseline, candidates, "{recency} {formats:?}");
            }
        }
    }

    #[test]
    fn malformed_response_fails_the_request() {
        let recommender = Recommender::new(open_library::<MalformedJsonProducer>());
        let err = recommender.recommend("x", Recency::Any, &[]).unwrap_err();

        assert_eq!(ErrorKind::Deserialize, err.kind());
    }

    #[test]
    fn any_failing_provider_fails_the_merge() {
        let recommender = Recommender::new(open_library::<SearchProducer>()).with_provider(
            GoogleBooks::new(
                MockClient::<NetworkErrorProducer>::default(),
                ProviderConfig::google_books(),
            ),
        );
        let err = recommender.recommend("x", Recency::Any, &[]).unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn merged_providers_are_deduplicated_by_title_and_author() {
        let recommender = Recommender::new(open_library::<SearchProducer>())
            .with_provider(GoogleBooks::new(
                MockClient::<VolumesProducer>::default(),
                ProviderConfig::google_books(),
            ))
            .with_result_count(10);

        let candidates = recommender.recommend("dune", Recency::Any, &[]).unwrap();

        // "Dune" by Frank Herbert is returned by both, the Open Library one is kept.
        assert_eq!(
            vec![
                "Dune",
                "The Left Hand of Darkness",
                "Science Fiction Anthology",
                "The Google Story"
            ],
            titles(&candidates)
        );
        assert_eq!(None, candidates[0].identifier());
        assert_eq!(vec!["Open Library", "Google Books"], recommender.provider_names());
    }

    #[test]
    fn single_provider_is_not_deduplicated() {
        let recommender = Recommender::new(open_library::<TwentyDocsProducer>())
            .with_result_count(20);
        assert_eq!(20, recommender.recommend("x", Recency::Any, &[]).unwrap().len());
    }

    #[test]
    fn search_limit_overrides_provider_default() {
        let recommender = Recommender::new(open_library::<ThreeDocsProducer>()).with_search_limit(7);
        recommender.recommend("x", Recency::Any, &[]).unwrap();

        assert_url!("https://openlibrary.org/search.json?q=x&limit=7");
    }

    #[test]
    fn zero_search_limit_keeps_provider_default() {
        let recommender = Recommender::new(open_library::<ThreeDocsProducer>()).with_search_limit(0);
        recommender.recommend("x", Recency::Any, &[]).unwrap();

        assert_url!("https://openlibrary.org/search.json?q=x&limit=20");
    }

    #[test]
    fn preference_filter_applies_recency_window() {
        let filter = PreferenceFilter::new(2024);
        let book = |year| Candidate::builder().pub_year(year).build();
        let last3 = Preferences {
            recency: Recency::Last3Years,
            formats: vec![],
        };

        assert!(filter.keep(&book(Some(2021)), &last3));
        assert!(!filter.keep(&book(Some(2020)), &last3));
        assert!(!filter.keep(&book(None), &last3));
        assert!(filter.keep(&book(None), &Preferences::default()));
    }

    #[test]
    fn preference_filter_needs_one_available_format() {
        let filter = PreferenceFilter::new(2024);
        let ebook = Candidate::builder().format(Format::Ebook, true).build();
        let prefs = |formats: Vec<Format>| Preferences {
            recency: Recency::Any,
            formats,
        };

        assert!(filter.keep(&ebook, &prefs(vec![])));
        assert!(filter.keep(&ebook, &prefs(vec![Format::Audiobook, Format::Ebook])));
        assert!(!filter.keep(&ebook, &prefs(vec![Format::Audiobook])));
    }

    #[test]
    fn preference_filter_changes_recommendations() {
        let recommender = Recommender::new(open_library::<SearchProducer>())
            .with_filter(PreferenceFilter::new(1970));

        let candidates = recommender
            .recommend("science fiction", Recency::Last3Years, &[Format::Print])
            .unwrap();
        assert_eq!(vec!["The Left Hand of Darkness"], titles(&candidates));

        let candidates = recommender
            .recommend("science fiction", Recency::Any, &[Format::Audiobook])
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn unfiltered_keeps_everything() {
        let prefs = Preferences {
            recency: Recency::Last3Years,
            formats: vec![Format::Audiobook],
        };
        assert!(Unfiltered.keep(&Candidate::default(), &prefs));
    }

    #[test]
    fn recency_parses_labels_and_kebab_case() {
        for recency in Recency::ALL {
            assert_eq!(recency, recency.to_string().parse::<Recency>().unwrap());
        }
        assert_eq!(Recency::Last10Years, "last-10-years".parse::<Recency>().unwrap());
        assert_eq!(Recency::Last3Years, "LAST_3_YEARS".parse::<Recency>().unwrap());
        assert_eq!(
            ErrorKind::InvalidInput,
            "yesterday".parse::<Recency>().unwrap_err().kind()
        );
    }
}
