//! Book search providers and the mapping of their results into [`Candidate`]s.
//!
//! Each provider declares the shape of its own results, see [`ProviderResult`], and maps them into
//! the single normalized [`Candidate`] shape.

use log::trace;

use crate::{
    api::{self, Client},
    candidate::{Candidate, Format},
    config::ProviderConfig,
    Error,
};

pub use crate::api::google_books::{GoogleVolume, ImageLinks, SaleInfo, VolumeInfo};
pub use crate::api::open_library::{derive_cover_url, OpenLibraryDoc};

/// A book search service able to produce [`Candidate`]s for a free text query.
pub trait Provider {
    /// Short human readable name of the provider.
    fn name(&self) -> &'static str;

    /// Searches for at most `limit` books matching the `query`, in the order the provider ranks
    /// them.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the provider cannot be reached or its response cannot be decoded.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, Error>;

    /// The page size used when the caller has no preference.
    fn default_limit(&self) -> usize;
}

/// A raw search result, tagged by the provider that returned it.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderResult {
    /// A document from Open Library.
    OpenLibrary(OpenLibraryDoc),
    /// A volume from Google Books.
    GoogleBooks(GoogleVolume),
}

impl ProviderResult {
    /// Maps the result into a [`Candidate`].
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        match self {
            Self::OpenLibrary(doc) => open_library_candidate(doc),
            Self::GoogleBooks(volume) => google_books_candidate(volume),
        }
    }
}

impl From<ProviderResult> for Candidate {
    fn from(result: ProviderResult) -> Self {
        result.into_candidate()
    }
}

// Open Library does not report availability, so every document is assumed to exist as an ebook and
// in print but not as an audiobook.
fn open_library_candidate(doc: OpenLibraryDoc) -> Candidate {
    let cover_url = derive_cover_url(&doc);
    let OpenLibraryDoc {
        title,
        subtitle,
        author_name,
        first_publish_year,
        ..
    } = doc;

    Candidate::builder()
        .title(title)
        .authors(author_name)
        .pub_year(first_publish_year)
        .description(subtitle.filter(|s| !s.is_empty()))
        .cover_url(cover_url)
        .preview_link(None)
        .format(Format::Ebook, true)
        .format(Format::Print, true)
        .format(Format::Audiobook, false)
        .build()
}

fn google_books_candidate(volume: GoogleVolume) -> Candidate {
    let pub_year = volume.volume_info.published_year();
    let GoogleVolume {
        id,
        volume_info:
            VolumeInfo {
                title,
                authors,
                description,
                page_count,
                categories,
                average_rating,
                ratings_count,
                image_links,
                preview_link,
                ..
            },
        sale_info,
    } = volume;

    let builder = Candidate::builder()
        .title(title)
        .authors(authors)
        .description(description)
        .pub_year(pub_year)
        .page_count(page_count)
        .subjects(categories)
        .rating(average_rating, ratings_count)
        .cover_url(image_links.and_then(|links| links.thumbnail))
        .preview_link(preview_link)
        .identifier(id);

    match sale_info.and_then(|info| info.is_ebook) {
        Some(is_ebook) => builder.format(Format::Ebook, is_ebook),
        None => builder,
    }
    .build()
}

/// The Open Library search provider.
#[derive(Debug)]
pub struct OpenLibrary<C: Client> {
    client: C,
    config: ProviderConfig,
}

impl<C: Client> OpenLibrary<C> {
    /// Creates the provider over the `client` using the `config`.
    pub const fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Searches Open Library returning its native documents.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the request fails or the response is not the expected JSON. A
    /// response without documents is not an error.
    pub fn search_docs(&self, query: &str, limit: usize) -> Result<Vec<OpenLibraryDoc>, Error> {
        api::open_library::search(&self.client, &self.config, query, limit)
    }
}

impl<C: Client> Provider for OpenLibrary<C> {
    fn name(&self) -> &'static str {
        "Open Library"
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, Error> {
        let docs = self.search_docs(query, limit)?;
        trace!("Mapping {} Open Library docs into candidates", docs.len());
        Ok(docs
            .into_iter()
            .map(ProviderResult::OpenLibrary)
            .map(Candidate::from)
            .collect())
    }

    fn default_limit(&self) -> usize {
        self.config.result_limit()
    }
}

/// The Google Books volumes provider.
#[derive(Debug)]
pub struct GoogleBooks<C: Client> {
    client: C,
    config: ProviderConfig,
}

impl<C: Client> GoogleBooks<C> {
    /// Creates the provider over the `client` using the `config`, which may carry an API key.
    pub const fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Searches Google Books returning its native volumes.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the request fails or the response is not the expected JSON. A
    /// response without items is not an error.
    pub fn search_volumes(&self, query: &str, limit: usize) -> Result<Vec<GoogleVolume>, Error> {
        api::google_books::search(&self.client, &self.config, query, limit)
    }
}

impl<C: Client> Provider for GoogleBooks<C> {
    fn name(&self) -> &'static str {
        "Google Books"
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, Error> {
        let volumes = self.search_volumes(query, limit)?;
        trace!("Mapping {} Google Books volumes into candidates", volumes.len());
        Ok(volumes
            .into_iter()
            .map(ProviderResult::GoogleBooks)
            .map(Candidate::from)
            .collect())
    }

    fn default_limit(&self) -> usize {
        self.config.result_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GoogleBooks, GoogleVolume, ImageLinks, OpenLibrary, OpenLibraryDoc, Provider,
        ProviderResult, SaleInfo, VolumeInfo,
    };
    use crate::{
        api::{impl_text_producer, MockClient},
        candidate::Format,
        config::ProviderConfig,
    };

    impl_text_producer! {
        OpenLibraryProducer => Ok(include_str!("../tests/data/open_library_search.json").to_owned()),
        GoogleBooksProducer => Ok(include_str!("../tests/data/google_books_volumes.json").to_owned()),
    }

    #[test]
    fn open_library_doc_maps_the_displayed_fields() {
        let doc = OpenLibraryDoc {
            title: Some("The Left Hand of Darkness".to_owned()),
            subtitle: Some("A Hainish Novel".to_owned()),
            author_name: vec!["Ursula K. Le Guin".to_owned()],
            first_publish_year: Some(1969),
            cover_i: Some(8_231_856),
            key: Some("/works/OL59851W".to_owned()),
        };

        let candidate = ProviderResult::OpenLibrary(doc).into_candidate();

        assert_eq!(Some("The Left Hand of Darkness"), candidate.title());
        assert_eq!(["Ursula K. Le Guin".to_owned()], candidate.authors());
        assert_eq!("A Hainish Novel", candidate.description());
        assert_eq!(Some(1969), candidate.pub_year());
        assert_eq!(
            Some("https://covers.openlibrary.org/b/id/8231856-M.jpg"),
            candidate.cover_url()
        );
        assert_eq!(None, candidate.preview_link());
        // the work key is not carried over
        assert_eq!(None, candidate.identifier());
    }

    #[test]
    fn open_library_formats_are_fixed() {
        let candidate = ProviderResult::OpenLibrary(OpenLibraryDoc::default()).into_candidate();
        let formats = candidate.formats();

        assert_eq!(Some(&true), formats.get(&Format::Ebook));
        assert_eq!(Some(&true), formats.get(&Format::Print));
        assert_eq!(Some(&false), formats.get(&Format::Audiobook));
        assert_eq!("", candidate.description());
        assert_eq!(None, candidate.title());
    }

    #[test]
    fn google_volume_maps_every_known_field() {
        let volume = GoogleVolume {
            id: Some("B1hSG45JCX4C".to_owned()),
            volume_info: VolumeInfo {
                title: Some("Dune".to_owned()),
                authors: vec!["Frank Herbert".to_owned()],
                description: Some("Arrakis".to_owned()),
                published_date: Some("2005-08-02".to_owned()),
                page_count: Some(896),
                categories: vec!["Fiction".to_owned()],
                average_rating: Some(4.5),
                ratings_count: Some(1209),
                image_links: Some(ImageLinks {
                    small_thumbnail: None,
                    thumbnail: Some("http://books.google.com/thumb".to_owned()),
                }),
                preview_link: Some("http://books.google.com/preview".to_owned()),
                ..VolumeInfo::default()
            },
            sale_info: Some(SaleInfo {
                is_ebook: Some(false),
            }),
        };

        let candidate = ProviderResult::GoogleBooks(volume).into_candidate();

        assert_eq!(Some("Dune"), candidate.title());
        assert_eq!("Arrakis", candidate.description());
        assert_eq!(Some(2005), candidate.pub_year());
        assert_eq!(Some(896), candidate.page_count());
        assert_eq!(["Fiction".to_owned()], candidate.subjects());
        assert_eq!(Some(4.5), candidate.average_rating());
        assert_eq!(Some(1209), candidate.ratings_count());
        assert_eq!(Some("http://books.google.com/thumb"), candidate.cover_url());
        assert_eq!(Some("http://books.google.com/preview"), candidate.preview_link());
        assert_eq!(Some("B1hSG45JCX4C"), candidate.identifier());
        assert_eq!(Some(&false), candidate.formats().get(&Format::Ebook));
        assert_eq!(1, candidate.formats().len());
    }

    #[test]
    fn google_volume_without_sale_info_has_unknown_formats() {
        let candidate = ProviderResult::GoogleBooks(GoogleVolume::default()).into_candidate();
        assert!(candidate.formats().is_empty());
    }

    #[test]
    fn open_library_provider_keeps_provider_order() {
        let provider = OpenLibrary::new(
            MockClient::<OpenLibraryProducer>::default(),
            ProviderConfig::open_library(),
        );

        let titles = provider
            .search("science fiction", provider.default_limit())
            .unwrap()
            .iter()
            .map(|c| c.title().unwrap_or_default().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(
            vec![
                "Dune",
                "The Left Hand of Darkness",
                "Science Fiction Anthology"
            ],
            titles
        );
    }

    #[test]
    fn google_books_provider_maps_volumes() {
        let provider = GoogleBooks::new(
            MockClient::<GoogleBooksProducer>::default(),
            ProviderConfig::google_books(),
        );

        let candidates = provider.search("dune", 20).unwrap();

        assert_eq!(2, candidates.len());
        assert_eq!(Some(2005), candidates[1].pub_year());
        assert_eq!("Google Books", provider.name());
    }
}
