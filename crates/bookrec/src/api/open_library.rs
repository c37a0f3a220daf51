use log::{info, trace};
use serde::Deserialize;

use crate::{config::ProviderConfig, Error};

use super::{url_with_params, Client};

macro_rules! cover_url {
    ($cover_id: expr) => {
        format!("https://covers.openlibrary.org/b/id/{}-M.jpg", $cover_id)
    };
}

pub(crate) fn search<C: Client>(
    client: &C,
    config: &ProviderConfig,
    query: &str,
    limit: usize,
) -> Result<Vec<OpenLibraryDoc>, Error> {
    info!("Searching for '{query}' using Open Library");
    let url = url_with_params(
        config.base_url(),
        [("q", query.to_owned()), ("limit", limit.to_string())],
    )?;

    let SearchModel { docs } = client.get_json(&url)?;

    trace!("Request was successful - {} docs found", docs.len());

    Ok(docs)
}

/// Derives the medium sized cover image URL of a [`OpenLibraryDoc`] from its cover identifier.
///
/// The URL is built from a template and is not checked to resolve to an image.
#[must_use]
pub fn derive_cover_url(doc: &OpenLibraryDoc) -> Option<String> {
    doc.cover_i.filter(|id| *id > 0).map(|id| cover_url!(id))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    #[serde(default)]
    docs: Vec<OpenLibraryDoc>,
}

/// A single document from the Open Library search API.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct OpenLibraryDoc {
    /// Work title.
    pub title: Option<String>,
    /// Work subtitle.
    pub subtitle: Option<String>,
    /// Author names.
    #[serde(default)]
    pub author_name: Vec<String>,
    /// First year any edition of the work was published.
    pub first_publish_year: Option<i32>,
    /// Identifier of the cover image, Open Library uses `-1` for documents without a cover.
    pub cover_i: Option<i64>,
    /// Work key, such as `/works/OL45804W`.
    pub key: Option<String>,
}
