use log::{info, trace};
use serde::Deserialize;

use crate::{config::ProviderConfig, Error};

use super::{url_with_params, Client};

pub(crate) fn search<C: Client>(
    client: &C,
    config: &ProviderConfig,
    query: &str,
    limit: usize,
) -> Result<Vec<GoogleVolume>, Error> {
    info!("Searching for '{query}' using Google Books API");
    let mut params = vec![("q", query.to_owned()), ("maxResults", limit.to_string())];
    if let Some(key) = config.api_key() {
        trace!("Using the configured Google Books API key");
        params.push(("key", key.to_owned()));
    }

    let url = url_with_params(config.base_url(), params)?;
    let GoogleModel { items } = client.get_json(&url)?;

    trace!("Request was successful - {} volumes found", items.len());

    Ok(items)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(default)]
    items: Vec<GoogleVolume>,
}

/// A single volume from the Google Books API.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GoogleVolume {
    /// Google Books volume id.
    pub id: Option<String>,
    /// Bibliographic information.
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
    /// Sale information, only present for some volumes.
    #[serde(rename = "saleInfo")]
    pub sale_info: Option<SaleInfo>,
}

/// Volume information from the Google Books API
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub preview_link: Option<String>,
}

/// Cover images of a volume.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    /// Small cover image.
    pub small_thumbnail: Option<String>,
    /// Cover image used for listings.
    pub thumbnail: Option<String>,
}

/// Whether a volume is sold and in what form.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    /// The volume is sold as an ebook.
    pub is_ebook: Option<bool>,
}

impl VolumeInfo {
    /// The year of `publishedDate`, which comes as `Year`, `Year-Month` or `Year-Month-Day`.
    #[must_use]
    pub fn published_year(&self) -> Option<i32> {
        self.published_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| year.len() == 4)
            .and_then(|year| year.parse().ok())
    }
}
