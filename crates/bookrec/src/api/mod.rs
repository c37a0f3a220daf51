use reqwest::Url;
use serde::de::DeserializeOwned;

pub(crate) mod google_books;
pub(crate) mod open_library;

/// A blocking HTTP client able to fetch and decode JSON documents.
pub trait Client {
    /// Issues a GET request to the `url` and decodes the response body as JSON.
    ///
    /// # Errors
    ///
    /// An `Err` with [`ErrorKind::IO`] is returned when the request cannot be completed.
    /// An `Err` with [`ErrorKind::Deserialize`] is returned when the body is not the expected JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

/// Appends the query `params` to the `base` endpoint, encoding each value.
pub(crate) fn url_with_params<'a, I>(base: &str, params: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("'{base}' is not a valid provider url ({e})"),
            )
        })
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, EmptyObjectProducer, MalformedJsonProducer, MockClient, NetworkErrorProducer,
    Producer, URL_SINK,
};

use crate::{Error, ErrorKind};
