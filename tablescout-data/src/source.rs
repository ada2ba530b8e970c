//! Where the dataset is downloaded from.

use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use url::Url;

use crate::{DatasetError, TransportError};

/// Public CSV export of the Zomato Bangalore restaurants dataset.
pub const DEFAULT_DATASET_URL: &str = "https://huggingface.co/datasets/ManikaSaini/zomato-restaurant-recommendation/resolve/main/zomato.csv";
/// User agent sent with dataset requests.
pub const DEFAULT_USER_AGENT: &str = "tablescout/0.1";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// A place the raw dataset can be streamed from.
#[async_trait(?Send)]
pub trait DatasetSource {
    /// Location of the dataset.
    fn url(&self) -> &Url;
    /// Stream the dataset into `sink`, returning the number of bytes written.
    async fn download(&self, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

/// HTTP implementation of [`DatasetSource`].
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: Client,
    url: Url,
    user_agent: String,
}

impl HttpDatasetSource {
    /// Construct a source for `url`.
    ///
    /// # Errors
    /// Returns [`DatasetError::InvalidUrl`] when `url` does not parse and
    /// [`DatasetError::Client`] when the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, DatasetError> {
        let parsed = Url::parse(url).map_err(|source| DatasetError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| DatasetError::Client { source })?;
        Ok(Self {
            client,
            url: parsed,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait(?Send)]
impl DatasetSource for HttpDatasetSource {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn download(&self, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let url = self.url.as_str();
        let response = self
            .client
            .get(self.url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url))?;

        let mut stream = response.bytes_stream();
        let mut written = 0_u64;
        while let Some(chunk) = stream
            .try_next()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
        {
            sink.write_all(&chunk).map_err(|source| TransportError::Network {
                url: url.to_owned(),
                source,
            })?;
            written = written.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        }
        Ok(written)
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
