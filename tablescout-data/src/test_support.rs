//! In-memory fixtures for dataset staging tests.

use std::cell::Cell;
use std::future::Future;
use std::io::{self, Write};

use async_trait::async_trait;
use url::Url;

use crate::{DatasetSource, TransportError};

/// Stub [`DatasetSource`] serving fixed bytes or a fixed failure.
#[derive(Debug)]
pub struct StubSource {
    url: Url,
    body: Result<Vec<u8>, u16>,
    downloads: Cell<usize>,
}

impl StubSource {
    /// Serve `body` on every download.
    #[must_use]
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: stub_url(),
            body: Ok(body.into()),
            downloads: Cell::new(0),
        }
    }

    /// Fail every download with HTTP `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            url: stub_url(),
            body: Err(status),
            downloads: Cell::new(0),
        }
    }

    /// Number of downloads attempted so far.
    #[must_use]
    pub fn downloads(&self) -> usize {
        self.downloads.get()
    }
}

fn stub_url() -> Url {
    Url::parse("https://example.org/zomato.csv")
        .unwrap_or_else(|err| panic!("stub URL must parse: {err}"))
}

#[async_trait(?Send)]
impl DatasetSource for StubSource {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn download(&self, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.downloads.set(self.downloads.get() + 1);
        let body = self.body.as_ref().map_err(|status| TransportError::Http {
            url: self.url.to_string(),
            status: *status,
            message: "stubbed failure".to_owned(),
        })?;
        sink.write_all(body).map_err(|source| TransportError::Network {
            url: self.url.to_string(),
            source,
        })?;
        u64::try_from(body.len()).map_err(|err| TransportError::Network {
            url: self.url.to_string(),
            source: io::Error::other(err),
        })
    }
}

/// Drive `future` to completion on a throwaway runtime.
///
/// # Panics
/// Panics when the runtime cannot be created.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    crate::block_on(future).unwrap_or_else(|err| panic!("test runtime: {err}"))
}
