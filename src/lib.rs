//! Fetch a URL as text through a swappable HTTP transport.
//!
//! [`fetch`] only ever talks to a [`Transport`]. Production code hands it an
//! [`HttpTransport`] wrapping a real `reqwest` client; tests hand it a
//! [`MockTransport`] with a canned outcome.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use thiserror::Error;

pub mod fetch;
pub mod http;
pub mod mock;

pub use fetch::{fetch, fetch_json, FetchError, RequestError};
pub use http::{new_http_transport, HttpTransport};
pub use mock::{MockResponse, MockTransport};
pub use reqwest::blocking::Request;
pub use reqwest::{Method, StatusCode, Url};

/// Something that can execute an HTTP request.
pub trait Transport {
    fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        (**self).execute(request)
    }
}

/// A response as seen by [`fetch`]: a status and a body that is read once.
///
/// Dropping the response releases the body.
pub struct Response {
    status: StatusCode,
    body: Box<dyn Read + Send>,
}

impl Response {
    pub fn new<R: Read + Send + 'static>(status: StatusCode, body: R) -> Self {
        Response {
            status,
            body: Box::new(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl From<reqwest::blocking::Response> for Response {
    fn from(res: reqwest::blocking::Response) -> Self {
        Response::new(res.status(), res)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Failure reported by a [`Transport`].
///
/// Wraps the underlying error without changing how it displays. Clones share
/// the same error, and two values compare equal only when they do.
#[derive(Error, Debug, Clone)]
#[error(transparent)]
pub struct TransportError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TransportError(Arc::new(err))
    }

    /// An error that is nothing but its message, e.g. `"connection refused"`.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let err: Box<dyn std::error::Error + Send + Sync> = message.into();
        TransportError(Arc::from(err))
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        (*self.0).downcast_ref::<E>()
    }
}

impl PartialEq for TransportError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
