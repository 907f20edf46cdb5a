use std::io::Cursor;

use reqwest::blocking::Request;
use reqwest::StatusCode;
use crate::{Response, Transport, TransportError};

/// Canned response handed out by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl MockResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        MockResponse {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// [`Transport`] that never touches the network.
///
/// Whatever the request, a configured error is returned first; otherwise a
/// new response is built from the canned one on every call.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    response: Option<MockResponse>,
    err: Option<TransportError>,
}

impl MockTransport {
    pub fn new(response: Option<MockResponse>, err: Option<TransportError>) -> Self {
        MockTransport { response, err }
    }

    pub fn with_response(response: MockResponse) -> Self {
        Self::new(Some(response), None)
    }

    pub fn with_error(err: TransportError) -> Self {
        Self::new(None, Some(err))
    }
}

impl Transport for MockTransport {
    fn execute(&self, _request: Request) -> Result<Response, TransportError> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        match &self.response {
            Some(canned) => {
                let body = Cursor::new(canned.body.clone());
                Ok(Response::new(canned.status, body))
            }
            None => Err(TransportError::msg("mock transport has no response configured")),
        }
    }
}
