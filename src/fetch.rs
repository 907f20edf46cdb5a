use std::io::{self, Read};

use reqwest::blocking::Request;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use crate::{Transport, TransportError};

/// Why a URL could not be turned into a request.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("control character {byte:#04x} at byte {index}")]
    ControlCharacter { byte: u8, index: usize },
    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    Request(#[from] RequestError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to read response body: {0}")]
    Read(#[from] io::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// GETs `url` through `transport` and returns the whole body as text.
///
/// A malformed `url`, including one holding any ASCII control character,
/// fails before the transport is called. Transport errors come back as they
/// are, with no retry. The body is dropped on every path out of here, and a
/// body that is not UTF-8 fails as a read error rather than being altered.
pub fn fetch<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<String, FetchError> {
    let request = Request::new(Method::GET, parse_url(url)?);
    let response = transport.execute(request)?;

    let mut body = response.into_body();
    let mut text = String::new();
    body.read_to_string(&mut text)?;

    Ok(text)
}

// `Url::parse` strips tab and newlines and percent-encodes other control
// bytes, so they are rejected up front.
fn parse_url(url: &str) -> Result<Url, RequestError> {
    let control = url
        .bytes()
        .enumerate()
        .find(|&(_, b)| b.is_ascii_control());
    if let Some((index, byte)) = control {
        return Err(RequestError::ControlCharacter { byte, index });
    }

    Ok(Url::parse(url)?)
}

/// [`fetch`], then parse the body as JSON.
pub fn fetch_json<D, T>(transport: &T, url: &str) -> Result<D, FetchError>
where
    D: DeserializeOwned,
    T: Transport + ?Sized,
{
    let text = fetch(transport, url)?;
    Ok(serde_json::from_str(&text)?)
}
