use log::debug;
use reqwest::blocking::{Client, Request};
use crate::{Response, Transport, TransportError};

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// Requests go straight to [`Client::execute`]. Any status is a successful
/// response here; client errors come back inside a [`TransportError`].
pub struct HttpTransport {
    pub client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::from_client(Client::new())
    }

    /// Use a client built elsewhere, e.g. one with timeouts or proxies set.
    pub fn from_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        debug!("{} {}", request.method(), request.url());

        self.client
            .execute(request)
            .map(Response::from)
            .map_err(TransportError::new)
    }
}

pub fn new_http_transport() -> HttpTransport {
    HttpTransport::new()
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use reqwest::blocking::Client;

    use crate::http::HttpTransport;
    use crate::{fetch, FetchError, Method, Request, StatusCode, Transport, Url};

    /// Serves a single HTTP/1.1 response on a loopback port. Returns the base
    /// URL and a channel yielding the request line that was received.
    fn serve_once(
        status_line: &'static str,
        body: &'static [u8],
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    fn transport() -> HttpTransport {
        HttpTransport::from_client(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn sends_get_and_returns_body() {
        let (base, request_line) = serve_once("200 OK", br#"{"title": "Real Title"}"#);

        let body = fetch(&transport(), &format!("{}/posts/1", base)).unwrap();

        assert_eq!(body, r#"{"title": "Real Title"}"#);
        assert_eq!(request_line.recv().unwrap(), "GET /posts/1 HTTP/1.1");
    }

    #[test]
    fn passes_non_success_status_through() {
        let (base, _) = serve_once("404 Not Found", b"missing");
        let request = Request::new(Method::GET, Url::parse(&base).unwrap());

        let response = transport().execute(request).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let mut body = String::new();
        response.into_body().read_to_string(&mut body).unwrap();
        assert_eq!(body, "missing");
    }

    #[test]
    fn connection_failure_is_a_transport_error() {
        // Port 1 is privileged and never handed out as an ephemeral port.
        let err = fetch(&transport(), "http://127.0.0.1:1/").unwrap_err();

        match err {
            FetchError::Transport(e) => {
                let inner = e.downcast_ref::<reqwest::Error>().unwrap();
                assert!(inner.is_connect());
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
