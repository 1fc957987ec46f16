//! HTTP access to the font provider.

use std::{
    io::{Write, copy},
    time::Duration,
};

use log::debug;
use reqwest::{blocking::Client, header::USER_AGENT};

use crate::error::{Error, Result};

/// A provider stylesheet response. The status is reported, never enforced here.
#[derive(Debug, Clone)]
pub struct StylesheetResponse {
    pub status: u16,
    pub body: String,
}

impl StylesheetResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network operations the pipeline needs.
pub trait Transport {
    /// GET `url` with the given `User-Agent` header and return the body text.
    fn fetch_stylesheet(&self, url: &str, user_agent: &str) -> Result<StylesheetResponse>;

    /// GET `url` and copy the body into `sink` as it arrives.
    fn stream(&self, url: &str, sink: &mut dyn Write) -> Result<u64>;
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    strict_status: bool,
}

impl HttpTransport {
    /// `timeout: None` lets a stalled transfer block forever.
    pub fn new(timeout: Option<Duration>, strict_status: bool) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(Error::Client)?;
        Ok(Self { client, strict_status })
    }
}

impl Transport for HttpTransport {
    fn fetch_stylesheet(&self, url: &str, user_agent: &str) -> Result<StylesheetResponse> {
        debug!("GET {url} (User-Agent: {user_agent})");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .map_err(|e| Error::http(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| Error::http(url, e))?;
        Ok(StylesheetResponse { status, body })
    }

    fn stream(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        debug!("GET {url}");
        let mut response = self.client.get(url).send().map_err(|e| Error::http(url, e))?;

        let status = response.status();
        if self.strict_status && !status.is_success() {
            return Err(Error::Status { url: url.to_owned(), status: status.as_u16() });
        }

        copy(&mut response, sink).map_err(|source| Error::Transfer { url: url.to_owned(), source })
    }
}

#[cfg(test)]
mod tests {
    use std::thread::{self, JoinHandle};

    use tiny_http::{Response, Server};

    use super::*;

    /// Serves one request and yields the `User-Agent` it carried.
    fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Option<String>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let url = format!("http://{}/font.ttf", server.server_addr());
        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            let user_agent = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("User-Agent"))
                .map(|header| header.value.as_str().to_owned());
            request.respond(Response::from_string(body).with_status_code(status)).unwrap();
            user_agent
        });
        (url, handle)
    }

    #[test]
    fn test_response_success_range() {
        let ok = StylesheetResponse { status: 200, body: String::new() };
        let missing = StylesheetResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn test_build_without_timeout() {
        assert!(HttpTransport::new(None, false).is_ok());
    }

    #[test]
    fn test_fetch_sends_user_agent() {
        let (url, server) = serve_once(200, "@font-face { font-family: A }");
        let transport = HttpTransport::new(None, false).unwrap();

        let response = transport.fetch_stylesheet(&url, "Agent/1.0").unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "@font-face { font-family: A }");
        assert_eq!(server.join().unwrap().as_deref(), Some("Agent/1.0"));
    }

    #[test]
    fn test_fetch_reports_error_status() {
        let (url, server) = serve_once(404, "Not Found");
        let transport = HttpTransport::new(None, true).unwrap();

        let response = transport.fetch_stylesheet(&url, "Agent/1.0").unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        server.join().unwrap();
    }

    #[test]
    fn test_stream_copies_body() {
        let (url, server) = serve_once(200, "font bytes");
        let transport = HttpTransport::new(None, false).unwrap();

        let mut sink = Vec::new();
        let written = transport.stream(&url, &mut sink).unwrap();
        assert_eq!(written, 10);
        assert_eq!(sink, b"font bytes");
        server.join().unwrap();
    }

    #[test]
    fn test_stream_error_status_when_strict() {
        let (url, server) = serve_once(404, "Not Found");
        let transport = HttpTransport::new(None, true).unwrap();

        let mut sink = Vec::new();
        let err = transport.stream(&url, &mut sink).unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
        assert!(sink.is_empty());
        server.join().unwrap();
    }

    #[test]
    fn test_stream_error_status_when_lenient() {
        let (url, server) = serve_once(404, "Not Found");
        let transport = HttpTransport::new(None, false).unwrap();

        let mut sink = Vec::new();
        transport.stream(&url, &mut sink).unwrap();
        assert_eq!(sink, b"Not Found");
        server.join().unwrap();
    }

    #[test]
    fn test_timeout_on_stalled_server() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", server.server_addr());
        thread::spawn(move || {
            let request = server.recv().unwrap();
            thread::sleep(Duration::from_secs(2));
            let _ = request.respond(Response::from_string("late"));
        });

        let transport = HttpTransport::new(Some(Duration::from_millis(200)), false).unwrap();
        let err = transport.fetch_stylesheet(&url, "Agent/1.0").unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
    }
}
