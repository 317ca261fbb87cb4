//! In-process stand-in for the Monzo API used by the request tests.

use std::io::Read;
use std::thread::JoinHandle;
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub(crate) fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    pub(crate) fn query(&self) -> Vec<(String, String)> {
        let query = self.url.split_once('?').map(|(_, q)| q).unwrap_or_default();
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub(crate) fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    pub(crate) fn form_value(&self, key: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Answers the next `responses.len()` requests in order, then stops.
pub(crate) struct FakeServer {
    base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl FakeServer {
    pub(crate) fn respond_with(responses: Vec<(u16, &str)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let handle = std::thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, body) in responses {
                let mut request = server.recv().unwrap();

                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv(name))
                        .map(|h| h.value.to_string())
                };
                let authorization = header("Authorization");
                let content_type = header("Content-Type");

                let mut request_body = String::new();
                request
                    .as_reader()
                    .read_to_string(&mut request_body)
                    .unwrap();

                recorded.push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    content_type,
                    body: request_body,
                });

                let json = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .unwrap();
                request
                    .respond(
                        Response::from_string(body)
                            .with_status_code(status)
                            .with_header(json),
                    )
                    .unwrap();
            }
            recorded
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            handle,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait for every expected request and return them.
    pub(crate) fn requests(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap()
    }
}
