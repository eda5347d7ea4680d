//! # HTTP transport
//!
//! [`ApiClient`](crate::ApiClient) builds [`HttpRequest`] values and hands them
//! to a [`Transport`]. The production transport is [`ReqwestTransport`]; tests
//! use an in-memory mock that records every request.
//!
//! Paths are relative to the API base (`<backend>/api`), e.g. `"products"` or
//! `"orders/42/status"`.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A single file sent as one multipart part.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    File(FilePart),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Body,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.body = Body::File(part);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends one request and returns the raw response, whatever its status.
///
/// Only failures that prevent a response (DNS, refused connection, CORS)
/// are reported as `Err`.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// reqwest-backed transport. Uses `fetch` in the browser and hyper natively.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    api_base: String,
}

impl ReqwestTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::File(part) => {
                let file = reqwest::multipart::Part::bytes(part.bytes)
                    .file_name(part.file_name)
                    .mime_str(&part.mime)
                    .map_err(|e| ApiError::Upload(e.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part(part.field, file))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Route {
        method: Method,
        path: String,
        status: u16,
        body: Vec<u8>,
    }

    #[derive(Default)]
    struct MockState {
        routes: Vec<Route>,
        requests: Vec<HttpRequest>,
        offline: bool,
    }

    /// Canned-response transport. Later routes for the same method and path
    /// win; unknown routes answer 404.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        state: Rc<RefCell<MockState>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
            self.state.borrow_mut().routes.push(Route {
                method,
                path: path.to_string(),
                status,
                body: body.to_string().into_bytes(),
            });
            self
        }

        pub fn go_offline(&self) {
            self.state.borrow_mut().offline = true;
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.state.borrow().requests.clone()
        }

        pub fn request_count(&self) -> usize {
            self.state.borrow().requests.len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.state.borrow().requests.last().cloned()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut state = self.state.borrow_mut();
            state.requests.push(request.clone());
            if state.offline {
                return Err(ApiError::Network("connection refused".into()));
            }
            let response = state
                .routes
                .iter()
                .rev()
                .find(|r| r.method == request.method && r.path == request.path)
                .map(|r| HttpResponse {
                    status: r.status,
                    body: r.body.clone(),
                })
                .unwrap_or_else(|| HttpResponse {
                    status: 404,
                    body: br#"{"detail":"Not Found"}"#.to_vec(),
                });
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = HttpRequest::put("orders/7/status")
            .query("status", "Shipped")
            .bearer("tok");
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.query, vec![("status".to_string(), "Shipped".to_string())]);
        assert_eq!(req.bearer.as_deref(), Some("tok"));
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn test_reqwest_url_join() {
        let transport = ReqwestTransport::new("http://localhost:8001/api/");
        assert_eq!(transport.api_base(), "http://localhost:8001/api");
        assert_eq!(transport.url("/products"), "http://localhost:8001/api/products");
        assert_eq!(transport.url("auth/me"), "http://localhost:8001/api/auth/me");
    }

    #[test]
    fn test_response_json() {
        let ok = HttpResponse {
            status: 200,
            body: b"[1,2]".to_vec(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.json::<Vec<u8>>().unwrap(), vec![1, 2]);

        let bad = HttpResponse {
            status: 200,
            body: b"nope".to_vec(),
        };
        assert!(matches!(bad.json::<Vec<u8>>(), Err(ApiError::Decode(_))));
    }
}
