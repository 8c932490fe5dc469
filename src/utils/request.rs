use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header::HeaderMap};
use url::Url;

use crate::error::Result;

/// Raw response handed back by a transport; status handling and decoding are
/// left to the caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse>;
}

pub struct DefaultTransport {
    inner: Client,
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }
}

impl Default for DefaultTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for DefaultTransport {
    async fn request(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let mut req = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
