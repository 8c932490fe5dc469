// Copyright 2023 vinyldns-cli authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Signed HTTP client for the VinylDNS API.
//!
//! The endpoint methods live next to their models in [`crate::api`]; this
//! module only knows how to build, sign and decode a request.

use reqwest::Method;
use reqwest::header::{HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};
use crate::utils::request::{DefaultTransport, HttpTransport};
use crate::utils::signer::{Authorization, uri_encode};

pub const DEFAULT_USER_AGENT: &str = concat!("vinyldns-cli/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Client`] instances.
///
/// ```
/// use vinyldns::client::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .host("http://localhost:9000")
///     .access_key("okAccessKey")
///     .secret_key("okSecretKey")
///     .build()
///     .unwrap();
/// assert_eq!(client.host().as_str(), "http://localhost:9000/");
/// ```
pub struct ClientBuilder<T: HttpTransport = DefaultTransport> {
    host: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    user_agent: Option<String>,
    transport: T,
}

impl ClientBuilder<DefaultTransport> {
    pub fn new() -> Self {
        Self {
            host: None,
            access_key: None,
            secret_key: None,
            user_agent: None,
            transport: DefaultTransport::default(),
        }
    }
}

impl Default for ClientBuilder<DefaultTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> ClientBuilder<T> {
    /// API base URL; `https://` is assumed when no scheme is given.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replaces the HTTP transport.
    pub fn transport<U: HttpTransport>(self, transport: U) -> ClientBuilder<U> {
        ClientBuilder {
            host: self.host,
            access_key: self.access_key,
            secret_key: self.secret_key,
            user_agent: self.user_agent,
            transport,
        }
    }

    pub fn build(self) -> Result<Client<T>> {
        let host = non_empty(self.host).ok_or(Error::MissingCredential("host"))?;
        let access_key = non_empty(self.access_key).ok_or(Error::MissingCredential("access key"))?;
        let secret_key = non_empty(self.secret_key).ok_or(Error::MissingCredential("secret key"))?;

        Ok(Client {
            transport: self.transport,
            host: parse_host(&host)?,
            access_key,
            secret_key,
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_host(host: &str) -> Result<Url> {
    let host = host.trim();
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };

    let invalid = |reason: String| Error::InvalidHost {
        host: host.to_string(),
        reason,
    };
    let url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("expected an absolute URL".to_string()));
    }
    Ok(url)
}

/// VinylDNS API client.
pub struct Client<T: HttpTransport = DefaultTransport> {
    transport: T,
    host: Url,
    access_key: String,
    secret_key: String,
    user_agent: String,
}

impl Client<DefaultTransport> {
    pub fn builder() -> ClientBuilder<DefaultTransport> {
        ClientBuilder::new()
    }
}

impl<T: HttpTransport> Client<T> {
    pub fn host(&self) -> &Url {
        &self.host
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Joins `segments` onto the host path and attaches the encoded query.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&'static str, String)]) -> Result<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidHost {
                host: self.host.to_string(),
                reason: "expected an absolute URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        if query.is_empty() {
            url.set_query(None);
        } else {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&encoded));
        }
        Ok(url)
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<R> {
        let url = self.endpoint(segments, query)?;
        self.send(Method::GET, url, None).await
    }

    pub(crate) async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments, &[])?;
        self.send(Method::POST, url, Some(serde_json::to_string(body)?)).await
    }

    pub(crate) async fn post_empty<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let url = self.endpoint(segments, &[])?;
        self.send(Method::POST, url, None).await
    }

    pub(crate) async fn put<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments, &[])?;
        self.send(Method::PUT, url, Some(serde_json::to_string(body)?)).await
    }

    pub(crate) async fn delete<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let url = self.endpoint(segments, &[])?;
        self.send(Method::DELETE, url, None).await
    }

    async fn send<R: DeserializeOwned>(&self, method: Method, url: Url, body: Option<String>) -> Result<R> {
        let mut headers = Authorization::new(method.clone(), url.clone())
            .payload(body.as_deref())
            .build_request_headers(&self.access_key, &self.secret_key)?;
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);

        debug!(%method, %url, "sending request");
        if let Some(body) = &body {
            trace!(%body, "request body");
        }

        let response = self
            .transport
            .request(method.clone(), url.clone(), headers, body)
            .await?;
        debug!(%method, %url, status = %response.status, "received response");

        if !response.status.is_success() {
            return Err(Error::Api {
                status: response.status,
                method,
                url: url.to_string(),
                body: response.body.trim().to_string(),
            });
        }

        trace!(body = %response.body, "response body");
        Ok(serde_json::from_str(&response.body)?)
    }
}


#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

    use super::testing::{FakeTransport, fake_client};
    use super::*;

    #[test]
    fn build_requires_every_credential() {
        let err = ClientBuilder::new().host("localhost").access_key("ak").build().err().unwrap();
        assert!(matches!(err, Error::MissingCredential("secret key")));

        let err = ClientBuilder::new().access_key("ak").secret_key("sk").build().err().unwrap();
        assert!(matches!(err, Error::MissingCredential("host")));

        let err = ClientBuilder::new()
            .host("http://localhost")
            .access_key(" ")
            .secret_key("sk")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::MissingCredential("access key")));
    }

    #[test]
    fn host_defaults_to_https() {
        let url = parse_host("vinyldns.example.com").unwrap();
        assert_eq!(url.as_str(), "https://vinyldns.example.com/");
        assert!(matches!(parse_host("ftp://example.com"), Err(Error::InvalidHost { .. })));
    }

    #[test]
    fn endpoint_joins_segments_and_query() {
        let client = ClientBuilder::new()
            .host("http://localhost:9000/api/")
            .access_key("ak")
            .secret_key("sk")
            .build()
            .unwrap();

        let url = client
            .endpoint(&["zones", "name", "ok."], &[("maxItems", "10".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/zones/name/ok.?maxItems=10");

        let url = client.endpoint(&["recordsets"], &[("recordNameFilter", "*a b*".to_string())]).unwrap();
        assert_eq!(url.query(), Some("recordNameFilter=%2Aa%20b%2A"));
    }

    #[tokio::test]
    async fn requests_are_signed() {
        let client = fake_client(FakeTransport::new().route(Method::POST, "/groups", "{}"));
        let _: serde_json::Value = client.post(&["groups"], &serde_json::json!({"name": "ok"})).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        let auth = headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=okAccessKey/"));
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"ok"}"#));
    }

    #[tokio::test]
    async fn custom_user_agent_is_sent() {
        let client = ClientBuilder::new()
            .host("http://localhost:9000")
            .access_key("okAccessKey")
            .secret_key("okSecretKey")
            .user_agent("zone-sync-job/2.1")
            .transport(FakeTransport::new().route(Method::GET, "/zones", r#"{"zones":[]}"#))
            .build()
            .unwrap();
        let _: serde_json::Value = client.get(&["zones"], &[]).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].headers.get(USER_AGENT).unwrap(), "zone-sync-job/2.1");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let client = fake_client(FakeTransport::new().route_status(
            Method::GET,
            "/zones/missing",
            StatusCode::NOT_FOUND,
            "Zone with id missing does not exist\n",
        ));
        let err = client.get::<serde_json::Value>(&["zones", "missing"], &[]).await.unwrap_err();
        match err {
            Error::Api { status, body, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "Zone with id missing does not exist");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_json_error() {
        let client = fake_client(FakeTransport::new().route(Method::GET, "/zones", "not json"));
        let err = client.get::<serde_json::Value>(&["zones"], &[]).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
