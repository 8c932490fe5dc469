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

use chrono::{DateTime, Utc};
use hex::encode as hex_encode;
use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HOST, HeaderMap, HeaderValue, AUTHORIZATION};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

pub(crate) const SERVICE: &str = "VinylDNS";
pub(crate) const REGION: &str = "us-east-1";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const X_AMZ_DATE: &str = "x-amz-date";

/// AWS Signature Version 4 context for a single request.
#[derive(Clone)]
pub(crate) struct Authorization {
    service: String,
    region: String,
    method: Method,
    url: Url,
    payload: Option<String>,
    /// `%Y%m%dT%H%M%SZ`
    timestamp: String,
    /// `%Y%m%d`
    date: String,
}

impl Authorization {
    /// Creates a signing context for `method url`, stamped with the current time.
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            service: SERVICE.to_string(),
            region: REGION.to_string(),
            method,
            url,
            payload: None,
            timestamp: String::new(),
            date: String::new(),
        }
        .at(Utc::now())
    }

    pub(crate) fn at(mut self, time: DateTime<Utc>) -> Self {
        self.timestamp = time.format("%Y%m%dT%H%M%SZ").to_string();
        self.date = time.format("%Y%m%d").to_string();
        self
    }

    #[cfg(test)]
    fn service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Sets the request body that will be hashed into the signature.
    pub(crate) fn payload(mut self, payload: Option<&str>) -> Self {
        self.payload = payload.map(str::to_string);
        self
    }

    fn sign(key: &[u8], msg: &str) -> Result<Vec<u8>> {
        let mut mac =
            HmacSha256::new_from_slice(key).map_err(|e| Error::Signing(e.to_string()))?;
        mac.update(msg.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn sha256_hex(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex_encode(hasher.finalize())
    }

    /// `host[:port]`, the port only when it is not the scheme default.
    fn host(&self) -> Result<String> {
        let host = self
            .url
            .host_str()
            .ok_or_else(|| Error::Signing(format!("{} has no host", self.url)))?;
        Ok(match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    fn canonical_uri(&self) -> &str {
        match self.url.path() {
            "" => "/",
            path => path,
        }
    }

    fn canonical_query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
            .collect();
        pairs.sort();
        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn signed_headers(&self) -> &'static str {
        if self.payload.is_some() {
            "content-type;host;x-amz-date"
        } else {
            "host;x-amz-date"
        }
    }

    fn generate_canonical_request(&self) -> Result<String> {
        let mut canonical_headers = String::new();
        if self.payload.is_some() {
            canonical_headers.push_str(&format!("content-type:{JSON_CONTENT_TYPE}\n"));
        }
        canonical_headers.push_str(&format!("host:{}\n", self.host()?));
        canonical_headers.push_str(&format!("{X_AMZ_DATE}:{}\n", self.timestamp));

        let hashed_payload = Self::sha256_hex(self.payload.as_deref().unwrap_or(""));
        Ok(format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.method.as_str(),
            self.canonical_uri(),
            self.canonical_query_string(),
            canonical_headers,
            self.signed_headers(),
            hashed_payload
        ))
    }

    fn credential_scope(&self) -> String {
        format!("{}/{}/{}/aws4_request", self.date, self.region, self.service)
    }

    fn generate_string_to_sign(&self, canonical_request: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            self.timestamp,
            self.credential_scope(),
            Self::sha256_hex(canonical_request)
        )
    }

    fn calculate_signature(&self, string_to_sign: &str, secret_key: &str) -> Result<String> {
        let secret_date = Self::sign(format!("AWS4{secret_key}").as_bytes(), &self.date)?;
        let secret_region = Self::sign(&secret_date, &self.region)?;
        let secret_service = Self::sign(&secret_region, &self.service)?;
        let secret_signing = Self::sign(&secret_service, "aws4_request")?;
        Ok(hex_encode(Self::sign(&secret_signing, string_to_sign)?))
    }

    fn generate_authorization_header(&self, access_key: &str, secret_key: &str) -> Result<String> {
        let canonical_request = self.generate_canonical_request()?;
        let string_to_sign = self.generate_string_to_sign(&canonical_request);
        let signature = self.calculate_signature(&string_to_sign, secret_key)?;
        Ok(format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            access_key,
            self.credential_scope(),
            self.signed_headers(),
            signature
        ))
    }

    /// Builds the signed header set for the request.
    pub(crate) fn build_request_headers(self, access_key: &str, secret_key: &str) -> Result<HeaderMap> {
        let authorization_header = self.generate_authorization_header(access_key, secret_key)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&authorization_header)?);
        headers.insert(HOST, HeaderValue::from_str(&self.host()?)?);
        headers.insert(X_AMZ_DATE, HeaderValue::from_str(&self.timestamp)?);
        if self.payload.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        Ok(headers)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub(crate) fn uri_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
