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

//! Error type shared by the client, the resolvers and the commands.

use reqwest::{Method, StatusCode};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with a non-2xx status.
    #[error("{method} {url} returned {status}: {body}")]
    Api {
        status: StatusCode,
        method: Method,
        url: String,
        body: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0} is required")]
    MissingCredential(&'static str),

    #[error("--json is missing the {0:?} field")]
    MissingField(&'static str),

    /// One message per missing global flag, as printed to the user.
    #[error("{}", .0.join("\n"))]
    MissingCredentials(Vec<String>),

    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error(
        "{0} connection requires '--{0}-connection-key-name', '--{0}-connection-key', and '--{0}-connection-primary-server'"
    )]
    InvalidConnection(&'static str),

    #[error("unknown --record-set-type {0}")]
    InvalidRecordType(String),

    #[error("invalid --record-set-data for {record_type}: {reason}")]
    InvalidRecordData {
        record_type: &'static str,
        reason: String,
    },

    #[error("invalid --{flag} {value:?}: {source}")]
    InvalidNumber {
        flag: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("request signing failed: {0}")]
    Signing(String),
}

impl Error {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_names_the_connection_kind() {
        let err = Error::InvalidConnection("transfer");
        assert_eq!(
            err.to_string(),
            "transfer connection requires '--transfer-connection-key-name', \
             '--transfer-connection-key', and '--transfer-connection-primary-server'"
        );
    }

    #[test]
    fn missing_credentials_prints_one_line_each() {
        let err = Error::MissingCredentials(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "a\nb");
    }

    #[test]
    fn status_is_only_set_for_api_errors() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            method: Method::GET,
            url: "http://localhost/zones/x".into(),
            body: "Zone with id x does not exist".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(Error::NotFound("nope".into()).status(), None);
    }
}
