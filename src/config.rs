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

//! Connection settings taken from the global flags or their environment
//! variables.

use crate::client::{Client, ClientBuilder};
use crate::error::{Error, Result};

pub const HOST_ENV: &str = "VINYLDNS_HOST";
pub const ACCESS_KEY_ENV: &str = "VINYLDNS_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "VINYLDNS_SECRET_KEY";
pub const FORMAT_ENV: &str = "VINYLDNS_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub access_key: String,
    pub secret_key: String,
}

impl Config {
    /// Validates that all three settings are present.
    ///
    /// Every missing setting is reported at once, as
    /// `Please pass '--<flag>' or set '<ENV>'`.
    pub fn new(
        host: Option<&str>,
        access_key: Option<&str>,
        secret_key: Option<&str>,
    ) -> Result<Self> {
        let mut missing = Vec::new();
        let mut require = |value: Option<&str>, flag: &str, env: &str| -> String {
            match value.map(str::trim).filter(|v| !v.is_empty()) {
                Some(v) => v.to_string(),
                None => {
                    missing.push(format!("Please pass '--{flag}' or set '{env}'"));
                    String::new()
                }
            }
        };

        let host = require(host, "host", HOST_ENV);
        let access_key = require(access_key, "access-key", ACCESS_KEY_ENV);
        let secret_key = require(secret_key, "secret-key", SECRET_KEY_ENV);

        if !missing.is_empty() {
            return Err(Error::MissingCredentials(missing));
        }
        Ok(Self {
            host,
            access_key,
            secret_key,
        })
    }

    pub fn client(&self) -> Result<Client> {
        ClientBuilder::new()
            .host(&self.host)
            .access_key(&self.access_key)
            .secret_key(&self.secret_key)
            .build()
    }
}
