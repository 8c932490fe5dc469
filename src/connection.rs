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

use crate::api::zones::ZoneConnection;
use crate::error::{Error, Result};

/// Checks a connection assembled from `--<kind>-connection-*` flags.
///
/// Returns `None` when no field is set (no connection declared), the
/// connection when every field is set, and an error when only some are.
pub fn validate_connection(kind: &'static str, connection: ZoneConnection) -> Result<Option<ZoneConnection>> {
    let fields = [
        &connection.key,
        &connection.key_name,
        &connection.name,
        &connection.primary_server,
    ];

    if fields.iter().all(|f| f.is_empty()) {
        return Ok(None);
    }
    if fields.iter().any(|f| f.is_empty()) {
        return Err(Error::InvalidConnection(kind));
    }
    Ok(Some(connection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ZoneConnection {
        ZoneConnection {
            name: "vinyldns.".into(),
            key_name: "vinyldns.".into(),
            key: "nzisn+4G2ldMn0q1CV3vsg==".into(),
            primary_server: "vinyldns-bind9".into(),
        }
    }

    #[test]
    fn empty_connection_is_absent() {
        assert_eq!(validate_connection("zone", ZoneConnection::default()).unwrap(), None);
    }

    #[test]
    fn complete_connection_is_valid() {
        assert_eq!(validate_connection("zone", full()).unwrap(), Some(full()));
    }

    #[test]
    fn partial_connection_is_an_error() {
        let partials = [
            ZoneConnection { key: String::new(), ..full() },
            ZoneConnection { key_name: String::new(), ..full() },
            ZoneConnection { name: String::new(), ..full() },
            ZoneConnection { primary_server: String::new(), ..full() },
            ZoneConnection { primary_server: "only-this".into(), ..Default::default() },
        ];
        for partial in partials {
            let err = validate_connection("transfer", partial).unwrap_err();
            assert!(matches!(err, Error::InvalidConnection("transfer")));
        }
    }
}
