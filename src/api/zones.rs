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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ListFilter, Page, paginate};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::utils::request::HttpTransport;
use crate::utils::serde_utils::{option_is_empty, page_key};
use vinyldns_macros::query_params;

/// TSIG-authenticated connection to a zone's primary server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConnection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key_name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub primary_server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(default)]
    pub admin_group_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub admin_group_name: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub connection: Option<ZoneConnection>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub transfer_connection: Option<ZoneConnection>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub latest_sync: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub backend_id: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneResponse {
    zone: Zone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zones {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_filter: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Page for Zones {
    type Item = Zone;

    fn into_parts(self) -> (Vec<Zone>, Option<String>) {
        (self.zones, self.next_id)
    }
}

/// A change made to a zone; also the response of create, update, delete and sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChange {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChanges {
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_changes: Vec<ZoneChange>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl<T: HttpTransport> Client<T> {
    /// Lists one page of zones.
    pub async fn zones(&self, filter: ListFilter) -> Result<Zones> {
        let query = query_params!(filter, {
            optional name_filter => "nameFilter",
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["zones"], &query).await
    }

    /// Lists every zone, following `nextId` across pages.
    pub async fn zones_all(&self, filter: ListFilter) -> Result<Vec<Zone>> {
        paginate(filter, move |f| self.zones(f)).await
    }

    pub async fn zone(&self, id: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get(&["zones", id], &[]).await?;
        Ok(response.zone)
    }

    pub async fn zone_by_name(&self, name: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get(&["zones", "name", name], &[]).await?;
        Ok(response.zone)
    }

    pub async fn zone_create(&self, zone: &Zone) -> Result<ZoneChange> {
        self.post(&["zones"], zone).await
    }

    /// Updates the zone identified by `zone.id`.
    pub async fn zone_update(&self, zone: &Zone) -> Result<ZoneChange> {
        if zone.id.is_empty() {
            return Err(Error::MissingField("id"));
        }
        self.put(&["zones", zone.id.as_str()], zone).await
    }

    pub async fn zone_delete(&self, id: &str) -> Result<ZoneChange> {
        self.delete(&["zones", id]).await
    }

    pub async fn zone_changes(&self, id: &str, filter: ListFilter) -> Result<ZoneChanges> {
        let query = query_params!(filter, {
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["zones", id, "changes"], &query).await
    }

    /// Asks the API to resync the zone from its primary server.
    pub async fn zone_sync(&self, id: &str) -> Result<ZoneChange> {
        self.post_empty(&["zones", id, "sync"]).await
    }
}
