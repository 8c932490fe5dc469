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

use crate::api::zones::Zone;
use crate::api::{GlobalListFilter, ListFilter, Page, paginate};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::utils::request::HttpTransport;
use crate::utils::serde_utils::page_key;
use vinyldns_macros::query_params;

/// Resource record data. Which fields are set depends on the record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsdname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptrdname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<i64>,
    /// SSHFP fingerprint type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordSetResponse {
    record_set: RecordSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSets {
    #[serde(default)]
    pub record_sets: Vec<RecordSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_name_filter: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Page for RecordSets {
    type Item = RecordSet;

    fn into_parts(self) -> (Vec<RecordSet>, Option<String>) {
        (self.record_sets, self.next_id)
    }
}

/// Response of record-set create, update and delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetUpdateResponse {
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub record_set: RecordSet,
    #[serde(default)]
    pub change_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetChange {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub record_set: RecordSet,
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
pub struct RecordSetChanges {
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub record_set_changes: Vec<RecordSetChange>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl<T: HttpTransport> Client<T> {
    /// Lists one page of the record sets in a zone.
    pub async fn record_sets(&self, zone_id: &str, filter: ListFilter) -> Result<RecordSets> {
        let query = query_params!(filter, {
            optional name_filter => "recordNameFilter",
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["zones", zone_id, "recordsets"], &query).await
    }

    /// Lists every record set in a zone, following `nextId` across pages.
    pub async fn record_sets_all(&self, zone_id: &str, filter: ListFilter) -> Result<Vec<RecordSet>> {
        paginate(filter, move |f| self.record_sets(zone_id, f)).await
    }

    pub async fn record_set(&self, zone_id: &str, id: &str) -> Result<RecordSet> {
        let response: RecordSetResponse = self.get(&["zones", zone_id, "recordsets", id], &[]).await?;
        Ok(response.record_set)
    }

    /// Creates `record_set` in the zone named by its `zone_id`.
    pub async fn record_set_create(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        if record_set.zone_id.is_empty() {
            return Err(Error::MissingField("zoneId"));
        }
        self.post(&["zones", record_set.zone_id.as_str(), "recordsets"], record_set)
            .await
    }

    pub async fn record_set_update(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        if record_set.zone_id.is_empty() {
            return Err(Error::MissingField("zoneId"));
        }
        if record_set.id.is_empty() {
            return Err(Error::MissingField("id"));
        }
        self.put(
            &["zones", record_set.zone_id.as_str(), "recordsets", record_set.id.as_str()],
            record_set,
        )
        .await
    }

    pub async fn record_set_delete(&self, zone_id: &str, id: &str) -> Result<RecordSetUpdateResponse> {
        self.delete(&["zones", zone_id, "recordsets", id]).await
    }

    pub async fn record_set_changes(&self, zone_id: &str, filter: ListFilter) -> Result<RecordSetChanges> {
        let query = query_params!(filter, {
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["zones", zone_id, "recordsetchanges"], &query).await
    }

    pub async fn record_set_change(
        &self,
        zone_id: &str,
        record_set_id: &str,
        change_id: &str,
    ) -> Result<RecordSetChange> {
        self.get(
            &["zones", zone_id, "recordsets", record_set_id, "changes", change_id],
            &[],
        )
        .await
    }

    /// Searches record sets across every zone the caller can see.
    pub async fn record_sets_global(&self, filter: GlobalListFilter) -> Result<RecordSets> {
        let query = query_params!(filter, {
            required record_name_filter => "recordNameFilter",
            repeated record_type_filter => "recordTypeFilter",
            optional record_owner_group_filter => "recordOwnerGroupFilter",
            required name_sort => "nameSort",
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["recordsets"], &query).await
    }

    pub async fn record_sets_global_all(&self, filter: GlobalListFilter) -> Result<Vec<RecordSet>> {
        paginate(filter, move |f| self.record_sets_global(f)).await
    }
}
