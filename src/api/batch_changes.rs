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

use crate::api::record_sets::Record;
use crate::api::{ListFilter, Page, paginate};
use crate::client::Client;
use crate::error::Result;
use crate::utils::request::HttpTransport;
use crate::utils::serde_utils::{option_is_empty, page_key, vec_is_empty};
use vinyldns_macros::query_params;

/// A single record mutation inside a batch change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordChange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub input_name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub record: Option<Record>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub record_name: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub record_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub system_message: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_timestamp: String,
    #[serde(default)]
    pub changes: Vec<RecordChange>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub owner_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approval_status: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub reviewer_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub review_comment: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub review_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub cancelled_timestamp: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// Batch change as returned by the list endpoint, without its changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default)]
    pub created_timestamp: String,
    #[serde(default)]
    pub total_changes: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub owner_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "option_is_empty")]
    pub owner_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approval_status: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChanges {
    #[serde(default, skip_serializing_if = "vec_is_empty")]
    pub batch_changes: Vec<BatchChangeSummary>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Page for BatchChanges {
    type Item = BatchChangeSummary;

    fn into_parts(self) -> (Vec<BatchChangeSummary>, Option<String>) {
        (self.batch_changes, self.next_id)
    }
}

impl<T: HttpTransport> Client<T> {
    /// Lists one page of the caller's batch changes.
    pub async fn batch_changes(&self, filter: ListFilter) -> Result<BatchChanges> {
        let query = query_params!(filter, {
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["zones", "batchrecordchanges"], &query).await
    }

    pub async fn batch_changes_all(&self) -> Result<Vec<BatchChangeSummary>> {
        paginate(ListFilter::default(), move |f| self.batch_changes(f)).await
    }

    pub async fn batch_change(&self, id: &str) -> Result<BatchChange> {
        self.get(&["zones", "batchrecordchanges", id], &[]).await
    }

    pub async fn batch_change_create(&self, batch_change: &BatchChange) -> Result<BatchChange> {
        self.post(&["zones", "batchrecordchanges"], batch_change).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::client::testing::{FakeTransport, fake_client};

    #[test]
    fn batch_change_input_round_trips() {
        let input = json!({
            "comments": "this is optional",
            "ownerGroupId": "g1",
            "changes": [
                {
                    "changeType": "Add",
                    "inputName": "ok.example.com.",
                    "type": "A",
                    "ttl": 3600,
                    "record": {"address": "1.1.1.1"}
                },
                {
                    "changeType": "DeleteRecordSet",
                    "inputName": "old.example.com.",
                    "type": "A"
                }
            ]
        });
        let change: BatchChange = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(change.changes.len(), 2);
        assert_eq!(change.changes[1].record, None);
        assert_eq!(serde_json::to_value(&change).unwrap(), input);
    }

    #[tokio::test]
    async fn batch_changes_all_handles_numeric_cursors() {
        let transport = FakeTransport::new()
            .route(
                Method::GET,
                "/zones/batchrecordchanges",
                r#"{"batchChanges":[{"id":"b1","totalChanges":2}],"nextId":1,"maxItems":1}"#,
            )
            .route(
                Method::GET,
                "/zones/batchrecordchanges?startFrom=1",
                r#"{"batchChanges":[{"id":"b2","totalChanges":1}],"startFrom":1,"maxItems":1}"#,
            );
        let all = fake_client(transport).batch_changes_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }
}
