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
use crate::utils::serde_utils::page_key;
use vinyldns_macros::query_params;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
    /// Member references; the API usually fills in only the `id`.
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub admins: Vec<User>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Groups {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name_filter: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Page for Groups {
    type Item = Group;

    fn into_parts(self) -> (Vec<Group>, Option<String>) {
        (self.groups, self.next_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GroupAdmins {
    #[serde(default)]
    admins: Vec<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembers {
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Page for GroupMembers {
    type Item = User;

    fn into_parts(self) -> (Vec<User>, Option<String>) {
        (self.members, self.next_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub new_group: Group,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_group: Option<Group>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActivity {
    #[serde(default)]
    pub changes: Vec<GroupChange>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub start_from: Option<String>,
    #[serde(default, deserialize_with = "page_key", skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl<T: HttpTransport> Client<T> {
    /// Lists one page of the groups visible to the caller.
    pub async fn groups(&self, filter: ListFilter) -> Result<Groups> {
        let query = query_params!(filter, {
            optional name_filter => "groupNameFilter",
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["groups"], &query).await
    }

    /// Lists every group, following `nextId` across pages.
    pub async fn groups_all(&self, filter: ListFilter) -> Result<Vec<Group>> {
        paginate(filter, move |f| self.groups(f)).await
    }

    pub async fn group(&self, id: &str) -> Result<Group> {
        self.get(&["groups", id], &[]).await
    }

    pub async fn group_create(&self, group: &Group) -> Result<Group> {
        self.post(&["groups"], group).await
    }

    /// Updates the group identified by `group.id`.
    pub async fn group_update(&self, group: &Group) -> Result<Group> {
        if group.id.is_empty() {
            return Err(Error::MissingField("id"));
        }
        self.put(&["groups", group.id.as_str()], group).await
    }

    pub async fn group_delete(&self, id: &str) -> Result<Group> {
        self.delete(&["groups", id]).await
    }

    pub async fn group_admins(&self, id: &str) -> Result<Vec<User>> {
        let admins: GroupAdmins = self.get(&["groups", id, "admins"], &[]).await?;
        Ok(admins.admins)
    }

    pub async fn group_members(&self, id: &str, filter: ListFilter) -> Result<GroupMembers> {
        let query = query_params!(filter, {
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["groups", id, "members"], &query).await
    }

    pub async fn group_members_all(&self, id: &str) -> Result<Vec<User>> {
        paginate(ListFilter::default(), move |f| self.group_members(id, f)).await
    }

    pub async fn group_activity(&self, id: &str, filter: ListFilter) -> Result<GroupActivity> {
        let query = query_params!(filter, {
            optional start_from => "startFrom",
            optional max_items => "maxItems",
        });
        self.get(&["groups", id, "activity"], &query).await
    }
}
