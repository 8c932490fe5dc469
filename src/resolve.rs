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

//! Resolution of human-supplied names to API identifiers.

use tracing::{debug, warn};

use crate::api::ListFilter;
use crate::api::groups::Group;
use crate::api::zones::Zone;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::utils::request::HttpTransport;

impl<T: HttpTransport> Client<T> {
    /// Finds the group whose name is exactly `name`.
    ///
    /// The API has no group-by-name endpoint, so every page of groups is
    /// listed and scanned.
    pub async fn group_by_name(&self, name: &str) -> Result<Group> {
        let groups = self.groups_all(ListFilter::default()).await?;
        debug!(name, candidates = groups.len(), "resolving group by name");
        let mut matches = groups.into_iter().filter(|group| group.name == name);
        let group = matches
            .next()
            .ok_or_else(|| Error::NotFound(format!("Group {name} not found")))?;
        let skipped = matches.count();
        if skipped > 0 {
            warn!(name, id = %group.id, skipped, "several groups share this name, using the first");
        }
        Ok(group)
    }

    /// Fetches a group by name when one is given, otherwise by id.
    pub async fn get_group(&self, name: &str, id: &str) -> Result<Group> {
        if !name.is_empty() {
            return self.group_by_name(name).await;
        }
        self.group(id).await
    }

    /// Returns `id` when set, otherwise the id of the group named `name`.
    pub async fn admin_group_id(&self, id: &str, name: &str) -> Result<String> {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
        Ok(self.group_by_name(name).await?.id)
    }

    /// Returns `id` when set, otherwise the id of the zone named `name`.
    pub async fn zone_id(&self, id: &str, name: &str) -> Result<String> {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
        Ok(self.zone_by_name(name).await?.id)
    }

    /// Fetches a zone by name when one is given, otherwise by id.
    pub async fn get_zone(&self, name: &str, id: &str) -> Result<Zone> {
        if !name.is_empty() {
            return self.zone_by_name(name).await;
        }
        self.zone(id).await
    }
}
