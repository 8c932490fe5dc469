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

use clap::Args;
use tracing::info;

use super::JsonCommand;
use crate::api::batch_changes::{BatchChange, RecordChange};
use crate::client::Client;
use crate::error::Result;
use crate::output::Printer;
use crate::utils::request::HttpTransport;

#[derive(Debug, Clone, Args)]
pub struct BatchChangeCommand {
    /// The batch change ID
    #[arg(long)]
    pub batch_change_id: String,
}

/// The quoted-label cells describing one record change.
fn change_cells(change: &RecordChange) -> Result<Vec<String>> {
    let record = serde_json::to_string(&change.record.clone().unwrap_or_default())?;
    Ok(vec![
        format!(r#""ChangeType" - {}"#, change.change_type),
        format!(r#""InputName" - {}"#, change.input_name),
        format!(r#""Type" - {}"#, change.record_type),
        format!(r#""TTL" - {}"#, change.ttl.unwrap_or_default()),
        format!(r#""Record" - {record}"#),
        format!(r#""Status" - {}"#, change.status),
    ])
}

impl BatchChangeCommand {
    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let batch_change = client.batch_change(&self.batch_change_id).await?;
        if printer.is_json() {
            return printer.json(&batch_change);
        }
        if batch_change.changes.is_empty() {
            return printer.line(&format!("No batch change found with id: {}", self.batch_change_id));
        }
        let rows = batch_change
            .changes
            .iter()
            .map(change_cells)
            .collect::<Result<Vec<_>>>()?;
        printer.basic_table(rows)
    }
}

pub(super) async fn list<T: HttpTransport>(client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
    let summaries = client.batch_changes_all().await?;
    if printer.is_json() {
        return printer.json(&summaries);
    }
    if summaries.is_empty() {
        return printer.line("No batch changes found");
    }
    printer.header_table(
        &["ID", "CreatedTimestamp", "Comments"],
        summaries
            .into_iter()
            .map(|summary| vec![summary.id, summary.created_timestamp, summary.comments])
            .collect(),
    )
}

pub(super) async fn create<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &JsonCommand,
) -> Result<()> {
    let batch_change: BatchChange = cmd.parse()?;
    let created = client.batch_change_create(&batch_change).await?;
    info!(id = %created.id, changes = created.changes.len(), "batch change submitted");
    if printer.is_json() {
        return printer.json(&created);
    }

    let changes = created
        .changes
        .iter()
        .map(change_cells)
        .collect::<Result<Vec<_>>>()?
        .concat()
        .join("\n");
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    printer.key_value_table(&[
        ("ID", created.id.clone()),
        ("UserName", created.user_name.clone()),
        ("UserID", created.user_id.clone()),
        ("Status", created.status.clone()),
        ("Comments", created.comments.clone()),
        ("Changes", changes),
        ("CreatedTimestamp", created.created_timestamp.clone()),
        ("OwnerGroupID", text(&created.owner_group_id)),
        ("ApprovalStatus", created.approval_status.clone()),
        ("ReviewerID", text(&created.reviewer_id)),
        ("ReviewerUserName", text(&created.reviewer_user_name)),
        ("ReviewerTimestamp", text(&created.review_timestamp)),
        ("ReviewComment", text(&created.review_comment)),
        ("ScheduledTime", text(&created.scheduled_time)),
        ("CancelledTimestamp", text(&created.cancelled_timestamp)),
    ])
}
