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
use crate::api::ListFilter;
use crate::api::zones::{Zone, ZoneConnection};
use crate::client::Client;
use crate::connection::validate_connection;
use crate::error::Result;
use crate::output::Printer;
use crate::utils::request::HttpTransport;

#[derive(Debug, Clone, Args)]
pub struct ZoneCommand {
    /// The zone ID
    #[arg(long, required_unless_present = "zone_name")]
    pub zone_id: Option<String>,
    /// The zone name
    #[arg(long)]
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ZoneIdCommand {
    /// The zone ID
    #[arg(long)]
    pub zone_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct ZoneCreateCommand {
    /// The zone name
    #[arg(long)]
    pub name: String,
    /// The zone contact email
    #[arg(long)]
    pub email: String,
    /// The zone admin group ID
    #[arg(long, required_unless_present = "admin_group_name")]
    pub admin_group_id: Option<String>,
    /// The zone admin group name
    #[arg(long)]
    pub admin_group_name: Option<String>,
    /// The zone connection name; defaults to the key name
    #[arg(long)]
    pub zone_connection_name: Option<String>,
    /// The zone connection key name
    #[arg(long)]
    pub zone_connection_key_name: Option<String>,
    /// The zone connection key
    #[arg(long)]
    pub zone_connection_key: Option<String>,
    /// The zone connection primary server
    #[arg(long)]
    pub zone_connection_primary_server: Option<String>,
    /// The transfer connection name; defaults to the key name
    #[arg(long)]
    pub transfer_connection_name: Option<String>,
    /// The transfer connection key name
    #[arg(long)]
    pub transfer_connection_key_name: Option<String>,
    /// The transfer connection key
    #[arg(long)]
    pub transfer_connection_key: Option<String>,
    /// The transfer connection primary server
    #[arg(long)]
    pub transfer_connection_primary_server: Option<String>,
}

fn connection_from(
    name: Option<&str>,
    key_name: Option<&str>,
    key: Option<&str>,
    primary_server: Option<&str>,
) -> ZoneConnection {
    let key_name = key_name.unwrap_or_default().to_string();
    ZoneConnection {
        name: name.map_or_else(|| key_name.clone(), str::to_string),
        key_name,
        key: key.unwrap_or_default().to_string(),
        primary_server: primary_server.unwrap_or_default().to_string(),
    }
}

impl ZoneCreateCommand {
    fn connections(&self) -> Result<(Option<ZoneConnection>, Option<ZoneConnection>)> {
        let connection = validate_connection(
            "zone",
            connection_from(
                self.zone_connection_name.as_deref(),
                self.zone_connection_key_name.as_deref(),
                self.zone_connection_key.as_deref(),
                self.zone_connection_primary_server.as_deref(),
            ),
        )?;
        let transfer_connection = validate_connection(
            "transfer",
            connection_from(
                self.transfer_connection_name.as_deref(),
                self.transfer_connection_key_name.as_deref(),
                self.transfer_connection_key.as_deref(),
                self.transfer_connection_primary_server.as_deref(),
            ),
        )?;
        Ok((connection, transfer_connection))
    }

    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let (connection, transfer_connection) = self.connections()?;
        let admin_group_id = client
            .admin_group_id(
                self.admin_group_id.as_deref().unwrap_or_default(),
                self.admin_group_name.as_deref().unwrap_or_default(),
            )
            .await?;

        let zone = Zone {
            name: self.name.clone(),
            email: self.email.clone(),
            admin_group_id,
            connection,
            transfer_connection,
            ..Default::default()
        };
        let created = client.zone_create(&zone).await?;
        info!(zone = %created.zone.name, change = %created.id, status = %created.status, "zone create submitted");
        if printer.is_json() {
            return printer.json(&created);
        }
        printer.line(&format!("Created zone {}", created.zone.name))
    }
}

impl ZoneCommand {
    fn id(&self) -> &str {
        self.zone_id.as_deref().unwrap_or_default()
    }

    fn name(&self) -> &str {
        self.zone_name.as_deref().unwrap_or_default()
    }

    pub async fn show<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let zone = client.get_zone(self.name(), self.id()).await?;
        if printer.is_json() {
            return printer.json(&zone);
        }
        printer.key_value_table(&[
            ("Name", zone.name.clone()),
            ("ID", zone.id.clone()),
            ("Status", zone.status.clone()),
        ])
    }

    pub async fn sync<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let id = client.zone_id(self.id(), self.name()).await?;
        let change = client.zone_sync(&id).await?;
        info!(zone = %id, change = %change.id, "zone sync submitted");
        if printer.is_json() {
            return printer.json(&change);
        }
        printer.key_value_table(&[
            ("Zone", change.zone.name.clone()),
            ("ZoneID", change.zone.id.clone()),
            ("ZoneStatus", change.zone.status.clone()),
            ("UserID", change.user_id.clone()),
            ("ChangeType", change.change_type.clone()),
            ("SyncStatus", change.status.clone()),
            ("Created", change.created.clone()),
            ("ID", change.id.clone()),
        ])
    }
}

pub(super) async fn list<T: HttpTransport>(client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
    let zones = client.zones_all(ListFilter::default()).await?;
    if printer.is_json() {
        return printer.json(&zones);
    }
    if zones.is_empty() {
        return printer.line("No zones found");
    }
    printer.header_table(
        &["Name", "ID"],
        zones.into_iter().map(|zone| vec![zone.name, zone.id]).collect(),
    )
}

pub(super) async fn update<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &JsonCommand,
) -> Result<()> {
    let zone: Zone = cmd.parse()?;
    let updated = client.zone_update(&zone).await?;
    info!(zone = %updated.zone.name, change = %updated.id, "zone update submitted");
    if printer.is_json() {
        return printer.json(&updated);
    }
    printer.line(&format!("Updated zone {}", updated.zone.name))
}

pub(super) async fn delete<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &ZoneIdCommand,
) -> Result<()> {
    let deleted = client.zone_delete(&cmd.zone_id).await?;
    info!(zone = %cmd.zone_id, change = %deleted.id, "zone delete submitted");
    if printer.is_json() {
        return printer.json(&deleted);
    }
    printer.line(&format!("Deleted zone {}", cmd.zone_id))
}

pub(super) async fn connection<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &ZoneIdCommand,
) -> Result<()> {
    let zone = client.zone(&cmd.zone_id).await?;
    if printer.is_json() {
        return printer.json(&zone.connection);
    }
    match zone.connection {
        None => printer.line(&format!("No zone connection found for zone {}", cmd.zone_id)),
        Some(connection) => printer.key_value_table(&[
            ("Name", connection.name),
            ("KeyName", connection.key_name),
            ("Key", connection.key),
            ("PrimaryServer", connection.primary_server),
        ]),
    }
}

pub(super) async fn changes<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &ZoneIdCommand,
) -> Result<()> {
    let history = client.zone_changes(&cmd.zone_id, ListFilter::default()).await?;
    if printer.is_json() {
        return printer.json(&history.zone_changes);
    }
    for change in history.zone_changes {
        printer.key_value_table(&[
            ("Zone", change.zone.name),
            ("ZoneID", change.zone.id),
            ("UserID", change.user_id),
            ("ChangeType", change.change_type),
            ("Status", change.status),
            ("Created", change.created),
            ("ID", change.id),
        ])?;
    }
    Ok(())
}
