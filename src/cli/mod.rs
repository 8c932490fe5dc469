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

//! Command-line surface: global flags, subcommands and their dispatch.

use std::io::Write;

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::config::{ACCESS_KEY_ENV, Config, FORMAT_ENV, HOST_ENV, SECRET_KEY_ENV};
use crate::error::Result;
use crate::output::{OutputFormat, Printer};
use crate::utils::request::HttpTransport;

pub mod batch_changes;
pub mod groups;
pub mod record_sets;
pub mod zones;

#[derive(Debug, Parser)]
#[command(name = "vinyldns", version, about = "A CLI to the VinylDNS DNS-as-a-service API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted before or after any subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// vinyldns API Hostname
    #[arg(long, global = true, env = HOST_ENV)]
    pub host: Option<String>,
    /// vinyldns access key
    #[arg(long, visible_alias = "ak", global = true, env = ACCESS_KEY_ENV, hide_env_values = true)]
    pub access_key: Option<String>,
    /// vinyldns secret key
    #[arg(long, visible_alias = "sk", global = true, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: Option<String>,
    /// Output format
    #[arg(
        long,
        visible_alias = "op",
        global = true,
        env = FORMAT_ENV,
        value_enum,
        ignore_case = true,
        default_value_t = OutputFormat::Table
    )]
    pub output: OutputFormat,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn config(&self) -> Result<Config> {
        Config::new(
            self.host.as_deref(),
            self.access_key.as_deref(),
            self.secret_key.as_deref(),
        )
    }
}

/// A request body passed as a JSON string.
#[derive(Debug, Clone, Args)]
pub struct JsonCommand {
    /// The JSON request body
    #[arg(long)]
    pub json: String,
}

impl JsonCommand {
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.json)?)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all VinylDNS groups
    Groups,
    /// Retrieve information about a VinylDNS group
    Group(groups::GroupCommand),
    /// Create a VinylDNS group
    GroupCreate(JsonCommand),
    /// Update a VinylDNS group
    GroupUpdate(JsonCommand),
    /// Delete the targeted VinylDNS group
    GroupDelete(groups::GroupIdCommand),
    /// Retrieve information about VinylDNS group admins
    GroupAdmins(groups::GroupIdCommand),
    /// Retrieve information about VinylDNS group members
    GroupMembers(groups::GroupIdCommand),
    /// Retrieve change activity details for a VinylDNS group
    GroupActivity(groups::GroupIdCommand),
    /// List all VinylDNS zones
    Zones,
    /// View zone details
    Zone(zones::ZoneCommand),
    /// Create a zone
    ZoneCreate(zones::ZoneCreateCommand),
    /// Update a zone
    ZoneUpdate(JsonCommand),
    /// Delete a zone
    ZoneDelete(zones::ZoneIdCommand),
    /// View zone connection details
    ZoneConnection(zones::ZoneIdCommand),
    /// View zone change history
    ZoneChanges(zones::ZoneIdCommand),
    /// Sync a zone
    ZoneSync(zones::ZoneCommand),
    /// View the record set change history for the zone
    RecordSetChanges(zones::ZoneIdCommand),
    /// View record set details
    RecordSet(record_sets::RecordSetIdCommand),
    /// View a single record set change
    RecordSetChange(record_sets::RecordSetChangeCommand),
    /// Create a record set
    RecordSetCreate(record_sets::RecordSetCreateCommand),
    /// Update a record set
    RecordSetUpdate(JsonCommand),
    /// Delete a record set
    RecordSetDelete(record_sets::RecordSetIdCommand),
    /// View all record sets in a zone
    RecordSets(zones::ZoneIdCommand),
    /// Search record sets across every zone
    SearchRecordSets(record_sets::SearchCommand),
    /// View all batch changes created by the user
    BatchChanges,
    /// View batch change details
    BatchChange(batch_changes::BatchChangeCommand),
    /// Create a batch change
    BatchChangeCreate(JsonCommand),
}

/// Validates the global settings, then runs the parsed command against the
/// API, writing its output to `out`.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let client = cli.global.config()?.client()?;
    let mut printer = Printer::new(cli.global.output, out);
    execute(&client, &cli.command, &mut printer).await
}

pub async fn execute<T: HttpTransport>(
    client: &Client<T>,
    command: &Command,
    printer: &mut Printer<'_>,
) -> Result<()> {
    tracing::debug!(?command, "executing");
    match command {
        Command::Groups => groups::list(client, printer).await,
        Command::Group(cmd) => cmd.handle(client, printer).await,
        Command::GroupCreate(cmd) => groups::create(client, printer, cmd).await,
        Command::GroupUpdate(cmd) => groups::update(client, printer, cmd).await,
        Command::GroupDelete(cmd) => groups::delete(client, printer, cmd).await,
        Command::GroupAdmins(cmd) => groups::admins(client, printer, cmd).await,
        Command::GroupMembers(cmd) => groups::members(client, printer, cmd).await,
        Command::GroupActivity(cmd) => groups::activity(client, printer, cmd).await,
        Command::Zones => zones::list(client, printer).await,
        Command::Zone(cmd) => cmd.show(client, printer).await,
        Command::ZoneCreate(cmd) => cmd.handle(client, printer).await,
        Command::ZoneUpdate(cmd) => zones::update(client, printer, cmd).await,
        Command::ZoneDelete(cmd) => zones::delete(client, printer, cmd).await,
        Command::ZoneConnection(cmd) => zones::connection(client, printer, cmd).await,
        Command::ZoneChanges(cmd) => zones::changes(client, printer, cmd).await,
        Command::ZoneSync(cmd) => cmd.sync(client, printer).await,
        Command::RecordSetChanges(cmd) => record_sets::changes(client, printer, cmd).await,
        Command::RecordSet(cmd) => cmd.show(client, printer).await,
        Command::RecordSetChange(cmd) => cmd.handle(client, printer).await,
        Command::RecordSetCreate(cmd) => cmd.handle(client, printer).await,
        Command::RecordSetUpdate(cmd) => record_sets::update(client, printer, cmd).await,
        Command::RecordSetDelete(cmd) => cmd.delete(client, printer).await,
        Command::RecordSets(cmd) => record_sets::list(client, printer, cmd).await,
        Command::SearchRecordSets(cmd) => cmd.handle(client, printer).await,
        Command::BatchChanges => batch_changes::list(client, printer).await,
        Command::BatchChange(cmd) => cmd.handle(client, printer).await,
        Command::BatchChangeCreate(cmd) => batch_changes::create(client, printer, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "vinyldns",
            "zones",
            "--host",
            "http://localhost:9000",
            "--ak",
            "okAccessKey",
            "--sk",
            "okSecretKey",
            "--op",
            "json",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Zones));
        assert_eq!(cli.global.host.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.global.access_key.as_deref(), Some("okAccessKey"));
        assert_eq!(cli.global.secret_key.as_deref(), Some("okSecretKey"));
        assert_eq!(cli.global.output, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn subcommands_use_kebab_case_names() {
        let cli = Cli::try_parse_from(["vinyldns", "search-record-sets", "--record-name-filter", "foo*"]).unwrap();
        match cli.command {
            Command::SearchRecordSets(cmd) => assert_eq!(cmd.record_name_filter, "foo*"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn at_least_one_lookup_flag_is_required() {
        let err = Cli::try_parse_from(["vinyldns", "group"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["vinyldns", "group", "--name", "ok-group"]).unwrap();
        assert!(matches!(cli.command, Command::Group(_)));
    }

    #[test]
    fn output_format_ignores_case() {
        let cli = Cli::try_parse_from(["vinyldns", "zones", "--output", "JSON"]).unwrap();
        assert_eq!(cli.global.output, OutputFormat::Json);
        let cli = Cli::try_parse_from(["vinyldns", "zones", "--op", "Table"]).unwrap();
        assert_eq!(cli.global.output, OutputFormat::Table);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let err = Cli::try_parse_from(["vinyldns", "zones", "--output", "yaml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
