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
use crate::api::record_sets::{Record, RecordSet, RecordSetChange};
use crate::api::{GlobalListFilter, ListFilter, NameSort};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::output::Printer;
use crate::utils::request::HttpTransport;

/// Record types `record-set-create` can build from `--record-set-data`.
pub const RECORD_TYPES: [&str; 7] = ["A", "AAAA", "CNAME", "MX", "NS", "PTR", "TXT"];

#[derive(Debug, Clone, Args)]
pub struct RecordSetIdCommand {
    /// The zone ID
    #[arg(long)]
    pub zone_id: String,
    /// The record set ID
    #[arg(long)]
    pub record_set_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct RecordSetChangeCommand {
    /// The zone ID
    #[arg(long, required_unless_present = "zone_name")]
    pub zone_id: Option<String>,
    /// The zone name
    #[arg(long)]
    pub zone_name: Option<String>,
    /// The record set ID
    #[arg(long)]
    pub record_set_id: String,
    /// The change ID
    #[arg(long)]
    pub change_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct RecordSetCreateCommand {
    /// The zone ID
    #[arg(long, required_unless_present = "zone_name")]
    pub zone_id: Option<String>,
    /// The zone name
    #[arg(long)]
    pub zone_name: Option<String>,
    /// The record set name
    #[arg(long)]
    pub record_set_name: String,
    /// The record set type
    #[arg(long)]
    pub record_set_type: String,
    /// The record set TTL
    #[arg(long)]
    pub record_set_ttl: String,
    /// The record set data, comma separated for multiple records
    #[arg(long)]
    pub record_set_data: String,
}

#[derive(Debug, Clone, Args)]
pub struct SearchCommand {
    /// Record names to match; `*` is a wildcard
    #[arg(long)]
    pub record_name_filter: String,
    /// The start key of the page
    #[arg(long)]
    pub start_from: Option<String>,
    /// The maximum number of record sets to return; every page is fetched when unset
    #[arg(long)]
    pub max_items: Option<String>,
    /// Record types to match (repeatable)
    #[arg(long)]
    pub record_type_filter: Vec<String>,
    /// The owner group ID of the record sets
    #[arg(long)]
    pub record_owner_group: Option<String>,
    /// ASC or DESC
    #[arg(long)]
    pub name_sort: Option<String>,
}

/// Builds the records of a new record set from the comma-separated
/// `--record-set-data` value.
///
/// Returns the canonical upper-case record type along with the records.
pub fn build_records(record_type: &str, data: &str) -> Result<(&'static str, Vec<Record>)> {
    let canonical = RECORD_TYPES
        .iter()
        .find(|t| t.eq_ignore_ascii_case(record_type))
        .copied()
        .ok_or_else(|| Error::InvalidRecordType(record_type.to_string()))?;

    let values: Vec<&str> = data.split(',').map(str::trim).collect();
    let first = values.first().copied().unwrap_or_default().to_string();

    let records = match canonical {
        "A" | "AAAA" => values
            .iter()
            .map(|address| Record {
                address: Some(address.to_string()),
                ..Default::default()
            })
            .collect(),
        "CNAME" => vec![Record {
            cname: Some(first),
            ..Default::default()
        }],
        "MX" => {
            let preference = first.parse::<i64>().map_err(|source| Error::InvalidNumber {
                flag: "record-set-data",
                value: first.clone(),
                source,
            })?;
            let exchange = values
                .get(1)
                .filter(|exchange| !exchange.is_empty())
                .ok_or_else(|| Error::InvalidRecordData {
                    record_type: "MX",
                    reason: "expected <preference>,<exchange>".to_string(),
                })?;
            vec![Record {
                preference: Some(preference),
                exchange: Some(exchange.to_string()),
                ..Default::default()
            }]
        }
        "NS" => values
            .iter()
            .map(|nsdname| Record {
                nsdname: Some(nsdname.to_string()),
                ..Default::default()
            })
            .collect(),
        "PTR" => vec![Record {
            ptrdname: Some(first),
            ..Default::default()
        }],
        _ => vec![Record {
            text: Some(data.to_string()),
            ..Default::default()
        }],
    };
    Ok((canonical, records))
}

/// Renders the set fields of every record as `<Label>: <value>` lines.
pub fn record_lines(records: &[Record]) -> String {
    fn number(value: Option<i64>) -> Option<String> {
        value.filter(|n| *n != 0).map(|n| n.to_string())
    }

    let mut lines = Vec::new();
    for record in records {
        let fields = [
            ("Address", record.address.clone()),
            ("Algorithm", number(record.algorithm)),
            ("CNAME", record.cname.clone()),
            ("Exchange", record.exchange.clone()),
            ("Expire", number(record.expire)),
            ("Fingerprint", record.fingerprint.clone()),
            ("MNAME", record.mname.clone()),
            ("Minimum", number(record.minimum)),
            ("NSDNAME", record.nsdname.clone()),
            ("Port", number(record.port)),
            ("Preference", number(record.preference)),
            ("Priority", number(record.priority)),
            ("PTRDNAME", record.ptrdname.clone()),
            ("Refresh", number(record.refresh)),
            ("Retry", number(record.retry)),
            ("RNAME", record.rname.clone()),
            ("Serial", number(record.serial)),
            ("Target", record.target.clone()),
            ("Text", record.text.clone()),
            ("Type", number(record.fingerprint_type)),
            ("Weight", number(record.weight)),
        ];
        lines.extend(fields.into_iter().filter_map(|(label, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}"))
        }));
    }
    lines.join("\n")
}

fn change_pairs(change: &RecordSetChange) -> [(&'static str, String); 8] {
    [
        ("Zone", change.zone.name.clone()),
        ("RecordSetName", change.record_set.name.clone()),
        ("RecordSetID", change.record_set.id.clone()),
        ("UserID", change.user_id.clone()),
        ("ChangeType", change.change_type.clone()),
        ("Status", change.status.clone()),
        ("Created", change.created.clone()),
        ("ID", change.id.clone()),
    ]
}

fn print_record_sets(printer: &mut Printer<'_>, record_sets: Vec<RecordSet>) -> Result<()> {
    if printer.is_json() {
        return printer.json(&record_sets);
    }
    if record_sets.is_empty() {
        return printer.line("No record sets found");
    }
    printer.header_table(
        &["Name", "ID", "Type", "Status"],
        record_sets
            .into_iter()
            .map(|rs| vec![rs.name, rs.id, rs.record_type, rs.status])
            .collect(),
    )
}

impl RecordSetIdCommand {
    pub async fn show<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let rs = client.record_set(&self.zone_id, &self.record_set_id).await?;
        if printer.is_json() {
            return printer.json(&rs);
        }
        printer.key_value_table(&[
            ("Zone", rs.zone_id.clone()),
            ("Name", rs.name.clone()),
            ("Account", rs.account.clone()),
            ("ID", rs.id.clone()),
            ("Type", rs.record_type.clone()),
            ("Records", record_lines(&rs.records)),
            ("Created", rs.created.clone()),
            ("Status", rs.status.clone()),
            ("Updated", rs.updated.clone()),
            ("TTL", rs.ttl.to_string()),
        ])
    }

    pub async fn delete<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let deleted = client.record_set_delete(&self.zone_id, &self.record_set_id).await?;
        info!(id = %self.record_set_id, change = %deleted.change_id, "record set delete submitted");
        if printer.is_json() {
            return printer.json(&deleted);
        }
        printer.line(&format!("Deleted record set {}", self.record_set_id))
    }
}

impl RecordSetChangeCommand {
    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let zone_id = client
            .zone_id(
                self.zone_id.as_deref().unwrap_or_default(),
                self.zone_name.as_deref().unwrap_or_default(),
            )
            .await?;
        let change = client
            .record_set_change(&zone_id, &self.record_set_id, &self.change_id)
            .await?;
        if printer.is_json() {
            return printer.json(&change);
        }
        printer.key_value_table(&change_pairs(&change))
    }
}

impl RecordSetCreateCommand {
    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let (record_type, records) = build_records(&self.record_set_type, &self.record_set_data)?;
        let ttl = self
            .record_set_ttl
            .trim()
            .parse::<u32>()
            .map_err(|source| Error::InvalidNumber {
                flag: "record-set-ttl",
                value: self.record_set_ttl.clone(),
                source,
            })?;

        let zone_id = client
            .zone_id(
                self.zone_id.as_deref().unwrap_or_default(),
                self.zone_name.as_deref().unwrap_or_default(),
            )
            .await?;
        let record_set = RecordSet {
            zone_id,
            name: self.record_set_name.clone(),
            record_type: record_type.to_string(),
            ttl,
            records,
            ..Default::default()
        };
        let created = client.record_set_create(&record_set).await?;
        info!(name = %record_set.name, change = %created.change_id, "record set create submitted");
        if printer.is_json() {
            return printer.json(&created);
        }
        printer.line(&format!("Created record set {}", self.record_set_name))
    }
}

impl SearchCommand {
    fn filter(&self) -> Result<(GlobalListFilter, bool)> {
        let max_items = match self.max_items.as_deref() {
            None => None,
            Some(value) => {
                let parsed = value.trim().parse::<i64>().map_err(|source| Error::InvalidNumber {
                    flag: "max-items",
                    value: value.to_string(),
                    source,
                })?;
                (parsed > 0).then(|| u32::try_from(parsed).unwrap_or(u32::MAX))
            }
        };
        let filter = GlobalListFilter {
            record_name_filter: self.record_name_filter.clone(),
            record_type_filter: self.record_type_filter.clone(),
            record_owner_group_filter: self.record_owner_group.clone().filter(|g| !g.is_empty()),
            name_sort: NameSort::parse(self.name_sort.as_deref()),
            start_from: self.start_from.clone().filter(|s| !s.is_empty()),
            max_items,
        };
        let fetch_all = max_items.is_none();
        Ok((filter, fetch_all))
    }

    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let (filter, fetch_all) = self.filter()?;
        let record_sets = if fetch_all {
            client.record_sets_global_all(filter).await?
        } else {
            client.record_sets_global(filter).await?.record_sets
        };
        print_record_sets(printer, record_sets)
    }
}

pub(super) async fn list<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &super::zones::ZoneIdCommand,
) -> Result<()> {
    let record_sets = client.record_sets_all(&cmd.zone_id, ListFilter::default()).await?;
    print_record_sets(printer, record_sets)
}

pub(super) async fn changes<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &super::zones::ZoneIdCommand,
) -> Result<()> {
    let history = client.record_set_changes(&cmd.zone_id, ListFilter::default()).await?;
    if printer.is_json() {
        return printer.json(&history.record_set_changes);
    }
    for change in &history.record_set_changes {
        printer.key_value_table(&change_pairs(change))?;
    }
    Ok(())
}

pub(super) async fn update<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &JsonCommand,
) -> Result<()> {
    let record_set: RecordSet = cmd.parse()?;
    let updated = client.record_set_update(&record_set).await?;
    info!(id = %record_set.id, change = %updated.change_id, "record set update submitted");
    if printer.is_json() {
        return printer.json(&updated);
    }
    printer.line(&format!("Updated record set {}", record_set.name))
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;
    use crate::cli::testing::run_command;
    use crate::client::testing::{FakeTransport, fake_client};

    const RECORD_SET: &str = r#"{
        "id": "rs1",
        "zoneId": "z1",
        "name": "www",
        "type": "A",
        "ttl": 200,
        "status": "Active",
        "account": "system",
        "records": [{"address": "10.1.1.1"}, {"address": "10.1.1.2"}]
    }"#;

    fn response(record_set: &str) -> String {
        format!(r#"{{"zone":{{"id":"z1","name":"ok."}},"recordSet":{record_set},"changeId":"c1","status":"Pending"}}"#)
    }

    #[test]
    fn record_type_is_case_insensitive() {
        let (record_type, records) = build_records("aaaa", "::1").unwrap();
        assert_eq!(record_type, "AAAA");
        assert_eq!(records[0].address.as_deref(), Some("::1"));
    }

    #[test]
    fn unknown_record_type_is_rejected() {
        let err = build_records("SRV", "x").unwrap_err();
        assert_eq!(err.to_string(), "unknown --record-set-type SRV");
    }

    #[test]
    fn address_and_ns_records_split_on_commas() {
        let (_, records) = build_records("A", "1.1.1.1,2.2.2.2").unwrap();
        let addresses: Vec<_> = records.iter().map(|r| r.address.as_deref().unwrap()).collect();
        assert_eq!(addresses, ["1.1.1.1", "2.2.2.2"]);

        let (_, records) = build_records("NS", "ns1.ok.,ns2.ok.").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].nsdname.as_deref(), Some("ns2.ok."));
    }

    #[test]
    fn single_value_types_use_the_first_element() {
        let (_, records) = build_records("CNAME", "target.ok.,ignored").unwrap();
        assert_eq!(records, vec![Record { cname: Some("target.ok.".into()), ..Default::default() }]);

        let (_, records) = build_records("ptr", "host.ok.").unwrap();
        assert_eq!(records[0].ptrdname.as_deref(), Some("host.ok."));
    }

    #[test]
    fn mx_needs_a_preference_and_an_exchange() {
        let (_, records) = build_records("MX", "10,mail.ok.").unwrap();
        assert_eq!(records[0].preference, Some(10));
        assert_eq!(records[0].exchange.as_deref(), Some("mail.ok."));

        assert!(matches!(build_records("MX", "10").unwrap_err(), Error::InvalidRecordData { .. }));
        assert!(matches!(build_records("MX", "high,mail.ok.").unwrap_err(), Error::InvalidNumber { .. }));
    }

    #[test]
    fn txt_keeps_the_whole_value() {
        let (_, records) = build_records("TXT", "v=spf1 a, mx -all").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text.as_deref(), Some("v=spf1 a, mx -all"));
    }

    #[test]
    fn record_lines_skip_empty_and_zero_values() {
        let records = vec![
            Record {
                preference: Some(10),
                exchange: Some("mail.ok.".into()),
                ..Default::default()
            },
            Record {
                priority: Some(0),
                text: Some(String::new()),
                address: Some("1.1.1.1".into()),
                ..Default::default()
            },
        ];
        assert_eq!(record_lines(&records), "Exchange: mail.ok.\nPreference: 10\nAddress: 1.1.1.1");
    }

    #[test]
    fn search_filter_parses_max_items() {
        let mut cmd = SearchCommand {
            record_name_filter: "www*".into(),
            start_from: None,
            max_items: Some("0".into()),
            record_type_filter: vec!["A".into()],
            record_owner_group: None,
            name_sort: Some("desc".into()),
        };
        let (filter, fetch_all) = cmd.filter().unwrap();
        assert!(fetch_all);
        assert_eq!(filter.max_items, None);
        assert_eq!(filter.name_sort, NameSort::Asc);

        cmd.max_items = Some("5".into());
        cmd.name_sort = Some("DESC".into());
        let (filter, fetch_all) = cmd.filter().unwrap();
        assert!(!fetch_all);
        assert_eq!(filter.max_items, Some(5));
        assert_eq!(filter.name_sort, NameSort::Desc);

        cmd.max_items = Some("five".into());
        assert!(matches!(cmd.filter().unwrap_err(), Error::InvalidNumber { flag: "max-items", .. }));
    }

    #[tokio::test]
    async fn record_set_create_resolves_the_zone_name() {
        let client = fake_client(
            FakeTransport::new()
                .route(Method::GET, "/zones/name/ok.", r#"{"zone":{"id":"z1","name":"ok."}}"#)
                .route(Method::POST, "/zones/z1/recordsets", &response(RECORD_SET)),
        );
        let out = run_command(
            &client,
            &[
                "record-set-create",
                "--zone-name",
                "ok.",
                "--record-set-name",
                "www",
                "--record-set-type",
                "a",
                "--record-set-ttl",
                "200",
                "--record-set-data",
                "10.1.1.1,10.1.1.2",
            ],
        )
        .await
        .unwrap();
        assert_eq!(out, "Created record set www\n");

        let requests = client.transport().requests();
        let body: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["type"], "A");
        assert_eq!(body["ttl"], 200);
        assert_eq!(body["zoneId"], "z1");
        assert_eq!(body["records"][1]["address"], "10.1.1.2");
    }

    #[tokio::test]
    async fn record_set_create_rejects_bad_input_before_any_request() {
        let client = fake_client(FakeTransport::new());
        let base = [
            "record-set-create",
            "--zone-id",
            "z1",
            "--record-set-name",
            "www",
            "--record-set-data",
            "1.1.1.1",
        ];
        let args: Vec<&str> = base.iter().copied().chain(["--record-set-type", "BOGUS", "--record-set-ttl", "200"]).collect();
        assert!(matches!(run_command(&client, &args).await.unwrap_err(), Error::InvalidRecordType(_)));

        let args: Vec<&str> = base.iter().copied().chain(["--record-set-type", "A", "--record-set-ttl", "ten"]).collect();
        assert!(matches!(
            run_command(&client, &args).await.unwrap_err(),
            Error::InvalidNumber { flag: "record-set-ttl", .. }
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn record_set_shows_its_records() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/zones/z1/recordsets/rs1",
            &format!(r#"{{"recordSet":{RECORD_SET}}}"#),
        ));
        let out = run_command(&client, &["record-set", "--zone-id", "z1", "--record-set-id", "rs1"])
            .await
            .unwrap();
        assert!(out.contains("Address: 10.1.1.1"));
        assert!(out.contains("Address: 10.1.1.2"));
        assert!(out.contains("200"));
    }

    #[tokio::test]
    async fn record_sets_lists_every_page() {
        let client = fake_client(
            FakeTransport::new()
                .route(
                    Method::GET,
                    "/zones/z1/recordsets",
                    &format!(r#"{{"recordSets":[{RECORD_SET}],"nextId":"2"}}"#),
                )
                .route(
                    Method::GET,
                    "/zones/z1/recordsets?startFrom=2",
                    r#"{"recordSets":[{"id":"rs2","zoneId":"z1","name":"mail","type":"MX","ttl":300,"status":"Active"}]}"#,
                ),
        );
        let out = run_command(&client, &["record-sets", "--zone-id", "z1"]).await.unwrap();
        assert!(out.contains("www"));
        assert!(out.contains("mail"));
    }

    #[tokio::test]
    async fn search_with_max_items_fetches_one_page() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/recordsets?recordNameFilter=www&recordTypeFilter=A&recordTypeFilter=CNAME&nameSort=ASC&maxItems=1",
            &format!(r#"{{"recordSets":[{RECORD_SET}],"nextId":"next"}}"#),
        ));
        let out = run_command(
            &client,
            &[
                "search-record-sets",
                "--record-name-filter",
                "www",
                "--record-type-filter",
                "A",
                "--record-type-filter",
                "CNAME",
                "--max-items",
                "1",
            ],
        )
        .await
        .unwrap();
        assert!(out.contains("rs1"));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn search_reports_no_matches() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/recordsets?recordNameFilter=none&nameSort=DESC",
            r#"{"recordSets":[]}"#,
        ));
        let out = run_command(
            &client,
            &["search-record-sets", "--record-name-filter", "none", "--name-sort", "DESC"],
        )
        .await
        .unwrap();
        assert_eq!(out, "No record sets found\n");
    }

    #[tokio::test]
    async fn record_set_change_and_history() {
        let change = r#"{"id":"c1","zone":{"id":"z1","name":"ok."},"recordSet":{"id":"rs1","zoneId":"z1","name":"www","type":"A","ttl":200},"userId":"u1","changeType":"Create","status":"Complete","created":"now"}"#;
        let client = fake_client(
            FakeTransport::new()
                .route(Method::GET, "/zones/z1/recordsets/rs1/changes/c1", change)
                .route(
                    Method::GET,
                    "/zones/z1/recordsetchanges",
                    &format!(r#"{{"zoneId":"z1","recordSetChanges":[{change}]}}"#),
                ),
        );
        let out = run_command(
            &client,
            &["record-set-change", "--zone-id", "z1", "--record-set-id", "rs1", "--change-id", "c1"],
        )
        .await
        .unwrap();
        assert!(out.contains("RecordSetName"));
        assert!(out.contains("Complete"));

        let out = run_command(&client, &["record-set-changes", "--zone-id", "z1", "--op", "json"])
            .await
            .unwrap();
        assert!(out.starts_with(r#"[{"id":"c1""#));
    }

    #[tokio::test]
    async fn record_set_change_resolves_the_zone_name() {
        let client = fake_client(
            FakeTransport::new()
                .route(Method::GET, "/zones/name/ok.", r#"{"zone":{"id":"z1","name":"ok."}}"#)
                .route(
                    Method::GET,
                    "/zones/z1/recordsets/rs1/changes/c1",
                    r#"{"id":"c1","zone":{"id":"z1","name":"ok."},"recordSet":{"id":"rs1","zoneId":"z1","name":"www","type":"A","ttl":200},"userId":"u1","changeType":"Update","status":"Complete","created":"now"}"#,
                ),
        );
        let out = run_command(
            &client,
            &["record-set-change", "--zone-name", "ok.", "--record-set-id", "rs1", "--change-id", "c1", "--op", "json"],
        )
        .await
        .unwrap();
        assert!(out.starts_with(r#"{"id":"c1""#));

        let paths: Vec<_> = client
            .transport()
            .requests()
            .into_iter()
            .map(|r| r.path_and_query)
            .collect();
        assert_eq!(paths, ["/zones/name/ok.", "/zones/z1/recordsets/rs1/changes/c1"]);
    }

    #[tokio::test]
    async fn record_set_update_and_delete() {
        let client = fake_client(
            FakeTransport::new()
                .route(Method::PUT, "/zones/z1/recordsets/rs1", &response(RECORD_SET))
                .route(Method::DELETE, "/zones/z1/recordsets/rs1", &response(RECORD_SET)),
        );
        let out = run_command(&client, &["record-set-update", "--json", RECORD_SET]).await.unwrap();
        assert_eq!(out, "Updated record set www\n");

        let out = run_command(&client, &["record-set-delete", "--zone-id", "z1", "--record-set-id", "rs1"])
            .await
            .unwrap();
        assert_eq!(out, "Deleted record set rs1\n");

        let err = run_command(&client, &["record-set-update", "--json", r#"{"name":"www"}"#])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("zoneId")));
    }
}
