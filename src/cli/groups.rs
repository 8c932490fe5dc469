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
use crate::api::groups::{Group, User};
use crate::client::Client;
use crate::error::Result;
use crate::output::{Printer, key_value_table};
use crate::utils::request::HttpTransport;

#[derive(Debug, Clone, Args)]
pub struct GroupCommand {
    /// The group ID
    #[arg(long, required_unless_present = "name")]
    pub group_id: Option<String>,
    /// The group name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct GroupIdCommand {
    /// The group ID
    #[arg(long)]
    pub group_id: String,
}

impl GroupCommand {
    pub async fn handle<T: HttpTransport>(&self, client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
        let group = client
            .get_group(
                self.name.as_deref().unwrap_or_default(),
                self.group_id.as_deref().unwrap_or_default(),
            )
            .await?;
        if printer.is_json() {
            return printer.json(&group);
        }
        printer.key_value_table(&[
            ("Name", group.name.clone()),
            ("ID", group.id.clone()),
            ("Email", group.email.clone()),
            ("Description", group.description.clone()),
            ("Status", group.status.clone()),
            ("Members", user_ids(&group.members)),
            ("Admins", user_ids(&group.admins)),
        ])
    }
}

pub(super) async fn list<T: HttpTransport>(client: &Client<T>, printer: &mut Printer<'_>) -> Result<()> {
    let groups = client.groups_all(ListFilter::default()).await?;
    if printer.is_json() {
        return printer.json(&groups);
    }
    if groups.is_empty() {
        return printer.line("No groups found");
    }
    printer.header_table(
        &["Name", "ID"],
        groups.into_iter().map(|group| vec![group.name, group.id]).collect(),
    )
}

pub(super) async fn create<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &JsonCommand,
) -> Result<()> {
    let group: Group = cmd.parse()?;
    let created = client.group_create(&group).await?;
    info!(id = %created.id, name = %created.name, "created group");
    if printer.is_json() {
        return printer.json(&created);
    }
    printer.line(&format!("Created group {}", group.name))
}

pub(super) async fn update<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &JsonCommand,
) -> Result<()> {
    let group: Group = cmd.parse()?;
    let updated = client.group_update(&group).await?;
    info!(id = %updated.id, "updated group");
    if printer.is_json() {
        return printer.json(&updated);
    }
    printer.line(&format!("Updated group {}", updated.name))
}

pub(super) async fn delete<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &GroupIdCommand,
) -> Result<()> {
    let deleted = client.group_delete(&cmd.group_id).await?;
    info!(id = %cmd.group_id, "deleted group");
    if printer.is_json() {
        return printer.json(&deleted);
    }
    printer.line(&format!("Deleted group {}", cmd.group_id))
}

pub(super) async fn admins<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &GroupIdCommand,
) -> Result<()> {
    let admins = client.group_admins(&cmd.group_id).await?;
    print_users(printer, &admins)
}

pub(super) async fn members<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &GroupIdCommand,
) -> Result<()> {
    let members = client.group_members_all(&cmd.group_id).await?;
    print_users(printer, &members)
}

pub(super) async fn activity<T: HttpTransport>(
    client: &Client<T>,
    printer: &mut Printer<'_>,
    cmd: &GroupIdCommand,
) -> Result<()> {
    let activity = client.group_activity(&cmd.group_id, ListFilter::default()).await?;
    if printer.is_json() {
        return printer.json(&activity);
    }
    for change in &activity.changes {
        printer.line("Changes...")?;
        printer.key_value_table(&[
            ("Created", change.created.clone()),
            ("UserID", change.user_id.clone()),
            ("ChangeType", change.change_type.clone()),
        ])?;
        printer.line("\n\nNew Group...")?;
        printer.line(&group_summary(&change.new_group))?;
        printer.line("\n\nOld Group...")?;
        // A created group has no previous state.
        let old_group = change.old_group.clone().unwrap_or_default();
        printer.line(&group_summary(&old_group))?;
        printer.line("\n=====")?;
    }
    Ok(())
}

fn print_users(printer: &mut Printer<'_>, users: &[User]) -> Result<()> {
    if printer.is_json() {
        return printer.json(users);
    }
    for user in users {
        printer.key_value_table(&[
            ("UserName", user.user_name.clone()),
            ("Name", format!("{} {}", user.first_name, user.last_name)),
            ("ID", user.id.clone()),
            ("Email", user.email.clone()),
            ("Created", user.created.clone()),
        ])?;
    }
    Ok(())
}

fn group_summary(group: &Group) -> String {
    key_value_table(&[
        ("Name", group.name.clone()),
        ("Status", group.status.clone()),
        ("Created", group.created.clone()),
        ("ID", group.id.clone()),
    ])
}

fn user_ids(users: &[User]) -> String {
    users
        .iter()
        .map(|user| user.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use crate::cli::testing::run_command;
    use crate::client::testing::{FakeTransport, fake_client};

    const GROUP: &str = r#"{
        "id": "g1",
        "name": "ok-group",
        "email": "test@test.com",
        "description": "a group",
        "status": "Active",
        "created": "2015-10-30T01:25:46Z",
        "members": [{"id": "u1"}, {"id": "u2"}],
        "admins": [{"id": "u1"}]
    }"#;

    #[tokio::test]
    async fn groups_prints_name_and_id() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/groups",
            &format!(r#"{{"groups":[{GROUP}],"maxItems":100}}"#),
        ));
        let out = run_command(&client, &["groups"]).await.unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains("ok-group"));
        assert!(out.contains("g1"));
    }

    #[tokio::test]
    async fn groups_reports_an_empty_list() {
        let client = fake_client(FakeTransport::new().route(Method::GET, "/groups", r#"{"groups":[]}"#));
        assert_eq!(run_command(&client, &["groups"]).await.unwrap(), "No groups found\n");
        assert_eq!(run_command(&client, &["groups", "--output", "json"]).await.unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn group_by_id_lists_member_ids() {
        let client = fake_client(FakeTransport::new().route(Method::GET, "/groups/g1", GROUP));
        let out = run_command(&client, &["group", "--group-id", "g1"]).await.unwrap();
        assert!(out.contains("u1, u2"));
        assert!(out.contains("a group"));
    }

    #[tokio::test]
    async fn group_prefers_the_name() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/groups",
            &format!(r#"{{"groups":[{GROUP}]}}"#),
        ));
        let out = run_command(&client, &["group", "--group-id", "ignored", "--name", "ok-group", "--op", "json"])
            .await
            .unwrap();
        assert!(out.starts_with(r#"{"id":"g1","name":"ok-group""#));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn group_create_posts_the_json_body() {
        let client = fake_client(FakeTransport::new().route(Method::POST, "/groups", GROUP));
        let out = run_command(
            &client,
            &["group-create", "--json", r#"{"name":"ok-group","email":"test@test.com","members":[{"id":"u1"}],"admins":[{"id":"u1"}]}"#],
        )
        .await
        .unwrap();
        assert_eq!(out, "Created group ok-group\n");

        let body: serde_json::Value =
            serde_json::from_str(client.transport().requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["members"][0]["id"], "u1");
    }

    #[tokio::test]
    async fn group_update_and_delete() {
        let client = fake_client(
            FakeTransport::new()
                .route(Method::PUT, "/groups/g1", GROUP)
                .route(Method::DELETE, "/groups/g1", GROUP),
        );
        let out = run_command(&client, &["group-update", "--json", r#"{"id":"g1","name":"ok-group","email":"a@b.c"}"#])
            .await
            .unwrap();
        assert_eq!(out, "Updated group ok-group\n");

        let out = run_command(&client, &["group-delete", "--group-id", "g1"]).await.unwrap();
        assert_eq!(out, "Deleted group g1\n");
    }

    #[tokio::test]
    async fn group_members_render_one_table_per_user() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/groups/g1/members",
            r#"{"members":[
                {"id":"u1","userName":"jdoe","firstName":"John","lastName":"Doe","email":"j@d.com"},
                {"id":"u2","userName":"asmith","firstName":"Ann","lastName":"Smith"}
            ]}"#,
        ));
        let out = run_command(&client, &["group-members", "--group-id", "g1"]).await.unwrap();
        assert!(out.contains("John Doe"));
        assert!(out.contains("Ann Smith"));
        assert_eq!(out.matches("UserName").count(), 2);
    }

    #[tokio::test]
    async fn group_activity_without_old_group() {
        let client = fake_client(FakeTransport::new().route(
            Method::GET,
            "/groups/g1/activity",
            &format!(
                r#"{{"changes":[{{"id":"c1","newGroup":{GROUP},"created":"now","userId":"u1","changeType":"Create"}}]}}"#
            ),
        ));
        let out = run_command(&client, &["group-activity", "--group-id", "g1"]).await.unwrap();
        let sections: Vec<_> = ["Changes...", "New Group...", "Old Group...", "====="]
            .iter()
            .map(|marker| out.find(marker).unwrap())
            .collect();
        assert!(sections.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(out.contains("Create"));
    }
}
