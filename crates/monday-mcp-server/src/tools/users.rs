//! Users and teams of the account

use async_trait::async_trait;
use monday_api::documents::users::{GET_ME, LIST_TEAMS, LIST_USERS};
use monday_api::types::{Team, User};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, text_result};
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const LIST_USERS_AND_TEAMS_TOOL_NAME: &str = "list_users_and_teams";

const USERS_LIMIT: u32 = 200;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Only return the user the API token belongs to. All other options are ignored.
    #[serde(default)]
    pub get_me: bool,

    /// Only return teams, without listing users
    #[serde(default)]
    pub teams_only: bool,

    /// Only return these users
    #[serde(default)]
    pub user_ids: Option<Vec<u64>>,

    /// Only return these teams. Implies includeTeams.
    #[serde(default)]
    pub team_ids: Option<Vec<u64>>,

    /// Only return users whose name matches
    #[serde(default)]
    pub name: Option<String>,

    /// Also list teams
    #[serde(default)]
    pub include_teams: bool,

    /// List the members of each team. This makes the response considerably larger.
    #[serde(default)]
    pub include_team_members: bool,
}

#[derive(Debug, Deserialize)]
struct Me {
    me: Option<User>,
}

#[derive(Debug, Deserialize)]
struct Users {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct Teams {
    #[serde(default)]
    teams: Vec<Team>,
}

fn ids(ids: Option<&[u64]>) -> Option<Vec<String>> {
    ids.map(|ids| ids.iter().map(u64::to_string).collect())
}

fn format_user(report: &mut String, user: &User) {
    report.push_str(&format!("- **{}** (id: {})", user.name, user.id));
    if let Some(email) = user.email.as_deref().filter(|email| !email.is_empty()) {
        report.push_str(&format!(", {email}"));
    }
    if let Some(title) = user.title.as_deref().filter(|title| !title.is_empty()) {
        report.push_str(&format!(", {title}"));
    }
    let flags: Vec<&str> = [
        (user.is_admin == Some(true), "admin"),
        (user.is_guest == Some(true), "guest"),
        (user.enabled == Some(false), "disabled"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    if !flags.is_empty() {
        report.push_str(&format!(" [{}]", flags.join(", ")));
    }
    report.push('\n');
}

fn format_users(report: &mut String, users: &[User]) {
    report.push_str(&format!("# Users ({})\n\n", users.len()));
    if users.is_empty() {
        report.push_str("No users found.\n");
    }
    for user in users {
        format_user(report, user);
    }
}

fn format_teams(report: &mut String, teams: &[Team]) {
    report.push_str(&format!("# Teams ({})\n\n", teams.len()));
    if teams.is_empty() {
        report.push_str("No teams found.\n");
    }
    for team in teams {
        report.push_str(&format!("- **{}** (id: {})", team.name, team.id));
        if let Some(owners) = team.owners.as_deref().filter(|owners| !owners.is_empty()) {
            let owners: Vec<&str> = owners.iter().map(|owner| owner.name.as_str()).collect();
            report.push_str(&format!(", owners: {}", owners.join(", ")));
        }
        report.push('\n');
        for member in team.users.as_deref().unwrap_or_default() {
            report.push_str(&format!("  - {} (id: {})\n", member.name, member.id));
        }
    }
}

async fn list_teams(client: &MondayClient, input: &Input) -> Result<Vec<Team>, McpError> {
    let data: Teams = client
        .request(Request::from(&LIST_TEAMS).variables(json!({
            "teamIds": ids(input.team_ids.as_deref()),
            "includeMembers": input.include_team_members,
        })))
        .await
        .context("Failed to list teams")?;
    Ok(data.teams)
}

pub struct ListUsersAndTeams;

#[async_trait]
impl MondayTool for ListUsersAndTeams {
    fn name(&self) -> &'static str {
        LIST_USERS_AND_TEAMS_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            LIST_USERS_AND_TEAMS_TOOL_NAME,
            "List users and teams of the account, or get the current user with getMe. Use the ids when assigning people or filtering people columns.",
            schema_from_type!(Input),
        )
    }

    fn access(&self) -> ToolAccess {
        ToolAccess::Read
    }

    async fn call(
        &self,
        client: &MondayClient,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let input: Input = convert_arguments(arguments)?;

        if input.get_me {
            let data: Me = client
                .request(Request::from(&GET_ME))
                .await
                .context("Failed to get current user")?;
            let Some(me) = data.me else {
                return Ok(text_result("The current user could not be found"));
            };
            let mut report = String::from("# Current user\n\n");
            format_user(&mut report, &me);
            if let Some(teams) = me.teams.as_deref().filter(|teams| !teams.is_empty()) {
                let teams: Vec<String> = teams
                    .iter()
                    .map(|team| format!("{} (id: {})", team.name, team.id))
                    .collect();
                report.push_str(&format!("\nTeams: {}\n", teams.join(", ")));
            }
            return Ok(text_result(report));
        }

        let mut report = String::new();
        if !input.teams_only {
            let data: Users = client
                .request(Request::from(&LIST_USERS).variables(json!({
                    "userIds": ids(input.user_ids.as_deref()),
                    "name": input.name,
                    "limit": USERS_LIMIT,
                })))
                .await
                .context("Failed to list users")?;
            format_users(&mut report, &data.users);
        }

        if input.teams_only || input.include_teams || input.team_ids.is_some() {
            let teams = list_teams(client, &input).await?;
            if !report.is_empty() {
                report.push('\n');
            }
            format_teams(&mut report, &teams);
        }

        Ok(text_result(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, content_text, data, operation};
    use mockito::Matcher;

    #[tokio::test]
    async fn current_user_is_described() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(operation("GetMe"))
            .with_body(data(json!({
                "me": {
                    "id": "1",
                    "name": "Dana",
                    "email": "dana@example.com",
                    "title": "PM",
                    "enabled": true,
                    "is_admin": true,
                    "is_guest": false,
                    "teams": [{ "id": "5", "name": "Platform" }]
                }
            })))
            .create_async()
            .await;

        let result = ListUsersAndTeams
            .call(&client_for(&server), json!({ "getMe": true, "teamsOnly": true }))
            .await
            .unwrap();

        insta::assert_snapshot!(content_text(result), @r"
        # Current user

        - **Dana** (id: 1), dana@example.com, PM [admin]

        Teams: Platform (id: 5)
        ");
    }

    #[tokio::test]
    async fn teams_only_skips_users_and_fetches_members() {
        let mut server = mockito::Server::new_async().await;
        let users = server
            .mock("POST", "/")
            .match_body(operation("ListUsers"))
            .expect(0)
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "ListTeams",
                "variables": { "teamIds": ["5"], "includeMembers": true }
            })))
            .with_body(data(json!({
                "teams": [{
                    "id": "5",
                    "name": "Platform",
                    "owners": [{ "id": "1", "name": "Dana" }],
                    "users": [{ "id": "1", "name": "Dana" }, { "id": "2", "name": "Sam" }]
                }]
            })))
            .create_async()
            .await;

        let result = ListUsersAndTeams
            .call(
                &client_for(&server),
                json!({ "teamsOnly": true, "teamIds": [5], "includeTeamMembers": true }),
            )
            .await
            .unwrap();

        users.assert_async().await;
        insta::assert_snapshot!(content_text(result), @r"
        # Teams (1)

        - **Platform** (id: 5), owners: Dana
          - Dana (id: 1)
          - Sam (id: 2)
        ");
    }

    #[tokio::test]
    async fn users_are_listed_without_teams_by_default() {
        let mut server = mockito::Server::new_async().await;
        let teams = server
            .mock("POST", "/")
            .match_body(operation("ListTeams"))
            .expect(0)
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "ListUsers",
                "variables": { "name": "sam" }
            })))
            .with_body(data(json!({
                "users": [{ "id": "2", "name": "Sam", "email": "sam@example.com", "enabled": false, "is_guest": true }]
            })))
            .create_async()
            .await;

        let result = ListUsersAndTeams
            .call(&client_for(&server), json!({ "name": "sam" }))
            .await
            .unwrap();

        teams.assert_async().await;
        assert_eq!(
            content_text(result),
            "# Users (1)\n\n- **Sam** (id: 2), sam@example.com [guest, disabled]\n"
        );
    }
}
