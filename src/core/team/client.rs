use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::instrument;

use super::error::{Result, TeamError};
use super::member::{MemberId, MemberRecord};
use super::page_meta::PageMeta;
use crate::config::TeamConfig;

/// Body of `POST /api/send-team-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub sender_name: String,
    pub sender_email: String,
    pub message: String,
    /// Value of the form's hidden recipient field, sent as a string.
    pub member_id: String,
}

/// HTTP client for the team endpoints.
///
/// Keeps a cookie store so the session cookie issued with the page (which
/// binds the anti-forgery token) is sent back on submit. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TeamClient {
    http_client: Client,
    config: TeamConfig,
}

impl TeamClient {
    pub fn new(config: TeamConfig) -> Result<Self> {
        let http_client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    /// Fetch the ordered roster.
    #[instrument(skip(self))]
    pub async fn fetch_roster(&self) -> Result<Vec<MemberRecord>> {
        let url = self.config.endpoint(&self.config.team_path);
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TeamError::api(status.as_u16(), body));
        }

        let members: Vec<MemberRecord> = serde_json::from_str(&body)?;
        log::debug!("Fetched {} team members from {url}", members.len());
        Ok(members)
    }

    /// Fetch one member by id.
    #[instrument(skip(self))]
    pub async fn fetch_member(&self, id: MemberId) -> Result<MemberRecord> {
        let path = format!("{}/{}", self.config.team_path.trim_end_matches('/'), id);
        let response = self
            .http_client
            .get(self.config.endpoint(&path))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TeamError::NotFound(id.to_string())),
            status if status.is_success() => Ok(serde_json::from_str(&response.text().await?)?),
            status => Err(TeamError::api(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            )),
        }
    }

    /// Fetch the host page and read its metadata.
    #[instrument(skip(self))]
    pub async fn fetch_page_meta(&self) -> Result<PageMeta> {
        let response = self
            .http_client
            .get(self.config.endpoint(&self.config.page_path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TeamError::api(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        Ok(PageMeta::parse(&response.text().await?))
    }

    /// Send one message. Success is judged by status alone; the response
    /// body is never parsed.
    #[instrument(skip(self, message, csrf_token), fields(member_id = %message.member_id))]
    pub async fn send_message(&self, message: &OutgoingMessage, csrf_token: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.config.endpoint(&self.config.message_path))
            .header(self.config.csrf_header.as_str(), csrf_token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TeamError::api(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ))
        }
    }
}
