// api/client.rs - HTTP client for /api/v1/skills
//
// Thin wrapper over reqwest. Every request carries
//   Accept: application/json
//   Authorization: token <API_TOKEN>
// and every response is returned as an ApiResponse (status + JSON body),
// whatever its status code, so tests can assert on error envelopes too.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::envelope::{ApiResponse, Envelope};
use crate::api::poll::poll_until;
use crate::api::types::{
    CreateSkill, UpdateDescription, UpdateLogo, UpdateName, UpdateSkill, UpdateTags,
};
use crate::config::{E2eConfig, PollSettings};
use crate::error::{E2eError, Result};
use crate::fixtures::Skill;

const SKILLS_PATH: &str = "/api/v1/skills";

#[derive(Debug, Clone)]
pub struct SkillsClient {
    http: HttpClient,
    base_url: String,
}

impl SkillsClient {
    pub fn new(base_url: impl Into<String>, api_token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        match api_token {
            Some(token) => {
                let value = HeaderValue::from_str(&format!("token {token}")).map_err(|e| {
                    E2eError::InvalidConfig {
                        name: "API_TOKEN",
                        reason: e.to_string(),
                    }
                })?;
                headers.insert(AUTHORIZATION, value);
            }
            None => warn!("API_TOKEN is not set; requests go out without Authorization"),
        }

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &E2eConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.api_token.as_deref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/v1/skills/:key`
    pub async fn get_skill(&self, key: &str) -> Result<ApiResponse> {
        let url = self.skill_url(key);
        self.send(self.http.get(&url), url).await
    }

    /// `GET /api/v1/skills`
    pub async fn list_skills(&self) -> Result<ApiResponse> {
        let url = self.collection_url();
        self.send(self.http.get(&url), url).await
    }

    /// `POST /api/v1/skills`
    pub async fn create_skill(&self, skill: &CreateSkill) -> Result<ApiResponse> {
        let url = self.collection_url();
        self.send(self.http.post(&url).json(skill), url).await
    }

    /// `PUT /api/v1/skills/:key`
    pub async fn update_skill(&self, key: &str, update: &UpdateSkill) -> Result<ApiResponse> {
        let url = self.skill_url(key);
        self.send(self.http.put(&url).json(update), url).await
    }

    /// `PATCH /api/v1/skills/:key/actions/name`
    pub async fn update_name(&self, key: &str, name: &str) -> Result<ApiResponse> {
        self.patch_action(key, "name", &UpdateName { name }).await
    }

    /// `PATCH /api/v1/skills/:key/actions/description`
    pub async fn update_description(&self, key: &str, description: &str) -> Result<ApiResponse> {
        self.patch_action(key, "description", &UpdateDescription { description })
            .await
    }

    /// `PATCH /api/v1/skills/:key/actions/logo`
    pub async fn update_logo(&self, key: &str, logo: &str) -> Result<ApiResponse> {
        self.patch_action(key, "logo", &UpdateLogo { logo }).await
    }

    /// `PATCH /api/v1/skills/:key/actions/tags`
    pub async fn update_tags(&self, key: &str, tags: &[String]) -> Result<ApiResponse> {
        self.patch_action(key, "tags", &UpdateTags { tags }).await
    }

    /// `DELETE /api/v1/skills/:key`
    pub async fn delete_skill(&self, key: &str) -> Result<ApiResponse> {
        let url = self.skill_url(key);
        self.send(self.http.delete(&url), url).await
    }

    /// Poll `GET /skills/:key` until it returns a skill accepted by `ready`
    pub async fn wait_for_skill<P>(&self, key: &str, settings: PollSettings, ready: P) -> Result<Skill>
    where
        P: Fn(&Skill) -> bool,
    {
        let ready = &ready;
        poll_until(settings, move || async move {
            let res = self.get_skill(key).await?;
            if !res.is_success() {
                return Ok(None);
            }
            let envelope: Envelope<Skill> = res.envelope()?;
            Ok::<_, E2eError>(envelope.data.filter(|skill| ready(skill)))
        })
        .await
    }

    /// Poll `GET /skills/:key` until the API answers 404
    pub async fn wait_for_absence(&self, key: &str, settings: PollSettings) -> Result<()> {
        poll_until(settings, move || async move {
            let res = self.get_skill(key).await?;
            Ok::<_, E2eError>((res.status == StatusCode::NOT_FOUND).then_some(()))
        })
        .await
    }

    async fn patch_action<B: Serialize + ?Sized>(
        &self,
        key: &str,
        action: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = format!("{}/actions/{}", self.skill_url(key), action);
        self.send(self.http.patch(&url).json(body), url).await
    }

    async fn send(&self, request: RequestBuilder, url: String) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| E2eError::InvalidBody {
                url: url.clone(),
                source,
            })?
        };

        debug!(%status, url = %url, "Skills API response");
        Ok(ApiResponse { url, status, body })
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, SKILLS_PATH)
    }

    /// The key is percent-encoded so it stays a single path segment
    fn skill_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.base_url, SKILLS_PATH, urlencoding::encode(key))
    }
}
