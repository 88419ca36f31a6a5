//! Platform REST client.

use async_trait::async_trait;
use content_builder::Content;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::{self_ref, Platform, PlatformDirectory, PlatformUser};

const CORE_API_PATH: &str = "/api/core/v3";

/// [`Platform`] and [`PlatformDirectory`] over the platform's core REST API. Requests carry
/// a bearer token when one is configured.
#[derive(Debug, Clone)]
pub struct RestPlatform {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestPlatform {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, token)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[derive(Debug, Serialize)]
struct TilePush<'a> {
    data: &'a Value,
}

#[derive(Debug, Deserialize)]
struct HtmlResource {
    #[serde(rename = "ref")]
    href: String,
}

#[derive(Debug, Deserialize)]
struct PersonResources {
    html: HtmlResource,
}

#[derive(Debug, Deserialize)]
struct ContentList {
    #[serde(default)]
    list: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonResponse {
    display_name: String,
    resources: PersonResources,
}

async fn ensure_success(response: Response) -> anyhow::Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("Platform API error ({}): {}", status, error_text));
    }
    Ok(response)
}

#[async_trait]
impl Platform for RestPlatform {
    #[instrument(skip(self, data))]
    async fn push_tile(&self, tile_url: &str, data: &Value) -> anyhow::Result<()> {
        info!("step: platform push tile");
        let response = self
            .authorized(self.client.put(tile_url))
            .json(&TilePush { data })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self, content), fields(content_type = ?content.content_type))]
    async fn create_content(&self, content: &Content) -> anyhow::Result<Value> {
        info!(parent = ?content.parent, "step: platform create content");
        let url = format!("{}{}/contents", self.base_url, CORE_API_PATH);
        let response = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, "application/json")
            .body(content.to_json()?)
            .send()
            .await?;
        let created: Value = ensure_success(response).await?.json().await?;
        Ok(created)
    }

    #[instrument(skip(self, props))]
    async fn set_ext_props(
        &self,
        object_url: &str,
        props: &Map<String, Value>,
    ) -> anyhow::Result<()> {
        info!(props = props.len(), "step: platform set extprops");
        let url = format!("{}/extprops", object_url.trim_end_matches('/'));
        let response = self
            .authorized(self.client.post(url))
            .json(props)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PlatformDirectory for RestPlatform {
    async fn ext_props(&self, object_url: &str) -> anyhow::Result<Map<String, Value>> {
        let url = format!("{}/extprops", object_url.trim_end_matches('/'));
        let response = self.authorized(self.client.get(url)).send().await?;
        let props: Map<String, Value> = ensure_success(response).await?.json().await?;
        Ok(props)
    }

    async fn person(&self, person_id: &str) -> anyhow::Result<PlatformUser> {
        let url = format!("{}{}/people/{}", self.base_url, CORE_API_PATH, person_id);
        let response = self.authorized(self.client.get(url)).send().await?;
        let person: PersonResponse = ensure_success(response).await?.json().await?;
        Ok(PlatformUser {
            display_name: person.display_name,
            profile_url: person.resources.html.href,
        })
    }

    async fn find_discussion(
        &self,
        place_url: &str,
        issue_number: u64,
    ) -> anyhow::Result<Option<String>> {
        let url = format!("{}{}/contents", self.base_url, CORE_API_PATH);
        let response = self
            .authorized(self.client.get(url))
            .query(&[
                ("filter", format!("tag(issue-{})", issue_number)),
                ("filter", format!("place({})", place_url)),
                ("filter", "type(discussion)".to_string()),
            ])
            .send()
            .await?;
        let found: ContentList = ensure_success(response).await?.json().await?;
        Ok(found.list.iter().find_map(self_ref).map(str::to_string))
    }
}
