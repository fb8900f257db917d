//! Upstash Redis REST backend for the product store.
//!
//! Values are stored as JSON text, the same encoding the Upstash JS client
//! uses, so records written by either side read back on the other.

use crate::error::StoreError;
use crate::store::ProductStore;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

pub struct UpstashStore {
    client: reqwest::Client,
    base: Url,
    token: String,
    key: String,
}

impl UpstashStore {
    pub fn new(rest_url: &str, token: &str, key: impl Into<String>) -> Result<Self, StoreError> {
        let mut base = Url::parse(rest_url)
            .map_err(|e| StoreError::Backend(format!("invalid Upstash REST URL: {}", e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            token: token.to_string(),
            key: key.into(),
        })
    }

    fn command_url(&self, command: &str) -> Result<Url, StoreError> {
        let path = format!("{}/{}", command, urlencoding::encode(&self.key));
        self.base
            .join(&path)
            .map_err(|e| StoreError::Backend(format!("bad command URL: {}", e)))
    }

    async fn reply(response: reqwest::Response) -> Result<Option<Value>, StoreError> {
        let status = response.status();
        let reply: RestReply = response.json().await?;
        if let Some(error) = reply.error {
            return Err(StoreError::Backend(error));
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!("HTTP {}", status)));
        }
        Ok(reply.result)
    }
}

/// Decode a GET result. Strings hold JSON text; anything else is taken as-is.
fn decode_result(result: Option<Value>) -> Result<Option<Value>, StoreError> {
    match result {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(serde_json::from_str(&text)?)),
        Some(other) => Ok(Some(other)),
    }
}

#[async_trait]
impl ProductStore for UpstashStore {
    async fn get(&self) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.command_url("get")?)
            .bearer_auth(&self.token)
            .send()
            .await?;
        decode_result(Self::reply(response).await?)
    }

    async fn set(&self, value: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_string(value)?;
        let response = self
            .client
            .post(self.command_url("set")?)
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await?;
        Self::reply(response).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "upstash"
    }
}
