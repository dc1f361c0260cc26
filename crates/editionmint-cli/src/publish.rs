//! Pinning of artwork and metadata to IPFS.
//!
//! Talks to a Pinata-compatible pinning API: one multipart upload for the
//! asset file, one JSON upload for the metadata document derived from it.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Upload failures. Always fatal to the pipeline: token metadata has to live
/// on decentralized storage, there is no local fallback.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Cannot read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Pinning service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Unexpected pinning response: {0}")]
    Malformed(String),
}

/// Content-addressed storage for mint artifacts. `PinataClient` is the real
/// implementation; tests substitute recording mocks.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Pin a file, returning its content identifier.
    async fn pin_file(&self, path: &Path) -> Result<String, UploadError>;

    /// Pin a JSON document, returning its content identifier.
    async fn pin_json(&self, document: &serde_json::Value) -> Result<String, UploadError>;
}

/// Build the token metadata document referencing an already-pinned image.
pub fn metadata_document(
    name: &str,
    description: &str,
    image_cid: &str,
    created_at: &str,
) -> serde_json::Value {
    json!({
        "name": name,
        "description": description,
        "image": format!("ipfs://{image_cid}"),
        "attributes": [
            {
                "trait_type": "Creation Date",
                "value": created_at,
            }
        ]
    })
}

/// Successful pin response.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for a Pinata-compatible pinning API.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    secret_api_key: String,
}

impl PinataClient {
    /// Create a new client against an API base URL with a key pair.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        secret_api_key: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_response(response: reqwest::Response) -> Result<String, UploadError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UploadError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PinResponse =
            serde_json::from_str(&body).map_err(|e| UploadError::Malformed(e.to_string()))?;
        Ok(parsed.ipfs_hash)
    }
}

#[async_trait]
impl ArtifactStore for PinataClient {
    async fn pin_file(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "asset".to_string());

        log::debug!("pinning file {} ({} bytes)", path.display(), bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("pinning/pinFileToIPFS"))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_api_key)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn pin_json(&self, document: &serde_json::Value) -> Result<String, UploadError> {
        let response = self
            .http
            .post(self.endpoint("pinning/pinJSONToIPFS"))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_api_key)
            .json(document)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_document_references_image() {
        let doc = metadata_document("Cat #1", "", "Qmimg", "2026-08-07T00:00:00Z");
        assert_eq!(doc["name"], "Cat #1");
        assert_eq!(doc["description"], "");
        assert_eq!(doc["image"], "ipfs://Qmimg");
        assert_eq!(doc["attributes"][0]["trait_type"], "Creation Date");
        assert_eq!(doc["attributes"][0]["value"], "2026-08-07T00:00:00Z");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = PinataClient::new("https://api.pinata.cloud/", "k", "s");
        assert_eq!(
            client.endpoint("pinning/pinFileToIPFS"),
            "https://api.pinata.cloud/pinning/pinFileToIPFS"
        );
    }
}
