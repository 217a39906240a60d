use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::{ApiError, ApiResult};

const UPLOAD_FOLDER: &str = "movie_posters";

/// Client for the media host's image upload API. Takes poster bytes plus the
/// declared MIME type and returns a durable public URL.
pub struct MediaClient {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl MediaClient {
    pub fn new(
        client: reqwest::Client,
        cloud_name: String,
        api_key: String,
        api_secret: String,
        base_url: String,
    ) -> Self {
        // Warn once on app load if uploads will be mocked
        if cloud_name.trim().is_empty() || api_key.trim().is_empty() {
            tracing::warn!("Using mock poster uploads - no Cloudinary credentials provided");
        }
        Self { client, cloud_name, api_key, api_secret, base_url }
    }

    pub async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> ApiResult<String> {
        // Skip the network entirely when credentials are not provided
        if self.cloud_name.trim().is_empty() || self.api_key.trim().is_empty() {
            return Ok(format!(
                "https://res.cloudinary.com/demo/image/upload/{}/{}.{}",
                UPLOAD_FOLDER,
                jiff::Timestamp::now().as_millisecond(),
                extension_for(content_type)
            ));
        }

        let timestamp = jiff::Timestamp::now().as_second();
        let signature = self.sign(timestamp);

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("poster")
            .mime_str(content_type)
            .map_err(|err| ApiError::Validation(format!("invalid content type: {err}")))?;

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", UPLOAD_FOLDER)
            .text("signature_algorithm", "sha256")
            .text("signature", signature)
            .part("file", part);

        let url = format!(
            "{}/v1_1/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        );

        let resp: UploadResponse = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.secure_url)
    }

    // Signed params sorted by name, secret appended, hex-encoded digest.
    fn sign(&self, timestamp: i64) -> String {
        let to_sign = format!("folder={UPLOAD_FOLDER}&timestamp={timestamp}{}", self.api_secret);
        hex::encode(Sha256::digest(to_sign.as_bytes()))
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}
