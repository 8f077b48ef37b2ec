//! Image URLs for the visual templates.

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;

use crate::{Error, Result};

/// Images the skill can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    Lobby,
    Goodbye,
    Nurse,
    Repair,
}

impl ImageKey {
    /// Object key of the image in the media bucket.
    pub fn object_key(&self) -> &'static str {
        match self {
            ImageKey::Lobby => "media/lobby.png",
            ImageKey::Goodbye => "media/goodbye.png",
            ImageKey::Nurse => "media/nurse.png",
            ImageKey::Repair => "media/repair.png",
        }
    }
}

/// Produces a URL a device can fetch an image from.
#[async_trait]
pub trait MediaSigner: Send + Sync {
    async fn image_url(&self, image: ImageKey) -> Result<String>;
}

/// Presigned GET URLs on a private S3 bucket.
pub struct S3MediaSigner {
    client: S3Client,
    bucket: String,
    expires_in: Duration,
}

impl S3MediaSigner {
    pub fn new(client: S3Client, bucket: String, expiry_secs: u64) -> Self {
        Self {
            client,
            bucket,
            expires_in: Duration::from_secs(expiry_secs),
        }
    }
}

#[async_trait]
impl MediaSigner for S3MediaSigner {
    async fn image_url(&self, image: ImageKey) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.expires_in)
            .map_err(|e| Error::Config(format!("Invalid presign expiry: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(image.object_key())
            .presigned(presigning)
            .await
            .map_err(|e| Error::Aws(format!("Failed to presign {}: {}", image.object_key(), e)))?;

        Ok(request.uri().to_string())
    }
}

/// Unsigned URLs under a public base, e.g. a CDN distribution.
pub struct PublicMediaUrls {
    base_url: String,
}

impl PublicMediaUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaSigner for PublicMediaUrls {
    async fn image_url(&self, image: ImageKey) -> Result<String> {
        if self.base_url.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}/{}", self.base_url, image.object_key()))
    }
}
