//! Object storage for resume uploads.
//!
//! Clients upload directly to S3 (or MinIO) through short-lived presigned PUT
//! URLs; the service never proxies file bytes. The signer is optional: if it
//! cannot be built at startup the service keeps running and only upload URLs
//! become unavailable.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::StorageConfig;

/// Lifetime of a presigned upload URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage is not configured: {0}")]
    NotConfigured(String),

    #[error("failed to presign upload: {0}")]
    Presign(String),
}

#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Returns a URL that accepts a single PUT of `key` until it expires.
    async fn sign_put(&self, key: &str) -> Result<String, StorageError>;
}

/// Whether uploads can be signed. Decided once at startup.
#[derive(Clone)]
pub enum ObjectStorage {
    Available(Arc<dyn UploadSigner>),
    Unavailable { reason: String },
}

impl ObjectStorage {
    /// Builds the S3 signer, downgrading any failure to `Unavailable`.
    pub async fn connect(config: &StorageConfig) -> Self {
        match S3UploadSigner::from_config(config).await {
            Ok(signer) => {
                info!("Object storage ready (bucket: {})", signer.bucket);
                ObjectStorage::Available(Arc::new(signer))
            }
            Err(e) => {
                warn!("Object storage disabled, upload URLs will be unavailable: {e}");
                ObjectStorage::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

pub struct S3UploadSigner {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3UploadSigner {
    /// Static credentials win when both halves are present; otherwise the
    /// ambient AWS provider chain is used. A custom endpoint implies MinIO and
    /// path-style addressing.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let bucket = config
            .bucket
            .clone()
            .ok_or_else(|| StorageError::NotConfigured("AWS_S3_BUCKET is not set".to_string()))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "bonga-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket,
        })
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn sign_put(&self, key: &str) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}
