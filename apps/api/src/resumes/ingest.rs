use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::resume::NewResume;
use crate::parser_client::ResumeParser;
use crate::storage::ObjectStorage;
use crate::store::ResumeStore;

/// Namespace every uploaded resume lives under.
pub const UPLOAD_KEY_PREFIX: &str = "resumes/";

/// Returned after a successful ingestion. Carries only the stored id and the
/// parser's session id, never the parser payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReceipt {
    pub id: i64,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadUrl {
    pub url: String,
    pub key: String,
}

pub fn upload_key(filename: &str) -> String {
    format!("{UPLOAD_KEY_PREFIX}{filename}")
}

/// Parses a previously uploaded file and stores the result as a new resume.
///
/// Parser output is persisted verbatim: `text_content` → `raw_text`,
/// `session_id` → `user_id`, `metadata` → `metadata`. A failed insert discards
/// the parse result. Repeated calls with the same reference create new rows.
pub async fn ingest_resume(
    parser: &dyn ResumeParser,
    store: &dyn ResumeStore,
    auth_token: Option<&str>,
    file_name: &str,
) -> Result<IngestReceipt, AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::Validation("fileName is required".to_string()));
    }
    let auth_token = auth_token.filter(|t| !t.is_empty()).ok_or_else(|| {
        AppError::Configuration("Parse API token not configured (set API_KEY)".to_string())
    })?;

    info!("Parsing resume {file_name}");
    let parsed = parser.parse(file_name, auth_token).await.map_err(|e| {
        error!("Parser call for {file_name} failed: {e}");
        AppError::from(e)
    })?;

    let session_id = parsed.session_id.clone();
    let resume = store
        .create(NewResume {
            user_id: parsed.session_id,
            raw_text: parsed.text_content,
            metadata: parsed.metadata,
        })
        .await?;

    info!("Stored resume {} for session {}", resume.id, session_id);
    Ok(IngestReceipt {
        id: resume.id,
        session_id,
    })
}

/// Mints a presigned PUT URL for `resumes/<filename>`. Nothing is stored.
pub async fn presign_upload(storage: &ObjectStorage, filename: &str) -> Result<UploadUrl, AppError> {
    let signer = match storage {
        ObjectStorage::Available(signer) => signer,
        ObjectStorage::Unavailable { reason } => {
            return Err(AppError::ServiceUnavailable(format!(
                "S3 service is not available: {reason}"
            )))
        }
    };

    if filename.trim().is_empty() {
        return Err(AppError::Validation("filename is required".to_string()));
    }

    let key = upload_key(filename);
    let url = signer
        .sign_put(&key)
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    Ok(UploadUrl { url, key })
}
