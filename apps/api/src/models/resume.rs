use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::metadata::Metadata;

/// A stored resume. `user_id` carries the parser's session identifier and is
/// not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub user_id: String,
    pub raw_text: String,
    pub metadata: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResume {
    pub user_id: String,
    pub raw_text: String,
    pub metadata: Option<Metadata>,
}

/// Body of `PUT /resumes/:id`. Omitted fields keep their stored values;
/// `"metadata": null` clears the stored metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeUpdate {
    pub user_id: Option<String>,
    pub raw_text: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub metadata: Option<Option<Metadata>>,
}

/// Marks a field that appeared in the body, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ResumeUpdate {
    pub fn apply_to(self, mut resume: Resume) -> Resume {
        if let Some(user_id) = self.user_id {
            resume.user_id = user_id;
        }
        if let Some(raw_text) = self.raw_text {
            resume.raw_text = raw_text;
        }
        if let Some(metadata) = self.metadata {
            resume.metadata = metadata;
        }
        resume
    }
}

/// Body of `POST /resumes`: a reference to an object already uploaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_update_touches_only_given_fields() {
        let resume = Resume {
            id: 9,
            user_id: "sess-1".to_string(),
            raw_text: "John Doe, Engineer".to_string(),
            metadata: Some(Metadata::try_from(json!({ "skills": ["Go"] })).unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let update = ResumeUpdate {
            raw_text: Some("John Doe, Staff Engineer".to_string()),
            ..ResumeUpdate::default()
        };

        let updated = update.apply_to(resume.clone());

        assert_eq!(updated.raw_text, "John Doe, Staff Engineer");
        assert_eq!(updated.user_id, resume.user_id);
        assert_eq!(updated.metadata, resume.metadata);
    }

    #[test]
    fn test_null_metadata_clears_but_missing_keeps() {
        let resume = Resume {
            id: 4,
            user_id: "sess-1".to_string(),
            raw_text: "text".to_string(),
            metadata: Some(Metadata::try_from(json!({ "k": 1 })).unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let keep: ResumeUpdate = serde_json::from_value(json!({ "raw_text": "new" })).unwrap();
        assert_eq!(keep.metadata, None);
        assert_eq!(keep.apply_to(resume.clone()).metadata, resume.metadata);

        let clear: ResumeUpdate = serde_json::from_value(json!({ "metadata": null })).unwrap();
        assert_eq!(clear.metadata, Some(None));
        assert_eq!(clear.apply_to(resume).metadata, None);
    }

    #[test]
    fn test_parse_request_uses_camel_case_file_name() {
        let req: ParseResumeRequest =
            serde_json::from_value(json!({ "fileName": "resume123.pdf" })).unwrap();
        assert_eq!(req.file_name.as_deref(), Some("resume123.pdf"));
    }
}
