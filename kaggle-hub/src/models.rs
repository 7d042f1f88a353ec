use serde::{Deserialize, Serialize};

/// Dataset metadata returned by the hub's `/datasets/view` endpoint
///
/// Only the fields the client consumes are modeled; everything else in the
/// response is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    /// Human-readable dataset title
    #[serde(default)]
    pub title: Option<String>,
    /// Latest published version of the dataset
    #[serde(default)]
    pub current_version_number: Option<u64>,
    /// Total size of the dataset's files in bytes
    #[serde(default)]
    pub total_bytes: Option<u64>,
    /// Name of the license the dataset is published under
    #[serde(default)]
    pub license_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let info: DatasetInfo = serde_json::from_str(
            r#"{
                "title": "Human Conversation Training Data",
                "currentVersionNumber": 2,
                "totalBytes": 93370,
                "licenseName": "CC0: Public Domain",
                "downloadCount": 12345
            }"#,
        )
        .unwrap();

        assert_eq!(info.title.as_deref(), Some("Human Conversation Training Data"));
        assert_eq!(info.current_version_number, Some(2));
        assert_eq!(info.total_bytes, Some(93370));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let info: DatasetInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.current_version_number, None);
        assert_eq!(info.title, None);
    }
}
