use std::fmt;
use std::str::FromStr;

use crate::client::HubError;

/// Identifies a dataset on the hub, optionally pinned to a version.
///
/// The textual forms are `owner/dataset` and `owner/dataset/versions/N`,
/// matching the handle shown on a dataset's hub page. An unpinned handle
/// resolves to the latest published version at download time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetHandle {
    /// Account name of the dataset's publisher
    pub owner: String,
    /// URL-friendly dataset slug
    pub dataset: String,
    /// Pinned version number, if any
    pub version: Option<u64>,
}

impl DatasetHandle {
    /// Create an unpinned handle
    pub fn new<S: Into<String>>(owner: S, dataset: S) -> Self {
        Self {
            owner: owner.into(),
            dataset: dataset.into(),
            version: None,
        }
    }

    /// Pin the handle to a specific version
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }
}

impl FromStr for DatasetHandle {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, dataset] if !owner.is_empty() && !dataset.is_empty() => {
                Ok(DatasetHandle::new(*owner, *dataset))
            }
            [owner, dataset, "versions", version]
                if !owner.is_empty() && !dataset.is_empty() =>
            {
                let version = version.parse::<u64>().map_err(|_| {
                    HubError::invalid_handle(format!(
                        "version must be a number in '{}'",
                        s
                    ))
                })?;
                Ok(DatasetHandle::new(*owner, *dataset).with_version(version))
            }
            _ => Err(HubError::invalid_handle(format!(
                "expected 'owner/dataset' or 'owner/dataset/versions/N', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => {
                write!(f, "{}/{}/versions/{}", self.owner, self.dataset, version)
            }
            None => write!(f, "{}/{}", self.owner, self.dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unpinned_handle() {
        let handle: DatasetHandle = "projjal1/human-conversation-training-data"
            .parse()
            .unwrap();
        assert_eq!(handle.owner, "projjal1");
        assert_eq!(handle.dataset, "human-conversation-training-data");
        assert_eq!(handle.version, None);
    }

    #[test]
    fn parses_pinned_handle() {
        let handle: DatasetHandle = "owner/name/versions/7".parse().unwrap();
        assert_eq!(handle.version, Some(7));
    }

    #[test]
    fn display_round_trips() {
        for raw in ["owner/name", "owner/name/versions/3"] {
            let handle: DatasetHandle = raw.parse().unwrap();
            assert_eq!(handle.to_string(), raw);
        }
    }

    #[test]
    fn rejects_malformed_handles() {
        for raw in [
            "",
            "owner",
            "owner/",
            "/name",
            "owner/name/extra",
            "owner/name/versions/",
            "owner/name/versions/latest",
            "owner/name/versions/1/more",
        ] {
            assert!(raw.parse::<DatasetHandle>().is_err(), "accepted '{}'", raw);
        }
    }
}
