//! The closed set of checks the asset pipeline can record.
//!
//! Serialized names are `snake_case` and are part of the exported report
//! format, so they must never change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which validation produced a [`crate::CheckResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    FilePathValid,
    FileExists,
    FileXmlCanOpen,
    FileJsonCanOpen,
    FileObjCanOpen,
    FileMeshIsWatertight,
    FileMeshVolumeTooSmall,
}

impl CheckKind {
    /// Every kind, in the order the pipeline can emit them.
    pub const ALL: [Self; 7] = [
        Self::FilePathValid,
        Self::FileExists,
        Self::FileXmlCanOpen,
        Self::FileJsonCanOpen,
        Self::FileObjCanOpen,
        Self::FileMeshIsWatertight,
        Self::FileMeshVolumeTooSmall,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FilePathValid => "file_path_valid",
            Self::FileExists => "file_exists",
            Self::FileXmlCanOpen => "file_xml_can_open",
            Self::FileJsonCanOpen => "file_json_can_open",
            Self::FileObjCanOpen => "file_obj_can_open",
            Self::FileMeshIsWatertight => "file_mesh_is_watertight",
            Self::FileMeshVolumeTooSmall => "file_mesh_volume_too_small",
        }
    }

    /// Whether this kind is only reachable for mesh assets.
    #[must_use]
    pub const fn is_mesh_check(self) -> bool {
        matches!(
            self,
            Self::FileObjCanOpen | Self::FileMeshIsWatertight | Self::FileMeshVolumeTooSmall
        )
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_as_str() {
        for kind in CheckKind::ALL {
            let json = serde_json::to_string(&kind).expect("kind serializes");
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: CheckKind = serde_json::from_str(&json).expect("kind deserializes");
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let parsed = serde_json::from_str::<CheckKind>("\"file_is_pretty\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn mesh_checks_are_the_last_three() {
        let mesh: Vec<_> = CheckKind::ALL
            .into_iter()
            .filter(|kind| kind.is_mesh_check())
            .collect();
        assert_eq!(mesh, CheckKind::ALL[4..].to_vec());
    }
}
