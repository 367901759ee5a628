//! Per-device classification: Windows release and encryption state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First build that ships as Windows 11 while still reporting major.minor 10.0.
pub const DEFAULT_WINDOWS11_MIN_VERSION: &str = "10.0.22000";

/// A dotted numeric version with two to four components (e.g. `10.0.22631.4037`).
///
/// Missing trailing components compare as zero, so `10.0.22000` equals
/// `10.0.22000.0`.
#[derive(Debug, Clone, Copy)]
pub struct OsVersion {
    parts: [u32; 4],
    len: usize,
}

impl OsVersion {
    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            parts: [major, minor, build, 0],
            len: 3,
        }
    }
}

/// A string that is not a dotted numeric version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid OS version '{0}'")]
pub struct ParseVersionError(String);

impl FromStr for OsVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_string());

        let segments: Vec<&str> = s.trim().split('.').collect();
        if !(2..=4).contains(&segments.len()) {
            return Err(invalid());
        }

        let mut parts = [0u32; 4];
        for (slot, segment) in parts.iter_mut().zip(&segments) {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = segment.parse().map_err(|_| invalid())?;
        }

        Ok(Self {
            parts,
            len: segments.len(),
        })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self.parts[..self.len].iter().map(u32::to_string).collect();
        f.write_str(&shown.join("."))
    }
}

impl PartialEq for OsVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for OsVersion {}

impl PartialOrd for OsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl Default for OsVersion {
    fn default() -> Self {
        Self::new(10, 0, 22000)
    }
}

/// Windows release a device is classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowsVersion {
    #[serde(rename = "Windows 10")]
    Windows10,
    #[serde(rename = "Windows 11")]
    Windows11,
    Unknown,
}

impl WindowsVersion {
    /// Classify a raw OS version string against the Windows 11 threshold.
    ///
    /// Missing or malformed versions classify as [`WindowsVersion::Unknown`].
    pub fn classify(os_version: Option<&str>, windows11_min: &OsVersion) -> Self {
        match os_version.map(str::parse::<OsVersion>) {
            Some(Ok(version)) if version >= *windows11_min => Self::Windows11,
            Some(Ok(_)) => Self::Windows10,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows10 => "Windows 10",
            Self::Windows11 => "Windows 11",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WindowsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disk encryption state as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionStatus {
    Yes,
    No,
    Unknown,
}

impl EncryptionStatus {
    pub fn from_flag(is_encrypted: Option<bool>) -> Self {
        match is_encrypted {
            Some(true) => Self::Yes,
            Some(false) => Self::No,
            None => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EncryptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold() -> OsVersion {
        DEFAULT_WINDOWS11_MIN_VERSION.parse().unwrap()
    }

    #[test]
    fn parses_three_and_four_part_versions() {
        let v: OsVersion = "10.0.19045".parse().unwrap();
        assert_eq!(v, OsVersion::new(10, 0, 19045));
        assert_eq!(v.to_string(), "10.0.19045");

        let v: OsVersion = "10.0.22631.4037".parse().unwrap();
        assert_eq!(v.to_string(), "10.0.22631.4037");
        assert!(v > OsVersion::new(10, 0, 22631));
    }

    #[test]
    fn missing_components_compare_as_zero() {
        let short: OsVersion = "10.0.22000".parse().unwrap();
        let long: OsVersion = "10.0.22000.0".parse().unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn rejects_malformed_versions() {
        for raw in ["", "abc", "10", "10.", "10..0", "10.0.x", "1.2.3.4.5", "10.0.-1", "+10.0"] {
            assert!(raw.parse::<OsVersion>().is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "10.0.x".parse::<OsVersion>().unwrap_err();
        assert_eq!(err, ParseVersionError("10.0.x".into()));
        assert_eq!(err.to_string(), "invalid OS version '10.0.x'");
    }

    #[test]
    fn classify_boundary() {
        let t = threshold();
        assert_eq!(
            WindowsVersion::classify(Some("10.0.21999"), &t),
            WindowsVersion::Windows10
        );
        assert_eq!(
            WindowsVersion::classify(Some("10.0.22000"), &t),
            WindowsVersion::Windows11
        );
        assert_eq!(
            WindowsVersion::classify(Some("10.0.22001"), &t),
            WindowsVersion::Windows11
        );
        assert_eq!(
            WindowsVersion::classify(Some("abc"), &t),
            WindowsVersion::Unknown
        );
        assert_eq!(WindowsVersion::classify(None, &t), WindowsVersion::Unknown);
    }

    #[test]
    fn classify_respects_custom_threshold() {
        let t: OsVersion = "10.0.26100".parse().unwrap();
        assert_eq!(
            WindowsVersion::classify(Some("10.0.22631"), &t),
            WindowsVersion::Windows10
        );
        assert_eq!(
            WindowsVersion::classify(Some("10.0.26100.1"), &t),
            WindowsVersion::Windows11
        );
    }

    #[test]
    fn encryption_status_from_flag() {
        assert_eq!(EncryptionStatus::from_flag(Some(true)), EncryptionStatus::Yes);
        assert_eq!(EncryptionStatus::from_flag(Some(false)), EncryptionStatus::No);
        assert_eq!(EncryptionStatus::from_flag(None), EncryptionStatus::Unknown);
    }

    #[test]
    fn labels_render_display_strings() {
        assert_eq!(WindowsVersion::Windows10.to_string(), "Windows 10");
        assert_eq!(WindowsVersion::Unknown.as_str(), "Unknown");
        assert_eq!(EncryptionStatus::No.to_string(), "No");
        let json = serde_json::to_string(&WindowsVersion::Windows11).unwrap();
        assert_eq!(json, "\"Windows 11\"");
    }
}
