//! Artifact descriptor: which Node.js distribution archive fits this machine.
//!
//! Only macOS, Linux and Windows on x64 / arm64 are supported. 32-bit
//! builds are never selected.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace part of the artifact coordinate.
pub const NODE_NAMESPACE: &str = "org.nodejs";

/// Package part of the artifact coordinate.
pub const NODE_PACKAGE: &str = "node";

/// First major release that ships arm64 builds.
const FIRST_ARM64_MAJOR: u32 = 16;

/// Raw system properties the descriptor is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProperties {
    /// e.g. `Linux`, `Mac OS X`, `Windows 10`
    pub os_name: String,
    /// e.g. `amd64`, `x86_64`, `aarch64`
    pub os_arch: String,
}

impl SystemProperties {
    pub fn new(os_name: impl Into<String>, os_arch: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            os_arch: os_arch.into(),
        }
    }

    /// Properties of the platform this binary was compiled for, spelled the
    /// way JVM-style `os.name` / `os.arch` report them.
    pub fn current() -> Self {
        let os_name = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Mac OS X",
            "windows" => "Windows",
            other => other,
        };
        let os_arch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            other => other,
        };
        Self::new(os_name, os_arch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsTag {
    #[serde(rename = "win")]
    Windows,
    #[serde(rename = "darwin")]
    Darwin,
    #[serde(rename = "linux")]
    Linux,
}

impl OsTag {
    /// Windows is checked first, then macOS, then Linux.
    pub fn from_os_name(os_name: &str) -> Result<Self> {
        let lowered = os_name.to_lowercase();
        if lowered.contains("windows") {
            Ok(Self::Windows)
        } else if lowered.contains("mac os") {
            Ok(Self::Darwin)
        } else if lowered.contains("linux") {
            Ok(Self::Linux)
        } else {
            Err(Error::UnsupportedPlatform {
                os_name: os_name.to_string(),
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Darwin => "darwin",
            Self::Linux => "linux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchTag {
    X64,
    Arm64,
}

impl ArchTag {
    /// arm64 requires a parseable major version of at least 16 and a raw
    /// architecture of exactly `aarch64`. Everything else is x64.
    ///
    /// The rule is applied to every OS tag alike, Windows included.
    pub fn for_version(version: &str, os_arch: &str) -> Self {
        match major_version(version) {
            Some(major) if major >= FIRST_ARM64_MAJOR && os_arch == "aarch64" => Self::Arm64,
            _ => Self::X64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveExtension {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl ArchiveExtension {
    pub fn for_os(os: OsTag) -> Self {
        match os {
            OsTag::Windows => Self::Zip,
            OsTag::Darwin | OsTag::Linux => Self::TarGz,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

/// Leading dot-delimited component of `version` as an integer, `None` when
/// it is not a number.
fn major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

/// Identity of one fetchable Node.js distribution archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub version: String,
    pub os: OsTag,
    pub arch: ArchTag,
    pub extension: ArchiveExtension,
}

impl ArtifactDescriptor {
    pub fn compute(version: &str, props: &SystemProperties) -> Result<Self> {
        let os = OsTag::from_os_name(&props.os_name)?;
        Ok(Self {
            version: version.to_string(),
            os,
            arch: ArchTag::for_version(version, &props.os_arch),
            extension: ArchiveExtension::for_os(os),
        })
    }

    /// `<os>-<arch>`, e.g. `linux-arm64`.
    pub fn classifier(&self) -> String {
        format!("{}-{}", self.os.as_str(), self.arch.as_str())
    }

    /// `org.nodejs:node:<version>:<os>-<arch>@<ext>`, consumed by the fetch
    /// layer.
    pub fn coordinate(&self) -> String {
        format!(
            "{}:{}:{}:{}@{}",
            NODE_NAMESPACE,
            NODE_PACKAGE,
            self.version,
            self.classifier(),
            self.extension.as_str()
        )
    }

    /// File name on the distribution server, e.g. `node-v18.16.0-linux-x64.tar.gz`.
    pub fn archive_file_name(&self) -> String {
        format!(
            "{}-v{}-{}.{}",
            NODE_PACKAGE,
            self.version,
            self.classifier(),
            self.extension.as_str()
        )
    }

    /// `<dist_url>/v<version>/<archive_file_name>`.
    pub fn download_url(&self, dist_url: &str) -> String {
        format!(
            "{}/v{}/{}",
            dist_url.trim_end_matches('/'),
            self.version,
            self.archive_file_name()
        )
    }
}

impl fmt::Display for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate())
    }
}
