//! The three package-manager kinds bootstrapped on top of the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Manifest every kind reads its declared dependencies from.
pub const MANIFEST_FILE: &str = "package.json";

/// Directory that receives a project's installed dependencies.
pub const DEPENDENCY_DIR: &str = "node_modules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    /// Package name on the registry, also the CLI name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Sub-directory of the install base that holds this kind's installation.
    /// Kinds never share a directory, so installs of different kinds may run
    /// concurrently.
    pub fn install_dir_name(self) -> &'static str {
        self.name()
    }

    pub fn lock_file(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(format!(
                "unknown package manager '{}' (expected npm, yarn or pnpm)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert_eq!(" yarn ".parse::<PackageManager>().unwrap(), PackageManager::Yarn);
        assert!("bun".parse::<PackageManager>().is_err());
    }

    #[test]
    fn test_install_dirs_are_disjoint() {
        let dirs: std::collections::HashSet<_> =
            PackageManager::ALL.iter().map(|k| k.install_dir_name()).collect();
        assert_eq!(dirs.len(), 3);
        assert!(!dirs.contains("node"));
    }
}
