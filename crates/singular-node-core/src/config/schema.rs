//! 按领域分组的配置结构体
//!
//! 从环境变量加载，统一 fallback 逻辑。

use super::env_keys::{install_args, observability as obv_keys, paths, versions};
use super::loader::{env_bool, env_list, env_optional, env_or};
use crate::error::{Error, Result};
use crate::package_manager::PackageManager;
use std::path::PathBuf;

/// 默认安装根目录（相对于当前工作目录）
pub const DEFAULT_INSTALL_DIR: &str = "nodejs";

/// 默认 Node.js 发行包服务器
pub const DEFAULT_DIST_URL: &str = "https://nodejs.org/dist";

/// 工具链配置：版本、安装参数、安装目录、下载源
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub node_version: Option<String>,
    pub npm_version: Option<String>,
    pub yarn_version: Option<String>,
    pub pnpm_version: Option<String>,
    pub npm_install_args: Vec<String>,
    pub yarn_install_args: Vec<String>,
    pub pnpm_install_args: Vec<String>,
    pub install_dir: PathBuf,
    pub dist_url: String,
}

impl ToolchainConfig {
    /// 从环境变量加载（会自动加载 .env）
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            node_version: env_optional(
                versions::SINGULAR_NODE_VERSION,
                versions::NODE_VERSION_ALIASES,
            ),
            npm_version: env_optional(versions::SINGULAR_NODE_NPM_VERSION, &[]),
            yarn_version: env_optional(versions::SINGULAR_NODE_YARN_VERSION, &[]),
            pnpm_version: env_optional(versions::SINGULAR_NODE_PNPM_VERSION, &[]),
            npm_install_args: env_list(install_args::SINGULAR_NODE_NPM_INSTALL_ARGS, &[]),
            yarn_install_args: env_list(install_args::SINGULAR_NODE_YARN_INSTALL_ARGS, &[]),
            pnpm_install_args: env_list(install_args::SINGULAR_NODE_PNPM_INSTALL_ARGS, &[]),
            install_dir: PathBuf::from(env_or(paths::SINGULAR_NODE_INSTALL_DIR, &[], || {
                DEFAULT_INSTALL_DIR.to_string()
            })),
            dist_url: env_or(paths::SINGULAR_NODE_DIST_URL, paths::DIST_URL_ALIASES, || {
                DEFAULT_DIST_URL.to_string()
            }),
        }
    }

    /// Node.js 版本为必填项，缺失时报错
    pub fn require_node_version(&self) -> Result<&str> {
        self.node_version
            .as_deref()
            .ok_or(Error::MissingConfiguration {
                setting: versions::SINGULAR_NODE_VERSION,
            })
    }

    /// 指定包管理器的目标版本（必填）
    pub fn require_manager_version(&self, kind: PackageManager) -> Result<&str> {
        let (version, key) = match kind {
            PackageManager::Npm => (&self.npm_version, versions::SINGULAR_NODE_NPM_VERSION),
            PackageManager::Yarn => (&self.yarn_version, versions::SINGULAR_NODE_YARN_VERSION),
            PackageManager::Pnpm => (&self.pnpm_version, versions::SINGULAR_NODE_PNPM_VERSION),
        };
        version
            .as_deref()
            .ok_or(Error::MissingConfiguration { setting: key })
    }

    /// 指定包管理器执行 `install` 时的附加参数
    pub fn install_args(&self, kind: PackageManager) -> &[String] {
        match kind {
            PackageManager::Npm => &self.npm_install_args,
            PackageManager::Yarn => &self.yarn_install_args,
            PackageManager::Pnpm => &self.pnpm_install_args,
        }
    }
}

/// 可观测性配置：quiet、log_level、log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::SINGULAR_NODE_QUIET, &[], false),
                log_level: env_or(obv_keys::SINGULAR_NODE_LOG_LEVEL, &[], || {
                    "singular_node=info".to_string()
                }),
                log_json: env_bool(obv_keys::SINGULAR_NODE_LOG_JSON, &[], false),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_node_version_missing() {
        let cfg = ToolchainConfig::default();
        let err = cfg.require_node_version().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingConfiguration { setting: "SINGULAR_NODE_VERSION" }
        ));
    }

    #[test]
    fn test_manager_version_and_args_by_kind() {
        let cfg = ToolchainConfig {
            yarn_version: Some("1.22.19".to_string()),
            pnpm_install_args: vec!["--frozen-lockfile".to_string()],
            ..Default::default()
        };
        assert_eq!(cfg.require_manager_version(PackageManager::Yarn).unwrap(), "1.22.19");
        assert!(cfg.require_manager_version(PackageManager::Npm).is_err());
        assert_eq!(cfg.install_args(PackageManager::Pnpm), ["--frozen-lockfile"]);
        assert!(cfg.install_args(PackageManager::Yarn).is_empty());
    }
}
