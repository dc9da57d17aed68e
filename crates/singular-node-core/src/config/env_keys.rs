//! 环境变量 key 常量与别名定义
//!
//! 主变量统一使用 `SINGULAR_NODE_*` 前缀。

/// 工具链版本
pub mod versions {
    pub const SINGULAR_NODE_VERSION: &str = "SINGULAR_NODE_VERSION";
    pub const NODE_VERSION_ALIASES: &[&str] = &["NODE_VERSION"];

    pub const SINGULAR_NODE_NPM_VERSION: &str = "SINGULAR_NODE_NPM_VERSION";
    pub const SINGULAR_NODE_YARN_VERSION: &str = "SINGULAR_NODE_YARN_VERSION";
    pub const SINGULAR_NODE_PNPM_VERSION: &str = "SINGULAR_NODE_PNPM_VERSION";
}

/// 包管理器 `install` 的附加参数（空白分隔）
pub mod install_args {
    pub const SINGULAR_NODE_NPM_INSTALL_ARGS: &str = "SINGULAR_NODE_NPM_INSTALL_ARGS";
    pub const SINGULAR_NODE_YARN_INSTALL_ARGS: &str = "SINGULAR_NODE_YARN_INSTALL_ARGS";
    pub const SINGULAR_NODE_PNPM_INSTALL_ARGS: &str = "SINGULAR_NODE_PNPM_INSTALL_ARGS";
}

/// 安装目录与下载源
pub mod paths {
    pub const SINGULAR_NODE_INSTALL_DIR: &str = "SINGULAR_NODE_INSTALL_DIR";

    /// 发行包服务器根地址，默认 https://nodejs.org/dist
    pub const SINGULAR_NODE_DIST_URL: &str = "SINGULAR_NODE_DIST_URL";
    pub const DIST_URL_ALIASES: &[&str] = &["NODEJS_ORG_MIRROR"];
}

/// 可观测性与日志
pub mod observability {
    pub const SINGULAR_NODE_QUIET: &str = "SINGULAR_NODE_QUIET";
    pub const SINGULAR_NODE_LOG_LEVEL: &str = "SINGULAR_NODE_LOG_LEVEL";
    pub const SINGULAR_NODE_LOG_JSON: &str = "SINGULAR_NODE_LOG_JSON";
}
