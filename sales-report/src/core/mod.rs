//! 核心模块 - 配置
//!
//! - [`Config`] - 报表配置 (environment driven)

pub mod config;

pub use config::Config;
