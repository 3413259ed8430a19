//! # 配置管理模块
//!
//! 提供统一的配置管理系统，支持构建器模式和链式配置

pub mod builders;
pub mod core;
pub mod runtime;

pub use builders::{ConversionConfigBuilder, GlobalConfigBuilder, LoggingConfigBuilder};
pub use core::{ConversionConfig, GlobalConfig, LogLevel, LoggingConfig};
pub use runtime::{conversion_config, init_logging, reset_conversion_config, set_conversion_config};
