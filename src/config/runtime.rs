//! # 运行时配置
//!
//! 保存进程级的转换配置，并按需初始化日志

use crate::config::core::{ConversionConfig, LoggingConfig};
use crate::error::ModelResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rat_logger::{LoggerBuilder, debug, handler::term::TermConfig};

/// 当前生效的转换配置
static CONVERSION_CONFIG: Lazy<RwLock<ConversionConfig>> =
    Lazy::new(|| RwLock::new(ConversionConfig::default()));

/// 安装转换配置
///
/// 之后的日期/时间字段转换会使用新的默认格式与时区
pub fn set_conversion_config(config: ConversionConfig) -> ModelResult<()> {
    config.validate()?;
    debug!("安装转换配置: 时区={}, 回退格式数量={}", config.timezone_offset, config.datetime_formats.len());
    *CONVERSION_CONFIG.write() = config;
    Ok(())
}

/// 获取当前转换配置的快照
pub fn conversion_config() -> ConversionConfig {
    CONVERSION_CONFIG.read().clone()
}

/// 恢复默认转换配置
pub fn reset_conversion_config() {
    *CONVERSION_CONFIG.write() = ConversionConfig::default();
}

/// 初始化日志
///
/// 库本身从不隐式初始化日志；调用者可以用这个函数按配置安装终端日志。
/// `console` 为 false 时不做任何事情。
pub fn init_logging(config: &LoggingConfig) -> ModelResult<()> {
    if !config.console {
        return Ok(());
    }

    LoggerBuilder::new()
        .with_level(config.level.to_level_filter())
        .add_terminal_with_config(TermConfig::default())
        .init()
        .map_err(|e| crate::model_error!(config, format!("日志初始化失败: {}", e)))?;

    Ok(())
}
