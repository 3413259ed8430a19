//! # 全局配置构建器模块
//!
//! 提供全局配置的构建器实现，支持链式调用和严格验证

use crate::config::core::{ConversionConfig, GlobalConfig, LoggingConfig};
use crate::error::ModelError;
use rat_logger::info;

/// 全局配置构建器
///
/// 提供链式配置接口，支持流畅的API调用
#[derive(Debug)]
pub struct GlobalConfigBuilder {
    logging: Option<LoggingConfig>,
    conversion: Option<ConversionConfig>,
}

impl GlobalConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            logging: None,
            conversion: None,
        }
    }

    /// 设置日志配置
    ///
    /// # 参数
    ///
    /// * `logging` - 日志配置
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 设置字段转换配置
    ///
    /// # 参数
    ///
    /// * `conversion` - 转换配置
    pub fn conversion(mut self, conversion: ConversionConfig) -> Self {
        self.conversion = Some(conversion);
        self
    }

    /// 构建全局配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，将返回错误
    pub fn build(self) -> Result<GlobalConfig, ModelError> {
        let logging = self.logging.ok_or_else(|| {
            crate::model_error!(config, "日志配置必须设置")
        })?;

        let conversion = self.conversion.ok_or_else(|| {
            crate::model_error!(config, "转换配置必须设置")
        })?;
        conversion.validate()?;

        info!("创建全局配置: 日志级别={:?}, 默认时区={}", logging.level, conversion.timezone_offset);

        Ok(GlobalConfig { logging, conversion })
    }
}

impl Default for GlobalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
