//! # 转换配置构建器模块
//!
//! 提供字段转换配置的构建器实现，支持链式调用和严格验证

use crate::config::core::ConversionConfig;
use crate::error::ModelError;
use rat_logger::info;

/// 转换配置构建器
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    date_format: Option<String>,
    time_format: Option<String>,
    datetime_formats: Option<Vec<String>>,
    timezone_offset: Option<String>,
}

impl ConversionConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            date_format: None,
            time_format: None,
            datetime_formats: None,
            timezone_offset: None,
        }
    }

    /// 设置日期字段默认格式（chrono strftime 语法）
    pub fn date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// 设置时间字段默认格式
    pub fn time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// 设置日期时间回退解析格式列表
    pub fn datetime_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    /// 设置默认时区偏移
    ///
    /// # 参数
    ///
    /// * `offset` - 时区偏移，格式如 "+08:00"、"-05:30"
    pub fn timezone_offset<S: Into<String>>(mut self, offset: S) -> Self {
        self.timezone_offset = Some(offset.into());
        self
    }

    /// 构建转换配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置或格式非法，将返回错误
    pub fn build(self) -> Result<ConversionConfig, ModelError> {
        let date_format = self.date_format.ok_or_else(|| {
            crate::model_error!(config, "日期格式必须设置")
        })?;

        let time_format = self.time_format.ok_or_else(|| {
            crate::model_error!(config, "时间格式必须设置")
        })?;

        let datetime_formats = self.datetime_formats.ok_or_else(|| {
            crate::model_error!(config, "日期时间格式列表必须设置")
        })?;

        let timezone_offset = self.timezone_offset.ok_or_else(|| {
            crate::model_error!(config, "默认时区偏移必须设置")
        })?;

        let config = ConversionConfig {
            date_format,
            time_format,
            datetime_formats,
            timezone_offset,
        };
        config.validate()?;

        info!(
            "创建转换配置: 日期格式={}, 时间格式={}, 时区={}",
            config.date_format, config.time_format, config.timezone_offset
        );

        Ok(config)
    }
}

impl Default for ConversionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
