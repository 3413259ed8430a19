//! # 配置管理模块 - 核心配置类型
//!
//! 提供统一的配置管理系统，支持构建器模式和链式配置
//! 构建器要求所有配置项显式设置；`Default` 仅用于库在未初始化时的基线行为

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use rat_logger::info;

/// 全局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// 日志配置
    pub logging: LoggingConfig,
    /// 字段转换配置
    pub conversion: ConversionConfig,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 是否输出到控制台
    pub console: bool,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 错误级别
    Error,
    /// 警告级别
    Warn,
    /// 信息级别
    Info,
    /// 调试级别
    Debug,
    /// 跟踪级别
    Trace,
}

impl LogLevel {
    /// 转换为 rat_logger 的过滤级别
    pub fn to_level_filter(self) -> rat_logger::LevelFilter {
        match self {
            LogLevel::Error => rat_logger::LevelFilter::Error,
            LogLevel::Warn => rat_logger::LevelFilter::Warn,
            LogLevel::Info => rat_logger::LevelFilter::Info,
            LogLevel::Debug => rat_logger::LevelFilter::Debug,
            LogLevel::Trace => rat_logger::LevelFilter::Trace,
        }
    }
}

/// 字段转换配置
///
/// 日期/时间字段在未声明格式时使用这里的格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// 日期字段默认格式
    pub date_format: String,
    /// 时间字段默认格式
    pub time_format: String,
    /// 日期时间字段在 RFC3339 解析失败后依次尝试的格式
    pub datetime_formats: Vec<String>,
    /// 无时区信息的日期时间默认使用的时区偏移，格式 [+/-]HH:MM
    pub timezone_offset: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
            datetime_formats: [
                "%Y-%m-%d %H:%M:%S",      // 2024-01-15 14:30:00
                "%Y-%m-%d %H:%M:%S%.f",   // 2024-01-15 14:30:00.123
                "%Y-%m-%d %H:%M",         // 2024-01-15 14:30
                "%Y-%m-%dT%H:%M:%S",      // 2024-01-15T14:30:00
                "%Y-%m-%dT%H:%M:%S%.f",   // 2024-01-15T14:30:00.123
                "%Y-%m-%dT%H:%M",         // 2024-01-15T14:30
                "%Y/%m/%d %H:%M:%S",      // 2024/01/15 14:30:00
                "%Y/%m/%d %H:%M",         // 2024/01/15 14:30
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            timezone_offset: "+00:00".to_string(),
        }
    }
}

impl GlobalConfig {
    /// 创建全局配置构建器
    pub fn builder() -> super::builders::GlobalConfigBuilder {
        super::builders::GlobalConfigBuilder::new()
    }

    /// 从配置文件加载配置
    ///
    /// 扩展名为 `.toml` 时按 TOML 解析，否则按 JSON 解析
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn from_file<P: AsRef<std::path::Path>>(config_path: P) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(config_path.as_ref())?;

        let config: GlobalConfig = if config_path.as_ref().extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&content)
                .map_err(|e| crate::model_error!(config, format!("解析TOML配置文件失败: {}", e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| crate::model_error!(config, format!("解析JSON配置文件失败: {}", e)))?
        };

        config.conversion.validate()?;

        info!("从文件加载配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    /// 保存配置到文件
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, config_path: P) -> Result<(), ModelError> {
        let content = if config_path.as_ref().extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::to_string_pretty(self)
                .map_err(|e| crate::model_error!(config, format!("序列化TOML配置失败: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| crate::model_error!(config, format!("序列化JSON配置失败: {}", e)))?
        };

        std::fs::write(config_path.as_ref(), content)?;

        info!("保存配置到文件: {:?}", config_path.as_ref());
        Ok(())
    }
}

impl LoggingConfig {
    /// 创建日志配置构建器
    pub fn builder() -> super::builders::LoggingConfigBuilder {
        super::builders::LoggingConfigBuilder::new()
    }
}

impl ConversionConfig {
    /// 创建转换配置构建器
    pub fn builder() -> super::builders::ConversionConfigBuilder {
        super::builders::ConversionConfigBuilder::new()
    }

    /// 校验配置项
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.date_format.is_empty() {
            return Err(crate::model_error!(config, "日期格式不能为空"));
        }
        if self.time_format.is_empty() {
            return Err(crate::model_error!(config, "时间格式不能为空"));
        }
        if self.datetime_formats.iter().any(|f| f.is_empty()) {
            return Err(crate::model_error!(config, "日期时间格式不能为空字符串"));
        }
        crate::model::conversion::datetime_conversion::parse_timezone_offset(&self.timezone_offset)
            .map_err(|e| crate::model_error!(config, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> GlobalConfig {
        GlobalConfig {
            logging: LoggingConfig {
                level: LogLevel::Debug,
                console: false,
            },
            conversion: ConversionConfig {
                timezone_offset: "+08:00".to_string(),
                ..ConversionConfig::default()
            },
        }
    }

    #[test]
    fn test_config_file_round_trip_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickmodel.toml");

        let config = sample_config();
        config.save_to_file(&path).unwrap();
        let loaded = GlobalConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_round_trip_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickmodel.json");

        let config = sample_config();
        config.save_to_file(&path).unwrap();
        let loaded = GlobalConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_timezone_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");

        let mut config = sample_config();
        config.conversion.timezone_offset = "8:00".to_string();
        config.save_to_file(&path).unwrap();

        let err = GlobalConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ModelError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GlobalConfig::from_file("/nonexistent/quickmodel.toml").unwrap_err();
        assert!(matches!(err, ModelError::IoError(_)));
    }
}
