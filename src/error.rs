//! 错误处理模块
//!
//! 定义库内统一的错误类型与结果别名

use thiserror::Error;

/// 模型层错误类型
#[derive(Error, Debug)]
pub enum ModelError {
    /// 字段值无法转换为目标类型
    #[error("字段转换失败: {field} - {message}")]
    ConversionError { field: String, message: String },

    /// 访问了模型中不存在的字段
    #[error("模型 {model} 中不存在字段: {field}")]
    UnknownField { model: String, field: String },

    /// 模型定义（字段收集）错误
    #[error("模型定义错误: {message}")]
    SchemaError { message: String },

    /// 序列化/反序列化错误
    #[error("序列化失败: {message}")]
    SerializationError { message: String },

    /// 配置错误
    #[error("配置错误: {message}")]
    ConfigError { message: String },

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON错误
    #[error("JSON错误: {0}")]
    JsonError(#[from] serde_json::Error),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    /// 是否为字段转换错误
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, ModelError::ConversionError { .. })
    }

    /// 出错字段的名称（仅转换错误和未知字段错误携带）
    pub fn field(&self) -> Option<&str> {
        match self {
            ModelError::ConversionError { field, .. } => Some(field),
            ModelError::UnknownField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// 模型层结果类型
pub type ModelResult<T> = Result<T, ModelError>;

/// 便捷宏：构造错误
#[macro_export]
macro_rules! model_error {
    (conversion, $field:expr, $message:expr) => {
        $crate::error::ModelError::ConversionError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
    (unknown_field, $model:expr, $field:expr) => {
        $crate::error::ModelError::UnknownField {
            model: $model.to_string(),
            field: $field.to_string(),
        }
    };
    (schema, $message:expr) => {
        $crate::error::ModelError::SchemaError {
            message: $message.to_string(),
        }
    };
    (serialization, $message:expr) => {
        $crate::error::ModelError::SerializationError {
            message: $message.to_string(),
        }
    };
    (config, $message:expr) => {
        $crate::error::ModelError::ConfigError {
            message: $message.to_string(),
        }
    };
}
