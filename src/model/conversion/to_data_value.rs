//! ToDataValue / FromDataValue trait 定义
//!
//! 定义了 Rust 类型与 DataValue 之间的双向转换接口

use crate::error::ModelResult;
use crate::types::DataValue;

/// 支持直接转换为 DataValue 的 trait
/// 避免 JSON 序列化的性能开销
pub trait ToDataValue {
    fn to_data_value(&self) -> DataValue;
}

/// 从转换后的 DataValue 收窄为具体 Rust 类型
///
/// `field` 仅用于错误信息中标明出错字段
pub trait FromDataValue: Sized {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self>;
}

/// 生成"类型不匹配"错误
pub(crate) fn type_mismatch(field: &str, expected: &str, value: &DataValue) -> crate::error::ModelError {
    crate::model_error!(
        conversion,
        field,
        format!("期望{}，实际为 {} ({})", expected, value.type_name(), value)
    )
}
