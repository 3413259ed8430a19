//! 数据转换模块
//!
//! 提供 ToDataValue / FromDataValue trait 及其实现，以及日期时间解析工具

pub mod datetime_conversion;
pub mod primitive_impls;
pub mod to_data_value;

// 重新导出核心 trait
pub use to_data_value::{FromDataValue, ToDataValue};
