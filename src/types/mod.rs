//! 通用数据类型定义
//!
//! 定义模型层在边界处使用的原始数据表示

pub mod data_value;

pub use data_value::{DataValue, json_object_to_data_map, json_value_to_data_value};
