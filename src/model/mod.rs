//! 模型定义系统模块
//!
//! 通过声明字段模板定义模型：字段在模型定义时收集一次，
//! 每个模型实例持有独立的字段副本，原始数据在读取时按字段类型转换

pub mod convenience;
pub mod conversion;
pub mod dynamic;
pub mod field;
pub mod field_map;
pub mod field_types;
pub mod macros;
pub mod schema;
pub mod traits;

// 重新导出核心类型
pub use convenience::*;
pub use conversion::{FromDataValue, ToDataValue};
pub use dynamic::DynamicModel;
pub use field::Field;
pub use field_map::FieldMap;
pub use field_types::{FieldConverter, FieldDefinition, FieldType, SchemaRef};
pub use schema::{ModelSchema, ModelSchemaBuilder};
pub use traits::Model;
