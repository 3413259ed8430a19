//! 模型便捷函数模块
//!
//! 提供创建各种字段类型的便捷函数

use crate::model::field_types::{FieldConverter, FieldDefinition, FieldType, SchemaRef};
use crate::model::schema::ModelSchema;
use crate::model::traits::Model;
use std::sync::Arc;

/// 便捷函数：创建基础字段（原样返回原始值）
pub fn field_base() -> FieldDefinition {
    FieldDefinition::new(FieldType::Base)
}

/// 便捷函数：创建字符串字段
pub fn char_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Char)
}

/// 便捷函数：创建整数字段
pub fn integer_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Integer)
}

/// 便捷函数：创建浮点数字段
pub fn float_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Float)
}

/// 便捷函数：创建布尔字段
pub fn boolean_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Boolean)
}

/// 便捷函数：创建日期时间字段
///
/// 未指定格式时先按 RFC3339 解析，再尝试配置中的回退格式；不含时区的时间使用全局默认时区
pub fn datetime_field(format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::DateTime {
        format: format.map(str::to_string),
        timezone_offset: None,
    })
}

/// 便捷函数：创建带时区的日期时间字段
///
/// 时区偏移格式："+00:00", "+08:00", "-05:00"
pub fn datetime_with_tz_field(format: Option<&str>, timezone_offset: &str) -> FieldDefinition {
    FieldDefinition::new(FieldType::DateTime {
        format: format.map(str::to_string),
        timezone_offset: Some(timezone_offset.to_string()),
    })
}

/// 便捷函数：创建日期字段
pub fn date_field(format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Date {
        format: format.map(str::to_string),
    })
}

/// 便捷函数：创建时间字段
pub fn time_field(format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Time {
        format: format.map(str::to_string),
    })
}

/// 便捷函数：创建UUID字段
pub fn uuid_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Uuid)
}

/// 便捷函数：创建嵌套模型字段
pub fn model_field<M: Model>() -> FieldDefinition {
    FieldDefinition::new(FieldType::Model {
        schema: SchemaRef::Static(M::schema),
    })
}

/// 便捷函数：由运行时构建的模式创建嵌套模型字段
pub fn model_field_from(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Model {
        schema: SchemaRef::Shared(schema),
    })
}

/// 便捷函数：创建嵌套模型列表字段
pub fn model_collection_field<M: Model>() -> FieldDefinition {
    FieldDefinition::new(FieldType::ModelCollection {
        schema: SchemaRef::Static(M::schema),
    })
}

/// 便捷函数：由运行时构建的模式创建嵌套模型列表字段
pub fn model_collection_field_from(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::ModelCollection {
        schema: SchemaRef::Shared(schema),
    })
}

/// 便捷函数：创建同类字段列表，每个元素按 `item_type` 转换
pub fn field_collection_field(item_type: FieldType) -> FieldDefinition {
    FieldDefinition::new(FieldType::FieldCollection {
        item_type: Box::new(item_type),
    })
}

/// 便捷函数：创建自定义转换字段
pub fn custom_field(converter: Arc<dyn FieldConverter>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Custom(converter))
}
