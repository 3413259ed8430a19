//! 字段单元模块
//!
//! `Field` 是字段模板在某个模型实例中的副本：模板共享，原始值各自独立

use crate::error::ModelResult;
use crate::model::conversion::FromDataValue;
use crate::model::field_types::{FieldDefinition, FieldType, is_absent};
use crate::types::DataValue;
use std::sync::Arc;

/// 模型实例中的一个字段
///
/// `raw_value` 为 `None` 表示尚未填充；`Some(DataValue::Null)` 表示已填充但值缺失
#[derive(Debug, Clone)]
pub struct Field {
    name: Option<String>,
    definition: Arc<FieldDefinition>,
    raw_value: Option<DataValue>,
}

impl Field {
    /// 由字段定义创建独立字段（未命名、未填充）
    pub fn new(definition: FieldDefinition) -> Self {
        Self {
            name: None,
            definition: Arc::new(definition),
            raw_value: None,
        }
    }

    /// 由模型模式中的模板创建实例字段
    pub fn from_template(name: &str, definition: Arc<FieldDefinition>) -> Self {
        Self {
            name: Some(name.to_string()),
            definition,
            raw_value: None,
        }
    }

    /// 字段在模型中的属性名；独立字段为 None
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 原始数据中的来源键（未声明时为 None）
    pub fn source(&self) -> Option<&str> {
        self.definition.source.as_deref()
    }

    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    pub fn field_type(&self) -> &FieldType {
        &self.definition.field_type
    }

    /// 字段类型名称
    pub fn type_name(&self) -> &'static str {
        self.definition.field_type.type_name()
    }

    /// 最近一次填充的原始值
    pub fn raw_value(&self) -> Option<&DataValue> {
        self.raw_value.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.raw_value.is_some()
    }

    /// 参与转换的原始值：原始值缺失时取默认值，都没有时为 Null
    pub fn effective_raw_value(&self) -> DataValue {
        match (&self.raw_value, &self.definition.default) {
            (Some(raw), Some(default)) if is_absent(raw) => default.clone(),
            (Some(raw), _) => raw.clone(),
            (None, Some(default)) => default.clone(),
            (None, None) => DataValue::Null,
        }
    }

    /// 填充原始值，覆盖之前的值
    pub fn populate<V: Into<DataValue>>(&mut self, raw: V) {
        self.raw_value = Some(raw.into());
    }

    /// 清除原始值，回到未填充状态
    pub fn reset(&mut self) {
        self.raw_value = None;
    }

    /// 按字段类型转换原始值
    ///
    /// 未填充时返回默认值或类型的空值；原始值缺失且声明了默认值时，默认值参与转换
    pub fn to_python(&self) -> ModelResult<DataValue> {
        let label = self.label();
        let field_type = &self.definition.field_type;

        match (&self.raw_value, &self.definition.default) {
            (None, Some(default)) => field_type.to_python(default, label),
            (Some(raw), Some(default)) if is_absent(raw) => field_type.to_python(default, label),
            (None, None) => Ok(field_type.empty_value()),
            (Some(raw), _) => field_type.to_python(raw, label),
        }
    }

    /// 转换后再还原为可序列化的形式
    pub fn to_serial(&self) -> ModelResult<DataValue> {
        let value = self.to_python()?;
        self.definition.field_type.to_serial(&value, self.label())
    }

    /// 转换并收窄为具体的 Rust 类型
    pub fn value<T: FromDataValue>(&self) -> ModelResult<T> {
        T::from_data_value(self.to_python()?, self.label())
    }

    /// 错误信息中使用的字段标识
    fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.definition.source.as_deref())
            .unwrap_or("<anonymous>")
    }
}

impl From<FieldDefinition> for Field {
    fn from(definition: FieldDefinition) -> Self {
        Field::new(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convenience::{char_field, field_base, integer_field};

    #[test]
    fn test_char_field_conversion() {
        let mut field = Field::new(char_field());
        field.populate("somestring");
        assert_eq!(field.to_python().unwrap(), DataValue::String("somestring".to_string()));

        field.populate(DataValue::Null);
        assert_eq!(field.to_python().unwrap(), DataValue::String(String::new()));
    }

    #[test]
    fn test_integer_field_conversion() {
        let mut field = Field::new(integer_field());
        field.populate("123");
        assert_eq!(field.to_python().unwrap(), DataValue::Int(123));
        assert_eq!(field.value::<i64>().unwrap(), 123);

        // 重复转换结果一致，且不改变原始值
        assert_eq!(field.to_python().unwrap(), DataValue::Int(123));
        assert_eq!(field.raw_value(), Some(&DataValue::String("123".to_string())));
    }

    #[test]
    fn test_populate_overwrites_previous_value() {
        let mut field = Field::new(integer_field());
        field.populate(1);
        field.populate("2");
        assert_eq!(field.value::<i64>().unwrap(), 2);

        field.reset();
        assert!(!field.is_populated());
        assert_eq!(field.to_python().unwrap(), DataValue::Int(0));
    }

    #[test]
    fn test_source_and_base_field() {
        let field = Field::new(field_base().source("foo"));
        assert_eq!(field.source(), Some("foo"));
        assert_eq!(field.name(), None);
        assert_eq!(field.type_name(), "FieldBase");

        let mut field = Field::new(field_base());
        assert_eq!(field.source(), None);
        field.populate(DataValue::Float(1.5));
        assert_eq!(field.to_python().unwrap(), DataValue::Float(1.5));
    }

    #[test]
    fn test_default_applies_to_missing_value() {
        let mut field = Field::from_template("count", Arc::new(integer_field().with_default("5")));
        assert_eq!(field.value::<i64>().unwrap(), 5);

        field.populate(DataValue::Null);
        assert_eq!(field.value::<i64>().unwrap(), 5);

        field.populate(9);
        assert_eq!(field.value::<i64>().unwrap(), 9);
    }

    #[test]
    fn test_error_label_uses_name() {
        let mut field = Field::from_template("age", Arc::new(integer_field()));
        field.populate("abc");
        let err = field.to_python().unwrap_err();
        assert_eq!(err.field(), Some("age"));

        let mut anonymous = Field::new(integer_field());
        anonymous.populate(DataValue::Null);
        assert_eq!(anonymous.to_python().unwrap_err().field(), Some("<anonymous>"));
    }
}
