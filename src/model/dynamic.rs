//! 运行时模型
//!
//! 不经过宏、直接基于运行时构建的 `ModelSchema` 使用模型

use crate::error::ModelResult;
use crate::model::conversion::FromDataValue;
use crate::model::field_map::{FieldMap, array_input, object_input};
use crate::model::field_types::FieldType;
use crate::model::schema::ModelSchema;
use crate::model::traits::Model;
use crate::types::{DataValue, json_value_to_data_value};
use std::collections::HashMap;
use std::sync::Arc;

/// 基于运行时模式的模型实例
#[derive(Debug, Clone)]
pub struct DynamicModel {
    schema: Arc<ModelSchema>,
    fields: FieldMap,
}

impl DynamicModel {
    /// 创建未填充的实例
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        let fields = schema.instantiate();
        Self { schema, fields }
    }

    /// 由原始数据创建实例
    pub fn from_data(schema: Arc<ModelSchema>, data: &HashMap<String, DataValue>) -> Self {
        let mut model = Self::new(schema);
        model.fields.populate(data);
        model
    }

    /// 由 DataValue 创建实例；Null 得到未填充的实例
    pub fn from_data_value(schema: Arc<ModelSchema>, value: DataValue) -> ModelResult<Self> {
        match object_input(value, schema.name())? {
            Some(data) => Ok(Self::from_data(schema, &data)),
            None => Ok(Self::new(schema)),
        }
    }

    pub fn from_json_value(schema: Arc<ModelSchema>, value: serde_json::Value) -> ModelResult<Self> {
        Self::from_data_value(schema, json_value_to_data_value(value))
    }

    pub fn from_json_str(schema: Arc<ModelSchema>, json: &str) -> ModelResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(schema, value)
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// 字段集合（`_fields`）
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    pub fn value(&self, name: &str) -> ModelResult<DataValue> {
        self.fields.value(name)
    }

    pub fn get<T: FromDataValue>(&self, name: &str) -> ModelResult<T> {
        self.fields.require(name)?.value::<T>()
    }

    /// 读取嵌套模型字段，构造为具体的模型类型
    pub fn get_model<M: Model>(&self, name: &str) -> ModelResult<M> {
        M::from_data_value(self.fields.nested_raw(name)?)
    }

    pub fn get_models<M: Model>(&self, name: &str) -> ModelResult<Vec<M>> {
        array_input(self.fields.nested_raw(name)?, name)?
            .into_iter()
            .map(M::from_data_value)
            .collect()
    }

    /// 读取嵌套模型字段，按字段声明的模式构造运行时模型
    pub fn get_dynamic(&self, name: &str) -> ModelResult<DynamicModel> {
        let schema = match self.fields.require(name)?.field_type() {
            FieldType::Model { schema } => schema.resolve(),
            other => {
                return Err(crate::model_error!(
                    conversion,
                    name,
                    format!("{} 不是嵌套模型字段", other.type_name())
                ));
            }
        };
        Self::from_data_value(schema, self.fields.nested_raw(name)?)
    }

    pub fn set<V: Into<DataValue>>(&mut self, name: &str, raw: V) -> ModelResult<()> {
        self.fields.set(name, raw)
    }

    pub fn to_data_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields.to_data_map()
    }

    pub fn to_serial_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields.to_serial_map()
    }

    pub fn to_json_value(&self) -> ModelResult<serde_json::Value> {
        self.fields.to_json_value()
    }

    pub fn to_json_string(&self) -> ModelResult<String> {
        self.fields.to_json_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convenience::{
        char_field, field_collection_field, integer_field, model_field_from,
    };

    fn address_schema() -> Arc<ModelSchema> {
        Arc::new(
            ModelSchema::builder("Address")
                .field("city", char_field())
                .field("zip", integer_field().source("postcode"))
                .build()
                .unwrap(),
        )
    }

    fn person_schema() -> Arc<ModelSchema> {
        Arc::new(
            ModelSchema::builder("Person")
                .field("name", char_field())
                .field("address", model_field_from(address_schema()))
                .field("scores", field_collection_field(FieldType::Integer))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_nested_conversion() {
        let person = DynamicModel::from_json_str(
            person_schema(),
            r#"{"name": "Ann", "address": {"city": "Oslo", "postcode": "0150"}, "scores": ["1", 2]}"#,
        )
        .unwrap();

        assert_eq!(person.get::<String>("name").unwrap(), "Ann");
        assert_eq!(person.get::<Vec<i64>>("scores").unwrap(), vec![1, 2]);

        let address = person.get_dynamic("address").unwrap();
        assert_eq!(address.get::<String>("city").unwrap(), "Oslo");
        assert_eq!(address.get::<i64>("zip").unwrap(), 150);

        let json = person.to_json_value().unwrap();
        assert_eq!(json["address"]["zip"], serde_json::json!(150));
        assert_eq!(json["scores"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_nested_error_path() {
        let person = DynamicModel::from_json_str(
            person_schema(),
            r#"{"address": {"postcode": "abc"}, "scores": [1, "x"]}"#,
        )
        .unwrap();

        assert_eq!(person.value("address").unwrap_err().field(), Some("address.zip"));
        assert_eq!(person.value("scores").unwrap_err().field(), Some("scores[1]"));
        // 其他字段不受影响
        assert_eq!(person.get::<String>("name").unwrap(), "");
    }

    #[test]
    fn test_missing_nested_model_is_null() {
        let person = DynamicModel::new(person_schema());
        assert_eq!(person.value("address").unwrap(), DataValue::Null);
        assert_eq!(person.value("scores").unwrap(), DataValue::Array(Vec::new()));

        let address = person.get_dynamic("address").unwrap();
        assert!(!address.fields().get("city").unwrap().is_populated());
        assert!(person.get_dynamic("name").is_err());
    }

    #[test]
    fn test_rejects_non_object_input() {
        let err = DynamicModel::from_json_str(person_schema(), "[1, 2]").unwrap_err();
        assert!(matches!(err, crate::error::ModelError::SerializationError { .. }));
        assert!(DynamicModel::from_json_str(person_schema(), "{not json").is_err());
    }
}
