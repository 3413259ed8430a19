//! Model trait 定义模块
//!
//! 定义模型的核心接口：字段注册表、实例字段集合以及基于它们的读写操作

use crate::error::ModelResult;
use crate::model::conversion::FromDataValue;
use crate::model::field_map::{FieldMap, array_input, object_input};
use crate::model::schema::ModelSchema;
use crate::types::{DataValue, json_value_to_data_value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// 模型特征
///
/// 通常由 `define_model!` 宏实现。实现者只需提供模式与字段集合的存取，
/// 其余操作都建立在 `FieldMap` 之上
pub trait Model: Sized + Clone + Debug + Send + Sync {
    /// 获取模型的字段注册表（每个模型类型只构建一次）
    fn schema() -> Arc<ModelSchema>;

    /// 由字段集合构造模型实例
    fn from_field_map(fields: FieldMap) -> Self;

    /// 字段集合（`_fields`）
    fn fields(&self) -> &FieldMap;

    fn fields_mut(&mut self) -> &mut FieldMap;

    /// 模型名称
    fn model_name() -> String {
        Self::schema().name().to_string()
    }

    /// 创建未填充的模型实例
    fn new() -> Self {
        Self::from_field_map(Self::schema().instantiate())
    }

    /// 由原始数据创建模型实例
    ///
    /// 每个字段按来源键或字段名取值，缺失的键以 Null 填充；转换在读取时才发生
    fn from_data(data: &HashMap<String, DataValue>) -> Self {
        let mut fields = Self::schema().instantiate();
        fields.populate(data);
        Self::from_field_map(fields)
    }

    /// 由 DataValue 创建模型实例；Null 得到未填充的实例
    fn from_data_value(value: DataValue) -> ModelResult<Self> {
        match object_input(value, &Self::model_name())? {
            Some(data) => Ok(Self::from_data(&data)),
            None => Ok(Self::new()),
        }
    }

    /// 由 JSON 值创建模型实例
    fn from_json_value(value: serde_json::Value) -> ModelResult<Self> {
        Self::from_data_value(json_value_to_data_value(value))
    }

    /// 由 JSON 字符串创建模型实例
    fn from_json_str(json: &str) -> ModelResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// 读取字段的转换值
    fn value(&self, name: &str) -> ModelResult<DataValue> {
        self.fields().value(name)
    }

    /// 读取字段并收窄为具体类型
    fn get<T: FromDataValue>(&self, name: &str) -> ModelResult<T> {
        self.fields().require(name)?.value::<T>()
    }

    /// 读取嵌套模型字段，构造为具体的模型类型
    fn get_model<M: Model>(&self, name: &str) -> ModelResult<M> {
        M::from_data_value(self.fields().nested_raw(name)?)
    }

    /// 读取嵌套模型列表字段
    fn get_models<M: Model>(&self, name: &str) -> ModelResult<Vec<M>> {
        array_input(self.fields().nested_raw(name)?, name)?
            .into_iter()
            .map(M::from_data_value)
            .collect()
    }

    /// 重新填充单个字段
    fn set<V: Into<DataValue>>(&mut self, name: &str, raw: V) -> ModelResult<()> {
        self.fields_mut().set(name, raw)
    }

    /// 按声明顺序返回所有字段的转换值
    fn to_data_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields().to_data_map()
    }

    /// 按声明顺序返回所有字段的可序列化值
    fn to_serial_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields().to_serial_map()
    }

    fn to_json_value(&self) -> ModelResult<serde_json::Value> {
        self.fields().to_json_value()
    }

    fn to_json_string(&self) -> ModelResult<String> {
        self.fields().to_json_string()
    }
}
