//! 模型实例的字段集合（`_fields`）
//!
//! 保持注册顺序，每个模型实例独占一份

use crate::error::ModelResult;
use crate::model::field::Field;
use crate::types::DataValue;
use rat_logger::debug;
use std::collections::HashMap;

/// 有序字段集合
#[derive(Debug, Clone)]
pub struct FieldMap {
    model: String,
    fields: Vec<(String, Field)>,
}

impl FieldMap {
    pub fn new(model: &str, fields: Vec<(String, Field)>) -> Self {
        Self {
            model: model.to_string(),
            fields,
        }
    }

    /// 所属模型名称
    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, field)| field)
    }

    /// 获取字段，不存在时返回 UnknownField 错误
    pub fn require(&self, name: &str) -> ModelResult<&Field> {
        self.get(name)
            .ok_or_else(|| crate::model_error!(unknown_field, self.model, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 用原始数据填充所有字段
    ///
    /// 每个字段按来源键（未声明时为字段名）查找，缺失的键以 Null 填充
    pub fn populate(&mut self, data: &HashMap<String, DataValue>) {
        for (name, field) in self.fields.iter_mut() {
            let key = field.definition().lookup_key(name);
            let raw = data.get(key).cloned().unwrap_or(DataValue::Null);
            field.populate(raw);
        }
        debug!("模型 {} 填充完成，输入键数量: {}", self.model, data.len());
    }

    /// 重新填充单个字段
    pub fn set<V: Into<DataValue>>(&mut self, name: &str, raw: V) -> ModelResult<()> {
        let model = self.model.clone();
        let field = self
            .get_mut(name)
            .ok_or_else(|| crate::model_error!(unknown_field, model, name))?;
        field.populate(raw);
        Ok(())
    }

    /// 读取字段的转换值
    pub fn value(&self, name: &str) -> ModelResult<DataValue> {
        self.require(name)?.to_python()
    }

    /// 按注册顺序收集所有字段的转换值
    pub fn to_data_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields
            .iter()
            .map(|(name, field)| Ok((name.clone(), field.to_python()?)))
            .collect()
    }

    /// 按注册顺序收集所有字段的可序列化值
    pub fn to_serial_map(&self) -> ModelResult<Vec<(String, DataValue)>> {
        self.fields
            .iter()
            .map(|(name, field)| Ok((name.clone(), field.to_serial()?)))
            .collect()
    }

    /// 所有字段的转换值组成的对象（嵌套模型使用）
    pub fn to_object(&self) -> ModelResult<DataValue> {
        Ok(DataValue::Object(self.to_data_map()?.into_iter().collect()))
    }

    /// 嵌套模型字段的原始数据
    ///
    /// 先完整转换一次，使嵌套结构中的错误带着字段路径返回
    pub fn nested_raw(&self, name: &str) -> ModelResult<DataValue> {
        let field = self.require(name)?;
        field.to_python()?;
        Ok(field.effective_raw_value().normalized())
    }

    /// 转换为 JSON 对象，键按字段声明顺序排列
    pub fn to_json_value(&self) -> ModelResult<serde_json::Value> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .to_serial_map()?
            .into_iter()
            .map(|(name, value)| (name, value.to_json_value()))
            .collect();
        Ok(serde_json::Value::Object(object))
    }

    /// 转换为 JSON 字符串
    pub fn to_json_string(&self) -> ModelResult<String> {
        serde_json::to_string(&self.to_json_value()?).map_err(|e| {
            crate::model_error!(serialization, format!("模型 {} 序列化失败: {}", self.model, e))
        })
    }
}

/// 解析模型的输入数据
///
/// 对象返回其键值；Null 返回 None，表示不填充任何字段
pub(crate) fn object_input(
    value: DataValue,
    model: &str,
) -> ModelResult<Option<HashMap<String, DataValue>>> {
    match value.normalized() {
        DataValue::Null => Ok(None),
        DataValue::Object(map) => Ok(Some(map)),
        other => Err(crate::model_error!(
            serialization,
            format!("模型 {} 的输入必须是对象，实际为 {}", model, other.type_name())
        )),
    }
}

/// 拆分嵌套模型列表字段的原始数据
pub(crate) fn array_input(value: DataValue, field: &str) -> ModelResult<Vec<DataValue>> {
    match value {
        DataValue::Null => Ok(Vec::new()),
        DataValue::Array(items) => Ok(items),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("期望数组，实际为 {}", other.type_name())
        )),
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a (String, Field);
    type IntoIter = std::slice::Iter<'a, (String, Field)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convenience::{char_field, integer_field};
    use crate::model::schema::ModelSchema;

    fn sample() -> FieldMap {
        ModelSchema::builder("Sample")
            .field("name", char_field())
            .field("code", integer_field().source("c"))
            .build()
            .unwrap()
            .instantiate()
    }

    #[test]
    fn test_populate_uses_source_key() {
        let mut fields = sample();
        let mut data = HashMap::new();
        data.insert("name".to_string(), DataValue::String("Ann".to_string()));
        data.insert("c".to_string(), DataValue::String("42".to_string()));
        data.insert("code".to_string(), DataValue::Int(7));
        fields.populate(&data);

        assert_eq!(fields.value("name").unwrap(), DataValue::String("Ann".to_string()));
        assert_eq!(fields.value("code").unwrap(), DataValue::Int(42));
    }

    #[test]
    fn test_missing_keys_populate_null() {
        let mut fields = sample();
        fields.populate(&HashMap::new());

        assert_eq!(fields.get("name").unwrap().raw_value(), Some(&DataValue::Null));
        assert_eq!(fields.value("name").unwrap(), DataValue::String(String::new()));
        assert!(fields.value("code").unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_set_and_unknown_field() {
        let mut fields = sample();
        fields.set("code", "12").unwrap();
        assert_eq!(fields.value("code").unwrap(), DataValue::Int(12));

        let err = fields.set("missing", 1).unwrap_err();
        assert!(matches!(err, crate::error::ModelError::UnknownField { .. }));
        assert!(fields.value("missing").is_err());
    }

    #[test]
    fn test_json_keeps_declaration_order() {
        let mut fields = sample();
        fields.set("code", 3).unwrap();
        fields.set("name", "x").unwrap();

        let json = fields.to_json_value().unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "code"]);
        assert_eq!(json.to_string(), r#"{"name":"x","code":3}"#);
    }
}
