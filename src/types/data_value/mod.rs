use base64::Engine;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 通用数据值类型 - 原始输入与转换结果的统一表示
///
/// 原始数据进入模型时以 `DataValue` 保存，只有在字段转换时才收窄到具体类型。
/// `DataValue::Null` 即"缺失值"标记：输入中不存在的键与显式的 null 等价。
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 字节数组
    Bytes(Vec<u8>),
    /// 日期时间
    DateTime(DateTime<FixedOffset>),
    /// 日期
    Date(NaiveDate),
    /// 时间
    Time(NaiveTime),
    /// UUID
    Uuid(Uuid),
    /// JSON 值（未拆解的原始 JSON）
    Json(serde_json::Value),
    /// 数组
    Array(Vec<DataValue>),
    /// 对象/文档
    Object(HashMap<String, DataValue>),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::UInt(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Bytes(bytes) => write!(f, "[{} bytes]", bytes.len()),
            DataValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            DataValue::Date(d) => write!(f, "{}", d),
            DataValue::Time(t) => write!(f, "{}", t),
            DataValue::Uuid(uuid) => write!(f, "{}", uuid),
            DataValue::Json(json) => write!(f, "{}", json),
            DataValue::Array(_) | DataValue::Object(_) => write!(f, "{}", self.to_json_value()),
        }
    }
}

impl std::fmt::Debug for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug 和 Display 保持一致，显示实际值而不是类型构造函数
        write!(f, "{}", self)
    }
}

impl Default for DataValue {
    fn default() -> Self {
        DataValue::Null
    }
}

impl DataValue {
    /// 获取数据类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "integer",
            DataValue::UInt(_) => "unsigned_integer",
            DataValue::Float(_) => "float",
            DataValue::String(_) => "string",
            DataValue::Bytes(_) => "bytes",
            DataValue::DateTime(_) => "datetime",
            DataValue::Date(_) => "date",
            DataValue::Time(_) => "time",
            DataValue::Uuid(_) => "uuid",
            DataValue::Json(_) => "json",
            DataValue::Array(_) => "array",
            DataValue::Object(_) => "object",
        }
    }

    /// 判断是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// 将 `Json` 包装拆解为对应的原生变体，其余值原样返回
    pub fn normalized(&self) -> DataValue {
        match self {
            DataValue::Json(json) => json_value_to_data_value(json.clone()),
            other => other.clone(),
        }
    }

    /// 转换为 JSON 值
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            DataValue::Null => serde_json::Value::Null,
            DataValue::Bool(b) => serde_json::Value::Bool(*b),
            DataValue::Int(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            DataValue::UInt(u) => serde_json::Value::Number(serde_json::Number::from(*u)),
            DataValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DataValue::String(s) => serde_json::Value::String(s.clone()),
            // 字节数组转换为 base64 字符串
            DataValue::Bytes(b) => serde_json::Value::String(
                base64::engine::general_purpose::STANDARD.encode(b),
            ),
            DataValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            DataValue::Date(d) => serde_json::Value::String(d.to_string()),
            DataValue::Time(t) => serde_json::Value::String(t.to_string()),
            DataValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            DataValue::Json(j) => j.clone(),
            DataValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(|item| item.to_json_value()).collect())
            }
            DataValue::Object(obj) => {
                let json_object: serde_json::Map<String, serde_json::Value> = obj
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect();
                serde_json::Value::Object(json_object)
            }
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json_string(&self) -> Result<String, crate::error::ModelError> {
        serde_json::to_string(&self.to_json_value()).map_err(|e| {
            crate::model_error!(serialization, format!("DataValue 转换为 JSON 失败: {}", e))
        })
    }

    /// 从 JSON 字符串解析为自然对应的 DataValue
    pub fn from_json_string(json: &str) -> Result<Self, crate::error::ModelError> {
        serde_json::from_str::<serde_json::Value>(json)
            .map(json_value_to_data_value)
            .map_err(|e| {
                crate::model_error!(serialization, format!("JSON 解析为 DataValue 失败: {}", e))
            })
    }

    /// 期望Object类型，如果不是则返回错误
    pub fn expect_object(self) -> Result<HashMap<String, DataValue>, crate::error::ModelError> {
        match self.normalized() {
            DataValue::Object(map) => Ok(map),
            other => Err(crate::model_error!(
                serialization,
                format!("期望Object类型，但收到: {}", other.type_name())
            )),
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        DataValue::UInt(value)
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Float(value as f64)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for DataValue {
    fn from(value: Vec<u8>) -> Self {
        DataValue::Bytes(value)
    }
}

impl From<DateTime<Utc>> for DataValue {
    fn from(value: DateTime<Utc>) -> Self {
        DataValue::DateTime(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for DataValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DataValue::DateTime(value)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        DataValue::Time(value)
    }
}

impl From<Uuid> for DataValue {
    fn from(value: Uuid) -> Self {
        DataValue::Uuid(value)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        DataValue::Json(value)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(value: Vec<DataValue>) -> Self {
        DataValue::Array(value)
    }
}

impl From<HashMap<String, DataValue>> for DataValue {
    fn from(value: HashMap<String, DataValue>) -> Self {
        DataValue::Object(value)
    }
}

impl<T> From<Option<T>> for DataValue
where
    T: Into<DataValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DataValue::Null,
        }
    }
}

/// 将 serde_json::Value 正确转换为对应的 DataValue 类型
/// 而不是简单包装为 DataValue::Json
pub fn json_value_to_data_value(value: serde_json::Value) -> DataValue {
    match value {
        serde_json::Value::Null => DataValue::Null,
        serde_json::Value::Bool(b) => DataValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                DataValue::UInt(u)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => DataValue::String(s),
        serde_json::Value::Array(arr) => {
            DataValue::Array(arr.into_iter().map(json_value_to_data_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let data_object: HashMap<String, DataValue> = obj
                .into_iter()
                .map(|(k, v)| (k, json_value_to_data_value(v)))
                .collect();
            DataValue::Object(data_object)
        }
    }
}

/// 将 JSON 对象转换为数据映射
///
/// 非对象的 JSON 值返回序列化错误
pub fn json_object_to_data_map(
    value: serde_json::Value,
) -> Result<HashMap<String, DataValue>, crate::error::ModelError> {
    json_value_to_data_value(value).expect_object()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_value_to_data_value() {
        let value = json_value_to_data_value(json!({
            "name": "Ann",
            "age": 42,
            "big": u64::MAX,
            "ratio": 0.5,
            "tags": ["a", null],
        }));

        let map = value.expect_object().unwrap();
        assert_eq!(map["name"], DataValue::String("Ann".to_string()));
        assert_eq!(map["age"], DataValue::Int(42));
        assert_eq!(map["big"], DataValue::UInt(u64::MAX));
        assert_eq!(map["ratio"], DataValue::Float(0.5));
        assert_eq!(
            map["tags"],
            DataValue::Array(vec![DataValue::String("a".to_string()), DataValue::Null])
        );
    }

    #[test]
    fn test_display_matches_text_form() {
        assert_eq!(DataValue::Null.to_string(), "null");
        assert_eq!(DataValue::Int(-7).to_string(), "-7");
        assert_eq!(DataValue::String("abc".to_string()).to_string(), "abc");
        assert_eq!(
            DataValue::Array(vec![DataValue::Int(1), DataValue::Bool(true)]).to_string(),
            "[1,true]"
        );
    }

    #[test]
    fn test_expect_object_rejects_scalars() {
        assert!(DataValue::Int(1).expect_object().is_err());
        assert!(DataValue::Json(json!({"a": 1})).expect_object().is_ok());
        assert!(json_object_to_data_map(json!([1, 2])).is_err());
    }

    #[test]
    fn test_bytes_serialize_as_base64() {
        let value = DataValue::Bytes(b"hi".to_vec());
        assert_eq!(value.to_json_value(), json!("aGk="));
    }
}
