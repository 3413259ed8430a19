//! 基础类型的 ToDataValue / FromDataValue 实现
//!
//! 为 String、数值类型、布尔类型、时间类型等实现双向转换

use crate::error::ModelResult;
use crate::model::conversion::to_data_value::type_mismatch;
use crate::model::conversion::{FromDataValue, ToDataValue};
use crate::types::DataValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;

// 字符串类型实现
impl ToDataValue for String {
    fn to_data_value(&self) -> DataValue {
        DataValue::String(self.clone())
    }
}

impl ToDataValue for &str {
    fn to_data_value(&self) -> DataValue {
        DataValue::String(self.to_string())
    }
}

// 整数类型实现
impl ToDataValue for i32 {
    fn to_data_value(&self) -> DataValue {
        DataValue::Int(*self as i64)
    }
}

impl ToDataValue for i64 {
    fn to_data_value(&self) -> DataValue {
        DataValue::Int(*self)
    }
}

impl ToDataValue for u64 {
    fn to_data_value(&self) -> DataValue {
        DataValue::UInt(*self)
    }
}

// 浮点类型实现
impl ToDataValue for f32 {
    fn to_data_value(&self) -> DataValue {
        DataValue::Float(*self as f64)
    }
}

impl ToDataValue for f64 {
    fn to_data_value(&self) -> DataValue {
        DataValue::Float(*self)
    }
}

// 布尔类型实现
impl ToDataValue for bool {
    fn to_data_value(&self) -> DataValue {
        DataValue::Bool(*self)
    }
}

// DateTime类型实现
impl ToDataValue for DateTime<Utc> {
    fn to_data_value(&self) -> DataValue {
        DataValue::DateTime(self.fixed_offset())
    }
}

impl ToDataValue for DateTime<FixedOffset> {
    fn to_data_value(&self) -> DataValue {
        DataValue::DateTime(*self)
    }
}

impl ToDataValue for NaiveDate {
    fn to_data_value(&self) -> DataValue {
        DataValue::Date(*self)
    }
}

impl ToDataValue for NaiveTime {
    fn to_data_value(&self) -> DataValue {
        DataValue::Time(*self)
    }
}

// UUID类型实现
impl ToDataValue for uuid::Uuid {
    fn to_data_value(&self) -> DataValue {
        DataValue::Uuid(*self)
    }
}

// JsonValue类型实现
impl ToDataValue for serde_json::Value {
    fn to_data_value(&self) -> DataValue {
        DataValue::Json(self.clone())
    }
}

impl ToDataValue for DataValue {
    fn to_data_value(&self) -> DataValue {
        self.clone()
    }
}

// Option类型实现
impl<T> ToDataValue for Option<T>
where
    T: ToDataValue,
{
    fn to_data_value(&self) -> DataValue {
        match self {
            Some(v) => v.to_data_value(),
            None => DataValue::Null,
        }
    }
}

impl<T> ToDataValue for Vec<T>
where
    T: ToDataValue,
{
    fn to_data_value(&self) -> DataValue {
        DataValue::Array(self.iter().map(ToDataValue::to_data_value).collect())
    }
}

impl<T> ToDataValue for HashMap<String, T>
where
    T: ToDataValue,
{
    fn to_data_value(&self) -> DataValue {
        DataValue::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_data_value()))
                .collect(),
        )
    }
}

impl FromDataValue for DataValue {
    fn from_data_value(value: DataValue, _field: &str) -> ModelResult<Self> {
        Ok(value)
    }
}

impl FromDataValue for String {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::String(s) => Ok(s),
            other => Err(type_mismatch(field, "字符串", &other)),
        }
    }
}

impl FromDataValue for i64 {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Int(i) => Ok(i),
            DataValue::UInt(u) => i64::try_from(u).map_err(|_| {
                crate::model_error!(conversion, field, format!("整数 {} 超出 i64 范围", u))
            }),
            other => Err(type_mismatch(field, "整数", &other)),
        }
    }
}

impl FromDataValue for i32 {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        let wide = i64::from_data_value(value, field)?;
        i32::try_from(wide).map_err(|_| {
            crate::model_error!(conversion, field, format!("整数 {} 超出 i32 范围", wide))
        })
    }
}

impl FromDataValue for u64 {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::UInt(u) => Ok(u),
            DataValue::Int(i) => u64::try_from(i).map_err(|_| {
                crate::model_error!(conversion, field, format!("整数 {} 不能为负数", i))
            }),
            other => Err(type_mismatch(field, "无符号整数", &other)),
        }
    }
}

impl FromDataValue for f64 {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Float(f) => Ok(f),
            DataValue::Int(i) => Ok(i as f64),
            DataValue::UInt(u) => Ok(u as f64),
            other => Err(type_mismatch(field, "浮点数", &other)),
        }
    }
}

impl FromDataValue for bool {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Bool(b) => Ok(b),
            other => Err(type_mismatch(field, "布尔值", &other)),
        }
    }
}

impl FromDataValue for DateTime<FixedOffset> {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::DateTime(dt) => Ok(dt),
            other => Err(type_mismatch(field, "日期时间", &other)),
        }
    }
}

impl FromDataValue for DateTime<Utc> {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        DateTime::<FixedOffset>::from_data_value(value, field).map(|dt| dt.with_timezone(&Utc))
    }
}

impl FromDataValue for NaiveDate {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Date(d) => Ok(d),
            other => Err(type_mismatch(field, "日期", &other)),
        }
    }
}

impl FromDataValue for NaiveTime {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Time(t) => Ok(t),
            other => Err(type_mismatch(field, "时间", &other)),
        }
    }
}

impl FromDataValue for uuid::Uuid {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Uuid(u) => Ok(u),
            other => Err(type_mismatch(field, "UUID", &other)),
        }
    }
}

impl FromDataValue for serde_json::Value {
    fn from_data_value(value: DataValue, _field: &str) -> ModelResult<Self> {
        Ok(value.to_json_value())
    }
}

impl FromDataValue for HashMap<String, DataValue> {
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value.normalized() {
            DataValue::Object(map) => Ok(map),
            other => Err(type_mismatch(field, "对象", &other)),
        }
    }
}

impl<T> FromDataValue for Option<T>
where
    T: FromDataValue,
{
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value {
            DataValue::Null => Ok(None),
            other => T::from_data_value(other, field).map(Some),
        }
    }
}

impl<T> FromDataValue for Vec<T>
where
    T: FromDataValue,
{
    fn from_data_value(value: DataValue, field: &str) -> ModelResult<Self> {
        match value.normalized() {
            DataValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| T::from_data_value(item, &format!("{}[{}]", field, index)))
                .collect(),
            other => Err(type_mismatch(field, "数组", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_conversions() {
        assert_eq!(i64::from_data_value(DataValue::UInt(7), "n").unwrap(), 7);
        assert!(i64::from_data_value(DataValue::UInt(u64::MAX), "n").is_err());
        assert!(i32::from_data_value(DataValue::Int(i64::MAX), "n").is_err());
        assert!(u64::from_data_value(DataValue::Int(-1), "n").is_err());
        assert_eq!(f64::from_data_value(DataValue::Int(2), "n").unwrap(), 2.0);
        assert_eq!(
            Option::<String>::from_data_value(DataValue::Null, "s").unwrap(),
            None
        );
    }

    #[test]
    fn test_vec_errors_report_index() {
        let value = DataValue::Array(vec![DataValue::Int(1), DataValue::String("x".to_string())]);
        let err = Vec::<i64>::from_data_value(value, "codes").unwrap_err();
        assert_eq!(err.field(), Some("codes[1]"));
    }

    #[test]
    fn test_to_data_value_collections() {
        let values = vec![Some(1i64), None];
        assert_eq!(
            values.to_data_value(),
            DataValue::Array(vec![DataValue::Int(1), DataValue::Null])
        );
    }
}
