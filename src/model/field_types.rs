//! 字段类型定义模块
//!
//! 定义字段的转换策略（`FieldType`）与不可变的字段模板（`FieldDefinition`）。
//! 模板在模型定义时创建一次，之后只被读取；每个模型实例持有从模板派生的独立字段单元。

use crate::error::{ModelError, ModelResult};
use crate::model::conversion::datetime_conversion::{
    format_datetime, parse_date, parse_datetime, parse_time,
};
use crate::model::schema::ModelSchema;
use crate::types::DataValue;
use std::fmt;
use std::sync::Arc;

/// 自定义字段转换策略
///
/// 内置字段类型之外的扩展点：实现该 trait 后通过 `FieldType::Custom` 声明字段。
pub trait FieldConverter: Send + Sync + fmt::Debug {
    /// 字段类型名称，用于内省
    fn type_name(&self) -> &'static str;

    /// 将原始值转换为目标值
    fn to_python(&self, raw: &DataValue, field: &str) -> ModelResult<DataValue>;

    /// 将转换后的值还原为可序列化的形式
    fn to_serial(&self, value: &DataValue, _field: &str) -> ModelResult<DataValue> {
        Ok(value.clone())
    }

    /// 字段未填充时的值
    fn empty_value(&self) -> DataValue {
        DataValue::Null
    }
}

/// 嵌套模型的模式引用
///
/// `Static` 在转换时才解析，允许模型引用自身（树形结构等）
#[derive(Clone)]
pub enum SchemaRef {
    /// 由 `define_model!` 定义的模型
    Static(fn() -> Arc<ModelSchema>),
    /// 运行时构建的模式
    Shared(Arc<ModelSchema>),
}

impl SchemaRef {
    /// 解析为模式
    pub fn resolve(&self) -> Arc<ModelSchema> {
        match self {
            SchemaRef::Static(schema_fn) => schema_fn(),
            SchemaRef::Shared(schema) => schema.clone(),
        }
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 不在这里解析 Static 引用，避免自引用模型递归
        match self {
            SchemaRef::Static(_) => write!(f, "SchemaRef::Static"),
            SchemaRef::Shared(schema) => write!(f, "SchemaRef::Shared({})", schema.name()),
        }
    }
}

/// 字段类型枚举（转换策略）
#[derive(Debug, Clone)]
pub enum FieldType {
    /// 基础字段：原样返回原始值
    Base,
    /// 字符串字段
    Char,
    /// 整数字段
    Integer,
    /// 浮点数字段
    Float,
    /// 布尔字段
    Boolean,
    /// 日期时间字段
    DateTime {
        format: Option<String>,
        timezone_offset: Option<String>,
    },
    /// 日期字段
    Date { format: Option<String> },
    /// 时间字段
    Time { format: Option<String> },
    /// UUID字段
    Uuid,
    /// 嵌套模型字段
    Model { schema: SchemaRef },
    /// 嵌套模型列表字段
    ModelCollection { schema: SchemaRef },
    /// 同类字段列表
    FieldCollection { item_type: Box<FieldType> },
    /// 自定义转换策略
    Custom(Arc<dyn FieldConverter>),
}

impl FieldType {
    /// 字段类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Base => "FieldBase",
            FieldType::Char => "CharField",
            FieldType::Integer => "IntegerField",
            FieldType::Float => "FloatField",
            FieldType::Boolean => "BooleanField",
            FieldType::DateTime { .. } => "DateTimeField",
            FieldType::Date { .. } => "DateField",
            FieldType::Time { .. } => "TimeField",
            FieldType::Uuid => "UuidField",
            FieldType::Model { .. } => "ModelField",
            FieldType::ModelCollection { .. } => "ModelCollectionField",
            FieldType::FieldCollection { .. } => "FieldCollectionField",
            FieldType::Custom(converter) => converter.type_name(),
        }
    }

    /// 字段未填充时的值
    ///
    /// 字符串为空串，数值为零，布尔为 false，列表为空；其余类型没有通用的空值，返回 Null
    pub fn empty_value(&self) -> DataValue {
        match self {
            FieldType::Char => DataValue::String(String::new()),
            FieldType::Integer => DataValue::Int(0),
            FieldType::Float => DataValue::Float(0.0),
            FieldType::Boolean => DataValue::Bool(false),
            FieldType::ModelCollection { .. } | FieldType::FieldCollection { .. } => {
                DataValue::Array(Vec::new())
            }
            FieldType::Custom(converter) => converter.empty_value(),
            FieldType::Base
            | FieldType::DateTime { .. }
            | FieldType::Date { .. }
            | FieldType::Time { .. }
            | FieldType::Uuid
            | FieldType::Model { .. } => DataValue::Null,
        }
    }

    /// 将原始值转换为目标类型
    ///
    /// 纯函数：相同的原始值总是得到相同的结果
    pub fn to_python(&self, raw: &DataValue, field: &str) -> ModelResult<DataValue> {
        match self {
            FieldType::Base => Ok(raw.clone()),
            FieldType::Char => Ok(DataValue::String(to_text(raw))),
            FieldType::Integer => to_integer(raw, field).map(DataValue::Int),
            FieldType::Float => to_float(raw, field).map(DataValue::Float),
            FieldType::Boolean => Ok(DataValue::Bool(to_bool(raw))),
            FieldType::DateTime { format, timezone_offset } => {
                reject_null(raw, field, "日期时间")?;
                let config = crate::config::conversion_config();
                parse_datetime(raw, format.as_deref(), timezone_offset.as_deref(), &config, field)
                    .map(DataValue::DateTime)
            }
            FieldType::Date { format } => {
                reject_null(raw, field, "日期")?;
                let config = crate::config::conversion_config();
                parse_date(raw, format.as_deref(), &config, field).map(DataValue::Date)
            }
            FieldType::Time { format } => {
                reject_null(raw, field, "时间")?;
                let config = crate::config::conversion_config();
                parse_time(raw, format.as_deref(), &config, field).map(DataValue::Time)
            }
            FieldType::Uuid => to_uuid(raw, field).map(DataValue::Uuid),
            FieldType::Model { schema } => match raw.normalized() {
                DataValue::Null => Ok(DataValue::Null),
                other => nested_to_python(&schema.resolve(), other, field),
            },
            FieldType::ModelCollection { schema } => {
                let schema = schema.resolve();
                collection_items(raw, field)?
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        nested_to_python(&schema, item, &format!("{}[{}]", field, index))
                    })
                    .collect::<ModelResult<Vec<_>>>()
                    .map(DataValue::Array)
            }
            FieldType::FieldCollection { item_type } => collection_items(raw, field)?
                .into_iter()
                .enumerate()
                .map(|(index, item)| item_type.to_python(&item, &format!("{}[{}]", field, index)))
                .collect::<ModelResult<Vec<_>>>()
                .map(DataValue::Array),
            FieldType::Custom(converter) => converter.to_python(raw, field),
        }
    }

    /// 将转换后的值还原为可序列化（JSON 友好）的形式
    pub fn to_serial(&self, value: &DataValue, field: &str) -> ModelResult<DataValue> {
        match (self, value) {
            (FieldType::Custom(converter), _) => converter.to_serial(value, field),
            (_, DataValue::Null) => Ok(DataValue::Null),
            (FieldType::DateTime { format, .. }, DataValue::DateTime(dt)) => {
                Ok(DataValue::String(format_datetime(dt, format.as_deref())))
            }
            (FieldType::Date { format }, DataValue::Date(date)) => {
                let config = crate::config::conversion_config();
                let format = format.as_deref().unwrap_or(&config.date_format);
                Ok(DataValue::String(date.format(format).to_string()))
            }
            (FieldType::Time { format }, DataValue::Time(time)) => {
                let config = crate::config::conversion_config();
                let format = format.as_deref().unwrap_or(&config.time_format);
                Ok(DataValue::String(time.format(format).to_string()))
            }
            (FieldType::Uuid, DataValue::Uuid(uuid)) => Ok(DataValue::String(uuid.to_string())),
            (FieldType::Model { schema }, DataValue::Object(_)) => {
                nested_to_serial(&schema.resolve(), value, field)
            }
            (FieldType::ModelCollection { schema }, DataValue::Array(items)) => {
                let schema = schema.resolve();
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        nested_to_serial(&schema, item, &format!("{}[{}]", field, index))
                    })
                    .collect::<ModelResult<Vec<_>>>()
                    .map(DataValue::Array)
            }
            (FieldType::FieldCollection { item_type }, DataValue::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| item_type.to_serial(item, &format!("{}[{}]", field, index)))
                .collect::<ModelResult<Vec<_>>>()
                .map(DataValue::Array),
            (_, other) => Ok(other.clone()),
        }
    }
}

/// 字段定义（模板）
///
/// 模型定义后不再修改；多个模型实例通过 `Arc` 共享同一份模板。
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// 字段类型
    pub field_type: FieldType,
    /// 原始数据中的查找键；None 表示使用字段声明名
    pub source: Option<String>,
    /// 默认值：原始值缺失或为 null 时代替原始值参与转换
    pub default: Option<DataValue>,
    /// 字段描述
    pub description: Option<String>,
}

impl FieldDefinition {
    /// 创建新的字段定义
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            source: None,
            default: None,
            description: None,
        }
    }

    /// 设置原始数据中的来源键
    pub fn source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// 设置默认值
    pub fn default_value<V: Into<DataValue>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 设置默认值（别名方法，提供更直观的API）
    pub fn with_default<V: Into<DataValue>>(self, value: V) -> Self {
        self.default_value(value)
    }

    /// 设置字段描述
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// 字段类型名称
    pub fn type_name(&self) -> &'static str {
        self.field_type.type_name()
    }

    /// 在原始数据中查找时使用的键
    pub fn lookup_key<'a>(&'a self, name: &'a str) -> &'a str {
        self.source.as_deref().unwrap_or(name)
    }
}

/// 原始值是否为缺失标记
pub(crate) fn is_absent(raw: &DataValue) -> bool {
    matches!(raw, DataValue::Null | DataValue::Json(serde_json::Value::Null))
}

fn reject_null(raw: &DataValue, field: &str, expected: &str) -> ModelResult<()> {
    if is_absent(raw) {
        return Err(crate::model_error!(
            conversion,
            field,
            format!("缺失值无法转换为{}", expected)
        ));
    }
    Ok(())
}

fn to_text(raw: &DataValue) -> String {
    match raw.normalized() {
        // 缺失值映射为空字符串，而不是 "null"
        DataValue::Null => String::new(),
        DataValue::String(s) => s,
        // NaN 与无穷大没有 JSON 表示
        DataValue::Float(f) if !f.is_finite() => f.to_string(),
        other => match other.to_json_value() {
            serde_json::Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

fn to_integer(raw: &DataValue, field: &str) -> ModelResult<i64> {
    match raw.normalized() {
        DataValue::Int(i) => Ok(i),
        DataValue::UInt(u) => i64::try_from(u).map_err(|_| {
            crate::model_error!(conversion, field, format!("整数 {} 超出 i64 范围", u))
        }),
        DataValue::Float(f) => {
            let truncated = f.trunc();
            if f.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                Ok(truncated as i64)
            } else {
                Err(crate::model_error!(conversion, field, format!("浮点数 {} 无法转换为整数", f)))
            }
        }
        DataValue::Bool(b) => Ok(i64::from(b)),
        DataValue::String(s) => s.trim().parse::<i64>().map_err(|e| {
            crate::model_error!(conversion, field, format!("'{}' 不是有效的十进制整数: {}", s, e))
        }),
        DataValue::Null => Err(crate::model_error!(conversion, field, "缺失值无法转换为整数")),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为整数", other.type_name())
        )),
    }
}

fn to_float(raw: &DataValue, field: &str) -> ModelResult<f64> {
    match raw.normalized() {
        DataValue::Float(f) => Ok(f),
        DataValue::Int(i) => Ok(i as f64),
        DataValue::UInt(u) => Ok(u as f64),
        DataValue::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        DataValue::String(s) => s.trim().parse::<f64>().map_err(|e| {
            crate::model_error!(conversion, field, format!("'{}' 不是有效的浮点数: {}", s, e))
        }),
        DataValue::Null => Err(crate::model_error!(conversion, field, "缺失值无法转换为浮点数")),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为浮点数", other.type_name())
        )),
    }
}

fn to_bool(raw: &DataValue) -> bool {
    match raw.normalized() {
        DataValue::Null => false,
        DataValue::Bool(b) => b,
        DataValue::String(s) => !(s.is_empty() || s.eq_ignore_ascii_case("false")),
        DataValue::Int(i) => i != 0,
        DataValue::UInt(u) => u != 0,
        DataValue::Float(f) => f != 0.0,
        DataValue::Bytes(b) => !b.is_empty(),
        DataValue::Array(items) => !items.is_empty(),
        DataValue::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn to_uuid(raw: &DataValue, field: &str) -> ModelResult<uuid::Uuid> {
    match raw.normalized() {
        DataValue::Uuid(u) => Ok(u),
        DataValue::String(s) => uuid::Uuid::parse_str(s.trim()).map_err(|e| {
            crate::model_error!(conversion, field, format!("无效的UUID格式: '{}' ({})", s, e))
        }),
        DataValue::Null => Err(crate::model_error!(conversion, field, "缺失值无法转换为UUID")),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为UUID", other.type_name())
        )),
    }
}

/// 列表字段的原始元素；缺失值视为空列表
fn collection_items(raw: &DataValue, field: &str) -> ModelResult<Vec<DataValue>> {
    match raw.normalized() {
        DataValue::Null => Ok(Vec::new()),
        DataValue::Array(items) => Ok(items),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("期望数组，实际为 {}", other.type_name())
        )),
    }
}

fn nested_to_python(schema: &ModelSchema, raw: DataValue, field: &str) -> ModelResult<DataValue> {
    let data = match raw.normalized() {
        DataValue::Object(map) => map,
        other => {
            return Err(crate::model_error!(
                conversion,
                field,
                format!("嵌套模型 {} 期望对象，实际为 {}", schema.name(), other.type_name())
            ));
        }
    };

    let mut fields = schema.instantiate();
    fields.populate(&data);
    fields
        .to_object()
        .map_err(|e| nest_error(e, field))
}

fn nested_to_serial(schema: &ModelSchema, value: &DataValue, field: &str) -> ModelResult<DataValue> {
    let object = match value {
        DataValue::Object(map) => map,
        DataValue::Null => return Ok(DataValue::Null),
        other => {
            return Err(crate::model_error!(
                conversion,
                field,
                format!("嵌套模型 {} 期望对象，实际为 {}", schema.name(), other.type_name())
            ));
        }
    };

    // 按模式字段顺序输出
    let mut serial = serde_json::Map::with_capacity(object.len());
    for (name, definition) in schema.fields() {
        let child = object.get(name).cloned().unwrap_or(DataValue::Null);
        let path = format!("{}.{}", field, name);
        let value = definition.field_type.to_serial(&child, &path)?;
        serial.insert(name.to_string(), value.to_json_value());
    }
    Ok(DataValue::Json(serde_json::Value::Object(serial)))
}

/// 为嵌套字段的转换错误加上外层字段路径
pub(crate) fn nest_error(error: ModelError, outer: &str) -> ModelError {
    match error {
        ModelError::ConversionError { field, message } => ModelError::ConversionError {
            field: format!("{}.{}", outer, field),
            message,
        },
        other => other,
    }
}
