//! 基础行为测试：模型创建、字段收集、来源键以及字符串/整数字段转换

use rat_quickmodel::*;

define_model! {
    struct SimpleModel {
        name: String = char_field(),
        field_with_source: String = char_field().source("foo"),
    }
}

/// 模型实例应为 SimpleModel 类型
#[test]
fn test_class_created() {
    let instance = SimpleModel::new();
    let _: &SimpleModel = &instance;
    assert_eq!(SimpleModel::model_name(), "SimpleModel");
}

/// 模型实例应持有字段集合
#[test]
fn test_fields_created() {
    let instance = SimpleModel::new();
    assert_eq!(instance.fields().len(), 2);
    assert_eq!(instance.fields().model_name(), "SimpleModel");
}

/// 收集到的字段应为正确的类型
#[test]
fn test_field_collected() {
    let instance = SimpleModel::new();
    let field = instance.fields().get("name").unwrap();
    assert!(matches!(field.field_type(), FieldType::Char));
    assert_eq!(field.type_name(), "CharField");
}

/// 未指定来源键的字段 source 为 None
#[test]
fn test_field_source_not_set() {
    let instance = SimpleModel::new();
    assert_eq!(instance.fields().get("name").unwrap().source(), None);
}

/// 指定了来源键的字段 source 应为该值
#[test]
fn test_field_source_set() {
    let instance = SimpleModel::new();
    assert_eq!(
        instance.fields().get("field_with_source").unwrap().source(),
        Some("foo")
    );
}

#[test]
fn test_field_without_provided_source() {
    let field = Field::new(field_base());
    assert!(field.source().is_none());
}

#[test]
fn test_field_with_provided_source() {
    let field = Field::new(field_base().source("customsource"));
    assert_eq!(field.source(), Some("customsource"));
}

#[test]
fn test_char_field_string_conversion() {
    let mut field = Field::new(char_field());
    field.populate("somestring");
    assert_eq!(field.to_python().unwrap(), DataValue::String("somestring".to_string()));
}

/// 字符串字段把缺失值转换为空字符串
#[test]
fn test_char_field_none_conversion() {
    let mut field = Field::new(char_field());
    field.populate(DataValue::Null);
    assert_eq!(field.to_python().unwrap(), DataValue::String(String::new()));
}

#[test]
fn test_integer_field_string_conversion() {
    let mut field = Field::new(integer_field());
    field.populate("123");
    assert_eq!(field.to_python().unwrap(), DataValue::Int(123));
}

#[test]
fn test_source_lookup_when_populating() {
    let instance = SimpleModel::from_data(&data_map! { "name" => "Ann", "foo" => "bar" });
    assert_eq!(instance.name().unwrap(), "Ann");
    assert_eq!(instance.field_with_source().unwrap(), "bar");

    // 以字段名作为键时不会匹配到带来源键的字段
    let instance = SimpleModel::from_data(&data_map! { "field_with_source" => "bar" });
    assert_eq!(instance.field_with_source().unwrap(), "");
}
