//! 模型相关的宏定义
//!
//! 提供便捷的宏来定义模型、字段类型以及原始数据

/// 便捷宏：定义模型字段类型
#[macro_export]
macro_rules! field_types {
    (base) => {
        $crate::model::field_types::FieldType::Base
    };
    (char) => {
        $crate::model::field_types::FieldType::Char
    };
    (integer) => {
        $crate::model::field_types::FieldType::Integer
    };
    (float) => {
        $crate::model::field_types::FieldType::Float
    };
    (boolean) => {
        $crate::model::field_types::FieldType::Boolean
    };
    (uuid) => {
        $crate::model::field_types::FieldType::Uuid
    };
    (datetime) => {
        $crate::model::field_types::FieldType::DateTime {
            format: None,
            timezone_offset: None,
        }
    };
    (datetime, format = $format:expr) => {
        $crate::model::field_types::FieldType::DateTime {
            format: Some($format.to_string()),
            timezone_offset: None,
        }
    };
    (date) => {
        $crate::model::field_types::FieldType::Date { format: None }
    };
    (time) => {
        $crate::model::field_types::FieldType::Time { format: None }
    };
    (model, $model:ty) => {
        $crate::model::field_types::FieldType::Model {
            schema: $crate::model::field_types::SchemaRef::Static(
                <$model as $crate::model::traits::Model>::schema,
            ),
        }
    };
    (collection, $item_type:expr) => {
        $crate::model::field_types::FieldType::FieldCollection {
            item_type: Box::new($item_type),
        }
    };
}

/// 便捷宏：构造原始数据映射
///
/// ```ignore
/// let data = data_map! { "name" => "Ann", "c" => "42" };
/// ```
#[macro_export]
macro_rules! data_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = std::collections::HashMap::<String, $crate::types::DataValue>::new();
        $(
            map.insert(
                $key.to_string(),
                $crate::model::conversion::ToDataValue::to_data_value(&$value),
            );
        )*
        map
    }};
}

/// 与 `Model` trait 方法或派生实现同名的名称，不能作为字段访问器
#[doc(hidden)]
pub const RESERVED_ACCESSOR_NAMES: &[&str] = &[
    "schema",
    "from_field_map",
    "fields",
    "fields_mut",
    "model_name",
    "new",
    "from_data",
    "from_data_value",
    "from_json_value",
    "from_json_str",
    "value",
    "get",
    "get_model",
    "get_models",
    "set",
    "to_data_map",
    "to_serial_map",
    "to_json_value",
    "to_json_string",
    "default",
    "clone",
];

/// 字段名是否与保留的方法名冲突（编译期检查使用）
#[doc(hidden)]
pub const fn is_reserved_accessor(name: &str) -> bool {
    let name = name.as_bytes();
    let mut i = 0;
    while i < RESERVED_ACCESSOR_NAMES.len() {
        let candidate = RESERVED_ACCESSOR_NAMES[i].as_bytes();
        if candidate.len() == name.len() {
            let mut j = 0;
            while j < name.len() && candidate[j] == name[j] {
                j += 1;
            }
            if j == name.len() {
                return true;
            }
        }
        i += 1;
    }
    false
}

/// 便捷宏：定义模型
///
/// 每个字段声明为 `名称: 访问器返回类型 = 字段定义`，字段按声明顺序收集；
/// `extends` 列出的基类模型字段排在前面。
///
/// 日期、时间、UUID 与嵌套模型字段缺失时转换为 `Null`，访问器类型应声明为 `Option<T>`，
/// 否则未填充实例的访问器返回 `ConversionError`。字段名不能与 `Model` 的方法同名
/// （`new`、`fields`、`value` 等），否则编译失败。
///
/// ```ignore
/// define_model! {
///     pub struct Person {
///         name: String = char_field(),
///         code: i64 = integer_field().source("c"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(extends $($base:ty),+ )? {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $field_type:ty = $field_def:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            fields: $crate::model::field_map::FieldMap,
        }

        impl $crate::model::traits::Model for $name {
            fn schema() -> std::sync::Arc<$crate::model::schema::ModelSchema> {
                // 字段收集只在首次使用该类型时执行一次
                static SCHEMA: std::sync::OnceLock<std::sync::Arc<$crate::model::schema::ModelSchema>> =
                    std::sync::OnceLock::new();

                SCHEMA
                    .get_or_init(|| {
                        let builder = $crate::model::schema::ModelSchema::builder(stringify!($name))
                            $($(.extends(<$base as $crate::model::traits::Model>::schema()))+)?
                            $(.field(stringify!($field), $field_def))*;

                        match builder.build() {
                            Ok(schema) => {
                                let schema = std::sync::Arc::new(schema);
                                $crate::manager::register_model(schema.clone());
                                $crate::debug_log!("✅ 模型自动注册成功: {}", stringify!($name));
                                schema
                            }
                            Err(e) => panic!("❌ 模型定义失败: {}", e),
                        }
                    })
                    .clone()
            }

            fn from_field_map(fields: $crate::model::field_map::FieldMap) -> Self {
                Self { fields }
            }

            fn fields(&self) -> &$crate::model::field_map::FieldMap {
                &self.fields
            }

            fn fields_mut(&mut self) -> &mut $crate::model::field_map::FieldMap {
                &mut self.fields
            }
        }

        const _: () = {
            $(
                assert!(
                    !$crate::model::macros::is_reserved_accessor(stringify!($field)),
                    "❌ 字段名与 Model 方法同名，无法生成访问器"
                );
            )*
        };

        impl $name {
            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> $crate::error::ModelResult<$field_type> {
                    <Self as $crate::model::traits::Model>::get::<$field_type>(self, stringify!($field))
                }
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::model::traits::Model>::new()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::model::convenience::*;
    use crate::model::field_types::FieldType;
    use crate::model::traits::Model;
    use crate::types::DataValue;

    crate::define_model! {
        struct Tagged {
            label: String = char_field(),
            tags: Vec<i64> = field_collection_field(crate::field_types!(integer)),
        }
    }

    crate::define_model! {
        /// 树形结构：子节点引用自身
        struct TreeNode {
            name: String = char_field(),
            children: DataValue = model_collection_field::<TreeNode>(),
        }
    }

    crate::define_model! {
        struct Stamp {
            token: Option<uuid::Uuid> = uuid_field(),
            seen: uuid::Uuid = uuid_field(),
        }
    }

    #[test]
    fn test_reserved_accessor_names() {
        assert!(crate::model::macros::is_reserved_accessor("new"));
        assert!(crate::model::macros::is_reserved_accessor("fields"));
        assert!(crate::model::macros::is_reserved_accessor("value"));
        assert!(crate::model::macros::is_reserved_accessor("schema"));
        assert!(!crate::model::macros::is_reserved_accessor("values"));
        assert!(!crate::model::macros::is_reserved_accessor("name"));
        assert!(!crate::model::macros::is_reserved_accessor(""));
    }

    #[test]
    fn test_optional_accessor_on_bare_instance() {
        let stamp = Stamp::new();
        assert_eq!(stamp.value("token").unwrap(), DataValue::Null);
        assert_eq!(stamp.token().unwrap(), None);
        // 非 Option 访问器无法表示缺失值
        assert!(stamp.seen().unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_field_types_macro() {
        assert!(matches!(crate::field_types!(char), FieldType::Char));
        assert!(matches!(
            crate::field_types!(datetime, format = "%Y"),
            FieldType::DateTime { format: Some(_), timezone_offset: None }
        ));
        assert_eq!(crate::field_types!(model, Tagged).type_name(), "ModelField");
    }

    #[test]
    fn test_data_map_macro() {
        let data = crate::data_map! { "label" => "x", "tags" => vec!["1", "2"] };
        let tagged = Tagged::from_data(&data);
        assert_eq!(tagged.label().unwrap(), "x");
        assert_eq!(tagged.tags().unwrap(), vec![1, 2]);

        let empty = crate::data_map! {};
        assert!(empty.is_empty());
    }

    #[test]
    fn test_schema_built_once() {
        let first = Tagged::schema();
        let second = Tagged::schema();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.field_names(), vec!["label", "tags"]);
    }

    #[test]
    fn test_self_referencing_model() {
        let tree = TreeNode::from_json_str(
            r#"{"name": "root", "children": [{"name": "leaf", "children": []}]}"#,
        )
        .unwrap();

        let children: Vec<TreeNode> = tree.get_models("children").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name().unwrap(), "leaf");
        assert!(children[0].get_models::<TreeNode>("children").unwrap().is_empty());

        // 未填充的实例不会无限展开
        assert_eq!(
            TreeNode::default().value("children").unwrap(),
            DataValue::Array(Vec::new())
        );
    }
}
