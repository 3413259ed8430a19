//! 模型注册表

use crate::model::ModelSchema;
use dashmap::DashMap;
use rat_logger::debug;
use std::sync::Arc;

/// 模型注册表：模型名称到字段注册表的映射
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: DashMap<String, Arc<ModelSchema>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: DashMap::new(),
        }
    }

    /// 注册模型模式，同名模型会被覆盖
    pub fn register_model(&self, schema: Arc<ModelSchema>) {
        let model_name = schema.name().to_string();

        // 检查是否已注册
        if self.models.contains_key(&model_name) {
            debug!("模型已存在，将更新字段注册表: {}", model_name);
        }

        debug!("注册模型: 名称={}, 字段数量={}", model_name, schema.len());
        self.models.insert(model_name, schema);
    }

    /// 获取模型模式
    pub fn get_model(&self, model_name: &str) -> Option<Arc<ModelSchema>> {
        self.models.get(model_name).map(|schema| schema.clone())
    }

    /// 检查模型是否已注册
    pub fn has_model(&self, model_name: &str) -> bool {
        self.models.contains_key(model_name)
    }

    /// 获取所有已注册的模型
    pub fn get_registered_models(&self) -> Vec<(String, Arc<ModelSchema>)> {
        self.models
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// 移除模型
    pub fn remove_model(&self, model_name: &str) -> Option<Arc<ModelSchema>> {
        let removed = self.models.remove(model_name).map(|(_, schema)| schema);
        if removed.is_some() {
            debug!("移除模型: {}", model_name);
        }
        removed
    }

    /// 清空注册表
    pub fn clear_models(&self) {
        let count = self.models.len();
        self.models.clear();
        debug!("清空模型注册表，共移除 {} 个模型", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convenience::{char_field, integer_field};

    #[test]
    fn test_register_and_overwrite() {
        let registry = ModelRegistry::new();
        let first = Arc::new(
            ModelSchema::builder("Item")
                .field("name", char_field())
                .build()
                .unwrap(),
        );
        registry.register_model(first);
        assert!(registry.has_model("Item"));
        assert_eq!(registry.get_model("Item").unwrap().len(), 1);

        let second = Arc::new(
            ModelSchema::builder("Item")
                .field("name", char_field())
                .field("code", integer_field())
                .build()
                .unwrap(),
        );
        registry.register_model(second);
        assert_eq!(registry.get_registered_models().len(), 1);
        assert_eq!(registry.get_model("Item").unwrap().len(), 2);

        assert!(registry.remove_model("Item").is_some());
        assert!(!registry.has_model("Item"));
        assert!(registry.remove_model("Item").is_none());
    }

    #[test]
    fn test_clear_models() {
        let registry = ModelRegistry::new();
        for name in ["A", "B"] {
            registry.register_model(Arc::new(ModelSchema::builder(name).build().unwrap()));
        }
        assert_eq!(registry.get_registered_models().len(), 2);
        registry.clear_models();
        assert!(registry.get_registered_models().is_empty());
        assert!(registry.get_model("A").is_none());
    }
}
