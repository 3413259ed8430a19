//! 模型管理器模块
//!
//! 维护全局模型注册表：`define_model!` 定义的模型在首次使用时自动注册

mod registry;

// 重新导出主要类型
pub use registry::ModelRegistry;

use crate::model::ModelSchema;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// 全局模型注册表实例
pub static GLOBAL_MODEL_REGISTRY: Lazy<ModelRegistry> = Lazy::new(ModelRegistry::new);

/// 获取全局模型注册表
pub(crate) fn get_global_registry() -> &'static ModelRegistry {
    &GLOBAL_MODEL_REGISTRY
}

/// 便捷函数 - 注册模型
pub fn register_model(schema: Arc<ModelSchema>) {
    get_global_registry().register_model(schema)
}

/// 便捷函数 - 获取模型字段注册表
pub fn get_model(model_name: &str) -> Option<Arc<ModelSchema>> {
    get_global_registry().get_model(model_name)
}

/// 便捷函数 - 检查模型是否已注册
pub fn has_model(model_name: &str) -> bool {
    get_global_registry().has_model(model_name)
}

/// 便捷函数 - 获取所有已注册的模型
pub fn get_registered_models() -> Vec<(String, Arc<ModelSchema>)> {
    get_global_registry().get_registered_models()
}

/// 便捷函数 - 移除模型
pub fn remove_model(model_name: &str) -> Option<Arc<ModelSchema>> {
    get_global_registry().remove_model(model_name)
}

/// 便捷函数 - 清空模型注册表
///
/// 已定义模型的字段注册表仍由各自的类型持有，不受影响
pub fn clear_models() {
    get_global_registry().clear_models()
}
