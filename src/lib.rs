//! rat_quickmodel - 声明式数据映射库
//!
//! 通过声明字段模板定义模型，将松散的原始数据（字典、JSON）映射为强类型的字段值
//! 字段在模型定义时收集一次，每个实例持有独立的字段副本，原始数据在读取时才转换

// 导出所有公共模块
pub mod error;
pub mod types;
pub mod config;
pub mod model;
pub mod manager;

// 重新导出常用类型和函数
pub use error::{ModelError, ModelResult};
pub use types::*;
pub use manager::{get_model, get_registered_models, has_model, register_model};
pub use model::{
    DynamicModel, Field, FieldConverter, FieldDefinition, FieldMap, FieldType, FromDataValue,
    Model, ModelSchema, ModelSchemaBuilder, SchemaRef, ToDataValue,
    boolean_field, char_field, custom_field, date_field, datetime_field, datetime_with_tz_field,
    field_base, field_collection_field, float_field, integer_field, model_collection_field,
    model_collection_field_from, model_field, model_field_from, time_field, uuid_field,
};
pub use config::{
    ConversionConfig, ConversionConfigBuilder, GlobalConfig, GlobalConfigBuilder, LogLevel,
    LoggingConfig, LoggingConfigBuilder,
};

// 日志系统导入
use rat_logger::info;

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_quickmodel库
///
/// 按配置安装终端日志（`logging.console` 为 false 时跳过）并应用转换配置。
/// 不调用此函数时库使用默认转换配置，且不会初始化日志
pub fn init(config: &GlobalConfig) -> ModelResult<()> {
    config::init_logging(&config.logging)?;
    config::set_conversion_config(config.conversion.clone())?;
    info!("{} 初始化完成", get_info());
    Ok(())
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
