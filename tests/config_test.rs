//! 全局转换配置测试
//!
//! 转换配置是进程级的，这里的用例集中在一个测试函数中顺序执行

use rat_quickmodel::*;
use std::io::Write;

define_model! {
    struct Event {
        day: chrono::NaiveDate = date_field(None),
        at: chrono::DateTime<chrono::FixedOffset> = datetime_field(None),
    }
}

#[test]
fn test_conversion_config_lifecycle() {
    // 默认配置
    let event = Event::from_data(&data_map! { "day" => "2024-03-01", "at" => "2024-03-01 10:00:00" });
    assert_eq!(event.day().unwrap(), chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(event.at().unwrap().offset().local_minus_utc(), 0);

    // 非法配置被拒绝，当前配置保持不变
    let mut invalid = ConversionConfig::default();
    invalid.timezone_offset = "UTC+8".to_string();
    assert!(config::set_conversion_config(invalid).is_err());
    assert_eq!(config::conversion_config(), ConversionConfig::default());

    // 从配置文件加载并初始化
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[logging]
level = "Debug"
console = false

[conversion]
date_format = "%d.%m.%Y"
time_format = "%H:%M"
datetime_formats = ["%d.%m.%Y %H:%M"]
timezone_offset = "+02:00"
"#
    )
    .unwrap();

    let global = GlobalConfig::from_file(file.path()).unwrap();
    init(&global).unwrap();

    let event = Event::from_data(&data_map! { "day" => "01.03.2024", "at" => "01.03.2024 10:00" });
    assert_eq!(event.day().unwrap(), chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let at = event.at().unwrap();
    assert_eq!(at.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(at.to_rfc3339(), "2024-03-01T10:00:00+02:00");

    // 序列化使用配置的日期格式
    let json = event.to_json_value().unwrap();
    assert_eq!(json["day"], serde_json::json!("01.03.2024"));

    // 旧格式不再被接受
    let event = Event::from_data(&data_map! { "day" => "2024-03-01" });
    assert!(event.day().is_err());

    config::reset_conversion_config();
    assert_eq!(config::conversion_config(), ConversionConfig::default());
    let event = Event::from_data(&data_map! { "day" => "2024-03-01" });
    assert!(event.day().is_ok());
}
