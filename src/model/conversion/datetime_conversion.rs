//! 日期时间字段转换工具
//!
//! 处理字符串/时间戳到日期、时间、日期时间的解析与格式化，支持时区偏移

use crate::config::ConversionConfig;
use crate::error::ModelResult;
use crate::types::DataValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// 将原始值解析为带时区的日期时间
///
/// - DateTime 原样返回
/// - 字符串：声明了 `format` 时只按该格式解析（格式不含时区时应用 `timezone_offset`）；
///   否则先尝试 RFC3339，再依次尝试配置中的回退格式
/// - 整数：视为 Unix 秒级时间戳
pub fn parse_datetime(
    raw: &DataValue,
    format: Option<&str>,
    timezone_offset: Option<&str>,
    config: &ConversionConfig,
    field: &str,
) -> ModelResult<DateTime<FixedOffset>> {
    let offset = parse_timezone_offset(timezone_offset.unwrap_or(&config.timezone_offset))?;

    match raw {
        DataValue::DateTime(dt) => Ok(*dt),
        DataValue::Int(ts) => timestamp_to_datetime(*ts, offset, field),
        DataValue::UInt(ts) => {
            let ts = i64::try_from(*ts).map_err(|_| {
                crate::model_error!(conversion, field, format!("时间戳超出范围: {}", ts))
            })?;
            timestamp_to_datetime(ts, offset, field)
        }
        DataValue::String(s) => parse_datetime_str(s.trim(), format, offset, config, field),
        DataValue::Json(_) => parse_datetime(&raw.normalized(), format, timezone_offset, config, field),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为日期时间", other.type_name())
        )),
    }
}

fn timestamp_to_datetime(ts: i64, offset: FixedOffset, field: &str) -> ModelResult<DateTime<FixedOffset>> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&offset))
        .ok_or_else(|| crate::model_error!(conversion, field, format!("时间戳超出范围: {}", ts)))
}

fn parse_datetime_str(
    datetime_str: &str,
    format: Option<&str>,
    offset: FixedOffset,
    config: &ConversionConfig,
    field: &str,
) -> ModelResult<DateTime<FixedOffset>> {
    if let Some(format) = format {
        // 格式中带有时区信息时直接解析
        if let Ok(dt) = DateTime::parse_from_str(datetime_str, format) {
            return Ok(dt);
        }
        return NaiveDateTime::parse_from_str(datetime_str, format)
            .map_err(|e| {
                crate::model_error!(
                    conversion,
                    field,
                    format!("日期时间 '{}' 不符合格式 '{}': {}", datetime_str, format, e)
                )
            })
            .and_then(|naive| attach_offset(naive, offset, datetime_str, field));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Ok(dt);
    }

    for format in &config.datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, format) {
            return attach_offset(naive, offset, datetime_str, field);
        }
    }

    Err(crate::model_error!(
        conversion,
        field,
        format!(
            "无法解析日期时间字符串 '{}'。支持 RFC3339（如 2024-01-15T14:30:00+08:00）及配置的回退格式",
            datetime_str
        )
    ))
}

fn attach_offset(
    naive: NaiveDateTime,
    offset: FixedOffset,
    datetime_str: &str,
    field: &str,
) -> ModelResult<DateTime<FixedOffset>> {
    naive.and_local_timezone(offset).single().ok_or_else(|| {
        crate::model_error!(
            conversion,
            field,
            format!("时间 '{}' 在时区 '{}' 下存在歧义", datetime_str, offset)
        )
    })
}

/// 将原始值解析为日期
pub fn parse_date(
    raw: &DataValue,
    format: Option<&str>,
    config: &ConversionConfig,
    field: &str,
) -> ModelResult<NaiveDate> {
    match raw {
        DataValue::Date(d) => Ok(*d),
        DataValue::DateTime(dt) => Ok(dt.date_naive()),
        DataValue::String(s) => {
            let format = format.unwrap_or(&config.date_format);
            NaiveDate::parse_from_str(s.trim(), format).map_err(|e| {
                crate::model_error!(
                    conversion,
                    field,
                    format!("日期 '{}' 不符合格式 '{}': {}", s, format, e)
                )
            })
        }
        DataValue::Json(_) => parse_date(&raw.normalized(), format, config, field),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为日期", other.type_name())
        )),
    }
}

/// 将原始值解析为时间
///
/// 未声明格式时，除配置格式外还接受带小数秒与仅到分钟的写法
pub fn parse_time(
    raw: &DataValue,
    format: Option<&str>,
    config: &ConversionConfig,
    field: &str,
) -> ModelResult<NaiveTime> {
    match raw {
        DataValue::Time(t) => Ok(*t),
        DataValue::DateTime(dt) => Ok(dt.time()),
        DataValue::String(s) => {
            let s = s.trim();
            if let Some(format) = format {
                return NaiveTime::parse_from_str(s, format).map_err(|e| {
                    crate::model_error!(
                        conversion,
                        field,
                        format!("时间 '{}' 不符合格式 '{}': {}", s, format, e)
                    )
                });
            }
            [config.time_format.as_str(), "%H:%M:%S%.f", "%H:%M"]
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
                .ok_or_else(|| {
                    crate::model_error!(conversion, field, format!("无法解析时间字符串 '{}'", s))
                })
        }
        DataValue::Json(_) => parse_time(&raw.normalized(), format, config, field),
        other => Err(crate::model_error!(
            conversion,
            field,
            format!("无法将 {} 转换为时间", other.type_name())
        )),
    }
}

/// 格式化日期时间；未声明格式时输出 RFC3339
pub fn format_datetime(dt: &DateTime<FixedOffset>, format: Option<&str>) -> String {
    match format {
        Some(format) => dt.format(format).to_string(),
        None => dt.to_rfc3339(),
    }
}

/// 解析时区偏移字符串
///
/// # 参数
/// * `timezone_offset` - 时区偏移字符串，格式如 "+08:00"、"-05:30"
///
/// # 返回值
/// * `Ok(FixedOffset)` - 对应的固定偏移
/// * `Err(ModelError)` - 格式错误时返回详细错误信息
pub fn parse_timezone_offset(timezone_offset: &str) -> ModelResult<FixedOffset> {
    // 验证时区偏移格式
    static TZ_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let regex = TZ_REGEX.get_or_init(|| {
        regex::Regex::new(r"^([+-])(\d{2}):(\d{2})$").expect("时区偏移正则表达式必须合法")
    });

    let invalid = || {
        crate::model_error!(
            conversion,
            "时区偏移",
            format!(
                "无效的时区偏移格式: '{}'。期望格式: [+/-]HH:MM，例如: +08:00、-05:30",
                timezone_offset
            )
        )
    };

    let caps = regex.captures(timezone_offset).ok_or_else(invalid)?;
    let sign = &caps[1];
    let hours: i32 = caps[2].parse().map_err(|_| invalid())?;
    let minutes: i32 = caps[3].parse().map_err(|_| invalid())?;

    // 验证范围
    if hours > 23 || minutes > 59 {
        return Err(crate::model_error!(
            conversion,
            "时区偏移",
            format!(
                "时区偏移超出范围: {}。小时范围: 0-23，分钟范围: 0-59",
                timezone_offset
            )
        ));
    }

    let total_seconds = hours * 3600 + minutes * 60;
    let seconds = if sign == "-" { -total_seconds } else { total_seconds };

    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}
