use std::path::PathBuf;

use chrono_tz::Tz;
use shared::error::AppResult;
use shared::models::{AmountField, ReportCalendar};
use shared::util;

use crate::statistics::{DEFAULT_TOP_PRODUCTS, NormalizeOptions};

/// 报表配置 - report settings shared by the CLI and the library
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | REPORT_TIMEZONE | Europe/Warsaw | IANA zone that defines "local" |
/// | BUSINESS_DAY_CUTOFF | 00:00 | business-day boundary (HH:MM) |
/// | AMOUNT_FIELD | total_amount | canonical money field |
/// | TOP_PRODUCTS | 5 | product ranking length |
/// | LOG_LEVEL | info | max log level |
/// | LOG_DIR | (unset) | enables daily-rolling file logs |
/// | EXPORT_DIR | . | CSV output directory |
///
/// # 示例
///
/// ```ignore
/// REPORT_TIMEZONE=Europe/Berlin BUSINESS_DAY_CUTOFF=04:00 sales-report --orders orders.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub timezone: Tz,
    /// Raw `HH:MM`; parsed (with fallback) by [`Config::calendar`]
    pub business_day_cutoff: String,
    pub amount_field: AmountField,
    pub top_products: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub export_dir: PathBuf,
}

impl Config {
    pub const DEFAULT_TIMEZONE: &'static str = "Europe/Warsaw";

    /// 从环境变量加载配置
    ///
    /// Unset keys take their defaults. An unknown timezone or amount field
    /// is an error: both silently change every number in the report.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key → value source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timezone = util::parse_timezone(
            &lookup("REPORT_TIMEZONE").unwrap_or_else(|| Self::DEFAULT_TIMEZONE.into()),
        )?;
        let amount_field = match lookup("AMOUNT_FIELD") {
            Some(raw) => raw.parse::<AmountField>()?,
            None => AmountField::default(),
        };

        Ok(Self {
            timezone,
            business_day_cutoff: lookup("BUSINESS_DAY_CUTOFF").unwrap_or_else(|| "00:00".into()),
            amount_field,
            top_products: lookup("TOP_PRODUCTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOP_PRODUCTS),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
            export_dir: lookup("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    /// Report calendar (timezone + business-day cutoff)
    pub fn calendar(&self) -> ReportCalendar {
        ReportCalendar::new(self.timezone).with_cutoff(util::parse_cutoff(&self.business_day_cutoff))
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            amount_field: self.amount_field,
            calendar: self.calendar(),
        }
    }
}
