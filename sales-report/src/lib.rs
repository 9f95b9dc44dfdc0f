//! Sales Report - POS 销售统计引擎
//!
//! # 架构概述
//!
//! Turns a raw order set plus a query into reproducible sales aggregates:
//!
//! - **规范化** (`statistics::normalize`): raw JSON records → canonical [`Order`]
//! - **过滤** (`statistics::filter`): order type + local business-date range
//! - **聚合** (`statistics::aggregate`): summary, product ranking, hourly and
//!   daily series, breakdowns, data-quality counts
//! - **导出** (`export`): `raport_<date>.csv`
//! - **报表** (`printing`): document templates behind [`ReportAssembler`]
//!
//! The three statistics stages are pure and synchronous; only the order
//! source and the exporters touch the filesystem.
//!
//! # 模块结构
//!
//! ```text
//! sales-report/src/
//! ├── core/          # 配置
//! ├── statistics/    # normalize → filter → aggregate
//! ├── order_money/   # Decimal money helpers
//! ├── source/        # order file loader (async)
//! ├── export/        # CSV export
//! ├── printing/      # report assembler + plain-text daily report
//! └── utils/         # 日志
//! ```

pub mod core;
pub mod export;
pub mod order_money;
pub mod printing;
pub mod source;
pub mod statistics;
pub mod utils;

// Re-export 公共类型
pub use crate::core::Config;
pub use printing::{DailyReportText, ReportAssembler, ReportInput};
pub use shared::models::{AggregateResult, Order, SalesQuery};
pub use statistics::{AggregateOptions, aggregate, build_report, filter, normalize_all};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
