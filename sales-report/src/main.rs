use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use sales_report::printing::{DailyReportText, ReportAssembler, ReportInput};
use sales_report::statistics::{AggregateOptions, build_report, filter, normalize_all};
use sales_report::{Config, export, init_logger_with_file, source};
use shared::models::{
    AmountField, HourlyMode, OrderTypeFilter, RankingKey, RestaurantProfile, SalesQuery,
};

#[derive(Parser)]
#[command(name = "sales-report")]
#[command(about = "Sales statistics from a POS order file: totals, rankings, hourly and daily series")]
struct Cli {
    /// Order file (JSON array or {"orders": [...]})
    #[arg(short, long, env = "ORDERS_FILE")]
    orders: PathBuf,

    /// First business date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last business date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Order type: all, dine_in, takeaway, delivery
    #[arg(long = "type", default_value = "all")]
    order_type: OrderTypeFilter,

    /// Product ranking metric: revenue, quantity
    #[arg(long, default_value = "revenue")]
    rank_by: RankingKey,

    /// Product ranking length [default: TOP_PRODUCTS]
    #[arg(long)]
    top: Option<usize>,

    /// Only list hours that have orders
    #[arg(long)]
    sparse: bool,

    /// Canonical money field: total_amount, total_price [default: AMOUNT_FIELD]
    #[arg(long)]
    amount_field: Option<AmountField>,

    /// Export the selected orders to raport_<date>.csv
    #[arg(long)]
    csv: bool,

    /// CSV output directory (implies --csv) [default: EXPORT_DIR]
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Print the plain-text daily report instead of JSON
    #[arg(long)]
    print: bool,

    /// Restaurant profile JSON for the report header
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Line width of the printed report
    #[arg(long, default_value_t = 48)]
    width: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(field) = cli.amount_field {
        config.amount_field = field;
    }
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let query = SalesQuery {
        date_start: cli.from,
        date_end: cli.to,
        order_type_filter: cli.order_type,
    };
    query.validate()?;

    let (raw, load_error) = source::load_orders_or_empty(&cli.orders).await;
    if let Some(e) = &load_error {
        eprintln!("Warning [{}] {}: {}", e.code, e.code.message(), e);
    }

    let calendar = config.calendar();
    let orders = normalize_all(&raw, &config.normalize_options());
    let options = AggregateOptions::default()
        .with_ranking_key(cli.rank_by)
        .with_top_n(cli.top.unwrap_or(config.top_products))
        .with_hourly_mode(if cli.sparse {
            HourlyMode::Sparse
        } else {
            HourlyMode::Dense
        });

    let result = build_report(&orders, &query, &calendar, &options);
    let selected = filter(&orders, &query, &calendar);

    if cli.print {
        let profile = match &cli.profile {
            Some(path) => source::load_profile(path)
                .await
                .with_context(|| format!("Failed to load profile {}", path.display()))?,
            None => RestaurantProfile::default(),
        };
        let input = ReportInput {
            profile: &profile,
            query: &query,
            result: &result,
            orders: &selected,
        };
        print!("{}", DailyReportText::new(cli.width).with_order_list(true).assemble(&input));
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if cli.csv || cli.csv_dir.is_some() {
        let dir = cli.csv_dir.unwrap_or(config.export_dir);
        let date = query.report_date(&calendar, Utc::now());
        let path = export::export_to_dir(&dir, date, selected.iter().copied())?;
        eprintln!("CSV: {}", path.display());
    }

    Ok(())
}
