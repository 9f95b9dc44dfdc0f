//! CSV order list (`raport_<date>.csv`)
//!
//! Semicolon-separated, UTF-8 with BOM so spreadsheet software picks the
//! right encoding. One row per order, in input order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::WriterBuilder;
use shared::models::{Order, OrderType, PaymentMethod};
use shared::util::DATE_FORMAT;

use super::ExportResult;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const HEADER: [&str; 6] = ["Numer", "Data", "Godzina", "Typ", "Płatność", "Kwota"];

const LOCALE_DATE_FORMAT: &str = "%d.%m.%Y";
const LOCALE_TIME_FORMAT: &str = "%H:%M:%S";

/// `raport_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("raport_{}.csv", date.format(DATE_FORMAT))
}

pub fn type_label(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::DineIn => "Na miejscu",
        OrderType::Takeaway => "Na wynos",
        OrderType::Delivery => "Dostawa",
    }
}

pub fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Gotówka",
        PaymentMethod::Card => "Karta",
        PaymentMethod::Split => "Podzielona",
        PaymentMethod::Unknown => "Nieznana",
    }
}

/// Write BOM, header and one row per order
///
/// Orders without a timestamp get blank date and time cells.
pub fn write_orders_csv<'a, W, I>(mut writer: W, orders: I) -> ExportResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Order>,
{
    writer.write_all(UTF8_BOM)?;

    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
    wtr.write_record(HEADER)?;

    for order in orders {
        let (date, time) = match &order.created_at {
            Some(dt) => (
                dt.format(LOCALE_DATE_FORMAT).to_string(),
                dt.format(LOCALE_TIME_FORMAT).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        let amount = format!("{:.2}", order.total_amount);

        wtr.write_record([
            order.display_number(),
            date.as_str(),
            time.as_str(),
            type_label(order.order_type),
            payment_label(order.payment_method),
            amount.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `raport_<date>.csv` into `dir`, creating the directory if needed
pub fn export_to_dir<'a, I>(dir: &Path, date: NaiveDate, orders: I) -> ExportResult<PathBuf>
where
    I: IntoIterator<Item = &'a Order>,
{
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(date));

    let file = File::create(&path)?;
    write_orders_csv(BufWriter::new(file), orders)?;

    tracing::info!(path = %path.display(), "CSV report exported");
    Ok(path)
}
