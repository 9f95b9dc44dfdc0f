//! Daily report renderer
//!
//! Renders the aggregation output as fixed-width plain text, for the
//! terminal or a text-mode printer. Width is counted in characters.

use shared::models::{OrderType, OrderTypeFilter, SalesQuery};

use super::{ReportAssembler, ReportInput};
use crate::export::csv::{payment_label, type_label};

const LOCALE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Plain-text daily report
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
#[derive(Debug, Clone, Copy)]
pub struct DailyReportText {
    width: usize,
    list_orders: bool,
}

impl DailyReportText {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            list_orders: false,
        }
    }

    /// Append one line per order after the summary
    pub fn with_order_list(mut self, list_orders: bool) -> Self {
        self.list_orders = list_orders;
        self
    }

    fn render_header(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        let profile = input.profile;
        if !profile.name.is_empty() {
            b.center(&profile.name);
        }
        let address = [profile.address.as_str(), profile.city.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if !address.is_empty() {
            b.center(&address);
        }
        if !profile.tax_id.is_empty() {
            b.center(&format!("NIP: {}", profile.tax_id));
        }
        if let Some(phone) = profile.phone.as_deref()
            && !phone.is_empty()
        {
            b.center(&format!("Tel: {}", phone));
        }

        b.sep('=');
        b.line("RAPORT SPRZEDAŻY");
        b.line(&format!("Okres: {}", period_label(input.query)));
        b.line(&format!("Typ: {}", filter_label(input.query.order_type_filter)));
    }

    fn render_summary(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        let summary = &input.result.summary;
        b.sep('-');
        b.line_lr("Zamówienia", &summary.order_count.to_string());
        b.line_lr("Obrót", &money(summary.total_revenue));
        b.line_lr("Średnia wartość", &money(summary.average_order_value));
        b.line_lr("Napiwki", &money(summary.total_tips));
        b.line_lr("Rabaty", &money(summary.total_discounts));
    }

    fn render_payments(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        b.sep('-');
        b.line("PŁATNOŚCI");
        for row in &input.result.payment_method_breakdown {
            if row.order_count == 0 {
                continue;
            }
            let label = format!("{} ({})", payment_label(row.method), row.order_count);
            b.line_lr(&label, &money(row.revenue));
        }

        b.line("TYP ZAMÓWIENIA");
        for row in &input.result.order_type_breakdown {
            if row.order_count == 0 {
                continue;
            }
            let label = format!("{} ({})", type_label(row.order_type), row.order_count);
            b.line_lr(&label, &money(row.revenue));
        }
    }

    fn render_products(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        if input.result.product_ranking.is_empty() {
            return;
        }
        b.sep('-');
        b.line("NAJLEPSZE PRODUKTY");
        for (rank, product) in input.result.product_ranking.iter().enumerate() {
            let label = format!("{}. {} x{}", rank + 1, product.name, product.quantity);
            b.line_lr(&label, &money(product.revenue));
        }
    }

    fn render_orders(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        if !self.list_orders || input.orders.is_empty() {
            return;
        }
        b.sep('-');
        b.line("ZAMÓWIENIA");
        for order in input.orders {
            let time = order
                .created_at
                .as_ref()
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            let label = format!(
                "#{} {} {}",
                order.display_number(),
                time,
                type_label(order.order_type)
            );
            b.line_lr(&label, &money(order.total_amount));
        }
    }

    fn render_footer(&self, b: &mut TextBuilder, input: &ReportInput<'_>) {
        let quality = &input.result.data_quality;
        let skipped = quality.excluded_without_timestamp + quality.included_without_timestamp;
        if skipped > 0 {
            b.sep('-');
            b.line_lr("Bez daty", &skipped.to_string());
        }
        b.sep('=');
    }
}

impl ReportAssembler for DailyReportText {
    type Output = String;

    fn assemble(&self, input: &ReportInput<'_>) -> String {
        let mut b = TextBuilder::new(self.width);

        self.render_header(&mut b, input);
        self.render_summary(&mut b, input);
        self.render_payments(&mut b, input);
        self.render_products(&mut b, input);
        self.render_orders(&mut b, input);
        self.render_footer(&mut b, input);

        b.build()
    }
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn period_label(query: &SalesQuery) -> String {
    let fmt = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format(LOCALE_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "...".to_string())
    };
    match (query.date_start, query.date_end) {
        (None, None) => "wszystkie daty".to_string(),
        (Some(start), Some(end)) if start == end => fmt(Some(start)),
        (start, end) => format!("{} - {}", fmt(start), fmt(end)),
    }
}

fn filter_label(filter: OrderTypeFilter) -> &'static str {
    match filter {
        OrderTypeFilter::All => "Wszystkie",
        OrderTypeFilter::DineIn => type_label(OrderType::DineIn),
        OrderTypeFilter::Takeaway => type_label(OrderType::Takeaway),
        OrderTypeFilter::Delivery => type_label(OrderType::Delivery),
    }
}

/// Minimal fixed-width line builder
struct TextBuilder {
    buf: String,
    width: usize,
}

impl TextBuilder {
    fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    fn line(&mut self, s: &str) {
        self.buf.push_str(&truncate(s, self.width));
        self.buf.push('\n');
    }

    fn center(&mut self, s: &str) {
        let s = truncate(s, self.width);
        let pad = (self.width - s.chars().count()) / 2;
        self.buf.push_str(&" ".repeat(pad));
        self.line(&s);
    }

    fn sep(&mut self, ch: char) {
        let line: String = std::iter::repeat_n(ch, self.width).collect();
        self.line(&line);
    }

    /// Left text, right-aligned value; the left side is cut to fit
    fn line_lr(&mut self, left: &str, right: &str) {
        let right_len = right.chars().count();
        let room = self.width.saturating_sub(right_len + 1);
        let left = truncate(left, room);
        let gap = self.width.saturating_sub(left.chars().count() + right_len).max(1);
        self.buf.push_str(&left);
        self.buf.push_str(&" ".repeat(gap));
        self.buf.push_str(right);
        self.buf.push('\n');
    }

    fn build(self) -> String {
        self.buf
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}
