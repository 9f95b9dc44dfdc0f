//! Report assembly
//!
//! Document templates (daily report, receipts, printouts) consume the
//! aggregation output through [`ReportAssembler`]. Assemblers never
//! recompute totals; everything they print comes from [`ReportInput`].

pub mod renderer;

pub use renderer::DailyReportText;

use shared::models::{AggregateResult, Order, RestaurantProfile, SalesQuery};

/// Everything a report template may read
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub profile: &'a RestaurantProfile,
    pub query: &'a SalesQuery,
    pub result: &'a AggregateResult,
    /// Filtered orders, for templates that list them
    pub orders: &'a [&'a Order],
}

/// Turns aggregation output into a document
pub trait ReportAssembler {
    type Output;

    fn assemble(&self, input: &ReportInput<'_>) -> Self::Output;
}
