//! Table rendering for sweep reports

use shardscope_core::SweepReport;
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};

/// Render `report` as an ASCII table with upper-case headers and
/// right-aligned cells.
pub fn render(report: &SweepReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(report.headers().iter().map(|h| h.to_uppercase()));
    for row in report.table_rows() {
        builder.push_record(row);
    }

    builder
        .build()
        .with(Style::ascii())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}
