//! Financial report API endpoints
//!
//! The report is rendered server side as CSV: a summary block, the
//! per-category totals, then the transaction rows. Sections have
//! different widths, so the writer runs in flexible mode.

use api_types::report::ReportQuery;
use axum::{
    Extension,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use engine::MoneyMinor;

use crate::{ServerError, server::ServerState, user};

fn csv_error(err: csv::Error) -> ServerError {
    ServerError::Generic(err.to_string())
}

fn render_csv(report: &engine::FinancialReport) -> Result<String, ServerError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

    let from = report.from.to_string();
    let to = report.to.to_string();
    writer
        .write_record(["Period", from.as_str(), to.as_str()])
        .map_err(csv_error)?;

    let income = MoneyMinor::new(report.total_income_minor).to_string();
    let expense = MoneyMinor::new(report.total_expense_minor).to_string();
    let net = MoneyMinor::new(report.net_minor).to_string();
    writer
        .write_record(["Total income", income.as_str()])
        .map_err(csv_error)?;
    writer
        .write_record(["Total expense", expense.as_str()])
        .map_err(csv_error)?;
    writer
        .write_record(["Net", net.as_str()])
        .map_err(csv_error)?;

    writer
        .write_record(["Category", "Kind", "Total"])
        .map_err(csv_error)?;
    for total in &report.category_totals {
        let amount = MoneyMinor::new(total.total_minor).to_string();
        writer
            .write_record([total.category.as_str(), total.kind.as_str(), amount.as_str()])
            .map_err(csv_error)?;
    }

    writer
        .write_record(["Date", "Kind", "Amount", "Category", "Description"])
        .map_err(csv_error)?;
    for row in &report.rows {
        let date = row.date.to_string();
        let amount = MoneyMinor::new(row.amount_minor).to_string();
        writer
            .write_record([
                date.as_str(),
                row.kind.as_str(),
                amount.as_str(),
                row.category.as_str(),
                row.description.as_deref().unwrap_or(""),
            ])
            .map_err(csv_error)?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    String::from_utf8(data).map_err(|err| ServerError::Generic(err.to_string()))
}

pub async fn financial(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ServerError> {
    let report = state
        .engine
        .financial_report(user.id, query.from, query.to)
        .await?;

    let filename = format!(
        "attachment; filename=\"financial_report_{}_{}.csv\"",
        report.from, report.to
    );
    let body = render_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        body,
    )
        .into_response())
}
