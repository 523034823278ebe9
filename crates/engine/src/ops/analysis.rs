use crate::feasibility::{Feasibility, FeasibilityReport, analyze};
use crate::{EngineError, ResultEngine};

use super::Engine;

fn validate_money_input(value: f64, label: &str) -> ResultEngine<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be a finite non-negative number"
        )));
    }
    Ok(())
}

/// The numbers are settled before the advisor sees them; the prompt never
/// carries the verdict, so the narrative cannot overrule the analysis.
fn feasibility_prompt(
    capital: f64,
    monthly_cost: f64,
    monthly_revenue: f64,
    feasibility: &Feasibility,
) -> String {
    let break_even = match feasibility.break_even_months {
        Some(months) => format!("{months:.1} months"),
        None => "never (the venture does not repay its capital)".to_string(),
    };

    format!(
        "You are a financial consultant for small businesses. \
         Analyze this venture plan:\n\
         - Capital: {capital:.2}\n\
         - Monthly cost: {monthly_cost:.2}\n\
         - Monthly revenue: {monthly_revenue:.2}\n\
         - Monthly profit: {profit:.2}\n\
         - ROI: {roi:.2}%\n\
         - Break-even point: {break_even}\n\n\
         Give one short, practical recommendation (at most 3 sentences) \
         on whether and how to proceed.",
        profit = feasibility.profit,
        roi = feasibility.roi,
    )
}

impl Engine {
    /// Analyzes a venture plan and asks the advisor to word the outcome.
    ///
    /// All figures are major currency units; nothing is written to the
    /// ledger. Advisor failure fails the request, a report is never
    /// served without its narrative.
    pub async fn feasibility_report(
        &self,
        capital: f64,
        monthly_cost: f64,
        monthly_revenue: f64,
    ) -> ResultEngine<FeasibilityReport> {
        validate_money_input(capital, "capital")?;
        validate_money_input(monthly_cost, "monthly_cost")?;
        validate_money_input(monthly_revenue, "monthly_revenue")?;

        let feasibility = analyze(capital, monthly_cost, monthly_revenue);
        let prompt = feasibility_prompt(capital, monthly_cost, monthly_revenue, &feasibility);
        let ai_insight = self.advisor.complete(&prompt, false).await?;

        Ok(FeasibilityReport {
            feasibility,
            ai_insight,
        })
    }
}
