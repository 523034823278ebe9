//! Deterministic feasibility analysis for a planned venture.
//!
//! All figures are monthly and in major currency units. The numbers are
//! computed here; wording them is the advisor's job.

/// Profits at or below this threshold count as no profit at all, so a
/// break-even point is never derived from them.
pub const BREAK_EVEN_MIN_PROFIT: f64 = 1e-9;
/// Break-even horizons beyond this many months are treated as never.
pub const BREAK_EVEN_MAX_MONTHS: f64 = 1_000_000.0;
/// Latest break-even month still considered feasible.
pub const FEASIBLE_MAX_MONTHS: f64 = 12.0;

/// Verdict of the analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeasibilityStatus {
    Feasible,
    LessFeasible,
    NotFeasible,
}

/// Computed figures for one venture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Feasibility {
    /// Monthly revenue minus monthly cost.
    pub profit: f64,
    /// Profit as a percentage of capital, 0 when there is no capital.
    pub roi: f64,
    /// Months until the capital is repaid, `None` when it never is.
    pub break_even_months: Option<f64>,
    pub status: FeasibilityStatus,
}

/// The analysis together with the advisor's narrative.
#[derive(Clone, Debug, PartialEq)]
pub struct FeasibilityReport {
    pub feasibility: Feasibility,
    pub ai_insight: String,
}

/// Analyzes a venture from its capital and monthly figures.
///
/// A venture is feasible when it repays its capital within
/// [`FEASIBLE_MAX_MONTHS`], less feasible when it repays later, and not
/// feasible when it runs at a loss or the repayment horizon degenerates.
pub fn analyze(capital: f64, monthly_cost: f64, monthly_revenue: f64) -> Feasibility {
    let profit = monthly_revenue - monthly_cost;
    let roi = if capital != 0.0 {
        (profit / capital) * 100.0
    } else {
        0.0
    };

    let (break_even_months, status) = if profit > BREAK_EVEN_MIN_PROFIT {
        let months = capital / profit;
        if months.is_infinite() || months.is_nan() || months > BREAK_EVEN_MAX_MONTHS {
            (None, FeasibilityStatus::NotFeasible)
        } else if months <= FEASIBLE_MAX_MONTHS {
            (Some(months), FeasibilityStatus::Feasible)
        } else {
            (Some(months), FeasibilityStatus::LessFeasible)
        }
    } else {
        (None, FeasibilityStatus::NotFeasible)
    };

    Feasibility {
        profit,
        roi,
        break_even_months,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profitable_venture_within_a_year_is_feasible() {
        let report = analyze(1_000_000.0, 500_000.0, 900_000.0);

        assert_eq!(report.profit, 400_000.0);
        assert_eq!(report.roi, 40.0);
        assert_eq!(report.break_even_months, Some(2.5));
        assert_eq!(report.status, FeasibilityStatus::Feasible);
    }

    #[test]
    fn loss_making_venture_is_not_feasible() {
        let report = analyze(1_000_000.0, 900_000.0, 500_000.0);

        assert_eq!(report.profit, -400_000.0);
        assert_eq!(report.roi, -40.0);
        assert_eq!(report.break_even_months, None);
        assert_eq!(report.status, FeasibilityStatus::NotFeasible);
    }

    #[test]
    fn slow_payback_is_less_feasible() {
        let report = analyze(1_000_000.0, 500_000.0, 550_000.0);

        assert_eq!(report.break_even_months, Some(20.0));
        assert_eq!(report.status, FeasibilityStatus::LessFeasible);
    }

    #[test]
    fn break_even_at_twelve_months_is_still_feasible() {
        let report = analyze(1_200_000.0, 400_000.0, 500_000.0);

        assert_eq!(report.break_even_months, Some(12.0));
        assert_eq!(report.status, FeasibilityStatus::Feasible);
    }

    #[test]
    fn zero_capital_yields_zero_roi() {
        let report = analyze(0.0, 100.0, 200.0);

        assert_eq!(report.roi, 0.0);
        assert_eq!(report.break_even_months, Some(0.0));
        assert_eq!(report.status, FeasibilityStatus::Feasible);
    }

    #[test]
    fn negligible_profit_never_breaks_even() {
        let report = analyze(1_000_000.0, 100.0, 100.0 + 1e-10);

        assert_eq!(report.break_even_months, None);
        assert_eq!(report.status, FeasibilityStatus::NotFeasible);
    }

    #[test]
    fn absurd_payback_horizon_is_not_feasible() {
        let report = analyze(10_000_000.0, 100.0, 101.0);

        assert_eq!(report.break_even_months, None);
        assert_eq!(report.status, FeasibilityStatus::NotFeasible);
    }

    #[test]
    fn zero_profit_is_not_feasible() {
        let report = analyze(500.0, 100.0, 100.0);

        assert_eq!(report.profit, 0.0);
        assert_eq!(report.break_even_months, None);
        assert_eq!(report.status, FeasibilityStatus::NotFeasible);
    }
}
