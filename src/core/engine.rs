use tracing::debug;

use super::cashflow::year_cashflow;
use super::error::ProjectionError;
use super::rating::{compute_rating, peer_percentile};
use super::types::{ProjectionInput, ProjectionResult, YearRecord};

/// Monthly income assumed for the average when there is nothing to average.
const FALLBACK_MONTHLY_INCOME: f64 = 360.0;

#[derive(Debug, Clone, Copy, Default)]
struct Balances {
    cumulative_cash: f64,
    investment_balance: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct SeriesTotals {
    income: f64,
    expenses: f64,
    investment_contributions: f64,
}

impl SeriesTotals {
    fn add(&mut self, record: &YearRecord) {
        self.income += record.income;
        self.expenses += record.cash_expense;
        self.investment_contributions += record.investment_contribution;
    }
}

/// Runs the full projection from `current_age` to `life_expectancy_age`
/// inclusive. An inverted age range yields `InvalidAgeRange` and no series.
pub fn project(inputs: &ProjectionInput) -> Result<ProjectionResult, ProjectionError> {
    let year_series = run_yearly_series(inputs);
    let Some(last) = year_series.last().copied() else {
        return Err(ProjectionError::InvalidAgeRange {
            current_age: inputs.current_age,
            life_expectancy_age: inputs.life_expectancy_age,
        });
    };

    let mut totals = SeriesTotals::default();
    for record in &year_series {
        totals.add(record);
    }

    let retirement = year_series
        .iter()
        .find(|record| record.age == inputs.retirement_age)
        .copied()
        .unwrap_or(last);

    let final_balance = last.cumulative_cash + last.investment_balance;
    let average_annual_income =
        average_annual_income(totals.income, year_series.len(), inputs.monthly_income);

    debug!(
        current_age = inputs.current_age,
        years = year_series.len(),
        final_balance,
        average_annual_income,
        "projection complete"
    );

    Ok(ProjectionResult {
        total_income: totals.income,
        total_expenses: totals.expenses,
        final_balance,
        retirement_assets: retirement.total_assets,
        retirement_cash: retirement.cumulative_cash,
        retirement_investment_balance: retirement.investment_balance,
        final_investment_contribution_sum: totals.investment_contributions,
        final_investment_balance: last.investment_balance,
        rating: compute_rating(final_balance, average_annual_income),
        peer_percentile_rank: peer_percentile(final_balance, inputs.current_age),
        average_annual_income,
        year_series,
    })
}

/// Year-by-year series; empty when `current_age > life_expectancy_age`.
pub fn run_yearly_series(inputs: &ProjectionInput) -> Vec<YearRecord> {
    if inputs.current_age > inputs.life_expectancy_age {
        return Vec::new();
    }

    let growth = 1.0 + inputs.annual_return_rate / 100.0;
    let mut balances = Balances::default();
    let mut series =
        Vec::with_capacity((inputs.life_expectancy_age - inputs.current_age + 1) as usize);

    for age in inputs.current_age..=inputs.life_expectancy_age {
        let year = year_cashflow(inputs, age);
        let cash_expense = year.cash_expense();

        // Contribution lands first, then the whole balance grows for the year.
        balances.investment_balance =
            (balances.investment_balance + year.investment_contribution) * growth;
        let net_cash_flow = year.income - cash_expense - year.investment_contribution;
        balances.cumulative_cash += net_cash_flow;

        series.push(YearRecord {
            age,
            income: year.income,
            cash_expense,
            investment_contribution: year.investment_contribution,
            net_cash_flow,
            cumulative_cash: balances.cumulative_cash,
            investment_balance: balances.investment_balance,
            total_assets: balances.cumulative_cash + balances.investment_balance,
        });
    }

    series
}

pub fn average_annual_income(total_income: f64, years: usize, monthly_income: f64) -> f64 {
    if years > 0 {
        return total_income / years as f64;
    }
    let monthly = if monthly_income > 0.0 {
        monthly_income
    } else {
        FALLBACK_MONTHLY_INCOME
    };
    monthly * 12.0
}
