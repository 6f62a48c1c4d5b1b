mod advice;
mod age;
mod cashflow;
mod engine;
mod error;
mod pension;
mod rating;
mod types;

pub use advice::{Advice, AdviceSummary, AdviceTopic, Finding, Priority, derive_advice};
pub use age::current_age;
pub use cashflow::{
    YearCashflow, fixed_costs_for_year, income_for_year, investment_contribution_for_year,
    life_event_cost, life_event_costs_for_year, year_cashflow,
};
pub use engine::{average_annual_income, project, run_yearly_series};
pub use error::ProjectionError;
pub use pension::{
    ContributionLimits, CoverageStatus, Occupation, PensionAdvice, PensionBreakdown,
    PensionTier, TierLimits, contribution_limits, coverage_status, default_employee_future_years,
    estimate_breakdown, estimate_monthly_benefit, monthly_benefit_in_units, pension_advice,
};
pub use rating::{
    PeerAverages, PeerBand, PeerComparison, compute_rating, peer_comparison, peer_percentile,
    peer_percentile_with,
};
pub use types::{
    ContributionYears, CustomEvent, FixedCost, FixedCostCategory, InvestmentPlan, LifeEvent,
    LifeEventDetails, LifeEventKind, ProjectionInput, ProjectionResult, Rating, YearRecord,
};
