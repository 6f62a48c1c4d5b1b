use super::pension::{PENSION_START_AGE, monthly_benefit_in_units};
use super::types::{LifeEvent, ProjectionInput};

/// Share of take-home pay assumed as living cost when no fixed cost is set.
pub const FLOOR_INCOME_SHARE: f64 = 0.3;
/// Minimum monthly living cost, same unit as income.
pub const MIN_MONTHLY_LIVING_COST: f64 = 15.0;
/// Annual property tax and upkeep after a home purchase, as a share of price.
pub const HOUSING_ANNUAL_TAX_RATE: f64 = 0.005;
pub const CHILD_SUPPORT_YEARS: u32 = 22;

const MARRIAGE_OFFSET_YEARS: u32 = 2;
const MARRIAGE_EARLIEST_AGE: u32 = 25;
const CAR_OFFSET_YEARS: u32 = 3;
const CAR_EARLIEST_AGE: u32 = 20;
const CHILD_SPACING_YEARS: u32 = 2;
const CAREGIVING_BASE_AGE: u32 = 50;
const CAREGIVING_EARLIEST_AGE: u32 = 55;
const TRAVEL_OFFSET_YEARS: u32 = 5;
const TRAVEL_EARLIEST_AGE: u32 = 25;
const DEFAULT_CAR_INTERVAL_YEARS: u32 = 10;
const DEFAULT_TRAVEL_INTERVAL_YEARS: u32 = 5;

/// Figures for one simulated age, before any balance accumulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearCashflow {
    pub income: f64,
    pub fixed_costs: f64,
    pub life_event_costs: f64,
    pub investment_contribution: f64,
}

impl YearCashflow {
    pub fn cash_expense(self) -> f64 {
        self.fixed_costs + self.life_event_costs
    }
}

/// Pure in `(inputs, age)`: no state is carried between calls.
pub fn year_cashflow(inputs: &ProjectionInput, age: u32) -> YearCashflow {
    YearCashflow {
        income: income_for_year(inputs, age),
        fixed_costs: fixed_costs_for_year(inputs),
        life_event_costs: life_event_costs_for_year(inputs, age),
        investment_contribution: investment_contribution_for_year(inputs, age),
    }
}

pub fn income_for_year(inputs: &ProjectionInput, age: u32) -> f64 {
    if age < inputs.retirement_age {
        return inputs.monthly_income.max(0.0) * 12.0;
    }
    pension_income_for_year(inputs, age)
}

/// Pension is paid from 65, or from retirement if that is later. Years between
/// an early retirement and the pension start draw nothing.
pub fn pension_income_for_year(inputs: &ProjectionInput, age: u32) -> f64 {
    let pension_start_age = PENSION_START_AGE.max(inputs.retirement_age);
    if age >= pension_start_age {
        monthly_benefit_in_units(&inputs.contribution_years, inputs.monthly_income) * 12.0
    } else {
        0.0
    }
}

pub fn fixed_costs_for_year(inputs: &ProjectionInput) -> f64 {
    let total = inputs
        .fixed_costs
        .iter()
        .filter(|cost| cost.active && cost.monthly_amount > 0.0)
        .map(|cost| cost.monthly_amount * 12.0)
        .sum::<f64>();

    let nothing_configured = inputs
        .fixed_costs
        .iter()
        .all(|cost| !cost.active || cost.monthly_amount == 0.0);

    if total == 0.0 && nothing_configured {
        floor_living_cost(inputs.monthly_income)
    } else {
        total
    }
}

fn floor_living_cost(monthly_income: f64) -> f64 {
    (monthly_income.max(0.0) * FLOOR_INCOME_SHARE).max(MIN_MONTHLY_LIVING_COST) * 12.0
}

pub fn life_event_costs_for_year(inputs: &ProjectionInput, age: u32) -> f64 {
    let base_age = inputs.current_age;
    let standard = inputs
        .life_events
        .iter()
        .map(|event| life_event_cost(event, age, base_age))
        .sum::<f64>();
    let custom = inputs
        .custom_events
        .iter()
        .filter(|event| event.trigger_age == age)
        .map(|event| event.amount)
        .sum::<f64>();
    standard + custom
}

/// Cost of one enabled event at `age`, with schedules anchored on the age at
/// which the simulation started.
pub fn life_event_cost(event: &LifeEvent, age: u32, base_age: u32) -> f64 {
    match *event {
        LifeEvent::Marriage { cost } => {
            let wedding_age = (base_age + MARRIAGE_OFFSET_YEARS).max(MARRIAGE_EARLIEST_AGE);
            if age == wedding_age { cost } else { 0.0 }
        }
        LifeEvent::Car {
            purchase_cost,
            maintenance_per_year,
            interval_years,
        } => {
            let start_age = (base_age + CAR_OFFSET_YEARS).max(CAR_EARLIEST_AGE);
            if age < start_age {
                return 0.0;
            }
            let interval = interval_or(interval_years, DEFAULT_CAR_INTERVAL_YEARS);
            let purchase = if (age - start_age) % interval == 0 {
                purchase_cost
            } else {
                0.0
            };
            purchase + maintenance_per_year
        }
        LifeEvent::Children {
            cost_per_child,
            count,
        } => {
            let first_birth_age = (base_age + MARRIAGE_OFFSET_YEARS).max(MARRIAGE_EARLIEST_AGE);
            let per_year = cost_per_child / CHILD_SUPPORT_YEARS as f64;
            (0..count)
                .map(|child| first_birth_age + CHILD_SPACING_YEARS * child)
                .filter(|&birth_age| age >= birth_age && age - birth_age < CHILD_SUPPORT_YEARS)
                .map(|_| per_year)
                .sum::<f64>()
        }
        LifeEvent::Housing {
            purchase_cost,
            purchase_age,
        } => {
            if age == purchase_age {
                purchase_cost
            } else if age > purchase_age {
                purchase_cost * HOUSING_ANNUAL_TAX_RATE
            } else {
                0.0
            }
        }
        LifeEvent::Caregiving {
            lump_sum,
            cost_per_year,
        } => {
            let start_age = base_age
                .max(CAREGIVING_BASE_AGE)
                .max(CAREGIVING_EARLIEST_AGE);
            if age < start_age {
                return 0.0;
            }
            let lump = if age == start_age { lump_sum } else { 0.0 };
            lump + cost_per_year
        }
        LifeEvent::Travel {
            cost,
            interval_years,
        } => {
            let start_age = (base_age + TRAVEL_OFFSET_YEARS).max(TRAVEL_EARLIEST_AGE);
            let interval = interval_or(interval_years, DEFAULT_TRAVEL_INTERVAL_YEARS);
            if age >= start_age && (age - start_age) % interval == 0 {
                cost
            } else {
                0.0
            }
        }
    }
}

fn interval_or(interval_years: u32, default: u32) -> u32 {
    if interval_years == 0 {
        default
    } else {
        interval_years
    }
}

/// Contributions run only while working and stop at retirement.
pub fn investment_contribution_for_year(inputs: &ProjectionInput, age: u32) -> f64 {
    match inputs.investment {
        Some(plan) if age < inputs.retirement_age && plan.monthly_amount > 0.0 => {
            plan.monthly_amount * 12.0
        }
        _ => 0.0,
    }
}
