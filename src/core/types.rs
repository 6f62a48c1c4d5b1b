use serde::Serialize;

/// Monthly living-expense categories offered by the input form.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixedCostCategory {
    Housing,
    Food,
    Utilities,
    Communication,
    Insurance,
    Vehicle,
    Education,
    Subscriptions,
    Others,
}

impl FixedCostCategory {
    /// Largest monthly amount the form accepts for the category.
    pub fn monthly_cap(self) -> f64 {
        match self {
            FixedCostCategory::Housing => 50.0,
            FixedCostCategory::Food => 20.0,
            FixedCostCategory::Utilities => 10.0,
            FixedCostCategory::Communication => 5.0,
            FixedCostCategory::Insurance => 10.0,
            FixedCostCategory::Vehicle => 10.0,
            FixedCostCategory::Education => 20.0,
            FixedCostCategory::Subscriptions => 5.0,
            FixedCostCategory::Others => 10.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedCost {
    pub category: FixedCostCategory,
    pub monthly_amount: f64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifeEventKind {
    Marriage,
    Car,
    Children,
    Housing,
    Caregiving,
    Travel,
}

/// Per-user parameters that the standard event catalogue needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LifeEventDetails {
    pub children_count: u32,
    pub housing_purchase_age: u32,
}

pub const MARRIAGE_COST: f64 = 300.0;
pub const CAR_PURCHASE_COST: f64 = 250.0;
pub const CAR_MAINTENANCE_PER_YEAR: f64 = 48.0;
pub const CAR_REPLACEMENT_INTERVAL_YEARS: u32 = 10;
pub const CHILD_COST_PER_CHILD: f64 = 1_800.0;
pub const HOUSING_PURCHASE_COST: f64 = 3_500.0;
pub const CAREGIVING_LUMP_SUM: f64 = 100.0;
pub const CAREGIVING_COST_PER_YEAR: f64 = 96.0;
pub const TRAVEL_COST: f64 = 100.0;
pub const TRAVEL_INTERVAL_YEARS: u32 = 5;

impl LifeEventKind {
    pub const ALL: [LifeEventKind; 6] = [
        LifeEventKind::Marriage,
        LifeEventKind::Car,
        LifeEventKind::Children,
        LifeEventKind::Housing,
        LifeEventKind::Caregiving,
        LifeEventKind::Travel,
    ];

    /// Builds the catalogue event for this kind with its standard costs.
    pub fn standard(self, details: &LifeEventDetails) -> LifeEvent {
        match self {
            LifeEventKind::Marriage => LifeEvent::Marriage {
                cost: MARRIAGE_COST,
            },
            LifeEventKind::Car => LifeEvent::Car {
                purchase_cost: CAR_PURCHASE_COST,
                maintenance_per_year: CAR_MAINTENANCE_PER_YEAR,
                interval_years: CAR_REPLACEMENT_INTERVAL_YEARS,
            },
            LifeEventKind::Children => LifeEvent::Children {
                cost_per_child: CHILD_COST_PER_CHILD,
                count: details.children_count,
            },
            LifeEventKind::Housing => LifeEvent::Housing {
                purchase_cost: HOUSING_PURCHASE_COST,
                purchase_age: details.housing_purchase_age,
            },
            LifeEventKind::Caregiving => LifeEvent::Caregiving {
                lump_sum: CAREGIVING_LUMP_SUM,
                cost_per_year: CAREGIVING_COST_PER_YEAR,
            },
            LifeEventKind::Travel => LifeEvent::Travel {
                cost: TRAVEL_COST,
                interval_years: TRAVEL_INTERVAL_YEARS,
            },
        }
    }
}

/// An enabled standard life event. Disabled events are simply absent from
/// `ProjectionInput::life_events`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LifeEvent {
    Marriage {
        cost: f64,
    },
    Car {
        purchase_cost: f64,
        maintenance_per_year: f64,
        interval_years: u32,
    },
    Children {
        cost_per_child: f64,
        count: u32,
    },
    Housing {
        purchase_cost: f64,
        purchase_age: u32,
    },
    Caregiving {
        lump_sum: f64,
        cost_per_year: f64,
    },
    Travel {
        cost: f64,
        interval_years: u32,
    },
}

impl LifeEvent {
    pub fn kind(&self) -> LifeEventKind {
        match self {
            LifeEvent::Marriage { .. } => LifeEventKind::Marriage,
            LifeEvent::Car { .. } => LifeEventKind::Car,
            LifeEvent::Children { .. } => LifeEventKind::Children,
            LifeEvent::Housing { .. } => LifeEventKind::Housing,
            LifeEvent::Caregiving { .. } => LifeEventKind::Caregiving,
            LifeEvent::Travel { .. } => LifeEventKind::Travel,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomEvent {
    pub name: String,
    pub amount: f64,
    pub trigger_age: u32,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionYears {
    pub national_past: u32,
    pub national_future: u32,
    pub employee_past: u32,
    pub employee_future: u32,
}

impl ContributionYears {
    pub fn total_national(&self) -> u32 {
        self.national_past + self.national_future
    }

    pub fn total_employee(&self) -> u32 {
        self.employee_past + self.employee_future
    }
}

/// Recurring tax-advantaged (NISA-style) investment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InvestmentPlan {
    pub monthly_amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionInput {
    pub current_age: u32,
    pub monthly_income: f64,
    pub fixed_costs: Vec<FixedCost>,
    pub life_events: Vec<LifeEvent>,
    pub custom_events: Vec<CustomEvent>,
    pub investment: Option<InvestmentPlan>,
    pub contribution_years: ContributionYears,
    pub retirement_age: u32,
    pub life_expectancy_age: u32,
    /// Annual investment return in percent, e.g. `3.0`.
    pub annual_return_rate: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Rating {
    S,
    A,
    B,
    C,
    D,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub age: u32,
    pub income: f64,
    pub cash_expense: f64,
    pub investment_contribution: f64,
    pub net_cash_flow: f64,
    pub cumulative_cash: f64,
    pub investment_balance: f64,
    pub total_assets: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_income: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
    pub retirement_assets: f64,
    pub retirement_cash: f64,
    pub retirement_investment_balance: f64,
    pub final_investment_contribution_sum: f64,
    pub final_investment_balance: f64,
    pub year_series: Vec<YearRecord>,
    pub rating: Rating,
    pub average_annual_income: f64,
    pub peer_percentile_rank: u8,
}
