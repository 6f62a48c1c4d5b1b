use serde::Serialize;

use super::types::{FixedCostCategory, LifeEvent, ProjectionInput, ProjectionResult, Rating};

const HIGH_FIXED_COST_PERCENT: f64 = 50.0;
const ELEVATED_FIXED_COST_PERCENT: f64 = 30.0;
const FOOD_MONTHLY_THRESHOLD: f64 = 6.0;
const CONSERVATIVE_RETURN_PERCENT: f64 = 2.0;
const STANDARD_RETIREMENT_AGE: u32 = 65;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdviceTopic {
    Overall,
    FixedCosts,
    Food,
    Investment,
    InvestmentStrategy,
    Retirement,
    Housing,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    #[serde(rename_all = "camelCase")]
    Rated {
        rating: Rating,
        final_balance: f64,
        life_expectancy_age: u32,
    },
    #[serde(rename_all = "camelCase")]
    FixedCostShare {
        monthly_fixed_costs: f64,
        percent_of_income: f64,
    },
    #[serde(rename_all = "camelCase")]
    FoodAboveThreshold { monthly_amount: f64, threshold: f64 },
    #[serde(rename_all = "camelCase")]
    InvestmentGrowing {
        monthly_amount: f64,
        annual_return_rate: f64,
        final_balance: f64,
    },
    #[serde(rename_all = "camelCase")]
    ConservativeReturn { annual_return_rate: f64 },
    NotInvesting,
    #[serde(rename_all = "camelCase")]
    EarlyRetirementShortfall {
        retirement_age: u32,
        retirement_assets: f64,
    },
    #[serde(rename_all = "camelCase")]
    HousingPurchase { purchase_age: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advice {
    pub topic: AdviceTopic,
    pub priority: Priority,
    pub finding: Finding,
}

impl Advice {
    fn new(topic: AdviceTopic, priority: Priority, finding: Finding) -> Self {
        Self {
            topic,
            priority,
            finding,
        }
    }
}

/// One-line tone of the whole plan.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdviceSummary {
    OnTrack,
    Review,
    Shortfall,
}

impl AdviceSummary {
    pub fn for_rating(rating: Rating) -> Self {
        match rating {
            Rating::S | Rating::A => AdviceSummary::OnTrack,
            Rating::B => AdviceSummary::Review,
            Rating::C | Rating::D => AdviceSummary::Shortfall,
        }
    }
}

/// Findings in a fixed order: overall, fixed costs, food, investment,
/// retirement, housing. Topics with nothing to report are skipped.
pub fn derive_advice(input: &ProjectionInput, result: &ProjectionResult) -> Vec<Advice> {
    let mut advice = vec![overall_advice(input, result)];
    advice.extend(fixed_cost_advice(input));
    advice.extend(food_advice(input));
    advice.extend(investment_advice(input, result));

    if input.retirement_age < STANDARD_RETIREMENT_AGE && result.retirement_assets < 0.0 {
        advice.push(Advice::new(
            AdviceTopic::Retirement,
            Priority::High,
            Finding::EarlyRetirementShortfall {
                retirement_age: input.retirement_age,
                retirement_assets: result.retirement_assets,
            },
        ));
    }

    let housing = input.life_events.iter().find_map(|event| match *event {
        LifeEvent::Housing { purchase_age, .. } => Some(purchase_age),
        _ => None,
    });
    if let Some(purchase_age) = housing {
        advice.push(Advice::new(
            AdviceTopic::Housing,
            Priority::Medium,
            Finding::HousingPurchase { purchase_age },
        ));
    }

    advice
}

fn overall_advice(input: &ProjectionInput, result: &ProjectionResult) -> Advice {
    let priority = match result.rating {
        Rating::S | Rating::A => Priority::Low,
        Rating::B => Priority::Medium,
        Rating::C | Rating::D => Priority::High,
    };
    Advice::new(
        AdviceTopic::Overall,
        priority,
        Finding::Rated {
            rating: result.rating,
            final_balance: result.final_balance,
            life_expectancy_age: input.life_expectancy_age,
        },
    )
}

fn fixed_cost_advice(input: &ProjectionInput) -> Option<Advice> {
    if input.monthly_income <= 0.0 {
        return None;
    }

    let monthly_fixed_costs = input
        .fixed_costs
        .iter()
        .filter(|cost| cost.active)
        .map(|cost| cost.monthly_amount)
        .sum::<f64>();
    let percent_of_income = monthly_fixed_costs / input.monthly_income * 100.0;

    let priority = if percent_of_income > HIGH_FIXED_COST_PERCENT {
        Priority::High
    } else if percent_of_income > ELEVATED_FIXED_COST_PERCENT {
        Priority::Medium
    } else {
        return None;
    };
    Some(Advice::new(
        AdviceTopic::FixedCosts,
        priority,
        Finding::FixedCostShare {
            monthly_fixed_costs,
            percent_of_income,
        },
    ))
}

fn food_advice(input: &ProjectionInput) -> Option<Advice> {
    let food = input
        .fixed_costs
        .iter()
        .filter(|cost| cost.active && cost.category == FixedCostCategory::Food)
        .map(|cost| cost.monthly_amount)
        .sum::<f64>();
    (food > FOOD_MONTHLY_THRESHOLD).then(|| {
        Advice::new(
            AdviceTopic::Food,
            Priority::Medium,
            Finding::FoodAboveThreshold {
                monthly_amount: food,
                threshold: FOOD_MONTHLY_THRESHOLD,
            },
        )
    })
}

fn investment_advice(input: &ProjectionInput, result: &ProjectionResult) -> Vec<Advice> {
    let Some(plan) = input.investment.filter(|plan| plan.monthly_amount > 0.0) else {
        return vec![Advice::new(
            AdviceTopic::Investment,
            Priority::Medium,
            Finding::NotInvesting,
        )];
    };

    let mut advice = Vec::new();
    if result.final_investment_balance > 0.0 {
        advice.push(Advice::new(
            AdviceTopic::Investment,
            Priority::Low,
            Finding::InvestmentGrowing {
                monthly_amount: plan.monthly_amount,
                annual_return_rate: input.annual_return_rate,
                final_balance: result.final_investment_balance,
            },
        ));
        if input.annual_return_rate < CONSERVATIVE_RETURN_PERCENT {
            advice.push(Advice::new(
                AdviceTopic::InvestmentStrategy,
                Priority::Medium,
                Finding::ConservativeReturn {
                    annual_return_rate: input.annual_return_rate,
                },
            ));
        }
    }
    advice
}
