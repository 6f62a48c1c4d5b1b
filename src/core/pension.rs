use serde::Serialize;

use super::types::ContributionYears;

/// Full national (basic) pension for 40 credited years, yen per year.
pub const NATIONAL_FULL_ANNUAL_BENEFIT_YEN: f64 = 816_000.0;
pub const NATIONAL_MAX_CREDIT_YEARS: u32 = 40;
pub const NATIONAL_ELIGIBILITY_YEARS: u32 = 25;
pub const EMPLOYEE_MAX_YEARS: u32 = 52;
pub const PENSION_START_AGE: u32 = 65;
pub const YEN_PER_UNIT: f64 = 10_000.0;

const NATIONAL_ENTRY_AGE: u32 = 20;
const NATIONAL_EXIT_AGE: u32 = 60;
const EMPLOYEE_ENTRY_AGE: u32 = 18;

const TAKE_HOME_TO_GROSS: f64 = 1.35;
const STANDARD_REWARD_FLOOR_YEN: f64 = 88_000.0;
const STANDARD_REWARD_CAP_YEN: f64 = 650_000.0;
const EMPLOYEE_ACCRUAL_RATE: f64 = 5.481 / 1000.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionBreakdown {
    pub national_monthly: f64,
    pub employee_monthly: f64,
    pub total_monthly: f64,
}

pub fn national_monthly_benefit(total_years: u32) -> f64 {
    let credited = total_years.min(NATIONAL_MAX_CREDIT_YEARS) as f64;
    NATIONAL_FULL_ANNUAL_BENEFIT_YEN * (credited / NATIONAL_MAX_CREDIT_YEARS as f64) / 12.0
}

/// Earnings-related tier. `monthly_income` is take-home pay in man-yen; it is
/// grossed up and clamped to the standard-reward band before accrual.
pub fn employee_monthly_benefit(total_years: u32, monthly_income: f64) -> f64 {
    if total_years == 0 || monthly_income <= 0.0 {
        return 0.0;
    }

    let estimated_gross_salary = monthly_income * YEN_PER_UNIT * TAKE_HOME_TO_GROSS;
    let standard_reward =
        estimated_gross_salary.clamp(STANDARD_REWARD_FLOOR_YEN, STANDARD_REWARD_CAP_YEN);
    let annual_benefit = standard_reward * EMPLOYEE_ACCRUAL_RATE * (total_years * 12) as f64;
    (annual_benefit / 12.0).max(0.0)
}

pub fn estimate_breakdown(years: &ContributionYears, monthly_income: f64) -> PensionBreakdown {
    let national_monthly = national_monthly_benefit(years.total_national());
    let employee_monthly = employee_monthly_benefit(years.total_employee(), monthly_income);
    PensionBreakdown {
        national_monthly,
        employee_monthly,
        total_monthly: national_monthly + employee_monthly,
    }
}

/// Monthly benefit in yen.
pub fn estimate_monthly_benefit(years: &ContributionYears, monthly_income: f64) -> f64 {
    estimate_breakdown(years, monthly_income).total_monthly
}

/// Monthly benefit in the same unit as income (man-yen).
pub fn monthly_benefit_in_units(years: &ContributionYears, monthly_income: f64) -> f64 {
    estimate_monthly_benefit(years, monthly_income) / YEN_PER_UNIT
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    pub max_total: u32,
    pub max_past: u32,
    pub max_future: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionLimits {
    pub national: TierLimits,
    pub employee: TierLimits,
}

/// Upper bounds on the year counts a person of `age` can plausibly report.
/// Future allowances shrink by the past years already recorded.
pub fn contribution_limits(
    age: u32,
    retirement_age: u32,
    recorded: &ContributionYears,
) -> ContributionLimits {
    let national = TierLimits {
        max_total: NATIONAL_MAX_CREDIT_YEARS,
        max_past: age
            .saturating_sub(NATIONAL_ENTRY_AGE)
            .min(NATIONAL_MAX_CREDIT_YEARS),
        max_future: NATIONAL_EXIT_AGE
            .saturating_sub(age)
            .min(NATIONAL_MAX_CREDIT_YEARS.saturating_sub(recorded.national_past)),
    };
    let employee = TierLimits {
        max_total: EMPLOYEE_MAX_YEARS,
        max_past: age.saturating_sub(EMPLOYEE_ENTRY_AGE).min(EMPLOYEE_MAX_YEARS),
        max_future: retirement_age
            .saturating_sub(age)
            .min(EMPLOYEE_MAX_YEARS.saturating_sub(recorded.employee_past)),
    };
    ContributionLimits { national, employee }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    Employee,
    CivilServant,
    SelfEmployed,
    Other,
}

impl Occupation {
    pub fn is_employee_like(self) -> bool {
        matches!(self, Occupation::Employee | Occupation::CivilServant)
    }
}

/// Future employee-pension years assumed when the user has not entered any.
pub fn default_employee_future_years(limits: &ContributionLimits, occupation: Occupation) -> u32 {
    if occupation.is_employee_like() {
        limits.employee.max_future
    } else {
        0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PensionTier {
    National,
    Employee,
}

impl PensionTier {
    pub fn max_years(self) -> u32 {
        match self {
            PensionTier::National => NATIONAL_MAX_CREDIT_YEARS,
            PensionTier::Employee => EMPLOYEE_MAX_YEARS,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CoverageStatus {
    NotEnrolled,
    #[serde(rename_all = "camelCase")]
    ExceedsMaximum { total_years: u32, max_years: u32 },
    #[serde(rename_all = "camelCase")]
    BelowEligibility { total_years: u32 },
    Full,
    #[serde(rename_all = "camelCase")]
    Partial { percent_of_full: u32 },
}

pub fn coverage_status(tier: PensionTier, total_years: u32) -> CoverageStatus {
    let max_years = tier.max_years();
    if total_years == 0 {
        CoverageStatus::NotEnrolled
    } else if total_years > max_years {
        CoverageStatus::ExceedsMaximum {
            total_years,
            max_years,
        }
    } else if tier == PensionTier::National && total_years < NATIONAL_ELIGIBILITY_YEARS {
        CoverageStatus::BelowEligibility { total_years }
    } else if total_years == max_years {
        CoverageStatus::Full
    } else {
        let percent = (total_years as f64 / max_years as f64 * 100.0).round() as u32;
        CoverageStatus::Partial {
            percent_of_full: percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PensionAdvice {
    NationalNotEligible { years: u32 },
    NationalBelowFull { years: u32 },
    EmployeeEnrolled { years: u32 },
    EmployeeNotEnrolled,
}

pub fn pension_advice(years: &ContributionYears) -> Vec<PensionAdvice> {
    let mut advice = Vec::with_capacity(2);

    let national = years.total_national();
    if national < NATIONAL_ELIGIBILITY_YEARS {
        advice.push(PensionAdvice::NationalNotEligible { years: national });
    } else if national < NATIONAL_MAX_CREDIT_YEARS {
        advice.push(PensionAdvice::NationalBelowFull { years: national });
    }

    let employee = years.total_employee();
    if employee > 0 {
        advice.push(PensionAdvice::EmployeeEnrolled { years: employee });
    } else {
        advice.push(PensionAdvice::EmployeeNotEnrolled);
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn years(np: u32, nf: u32, ep: u32, ef: u32) -> ContributionYears {
        ContributionYears {
            national_past: np,
            national_future: nf,
            employee_past: ep,
            employee_future: ef,
        }
    }

    #[test]
    fn national_tier_is_prorated_and_capped_at_forty_years() {
        assert_approx(national_monthly_benefit(40), 68_000.0);
        assert_approx(national_monthly_benefit(20), 34_000.0);
        assert_approx(national_monthly_benefit(45), 68_000.0);
        assert_approx(national_monthly_benefit(0), 0.0);
    }

    #[test]
    fn employee_tier_uses_grossed_up_standard_reward() {
        // 30 * 10_000 * 1.35 = 405_000 yen, inside the band.
        assert_approx(employee_monthly_benefit(20, 30.0), 405_000.0 * 0.005481 * 20.0);
    }

    #[test]
    fn employee_tier_clamps_standard_reward_to_band() {
        assert_approx(employee_monthly_benefit(10, 5.0), 88_000.0 * 0.005481 * 10.0);
        assert_approx(employee_monthly_benefit(10, 600.0), 650_000.0 * 0.005481 * 10.0);
    }

    #[test]
    fn employee_tier_requires_years_and_income() {
        assert_approx(employee_monthly_benefit(0, 30.0), 0.0);
        assert_approx(employee_monthly_benefit(20, 0.0), 0.0);
    }

    #[test]
    fn zero_years_on_both_tiers_is_zero_benefit() {
        let breakdown = estimate_breakdown(&years(0, 0, 0, 0), 30.0);
        assert_approx(breakdown.total_monthly, 0.0);
        assert_approx(monthly_benefit_in_units(&years(0, 0, 0, 0), 30.0), 0.0);
    }

    #[test]
    fn breakdown_total_matches_sum_and_unit_conversion() {
        let y = years(10, 20, 5, 15);
        let breakdown = estimate_breakdown(&y, 30.0);
        assert_approx(
            breakdown.total_monthly,
            breakdown.national_monthly + breakdown.employee_monthly,
        );
        assert_approx(estimate_monthly_benefit(&y, 30.0), breakdown.total_monthly);
        assert_approx(
            monthly_benefit_in_units(&y, 30.0),
            breakdown.total_monthly / 10_000.0,
        );
    }

    #[test]
    fn limits_follow_age_and_recorded_history() {
        let limits = contribution_limits(30, 65, &years(10, 0, 8, 0));
        assert_eq!(limits.national.max_past, 10);
        assert_eq!(limits.national.max_future, 30);
        assert_eq!(limits.employee.max_past, 12);
        assert_eq!(limits.employee.max_future, 35);

        let late = contribution_limits(62, 65, &years(38, 0, 44, 0));
        assert_eq!(late.national.max_past, 40);
        assert_eq!(late.national.max_future, 0);
        assert_eq!(late.employee.max_past, 44);
        assert_eq!(late.employee.max_future, 3);
    }

    #[test]
    fn limits_never_underflow_for_young_or_overfilled_histories() {
        let young = contribution_limits(16, 65, &years(0, 0, 0, 0));
        assert_eq!(young.national.max_past, 0);
        assert_eq!(young.employee.max_past, 0);

        let overfilled = contribution_limits(40, 65, &years(45, 0, 60, 0));
        assert_eq!(overfilled.national.max_future, 0);
        assert_eq!(overfilled.employee.max_future, 0);
    }

    #[test]
    fn default_future_years_depend_on_occupation() {
        let limits = contribution_limits(30, 65, &years(0, 0, 0, 0));
        assert_eq!(default_employee_future_years(&limits, Occupation::Employee), 35);
        assert_eq!(default_employee_future_years(&limits, Occupation::CivilServant), 35);
        assert_eq!(default_employee_future_years(&limits, Occupation::SelfEmployed), 0);
    }

    #[test]
    fn coverage_status_classifies_totals() {
        assert_eq!(
            coverage_status(PensionTier::National, 0),
            CoverageStatus::NotEnrolled
        );
        assert_eq!(
            coverage_status(PensionTier::National, 41),
            CoverageStatus::ExceedsMaximum {
                total_years: 41,
                max_years: 40
            }
        );
        assert_eq!(
            coverage_status(PensionTier::National, 24),
            CoverageStatus::BelowEligibility { total_years: 24 }
        );
        assert_eq!(coverage_status(PensionTier::National, 40), CoverageStatus::Full);
        assert_eq!(
            coverage_status(PensionTier::National, 30),
            CoverageStatus::Partial {
                percent_of_full: 75
            }
        );
        // The eligibility floor only applies to the national tier.
        assert_eq!(
            coverage_status(PensionTier::Employee, 10),
            CoverageStatus::Partial {
                percent_of_full: 19
            }
        );
    }

    #[test]
    fn pension_advice_reflects_both_tiers() {
        assert_eq!(
            pension_advice(&years(5, 10, 0, 0)),
            vec![
                PensionAdvice::NationalNotEligible { years: 15 },
                PensionAdvice::EmployeeNotEnrolled,
            ]
        );
        assert_eq!(
            pension_advice(&years(10, 20, 2, 3)),
            vec![
                PensionAdvice::NationalBelowFull { years: 30 },
                PensionAdvice::EmployeeEnrolled { years: 5 },
            ]
        );
        assert_eq!(
            pension_advice(&years(20, 20, 0, 1)),
            vec![PensionAdvice::EmployeeEnrolled { years: 1 }]
        );
    }
}
