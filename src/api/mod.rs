use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    Advice, AdviceSummary, ContributionLimits, ContributionYears, CoverageStatus, CustomEvent,
    FixedCost, FixedCostCategory, InvestmentPlan, LifeEventDetails, LifeEventKind, Occupation,
    PeerComparison, PensionAdvice, PensionBreakdown, PensionTier, ProjectionInput,
    ProjectionResult, contribution_limits, coverage_status, current_age,
    default_employee_future_years, derive_advice, estimate_breakdown, monthly_benefit_in_units,
    peer_comparison, pension_advice, project,
};

const MIN_MONTHLY_INCOME: f64 = 5.0;
const MAX_MONTHLY_INCOME: f64 = 300.0;
const MAX_CHILDREN: u32 = 10;
const LATEST_HOUSING_AGE: u32 = 70;
const MIN_MONTHLY_INVESTMENT: f64 = 0.1;
const MAX_MONTHLY_INVESTMENT: f64 = 30.0;
const EARLIEST_RETIREMENT_AGE: u32 = 55;
const LATEST_RETIREMENT_AGE: u32 = 75;
const MIN_LIFE_EXPECTANCY: u32 = 80;
const MAX_LIFE_EXPECTANCY: u32 = 100;
const MAX_RETURN_RATE: f64 = 15.0;
const MAX_EVENT_NAME_CHARS: usize = 30;
const MIN_EVENT_AMOUNT: f64 = 1.0;
const MAX_EVENT_AMOUNT: f64 = 10_000.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliOccupation {
    Employee,
    CivilServant,
    SelfEmployed,
    Other,
}

impl From<CliOccupation> for Occupation {
    fn from(value: CliOccupation) -> Self {
        match value {
            CliOccupation::Employee => Occupation::Employee,
            CliOccupation::CivilServant => Occupation::CivilServant,
            CliOccupation::SelfEmployed => Occupation::SelfEmployed,
            CliOccupation::Other => Occupation::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCostCategory {
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

impl From<CliCostCategory> for FixedCostCategory {
    fn from(value: CliCostCategory) -> Self {
        match value {
            CliCostCategory::Housing => FixedCostCategory::Housing,
            CliCostCategory::Food => FixedCostCategory::Food,
            CliCostCategory::Utilities => FixedCostCategory::Utilities,
            CliCostCategory::Communication => FixedCostCategory::Communication,
            CliCostCategory::Insurance => FixedCostCategory::Insurance,
            CliCostCategory::Vehicle => FixedCostCategory::Vehicle,
            CliCostCategory::Education => FixedCostCategory::Education,
            CliCostCategory::Subscriptions => FixedCostCategory::Subscriptions,
            CliCostCategory::Others => FixedCostCategory::Others,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLifeEvent {
    Marriage,
    Car,
    Children,
    Housing,
    Caregiving,
    Travel,
}

impl From<CliLifeEvent> for LifeEventKind {
    fn from(value: CliLifeEvent) -> Self {
        match value {
            CliLifeEvent::Marriage => LifeEventKind::Marriage,
            CliLifeEvent::Car => LifeEventKind::Car,
            CliLifeEvent::Children => LifeEventKind::Children,
            CliLifeEvent::Housing => LifeEventKind::Housing,
            CliLifeEvent::Caregiving => LifeEventKind::Caregiving,
            CliLifeEvent::Travel => LifeEventKind::Travel,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiOccupation {
    #[serde(alias = "company-employee", alias = "companyEmployee")]
    Employee,
    #[serde(alias = "civilServant", alias = "civil_servant", alias = "public-servant")]
    CivilServant,
    #[serde(alias = "selfEmployed", alias = "self_employed", alias = "freelance")]
    SelfEmployed,
    Other,
}

impl From<ApiOccupation> for CliOccupation {
    fn from(value: ApiOccupation) -> Self {
        match value {
            ApiOccupation::Employee => CliOccupation::Employee,
            ApiOccupation::CivilServant => CliOccupation::CivilServant,
            ApiOccupation::SelfEmployed => CliOccupation::SelfEmployed,
            ApiOccupation::Other => CliOccupation::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiCostCategory {
    #[serde(alias = "rent")]
    Housing,
    Food,
    Utilities,
    #[serde(alias = "phone")]
    Communication,
    Insurance,
    #[serde(alias = "car")]
    Vehicle,
    Education,
    Subscriptions,
    #[serde(alias = "other")]
    Others,
}

impl From<ApiCostCategory> for CliCostCategory {
    fn from(value: ApiCostCategory) -> Self {
        match value {
            ApiCostCategory::Housing => CliCostCategory::Housing,
            ApiCostCategory::Food => CliCostCategory::Food,
            ApiCostCategory::Utilities => CliCostCategory::Utilities,
            ApiCostCategory::Communication => CliCostCategory::Communication,
            ApiCostCategory::Insurance => CliCostCategory::Insurance,
            ApiCostCategory::Vehicle => CliCostCategory::Vehicle,
            ApiCostCategory::Education => CliCostCategory::Education,
            ApiCostCategory::Subscriptions => CliCostCategory::Subscriptions,
            ApiCostCategory::Others => CliCostCategory::Others,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiFixedCost {
    amount: Option<f64>,
    #[serde(alias = "isActive")]
    active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiLifeEvents {
    marriage: Option<bool>,
    car: Option<bool>,
    children: Option<bool>,
    housing: Option<bool>,
    caregiving: Option<bool>,
    travel: Option<bool>,
    #[serde(alias = "investment")]
    nisa: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCustomEvent {
    name: String,
    amount: f64,
    #[serde(alias = "triggerAge")]
    age: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<u32>,
    #[serde(alias = "birthday")]
    birth_date: Option<NaiveDate>,
    #[serde(alias = "monthlyIncome")]
    income: Option<f64>,
    occupation: Option<ApiOccupation>,

    national_pension_past_years: Option<u32>,
    national_pension_future_years: Option<u32>,
    employee_pension_past_years: Option<u32>,
    employee_pension_future_years: Option<u32>,

    fixed_costs: Option<BTreeMap<ApiCostCategory, ApiFixedCost>>,
    life_events: Option<ApiLifeEvents>,
    children_count: Option<u32>,
    housing_age: Option<u32>,
    nisa_amount: Option<f64>,
    custom_events: Option<Vec<ApiCustomEvent>>,

    retirement_age: Option<u32>,
    #[serde(alias = "expectedLifeExpectancy")]
    life_expectancy: Option<u32>,
    investment_return_rate: Option<f64>,
}

#[derive(Args, Debug, Clone)]
struct Cli {
    #[arg(long, default_value_t = 30, help = "Current age in whole years")]
    current_age: u32,
    #[arg(
        long,
        help = "Birth date (YYYY-MM-DD); overrides --current-age when given"
    )]
    birth_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 30.0, help = "Monthly take-home income, man-yen")]
    income: f64,
    #[arg(long, value_enum, default_value_t = CliOccupation::Employee)]
    occupation: CliOccupation,
    #[arg(long, default_value_t = 0)]
    national_pension_past_years: u32,
    #[arg(long, default_value_t = 20)]
    national_pension_future_years: u32,
    #[arg(long, default_value_t = 0)]
    employee_pension_past_years: u32,
    #[arg(
        long,
        help = "Future employee pension years; defaults from occupation and retirement age"
    )]
    employee_pension_future_years: Option<u32>,
    #[arg(
        long = "fixed-cost",
        value_parser = parse_fixed_cost,
        help = "Monthly fixed cost as CATEGORY=AMOUNT, repeatable"
    )]
    fixed_costs: Vec<FixedCost>,
    #[arg(long = "event", value_enum, help = "Enable a standard life event, repeatable")]
    events: Vec<CliLifeEvent>,
    #[arg(long, default_value_t = 1)]
    children_count: u32,
    #[arg(long, default_value_t = 35, help = "Age at which the home is bought")]
    housing_age: u32,
    #[arg(long, help = "Enable the monthly investment plan")]
    invest: bool,
    #[arg(long, default_value_t = 3.3, help = "Monthly investment, man-yen")]
    nisa_amount: f64,
    #[arg(
        long = "custom-event",
        value_parser = parse_custom_event,
        help = "One-off expense as NAME:AMOUNT:AGE, repeatable"
    )]
    custom_events: Vec<CustomEvent>,
    #[arg(long, default_value_t = 65)]
    retirement_age: u32,
    #[arg(long, default_value_t = 95)]
    life_expectancy: u32,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Expected annual investment return in percent"
    )]
    investment_return_rate: f64,
}

/// Arguments of the `project` subcommand.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[arg(
        long,
        help = "JSON payload file in the HTTP API format; flags are ignored when given"
    )]
    input: Option<PathBuf>,
    #[command(flatten)]
    cli: Cli,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PensionSummary {
    breakdown: PensionBreakdown,
    monthly_benefit: f64,
    annual_benefit: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    current_age: u32,
    result: ProjectionResult,
    pension: PensionSummary,
    peer: PeerComparison,
    advice: Vec<Advice>,
    summary: AdviceSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PensionResponse {
    current_age: u32,
    contribution_years: ContributionYears,
    limits: ContributionLimits,
    pension: PensionSummary,
    national_coverage: CoverageStatus,
    employee_coverage: CoverageStatus,
    advice: Vec<PensionAdvice>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn parse_fixed_cost(raw: &str) -> Result<FixedCost, String> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{raw}'"))?;
    let category = CliCostCategory::from_str(name.trim(), true)?;
    let monthly_amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(FixedCost {
        category: category.into(),
        monthly_amount,
        active: true,
    })
}

fn parse_custom_event(raw: &str) -> Result<CustomEvent, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(age), Some(amount), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected NAME:AMOUNT:AGE, got '{raw}'"));
    };
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    let trigger_age = age
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid age '{age}': {e}"))?;
    Ok(CustomEvent {
        name: name.to_string(),
        amount,
        trigger_age,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn build_inputs(cli: Cli) -> Result<ProjectionInput, String> {
    build_inputs_on(cli, today())
}

fn build_inputs_on(cli: Cli, today: NaiveDate) -> Result<ProjectionInput, String> {
    let age = match cli.birth_date {
        Some(birth_date) => {
            current_age(birth_date, today).map_err(|e| format!("--birth-date: {e}"))?
        }
        None => cli.current_age,
    };

    if !cli.income.is_finite() || !(MIN_MONTHLY_INCOME..=MAX_MONTHLY_INCOME).contains(&cli.income)
    {
        return Err(format!(
            "--income must be between {MIN_MONTHLY_INCOME} and {MAX_MONTHLY_INCOME}"
        ));
    }

    let national_max = PensionTier::National.max_years();
    if cli.national_pension_past_years > national_max {
        return Err(format!(
            "--national-pension-past-years must be between 0 and {national_max}"
        ));
    }
    if cli.national_pension_future_years > national_max {
        return Err(format!(
            "--national-pension-future-years must be between 0 and {national_max}"
        ));
    }
    if cli.national_pension_past_years + cli.national_pension_future_years > national_max {
        return Err(format!(
            "--national-pension-past-years + --national-pension-future-years must be <= {national_max}"
        ));
    }

    let recorded = ContributionYears {
        national_past: cli.national_pension_past_years,
        national_future: cli.national_pension_future_years,
        employee_past: cli.employee_pension_past_years,
        employee_future: 0,
    };
    let limits = contribution_limits(age, cli.retirement_age, &recorded);
    let employee_future = cli
        .employee_pension_future_years
        .unwrap_or_else(|| default_employee_future_years(&limits, cli.occupation.into()));

    let employee_max = PensionTier::Employee.max_years();
    if cli.employee_pension_past_years > employee_max {
        return Err(format!(
            "--employee-pension-past-years must be between 0 and {employee_max}"
        ));
    }
    if employee_future > employee_max {
        return Err(format!(
            "--employee-pension-future-years must be between 0 and {employee_max}"
        ));
    }
    if cli.employee_pension_past_years + employee_future > employee_max {
        return Err(format!(
            "--employee-pension-past-years + --employee-pension-future-years must be <= {employee_max}"
        ));
    }

    let mut seen_categories = BTreeSet::new();
    for cost in &cli.fixed_costs {
        if !seen_categories.insert(cost.category) {
            return Err(format!(
                "--fixed-cost {} given more than once",
                category_name(cost.category)
            ));
        }
        let cap = cost.category.monthly_cap();
        if !cost.monthly_amount.is_finite() || !(0.0..=cap).contains(&cost.monthly_amount) {
            return Err(format!(
                "--fixed-cost {} must be between 0 and {cap}",
                category_name(cost.category)
            ));
        }
    }

    let active_fixed_costs = cli
        .fixed_costs
        .iter()
        .filter(|cost| cost.active)
        .map(|cost| cost.monthly_amount)
        .sum::<f64>();
    if active_fixed_costs > cli.income {
        return Err(format!(
            "--fixed-cost total ({active_fixed_costs}) must not exceed --income ({})",
            cli.income
        ));
    }

    let enabled: Vec<LifeEventKind> = LifeEventKind::ALL
        .into_iter()
        .filter(|kind| cli.events.iter().any(|e| LifeEventKind::from(*e) == *kind))
        .collect();

    if cli.children_count > MAX_CHILDREN {
        return Err(format!("--children-count must be between 0 and {MAX_CHILDREN}"));
    }
    if enabled.contains(&LifeEventKind::Housing)
        && !(age..=LATEST_HOUSING_AGE).contains(&cli.housing_age)
    {
        return Err(format!(
            "--housing-age must be between current age ({age}) and {LATEST_HOUSING_AGE}"
        ));
    }

    let investment = if cli.invest {
        if !cli.nisa_amount.is_finite()
            || !(MIN_MONTHLY_INVESTMENT..=MAX_MONTHLY_INVESTMENT).contains(&cli.nisa_amount)
        {
            return Err(format!(
                "--nisa-amount must be between {MIN_MONTHLY_INVESTMENT} and {MAX_MONTHLY_INVESTMENT}"
            ));
        }
        Some(InvestmentPlan {
            monthly_amount: cli.nisa_amount,
        })
    } else {
        None
    };

    let earliest_retirement = EARLIEST_RETIREMENT_AGE.max(age);
    if !(earliest_retirement..=LATEST_RETIREMENT_AGE).contains(&cli.retirement_age) {
        return Err(format!(
            "--retirement-age must be between {earliest_retirement} and {LATEST_RETIREMENT_AGE}"
        ));
    }

    let earliest_life_expectancy = MIN_LIFE_EXPECTANCY.max(cli.retirement_age + 1);
    if !(earliest_life_expectancy..=MAX_LIFE_EXPECTANCY).contains(&cli.life_expectancy) {
        return Err(format!(
            "--life-expectancy must be between {earliest_life_expectancy} and {MAX_LIFE_EXPECTANCY}"
        ));
    }

    if !cli.investment_return_rate.is_finite()
        || !(0.0..=MAX_RETURN_RATE).contains(&cli.investment_return_rate)
    {
        return Err(format!(
            "--investment-return-rate must be between 0 and {MAX_RETURN_RATE}"
        ));
    }

    for event in &cli.custom_events {
        let name_chars = event.name.trim().chars().count();
        if !(1..=MAX_EVENT_NAME_CHARS).contains(&name_chars) {
            return Err(format!(
                "--custom-event name must be 1 to {MAX_EVENT_NAME_CHARS} characters"
            ));
        }
        if !event.amount.is_finite()
            || !(MIN_EVENT_AMOUNT..=MAX_EVENT_AMOUNT).contains(&event.amount)
        {
            return Err(format!(
                "--custom-event '{}' amount must be between {MIN_EVENT_AMOUNT} and {MAX_EVENT_AMOUNT}",
                event.name.trim()
            ));
        }
        if !(age..=cli.life_expectancy).contains(&event.trigger_age) {
            return Err(format!(
                "--custom-event '{}' age must be between {age} and {}",
                event.name.trim(),
                cli.life_expectancy
            ));
        }
    }

    let details = LifeEventDetails {
        children_count: cli.children_count,
        housing_purchase_age: cli.housing_age,
    };

    Ok(ProjectionInput {
        current_age: age,
        monthly_income: cli.income,
        fixed_costs: cli.fixed_costs,
        life_events: enabled.iter().map(|kind| kind.standard(&details)).collect(),
        custom_events: cli
            .custom_events
            .into_iter()
            .map(|event| CustomEvent {
                name: event.name.trim().to_string(),
                ..event
            })
            .collect(),
        investment,
        contribution_years: ContributionYears {
            employee_future,
            ..recorded
        },
        retirement_age: cli.retirement_age,
        life_expectancy_age: cli.life_expectancy,
        annual_return_rate: cli.investment_return_rate,
    })
}

fn category_name(category: FixedCostCategory) -> &'static str {
    match category {
        FixedCostCategory::Housing => "housing",
        FixedCostCategory::Food => "food",
        FixedCostCategory::Utilities => "utilities",
        FixedCostCategory::Communication => "communication",
        FixedCostCategory::Insurance => "insurance",
        FixedCostCategory::Vehicle => "vehicle",
        FixedCostCategory::Education => "education",
        FixedCostCategory::Subscriptions => "subscriptions",
        FixedCostCategory::Others => "others",
    }
}

/// Runs the `project` subcommand and returns the response as pretty JSON.
pub fn run_cli_projection(args: ProjectArgs) -> Result<String, String> {
    let inputs = match &args.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            api_request_from_json_on(&raw, today())?
        }
        None => build_inputs(args.cli)?,
    };

    let response = build_project_response(&inputs)?;
    serde_json::to_string_pretty(&response).map_err(|e| format!("cannot encode response: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route(
            "/api/pension",
            get(pension_get_handler).post(pension_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "lifeplan HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(query: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => project_handler_impl(payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn project_post_handler(body: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => project_handler_impl(payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match api_request_from_payload(payload, today()) {
        Ok(inputs) => inputs,
        Err(msg) => {
            warn!(error = %msg, "rejected projection request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match build_project_response(&inputs) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn pension_get_handler(query: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => pension_handler_impl(payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn pension_post_handler(body: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => pension_handler_impl(payload).await,
        Err(rejection) => rejection_response(&rejection.body_text()),
    }
}

async fn pension_handler_impl(payload: ProjectPayload) -> Response {
    match api_request_from_payload(payload, today()) {
        Ok(inputs) => json_response(StatusCode::OK, build_pension_response(&inputs)),
        Err(msg) => {
            warn!(error = %msg, "rejected pension request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn rejection_response(msg: &str) -> Response {
    warn!(error = %msg, "rejected malformed request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn api_request_from_json_on(json: &str, today: NaiveDate) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload, today)
}

fn api_request_from_payload(
    payload: ProjectPayload,
    today: NaiveDate,
) -> Result<ProjectionInput, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.birth_date {
        cli.birth_date = Some(v);
    }
    if let Some(v) = payload.income {
        cli.income = v;
    }
    if let Some(v) = payload.occupation {
        cli.occupation = v.into();
    }
    if let Some(v) = payload.national_pension_past_years {
        cli.national_pension_past_years = v;
    }
    if let Some(v) = payload.national_pension_future_years {
        cli.national_pension_future_years = v;
    }
    if let Some(v) = payload.employee_pension_past_years {
        cli.employee_pension_past_years = v;
    }
    if let Some(v) = payload.employee_pension_future_years {
        cli.employee_pension_future_years = Some(v);
    }
    if let Some(costs) = payload.fixed_costs {
        cli.fixed_costs = costs
            .into_iter()
            .map(|(category, cost)| FixedCost {
                category: CliCostCategory::from(category).into(),
                monthly_amount: cost.amount.unwrap_or(0.0),
                active: cost.active.unwrap_or(true),
            })
            .collect();
    }
    if let Some(events) = payload.life_events {
        let toggles = [
            (events.marriage, CliLifeEvent::Marriage),
            (events.car, CliLifeEvent::Car),
            (events.children, CliLifeEvent::Children),
            (events.housing, CliLifeEvent::Housing),
            (events.caregiving, CliLifeEvent::Caregiving),
            (events.travel, CliLifeEvent::Travel),
        ];
        cli.events = toggles
            .into_iter()
            .filter(|(enabled, _)| enabled.unwrap_or(false))
            .map(|(_, event)| event)
            .collect();
        if let Some(v) = events.nisa {
            cli.invest = v;
        }
    }
    if let Some(v) = payload.children_count {
        cli.children_count = v;
    }
    if let Some(v) = payload.housing_age {
        cli.housing_age = v;
    }
    if let Some(v) = payload.nisa_amount {
        cli.nisa_amount = v;
    }
    if let Some(events) = payload.custom_events {
        cli.custom_events = events
            .into_iter()
            .map(|event| CustomEvent {
                name: event.name,
                amount: event.amount,
                trigger_age: event.age,
            })
            .collect();
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        cli.life_expectancy = v;
    }
    if let Some(v) = payload.investment_return_rate {
        cli.investment_return_rate = v;
    }

    let inputs = build_inputs_on(cli, today)?;
    debug!(
        current_age = inputs.current_age,
        life_events = inputs.life_events.len(),
        custom_events = inputs.custom_events.len(),
        "parsed projection request"
    );
    Ok(inputs)
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        birth_date: None,
        income: 30.0,
        occupation: CliOccupation::Employee,
        national_pension_past_years: 0,
        national_pension_future_years: 20,
        employee_pension_past_years: 0,
        employee_pension_future_years: None,
        fixed_costs: Vec::new(),
        events: Vec::new(),
        children_count: 1,
        housing_age: 35,
        invest: false,
        nisa_amount: 3.3,
        custom_events: Vec::new(),
        retirement_age: 65,
        life_expectancy: 95,
        investment_return_rate: 3.0,
    }
}

fn pension_summary(inputs: &ProjectionInput) -> PensionSummary {
    let monthly_benefit =
        monthly_benefit_in_units(&inputs.contribution_years, inputs.monthly_income);
    PensionSummary {
        breakdown: estimate_breakdown(&inputs.contribution_years, inputs.monthly_income),
        monthly_benefit,
        annual_benefit: monthly_benefit * 12.0,
    }
}

fn build_project_response(inputs: &ProjectionInput) -> Result<ProjectResponse, String> {
    let result = project(inputs).map_err(|e| e.to_string())?;
    let advice = derive_advice(inputs, &result);
    Ok(ProjectResponse {
        current_age: inputs.current_age,
        pension: pension_summary(inputs),
        peer: peer_comparison(result.final_balance, inputs.current_age),
        summary: AdviceSummary::for_rating(result.rating),
        advice,
        result,
    })
}

fn build_pension_response(inputs: &ProjectionInput) -> PensionResponse {
    let years = inputs.contribution_years;
    PensionResponse {
        current_age: inputs.current_age,
        contribution_years: years,
        limits: contribution_limits(inputs.current_age, inputs.retirement_age, &years),
        pension: pension_summary(inputs),
        national_coverage: coverage_status(PensionTier::National, years.total_national()),
        employee_coverage: coverage_status(PensionTier::Employee, years.total_employee()),
        advice: pension_advice(&years),
    }
}
