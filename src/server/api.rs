use super::AppState;
use super::error::ApiResult;
use crate::core::{
    BudgetAnalysis, CurrencyCode, Expense, FinancialTips, GoalProjection, GoalRequest, analyze,
    financial_tips, project,
};
use axum::{Json, extract::State};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

fn default_currency() -> String {
    CurrencyCode::BASE.to_string()
}

fn default_target_currency() -> String {
    CurrencyCode::Usd.to_string()
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(alias = "ingresos")]
    pub income: f64,
    #[serde(default, alias = "gastos")]
    pub expenses: Vec<Expense>,
    #[serde(default = "default_currency", alias = "moneda")]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectGoalRequest {
    #[serde(alias = "monto_objetivo")]
    pub target: f64,
    #[serde(default, alias = "ahorro_actual")]
    pub current_savings: f64,
    #[serde(default, alias = "ahorro_mensual")]
    pub monthly_contribution: Option<f64>,
    #[serde(
        default,
        alias = "plazo_deseado",
        deserialize_with = "crate::core::goal::deserialize_months"
    )]
    pub desired_months: Option<i64>,
    #[serde(default = "default_currency", alias = "moneda")]
    pub currency: String,
}

impl From<&ProjectGoalRequest> for GoalRequest {
    fn from(req: &ProjectGoalRequest) -> Self {
        GoalRequest {
            target: req.target,
            current_savings: req.current_savings,
            monthly_contribution: req.monthly_contribution,
            desired_months: req.desired_months,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default, alias = "monto")]
    pub amount: f64,
    #[serde(default = "default_currency", alias = "desde")]
    pub from: String,
    #[serde(default = "default_target_currency", alias = "hasta")]
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ConvertResponse {
    pub original_amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub converted_amount: f64,
    pub rate_used: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: String,
    pub rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyInfo>,
    pub updated_at: DateTime<Utc>,
    pub live: bool,
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn analyze_budget(Json(req): Json<AnalyzeRequest>) -> ApiResult<Json<BudgetAnalysis>> {
    let currency = req.currency.parse::<CurrencyCode>()?;
    let analysis = analyze(req.income, &req.expenses, currency)?;
    Ok(Json(analysis))
}

pub async fn project_goal(
    Json(req): Json<ProjectGoalRequest>,
) -> ApiResult<Json<GoalProjection>> {
    let currency = req.currency.parse::<CurrencyCode>()?;
    let projection = project(&GoalRequest::from(&req), currency, Local::now().date_naive())?;
    Ok(Json(projection))
}

pub async fn recommendations() -> Json<FinancialTips> {
    Json(financial_tips())
}

pub async fn convert_currency(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> ApiResult<Json<ConvertResponse>> {
    let from = req.from.parse::<CurrencyCode>()?;
    let to = req.to.parse::<CurrencyCode>()?;

    let snapshot = state.rates.snapshot().await;
    let converted_amount = snapshot.table.convert(req.amount, from, to);
    debug!(amount = req.amount, %from, %to, converted_amount, "Converted amount");

    Ok(Json(ConvertResponse {
        original_amount: req.amount,
        from,
        to,
        converted_amount,
        rate_used: snapshot.table.cross_rate(from, to),
    }))
}

pub async fn list_currencies(State(state): State<Arc<AppState>>) -> Json<CurrenciesResponse> {
    let snapshot = state.rates.snapshot().await;
    let currencies = snapshot
        .table
        .iter()
        .map(|(code, rate)| CurrencyInfo {
            code,
            name: code.name().to_string(),
            symbol: code.symbol().to_string(),
            rate,
        })
        .collect();

    Json(CurrenciesResponse {
        currencies,
        updated_at: snapshot.updated_at,
        live: snapshot.is_live(),
    })
}
