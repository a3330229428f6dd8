use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use regexblock_application::use_cases::{CreateRuleCommand, CreateRulesBatchCommand};
use regexblock_domain::{Pagination, RuleKind, RuleListFilter};
use tracing::debug;

use crate::{
    dto::{
        BatchRequest, BatchResponse, CreateRuleRequest, RuleListQuery, RuleListResponse,
        RuleResponse, RuleStatsResponse, StatsQuery,
    },
    errors::ApiError,
    middleware::Principal,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(list_rules))
        .route("/rules", post(create_rule))
        .route("/rules/batch", post(create_rules_batch))
        .route("/rules/{id}", get(get_rule_by_id))
        .route("/rules/{id}/stats", get(get_rule_stats))
}

async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<RuleListQuery>,
) -> Result<Json<RuleListResponse>, ApiError> {
    let filter = RuleListFilter::new(query.creator.as_deref(), query.subject.as_deref());
    let page = Pagination::new(query.limit, query.offset);

    let result = state.rules.get_rules.list(&filter, page).await?;
    debug!(total = result.total, "Rules retrieved successfully");

    Ok(Json(RuleListResponse {
        total: result.total,
        rules: result
            .rules
            .into_iter()
            .map(RuleResponse::from_domain)
            .collect(),
    }))
}

async fn get_rule_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RuleResponse>, ApiError> {
    let rule = state.rules.get_rules.get_by_id(id).await?;
    Ok(Json(RuleResponse::from_domain(rule)))
}

async fn create_rule(
    State(state): State<AppState>,
    Principal(ctx): Principal,
    Json(req): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ApiError> {
    let kind = req
        .kind
        .as_deref()
        .map(str::parse::<RuleKind>)
        .transpose()?;

    let command = CreateRuleCommand {
        pattern: req.pattern,
        kind,
        exact: req.exact.unwrap_or(false),
        expiry: req.expiry,
        block_account_creation: req.block_account_creation.unwrap_or(false),
        reason: req.reason,
    };

    let rule = state.rules.create_rule.execute(&ctx, command).await?;

    Ok((StatusCode::CREATED, Json(RuleResponse::from_domain(rule))))
}

async fn create_rules_batch(
    State(state): State<AppState>,
    Principal(ctx): Principal,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let outcome = state
        .rules
        .create_rules_batch
        .execute(
            &ctx,
            CreateRulesBatchCommand {
                patterns: req.patterns,
                expiry: req.expiry,
                reason: req.reason,
            },
        )
        .await?;

    Ok(Json(BatchResponse::from_outcome(outcome)))
}

async fn get_rule_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<RuleStatsResponse>, ApiError> {
    let stats = state
        .rules
        .get_rule_stats
        .execute(id, Pagination::new(query.limit, query.offset))
        .await?;
    Ok(Json(RuleStatsResponse::from_domain(stats)))
}
