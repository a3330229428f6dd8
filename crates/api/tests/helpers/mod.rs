#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use regexblock_api::{create_api_routes, AppState, RuleUseCases};
use regexblock_application::use_cases::{
    CheckBlockUseCase, CreateRuleUseCase, CreateRulesBatchUseCase, DeleteRuleUseCase,
    GetRuleStatsUseCase, GetRulesUseCase,
};
use regexblock_infrastructure::cache::InMemoryRuleCache;
use regexblock_infrastructure::database::MIGRATOR;
use regexblock_infrastructure::repositories::{SqliteMatchEventRepository, SqliteRuleRepository};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub const PRINCIPAL: &str = "X-Regexblock-Principal";

pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app(api_key: Option<&str>) -> (Router, SqlitePool) {
    let pool = create_test_db().await;

    let rule_repo = Arc::new(SqliteRuleRepository::new(pool.clone()));
    let match_repo = Arc::new(SqliteMatchEventRepository::new(pool.clone()));
    let cache = Arc::new(InMemoryRuleCache::new(rule_repo.clone()));

    let create_rule = Arc::new(CreateRuleUseCase::new(rule_repo.clone(), cache.clone()));
    let state = AppState {
        check_block: Arc::new(CheckBlockUseCase::new(
            rule_repo.clone(),
            match_repo.clone(),
            cache.clone(),
        )),
        rules: RuleUseCases {
            create_rules_batch: Arc::new(CreateRulesBatchUseCase::new(create_rule.clone())),
            create_rule,
            delete_rule: Arc::new(DeleteRuleUseCase::new(rule_repo.clone(), cache.clone())),
            get_rules: Arc::new(GetRulesUseCase::new(rule_repo.clone())),
            get_rule_stats: Arc::new(GetRuleStatsUseCase::new(rule_repo, match_repo)),
        },
        api_key: api_key.map(Arc::from),
    };

    (create_api_routes(state), pool)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    principal: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_with_headers(app, method, uri, principal, &[], body).await
}

pub async fn send_with_headers(
    app: &Router,
    method: &str,
    uri: &str,
    principal: Option<&str>,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(principal) = principal {
        builder = builder.header(PRINCIPAL, principal);
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}
