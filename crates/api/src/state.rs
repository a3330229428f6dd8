use regexblock_application::use_cases::{
    CheckBlockUseCase, CreateRuleUseCase, CreateRulesBatchUseCase, DeleteRuleUseCase,
    GetRuleStatsUseCase, GetRulesUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RuleUseCases {
    pub create_rule: Arc<CreateRuleUseCase>,
    pub create_rules_batch: Arc<CreateRulesBatchUseCase>,
    pub delete_rule: Arc<DeleteRuleUseCase>,
    pub get_rules: Arc<GetRulesUseCase>,
    pub get_rule_stats: Arc<GetRuleStatsUseCase>,
}

#[derive(Clone)]
pub struct AppState {
    pub check_block: Arc<CheckBlockUseCase>,
    pub rules: RuleUseCases,
    pub api_key: Option<Arc<str>>,
}
