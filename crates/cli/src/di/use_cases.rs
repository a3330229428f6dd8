use super::Repositories;
use regexblock_api::RuleUseCases;
use regexblock_application::use_cases::{
    CheckBlockUseCase, CreateRuleUseCase, CreateRulesBatchUseCase, DeleteRuleUseCase,
    GetRuleStatsUseCase, GetRulesUseCase, PurgeExpiredRulesUseCase,
};
use regexblock_domain::config::BlockingConfig;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub check_block: Arc<CheckBlockUseCase>,
    pub rules: RuleUseCases,
    pub purge_expired: Arc<PurgeExpiredRulesUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, blocking: &BlockingConfig) -> Self {
        let check_block = CheckBlockUseCase::new(
            repos.rules.clone(),
            repos.match_events.clone(),
            repos.cache.clone(),
        )
        .with_timeout(Duration::from_millis(blocking.check_timeout_ms))
        .with_read_only(Arc::new(AtomicBool::new(blocking.read_only)));

        let create_rule = Arc::new(CreateRuleUseCase::new(
            repos.rules.clone(),
            repos.cache.clone(),
        ));

        Self {
            check_block: Arc::new(check_block),
            rules: RuleUseCases {
                create_rules_batch: Arc::new(CreateRulesBatchUseCase::new(create_rule.clone())),
                create_rule,
                delete_rule: Arc::new(DeleteRuleUseCase::new(
                    repos.rules.clone(),
                    repos.cache.clone(),
                )),
                get_rules: Arc::new(GetRulesUseCase::new(repos.rules.clone())),
                get_rule_stats: Arc::new(GetRuleStatsUseCase::new(
                    repos.rules.clone(),
                    repos.match_events.clone(),
                )),
            },
            purge_expired: Arc::new(PurgeExpiredRulesUseCase::new(
                repos.rules.clone(),
                repos.cache.clone(),
            )),
        }
    }
}
