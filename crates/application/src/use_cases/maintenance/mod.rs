mod purge_expired_rules;

pub use purge_expired_rules::PurgeExpiredRulesUseCase;
