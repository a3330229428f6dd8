pub mod blocking;
pub mod maintenance;
pub mod rules;

pub use blocking::CheckBlockUseCase;
pub use maintenance::PurgeExpiredRulesUseCase;
pub use rules::{
    BatchFailure, BatchOutcome, CreateRuleCommand, CreateRuleUseCase, CreateRulesBatchCommand,
    CreateRulesBatchUseCase, DeleteRuleUseCase, GetRuleStatsUseCase, GetRulesUseCase, RulePage,
    RuleStats,
};
