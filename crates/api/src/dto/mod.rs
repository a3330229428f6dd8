pub mod check;
pub mod rule;
pub mod stats;

pub use check::{CheckRequest, DecisionResponse};
pub use rule::{
    BatchErrorResponse, BatchRequest, BatchResponse, CreateRuleRequest, ReadOnlyRequest,
    ReadOnlyResponse, RuleListQuery, RuleListResponse, RuleResponse, UnblockRequest,
    UnblockResponse,
};
pub use stats::{MatchEventResponse, RuleStatsResponse, StatsQuery};
