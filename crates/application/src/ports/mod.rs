mod match_event_repository;
mod rule_cache;
mod rule_repository;

pub use match_event_repository::MatchEventRepository;
pub use rule_cache::{CacheCompactionOutcome, CachedBlock, RuleCachePort};
pub use rule_repository::RuleRepository;
