pub mod match_event_repository;
pub mod rule_repository;

pub use match_event_repository::SqliteMatchEventRepository;
pub use rule_repository::SqliteRuleRepository;
