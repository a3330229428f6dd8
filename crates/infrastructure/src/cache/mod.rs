pub mod coarse_clock;
pub mod rule_cache;

pub use rule_cache::InMemoryRuleCache;
