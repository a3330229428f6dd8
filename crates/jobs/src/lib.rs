pub mod cache_maintenance;
pub mod expired_rule_purge;
pub mod runner;

pub use cache_maintenance::CacheMaintenanceJob;
pub use expired_rule_purge::ExpiredRulePurgeJob;
pub use runner::JobRunner;
