pub mod blockers;
pub mod check;
pub mod health;
pub mod read_only;
pub mod rules;
pub mod unblock;

pub use health::health_check;
