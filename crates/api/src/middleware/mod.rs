pub mod api_key;
pub mod principal;

pub use api_key::require_api_key;
pub use principal::{Principal, PRINCIPAL_HEADER};
