pub mod cachekey;
pub mod carriers;
pub mod config;
pub mod content;
mod dates;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod ident;
pub mod lifecycle;
pub mod pricing;
pub mod store;

pub use carriers::{carrier_config, CarrierConfig, CARRIERS};
pub use engine::{ApprovalDecider, QuoteEngine, RandomApproval};
pub use errors::DomainError;
pub use lifecycle::PolicyLifecycle;
pub use store::{CacheStats, PolicyStore, QuoteStore};
