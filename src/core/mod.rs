pub mod errors;
pub mod event_scheduler;
pub mod execution;
pub mod layout;
pub mod lifecycle;
pub mod observer;
pub mod production;
pub mod resource_pool;
pub mod snapshot;
pub mod timing;
pub mod types;
pub mod unit;
