pub mod config;
pub mod logging;

pub mod extract;
pub mod fetch;
pub mod persist;
pub mod pipeline;
pub mod roster;
pub mod scheduler;
