pub mod config;
pub mod midi;
pub mod notes;
pub mod scheduler;
pub mod time;
