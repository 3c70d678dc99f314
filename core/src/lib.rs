pub mod constants;
pub mod error;
pub mod events;
pub mod ids;
pub mod keys;
pub mod states;
