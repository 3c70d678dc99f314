pub mod actors;
pub mod binding;
pub mod buffer;
pub mod error;
pub mod logging;
pub mod mux;
mod prelude;
pub mod render;
pub mod roster;
pub mod server;
pub mod session;
