pub mod base;
pub mod unavailable;

#[cfg(test)]
pub mod mock;

pub use base::Engine;
pub use unavailable::{UnavailableEngine, ENGINE_UNAVAILABLE_MESSAGE};
