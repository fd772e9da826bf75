pub mod access;

pub use access::{AuthGate, authorize};
