//! Pipeline stage implementations.

pub mod access_gate;
