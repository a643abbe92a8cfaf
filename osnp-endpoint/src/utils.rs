//! Backend-agnostic logging, carried over unchanged from the frame codec's
//! sibling stack crate: callers pick a backend with the `log` or `defmt`
//! feature, and every call site here is oblivious to which.

pub mod log;
