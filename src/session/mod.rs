//! Connection session state

pub mod context;

pub use context::{ConnectionContext, RequestPhase};
