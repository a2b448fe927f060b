//! Metrics computed from the dependency graph and module extractions.

pub mod coupling;
pub mod encapsulation;

pub use coupling::{compute_coupling, instability, CouplingReport, CouplingResult};
pub use encapsulation::{private_function_ratio, ModuleShape};
