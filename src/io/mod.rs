//! Fixture loading and diagnostic output.

pub mod dump;
pub mod fixtures;

pub use dump::{dump_cfg, dump_method};
pub use fixtures::load_methods;
