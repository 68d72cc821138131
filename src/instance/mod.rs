//! Instance records and the batch generation driver.
//!
//! ## Key Types
//!
//! - `GameSpecification`: declarative input of one generation run
//! - `InstanceRecord`: one reproducible starting configuration
//! - `Experiment` / `InstanceCollection`: the persisted grouping
//! - `GenerationOutput`: collection plus per-instance failure report

pub mod generator;
pub mod record;

pub use generator::{
    generate, GameSpecification, GenerationOutput, InstanceFailure, RoleDescriptor,
};
pub use record::{Experiment, InstanceCollection, InstanceRecord};
