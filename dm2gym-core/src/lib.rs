#![warn(missing_docs)]
//! Core types of dm2gym.
//!
//! This crate defines the vocabulary shared by the adapter crate:
//!
//! * [`SpaceDescriptor`] - spaces as described by a control suite simulator,
//! * [`GymSpace`] - spaces of the gym environment interface, and [`convert_space`],
//!   which maps the former to the latter,
//! * [`Simulator`] and [`SuiteLoader`] - the wrapped simulator and the factory building it,
//! * [`Env`] - the gym environment interface implemented by the adapter,
//! * [`record::Record`] - the auxiliary information mapping returned with every step.
pub mod error;
pub mod record;
pub mod dummy;

mod base;
pub use base::{
    CameraConfig, Env, EnvMetadata, EnvSpec, RenderMode, RenderOptions, Rendered, Simulator,
    Step, StepType, SuiteLoader, TimeStep,
};

mod space;
pub use space::{convert_space, BoxSpace, DictSpace, Dtype, GymSpace, SpaceDescriptor};
