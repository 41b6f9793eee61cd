//! Spaces of the simulator and of the gym interface.
//!
//! A simulator describes its observations and actions with [`SpaceDescriptor`]s.
//! The gym interface describes them with [`GymSpace`]s. [`convert_space`] maps the
//! former to the latter, preserving shapes, element types and key order.
mod convert;
mod descriptor;
mod dtype;
mod gym_space;
pub use convert::convert_space;
pub use descriptor::SpaceDescriptor;
pub use dtype::Dtype;
pub use gym_space::{BoxSpace, DictSpace, GymSpace};
