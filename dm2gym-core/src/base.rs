//! Core functionalities.
mod env;
mod render;
mod simulator;
mod step;
pub use env::{Env, EnvMetadata, EnvSpec};
pub use render::{CameraConfig, RenderMode, RenderOptions, Rendered};
pub use simulator::{Simulator, SuiteLoader};
pub use step::{Step, StepType, TimeStep};
