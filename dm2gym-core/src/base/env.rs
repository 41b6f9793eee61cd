//! Environment.
use super::{RenderMode, RenderOptions, Rendered, Step};
use crate::GymSpace;
use anyhow::Result;

/// Metadata of an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvMetadata {
    /// Supported render modes.
    pub render_modes: Vec<RenderMode>,

    /// Frames per second of videos recorded from the environment.
    pub video_frames_per_second: u32,
}

/// Registration information of an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvSpec {
    /// Environment id.
    pub id: String,

    /// Step cap of an episode, `None` if unbounded.
    pub max_episode_steps: Option<usize>,
}

/// An environment behind the gym interface.
pub trait Env {
    /// Observation of the environment.
    type Obs;

    /// Action of the environment.
    type Act;

    /// Space of observations.
    fn observation_space(&self) -> &GymSpace;

    /// Space of actions.
    fn action_space(&self) -> &GymSpace;

    /// Metadata, including supported render modes.
    fn metadata(&self) -> &EnvMetadata;

    /// Registration information.
    fn spec(&self) -> &EnvSpec;

    /// Seeds the random number generator of the environment.
    fn seed(&mut self, seed: u64) -> Result<()>;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>>;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Renders the environment.
    ///
    /// `mode` is `"human"` or `"rgb_array"`.
    fn render(&mut self, mode: &str, options: &RenderOptions) -> Result<Rendered>;

    /// Closes the environment. Calling it more than once is allowed.
    fn close(&mut self) -> Result<()>;
}
