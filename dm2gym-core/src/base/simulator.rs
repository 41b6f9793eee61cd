//! Simulator wrapped by the adapter.
use super::{CameraConfig, TimeStep};
use crate::SpaceDescriptor;
use anyhow::Result;
use image::RgbImage;
use serde_yaml::Mapping;

/// A control suite environment.
///
/// This is the interface the adapter forwards to. It corresponds to a control suite
/// environment together with its physics (for rendering) and task (for seeding).
pub trait Simulator {
    /// Observation emitted in timesteps.
    type Obs;

    /// Action accepted by [`Simulator::step`].
    type Act;

    /// Descriptor of observations.
    fn observation_spec(&self) -> SpaceDescriptor;

    /// Descriptor of actions.
    fn action_spec(&self) -> SpaceDescriptor;

    /// Duration of a control step in seconds.
    fn control_timestep(&self) -> f64;

    /// Maximum number of steps in an episode, [`f64::INFINITY`] if episodes never time out.
    fn step_limit(&self) -> f64 {
        f64::INFINITY
    }

    /// Seeds the random number generator of the task.
    fn seed(&mut self, seed: u64) -> Result<()>;

    /// Starts a new episode.
    fn reset(&mut self) -> Result<TimeStep<Self::Obs>>;

    /// Applies an action and advances the simulation by one control step.
    fn step(&mut self, act: &Self::Act) -> Result<TimeStep<Self::Obs>>;

    /// Renders the scene from a camera.
    fn render(&mut self, camera: &CameraConfig) -> Result<RgbImage>;

    /// Releases resources of the simulator.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Builds simulators from a (domain, task) pair, like `suite.load()`.
pub trait SuiteLoader {
    /// Simulator built by this loader.
    type Env: Simulator;

    /// All (domain, task) pairs this loader knows.
    fn all_tasks(&self) -> Vec<(String, String)>;

    /// Builds the simulator of a task.
    ///
    /// * `task_kwargs` - Keyword arguments of the task, e.g., `random` or `time_limit`.
    /// * `environment_kwargs` - Keyword arguments of the environment, e.g., `flat_observation`.
    /// * `visualize_reward` - Whether the rendered scene reflects the reward.
    fn load(
        &self,
        domain_name: &str,
        task_name: &str,
        task_kwargs: Option<&Mapping>,
        environment_kwargs: Option<&Mapping>,
        visualize_reward: bool,
    ) -> Result<Self::Env>;
}
