//! Wrapper of control suite environments.
use crate::{
    viewer::{open_viewer, Viewer, ViewerBackend, ViewerBuilder, ViewerConfig},
    DmControlEnvConfig,
};
use anyhow::Result;
use dm2gym_core::{
    convert_space, error::Dm2GymError, record::Record, Env, EnvMetadata, EnvSpec, GymSpace,
    RenderMode, RenderOptions, Rendered, Simulator, Step, SuiteLoader,
};
use image::RgbImage;
use log::{info, trace, warn};

/// Lifecycle of a [`DmControlEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// Constructed, neither reset nor stepped yet.
    Unopened,

    /// Reset or stepped at least once.
    Active,

    /// Closed. Only `close()` is accepted from here.
    Closed,
}

/// A control suite environment behind the gym interface.
///
/// Observations and actions are forwarded as they are; only their spaces are converted,
/// at construction. Timesteps of the simulator are turned into [`Step`]s and the episode
/// is over when the simulator emits a terminal timestep.
///
/// The environment is not meant to be shared between threads; calls must be serialized.
pub struct DmControlEnv<S: Simulator> {
    env: S,

    observation_space: GymSpace,

    action_space: GymSpace,

    metadata: EnvMetadata,

    spec: EnvSpec,

    viewer_backend: ViewerBackend,

    viewer_config: ViewerConfig,

    /// Created on the first `human` rendering.
    viewer: Option<Box<dyn Viewer>>,

    viewer_builder: ViewerBuilder,

    state: EnvState,
}

impl<S: Simulator> DmControlEnv<S> {
    /// Wraps a simulator.
    ///
    /// Fails if the viewer backend of the configuration is invalid or if a space of the
    /// simulator can not be converted.
    pub fn new(env: S, config: &DmControlEnvConfig) -> Result<Self> {
        let viewer_backend = config.render_window_mode.parse::<ViewerBackend>()?;
        let observation_space = convert_space(&env.observation_spec())?;
        let action_space = convert_space(&env.action_spec())?;

        let metadata = EnvMetadata {
            render_modes: vec![RenderMode::Human, RenderMode::RgbArray],
            video_frames_per_second: (1.0 / env.control_timestep()).round_ties_even() as u32,
        };
        let step_limit = env.step_limit();
        let spec = EnvSpec {
            id: config.id.clone(),
            max_episode_steps: if step_limit.is_finite() {
                Some(step_limit as usize)
            } else {
                None
            },
        };
        info!("Initialize DmControlEnv ({})", spec.id);
        info!("Observation space = {:?}", observation_space);
        info!("Action space = {:?}", action_space);

        Ok(Self {
            env,
            observation_space,
            action_space,
            metadata,
            spec,
            viewer_backend,
            viewer_config: ViewerConfig {
                title: config.id.clone(),
                max_width: config.viewer_max_width,
                escape_to_exit: config.escape_to_exit,
            },
            viewer: None,
            viewer_builder: Box::new(open_viewer),
            state: EnvState::Unopened,
        })
    }

    /// Builds the simulator of `config.domain_name`/`config.task_name` with a loader and
    /// wraps it.
    pub fn build<L>(config: &DmControlEnvConfig, loader: &L) -> Result<Self>
    where
        L: SuiteLoader<Env = S>,
    {
        info!(
            "Load {}/{} (visualize_reward = {})",
            config.domain_name, config.task_name, config.visualize_reward
        );
        let env = loader.load(
            &config.domain_name,
            &config.task_name,
            config.task_kwargs.as_ref(),
            config.environment_kwargs.as_ref(),
            config.visualize_reward,
        )?;
        Self::new(env, config)
    }

    /// Replaces the function opening viewers for `human` rendering.
    pub fn with_viewer_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(ViewerBackend, &ViewerConfig) -> Result<Box<dyn Viewer>> + 'static,
    {
        self.viewer_builder = Box::new(f);
        self
    }

    /// Lifecycle state.
    pub fn state(&self) -> EnvState {
        self.state
    }

    /// The wrapped simulator.
    pub fn simulator(&self) -> &S {
        &self.env
    }

    /// The wrapped simulator.
    pub fn simulator_mut(&mut self) -> &mut S {
        &mut self.env
    }

    /// Viewer backend of the configuration.
    pub fn viewer_backend(&self) -> ViewerBackend {
        self.viewer_backend
    }

    /// `true` while a viewer exists.
    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == EnvState::Closed {
            return Err(Dm2GymError::EnvClosed.into());
        }
        Ok(())
    }

    fn show(&mut self, img: &RgbImage, options: &RenderOptions) -> Result<bool> {
        let mut viewer = match self.viewer.take() {
            Some(viewer) => viewer,
            None => {
                let backend = match options.use_opencv_renderer {
                    Some(true) => ViewerBackend::OpenCv,
                    Some(false) => ViewerBackend::Simple,
                    None => self.viewer_backend,
                };
                info!("Open viewer (backend = {})", backend);
                (self.viewer_builder)(backend, &self.viewer_config)?
            }
        };
        let shown = viewer.imshow(img);
        let is_open = viewer.is_open();
        self.viewer = Some(viewer);
        shown.map(|_| is_open)
    }
}

impl<S: Simulator> Env for DmControlEnv<S> {
    type Obs = S::Obs;
    type Act = S::Act;

    fn observation_space(&self) -> &GymSpace {
        &self.observation_space
    }

    fn action_space(&self) -> &GymSpace {
        &self.action_space
    }

    fn metadata(&self) -> &EnvMetadata {
        &self.metadata
    }

    fn spec(&self) -> &EnvSpec {
        &self.spec
    }

    /// Seeds the random number generator of the task.
    fn seed(&mut self, seed: u64) -> Result<()> {
        trace!("DmControlEnv::seed({})", seed);
        self.ensure_open()?;
        self.env.seed(seed)
    }

    /// Forwards the action to the simulator.
    ///
    /// The action is not checked against the action space. The reward is `None` when the
    /// simulator emits no reward, e.g., when it restarts an episode after a terminal
    /// timestep. `info` is always empty.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        trace!("DmControlEnv::step()");
        self.ensure_open()?;

        let timestep = self.env.step(a)?;
        self.state = EnvState::Active;
        let is_done = timestep.last();

        Ok(Step::new(
            timestep.observation,
            timestep.reward,
            is_done,
            Record::empty(),
        ))
    }

    /// Resets the simulator and returns the initial observation.
    ///
    /// Reward and discount of the initial timestep are discarded.
    fn reset(&mut self) -> Result<Self::Obs> {
        trace!("DmControlEnv::reset()");
        self.ensure_open()?;

        let timestep = self.env.reset()?;
        self.state = EnvState::Active;
        if !timestep.first() {
            warn!(
                "Reset emitted a {:?} timestep with reward {:?}",
                timestep.step_type, timestep.reward
            );
        }

        Ok(timestep.observation)
    }

    /// Renders the scene.
    ///
    /// The camera defaults to the tracking camera (id 0). In `rgb_array` mode the image of
    /// the simulator is returned. In `human` mode the image is shown in a viewer, created
    /// on the first call, and whether the viewer is still open is returned.
    fn render(&mut self, mode: &str, options: &RenderOptions) -> Result<Rendered> {
        self.ensure_open()?;
        let mode = mode.parse::<RenderMode>()?;
        let img = self.env.render(&options.camera_config())?;

        match mode {
            RenderMode::RgbArray => Ok(Rendered::RgbArray(img)),
            RenderMode::Human => Ok(Rendered::Human(self.show(&img, options)?)),
        }
    }

    /// Closes the viewer, if any, then the simulator.
    ///
    /// Calls after the first one do nothing.
    fn close(&mut self) -> Result<()> {
        if self.state == EnvState::Closed {
            return Ok(());
        }
        trace!("DmControlEnv::close()");

        if let Some(mut viewer) = self.viewer.take() {
            viewer.close();
        }
        self.state = EnvState::Closed;
        self.env.close()
    }
}

impl<S: Simulator> Drop for DmControlEnv<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close DmControlEnv: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm2gym_core::dummy::{PointMass, PointMassLoader};

    #[test]
    fn test_invalid_viewer_backend() {
        let config = DmControlEnvConfig::default().render_window_mode("pyglet");
        let err = DmControlEnv::new(PointMass::new(0.1, 20.0, 0), &config)
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<Dm2GymError>(),
            Some(&Dm2GymError::InvalidViewerBackend("pyglet".into()))
        );
    }

    #[test]
    fn test_metadata_and_spec() -> Result<()> {
        let env = DmControlEnv::new(PointMass::new(0.1, 20.0, 0), &DmControlEnvConfig::default())?;
        assert_eq!(env.metadata().video_frames_per_second, 50);
        assert_eq!(
            env.metadata().render_modes,
            vec![RenderMode::Human, RenderMode::RgbArray]
        );
        assert_eq!(env.spec().id, "DM-v0");
        assert_eq!(env.spec().max_episode_steps, Some(1000));
        assert_eq!(env.state(), EnvState::Unopened);

        let env = DmControlEnv::new(
            PointMass::new(0.1, f64::INFINITY, 0),
            &DmControlEnvConfig::default(),
        )?;
        assert_eq!(env.spec().max_episode_steps, None);
        Ok(())
    }

    #[test]
    fn test_build_with_loader() -> Result<()> {
        let config = DmControlEnvConfig::default()
            .domain_name("point_mass")
            .task_name("hard")
            .render_window_mode("opencv");
        let env = DmControlEnv::build(&config, &PointMassLoader)?;
        assert_eq!(env.viewer_backend(), ViewerBackend::OpenCv);

        let config = config.task_name("impossible");
        assert!(DmControlEnv::build(&config, &PointMassLoader).is_err());
        Ok(())
    }
}
