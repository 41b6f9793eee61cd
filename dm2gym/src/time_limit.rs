//! Step cap of episodes.
use anyhow::Result;
use dm2gym_core::{
    record::RecordValue, Env, EnvMetadata, EnvSpec, GymSpace, RenderOptions, Rendered, Step,
};
use log::trace;

/// Key of the info entry set when an episode reaches the step cap.
pub const TRUNCATED_KEY: &str = "TimeLimit.truncated";

/// Ends episodes after a fixed number of steps.
///
/// When the number of steps since the last reset reaches the cap, the step is reported as
/// done and [`TRUNCATED_KEY`] is set in `info`: `true` if the wrapped environment did not end
/// the episode by itself, `false` if it did. Without a cap, steps are forwarded unchanged.
pub struct TimeLimit<E: Env> {
    env: E,
    spec: EnvSpec,
    elapsed_steps: usize,
}

impl<E: Env> TimeLimit<E> {
    /// Wraps an environment.
    pub fn new(env: E, max_episode_steps: Option<usize>) -> Self {
        let spec = EnvSpec {
            id: env.spec().id.clone(),
            max_episode_steps,
        };
        Self {
            env,
            spec,
            elapsed_steps: 0,
        }
    }

    /// Steps since the last reset.
    pub fn elapsed_steps(&self) -> usize {
        self.elapsed_steps
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// The wrapped environment.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Obs = E::Obs;
    type Act = E::Act;

    fn observation_space(&self) -> &GymSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> &GymSpace {
        self.env.action_space()
    }

    fn metadata(&self) -> &EnvMetadata {
        self.env.metadata()
    }

    /// Same as the wrapped environment, with the step cap of this wrapper.
    fn spec(&self) -> &EnvSpec {
        &self.spec
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.env.seed(seed)
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        let mut step = self.env.step(a)?;
        self.elapsed_steps += 1;

        if let Some(max_steps) = self.spec.max_episode_steps {
            if self.elapsed_steps >= max_steps {
                trace!("TimeLimit: {} steps elapsed", self.elapsed_steps);
                step.info
                    .insert(TRUNCATED_KEY, RecordValue::Bool(!step.is_done));
                step.is_done = true;
            }
        }
        Ok(step)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.elapsed_steps = 0;
        self.env.reset()
    }

    fn render(&mut self, mode: &str, options: &RenderOptions) -> Result<Rendered> {
        self.env.render(mode, options)
    }

    fn close(&mut self) -> Result<()> {
        self.env.close()
    }
}
