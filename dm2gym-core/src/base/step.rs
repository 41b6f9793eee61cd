//! Timesteps of a simulator and steps of a gym environment.
use crate::record::Record;

/// Position of a [`TimeStep`] in an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    /// The first timestep of an episode, emitted by `reset`.
    First,
    /// Any timestep that is neither first nor last.
    Mid,
    /// The terminal timestep of an episode.
    Last,
}

/// One output bundle of a simulator, produced by `step` or `reset`.
///
/// The reward and the discount are `None` on the first timestep of an episode.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStep<O> {
    /// Position in the episode.
    pub step_type: StepType,

    /// Reward, `None` for the first timestep.
    pub reward: Option<f64>,

    /// Discount, `None` for the first timestep.
    pub discount: Option<f64>,

    /// Observation.
    pub observation: O,
}

impl<O> TimeStep<O> {
    /// Constructs the first timestep of an episode.
    pub fn restart(observation: O) -> Self {
        Self {
            step_type: StepType::First,
            reward: None,
            discount: None,
            observation,
        }
    }

    /// Constructs an intermediate timestep.
    pub fn transition(reward: f64, observation: O) -> Self {
        Self {
            step_type: StepType::Mid,
            reward: Some(reward),
            discount: Some(1.0),
            observation,
        }
    }

    /// Constructs a terminal timestep.
    pub fn termination(reward: f64, observation: O) -> Self {
        Self {
            step_type: StepType::Last,
            reward: Some(reward),
            discount: Some(0.0),
            observation,
        }
    }

    /// Constructs a terminal timestep of a truncated episode, e.g., at the time limit.
    pub fn truncation(reward: f64, observation: O) -> Self {
        Self {
            step_type: StepType::Last,
            reward: Some(reward),
            discount: Some(1.0),
            observation,
        }
    }

    #[inline]
    /// `true` for the first timestep.
    pub fn first(&self) -> bool {
        self.step_type == StepType::First
    }

    #[inline]
    /// `true` for intermediate timesteps.
    pub fn mid(&self) -> bool {
        self.step_type == StepType::Mid
    }

    #[inline]
    /// `true` for the terminal timestep.
    pub fn last(&self) -> bool {
        self.step_type == StepType::Last
    }
}

/// Output of [`Env::step`](crate::Env::step), the `(observation, reward, done, info)` tuple
/// of the gym interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    /// Observation.
    pub obs: O,

    /// Reward. The simulator may emit no reward for some timesteps.
    pub reward: Option<f64>,

    /// `true` when the episode is over.
    pub is_done: bool,

    /// Auxiliary information.
    pub info: Record,
}

impl<O> Step<O> {
    /// Bundles the outputs of a step.
    pub fn new(obs: O, reward: Option<f64>, is_done: bool, info: Record) -> Self {
        Step {
            obs,
            reward,
            is_done,
            info,
        }
    }

    /// Converts the step into the 4-tuple of the gym interface.
    pub fn into_tuple(self) -> (O, Option<f64>, bool, Record) {
        (self.obs, self.reward, self.is_done, self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_constructors() {
        let ts = TimeStep::restart(0);
        assert!(ts.first());
        assert_eq!(ts.reward, None);

        let ts = TimeStep::transition(1.0, 0);
        assert!(ts.mid() && !ts.last());

        let ts = TimeStep::termination(1.0, 0);
        assert!(ts.last());
        assert_eq!(ts.discount, Some(0.0));

        let ts = TimeStep::truncation(1.0, 0);
        assert!(ts.last());
        assert_eq!(ts.discount, Some(1.0));
    }

    #[test]
    fn test_step_into_tuple() {
        let (obs, reward, is_done, info) = Step::new(3, Some(0.5), false, Record::empty()).into_tuple();
        assert_eq!(obs, 3);
        assert_eq!(reward, Some(0.5));
        assert!(!is_done);
        assert!(info.is_empty());
    }
}
