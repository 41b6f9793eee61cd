//! Registry of environment ids.
//!
//! Every (domain, task) pair of a [`SuiteLoader`] gets an id of the form
//! `<Domain><Task>-v0`, e.g., `CheetahRun-v0`, with an episode cap of 1000 steps.
//!
//! ```rust
//! use dm2gym::{Registry, env_id};
//! use dm2gym_core::{dummy::PointMassLoader, Env};
//!
//! let registry = Registry::from_loader(&PointMassLoader).unwrap();
//! assert_eq!(env_id("point_mass", "easy"), "Point_massEasy-v0");
//!
//! let mut env = registry.make("Point_massEasy-v0", &PointMassLoader).unwrap();
//! assert_eq!(env.spec().max_episode_steps, Some(1000));
//! let _obs = env.reset().unwrap();
//! ```
use crate::{DmControlEnv, DmControlEnvConfig, TimeLimit};
use anyhow::Result;
use dm2gym_core::{error::Dm2GymError, SuiteLoader};
use log::info;

/// Episode cap of registered environments.
pub const MAX_EPISODE_STEPS: usize = 1000;

/// Returns the id of a (domain, task) pair.
///
/// Both names are capitalized: the first character is made uppercase and the rest lowercase.
pub fn env_id(domain_name: &str, task_name: &str) -> String {
    format!("{}{}-v0", capitalize(domain_name), capitalize(task_name))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A registered environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvEntry {
    /// Environment id.
    pub id: String,

    /// Domain name given to the loader.
    pub domain_name: String,

    /// Task name given to the loader.
    pub task_name: String,

    /// Episode cap, `None` if unbounded.
    pub max_episode_steps: Option<usize>,
}

impl EnvEntry {
    /// Entry of a (domain, task) pair with the default id and cap.
    pub fn new(domain_name: &str, task_name: &str) -> Self {
        Self {
            id: env_id(domain_name, task_name),
            domain_name: domain_name.to_string(),
            task_name: task_name.to_string(),
            max_episode_steps: Some(MAX_EPISODE_STEPS),
        }
    }
}

/// Environment ids, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<EnvEntry>,
}

impl Registry {
    /// Constructs an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all tasks of a loader.
    pub fn from_loader<L: SuiteLoader>(loader: &L) -> Result<Self> {
        let mut registry = Self::new();
        for (domain_name, task_name) in loader.all_tasks() {
            registry.register(EnvEntry::new(&domain_name, &task_name))?;
        }
        info!("Registered {} environments", registry.len());
        Ok(registry)
    }

    /// Registers an environment.
    ///
    /// Fails if the id is already registered.
    pub fn register(&mut self, entry: EnvEntry) -> Result<()> {
        if self.get(&entry.id).is_some() {
            return Err(Dm2GymError::DuplicateEnvId(entry.id).into());
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the entry of an id.
    pub fn get(&self, id: &str) -> Option<&EnvEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Registered ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    /// Number of registered environments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a registered environment with the default configuration.
    pub fn make<L: SuiteLoader>(
        &self,
        id: &str,
        loader: &L,
    ) -> Result<TimeLimit<DmControlEnv<L::Env>>> {
        self.make_with_config(id, loader, DmControlEnvConfig::default())
    }

    /// Builds a registered environment.
    ///
    /// Id, domain and task of `config` are replaced with those of the entry; the other
    /// settings, e.g., keyword arguments and the viewer backend, are used as they are.
    pub fn make_with_config<L: SuiteLoader>(
        &self,
        id: &str,
        loader: &L,
        config: DmControlEnvConfig,
    ) -> Result<TimeLimit<DmControlEnv<L::Env>>> {
        let entry = self
            .get(id)
            .ok_or_else(|| Dm2GymError::UnknownEnvId(id.to_string()))?;
        let config = config
            .id(entry.id.as_str())
            .domain_name(entry.domain_name.as_str())
            .task_name(entry.task_name.as_str());
        let env = DmControlEnv::build(&config, loader)?;
        Ok(TimeLimit::new(env, entry.max_episode_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm2gym_core::dummy::PointMassLoader;

    #[test]
    fn test_env_id() {
        assert_eq!(env_id("cheetah", "run"), "CheetahRun-v0");
        assert_eq!(env_id("ball_in_cup", "catch"), "Ball_in_cupCatch-v0");
        assert_eq!(env_id("manipulator", "bring_ball"), "ManipulatorBring_ball-v0");
        assert_eq!(env_id("lqr", "lqr_2_1"), "LqrLqr_2_1-v0");
        assert_eq!(env_id("CARTPOLE", "Swingup"), "CartpoleSwingup-v0");
    }

    #[test]
    fn test_from_loader() -> Result<()> {
        let registry = Registry::from_loader(&PointMassLoader)?;
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec!["Point_massEasy-v0", "Point_massHard-v0"]
        );
        let entry = registry.get("Point_massHard-v0").unwrap();
        assert_eq!(entry.domain_name, "point_mass");
        assert_eq!(entry.task_name, "hard");
        assert_eq!(entry.max_episode_steps, Some(MAX_EPISODE_STEPS));
        Ok(())
    }

    #[test]
    fn test_duplicate_id() -> Result<()> {
        let mut registry = Registry::from_loader(&PointMassLoader)?;
        let err = registry
            .register(EnvEntry::new("point_mass", "easy"))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<Dm2GymError>(),
            Some(&Dm2GymError::DuplicateEnvId("Point_massEasy-v0".into()))
        );
        assert_eq!(registry.len(), 2);
        Ok(())
    }

    #[test]
    fn test_unknown_id() {
        let registry = Registry::new();
        let err = registry.make("CheetahRun-v0", &PointMassLoader).err().unwrap();
        assert_eq!(
            err.downcast_ref::<Dm2GymError>(),
            Some(&Dm2GymError::UnknownEnvId("CheetahRun-v0".into()))
        );
    }
}
