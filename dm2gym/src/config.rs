//! Configuration of [`DmControlEnv`](crate::DmControlEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DmControlEnv`](crate::DmControlEnv).
///
/// `domain_name`, `task_name`, the keyword arguments and `visualize_reward` are used
/// only when the simulator is built through a [`SuiteLoader`](dm2gym_core::SuiteLoader).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct DmControlEnvConfig {
    pub(crate) id: String,
    pub(crate) domain_name: String,
    pub(crate) task_name: String,
    pub(crate) task_kwargs: Option<Mapping>,
    pub(crate) environment_kwargs: Option<Mapping>,
    pub(crate) visualize_reward: bool,
    pub(crate) render_window_mode: String,
    pub(crate) viewer_max_width: usize,
    pub(crate) escape_to_exit: bool,
}

impl Default for DmControlEnvConfig {
    fn default() -> Self {
        Self {
            id: "DM-v0".to_string(),
            domain_name: "".to_string(),
            task_name: "".to_string(),
            task_kwargs: None,
            environment_kwargs: None,
            visualize_reward: false,
            render_window_mode: "gym".to_string(),
            viewer_max_width: 1024,
            escape_to_exit: false,
        }
    }
}

impl DmControlEnvConfig {
    /// Sets the environment id reported by [`Env::spec`](dm2gym_core::Env::spec).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the domain name, e.g., `cheetah`.
    pub fn domain_name(mut self, v: impl Into<String>) -> Self {
        self.domain_name = v.into();
        self
    }

    /// Sets the task name, e.g., `run`.
    pub fn task_name(mut self, v: impl Into<String>) -> Self {
        self.task_name = v.into();
        self
    }

    /// Sets keyword arguments of the task.
    pub fn task_kwargs(mut self, v: Option<Mapping>) -> Self {
        self.task_kwargs = v;
        self
    }

    /// Sets keyword arguments of the environment.
    pub fn environment_kwargs(mut self, v: Option<Mapping>) -> Self {
        self.environment_kwargs = v;
        self
    }

    /// Set `true` to reflect the reward in rendered images.
    pub fn visualize_reward(mut self, v: bool) -> Self {
        self.visualize_reward = v;
        self
    }

    /// Sets the viewer backend, `gym` (default) or `opencv`.
    ///
    /// The value is validated when the environment is constructed.
    pub fn render_window_mode(mut self, v: impl Into<String>) -> Self {
        self.render_window_mode = v.into();
        self
    }

    /// Sets the maximum width of the `gym` viewer window.
    pub fn viewer_max_width(mut self, v: usize) -> Self {
        self.viewer_max_width = v;
        self
    }

    /// Set `true` to close the `opencv` viewer when Escape is pressed.
    pub fn escape_to_exit(mut self, v: bool) -> Self {
        self.escape_to_exit = v;
        self
    }

    /// Constructs [`DmControlEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DmControlEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use tempdir::TempDir;

    #[test]
    fn test_serde_config() -> Result<()> {
        let mut task_kwargs = Mapping::new();
        task_kwargs.insert(Value::from("random"), Value::from(42));
        let config = DmControlEnvConfig::default()
            .domain_name("cheetah")
            .task_name("run")
            .task_kwargs(Some(task_kwargs))
            .render_window_mode("opencv");

        let dir = TempDir::new("dm_control_env_config")?;
        let path = dir.path().join("dm_control_env_config.yaml");
        config.save(&path)?;
        let config_ = DmControlEnvConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_missing_fields_take_defaults() -> Result<()> {
        let config: DmControlEnvConfig = serde_yaml::from_str("domain_name: walker\ntask_name: walk\n")?;
        assert_eq!(config.domain_name, "walker");
        assert_eq!(config.render_window_mode, "gym");
        assert_eq!(config.viewer_max_width, 1024);
        assert_eq!(config.id, "DM-v0");
        Ok(())
    }
}
