//! Control suite environments behind the gym environment interface.
//!
//! [`DmControlEnv`] wraps a [`Simulator`], i.e., a control suite environment, and exposes it
//! through [`Env`], the gym environment interface. Spaces of the simulator are converted once,
//! at construction, with [`convert_space`]; observations and actions are passed through as
//! they are.
//!
//! ## Construction
//!
//! An environment is built from a [`DmControlEnvConfig`] and a [`SuiteLoader`], which knows
//! how to build the simulator of a (domain, task) pair. [`Registry`] assigns ids of the form
//! `<Domain><Task>-v0` to every task of a loader and wraps built environments in
//! [`TimeLimit`], which ends episodes after 1000 steps.
//!
//! ```rust
//! use dm2gym::{DmControlEnv, DmControlEnvConfig};
//! use dm2gym_core::{dummy::PointMassLoader, Env, RenderOptions, Rendered};
//! use ndarray::arr1;
//!
//! let config = DmControlEnvConfig::default()
//!     .domain_name("point_mass")
//!     .task_name("easy");
//! let mut env = DmControlEnv::build(&config, &PointMassLoader).unwrap();
//!
//! let _obs = env.reset().unwrap();
//! let step = env.step(&arr1(&[0.1, -0.1]).into_dyn()).unwrap();
//! assert!(!step.is_done);
//!
//! let img = env.render("rgb_array", &RenderOptions::default()).unwrap();
//! assert!(matches!(img, Rendered::RgbArray(_)));
//! env.close().unwrap();
//! ```
//!
//! ## Rendering
//!
//! `render("rgb_array", ..)` returns the image of the simulator. `render("human", ..)` shows
//! it in a [`viewer`], opened on the first call. On-screen windows need the `window` feature.
//!
//! [`Simulator`]: dm2gym_core::Simulator
//! [`Env`]: dm2gym_core::Env
//! [`convert_space`]: dm2gym_core::convert_space
//! [`SuiteLoader`]: dm2gym_core::SuiteLoader
mod base;
mod config;
mod registry;
mod time_limit;
pub mod viewer;
pub use base::{DmControlEnv, EnvState};
pub use config::DmControlEnvConfig;
pub use registry::{env_id, EnvEntry, Registry, MAX_EPISODE_STEPS};
pub use time_limit::{TimeLimit, TRUNCATED_KEY};
