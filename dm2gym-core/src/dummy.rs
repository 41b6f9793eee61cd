//! A toy simulator used for tests and demos.
//!
//! [`PointMass`] is a point of unit mass moving on a plane. It is driven by a 2-D force
//! and rewarded for staying close to the origin. It follows the timestep protocol of a
//! control suite environment, including the automatic reset after a terminal timestep.
use crate::{CameraConfig, Dtype, Simulator, SpaceDescriptor, SuiteLoader, TimeStep};
use anyhow::{bail, Result};
use image::{Rgb, RgbImage};
use log::trace;
use ndarray::{arr1, ArrayD};
use serde_yaml::{Mapping, Value};

/// Observation of [`PointMass`]: `position` and `velocity`, in this order.
pub type PointMassObs = Vec<(String, ArrayD<f64>)>;

const ARENA: f64 = 0.3;
const DAMPING: f64 = 0.1;

/// A point mass on a plane.
pub struct PointMass {
    position: [f64; 2],
    velocity: [f64; 2],
    init_range: f64,
    control_timestep: f64,
    time_limit: f64,
    n_steps: usize,
    reset_next_step: bool,
    visualize_reward: bool,
    rng: fastrand::Rng,
    last_camera: Option<CameraConfig>,
    n_close: usize,
}

impl PointMass {
    /// Constructs the simulator.
    ///
    /// * `init_range` - Half width of the square the initial position is drawn from.
    /// * `time_limit` - Duration of an episode in seconds, may be infinite.
    pub fn new(init_range: f64, time_limit: f64, seed: u64) -> Self {
        Self {
            position: [0.0; 2],
            velocity: [0.0; 2],
            init_range,
            control_timestep: 0.02,
            time_limit,
            n_steps: 0,
            reset_next_step: true,
            visualize_reward: false,
            rng: fastrand::Rng::with_seed(seed),
            last_camera: None,
            n_close: 0,
        }
    }

    /// Colors the mass by the reward when rendering.
    pub fn visualize_reward(mut self, v: bool) -> Self {
        self.visualize_reward = v;
        self
    }

    /// Current position.
    pub fn position(&self) -> [f64; 2] {
        self.position
    }

    /// Camera of the latest call to [`Simulator::render`].
    pub fn last_camera(&self) -> Option<CameraConfig> {
        self.last_camera
    }

    /// Number of calls to [`Simulator::close`].
    pub fn n_close(&self) -> usize {
        self.n_close
    }

    fn observation(&self) -> PointMassObs {
        vec![
            ("position".to_string(), arr1(&self.position).into_dyn()),
            ("velocity".to_string(), arr1(&self.velocity).into_dyn()),
        ]
    }

    fn reward(&self) -> f64 {
        let dist = self.position.iter().map(|p| p * p).sum::<f64>().sqrt();
        (1.0 - dist / ARENA).max(0.0)
    }
}

impl Simulator for PointMass {
    type Obs = PointMassObs;
    type Act = ArrayD<f64>;

    fn observation_spec(&self) -> SpaceDescriptor {
        SpaceDescriptor::composite(vec![
            ("position", SpaceDescriptor::unbounded(&[2], Dtype::Float64)),
            ("velocity", SpaceDescriptor::unbounded(&[2], Dtype::Float64)),
        ])
    }

    fn action_spec(&self) -> SpaceDescriptor {
        SpaceDescriptor::bounded(&[2], Dtype::Float64, -1.0, 1.0)
    }

    fn control_timestep(&self) -> f64 {
        self.control_timestep
    }

    fn step_limit(&self) -> f64 {
        (self.time_limit / self.control_timestep).round()
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.rng.seed(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<TimeStep<Self::Obs>> {
        trace!("PointMass::reset()");
        let r = self.init_range;
        self.position = [
            -r + 2.0 * r * self.rng.f64(),
            -r + 2.0 * r * self.rng.f64(),
        ];
        self.velocity = [0.0; 2];
        self.n_steps = 0;
        self.reset_next_step = false;
        Ok(TimeStep::restart(self.observation()))
    }

    fn step(&mut self, act: &Self::Act) -> Result<TimeStep<Self::Obs>> {
        if self.reset_next_step {
            return self.reset();
        }
        if act.shape() != [2] {
            bail!("Action of shape {:?} does not match [2]", act.shape());
        }

        let dt = self.control_timestep;
        for (i, a) in act.iter().enumerate() {
            let force = a.max(-1.0).min(1.0);
            self.velocity[i] += (force - DAMPING * self.velocity[i]) * dt;
            self.position[i] = (self.position[i] + self.velocity[i] * dt).max(-ARENA).min(ARENA);
        }
        self.n_steps += 1;

        let reward = self.reward();
        if self.n_steps as f64 >= self.step_limit() {
            self.reset_next_step = true;
            Ok(TimeStep::truncation(reward, self.observation()))
        } else {
            Ok(TimeStep::transition(reward, self.observation()))
        }
    }

    fn render(&mut self, camera: &CameraConfig) -> Result<RgbImage> {
        let zoom = match camera.camera_id {
            -1 | 0 => 1.0,
            1 => 2.0,
            id => bail!("Camera id {} is out of range [-1, 1]", id),
        };
        self.last_camera = Some(*camera);

        let (w, h) = (camera.width as u32, camera.height as u32);
        let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        let color = if self.visualize_reward && self.reward() > 0.5 {
            Rgb([0, 160, 0])
        } else {
            Rgb([200, 0, 0])
        };

        let scale = zoom * (w.min(h) as f64) / (2.0 * ARENA);
        let cx = w as f64 / 2.0 + self.position[0] * scale;
        let cy = h as f64 / 2.0 - self.position[1] * scale;
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            if dx * dx + dy * dy <= 9.0 {
                *pixel = color;
            }
        }
        Ok(img)
    }

    fn close(&mut self) -> Result<()> {
        self.n_close += 1;
        Ok(())
    }
}

/// Loads [`PointMass`] tasks: `point_mass/easy` and `point_mass/hard`.
///
/// Recognized task keyword arguments are `random` (seed) and `time_limit` (seconds).
#[derive(Debug, Clone, Default)]
pub struct PointMassLoader;

impl SuiteLoader for PointMassLoader {
    type Env = PointMass;

    fn all_tasks(&self) -> Vec<(String, String)> {
        vec![
            ("point_mass".to_string(), "easy".to_string()),
            ("point_mass".to_string(), "hard".to_string()),
        ]
    }

    fn load(
        &self,
        domain_name: &str,
        task_name: &str,
        task_kwargs: Option<&Mapping>,
        _environment_kwargs: Option<&Mapping>,
        visualize_reward: bool,
    ) -> Result<Self::Env> {
        let init_range = match (domain_name, task_name) {
            ("point_mass", "easy") => 0.1,
            ("point_mass", "hard") => ARENA,
            _ => bail!("Unknown task {}/{}", domain_name, task_name),
        };
        let kwarg = |key: &str| task_kwargs.and_then(|m| m.get(&Value::String(key.to_string())));
        let seed = kwarg("random").and_then(Value::as_u64).unwrap_or(0);
        let time_limit = kwarg("time_limit").and_then(Value::as_f64).unwrap_or(20.0);

        Ok(PointMass::new(init_range, time_limit, seed).visualize_reward(visualize_reward))
    }
}
