use anyhow::Result;
use dm2gym::{
    viewer::{Viewer, ViewerBackend, ViewerConfig},
    DmControlEnv, DmControlEnvConfig, EnvState, Registry, TRUNCATED_KEY,
};
use dm2gym_core::{
    dummy::{PointMass, PointMassLoader},
    error::Dm2GymError,
    CameraConfig, Dtype, Env, GymSpace, RenderOptions, Rendered, Simulator,
};
use image::RgbImage;
use ndarray::{arr1, ArrayD};
use rand::{rngs::StdRng, SeedableRng};
use std::{cell::RefCell, rc::Rc};

/// What the mock viewers saw.
#[derive(Default)]
struct ViewerLog {
    opened: Vec<ViewerBackend>,
    shown: Vec<(u32, u32)>,
    closed: usize,
}

struct MockViewer {
    log: Rc<RefCell<ViewerLog>>,
    is_open: bool,
}

impl Viewer for MockViewer {
    fn imshow(&mut self, img: &RgbImage) -> Result<()> {
        self.log.borrow_mut().shown.push(img.dimensions());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn close(&mut self) {
        self.is_open = false;
        self.log.borrow_mut().closed += 1;
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create_env(config: &DmControlEnvConfig) -> Result<(DmControlEnv<PointMass>, Rc<RefCell<ViewerLog>>)> {
    let log = Rc::new(RefCell::new(ViewerLog::default()));
    let log_ = log.clone();
    let env = DmControlEnv::new(PointMass::new(0.1, 20.0, 42), config)?.with_viewer_builder(
        move |backend: ViewerBackend, _config: &ViewerConfig| {
            log_.borrow_mut().opened.push(backend);
            Ok(Box::new(MockViewer {
                log: log_.clone(),
                is_open: true,
            }) as Box<dyn Viewer>)
        },
    );
    Ok((env, log))
}

fn act(x: f64, y: f64) -> ArrayD<f64> {
    arr1(&[x, y]).into_dyn()
}

#[test]
fn test_spaces() -> Result<()> {
    init();
    let (env, _) = create_env(&DmControlEnvConfig::default())?;

    let obs_space = env.observation_space().as_dict().unwrap();
    assert_eq!(obs_space.keys().collect::<Vec<_>>(), vec!["position", "velocity"]);
    let position = obs_space.get("position").unwrap().as_box().unwrap();
    assert_eq!(position.shape(), &[2]);
    assert!(!position.is_bounded());

    match env.action_space() {
        GymSpace::Box(space) => {
            assert_eq!(space.dtype(), Dtype::Float64);
            assert_eq!(space.low(), &arr1(&[-1.0, -1.0]).into_dyn());
            assert_eq!(space.high(), &arr1(&[1.0, 1.0]).into_dyn());
        }
        GymSpace::Dict(_) => panic!("Action space must be a box"),
    }
    Ok(())
}

#[test]
fn test_step_returns_four_tuple() -> Result<()> {
    init();
    let (mut env, _) = create_env(&DmControlEnvConfig::default())?;
    let obs = env.reset()?;
    assert_eq!(obs[0].0, "position");
    assert_eq!(env.state(), EnvState::Active);

    let (obs, reward, is_done, info) = env.step(&act(0.5, -0.5))?.into_tuple();
    assert_eq!(obs.len(), 2);
    assert!(reward.unwrap() >= 0.0);
    assert!(!is_done);
    assert!(info.is_empty());
    Ok(())
}

#[test]
fn test_action_sampled_from_space_is_accepted() -> Result<()> {
    init();
    let (mut env, _) = create_env(&DmControlEnvConfig::default())?;
    let space = env.action_space().as_box().unwrap().clone();
    let mut rng = StdRng::seed_from_u64(0);
    env.reset()?;
    for _ in 0..10 {
        let a = space.sample(&mut rng);
        assert!(space.contains(&a));
        env.step(&a)?;
    }
    Ok(())
}

#[test]
fn test_episode_ends_on_last_timestep() -> Result<()> {
    init();
    let mut env = DmControlEnv::new(PointMass::new(0.1, 0.1, 0), &DmControlEnvConfig::default())?;
    assert_eq!(env.spec().max_episode_steps, Some(5));
    env.reset()?;
    for _ in 0..4 {
        assert!(!env.step(&act(0.0, 0.0))?.is_done);
    }
    assert!(env.step(&act(0.0, 0.0))?.is_done);

    // The simulator restarts the episode without a reward
    let step = env.step(&act(0.0, 0.0))?;
    assert!(!step.is_done);
    assert_eq!(step.reward, None);
    Ok(())
}

#[test]
fn test_simulator_errors_propagate() -> Result<()> {
    init();
    let (mut env, _) = create_env(&DmControlEnvConfig::default())?;
    env.reset()?;
    assert!(env.step(&arr1(&[0.0, 0.0, 0.0]).into_dyn()).is_err());

    let options = RenderOptions::default().camera_id(5);
    assert!(env.render("rgb_array", &options).is_err());
    Ok(())
}

#[test]
fn test_rgb_array_uses_tracking_camera() -> Result<()> {
    init();
    let (mut env, log) = create_env(&DmControlEnvConfig::default())?;
    env.reset()?;

    let img = env
        .render("rgb_array", &RenderOptions::default())?
        .into_image()
        .unwrap();
    assert_eq!(img.dimensions(), (320, 240));
    assert_eq!(
        env.simulator().last_camera(),
        Some(CameraConfig {
            camera_id: 0,
            height: 240,
            width: 320
        })
    );

    // Same state, same image as rendered by the simulator
    let camera = CameraConfig::default();
    assert_eq!(env.simulator_mut().render(&camera)?, img);

    let options = RenderOptions::default().camera_id(1).size(64, 48);
    let img = env.render("rgb_array", &options)?.into_image().unwrap();
    assert_eq!(img.dimensions(), (48, 64));
    assert!(!env.has_viewer());
    assert!(log.borrow().opened.is_empty());
    Ok(())
}

#[test]
fn test_unsupported_render_mode() -> Result<()> {
    init();
    let (mut env, log) = create_env(&DmControlEnvConfig::default())?;
    env.reset()?;

    let err = env.render("ansi", &RenderOptions::default()).err().unwrap();
    assert_eq!(
        err.downcast_ref::<Dm2GymError>(),
        Some(&Dm2GymError::UnsupportedRenderMode("ansi".into()))
    );
    assert!(!env.has_viewer());
    assert!(log.borrow().opened.is_empty());
    assert!(env.simulator().last_camera().is_none());
    Ok(())
}

#[test]
fn test_human_render_opens_one_viewer() -> Result<()> {
    init();
    let (mut env, log) = create_env(&DmControlEnvConfig::default())?;
    env.reset()?;

    for _ in 0..3 {
        let rendered = env.render("human", &RenderOptions::default())?;
        assert_eq!(rendered, Rendered::Human(true));
        env.step(&act(0.1, 0.1))?;
    }
    assert!(env.has_viewer());
    let log = log.borrow();
    assert_eq!(log.opened, vec![ViewerBackend::Simple]);
    assert_eq!(log.shown, vec![(320, 240); 3]);
    Ok(())
}

#[test]
fn test_viewer_backend_selection() -> Result<()> {
    init();
    // From the configuration
    let config = DmControlEnvConfig::default().render_window_mode("opencv");
    let (mut env, log) = create_env(&config)?;
    env.render("human", &RenderOptions::default())?;
    assert_eq!(log.borrow().opened, vec![ViewerBackend::OpenCv]);

    // Overridden by the render options
    let (mut env, log) = create_env(&config)?;
    let options = RenderOptions::default().use_opencv_renderer(false);
    env.render("human", &options)?;
    assert_eq!(log.borrow().opened, vec![ViewerBackend::Simple]);

    // Only effective when the viewer is created
    let options = RenderOptions::default().use_opencv_renderer(true);
    env.render("human", &options)?;
    assert_eq!(log.borrow().opened, vec![ViewerBackend::Simple]);
    Ok(())
}

#[test]
fn test_close_is_idempotent() -> Result<()> {
    init();
    let (mut env, log) = create_env(&DmControlEnvConfig::default())?;
    env.reset()?;
    env.render("human", &RenderOptions::default())?;

    env.close()?;
    env.close()?;
    assert_eq!(env.state(), EnvState::Closed);
    assert_eq!(env.simulator().n_close(), 1);
    assert!(!env.has_viewer());
    assert_eq!(log.borrow().closed, 1);

    drop(env);
    assert_eq!(log.borrow().closed, 1);
    Ok(())
}

#[test]
fn test_closed_env_rejects_calls() -> Result<()> {
    init();
    let (mut env, _) = create_env(&DmControlEnvConfig::default())?;
    env.close()?;

    let is_closed = |r: Result<()>| {
        matches!(
            r.err().as_ref().and_then(|e| e.downcast_ref::<Dm2GymError>()),
            Some(Dm2GymError::EnvClosed)
        )
    };
    assert!(is_closed(env.reset().map(|_| ())));
    assert!(is_closed(env.step(&act(0.0, 0.0)).map(|_| ())));
    assert!(is_closed(env.seed(0)));
    assert!(is_closed(
        env.render("rgb_array", &RenderOptions::default()).map(|_| ())
    ));
    Ok(())
}

#[test]
fn test_registry_make() -> Result<()> {
    init();
    let registry = Registry::from_loader(&PointMassLoader)?;
    let mut env = registry.make("Point_massHard-v0", &PointMassLoader)?;
    assert_eq!(env.spec().id, "Point_massHard-v0");
    assert_eq!(env.spec().max_episode_steps, Some(1000));
    assert_eq!(env.inner().spec().max_episode_steps, Some(1000));
    assert_eq!(env.metadata().video_frames_per_second, 50);

    env.seed(3)?;
    env.reset()?;
    let mut n_steps = 0;
    loop {
        let step = env.step(&act(0.0, 0.0))?;
        n_steps += 1;
        if step.is_done {
            // The simulator and the wrapper end the episode at the same step
            assert_eq!(step.info.get_bool(TRUNCATED_KEY), Some(false));
            break;
        }
    }
    assert_eq!(n_steps, 1000);
    env.close()?;
    assert_eq!(env.inner().state(), EnvState::Closed);
    Ok(())
}
