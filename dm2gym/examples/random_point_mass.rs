use anyhow::Result;
use dm2gym::{DmControlEnvConfig, Registry, TRUNCATED_KEY};
use dm2gym_core::{dummy::PointMassLoader, Env as _, RenderOptions};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde_yaml::{Mapping, Value};

const N_EPISODES: usize = 3;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut rng = StdRng::seed_from_u64(42);

    let registry = Registry::from_loader(&PointMassLoader)?;
    for id in registry.ids() {
        info!("Registered: {}", id);
    }

    // Episodes of 2 seconds, i.e., 100 steps
    let mut task_kwargs = Mapping::new();
    task_kwargs.insert(Value::from("random"), Value::from(42));
    task_kwargs.insert(Value::from("time_limit"), Value::from(2.0));
    let config = DmControlEnvConfig::default().task_kwargs(Some(task_kwargs));
    let mut env = registry.make_with_config("Point_massEasy-v0", &PointMassLoader, config)?;
    let space = env.action_space().as_box().unwrap().clone();

    for episode in 0..N_EPISODES {
        let _obs = env.reset()?;
        let mut ret = 0.0;
        let mut n_steps = 0;
        loop {
            let step = env.step(&space.sample(&mut rng))?;
            ret += step.reward.unwrap_or(0.0);
            n_steps += 1;
            if step.is_done {
                info!(
                    "Episode {}: {} steps, return = {:.3}, truncated = {:?}",
                    episode,
                    n_steps,
                    ret,
                    step.info.get_bool(TRUNCATED_KEY)
                );
                break;
            }
        }
    }

    let img = env
        .render("rgb_array", &RenderOptions::default())?
        .into_image()
        .unwrap();
    info!("Rendered image of size {:?}", img.dimensions());
    env.close()?;

    Ok(())
}
