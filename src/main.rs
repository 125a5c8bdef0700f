use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use xr_walkthrough::cli::Cli;
use xr_walkthrough::core::{Clock, FixedStep, FrameClock};
use xr_walkthrough::scene::{ModelPlacement, Scene, SceneConfig};
use xr_walkthrough::script::{Script, Trace};
use xr_walkthrough::session::{Walkthrough, CONTROLLER_COUNT};

/// Wall clock that paces frames to the script's dt
struct PacedClock {
    clock: Clock,
    frame: Duration,
}

impl FrameClock for PacedClock {
    fn elapsed(&mut self) -> f32 {
        std::thread::sleep(self.frame);
        self.clock.tick()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    if cli.dump_scene {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::default_walk(cli.frames, cli.dt),
    };

    let scene = Scene::build(&config)?;
    let mut session = Walkthrough::new(scene);
    info!(
        "Running {} frames at dt={:.4}s from {:?}",
        script.frames,
        script.dt,
        session.rig().position
    );

    let trace = if cli.realtime {
        let mut clock = PacedClock {
            clock: Clock::new(),
            frame: Duration::try_from_secs_f32(script.dt)
                .context("Script dt is not a valid frame time")?,
        };
        script.run(&mut session, &mut clock)?
    } else {
        script.run(&mut session, &mut FixedStep::new(script.dt))?
    };

    if let Some(path) = &cli.trace {
        std::fs::write(path, trace.to_json()?)
            .with_context(|| format!("Failed to write trace: {:?}", path))?;
        info!("Trace written to {:?}", path);
    }

    if !cli.quiet {
        print_summary(&session, &trace);
    }

    Ok(())
}

fn print_summary(session: &Walkthrough, trace: &Trace) {
    let p = trace.final_position;
    println!("Frames:          {}", trace.frames.len());
    println!("Distance:        {:.3}", trace.distance_travelled());
    println!("Blocked frames:  {}", trace.blocked_frames());
    println!("Final position:  ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);

    let obstacles = &session.scene().obstacles;
    let blockers: BTreeSet<&str> = trace
        .frames
        .iter()
        .flat_map(|f| f.steps.iter().flatten())
        .filter_map(|step| step.blocker)
        .filter_map(|id| obstacles.get(id))
        .map(|o| o.name.as_str())
        .collect();
    if !blockers.is_empty() {
        let names: Vec<&str> = blockers.into_iter().collect();
        println!("Blocked by:      {}", names.join(", "));
    }

    for i in 0..CONTROLLER_COUNT {
        let state = match session.controller(i) {
            None => "disconnected".to_string(),
            Some(slot) if !slot.is_connected() => "never connected".to_string(),
            Some(slot) => format!("connected ({:?})", slot.mode().unwrap_or_default()),
        };
        println!("Controller {}:    {}", i, state);
    }

    for ModelPlacement { name, asset, .. } in &session.scene().models {
        println!("Model {:<10} {}", name, asset);
    }
}
