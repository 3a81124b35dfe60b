use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use slime_platformer::engine::game_loop::{FixedTicker, TICKS_PER_SECOND};
use slime_platformer::engine::input::{Action, PlayerInput};
use slime_platformer::engine::renderer::Canvas;
use slime_platformer::game::characters::AnimationLibrary;
use slime_platformer::game::world::{VIEW_HEIGHT, VIEW_WIDTH};
use slime_platformer::game::{Level, World};
use std::path::PathBuf;

const BACKGROUND: [u8; 4] = [20, 18, 30, 255];

#[derive(Parser)]
#[command(name = "slime-platformer")]
#[command(about = "Run the platformer headless and save the final frame")]
struct Options {
    /// Image root with the animation frame directories (placeholders if omitted)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// ASCII level file (built-in demo map if omitted)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 10 * TICKS_PER_SECOND as u64)]
    ticks: u64,

    /// Seed for AI rolls and effects
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Where to write the final frame
    #[arg(long = "out", default_value = "frame.png")]
    output: PathBuf,

    /// Pace steps at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Demo input: run right, jump the gap, fight whatever is there
fn script(tick: u64, input: &mut PlayerInput) {
    match tick % 240 {
        0 => input.press(Action::MoveRight),
        30 => input.press(Action::Run),
        45 | 150 => input.press(Action::Jump),
        46 | 151 => input.release(Action::Jump),
        90 => input.release(Action::Run),
        100 | 115 | 130 => input.press(Action::Attack),
        101 | 116 | 131 => input.release(Action::Attack),
        180 => input.press(Action::Dash),
        181 => input.release(Action::Dash),
        200 => input.release(Action::MoveRight),
        _ => {}
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = Options::parse();
    info!("Starting slime platformer...");

    let library = match &options.assets {
        Some(root) => AnimationLibrary::load(root)
            .with_context(|| format!("Loading animations from {}", root.display()))?,
        None => {
            warn!("No asset directory given, using placeholder sprites");
            AnimationLibrary::placeholder()
        }
    };

    let level = match &options.level {
        Some(path) => Level::load(path)?,
        None => Level::demo()?,
    };
    let mut world = World::new(level, &library, options.seed)?;

    let mut input = PlayerInput::new();
    let mut ticker = FixedTicker::new();
    let mut sounds = 0;
    let mut sparks = 0;

    while world.tick() < options.ticks {
        let steps = if options.realtime {
            ticker.begin_frame()
        } else {
            1
        };

        for _ in 0..steps {
            script(world.tick(), &mut input);
            world.step(&input);
            input.end_frame();

            let events = world.drain_events();
            for sound in &events.sounds {
                debug!("Sound: {}", sound.name());
            }
            sounds += events.sounds.len();
            sparks += events.sparks.len();
        }

        if options.realtime {
            std::thread::sleep(ticker.step_duration());
        }
    }

    let mut canvas = Canvas::new(VIEW_WIDTH, VIEW_HEIGHT);
    canvas.clear(BACKGROUND);
    let shake = world.shake_offset();
    world.render(&mut canvas, shake);
    canvas.save_png(&options.output)?;

    let player = world.player();
    info!(
        "Ran {} ticks: hp {}/{}, exp {}, {} slimes left, {} sounds, {} sparks",
        world.tick(),
        player.hp(),
        player.max_hp(),
        player.exp(),
        world.slimes().count(),
        sounds,
        sparks
    );
    if world.is_cleared() {
        info!("Level cleared");
    }
    info!("Saved final frame to {}", options.output.display());

    Ok(())
}
