//! Petrol Digger entry point
//!
//! Headless driver: runs one round at the fixed frame rate with the human
//! lane in idle mode and prints the round summary as JSON.
//!
//! Usage: `petrol-digger [settings.json] [seed]`

use petrol_digger::RoundSettings;
use petrol_digger::sim::{DigPolicy, GameEvent, NearestResource, RoundContext, TickInput, tick};
use petrol_digger::summary::RoundSummary;

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn load_settings() -> RoundSettings {
    let mut args = std::env::args().skip(1);

    let mut settings = match args.next() {
        Some(path) => RoundSettings::load_from_path(path),
        None => RoundSettings::default(),
    };

    match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => settings.seed = seed,
        Some(Err(e)) => log::warn!("Ignoring seed argument: {}", e),
        None => {
            if settings.seed == 0 {
                settings.seed = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
            }
        }
    }

    settings
}

/// Step a round to completion on a simulated clock
fn run_round(ctx: &mut RoundContext, policy: &dyn DigPolicy) {
    let fps = ctx.settings.target_fps as u64;
    // The clock always ends the round; this only guards against a stuck clock
    let max_frames = ctx.settings.frames_per_round() + fps;

    let mut frame = 0u64;
    while !ctx.is_over() && frame <= max_frames {
        let input = TickInput {
            elapsed_secs: frame / fps,
            idle_mode: true,
            ..Default::default()
        };

        for event in tick(ctx, &input, policy) {
            match event {
                GameEvent::ResourceCollected {
                    side,
                    resource_id,
                    score,
                } => log::debug!("[{:>5}] {} got oil #{} -> {}", frame, side.as_str(), resource_id, score),
                GameEvent::RoundEnded { outcome } => log::info!("Round over: {}", outcome.message()),
            }
        }
        frame += 1;
    }
}

fn main() {
    init_logging();
    log::info!("Petrol Digger (headless) starting...");

    let settings = load_settings();
    let policy = NearestResource;
    log::info!("Seed {}, policy {}", settings.seed, policy.name());

    let mut ctx = RoundContext::new(settings);
    run_round(&mut ctx, &policy);

    let summary = RoundSummary::from_round(&ctx);
    let (human, ai) = ctx.scores();
    log::info!("Final score: human {} - ai {} ({})", human, ai, summary.message());

    match summary.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize summary: {}", e),
    }
}
