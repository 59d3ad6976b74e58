//! Headless penalty session: a bot shooter against the configured keeper.
//!
//! Usage: cargo run --bin penalty-sim -- [OPTIONS]
//!
//! Options:
//!   --shots N            Shots to take (default: 20)
//!   --personality NAME   placer | blaster | chaotic (default: random from seed)
//!   --seed S             Bot RNG seed (default: 1)
//!
//! The keeper is configured from the JSON file named by `PENALTY_CONFIG`.

use penalty_core::bot::ShooterPersonality;
use penalty_core::config::GameConfig;
use penalty_core::session::run_bot_session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    let mut shots: u32 = 20;
    let mut seed: u64 = 1;
    let mut personality: Option<ShooterPersonality> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shots" => {
                i += 1;
                shots = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(20);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(1);
            }
            "--personality" => {
                i += 1;
                personality = args.get(i).and_then(|s| ShooterPersonality::parse(s));
            }
            _ => {}
        }
        i += 1;
    }

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid game configuration: {}", e);
            std::process::exit(1);
        }
    };

    let personality =
        personality.unwrap_or_else(|| ShooterPersonality::random(&mut ChaCha8Rng::seed_from_u64(seed)));

    tracing::info!(
        shots,
        seed,
        ?personality,
        skill = config.keeper.skill,
        "Starting penalty session"
    );

    let report = match run_bot_session(config, shots, personality, seed) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Session failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Penalty Session ===");
    println!("Shooter: {:?}", personality);
    println!("Keeper skill: {:.2}", config.keeper.skill);
    println!("Goals: {} | Shots: {}", report.goals, report.shots);
    println!("Saved: {}", report.saves);
    println!("No goal: {}", report.no_goals);
    println!("Save rate: {:.1}%", report.save_rate() * 100.0);
    println!("Simulated ticks: {}", report.ticks);
}
