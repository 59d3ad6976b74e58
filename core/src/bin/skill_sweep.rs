//! Replays one seeded bot session against keepers of increasing skill.
//!
//! Usage: cargo run --bin skill-sweep -- [OPTIONS]
//!
//! Options:
//!   --shots N            Shots per skill level (default: 200)
//!   --seed S             Bot RNG seed (default: 7)
//!   --skills LIST        Comma separated skills (default: 0.1,0.3,0.5,0.7,0.9)
//!   --personality NAME   placer | blaster | chaotic (default: placer)
//!   --json               Print the samples as JSON instead of a table

use penalty_core::bot::ShooterPersonality;
use penalty_core::config::GameConfig;
use penalty_core::session::sweep_skill;

fn parse_skills(list: &str) -> Option<Vec<f64>> {
    list.split(',')
        .map(|s| s.trim().parse::<f64>().ok())
        .collect()
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    let mut shots: u32 = 200;
    let mut seed: u64 = 7;
    let mut skills = vec![0.1, 0.3, 0.5, 0.7, 0.9];
    let mut personality = ShooterPersonality::Placer;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shots" => {
                i += 1;
                shots = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(200);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(7);
            }
            "--skills" => {
                i += 1;
                if let Some(list) = args.get(i).and_then(|s| parse_skills(s)) {
                    skills = list;
                }
            }
            "--personality" => {
                i += 1;
                personality = args
                    .get(i)
                    .and_then(|s| ShooterPersonality::parse(s))
                    .unwrap_or(personality);
            }
            "--json" => json = true,
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

    let samples = match sweep_skill(config, &skills, shots, personality, seed) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&samples) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to encode samples: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("=== Keeper Skill Sweep ===");
    println!("Shooter: {:?}, {} shots per level, seed {}", personality, shots, seed);
    println!();
    println!("{:>6} {:>6} {:>6} {:>8} {:>10}", "skill", "goals", "saves", "no goal", "save rate");
    for sample in &samples {
        let r = &sample.report;
        println!(
            "{:>6.2} {:>6} {:>6} {:>8} {:>9.1}%",
            sample.skill,
            r.goals,
            r.saves,
            r.no_goals,
            r.save_rate() * 100.0
        );
    }
}
