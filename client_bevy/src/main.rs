mod constants;
mod coord;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use penalty_core::config::GameConfig;

use game::{
    ActorsPlugin, AimPlugin, AutoplayPlugin, CorePlugin, HudPlugin, InputPlugin, PitchPlugin,
};

fn main() {
    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid game configuration: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Penalty Kick".to_string(),
                resolution: WindowResolution::new(900, 600),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShapePlugin)
        .add_plugins(CorePlugin { config })
        .add_plugins(PitchPlugin)
        .add_plugins(ActorsPlugin)
        .add_plugins(AimPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(AutoplayPlugin)
        .add_plugins(HudPlugin)
        .run();
}
