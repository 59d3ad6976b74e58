use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use penalty_core::arcade::ArcadeWorld;
use penalty_core::config::GameConfig;
use penalty_core::round::{PointerAction, RoundController, RoundEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constants::{color_from_hex, Colors, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Input,
    Simulate,
    Publish,
}

/// The running penalty round. Keeper draws come from a ChaCha stream seeded
/// by the configuration.
#[derive(Resource)]
pub(crate) struct Round {
    pub(crate) controller: RoundController<ArcadeWorld, ChaCha8Rng>,
}

impl Round {
    pub(crate) fn new(config: GameConfig) -> Self {
        let world = ArcadeWorld::new(config.world.width, config.world.height);
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self {
            controller: RoundController::new(config, world, rng),
        }
    }

    pub(crate) fn config(&self) -> &GameConfig {
        self.controller.config()
    }
}

/// Pointer events collected each frame, applied on the next fixed tick.
#[derive(Resource, Default)]
pub(crate) struct PointerQueue {
    pub(crate) actions: Vec<PointerAction>,
}

#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct RoundMessage(pub(crate) RoundEvent);

/// Sent after `R` swapped in a freshly loaded configuration.
#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct ConfigReloaded;

pub struct CorePlugin {
    pub config: GameConfig,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if self.config.world.width as f32 != CANVAS_WIDTH
            || self.config.world.height as f32 != CANVAS_HEIGHT
        {
            warn!(
                "World is {}x{}, view is fitted to {}x{}",
                self.config.world.width, self.config.world.height, CANVAS_WIDTH, CANVAS_HEIGHT
            );
        }

        app.insert_resource(Round::new(self.config))
            .init_resource::<PointerQueue>()
            .add_message::<RoundMessage>()
            .add_message::<ConfigReloaded>()
            .insert_resource(ClearColor(color_from_hex(Colors::PITCH_BG)))
            .insert_resource(Time::<Fixed>::from_hz(self.config.world.tick_rate_hz as f64))
            .configure_sets(Update, (UpdateSet::Input, UpdateSet::Visuals).chain())
            .configure_sets(
                FixedUpdate,
                (FixedSet::Input, FixedSet::Simulate, FixedSet::Publish).chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(FixedUpdate, apply_pointer_queue.in_set(FixedSet::Input))
            .add_systems(FixedUpdate, tick_round.in_set(FixedSet::Simulate))
            .add_systems(FixedUpdate, publish_round_events.in_set(FixedSet::Publish))
            .add_systems(Update, (reload_config_system, fit_camera_to_canvas));
    }
}

fn setup_camera(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((Camera2d, msaa, MainCamera));
}

fn apply_pointer_queue(mut queue: ResMut<PointerQueue>, mut round: ResMut<Round>) {
    for action in queue.actions.drain(..) {
        round.controller.pointer(action);
    }
}

fn tick_round(mut round: ResMut<Round>) {
    round.controller.tick();
}

fn publish_round_events(mut round: ResMut<Round>, mut writer: MessageWriter<RoundMessage>) {
    for event in round.controller.drain_events() {
        writer.write(RoundMessage(event));
    }
}

fn reload_config_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut round: ResMut<Round>,
    mut queue: ResMut<PointerQueue>,
    mut fixed: ResMut<Time<Fixed>>,
    mut round_writer: MessageWriter<RoundMessage>,
    mut reload_writer: MessageWriter<ConfigReloaded>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }

    match GameConfig::from_env() {
        Ok(config) => {
            *round = Round::new(config);
            queue.actions.clear();
            fixed.set_timestep_hz(config.world.tick_rate_hz as f64);
            round_writer.write(RoundMessage(RoundEvent::Reset));
            reload_writer.write(ConfigReloaded);
            info!(
                "Configuration reloaded (keeper skill {:.2}, seed {})",
                config.keeper.skill, config.rng_seed
            );
        }
        Err(e) => warn!("Keeping current configuration: {}", e),
    }
}

fn fit_camera_to_canvas(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let scale_x = CANVAS_WIDTH / window.width();
    let scale_y = CANVAS_HEIGHT / window.height();
    let target_scale = scale_x.max(scale_y).max(0.0001);

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}
