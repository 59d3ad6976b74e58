use bevy::prelude::*;
use penalty_core::bot::{BotView, ShooterBot, ShooterPersonality};
use penalty_core::round::PointerAction;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{FixedSet, PointerQueue, Round};

pub struct AutoplayPlugin;

/// Bot shooter that takes over the pointer while enabled.
#[derive(Resource)]
pub(crate) struct Autoplay {
    pub(crate) enabled: bool,
    bot: ShooterBot,
    rng: ChaCha8Rng,
}

impl Default for Autoplay {
    fn default() -> Self {
        let mut rng = ChaCha8Rng::from_entropy();
        let personality = ShooterPersonality::random(&mut rng);
        Self {
            enabled: false,
            bot: ShooterBot::new(personality),
            rng,
        }
    }
}

impl Autoplay {
    pub(crate) fn personality(&self) -> ShooterPersonality {
        self.bot.personality
    }
}

impl Plugin for AutoplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Autoplay>()
            .add_systems(Update, toggle_autoplay_system)
            .add_systems(FixedUpdate, autoplay_system.in_set(FixedSet::Input));
    }
}

/// Pointer action queued when autoplay flips to `enabled`. Handing control
/// back drops a charge the bot may still be holding.
pub(crate) fn handoff_action(enabled: bool) -> Option<PointerAction> {
    (!enabled).then_some(PointerAction::Cancel)
}

fn toggle_autoplay_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut autoplay: ResMut<Autoplay>,
    mut queue: ResMut<PointerQueue>,
) {
    if !keys.just_pressed(KeyCode::KeyB) {
        return;
    }

    autoplay.enabled = !autoplay.enabled;
    autoplay.bot.reset();
    queue.actions.extend(handoff_action(autoplay.enabled));
    info!(
        "Autoplay {} ({:?})",
        if autoplay.enabled { "ON" } else { "OFF" },
        autoplay.personality()
    );
}

fn autoplay_system(
    mut autoplay: ResMut<Autoplay>,
    mut round: ResMut<Round>,
    time: Res<Time<Fixed>>,
) {
    if !autoplay.enabled {
        return;
    }

    let view = BotView::of(&round.controller);
    let dt = time.delta_secs_f64();
    let Autoplay { bot, rng, .. } = &mut *autoplay;
    for action in bot.tick(dt, &view, rng) {
        round.controller.pointer(action);
    }
}
