use bevy::prelude::*;
use penalty_core::resolve::Outcome;
use penalty_core::round::{RoundEvent, RoundTally};

use crate::constants::{color_from_hex, Colors};

use super::autoplay::Autoplay;
use super::{Round, RoundMessage, UpdateSet};

pub struct HudPlugin;

const SCORE_LEFT: f32 = 16.0;
const SCORE_TOP: f32 = 12.0;
const MESSAGE_TOP: f32 = 250.0;
const HINT_BOTTOM: f32 = 10.0;

pub(crate) const PROMPT: &str = "Click & hold to charge, release to shoot";
const RETRY: &str = "(click to try again)";

#[derive(Component)]
struct HudScoreText;

#[derive(Component)]
struct HudMessageText;

#[derive(Component)]
struct HudHintText;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (update_message_ui, update_score_ui, update_hint_ui)
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}

pub(crate) fn outcome_headline(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Goal => "GOAL!",
        Outcome::Saved => "SAVED!",
        Outcome::NoGoal => "No goal",
    }
}

pub(crate) fn score_line(tally: RoundTally) -> String {
    format!("Goals: {} | Shots: {}", tally.score, tally.shots_taken)
}

/// Center message after `event`, or `None` when the current text stays.
pub(crate) fn message_for(event: &RoundEvent) -> Option<String> {
    match event {
        RoundEvent::Launched { .. } => None,
        RoundEvent::Resolved { outcome, .. } => {
            Some(format!("{}\n{}", outcome_headline(*outcome), RETRY))
        }
        RoundEvent::Reset => Some(PROMPT.to_string()),
    }
}

fn spawn_hud(mut commands: Commands) {
    let small = TextFont::from_font_size(12.0);
    let medium = TextFont::from_font_size(18.0);
    let large = TextFont::from_font_size(32.0);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCORE_LEFT),
            top: Val::Px(SCORE_TOP),
            ..default()
        },
        Text::new(score_line(RoundTally::default())),
        medium,
        TextColor(color_from_hex(Colors::HUD_TEXT)),
        HudScoreText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(MESSAGE_TOP),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Text::new(PROMPT),
        large,
        TextColor(color_from_hex(Colors::HUD_TEXT)),
        TextLayout::new_with_justify(Justify::Center),
        HudMessageText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCORE_LEFT),
            bottom: Val::Px(HINT_BOTTOM),
            ..default()
        },
        Text::new(""),
        small,
        TextColor(color_from_hex(Colors::HUD_DIM)),
        HudHintText,
    ));
}

fn update_message_ui(
    mut events: MessageReader<RoundMessage>,
    mut q_text: Query<&mut Text, With<HudMessageText>>,
) {
    let Some(message) = events
        .read()
        .filter_map(|RoundMessage(event)| message_for(event))
        .last()
    else {
        return;
    };
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = message;
    }
}

fn update_score_ui(round: Res<Round>, mut q_text: Query<&mut Text, With<HudScoreText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        let line = score_line(round.controller.tally());
        if text.0 != line {
            text.0 = line;
        }
    }
}

fn update_hint_ui(autoplay: Res<Autoplay>, mut q_text: Query<&mut Text, With<HudHintText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = if autoplay.enabled {
            format!("B: autoplay ON ({:?})   R: reload config", autoplay.personality())
        } else {
            "B: autoplay OFF   R: reload config".to_string()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penalty_core::vec2::Vec2;

    #[test]
    fn score_line_format() {
        let tally = RoundTally {
            score: 3,
            shots_taken: 7,
        };
        assert_eq!(score_line(tally), "Goals: 3 | Shots: 7");
    }

    #[test]
    fn results_ask_for_a_click() {
        for (outcome, headline) in [
            (Outcome::Goal, "GOAL!"),
            (Outcome::Saved, "SAVED!"),
            (Outcome::NoGoal, "No goal"),
        ] {
            let msg = message_for(&RoundEvent::Resolved {
                outcome,
                score: 0,
                shots_taken: 1,
            });
            assert_eq!(msg.as_deref(), Some(format!("{headline}\n(click to try again)").as_str()));
        }
    }

    #[test]
    fn launch_keeps_prompt_and_reset_restores_it() {
        let launched = RoundEvent::Launched {
            velocity: Vec2::ZERO,
            shots_taken: 1,
            intercept: None,
        };
        assert_eq!(message_for(&launched), None);
        assert_eq!(message_for(&RoundEvent::Reset).as_deref(), Some(PROMPT));
    }
}
