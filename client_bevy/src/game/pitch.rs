use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use penalty_core::config::GameConfig;
use penalty_core::geometry::GoalGeometry;

use crate::constants::{color_from_hex, Colors, POST_WIDTH, Z_GOAL, Z_PITCH};
use crate::coord::{px_to_world, PxPos};

use super::{ConfigReloaded, Round};

pub struct PitchPlugin;

/// Static goal and pitch markings. Rebuilt when the configuration changes.
#[derive(Component)]
struct PitchShape;

impl Plugin for PitchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_pitch)
            .add_systems(Update, respawn_pitch_on_reload);
    }
}

fn spawn_pitch(mut commands: Commands, round: Res<Round>) {
    spawn_markings(&mut commands, round.config());
}

fn respawn_pitch_on_reload(
    mut commands: Commands,
    mut reloads: MessageReader<ConfigReloaded>,
    round: Res<Round>,
    q_shapes: Query<Entity, With<PitchShape>>,
) {
    if reloads.read().last().is_none() {
        return;
    }
    for entity in &q_shapes {
        commands.entity(entity).despawn();
    }
    spawn_markings(&mut commands, round.config());
}

fn to_world2(x: f64, y: f64) -> Vec2 {
    px_to_world(PxPos::new(x as f32, y as f32), 0.0).truncate()
}

fn spawn_markings(commands: &mut Commands, config: &GameConfig) {
    let goal = GoalGeometry::from_config(&config.goal);
    let frame = goal.frame();
    let line_color = color_from_hex(Colors::PITCH_LINE);

    // Net
    let net = shapes::Rectangle {
        extents: Vec2::new(frame.width() as f32, frame.height() as f32),
        origin: shapes::RectangleOrigin::Center,
        radii: None,
    };
    let net_center = to_world2(frame.center().x, frame.center().y);
    commands.spawn((
        ShapeBuilder::with(&net)
            .fill(color_from_hex(Colors::GOAL_NET).with_alpha(0.15))
            .stroke((color_from_hex(Colors::GOAL_NET).with_alpha(0.5), 1.0))
            .build(),
        Transform::from_xyz(net_center.x, net_center.y, Z_PITCH + 0.5),
        PitchShape,
    ));

    // Posts and crossbar
    let frame_color = color_from_hex(Colors::GOAL_FRAME);
    let top = frame.min.y;
    let bottom = goal.line_y;
    for (a, b) in [
        (to_world2(goal.left(), top), to_world2(goal.left(), bottom)),
        (to_world2(goal.right(), top), to_world2(goal.right(), bottom)),
        (to_world2(goal.left(), top), to_world2(goal.right(), top)),
    ] {
        spawn_line(commands, a, b, frame_color, POST_WIDTH, Z_GOAL);
    }

    // Scoring line, extended to the edges of the pitch
    spawn_line(
        commands,
        to_world2(0.0, goal.line_y),
        to_world2(config.world.width, goal.line_y),
        line_color.with_alpha(0.8),
        2.0,
        Z_PITCH + 0.1,
    );

    // Penalty spot
    let spot = to_world2(config.ball.start_x, config.ball.start_y);
    commands.spawn((
        ShapeBuilder::with(&shapes::Circle {
            radius: 4.0,
            center: Vec2::ZERO,
        })
        .fill(line_color)
        .build(),
        Transform::from_xyz(spot.x, spot.y, Z_PITCH + 0.1),
        PitchShape,
    ));
}

fn spawn_line(commands: &mut Commands, a: Vec2, b: Vec2, color: Color, width: f32, z: f32) {
    commands.spawn((
        ShapeBuilder::with(&shapes::Line(a, b))
            .stroke((color, width))
            .build(),
        Transform::from_xyz(0.0, 0.0, z),
        PitchShape,
    ));
}
