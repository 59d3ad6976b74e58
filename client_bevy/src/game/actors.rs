use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{color_from_hex, Colors, Z_BALL, Z_KEEPER};
use crate::coord::sim_to_world;

use super::{Round, UpdateSet};

pub struct ActorsPlugin;

#[derive(Component)]
pub(crate) struct BallVisual;

#[derive(Component)]
pub(crate) struct KeeperVisual;

impl Plugin for ActorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_actors)
            .add_systems(Update, sync_actor_transforms.in_set(UpdateSet::Visuals));
    }
}

// Shapes are unit sized and scaled from the configuration every frame, so a
// reload can resize them.
fn spawn_actors(mut commands: Commands) {
    commands.spawn((
        ShapeBuilder::with(&shapes::Circle {
            radius: 1.0,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(Colors::BALL))
        .stroke((color_from_hex(Colors::BALL_OUTLINE), 0.12))
        .build(),
        Transform::from_xyz(0.0, 0.0, Z_BALL),
        BallVisual,
    ));

    commands.spawn((
        ShapeBuilder::with(&shapes::Rectangle {
            extents: Vec2::ONE,
            origin: shapes::RectangleOrigin::Center,
            radii: None,
        })
        .fill(color_from_hex(Colors::KEEPER).with_alpha(0.9))
        .build(),
        Transform::from_xyz(0.0, 0.0, Z_KEEPER),
        KeeperVisual,
    ));
}

fn sync_actor_transforms(
    round: Res<Round>,
    mut q_ball: Query<&mut Transform, (With<BallVisual>, Without<KeeperVisual>)>,
    mut q_keeper: Query<&mut Transform, (With<KeeperVisual>, Without<BallVisual>)>,
) {
    let config = round.config();

    if let Ok(mut tf) = q_ball.single_mut() {
        let r = config.ball.radius as f32;
        tf.translation = sim_to_world(round.controller.ball_position(), Z_BALL);
        tf.scale = Vec3::new(r, r, 1.0);
    }

    if let Ok(mut tf) = q_keeper.single_mut() {
        tf.translation = sim_to_world(round.controller.keeper_position(), Z_KEEPER);
        tf.scale = Vec3::new(
            config.keeper.body_width as f32,
            config.keeper.body_height as f32,
            1.0,
        );
    }
}
