use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{
    color_from_hex, Colors, AIM_BAR_HEIGHT, AIM_BAR_OFFSET, AIM_BAR_WIDTH, AIM_LINE_WIDTH, Z_AIM,
};
use crate::coord::sim_to_world;

use super::{Round, UpdateSet};

pub struct AimPlugin;

#[derive(Component)]
struct AimLine;

#[derive(Component)]
struct PowerBarBackground;

#[derive(Component)]
struct PowerBarFill;

impl Plugin for AimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_aim_visuals)
            .add_systems(Update, update_aim_visuals.in_set(UpdateSet::Visuals));
    }
}

/// Transform that stretches a unit line along +x into the segment `a`..`b`.
pub(crate) fn segment_transform(a: Vec2, b: Vec2, z: f32) -> Transform {
    let d = b - a;
    Transform::from_xyz(a.x, a.y, z)
        .with_rotation(Quat::from_rotation_z(d.y.atan2(d.x)))
        .with_scale(Vec3::new(d.length(), 1.0, 1.0))
}

/// Translation x of a left-anchored bar of `width` filled to `fraction`.
pub(crate) fn bar_fill_x(center_x: f32, width: f32, fraction: f32) -> f32 {
    center_x - width * 0.5 + width * 0.5 * fraction
}

fn spawn_aim_visuals(mut commands: Commands) {
    commands.spawn((
        ShapeBuilder::with(&shapes::Line(Vec2::ZERO, Vec2::X))
            .stroke((color_from_hex(Colors::AIM).with_alpha(0.9), AIM_LINE_WIDTH))
            .build(),
        Transform::from_xyz(0.0, 0.0, Z_AIM),
        Visibility::Hidden,
        AimLine,
    ));

    let bar = shapes::Rectangle {
        extents: Vec2::new(AIM_BAR_WIDTH, AIM_BAR_HEIGHT),
        origin: shapes::RectangleOrigin::Center,
        radii: None,
    };
    commands.spawn((
        ShapeBuilder::with(&bar)
            .fill(color_from_hex(Colors::POWER_BG).with_alpha(0.8))
            .build(),
        Transform::from_xyz(0.0, 0.0, Z_AIM),
        Visibility::Hidden,
        PowerBarBackground,
    ));
    commands.spawn((
        ShapeBuilder::with(&bar)
            .fill(color_from_hex(Colors::POWER_FILL))
            .build(),
        Transform::from_xyz(0.0, 0.0, Z_AIM + 0.1).with_scale(Vec3::new(0.0, 1.0, 1.0)),
        Visibility::Hidden,
        PowerBarFill,
    ));
}

type AimLineQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut Visibility),
    (With<AimLine>, Without<PowerBarBackground>, Without<PowerBarFill>),
>;
type BarBackgroundQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut Visibility),
    (With<PowerBarBackground>, Without<AimLine>, Without<PowerBarFill>),
>;
type BarFillQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut Visibility),
    (With<PowerBarFill>, Without<AimLine>, Without<PowerBarBackground>),
>;

fn update_aim_visuals(
    round: Res<Round>,
    mut q_line: AimLineQuery,
    mut q_bg: BarBackgroundQuery,
    mut q_fill: BarFillQuery,
) {
    let aim = round.controller.aim_indicator();

    if let Ok((mut tf, mut visibility)) = q_line.single_mut() {
        match aim {
            Some(aim) => {
                let a = sim_to_world(aim.from, Z_AIM).truncate();
                let b = sim_to_world(aim.to, Z_AIM).truncate();
                *tf = segment_transform(a, b, Z_AIM);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    let bar = aim.and_then(|aim| aim.power_fraction.map(|f| (aim.from, f as f32)));
    let base = bar.map(|(from, _)| {
        let mut p = from;
        p.y += AIM_BAR_OFFSET as f64;
        sim_to_world(p, Z_AIM)
    });

    if let Ok((mut tf, mut visibility)) = q_bg.single_mut() {
        match base {
            Some(base) => {
                tf.translation = base;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok((mut tf, mut visibility)) = q_fill.single_mut() {
        match (base, bar) {
            (Some(base), Some((_, fraction))) => {
                let fraction = fraction.clamp(0.0, 1.0);
                tf.translation = Vec3::new(
                    bar_fill_x(base.x, AIM_BAR_WIDTH, fraction),
                    base.y,
                    Z_AIM + 0.1,
                );
                tf.scale.x = fraction;
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_transform_spans_both_ends() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(10.0, 120.0);
        let tf = segment_transform(a, b, 5.0);
        let end = tf.transform_point(Vec3::X);
        assert!((end.x - b.x).abs() < 1e-4);
        assert!((end.y - b.y).abs() < 1e-4);
        assert_eq!(tf.translation.z, 5.0);
    }

    #[test]
    fn empty_bar_sits_on_left_edge() {
        assert_eq!(bar_fill_x(100.0, 200.0, 0.0), 0.0);
        assert_eq!(bar_fill_x(100.0, 200.0, 1.0), 100.0);
        assert_eq!(bar_fill_x(100.0, 200.0, 0.5), 50.0);
    }
}
