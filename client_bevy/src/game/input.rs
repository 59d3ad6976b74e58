use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use penalty_core::round::PointerAction;

use crate::coord::{world_to_px, PxPos};

use super::autoplay::Autoplay;
use super::core::MainCamera;
use super::{PointerQueue, UpdateSet};

pub struct InputPlugin;

#[derive(Resource, Default)]
pub(crate) struct InputState {
    /// Last cursor position sent to the round, in canvas pixels.
    pub(crate) last_pointer: Option<PxPos>,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_systems(Update, pointer_input_system.in_set(UpdateSet::Input));
    }
}

fn pointer_input_system(
    mut input: ResMut<InputState>,
    mut queue: ResMut<PointerQueue>,
    autoplay: Res<Autoplay>,
    buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    if autoplay.enabled {
        return;
    }

    let cursor = q_window.single().ok().and_then(|w| w.cursor_position());
    if let (Some(cursor), Ok((camera, cam_tf))) = (cursor, q_camera.single()) {
        if let Ok(world) = camera.viewport_to_world_2d(cam_tf, cursor) {
            let px = world_to_px(world);
            if input.last_pointer != Some(px) {
                input.last_pointer = Some(px);
                queue.actions.push(PointerAction::Move(px.into()));
            }
        }
    }

    if buttons.just_pressed(MouseButton::Left) {
        queue.actions.push(PointerAction::Down);
    }
    if buttons.just_released(MouseButton::Left) {
        queue.actions.push(PointerAction::Up);
    }
}
