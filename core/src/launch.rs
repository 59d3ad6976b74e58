use crate::charge::Release;
use crate::round::RoundTally;
use crate::substrate::{BodyId, Substrate};
use crate::vec2::Vec2;

/// Launch velocity for a shot aimed with the pointer at `aim`.
///
/// The ball flies away from the pointer: pull the pointer below the ball to
/// shoot up toward the goal.
pub fn launch_velocity(power: f64, aim: Vec2, ball: Vec2) -> Vec2 {
    let angle = ball.angle_to(aim);
    Vec2::new(-angle.cos() * power, -angle.sin() * power)
}

/// Hand the release to the ball body and count the shot. Without a pointer
/// position the shot goes straight up the pitch.
pub fn launch<S: Substrate>(
    substrate: &mut S,
    ball: BodyId,
    release: Release,
    tally: &mut RoundTally,
) -> Vec2 {
    let ball_pos = substrate.position(ball);
    let aim = release
        .aim_target
        .unwrap_or(ball_pos + Vec2::new(0.0, 1.0));
    let velocity = launch_velocity(release.power, aim, ball_pos);
    substrate.set_velocity(ball, velocity);
    tally.shots_taken += 1;
    velocity
}
