pub const CANVAS_WIDTH: f32 = 900.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const Z_PITCH: f32 = 0.0;
pub const Z_GOAL: f32 = 1.0;
pub const Z_KEEPER: f32 = 3.0;
pub const Z_BALL: f32 = 4.0;
pub const Z_AIM: f32 = 5.0;

pub const AIM_BAR_WIDTH: f32 = 200.0;
pub const AIM_BAR_HEIGHT: f32 = 12.0;
/// Gap between the ball and the power bar below it
pub const AIM_BAR_OFFSET: f32 = 40.0;
pub const AIM_LINE_WIDTH: f32 = 2.0;

pub const POST_WIDTH: f32 = 6.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const PITCH_BG: u32 = 0x1f6f3a;
    pub const PITCH_LINE: u32 = 0xe8f5e9;
    pub const GOAL_FRAME: u32 = 0xffffff;
    pub const GOAL_NET: u32 = 0xcfd8dc;
    pub const BALL: u32 = 0xffffff;
    pub const BALL_OUTLINE: u32 = 0x222222;
    pub const KEEPER: u32 = 0xffb300;
    pub const AIM: u32 = 0xffeb3b;
    pub const POWER_BG: u32 = 0x333333;
    pub const POWER_FILL: u32 = 0xff5722;
    pub const HUD_TEXT: u32 = 0xffffff;
    pub const HUD_DIM: u32 = 0xb0bec5;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn power_bar_fits_on_canvas() {
        assert!(AIM_BAR_WIDTH < CANVAS_WIDTH);
        assert!(AIM_BAR_OFFSET + AIM_BAR_HEIGHT < CANVAS_HEIGHT);
    }
}
