mod actors;
mod aim;
mod autoplay;
mod core;
mod hud;
mod input;
mod pitch;

pub use actors::ActorsPlugin;
pub use aim::AimPlugin;
pub use autoplay::AutoplayPlugin;
pub use self::core::CorePlugin;
pub(crate) use self::core::{ConfigReloaded, FixedSet, PointerQueue, Round, RoundMessage, UpdateSet};
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use pitch::PitchPlugin;
