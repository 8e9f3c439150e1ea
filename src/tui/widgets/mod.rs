pub mod hud;
pub mod map;
pub mod toasts;
pub mod toolbar;
