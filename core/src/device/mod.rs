pub mod beeper;
pub mod font;
pub mod keyboard;
pub mod screen;

pub use beeper::Beeper;
pub use keyboard::{ZxKeyboard, ZxKeys};
pub use screen::ZxScreen;
