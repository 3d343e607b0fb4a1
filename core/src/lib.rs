pub mod core;
pub mod device;
pub mod machine;
pub mod menu;

pub mod prelude {
    pub use crate::core::{Attribute, Device, Interrupted, Platform, Region, Renderer, SleepKind};
    pub use crate::device::{ZxKeyboard, ZxKeys};
    pub use crate::machine::Spectrum;
    pub use crate::menu::{InputDevice, KeyDefs, MenuContext, MenuOutcome};
}
