pub mod bus;
pub mod machine;
pub mod render;

pub use bus::{
    Device, Interrupted, PORT_BORDER, PORT_KEYBOARD_09876, PORT_KEYBOARD_12345, PORT_KEYBOARD_POIUY,
    PORT_KEYBOARD_SPACESYMSHFTMNB, SleepKind,
};
pub use machine::Platform;
pub use render::{Attribute, Region, Renderer};
