//! The menu screen: pick an input device, listen to the tune, start the game.

pub mod capture;
pub mod glyphs;
pub mod music;
pub mod scanner;
pub mod tune;

use tracing::{debug, info};

use crate::core::bus::{Device, Interrupted, SleepKind};
use crate::core::render::{Attribute, Region, Renderer};

pub use capture::{Action, KeyBinding, KeyDefs, choose_keys};
pub use scanner::{MenuKey, menu_keyscan};
pub use tune::{DEFAULT_TEMPO, Sequencer, ToneChannel, Tune};

/// Pause after each frame of menu music.
pub const FRAME_MICROS: u32 = 87_500;

/// Input devices offered on the menu, in menu order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputDevice {
    #[default]
    Keyboard,
    Kempston,
    Sinclair,
    Protek,
}

impl InputDevice {
    pub const ALL: [InputDevice; 4] = [
        InputDevice::Keyboard,
        InputDevice::Kempston,
        InputDevice::Sinclair,
        InputDevice::Protek,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            InputDevice::Keyboard => "keyboard",
            InputDevice::Kempston => "kempston",
            InputDevice::Sinclair => "sinclair",
            InputDevice::Protek => "protek",
        }
    }

    fn region(self) -> Region {
        Region::MenuItem(self.index() as u8)
    }
}

/// Result of one pass of [`MenuContext::check_menu_keys`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// Nothing relevant pressed.
    NoKey,
    /// A device was (re)selected.
    Selected(InputDevice),
    /// Zero pressed; keys were chosen first if the keyboard is selected.
    Start,
}

/// What the menu hands to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuOutcome {
    pub device: InputDevice,
    pub keydefs: KeyDefs,
}

/// State owned by the menu screen across invocations: the selected device,
/// the key layout and where the music has got to.
#[derive(Clone, Debug)]
pub struct MenuContext {
    chosen_input_device: InputDevice,
    keydefs: KeyDefs,
    sequencer: Sequencer,
    tempo: u8,
}

impl MenuContext {
    pub fn new() -> Self {
        Self::with_tempo(DEFAULT_TEMPO)
    }

    /// `tempo` is the number of 255-pass steps per note; lower is faster.
    pub fn with_tempo(tempo: u8) -> Self {
        assert!(tempo > 0, "tempo must be at least 1");
        Self {
            chosen_input_device: InputDevice::default(),
            keydefs: KeyDefs::default(),
            sequencer: Sequencer::default(),
            tempo,
        }
    }

    /// Replace the tunes, restarting both voices.
    pub fn with_tunes(mut self, tunes: [Tune; 2]) -> Self {
        self.sequencer = Sequencer::new(tunes);
        self
    }

    pub fn chosen_input_device(&self) -> InputDevice {
        self.chosen_input_device
    }

    pub fn keydefs(&self) -> &KeyDefs {
        &self.keydefs
    }

    /// Seed the layout, e.g. from a previous run. Choosing keys replaces it.
    pub fn set_keydefs(&mut self, keydefs: KeyDefs) {
        self.keydefs = keydefs;
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Draw the menu lines and highlight the current device.
    pub fn draw_menu<H>(&self, host: &mut H)
    where
        H: Renderer + ?Sized,
    {
        for label in &glyphs::MENU_LABELS {
            glyphs::plot_screen_string(host, label);
        }
        for device in InputDevice::ALL {
            host.set_attributes(device.region(), Attribute::WHITE_OVER_BLACK);
        }
        host.set_attributes(
            self.chosen_input_device.region(),
            Attribute::BRIGHT_YELLOW_OVER_BLACK,
        );
    }

    /// Handle one keyboard scan of the menu.
    pub fn check_menu_keys<H>(&mut self, host: &mut H) -> Result<MenuEvent, Interrupted>
    where
        H: Device + Renderer + ?Sized,
    {
        match menu_keyscan(host) {
            None => Ok(MenuEvent::NoKey),
            Some(MenuKey::Select(device)) => {
                host.set_attributes(
                    self.chosen_input_device.region(),
                    Attribute::WHITE_OVER_BLACK,
                );
                self.chosen_input_device = device;
                host.set_attributes(device.region(), Attribute::BRIGHT_YELLOW_OVER_BLACK);
                debug!(device = device.name(), "input device selected");
                Ok(MenuEvent::Selected(device))
            }
            Some(MenuKey::Start) => {
                if self.chosen_input_device == InputDevice::Keyboard {
                    self.keydefs = choose_keys(host)?;
                }
                Ok(MenuEvent::Start)
            }
        }
    }

    /// Run the menu until the game is started.
    ///
    /// Between keyboard scans one note of the tune is played, the screen is
    /// presented and the host gets a frame's pause.
    pub fn menu_screen<H>(&mut self, host: &mut H) -> Result<MenuOutcome, Interrupted>
    where
        H: Device + Renderer + ?Sized,
    {
        self.draw_menu(host);
        host.kick();

        loop {
            if self.check_menu_keys(host)? == MenuEvent::Start {
                info!(device = self.chosen_input_device.name(), "starting game");
                return Ok(MenuOutcome {
                    device: self.chosen_input_device,
                    keydefs: self.keydefs,
                });
            }

            self.sequencer.play_frame(host, self.tempo);
            host.kick();
            host.sleep(SleepKind::Frame, FRAME_MICROS)?;
        }
    }
}

impl Default for MenuContext {
    fn default() -> Self {
        Self::new()
    }
}
