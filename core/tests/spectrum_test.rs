mod common;

use common::{KeyScript, ScriptedPlatform};
use stalag_core::core::{Attribute, Device, Interrupted, PORT_BORDER, SleepKind};
use stalag_core::device::ZxKeys;
use stalag_core::device::font::glyph_for;
use stalag_core::machine::Spectrum;
use stalag_core::menu::{Action, InputDevice, KeyBinding, MenuContext};

fn spectrum(script: KeyScript) -> Spectrum<ScriptedPlatform> {
    Spectrum::new(ScriptedPlatform::new(script), 50)
}

// =================================================================
// Port decoding
// =================================================================

#[test]
fn test_even_port_reads_keyboard() {
    let mut zx = spectrum(KeyScript::new());
    zx.keyboard_mut().press(ZxKeys::Q);

    assert_eq!(zx.port_in(0xFBFE), 0xFE);
    assert_eq!(zx.port_in(0xFDFE), 0xFF);
    // Any even port selects the ULA.
    assert_eq!(zx.port_in(0xFB00), 0xFE);
}

#[test]
fn test_odd_port_floats_high() {
    let mut zx = spectrum(KeyScript::new());
    zx.keyboard_mut().press(ZxKeys::Q);
    assert_eq!(zx.port_in(0xFBFF), 0xFF);
}

#[test]
fn test_out_sets_border_and_speaker() {
    let mut zx = spectrum(KeyScript::new());
    zx.port_out(PORT_BORDER, 0x15);
    assert_eq!(zx.border(), 5);

    zx.port_out(0x00FF, 0x02);
    assert_eq!(zx.border(), 5);
}

// =================================================================
// Host hooks
// =================================================================

#[test]
fn test_kick_presents_full_frame() {
    let mut zx = spectrum(KeyScript::new());
    assert_eq!(zx.display_size(), (320, 256));

    zx.kick();

    assert_eq!(zx.platform().frames, 1);
    assert_eq!(zx.platform().last_frame_size, (320, 256));
}

#[test]
fn test_sleep_forwards_audio_then_polls() {
    let mut zx = spectrum(KeyScript::new().hold(ZxKeys::SPACE, 1));
    zx.port_out(PORT_BORDER, 0x10);
    for _ in 0..583 {
        zx.sub_tick();
    }

    zx.sleep(SleepKind::Poll, 10_000).unwrap();

    let platform = zx.platform();
    assert!((440..=441).contains(&platform.audio.len()));
    assert!(platform.audio.iter().all(|&s| s == i16::MAX / 2));
    assert_eq!(platform.delays, vec![(SleepKind::Poll, 10_000)]);
    assert_eq!(zx.keyboard().pressed(), ZxKeys::SPACE);
}

#[test]
fn test_quiet_sleep_queues_nothing() {
    let mut zx = spectrum(KeyScript::new().idle(1));
    zx.sleep(SleepKind::Frame, 87_500).unwrap();
    assert!(zx.platform().audio.is_empty());
}

#[test]
fn test_platform_cancellation_reaches_caller() {
    let mut zx = spectrum(KeyScript::new());
    assert_eq!(zx.sleep(SleepKind::Settle, 0xFFFF), Err(Interrupted));
    assert_eq!(zx.platform().delays.len(), 1);
}

// =================================================================
// Menu on a whole machine
// =================================================================

#[test]
fn test_menu_on_spectrum_selects_joystick() {
    let script = KeyScript::new().hold(ZxKeys::N2, 1).hold(ZxKeys::N0, 1);
    let mut zx = spectrum(script);
    let mut menu = MenuContext::with_tempo(1);

    let outcome = menu.menu_screen(&mut zx).unwrap();

    assert_eq!(outcome.device, InputDevice::Kempston);
    assert_eq!(zx.screen().attribute(8, 13), Attribute::WHITE_OVER_BLACK);
    assert_eq!(zx.screen().attribute(10, 13), Attribute::BRIGHT_YELLOW_OVER_BLACK);
    assert_eq!(zx.screen().attribute(10, 22), Attribute::BRIGHT_YELLOW_OVER_BLACK);
    assert_eq!(zx.screen().attribute(10, 23), Attribute::WHITE_OVER_BLACK);
    assert_eq!(&zx.screen().cell(8, 13), glyph_for(b'1'));
    assert_eq!(&zx.screen().cell(16, 13), glyph_for(b'0'));

    let platform = zx.into_platform();
    assert_eq!(platform.frames, 3);
    assert!(!platform.audio.is_empty());
}

#[test]
fn test_key_chooser_on_spectrum() {
    let script = KeyScript::new()
        .hold(ZxKeys::N0, 1)
        .tap(ZxKeys::O)
        .tap(ZxKeys::P)
        .tap(ZxKeys::Q)
        .tap(ZxKeys::A)
        .tap(ZxKeys::SPACE)
        .hold(ZxKeys::Y, 1);
    let mut zx = spectrum(script);
    let mut menu = MenuContext::with_tempo(1);

    let outcome = menu.menu_screen(&mut zx).unwrap();

    assert_eq!(outcome.device, InputDevice::Keyboard);
    assert_eq!(outcome.keydefs.get(Action::Left), KeyBinding { port: 0xDF, mask: 0x02 });
    assert_eq!(outcome.keydefs.get(Action::Fire), KeyBinding { port: 0x7F, mask: 0x01 });
    // Key names sit after the prompts; SPACE is spelt out.
    assert_eq!(&zx.screen().cell(6, 21), glyph_for(b'O'));
    assert_eq!(&zx.screen().cell(14, 21), glyph_for(b'S'));
    assert_eq!(&zx.screen().cell(14, 25), glyph_for(b'E'));
    assert_eq!(zx.screen().attribute(2, 7), Attribute::WHITE_OVER_BLACK);
}
