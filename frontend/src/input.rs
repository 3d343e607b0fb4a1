use sdl2::keyboard::Scancode;
use stalag_core::device::ZxKeys;

/// Spectrum key for a host scancode.
///
/// Letters, digits, Enter and Space map to themselves. Either Ctrl is CAPS
/// SHIFT and either Shift is SYMBOL SHIFT. Backspace types CAPS SHIFT + 0 as
/// on the later Spectrum keyboards.
pub fn zx_keys_for(scancode: Scancode) -> Option<ZxKeys> {
    let keys = match scancode {
        Scancode::LCtrl | Scancode::RCtrl => ZxKeys::CAPS_SHIFT,
        Scancode::LShift | Scancode::RShift => ZxKeys::SYMBOL_SHIFT,
        Scancode::Return | Scancode::KpEnter => ZxKeys::ENTER,
        Scancode::Space => ZxKeys::SPACE,
        Scancode::Backspace => ZxKeys::CAPS_SHIFT | ZxKeys::N0,
        other => ZxKeys::from_char(host_char(other)?)?,
    };
    Some(keys)
}

/// The character printed on a host letter or digit key.
fn host_char(scancode: Scancode) -> Option<char> {
    let ch = match scancode {
        Scancode::A => 'A',
        Scancode::B => 'B',
        Scancode::C => 'C',
        Scancode::D => 'D',
        Scancode::E => 'E',
        Scancode::F => 'F',
        Scancode::G => 'G',
        Scancode::H => 'H',
        Scancode::I => 'I',
        Scancode::J => 'J',
        Scancode::K => 'K',
        Scancode::L => 'L',
        Scancode::M => 'M',
        Scancode::N => 'N',
        Scancode::O => 'O',
        Scancode::P => 'P',
        Scancode::Q => 'Q',
        Scancode::R => 'R',
        Scancode::S => 'S',
        Scancode::T => 'T',
        Scancode::U => 'U',
        Scancode::V => 'V',
        Scancode::W => 'W',
        Scancode::X => 'X',
        Scancode::Y => 'Y',
        Scancode::Z => 'Z',
        Scancode::Num0 | Scancode::Kp0 => '0',
        Scancode::Num1 | Scancode::Kp1 => '1',
        Scancode::Num2 | Scancode::Kp2 => '2',
        Scancode::Num3 | Scancode::Kp3 => '3',
        Scancode::Num4 | Scancode::Kp4 => '4',
        Scancode::Num5 | Scancode::Kp5 => '5',
        Scancode::Num6 | Scancode::Kp6 => '6',
        Scancode::Num7 | Scancode::Kp7 => '7',
        Scancode::Num8 | Scancode::Kp8 => '8',
        Scancode::Num9 | Scancode::Kp9 => '9',
        _ => return None,
    };
    Some(ch)
}
