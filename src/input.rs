/// Key state → `InputFlags`.  No debouncing: flags follow the physical keys.

use crate::entities::InputFlags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    /// Anything the game does not use.
    Other,
}

pub fn key_down(flags: &mut InputFlags, key: Key) {
    set(flags, key, true);
}

pub fn key_up(flags: &mut InputFlags, key: Key) {
    set(flags, key, false);
}

fn set(flags: &mut InputFlags, key: Key, pressed: bool) {
    match key {
        Key::Left => flags.left = pressed,
        Key::Right => flags.right = pressed,
        Key::Fire => flags.fire = pressed,
        Key::Other => {}
    }
}
