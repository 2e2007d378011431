//! Reads egui's input state into [`reference::KeyboardAxes`] — the only
//! layer permitted to touch a real input device (§4.2, §9 "global
//! singleton" redesign flag).

use egui::Key;
use reference::KeyboardAxes;

pub fn poll(ctx: &egui::Context) -> KeyboardAxes {
    ctx.input(|input| KeyboardAxes {
        forward: input.key_down(Key::W),
        backward: input.key_down(Key::S),
        left: input.key_down(Key::A),
        right: input.key_down(Key::D),
        up: input.key_down(Key::Space),
        down: input.key_down(Key::C) || input.modifiers.shift,
        yaw_left: input.key_down(Key::Q),
        yaw_right: input.key_down(Key::E),
    })
}
