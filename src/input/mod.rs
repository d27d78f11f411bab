use macroquad::prelude::*;

use crate::rendering::Playback;

/// What the viewer loop should do after input handling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    Continue,
    Quit,
}

/// Process keyboard shortcuts for frame playback
pub fn process_keyboard_input(playback: &mut Playback) -> ViewerCommand {
    if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
        return ViewerCommand::Quit;
    }
    if is_key_pressed(KeyCode::Space) {
        playback.toggle_pause();
    }
    if is_key_pressed(KeyCode::Right) && playback.is_paused {
        playback.step_forward();
    }
    if is_key_pressed(KeyCode::R) {
        playback.restart();
    }
    if is_key_pressed(KeyCode::L) {
        playback.looping = !playback.looping;
    }
    ViewerCommand::Continue
}
