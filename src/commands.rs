// Edit commands shared by the control-panel buttons and the keyboard.

use crate::core::constants::{MOVE_STEP_XY, MOVE_STEP_Z, SCALE_STEP};
use crate::core::{Axis, ItemStore};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Nudge(Axis, f32),
    Scale(f32),
    Remove,
    Deselect,
    Clear,
    Cutout,
    Describe,
    ToggleFullscreen,
}

/// Control-panel button ids and the command each one issues.
pub const BUTTONS: &[(&str, Command)] = &[
    ("move-up", Command::Nudge(Axis::Y, MOVE_STEP_XY)),
    ("move-down", Command::Nudge(Axis::Y, -MOVE_STEP_XY)),
    ("move-left", Command::Nudge(Axis::X, -MOVE_STEP_XY)),
    ("move-right", Command::Nudge(Axis::X, MOVE_STEP_XY)),
    ("move-closer", Command::Nudge(Axis::Z, -MOVE_STEP_Z)),
    ("move-farther", Command::Nudge(Axis::Z, MOVE_STEP_Z)),
    ("scale-up", Command::Scale(SCALE_STEP)),
    ("scale-down", Command::Scale(-SCALE_STEP)),
    ("remove-item", Command::Remove),
    ("pin-item", Command::Deselect),
    ("cutout-item", Command::Cutout),
    ("describe-item", Command::Describe),
    ("clear-items", Command::Clear),
];

/// Whether a keydown aimed at an element with `tag_name` should drive the
/// scene. Focused buttons and text fields keep their own keys.
pub fn keys_reach_scene(tag_name: &str, input_type: Option<&str>) -> bool {
    match tag_name.to_ascii_uppercase().as_str() {
        "BUTTON" | "TEXTAREA" | "SELECT" => false,
        "INPUT" => input_type.is_some_and(|t| t.eq_ignore_ascii_case("file")),
        _ => true,
    }
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" => Some(Command::Nudge(Axis::Y, MOVE_STEP_XY)),
        "ArrowDown" => Some(Command::Nudge(Axis::Y, -MOVE_STEP_XY)),
        "ArrowLeft" => Some(Command::Nudge(Axis::X, -MOVE_STEP_XY)),
        "ArrowRight" => Some(Command::Nudge(Axis::X, MOVE_STEP_XY)),
        "[" => Some(Command::Nudge(Axis::Z, -MOVE_STEP_Z)),
        "]" => Some(Command::Nudge(Axis::Z, MOVE_STEP_Z)),
        "+" | "=" => Some(Command::Scale(SCALE_STEP)),
        "-" | "_" => Some(Command::Scale(-SCALE_STEP)),
        "Delete" | "Backspace" => Some(Command::Remove),
        "Escape" => Some(Command::Deselect),
        "Enter" => Some(Command::ToggleFullscreen),
        _ => None,
    }
}

/// Apply a command that only touches the store. Returns `None` for commands
/// that need the page (media, network, fullscreen), otherwise whether the
/// store changed.
pub fn apply_to_store(store: &mut ItemStore, command: Command) -> Option<bool> {
    let changed = match command {
        Command::Nudge(axis, delta) => store.nudge_selected(axis, delta),
        Command::Scale(delta) => store.scale_selected(delta),
        Command::Remove => match store.selected_id().map(str::to_owned) {
            Some(id) => store.remove(&id).is_some(),
            None => false,
        },
        Command::Deselect => {
            let had = store.selected_id().is_some();
            store.select(None);
            had
        }
        Command::Clear => {
            let had = !store.is_empty();
            store.clear();
            had
        }
        Command::Cutout | Command::Describe | Command::ToggleFullscreen => return None,
    };
    Some(changed)
}
