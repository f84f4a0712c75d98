pub mod controls;
pub mod keyboard;
pub mod pointer;

pub use controls::{run_command, wire_control_buttons, wire_item_list, Actions};
pub use keyboard::wire_global_keydown;
pub use pointer::{wire_input_handlers, InputWiring};
