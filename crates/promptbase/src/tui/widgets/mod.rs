//! Widgets used by the prompt TUI.

mod input;
mod list;

pub use input::{Checkbox, TextArea, TextInput};
pub use list::prompt_list;
