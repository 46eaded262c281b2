//! Terminal UI: form panel, list panel, and the interaction cycle.

mod app;
mod form;
mod layout;
mod widgets;

pub use app::App;
