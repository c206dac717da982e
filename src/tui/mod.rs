//! Interactive terminal report viewer.
//!
//! Tabs: Overview, High, Medium, Info, Permissions. Navigation with
//! `j`/`k` or the arrow keys, `Tab`/`Shift-Tab` or `1`-`5` to switch tabs,
//! `q`/`Esc` to quit.

mod app;
mod events;
mod ui;

pub use app::{App, Tab};
pub use events::{handle_key_event, Event, EventHandler};
pub use ui::{render, run_tui};
