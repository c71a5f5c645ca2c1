mod app;
mod message;
mod render;
mod run;

pub use app::{visible_rows, TuiApp};
pub use message::TuiMessage;
pub use run::run_tui;
