pub mod cli;
pub mod io;
pub mod model;
pub mod notifier;
pub mod ops;
pub mod parse;
pub mod tui;
pub mod util;
