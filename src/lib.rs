pub mod cli;
pub mod config;
pub mod filter;
pub mod parser;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::{Config, Flavor};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
