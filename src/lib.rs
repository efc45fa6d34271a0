pub mod cli;
pub mod dump;
pub mod entry;
pub mod error;
pub mod mapper;
pub mod schema;
pub mod shell;
pub mod source;
pub mod writer;

pub use cli::{Cli, Commands};
pub use shell::{App, ShellCommand};
