//! Library side of the `thematic` command line tool.

pub mod cli;
pub mod commands;
pub mod logging;
