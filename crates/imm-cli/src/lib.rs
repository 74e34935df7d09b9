//! Library side of the `immunize` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod render;
pub mod types;
