pub mod grid;
pub mod logging;
