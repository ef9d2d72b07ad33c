pub mod build;
pub mod countdown;
pub mod demos;
pub mod preview;
pub mod render;
