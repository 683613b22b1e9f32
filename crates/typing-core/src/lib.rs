pub mod aggregate;
pub mod checker;
pub mod error;
pub mod frequency;
pub mod io;
pub mod level;
pub mod paths;
pub mod recommend;
pub mod render;
pub mod report;
pub mod scaffold;

pub use error::{Result, TypingError};
