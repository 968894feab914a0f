mod broadcast;
mod censor;
mod commands;
mod countdown;
mod filters;
mod misc;
mod restrict;
mod start;
mod warning;

pub use broadcast::*;
pub use censor::*;
pub use commands::Command;
pub use countdown::*;
pub use filters::*;
pub use misc::*;
pub use restrict::*;
pub use start::*;
pub use warning::*;
