pub mod consts;
mod utils;
pub use utils::*;
