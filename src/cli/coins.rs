mod available;
mod split;

pub use available::*;
pub use split::*;
