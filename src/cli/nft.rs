mod add_pair;
mod change_owner;
mod freeze;
mod get_data;
mod mint;
mod remove_pair;

pub use add_pair::*;
pub use change_owner::*;
pub use freeze::*;
pub use get_data::*;
pub use mint::*;
pub use remove_pair::*;
