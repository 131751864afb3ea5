mod client;
mod de;
mod models;
mod wallet_client;

#[cfg(test)]
mod mock_server;

pub use client::*;
pub use de::*;
pub use models::*;
pub use wallet_client::*;

#[cfg(test)]
pub(crate) use mock_server::*;
