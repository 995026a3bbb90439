//! Commands
//!
//! Entry points called by the view layer. Every command returns a
//! [`CommandResponse`](crate::models::CommandResponse); errors never escape
//! as `Err`.

pub mod analysis;
pub mod health;
pub mod init;
pub mod settings;

pub use analysis::*;
pub use health::*;
pub use init::*;
pub use settings::*;
