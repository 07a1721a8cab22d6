//! Database initialization and queries

pub mod init;
pub mod outputs;
pub mod prompts;
pub mod seed;

pub use init::*;
pub use outputs::*;
pub use prompts::*;
pub use seed::*;
