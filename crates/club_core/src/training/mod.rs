// Player condition and training

pub mod condition;
pub mod session;

pub use condition::*;
pub use session::*;
