//! Auth-domain models: bearer tokens, verified identities, and rejection verdicts.

pub mod identity;
pub mod outcome;
pub mod rejection;
pub mod token;

pub use identity::*;
pub use outcome::*;
pub use rejection::*;
pub use token::*;
