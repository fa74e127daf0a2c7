//! Data models for Epic Viewer

pub mod author;
pub mod line;
pub mod reference;
pub mod user;
pub mod work;

// Re-export commonly used types
pub use author::{Author, AuthorDetail};
pub use line::{Line, LineRecord};
pub use reference::{Language, ScansionPattern};
pub use user::{User, UserClaims};
pub use work::{Work, WorkDetail};
