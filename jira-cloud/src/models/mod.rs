pub mod comment;
pub mod create_meta;
pub mod issue;
pub mod project;
pub mod search;

pub use comment::*;
pub use create_meta::*;
pub use issue::*;
pub use project::*;
pub use search::*;
