pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::ArticleIndex;
pub use types::{Article, ExistsResult, RelatedResult};
