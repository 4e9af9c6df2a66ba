pub mod explore;
pub mod presenter;
pub mod ranker;
pub mod render;

pub use crate::domain::model::{Destination, SearchRequest, SearchResponse};
pub use crate::domain::ports::DestinationSource;
pub use crate::utils::error::Result;
