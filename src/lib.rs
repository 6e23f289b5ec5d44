pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod open;
pub mod progress;
pub mod search;
pub mod walker;

pub use crate::error::{DocseekError, Result};
pub use crate::matcher::SearchQuery;
pub use crate::progress::{ChannelReporter, ProgressReporter, SearchEvent};
pub use crate::search::{
    CancelToken, ContentMatch, ResultCache, SearchController, SearchResult, SessionState,
};
pub use crate::walker::walk_dir;
