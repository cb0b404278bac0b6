mod path_filter;
mod result_merger;
mod tree_filter;

pub use path_filter::PathFilter;
pub use result_merger::ResultMerger;
pub use tree_filter::{FilterState, TreeFilter};
