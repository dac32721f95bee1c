// Job feed: seed data, the filter pipeline, the versioned stores and the session that ties
// them to the match annotator.

pub mod filter;
pub mod handlers;
pub mod seed;
pub mod session;
pub mod store;
pub mod view;
