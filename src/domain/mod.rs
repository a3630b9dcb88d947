pub mod article;
pub mod post;
pub mod query;
pub mod tag;

pub use article::ArticleRef;
pub use post::{FeedPage, Pagination, Post, Tag};
pub use query::{FeedQuery, DEFAULT_LIMIT};
pub use tag::{FeedTag, ALL_TAGS_LABEL};
