pub mod follow_relation;
pub mod post;
pub mod post_like;
pub mod user;
