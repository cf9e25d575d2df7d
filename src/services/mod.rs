pub mod account;
pub mod follow;
pub mod post;
