pub mod api;
mod auth;

pub use api::{RedditApiClient, RedditCredentials, RedditListing, RedditPostData};
