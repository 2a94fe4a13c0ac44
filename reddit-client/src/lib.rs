pub mod api;
pub mod simulator;
pub mod source;

pub use api::{check_status, RedditApiClient, RedditListing, RedditPostData};
pub use simulator::SimulatedSource;
pub use source::PostSource;
