pub mod coerce;
pub mod generative;
pub mod ranking;
pub mod resolver;

pub use generative::{GenerativeClient, GenerativeError};
pub use ranking::rank;
pub use resolver::{choose_strategy, FallbackReason, QueryResolver, SearchResults, Strategy};
