//! Search Module
//!
//! Proxies free-text clothing queries to the Google Custom Search JSON API
//! (image search type) and filters the results down to actual garments:
//! - `google_cse` - upstream client, query augmentation, wire types
//! - `filter` - keyword exclusion filter and response mapping

pub mod filter;
pub mod google_cse;

pub use filter::{filter_and_map, FilterOptions, ResultItem};
pub use google_cse::{build_query, CseClient, CseResults, RawResultItem, SearchError};
