//! HTTP request handlers for the trails API.
//!
//! Query endpoints answer `503` until the store is ready so that callers never
//! mistake a partial load for an empty result.

pub mod status;
pub mod trails;

pub use status::{__path_get_status, __path_health_check, get_status, health_check};
pub use trails::{
    __path_get_trail, __path_list_trails, __path_search_trails, get_trail, list_trails,
    search_trails,
};
