//! Wire representations returned by the JSON API.

pub mod categories;
pub mod products;
