//! Backend boundary: credentialed HTTP calls and their wire types.

pub mod api;
pub mod types;
