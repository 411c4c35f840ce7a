//! Translate incoming grid requests into SQL statements, and map the
//! executed results back into the response envelope the grid expects.

pub mod query;
pub mod request;
pub mod response;
