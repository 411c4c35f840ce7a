pub mod ast;
pub mod convert;
pub mod dialect;
pub mod helpers;
pub mod sanitize;
pub mod string;
