#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod cleaner;
pub mod config;
pub mod error;
pub mod normalize;
pub mod ratings;
pub mod traits;
pub mod types;
