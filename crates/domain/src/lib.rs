#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod config;
mod equipment;
mod error;
mod exercise;
mod leveling;
mod name;
mod potential;
mod service;
mod stat;
mod training;
mod weights;
mod xp;

pub use config::*;
pub use equipment::*;
pub use error::*;
pub use exercise::*;
pub use leveling::*;
pub use name::*;
pub use potential::*;
pub use service::*;
pub use stat::*;
pub use training::*;
pub use weights::*;
pub use xp::*;
