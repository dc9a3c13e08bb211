pub mod calculator;
pub mod engine;

pub use crate::domain::ports::{ConfigProvider, Storage};
