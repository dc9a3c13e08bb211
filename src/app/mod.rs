pub mod report;

pub use report::{OutputFormat, PlanReport};
