pub mod report;

pub use report::{Reporter, format_expiry};
