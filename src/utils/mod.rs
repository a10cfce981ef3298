pub mod errors;

pub use errors::{DetectorError, Result};
