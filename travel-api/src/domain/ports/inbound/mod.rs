mod analytics;
mod records;

pub use analytics::*;
pub use records::*;
