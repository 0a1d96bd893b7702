mod analytics;
mod business_trip;
mod employee;
mod expense;
mod expense_type;
mod ids;
mod report;

pub use analytics::*;
pub use business_trip::*;
pub use employee::*;
pub use expense::*;
pub use expense_type::*;
pub use ids::*;
pub use report::*;
