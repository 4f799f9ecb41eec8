pub mod category;
pub mod table;

pub use category::Category;
pub use table::{AveragePolicy, Ingested, InstanceAggregate, ResultTable, Samples};
