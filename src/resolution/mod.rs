/// Interaction resolution.
///
/// Turns two drug names into a verdict: classification through the catalog,
/// severity from the category risk table, mechanism from the detail table,
/// then recommendation text.
pub mod detail;
pub mod risk;
pub mod synthesis;
mod resolver;

pub use detail::CategoryDetailTable;
pub use resolver::InteractionResolver;
pub use risk::{CategoryRiskTable, ConfidenceLevels};
