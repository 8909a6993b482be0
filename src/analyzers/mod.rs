pub mod coldest_days;
pub mod date_snapshot;
pub mod yearly_minimum;

pub use coldest_days::ColdestDaysSelector;
pub use date_snapshot::DateSnapshotQuery;
pub use yearly_minimum::YearlyMinimumAggregator;
