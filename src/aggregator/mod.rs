pub mod chart;
pub mod stats;

pub use chart::{format_data, ChartPoint, ChartSeries};
pub use stats::{DayCount, StatsAggregator};
