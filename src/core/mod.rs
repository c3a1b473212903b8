//! Fund performance aggregation engine

pub mod config;
pub mod format;
pub mod fund;
pub mod log;
pub mod portfolio;
pub mod ranking;
pub mod returns;
pub mod snapshot;
pub mod window;

// Re-export main types for cleaner imports
pub use fund::{FundDataProvider, FundRecord, PricePoint, PriceSeries};
pub use portfolio::{PortfolioSummary, aggregate_portfolio};
pub use ranking::{Leaderboard, RankMetric, rank_by_metric, top_losers};
pub use returns::{LookbackPeriod, compute_return};
pub use snapshot::{FundSnapshot, build_snapshots, load_snapshots};
pub use window::{PriceWindow, reduce_window};
