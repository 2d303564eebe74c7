pub mod consensus;
pub mod grouping;
pub mod models;
pub mod ranking;
pub mod record;
pub mod rounding;
pub mod scoring;

pub use consensus::{game_consensus, resolve_ats, resolve_total, AtsConsensus, CategoryConsensus, TotalConsensus};
pub use grouping::{attach_lines, group_rows, group_rows_with_report, Grouped, GroupingReport};
pub use models::{Category, CategoryTrend, GameLine, GameTrends, TeamSide, TrendRow};
pub use ranking::{rank, rank_scored, SortMode};
pub use record::{parse_record, SituationalRecord};
pub use scoring::{ats_dominance_score, ou_consensus_score, ScoredGame};
