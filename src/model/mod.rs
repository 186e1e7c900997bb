pub mod candidate;
pub mod policy;
pub mod quote;

pub use candidate::{CollarCandidate, NetGreeks, Payoff, RankedCandidate, ScenarioResult};
pub use policy::{Bounds, FilterRules, Metric, RankBy, RankScope, ScanPolicy};
pub use quote::{ChainSnapshot, OptionQuote, OptionType, UnderlyingSnapshot};
