pub mod config;
pub mod data;
pub mod land;
pub mod logging;
pub mod ranking;
pub mod report;

pub use config::{AppConfig, ConfigLoader};
pub use data::{DataLoader, StaticTables};
pub use ranking::{Calculator, RankedCrop, Ranking, RankingInputs, Target};
