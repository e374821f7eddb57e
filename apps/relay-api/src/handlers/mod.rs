//! Handlers 模块

pub mod groups;
pub mod health;
pub mod metrics;
pub mod options;
pub mod ranking;
pub mod relay;
pub mod stats;

pub use groups::*;
pub use health::*;
pub use metrics::*;
pub use options::*;
pub use ranking::*;
pub use relay::*;
pub use stats::*;
