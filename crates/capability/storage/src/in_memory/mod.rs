//! 内存存储实现模块
//!
//! 未配置数据库 / Redis 时使用，也用于测试。

pub mod option;
pub mod ranking;
pub mod request_rate;

pub use option::*;
pub use ranking::*;
pub use request_rate::*;
