pub mod options;
pub mod ranking;
pub mod ratio;

pub use ranking::{
    IpCallRanking, RankingData, UserAggregate, UserCallRanking, UserIpCountRanking,
    UserMinuteIpRanking, UserTokenRanking,
};
pub use ratio::{
    DEFAULT_TIMEZONE, DynamicRatioConfig, GroupRatioRanges, RatioMode, RpmRange, TIMEZONE_OPTIONS,
    TimeRange,
};

/// 请求方视角：决定排行榜数据是否需要脱敏。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    /// 持有管理令牌的请求方，可见原始 IP。
    Admin,
    /// 普通访问者（默认）。
    #[default]
    Public,
}

impl Viewer {
    pub fn is_admin(self) -> bool {
        matches!(self, Viewer::Admin)
    }
}
