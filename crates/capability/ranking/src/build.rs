//! 由用户聚合数据构建三个用户排行榜。
//!
//! 排序稳定：并列时保持聚合数据原有顺序。

use domain::{UserAggregate, UserCallRanking, UserIpCountRanking, UserTokenRanking};

fn truncate<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        items.truncate(limit);
    }
}

/// 按调用次数降序。
pub fn build_user_call_ranking(data: &[UserAggregate], limit: usize) -> Vec<UserCallRanking> {
    let mut sorted: Vec<&UserAggregate> = data.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    truncate(&mut sorted, limit);
    sorted
        .into_iter()
        .map(|row| UserCallRanking {
            username: row.username.clone(),
            display_name: row.display_name.clone(),
            ip: row.ip.clone(),
            ip_count: row.ip_count,
            count: row.count,
        })
        .collect()
}

/// 按 token 消耗降序。
pub fn build_user_token_ranking(data: &[UserAggregate], limit: usize) -> Vec<UserTokenRanking> {
    let mut sorted: Vec<&UserAggregate> = data.iter().collect();
    sorted.sort_by(|a, b| b.tokens.cmp(&a.tokens));
    truncate(&mut sorted, limit);
    sorted
        .into_iter()
        .map(|row| UserTokenRanking {
            username: row.username.clone(),
            display_name: row.display_name.clone(),
            tokens: row.tokens,
            count: row.count,
            quota: row.quota,
        })
        .collect()
}

/// 按有效 IP 数降序；空 IP 不计数，没有有效 IP 的用户不上榜。
pub fn build_user_ip_count_ranking(
    data: &[UserAggregate],
    limit: usize,
) -> Vec<UserIpCountRanking> {
    let mut filtered: Vec<UserIpCountRanking> = data
        .iter()
        .filter_map(|row| {
            let ips: Vec<&str> = row
                .ip
                .split(',')
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .collect();
            if ips.is_empty() {
                return None;
            }
            Some(UserIpCountRanking {
                username: row.username.clone(),
                display_name: row.display_name.clone(),
                ip: ips.join(","),
                ip_count: ips.len() as i64,
                count: row.count,
                tokens: row.tokens,
                quota: row.quota,
            })
        })
        .collect();
    filtered.sort_by(|a, b| b.ip_count.cmp(&a.ip_count));
    truncate(&mut filtered, limit);
    filtered
}
