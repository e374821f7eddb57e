//! 非管理员视角的 IP 脱敏。

use domain::RankingData;

/// IPv4 `a.b.c.d` -> `a.***.***.d`；其他格式保留首尾各 4 个字符。
pub fn mask_ip(ip: &str) -> String {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() == 4 {
        return format!("{}.***.***.{}", parts[0], parts[3]);
    }
    let chars: Vec<char> = ip.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        return format!("{head}****{tail}");
    }
    "****".to_string()
}

/// 逗号分隔的 IP 列表逐个脱敏。
pub fn mask_ips(ips: &str) -> String {
    ips.split(',')
        .map(|ip| mask_ip(ip.trim()))
        .collect::<Vec<_>>()
        .join(",")
}

/// 返回脱敏后的副本；Token 排行不含 IP。
pub fn mask_ranking(data: &RankingData) -> RankingData {
    let mut masked = data.clone();
    for row in &mut masked.user_call_ranking {
        row.ip = mask_ips(&row.ip);
    }
    for row in &mut masked.ip_call_ranking {
        row.ip = mask_ip(&row.ip);
    }
    for row in &mut masked.user_ip_count_ranking {
        row.ip = mask_ips(&row.ip);
    }
    for row in &mut masked.user_minute_ip_ranking {
        row.ip = mask_ips(&row.ip);
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_keeps_first_and_last_octet() {
        assert_eq!(mask_ip("192.168.1.100"), "192.***.***.100");
    }

    #[test]
    fn long_values_keep_head_and_tail() {
        assert_eq!(mask_ip("2001:db8::8a2e:370:7334"), "2001****7334");
    }

    #[test]
    fn short_values_are_hidden() {
        assert_eq!(mask_ip("::1"), "****");
        assert_eq!(mask_ip(""), "****");
    }

    #[test]
    fn lists_are_masked_per_element() {
        assert_eq!(
            mask_ips("10.0.0.1, 10.0.0.2"),
            "10.***.***.1,10.***.***.2"
        );
    }
}
