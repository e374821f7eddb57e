//! 排行榜展示行。

/// 前三名的奖牌。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankRow<'a, T> {
    /// 从 1 开始。
    pub rank: usize,
    pub medal: Option<Medal>,
    pub record: &'a T,
}

/// 按输入顺序编号，不重新排序。
pub fn rank_rows<T>(records: &[T]) -> Vec<RankRow<'_, T>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| RankRow {
            rank: index + 1,
            medal: Medal::for_index(index),
            record,
        })
        .collect()
}

/// 优先显示昵称。
pub fn display_name<'a>(display_name: &'a str, username: &'a str) -> &'a str {
    if display_name.is_empty() {
        username
    } else {
        display_name
    }
}

/// IP 排行中的用户列：逗号列表去空后以 ", " 连接，全空时为 "-"。
pub fn ip_user_names(display_name_list: &str, username_list: &str) -> String {
    let names = display_name(display_name_list, username_list);
    let joined = names
        .split(',')
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
