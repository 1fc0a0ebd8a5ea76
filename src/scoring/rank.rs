//! 竞赛排名
//!
//! 百分比降序，null 沉底；并列时按展示名（大小写不敏感）
//! 升序排列，但名次只在百分比完全相等时共享；下一个不同
//! 百分比的名次跳过并列数量（标准 "1224" 竞赛排名）。
//! 对同一输入集合的任意排列，输出的 {id -> rank} 映射相同。

use std::cmp::Ordering;

/// 排名输入条目
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub id: i64,
    pub percentage: Option<f64>,
    pub submitted_count: i64,
    /// 并列时的次级排序键（如展示名），大小写不敏感
    pub tie_break_key: String,
}

/// 排名输出条目（携带输入字段，便于直接组装响应）
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub id: i64,
    pub percentage: Option<f64>,
    pub submitted_count: i64,
    pub tie_break_key: String,
    pub rank: i64,
}

// 排序比较：百分比降序，null 最低；再按 tie_break_key、id 保证全序
fn compare(a: &RankEntry, b: &RankEntry) -> Ordering {
    let by_percentage = match (a.percentage, b.percentage) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_percentage
        .then_with(|| {
            a.tie_break_key
                .to_lowercase()
                .cmp(&b.tie_break_key.to_lowercase())
        })
        .then_with(|| a.id.cmp(&b.id))
}

// 名次共享判定：百分比完全相等（双 null 也算相等）才共享名次
fn percentage_equal(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        (None, None) => true,
        _ => false,
    }
}

/// 计算排名
pub fn rank(items: &[RankEntry]) -> Vec<RankedEntry> {
    let mut sorted: Vec<&RankEntry> = items.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));

    let mut ranked = Vec::with_capacity(sorted.len());
    let mut current_rank = 0i64;
    let mut previous: Option<Option<f64>> = None;

    for (index, entry) in sorted.into_iter().enumerate() {
        let tied = previous.is_some_and(|p| percentage_equal(p, entry.percentage));
        if !tied {
            // 不能用连续自增：并列之后的名次要跳过并列数量
            current_rank = index as i64 + 1;
        }
        previous = Some(entry.percentage);
        ranked.push(RankedEntry {
            id: entry.id,
            percentage: entry.percentage,
            submitted_count: entry.submitted_count,
            tie_break_key: entry.tie_break_key.clone(),
            rank: current_rank,
        });
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(id: i64, percentage: Option<f64>, key: &str) -> RankEntry {
        RankEntry {
            id,
            percentage,
            submitted_count: 3,
            tie_break_key: key.to_string(),
        }
    }

    fn rank_map(items: &[RankEntry]) -> HashMap<i64, i64> {
        rank(items).into_iter().map(|r| (r.id, r.rank)).collect()
    }

    #[test]
    fn test_competition_ranking_1224() {
        // A(90) B(90) C(80) => [1, 1, 3]，C 是第 3 名不是第 2 名
        let items = vec![
            entry(1, Some(90.0), "Alpha"),
            entry(2, Some(90.0), "Beta"),
            entry(3, Some(80.0), "Gamma"),
        ];
        let ranks = rank_map(&items);
        assert_eq!(ranks[&1], 1);
        assert_eq!(ranks[&2], 1);
        assert_eq!(ranks[&3], 3);
    }

    #[test]
    fn test_permutation_invariance() {
        let items = vec![
            entry(1, Some(90.0), "Alpha"),
            entry(2, Some(90.0), "Beta"),
            entry(3, Some(80.0), "Gamma"),
            entry(4, None, "Delta"),
        ];
        let expected = rank_map(&items);

        let mut shuffled = items.clone();
        shuffled.reverse();
        assert_eq!(rank_map(&shuffled), expected);

        shuffled.swap(0, 2);
        assert_eq!(rank_map(&shuffled), expected);
    }

    #[test]
    fn test_null_sinks_to_bottom() {
        let items = vec![
            entry(1, None, "AAA"),
            entry(2, Some(10.0), "ZZZ"),
            entry(3, Some(0.0), "MMM"),
        ];
        let ranked = rank(&items);
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 3);
        // null 沉底，即使名字排在最前、0 分也在它之上
        assert_eq!(ranked[2].id, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_both_null_share_rank() {
        let items = vec![
            entry(1, Some(50.0), "A"),
            entry(2, None, "B"),
            entry(3, None, "C"),
        ];
        let ranks = rank_map(&items);
        assert_eq!(ranks[&1], 1);
        assert_eq!(ranks[&2], 2);
        assert_eq!(ranks[&3], 2);
    }

    #[test]
    fn test_tie_break_orders_but_does_not_split_rank() {
        let items = vec![
            entry(2, Some(90.0), "beta"),
            entry(1, Some(90.0), "Alpha"),
        ];
        let ranked = rank(&items);
        // 大小写不敏感的名字序：Alpha 在前
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[1].id, 2);
        // 但名次共享
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
    }

    #[test]
    fn test_idempotence() {
        let items = vec![
            entry(1, Some(88.0), "A"),
            entry(2, Some(77.0), "B"),
            entry(3, None, "C"),
        ];
        assert_eq!(rank(&items), rank(&items));
    }
}
