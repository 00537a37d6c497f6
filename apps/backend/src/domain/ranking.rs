//! Final standings for a finished game.

use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberScore {
    pub user_id: i64,
    /// Membership row id; breaks ties between identical join timestamps.
    pub membership_id: i64,
    pub points: i32,
    pub drinks: i32,
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub user_id: i64,
    /// 1-based; only rank 1 counts as a win
    pub rank: u32,
    pub points: i32,
    pub drinks: i32,
}

/// Rank by points descending, earlier arrival first on ties.
///
/// Ranks are dense positions (1, 2, 3, ...) so exactly one member wins.
pub fn rank_members(members: &[MemberScore]) -> Vec<Standing> {
    let mut sorted: Vec<&MemberScore> = members.iter().collect();
    sorted.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(a.joined_at.cmp(&b.joined_at))
            .then(a.membership_id.cmp(&b.membership_id))
    });
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, m)| Standing {
            user_id: m.user_id,
            rank: idx as u32 + 1,
            points: m.points,
            drinks: m.drinks,
        })
        .collect()
}
