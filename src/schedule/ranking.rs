use crate::data_fetcher::models::PlayerRecord;

/// Orders players youngest first.
///
/// The sort is stable: players of equal age keep their roster order. Players
/// without a known age go after everyone with one, also in roster order.
pub fn rank_by_age(mut players: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    players.sort_by_key(|player| (player.age.is_none(), player.age));
    players
}
