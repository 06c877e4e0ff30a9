pub mod layout;
pub mod list;
pub mod shape;
pub mod simulate;

use effort_picker::score::Score;

/// Accepts a rank (`0`..=`10`) or a snake_case name such as `moderate2`.
pub fn parse_score(s: &str) -> Result<Score, String> {
    let s = s.trim();
    if let Ok(rank) = s.parse::<u8>() {
        return Score::from_rank(rank).ok_or_else(|| format!("No effort score with rank {}", rank));
    }
    s.to_lowercase()
        .parse::<Score>()
        .map_err(|_| format!("Unknown effort score '{}'", s))
}
