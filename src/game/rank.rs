/// Tier label stored for summoners without any ranked position.
pub const UNRANKED: &str = "unranked";

/// Tier steps dwarf division + LP so that a higher tier always wins.
pub fn tier_weight(tier: &str) -> i64 {
    match tier.to_uppercase().as_str() {
        "IRON" => 0,
        "BRONZE" => 10_000,
        "SILVER" => 20_000,
        "GOLD" => 30_000,
        "PLATINUM" => 40_000,
        "EMERALD" => 50_000,
        "DIAMOND" => 60_000,
        "MASTER" => 70_000,
        "GRANDMASTER" => 80_000,
        "CHALLENGER" => 90_000,
        _ => 0,
    }
}

pub fn division_weight(division: &str) -> i64 {
    match division {
        "I" => 400,
        "II" => 300,
        "III" => 200,
        "IV" => 100,
        _ => 0,
    }
}

pub fn rank_weight(tier: &str, division: &str, league_points: i32) -> i64 {
    tier_weight(tier) + division_weight(division) + i64::from(league_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_dominates_division_and_points() {
        assert!(rank_weight("GOLD", "IV", 0) > rank_weight("SILVER", "I", 100));
        assert!(rank_weight("GOLD", "II", 0) > rank_weight("GOLD", "III", 99));
    }

    #[test]
    fn points_break_ties_inside_a_division() {
        assert!(rank_weight("DIAMOND", "I", 75) > rank_weight("DIAMOND", "I", 12));
    }
}
