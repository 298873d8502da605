/// (queue id, filter key, display name)
const QUEUES: &[(i32, &str, &str)] = &[
    (0, "CUSTOM", "Custom"),
    (400, "NORMAL_DRAFT", "Normal Draft"),
    (420, "RANKED_SOLO", "Ranked Solo/Duo"),
    (430, "NORMAL_BLIND", "Normal Blind"),
    (440, "RANKED_FLEX", "Ranked Flex"),
    (450, "ARAM", "ARAM"),
    (460, "TT_BLIND", "3v3 Blind"),
    (470, "RANKED_FLEX_TT", "3v3 Ranked Flex"),
    (700, "CLASH", "Clash"),
    (830, "COOP_INTRO", "Co-op vs AI Intro"),
    (840, "COOP_BEGINNER", "Co-op vs AI Beginner"),
    (850, "COOP_INTERMEDIATE", "Co-op vs AI Intermediate"),
    (900, "URF", "ARURF"),
    (1020, "ONE_FOR_ALL", "One for All"),
    (1300, "NEXUS_BLITZ", "Nexus Blitz"),
];

/// Solo/duo and flex on Summoner's Rift.
pub const RANKED_QUEUES: [i32; 2] = [420, 440];

const LEADERBOARD_QUEUES: [&str; 3] = ["RANKED_SOLO_5x5", "RANKED_FLEX_SR", "RANKED_FLEX_TT"];

pub fn queue_name(id: i32) -> &'static str {
    QUEUES
        .iter()
        .find(|(queue_id, _, _)| *queue_id == id)
        .map(|(_, _, name)| *name)
        .unwrap_or("Other")
}

/// Resolve a filter key such as `RANKED_SOLO` into its queue id.
pub fn queue_id(key: &str) -> Option<i32> {
    QUEUES
        .iter()
        .find(|(_, queue_key, _)| queue_key.eq_ignore_ascii_case(key))
        .map(|(id, _, _)| *id)
}

pub fn is_leaderboard_queue(queue: &str) -> bool {
    LEADERBOARD_QUEUES.contains(&queue)
}
