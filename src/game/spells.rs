const SUMMONER_SPELLS: &[(i32, &str)] = &[
    (1, "Cleanse"),
    (3, "Exhaust"),
    (4, "Flash"),
    (6, "Ghost"),
    (7, "Heal"),
    (11, "Smite"),
    (12, "Teleport"),
    (13, "Clarity"),
    (14, "Ignite"),
    (21, "Barrier"),
    (30, "To the King!"),
    (31, "Poro Toss"),
    (32, "Mark"),
    (39, "Mark"),
];

pub fn spell_name(id: i32) -> &'static str {
    SUMMONER_SPELLS
        .iter()
        .find(|(spell_id, _)| *spell_id == id)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}
