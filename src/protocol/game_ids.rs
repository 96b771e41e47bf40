use rand::RngExt;

use super::types::{DEFAULT_GAME_ID_LENGTH, TEST_GAME_PREFIX};

const GAME_ID_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a lowercase base-36 game id of the requested length.
pub fn generate_game_id_of_length(length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..GAME_ID_CHARS.len());
            // SAFETY: `idx` is produced by `random_range(0..len)`, so it is
            // always within [0, len).
            #[allow(clippy::indexing_slicing)]
            let ch = GAME_ID_CHARS[idx] as char;
            ch
        })
        .collect()
}

/// Generate a 6-character game id.
pub fn generate_game_id() -> String {
    generate_game_id_of_length(DEFAULT_GAME_ID_LENGTH)
}

/// Generate an id for a synthetic admin game, e.g. `test-k3x9q1`.
pub fn generate_test_game_id() -> String {
    format!("{TEST_GAME_PREFIX}{}", generate_game_id())
}
