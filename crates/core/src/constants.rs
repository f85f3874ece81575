//! Shared constants for pokexp.
//!
//! Built-in progression tables and storage key layout.

/// Prefix of the per-user progress key in the key-value store.
pub const PROGRESS_KEY_PREFIX: &str = "progress:";

/// Cumulative XP required for each level, index 0 being level 1.
pub const DEFAULT_LEVEL_THRESHOLDS: [u64; 10] = [0, 100, 250, 500, 800, 1200, 1700, 2300, 3000, 4000];

/// XP for a completed capture.
pub const XP_POKEMON_CAPTURE: u64 = 50;

/// XP for a completed daily challenge.
pub const XP_DAILY_CHALLENGE_COMPLETE: u64 = 150;

/// One-time bonus for the first discovery posted to the feed.
pub const XP_FIRST_DISCOVERY_POST: u64 = 200;

/// Creature ids belonging to the Kanto region.
pub const KANTO_SPECIES_MIN: u32 = 1;
pub const KANTO_SPECIES_MAX: u32 = 151;

/// Default target count of a freshly assigned daily challenge.
pub const DEFAULT_CHALLENGE_TARGET: u32 = 1;

/// Env var holding a path to a JSON progression config.
pub const CONFIG_PATH_ENV: &str = "POKEXP_CONFIG";

/// Env var holding a PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "POKEXP_DATABASE_URL";

/// Env var overriding the SQLite database path.
pub const DB_PATH_ENV: &str = "POKEXP_DB_PATH";

/// Env var sizing the SQLite connection pool.
pub const DB_POOL_SIZE_ENV: &str = "POKEXP_DB_POOL_SIZE";

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Env var sizing the notification broadcast channel.
pub const NOTIFY_CHANNEL_CAPACITY_ENV: &str = "POKEXP_NOTIFY_CAPACITY";

/// Default notification broadcast channel capacity.
pub const DEFAULT_NOTIFY_CHANNEL_CAPACITY: usize = 64;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Build the store key for a user. Surrounding whitespace in the user key is ignored.
pub fn progress_key(user_key: &str) -> String {
    format!("{PROGRESS_KEY_PREFIX}{}", user_key.trim())
}
