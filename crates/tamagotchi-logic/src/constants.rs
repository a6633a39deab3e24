//! Game constants: stat bounds, action magnitudes, creation limits, timing.
//!
//! Both the session controller and the terminal front-end read these.

/// Lowest value any stat can hold.
pub const STAT_MIN: u32 = 0;
/// Highest value any stat can hold.
pub const STAT_MAX: u32 = 100;

/// Fixed amount a single feed, play, or rest moves its stat.
pub const ACTION_AMOUNT: u32 = 20;

/// Happiness decay multiplier while hunger or sleepiness is saturated.
pub const NEGLECT_PENALTY: u32 = 2;

/// Rate slider bounds for hunger rate, sleepiness rate, and happiness decay.
pub const RATE_MIN: u32 = 1;
pub const RATE_MAX: u32 = 10;
/// Rate applied when the user does not customize one.
pub const DEFAULT_RATE: u32 = 1;

/// Longest accepted animal name, counted in characters after trimming.
pub const MAX_NAME_LENGTH: usize = 25;

/// Milliseconds between two stat ticks.
pub const TICK_INTERVAL_MS: u64 = 5 * 1000;

/// Key the whole collection is stored under.
pub const STORAGE_KEY: &str = "tamagotchi";
