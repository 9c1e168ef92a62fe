// Experience and leveling
pub const EXP_PER_VICTORY: u32 = 50;
pub const EXP_TO_NEXT_LEVEL: u32 = 100;
pub const LEVEL_UP_HP_GAIN: u32 = 5;
pub const LEVEL_UP_STAT_GAIN: u32 = 2;

// Combat
pub const MAX_MOVES: usize = 4;
pub const MAX_TYPES: usize = 18;
pub const HEAL_MOVE_FRACTION: f64 = 0.5;
pub const STATUS_BUFF_MULTIPLIER: f64 = 1.5;
pub const STAB_MULTIPLIER: f64 = 1.5;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.85;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.0;
pub const MIN_DEFENSE_STAT: u32 = 1;

// Battle pacing (milliseconds)
pub const MOVE_ANNOUNCE_DELAY_MS: u64 = 800;
pub const BETWEEN_ACTIONS_DELAY_MS: u64 = 1000;
pub const FAINT_DELAY_MS: u64 = 1000;
pub const EXPERIENCE_DELAY_MS: u64 = 1000;

// Map generation
pub const DEFAULT_FLOOR_COUNT: u32 = 11;
pub const DEFAULT_FLOOR_WIDTHS: [u32; 10] = [1, 2, 2, 3, 2, 3, 2, 2, 1, 1];
pub const ELITE_FLOOR: u32 = 4;
pub const EVENT_REST_FLOOR_MODULUS: u32 = 3;
pub const EVENT_OVER_REST_CHANCE: f64 = 0.5;
pub const EVENT_OVER_COMBAT_CHANCE: f64 = 0.3;
pub const EDGE_INCLUSION_CHANCE: f64 = 0.7;
pub const START_NODE_ID: &str = "start";

// Rewards
pub const REWARD_MOVE_OPTIONS: usize = 3;
pub const REWARD_ITEM_CHANCE: f64 = 0.5;

// Run
pub const BATTLE_LOG_CAPACITY: usize = 50;
pub const STARTING_POTIONS: u32 = 2;
pub const REST_HEAL_FRACTION: f64 = 0.5;
pub const STATUE_HP_COST: u32 = 10;
pub const STATUE_ATTACK_GAIN: u32 = 5;

// Enemy scaling
pub const ENEMY_BASE_LEVEL: u32 = 5;
pub const ENEMY_LEVEL_PER_FLOOR: u32 = 2;
pub const BOSS_LEVEL_BONUS: u32 = 5;
pub const ENEMY_HP_PER_FLOOR: u32 = 5;
pub const ENEMY_STAT_GAIN_PER_LEVEL: u32 = 1;
// (stat_mult, hp_mult)
pub const ELITE_MULTIPLIERS: (f64, f64) = (1.25, 1.5);
pub const BOSS_MULTIPLIERS: (f64, f64) = (1.5, 2.0);
pub const ENEMY_MIN_MOVES: usize = 2;

// Enemy provider
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
