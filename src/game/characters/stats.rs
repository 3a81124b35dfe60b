// Entity tuning. Every number gameplay depends on lives here.
// Durations are in ticks, distances in pixels, speeds in pixels/tick.

use glam::Vec2;

/// Player tuning
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Body
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    /// Immunity granted when the level starts
    pub spawn_immunity: u32,

    // Movement
    /// Horizontal velocity decay per tick
    pub friction: f32,
    /// Input multiplier while running
    pub run_multiplier: f32,
    /// Running may only start while `air_time` is below this
    pub run_start_air_time: u32,

    // Jumping
    /// Ground jumps allowed while `air_time` is below this
    pub coyote_ticks: u32,
    pub jump_velocity: f32,
    /// `air_time` after a ground jump
    pub jump_air_time: u32,
    pub wall_jump_velocity: Vec2,
    /// Wall sliding needs `air_time` above this
    pub wall_slide_air_time: u32,
    pub wall_slide_speed: f32,

    // Dash
    pub dash_ticks: u32,
    pub dash_speed: f32,
    /// Dash velocity applies while the timer is above this
    pub dash_drive_until: u32,
    pub dash_release_factor: f32,
    /// Dash grants invulnerability while the timer is at least this
    pub dash_protection_until: u32,

    // Attack
    pub attack_ticks: u32,
    /// Attacks need `air_time` below this
    pub attack_air_time: u32,
    /// A new attack is accepted, and the attack pose ends, once the timer
    /// drops below `attack_cooldown - combo * combo_cooldown_step`
    pub attack_cooldown: u32,
    /// Each combo step shortens the cooldown by this much
    pub combo_cooldown_step: u32,
    pub max_combo: u8,
    /// Strikes land while the attack timer is at least this
    pub hit_window_from: u32,
    pub combo_damage: u32,
    pub finisher_damage: u32,
    pub attack_shake: f32,
    pub attack_sparks: usize,

    // Damage and death
    pub contact_immunity: u32,
    pub knockback_speed: f32,
    pub hit_shake: f32,
    /// Falling this long at terminal-ish speed kills the player
    pub fall_death_air_time: u32,
    pub fall_death_speed: f32,
    /// The level reloads once the death counter passes this
    pub death_reload_after: u32,

    // Presentation
    pub anim_offset: Vec2,
    pub attack_anim_offset: Vec2,
    pub attack_anim_offset_flipped: Vec2,
}

pub const PLAYER_STATS: PlayerStats = PlayerStats {
    width: 9.0,
    height: 16.0,
    max_hp: 16,
    spawn_immunity: 60,

    friction: 0.1,
    run_multiplier: 2.0,
    run_start_air_time: 10,

    coyote_ticks: 10,
    jump_velocity: -3.0,
    jump_air_time: 5,
    wall_jump_velocity: Vec2::new(3.5, -2.5),
    wall_slide_air_time: 4,
    wall_slide_speed: 1.0,

    dash_ticks: 60,
    dash_speed: 8.0,
    dash_drive_until: 50,
    dash_release_factor: 0.1,
    dash_protection_until: 50,

    attack_ticks: 45,
    attack_air_time: 4,
    attack_cooldown: 30,
    combo_cooldown_step: 5,
    max_combo: 2,
    hit_window_from: 40,
    combo_damage: 5,
    finisher_damage: 8,
    attack_shake: 16.0,
    attack_sparks: 3,

    contact_immunity: 20,
    knockback_speed: 2.0,
    hit_shake: 16.0,
    fall_death_air_time: 120,
    fall_death_speed: 4.7,
    death_reload_after: 40,

    anim_offset: Vec2::new(-4.0, 0.0),
    attack_anim_offset: Vec2::new(-16.0, -16.0),
    attack_anim_offset_flipped: Vec2::new(-24.0, -16.0),
};

impl Default for PlayerStats {
    fn default() -> Self {
        PLAYER_STATS
    }
}

/// Slime tuning
#[derive(Debug, Clone)]
pub struct SlimeStats {
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    pub contact_damage: u32,
    /// Pickups released when the corpse is removed
    pub exp_value: u32,
    /// Immunity after taking a strike
    pub hit_immunity: u32,
    /// Strikes need more than this many overlapping silhouette pixels
    pub min_strike_overlap: u32,

    // Hopping
    pub hop_ticks: u32,
    pub hop_velocity: Vec2,
    /// Drift while the hop timer is above this
    pub hop_drift_until: u32,
    pub hop_drift_speed: f32,
    /// Hops need `ground_time` above this
    pub hop_ground_time: u32,
    /// Per-tick hop chance when the player is far
    pub far_hop_chance: f32,
    pub near_hop_chance: f32,
    pub far_distance: f32,
    /// Landing pose shows while `ground_time` is below this
    pub splash_ground_time: u32,

    /// Corpse lingers this long before removal
    pub death_ticks: u32,

    pub anim_offset: Vec2,
    pub health_bar_size: Vec2,
    pub health_bar_offset: Vec2,
}

pub const SLIME_STATS: SlimeStats = SlimeStats {
    width: 14.0,
    height: 10.0,
    max_hp: 11,
    contact_damage: 3,
    exp_value: 2,
    hit_immunity: 20,
    min_strike_overlap: 2,

    hop_ticks: 60,
    hop_velocity: Vec2::new(2.0, -2.0),
    hop_drift_until: 20,
    hop_drift_speed: 0.5,
    hop_ground_time: 5,
    far_hop_chance: 0.01,
    near_hop_chance: 0.05,
    far_distance: 80.0,
    splash_ground_time: 5,

    death_ticks: 30,

    anim_offset: Vec2::new(1.0, -6.0),
    health_bar_size: Vec2::new(12.0, 2.0),
    health_bar_offset: Vec2::new(2.0, -2.0),
};

impl Default for SlimeStats {
    fn default() -> Self {
        SLIME_STATS
    }
}

/// Experience pickup tuning
#[derive(Debug, Clone)]
pub struct PickupStats {
    pub size: f32,
    pub exp_value: u32,
    /// Pull starts inside this horizontal distance
    pub pull_range_x: f32,
    /// Pull starts inside this vertical distance from the player's chest
    pub pull_range_y: f32,
    /// Vertical offset from the player's center to the pull target
    pub chest_offset: f32,
    /// Collection needs both axis distances inside this
    pub collect_range: f32,
    /// Horizontal pull is `pull_strength / dx` beyond `snap_distance`
    pub pull_strength: f32,
    pub snap_distance: f32,
    /// Horizontal pull speed inside `snap_distance`
    pub snap_speed: f32,
    /// No vertical pull while the chest is this close vertically
    pub vertical_dead_zone: f32,
    pub max_vertical_pull: f32,
}

pub const PICKUP_STATS: PickupStats = PickupStats {
    size: 3.0,
    exp_value: 1,
    pull_range_x: 32.0,
    pull_range_y: 16.0,
    chest_offset: 8.0,
    collect_range: 16.0,
    pull_strength: 16.0,
    snap_distance: 8.0,
    snap_speed: 2.0,
    vertical_dead_zone: 4.0,
    max_vertical_pull: 1.0,
};

impl Default for PickupStats {
    fn default() -> Self {
        PICKUP_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        assert_eq!(PlayerStats::default().max_hp, PLAYER_STATS.max_hp);
        assert_eq!(SlimeStats::default().exp_value, 2);
        assert_eq!(PickupStats::default().size, 3.0);
    }

    #[test]
    fn test_attack_window_shrinks_with_combo() {
        let stats = PlayerStats::default();
        for combo in 0..=stats.max_combo as u32 {
            let window = stats.attack_cooldown - stats.combo_cooldown_step * combo;
            assert!(window < stats.attack_ticks);
            assert!(window >= 20);
        }
    }

    #[test]
    fn test_strike_window_inside_attack() {
        let stats = PlayerStats::default();
        assert!(stats.hit_window_from < stats.attack_ticks);
        assert!(stats.dash_drive_until < stats.dash_ticks);
    }
}
