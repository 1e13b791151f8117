use serde::{Deserialize, Serialize};

use crate::PlayerStats;

/// Permanent upgrades the player may pick when levelling up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    /// Attack +5.
    AttackUp,
    /// Speed +0.5.
    SpeedUp,
    /// Max health +30 and health +30.
    HealthUp,
    /// Restores half of max health.
    HealUp,
    /// Attack ×1.15, floored.
    DamageBoost,
    /// Experience multiplier ×1.2.
    ExpBoost,
    /// Attack range ×1.2.
    AttackRange,
    /// Critical chance +0.1.
    CritChance,
    /// On-kill heal +5.
    Vampire,
    /// One more simultaneous target.
    MultiShot,
}

impl BuffKind {
    /// Full catalog in presentation order.
    pub const ALL: [BuffKind; 10] = [
        Self::AttackUp,
        Self::SpeedUp,
        Self::HealthUp,
        Self::HealUp,
        Self::DamageBoost,
        Self::ExpBoost,
        Self::AttackRange,
        Self::CritChance,
        Self::Vampire,
        Self::MultiShot,
    ];

    /// Stable camel-case identifier of the buff.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::AttackUp => "attackUp",
            Self::SpeedUp => "speedUp",
            Self::HealthUp => "healthUp",
            Self::HealUp => "healUp",
            Self::DamageBoost => "damageBoost",
            Self::ExpBoost => "expBoost",
            Self::AttackRange => "attackRange",
            Self::CritChance => "critChance",
            Self::Vampire => "vampire",
            Self::MultiShot => "multiShot",
        }
    }

    /// Display name shown on offer cards.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AttackUp => "Strength",
            Self::SpeedUp => "Swift Boots",
            Self::HealthUp => "Vitality",
            Self::HealUp => "Mend",
            Self::DamageBoost => "Frenzy",
            Self::ExpBoost => "Scholar",
            Self::AttackRange => "Long Reach",
            Self::CritChance => "Deadly Strike",
            Self::Vampire => "Bloodthirst",
            Self::MultiShot => "Multishot",
        }
    }

    /// One-line effect summary shown on offer cards.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AttackUp => "Attack +5",
            Self::SpeedUp => "Move speed +0.5",
            Self::HealthUp => "Max health +30",
            Self::HealUp => "Restore 50% health",
            Self::DamageBoost => "Attack +15%",
            Self::ExpBoost => "Experience +20%",
            Self::AttackRange => "Attack range +20%",
            Self::CritChance => "Critical chance +10%",
            Self::Vampire => "Heal 5 per kill",
            Self::MultiShot => "Strike one more enemy",
        }
    }

    /// Pictogram shown on offer cards.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::AttackUp => "⚔️",
            Self::SpeedUp => "💨",
            Self::HealthUp => "❤️",
            Self::HealUp => "💚",
            Self::DamageBoost => "🔥",
            Self::ExpBoost => "⭐",
            Self::AttackRange => "📍",
            Self::CritChance => "💥",
            Self::Vampire => "🩸",
            Self::MultiShot => "🎯",
        }
    }

    /// Returns the statistics after applying the buff once.
    #[must_use]
    pub fn apply(self, stats: PlayerStats) -> PlayerStats {
        let mut next = stats;
        match self {
            Self::AttackUp => next.attack += 5.0,
            Self::SpeedUp => next.speed += 0.5,
            Self::HealthUp => {
                next.max_health += 30.0;
                next.health = (next.health + 30.0).min(next.max_health);
            }
            Self::HealUp => {
                next.health = (next.health + next.max_health * 0.5).min(next.max_health);
            }
            Self::DamageBoost => {
                next.attack = (f64::from(next.attack) * 1.15).floor() as f32;
            }
            Self::ExpBoost => next.experience_multiplier *= 1.2,
            Self::AttackRange => next.attack_range *= 1.2,
            Self::CritChance => next.crit_chance += 0.1,
            Self::Vampire => next.vampire_heal += 5.0,
            Self::MultiShot => next.multi_shot += 1,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::BuffKind;
    use crate::{PlayerClass, PlayerStats};

    fn warrior() -> PlayerStats {
        PlayerStats::from_template(PlayerClass::Warrior.template())
    }

    #[test]
    fn health_up_raises_both_health_and_max() {
        let mut stats = warrior();
        stats.health = 100.0;
        let next = BuffKind::HealthUp.apply(stats);
        assert_eq!(next.max_health, 180.0);
        assert_eq!(next.health, 130.0);
    }

    #[test]
    fn heal_up_caps_at_max_health() {
        let mut stats = warrior();
        stats.health = 100.0;
        assert_eq!(BuffKind::HealUp.apply(stats).health, 150.0);

        stats.health = 40.0;
        assert_eq!(BuffKind::HealUp.apply(stats).health, 115.0);
    }

    #[test]
    fn damage_boost_floors_the_result() {
        let stats = warrior();
        assert_eq!(BuffKind::DamageBoost.apply(stats).attack, 17.0);
    }

    #[test]
    fn multi_shot_and_vampire_accumulate() {
        let stats = BuffKind::MultiShot.apply(BuffKind::MultiShot.apply(warrior()));
        assert_eq!(stats.multi_shot, 3);
        let stats = BuffKind::Vampire.apply(BuffKind::Vampire.apply(stats));
        assert_eq!(stats.vampire_heal, 10.0);
    }

    #[test]
    fn speed_up_adds_half_a_unit() {
        let stats = BuffKind::SpeedUp.apply(warrior());
        assert_eq!(stats.speed, 3.5);
        assert_eq!(BuffKind::SpeedUp.apply(stats).speed, 4.0);
    }

    #[test]
    fn attack_range_grows_by_a_fifth() {
        let stats = BuffKind::AttackRange.apply(warrior());
        assert!((stats.attack_range - 60.0).abs() < 1e-4);
        let stats = BuffKind::AttackRange.apply(stats);
        assert!((stats.attack_range - 72.0).abs() < 1e-4);
    }

    #[test]
    fn crit_chance_accumulates_without_touching_attack() {
        let stats = BuffKind::CritChance.apply(BuffKind::CritChance.apply(warrior()));
        assert!((stats.crit_chance - 0.2).abs() < 1e-6);
        assert_eq!(stats.attack, 15.0);
    }

    #[test]
    fn exp_boost_compounds_the_multiplier() {
        let stats = BuffKind::ExpBoost.apply(warrior());
        assert!((stats.experience_multiplier - 1.2).abs() < 1e-12);
        let stats = BuffKind::ExpBoost.apply(stats);
        assert!((stats.experience_multiplier - 1.44).abs() < 1e-12);
        assert_eq!((15.0 * stats.experience_multiplier).floor(), 21.0);
    }
}
