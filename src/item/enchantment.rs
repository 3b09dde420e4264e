//! Enchantments and the lenient name matcher.
//!
//! Menu authors write enchantments as modern keys (`sharpness`), legacy
//! constant names (`DAMAGE_ALL`) or loose variants (`Fire Aspect`,
//! `minecraft:unbreaking`). [`Enchantment::matching`] accepts all of them.

use std::fmt;

macro_rules! enchantments {
    ($($variant:ident => $key:literal $(, $alias:literal)*;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Enchantment {
            $($variant,)+
        }

        impl Enchantment {
            pub const ALL: &'static [Enchantment] = &[$(Enchantment::$variant,)+];

            /// Modern registry key without namespace
            pub fn key(&self) -> &'static str {
                match self {
                    $(Enchantment::$variant => $key,)+
                }
            }

            fn aliases(&self) -> &'static [&'static str] {
                match self {
                    $(Enchantment::$variant => &[$($alias),*],)+
                }
            }
        }
    };
}

enchantments! {
    Protection => "protection", "protection_environmental";
    FireProtection => "fire_protection", "protection_fire";
    FeatherFalling => "feather_falling", "protection_fall";
    BlastProtection => "blast_protection", "protection_explosions";
    ProjectileProtection => "projectile_protection", "protection_projectile";
    Respiration => "respiration", "oxygen";
    AquaAffinity => "aqua_affinity", "water_worker";
    Thorns => "thorns";
    DepthStrider => "depth_strider";
    FrostWalker => "frost_walker";
    BindingCurse => "binding_curse", "curse_of_binding";
    SoulSpeed => "soul_speed";
    SwiftSneak => "swift_sneak";
    Sharpness => "sharpness", "damage_all", "sharp";
    Smite => "smite", "damage_undead";
    BaneOfArthropods => "bane_of_arthropods", "damage_arthropods";
    Knockback => "knockback";
    FireAspect => "fire_aspect";
    Looting => "looting", "loot_bonus_mobs";
    SweepingEdge => "sweeping_edge", "sweeping";
    Efficiency => "efficiency", "dig_speed";
    SilkTouch => "silk_touch";
    Unbreaking => "unbreaking", "durability";
    Fortune => "fortune", "loot_bonus_blocks";
    Power => "power", "arrow_damage";
    Punch => "punch", "arrow_knockback";
    Flame => "flame", "arrow_fire";
    Infinity => "infinity", "arrow_infinite";
    LuckOfTheSea => "luck_of_the_sea", "luck";
    Lure => "lure";
    Loyalty => "loyalty";
    Impaling => "impaling";
    Riptide => "riptide";
    Channeling => "channeling";
    Multishot => "multishot";
    QuickCharge => "quick_charge";
    Piercing => "piercing";
    Density => "density";
    Breach => "breach";
    WindBurst => "wind_burst";
    Mending => "mending";
    VanishingCurse => "vanishing_curse", "curse_of_vanishing";
}

impl Enchantment {
    /// Cosmetic marker applied for glow
    pub const GLOW_MARKER: Enchantment = Enchantment::Lure;

    /// Resolve a loosely written enchantment name.
    pub fn matching(name: &str) -> Option<Enchantment> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        let compact = wanted.replace('_', "");
        Enchantment::ALL.iter().copied().find(|enchant| {
            std::iter::once(enchant.key())
                .chain(enchant.aliases().iter().copied())
                .any(|candidate| candidate == wanted || candidate.replace('_', "") == compact)
        })
    }
}

fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let bare = trimmed
        .strip_prefix("minecraft:")
        .or_else(|| trimmed.strip_prefix("MINECRAFT:"))
        .unwrap_or(trimmed);
    bare.chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for Enchantment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minecraft:{}", self.key())
    }
}
