//! Monster records as seen by delayed actions.
//!
//! A monster's classification (holiness, alignment, god affiliation) is
//! decided by the monster subsystem and stored here as plain data; this crate
//! only reads it. The mutable surface is deliberately small: attitude,
//! behaviour, flags, name and enchantments.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;

/// Identifier of a monster, unique within its level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterId(pub u32);

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Disposition of a monster towards the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Attitude {
    #[default]
    Hostile,
    /// Ignores the player but fights anything else.
    Neutral,
    /// Ignores everyone unless attacked.
    StrictNeutral,
    /// Neutral but never harms the player.
    GoodNeutral,
    Friendly,
}

/// What a monster is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Behaviour {
    Sleep,
    #[default]
    Wander,
    Seek,
    Flee,
    Lurk,
}

/// Gods relevant to monster allegiance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum God {
    #[default]
    NoGod,
    Zin,
    ShiningOne,
    Elyvilon,
    Yredelemnul,
    Beogh,
    Jiyva,
    Fedhas,
    Trog,
    Makhleb,
    Lugonu,
}

impl God {
    /// Good gods forbid their followers from keeping evil company.
    pub const fn is_good(self) -> bool {
        matches!(self, God::Zin | God::ShiningOne | God::Elyvilon)
    }
}

/// Monster species, reduced to the distinctions delayed actions care about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum MonsterType {
    #[default]
    Orc,
    #[strum(serialize = "orc priest")]
    OrcPriest,
    Slave,
    Angel,
    Daeva,
    Zombie,
    #[strum(serialize = "spectral thing")]
    SpectralThing,
    Jelly,
    Oklob,
    Fungus,
    Berserker,
    Imp,
}

bitflags! {
    /// Innate classification of a monster.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MonsterClass: u16 {
        const HOLY          = 1 << 0;
        const UNHOLY        = 1 << 1;
        const EVIL          = 1 << 2;
        const UNCLEAN       = 1 << 3;
        const CHAOTIC       = 1 << 4;
        const UNDEAD        = 1 << 5;
        const PLANT         = 1 << 6;
        const SLIME         = 1 << 7;
        /// Has real spells (not just innate abilities).
        const SPELLCASTER   = 1 << 8;
        /// A soul bound by Yredelemnul's enslavement.
        const ENSLAVED_SOUL = 1 << 9;
    }
}

bitflags! {
    /// Mutable behavioural flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MonsterFlags: u16 {
        /// Granted to the player by `Monster::god`.
        const GOD_GIFT           = 1 << 0;
        const BAND_MEMBER        = 1 << 1;
        /// The player already tried to win this monster over.
        const ATT_CHANGE_ATTEMPT = 1 << 2;
        /// `Monster::name` replaces the species name entirely.
        const NAME_REPLACE       = 1 << 3;
        /// `Monster::name` is a descriptor ("the freed slave").
        const NAME_DESCRIPTOR    = 1 << 4;
        /// Corpses do not inherit the custom name.
        const NAME_NOCORPSE      = 1 << 5;
    }
}

bitflags! {
    /// Active enchantments.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Enchantments: u8 {
        const CHARM     = 1 << 0;
        const HASTE     = 1 << 1;
        const SLOW      = 1 << 2;
        const CONFUSION = 1 << 3;
    }
}

/// Value stored in a monster's property bag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// A single monster on a level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: MonsterId,
    pub mtype: MonsterType,
    pub hp: i32,
    pub attitude: Attitude,
    pub behaviour: Behaviour,
    pub god: God,
    pub class: MonsterClass,
    pub flags: MonsterFlags,
    pub enchantments: Enchantments,
    /// Custom name; empty means the species name is used.
    pub name: String,
    pub props: BTreeMap<String, PropValue>,
}

impl Monster {
    pub fn new(id: MonsterId, mtype: MonsterType) -> Self {
        Self {
            id,
            mtype,
            hp: 10,
            attitude: Attitude::Hostile,
            behaviour: Behaviour::Wander,
            god: God::NoGod,
            class: MonsterClass::empty(),
            flags: MonsterFlags::empty(),
            enchantments: Enchantments::empty(),
            name: String::new(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = attitude;
        self
    }

    pub fn with_class(mut self, class: MonsterClass) -> Self {
        self.class |= class;
        self
    }

    pub fn with_flags(mut self, flags: MonsterFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_enchantments(mut self, enchantments: Enchantments) -> Self {
        self.enchantments |= enchantments;
        self
    }

    pub fn with_god(mut self, god: God) -> Self {
        self.god = god;
        self
    }

    /// Marks the monster as a gift from `god`.
    pub fn gift_of(self, god: God) -> Self {
        self.with_god(god).with_flags(MonsterFlags::GOD_GIFT)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Name used in diagnostics and messages.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.mtype.as_ref()
        } else {
            &self.name
        }
    }

    pub fn has_ench(&self, ench: Enchantments) -> bool {
        self.enchantments.contains(ench)
    }

    pub fn del_ench(&mut self, ench: Enchantments) {
        self.enchantments.remove(ench);
    }

    pub fn has_prop(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Friendly by attitude or by charm.
    pub fn friendly(&self) -> bool {
        self.attitude == Attitude::Friendly || self.has_ench(Enchantments::CHARM)
    }

    pub fn good_neutral(&self) -> bool {
        self.attitude == Attitude::GoodNeutral
    }

    pub fn strict_neutral(&self) -> bool {
        self.attitude == Attitude::StrictNeutral
    }

    pub fn wont_attack(&self) -> bool {
        self.friendly() || self.good_neutral() || self.strict_neutral()
    }

    pub fn is_holy(&self) -> bool {
        self.class.contains(MonsterClass::HOLY)
    }

    pub fn is_unholy(&self) -> bool {
        self.class.contains(MonsterClass::UNHOLY)
    }

    pub fn is_evil(&self) -> bool {
        self.class.contains(MonsterClass::EVIL)
    }

    pub fn is_unclean(&self) -> bool {
        self.class.contains(MonsterClass::UNCLEAN)
    }

    pub fn is_chaotic(&self) -> bool {
        self.class.contains(MonsterClass::CHAOTIC)
    }

    pub fn is_undead(&self) -> bool {
        self.class.contains(MonsterClass::UNDEAD)
    }

    pub fn is_plant(&self) -> bool {
        self.class.contains(MonsterClass::PLANT)
    }

    pub fn is_slime(&self) -> bool {
        self.class.contains(MonsterClass::SLIME)
    }

    pub fn is_actual_spellcaster(&self) -> bool {
        self.class.contains(MonsterClass::SPELLCASTER)
    }

    pub fn is_enslaved_soul(&self) -> bool {
        self.class.contains(MonsterClass::ENSLAVED_SOUL)
    }

    pub fn is_god_gift(&self, god: God) -> bool {
        self.flags.contains(MonsterFlags::GOD_GIFT) && self.god == god
    }

    /// Undead raised by Yredelemnul, regardless of current disposition.
    pub fn is_yred_undead_slave(&self) -> bool {
        self.is_alive() && self.is_undead() && self.is_god_gift(God::Yredelemnul)
    }

    /// A slime that joined the player through Jiyva.
    pub fn is_fellow_slime(&self) -> bool {
        self.is_alive() && self.is_slime() && self.strict_neutral() && self.is_god_gift(God::Jiyva)
    }
}
