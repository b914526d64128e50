//! A compact built-in catalogue for tests and demos

use crate::abilities::Ability;
use crate::dex::Dex;
use crate::moves::{
    MoveAttr, MoveCategory, MoveCondition, MoveData, MoveFlags, MoveId, MoveTarget, TypeSource,
};
use crate::species::{SpeciesData, SpeciesId};
use crate::stat::BattleStat;
use crate::status::StatusEffect;
use crate::tags::TagKind;
use crate::types::Type;

use MoveCategory::{Physical, Special, Status};
use MoveTarget::*;

struct MoveRow {
    id: u16,
    name: &'static str,
    ty: Type,
    category: MoveCategory,
    power: u16,
    accuracy: Option<u8>,
    pp: u8,
    target: MoveTarget,
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: u16,
    name: &'static str,
    ty: Type,
    category: MoveCategory,
    power: u16,
    accuracy: Option<u8>,
    pp: u8,
    target: MoveTarget,
) -> MoveRow {
    MoveRow {
        id,
        name,
        ty,
        category,
        power,
        accuracy,
        pp,
        target,
    }
}

impl MoveRow {
    fn build(self, flags: MoveFlags, priority: i8, attrs: Vec<MoveAttr>) -> MoveData {
        MoveData {
            id: MoveId(self.id),
            name: self.name.to_string(),
            move_type: self.ty,
            category: self.category,
            power: self.power,
            accuracy: self.accuracy,
            pp: self.pp,
            priority,
            target: self.target,
            flags,
            attrs,
            unimplemented: false,
        }
    }
}

const CONTACT: MoveFlags = MoveFlags::MAKES_CONTACT;
const NONE: MoveFlags = MoveFlags::empty();

fn status(effect: StatusEffect, chance: u8) -> MoveAttr {
    MoveAttr::Status {
        effect,
        chance,
        self_target: false,
    }
}

fn stages(stats: &[BattleStat], stages: i8, self_target: bool, chance: u8) -> MoveAttr {
    MoveAttr::StatStageChange {
        stats: stats.to_vec(),
        stages,
        self_target,
        chance,
    }
}

fn tag(tag: TagKind, self_target: bool, chance: u8) -> MoveAttr {
    MoveAttr::AddTag {
        tag,
        turns: None,
        chance,
        self_target,
    }
}

fn moves() -> Vec<MoveData> {
    use BattleStat as S;
    use StatusEffect as E;
    use Type as T;

    vec![
        row(1, "Pound", T::Normal, Physical, 40, Some(100), 35, NearOther).build(CONTACT, 0, vec![]),
        row(14, "Swords Dance", T::Normal, Status, 0, None, 20, User)
            .build(NONE, 0, vec![stages(&[S::Atk], 2, true, 100)]),
        row(16, "Gust", T::Flying, Special, 40, Some(100), 35, NearOther).build(
            MoveFlags::WIND,
            0,
            vec![MoveAttr::HitsTag { tag: TagKind::Flying, double_damage: true }],
        ),
        row(19, "Fly", T::Flying, Physical, 90, Some(95), 15, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::Charge { tag: Some(TagKind::Flying) }]),
        row(23, "Stomp", T::Normal, Physical, 65, Some(100), 20, NearOther).build(
            CONTACT,
            0,
            vec![
                MoveAttr::HitsTag { tag: TagKind::Minimized, double_damage: true },
                tag(TagKind::Flinched, false, 30),
            ],
        ),
        row(33, "Tackle", T::Normal, Physical, 40, Some(100), 35, NearOther).build(CONTACT, 0, vec![]),
        row(34, "Body Slam", T::Normal, Physical, 85, Some(100), 15, NearOther)
            .build(CONTACT, 0, vec![status(E::Paralysis, 30)]),
        row(38, "Double-Edge", T::Normal, Physical, 120, Some(100), 15, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::Recoil { ratio: 0.33 }]),
        row(49, "Sonic Boom", T::Normal, Special, 1, Some(90), 20, NearOther)
            .build(NONE, 0, vec![MoveAttr::FixedDamage { damage: 20 }]),
        row(52, "Ember", T::Fire, Special, 40, Some(100), 25, NearOther)
            .build(NONE, 0, vec![status(E::Burn, 10)]),
        row(53, "Flamethrower", T::Fire, Special, 90, Some(100), 15, NearOther)
            .build(NONE, 0, vec![status(E::Burn, 10)]),
        row(55, "Water Gun", T::Water, Special, 40, Some(100), 25, NearOther).build(NONE, 0, vec![]),
        row(57, "Surf", T::Water, Special, 90, Some(100), 15, AllNearOthers).build(
            NONE,
            0,
            vec![MoveAttr::HitsTag { tag: TagKind::Underwater, double_damage: true }],
        ),
        row(58, "Ice Beam", T::Ice, Special, 90, Some(100), 10, NearOther)
            .build(NONE, 0, vec![status(E::Freeze, 10)]),
        row(69, "Seismic Toss", T::Fighting, Physical, 1, Some(100), 20, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::LevelDamage]),
        row(76, "Solar Beam", T::Grass, Special, 120, Some(100), 10, NearOther)
            .build(NONE, 0, vec![MoveAttr::Charge { tag: None }]),
        row(82, "Dragon Rage", T::Dragon, Special, 1, Some(100), 10, NearOther)
            .build(NONE, 0, vec![MoveAttr::FixedDamage { damage: 40 }]),
        row(85, "Thunderbolt", T::Electric, Special, 90, Some(100), 15, NearOther)
            .build(NONE, 0, vec![status(E::Paralysis, 10)]),
        row(86, "Thunder Wave", T::Electric, Status, 0, Some(90), 20, NearOther)
            .build(NONE, 0, vec![status(E::Paralysis, 100)]),
        row(89, "Earthquake", T::Ground, Physical, 100, Some(100), 10, AllNearOthers).build(
            NONE,
            0,
            vec![MoveAttr::HitsTag { tag: TagKind::Underground, double_damage: true }],
        ),
        row(90, "Fissure", T::Ground, Physical, 1, Some(30), 5, NearOther).build(
            NONE,
            0,
            vec![
                MoveAttr::OneHitKo,
                MoveAttr::Condition { condition: MoveCondition::UserLevelAtLeastTarget },
                MoveAttr::HitsTag { tag: TagKind::Underground, double_damage: false },
            ],
        ),
        row(91, "Dig", T::Ground, Physical, 80, Some(100), 10, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::Charge { tag: Some(TagKind::Underground) }]),
        row(92, "Toxic", T::Poison, Status, 0, Some(90), 10, NearOther)
            .build(NONE, 0, vec![status(E::Toxic, 100)]),
        row(94, "Psychic", T::Psychic, Special, 90, Some(100), 10, NearOther)
            .build(NONE, 0, vec![stages(&[S::Spd], -1, false, 10)]),
        row(95, "Hypnosis", T::Psychic, Status, 0, Some(60), 20, NearOther)
            .build(NONE, 0, vec![status(E::Sleep, 100)]),
        row(98, "Quick Attack", T::Normal, Physical, 40, Some(100), 30, NearOther).build(CONTACT, 1, vec![]),
        row(101, "Night Shade", T::Ghost, Special, 1, Some(100), 15, NearOther)
            .build(NONE, 0, vec![MoveAttr::LevelDamage]),
        row(105, "Recover", T::Normal, Status, 0, None, 5, User)
            .build(MoveFlags::TRIAGE, 0, vec![MoveAttr::Heal { ratio: 0.5 }]),
        row(109, "Confuse Ray", T::Ghost, Status, 0, Some(100), 10, NearOther)
            .build(NONE, 0, vec![tag(TagKind::Confused, false, 100)]),
        row(116, "Focus Energy", T::Normal, Status, 0, None, 30, User)
            .build(NONE, 0, vec![tag(TagKind::CritBoost, true, 100)]),
        row(147, "Spore", T::Grass, Status, 0, Some(100), 15, NearOther)
            .build(NONE, 0, vec![status(E::Sleep, 100)]),
        row(157, "Rock Slide", T::Rock, Physical, 75, Some(90), 10, AllNearEnemies)
            .build(NONE, 0, vec![tag(TagKind::Flinched, false, 30)]),
        row(162, "Super Fang", T::Normal, Physical, 1, Some(90), 10, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::TargetHalfHpDamage]),
        row(163, "Slash", T::Normal, Physical, 70, Some(100), 20, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::HighCritRatio { stages: 1 }]),
        row(165, "Struggle", T::Normal, Physical, 50, None, 1, RandomNearEnemy)
            .build(CONTACT, 0, vec![MoveAttr::Recoil { ratio: 0.25 }]),
        row(182, "Protect", T::Normal, Status, 0, None, 10, User)
            .build(NONE, 4, vec![tag(TagKind::Protected, true, 100)]),
        row(203, "Endure", T::Normal, Status, 0, None, 10, User)
            .build(NONE, 4, vec![tag(TagKind::Enduring, true, 100)]),
        row(206, "False Swipe", T::Normal, Physical, 40, Some(100), 40, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::SurviveDamage]),
        row(214, "Sleep Talk", T::Normal, Status, 0, None, 10, User).build(
            NONE,
            0,
            vec![MoveAttr::Condition { condition: MoveCondition::UserAsleep }],
        ),
        row(247, "Shadow Ball", T::Ghost, Special, 80, Some(100), 15, NearOther)
            .build(NONE, 0, vec![stages(&[S::Spd], -1, false, 20)]),
        row(252, "Fake Out", T::Normal, Physical, 40, Some(100), 10, NearOther).build(
            CONTACT,
            3,
            vec![
                MoveAttr::Condition { condition: MoveCondition::FirstTurnOnly },
                tag(TagKind::Flinched, false, 100),
            ],
        ),
        row(261, "Will-O-Wisp", T::Fire, Status, 0, Some(85), 15, NearOther)
            .build(NONE, 0, vec![status(E::Burn, 100)]),
        row(263, "Facade", T::Normal, Physical, 70, Some(100), 20, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::BypassBurnReduction]),
        row(269, "Taunt", T::Dark, Status, 0, Some(100), 20, NearOther)
            .build(NONE, 0, vec![tag(TagKind::Taunt, false, 100)]),
        row(281, "Yawn", T::Normal, Status, 0, None, 10, NearOther)
            .build(NONE, 0, vec![tag(TagKind::Drowsy, false, 100)]),
        row(304, "Hyper Voice", T::Normal, Special, 90, Some(100), 10, AllNearEnemies)
            .build(MoveFlags::SOUND_BASED | MoveFlags::IGNORE_SUBSTITUTE, 0, vec![]),
        row(311, "Weather Ball", T::Normal, Special, 50, Some(100), 10, NearOther)
            .build(NONE, 0, vec![MoveAttr::VariableType { source: TypeSource::Weather }]),
        row(331, "Bullet Seed", T::Grass, Physical, 25, Some(100), 30, NearOther)
            .build(NONE, 0, vec![MoveAttr::MultiHit { min: 2, max: 5 }]),
        row(370, "Close Combat", T::Fighting, Physical, 120, Some(100), 5, NearOther)
            .build(CONTACT, 0, vec![stages(&[S::Def, S::Spd], -1, true, 100)]),
        row(393, "Magnet Rise", T::Electric, Status, 0, None, 10, User)
            .build(NONE, 0, vec![tag(TagKind::MagnetRisen, true, 100)]),
        row(406, "Dragon Pulse", T::Dragon, Special, 85, Some(100), 10, NearOther).build(NONE, 0, vec![]),
        row(479, "Smack Down", T::Rock, Physical, 50, Some(100), 15, NearOther).build(
            NONE,
            0,
            vec![
                MoveAttr::HitsTag { tag: TagKind::Flying, double_damage: false },
                tag(TagKind::SmackedDown, false, 100),
            ],
        ),
        row(480, "Storm Throw", T::Fighting, Physical, 60, Some(100), 10, NearOther)
            .build(CONTACT, 0, vec![MoveAttr::CritOnly { unblockable: false }]),
        row(524, "Frost Breath", T::Ice, Special, 60, Some(90), 10, NearOther)
            .build(NONE, 0, vec![MoveAttr::CritOnly { unblockable: false }]),
        row(573, "Freeze-Dry", T::Ice, Special, 70, Some(100), 20, NearOther).build(
            NONE,
            0,
            vec![
                MoveAttr::TypeChartOverride { against: T::Water, multiplier: 2.0 },
                status(E::Freeze, 10),
            ],
        ),
        row(585, "Moonblast", T::Fairy, Special, 95, Some(100), 15, NearOther)
            .build(NONE, 0, vec![stages(&[S::Spa], -1, false, 30)]),
        row(605, "Dazzling Gleam", T::Fairy, Special, 80, Some(100), 10, AllNearEnemies)
            .build(NONE, 0, vec![]),
        row(614, "Thousand Arrows", T::Ground, Physical, 90, Some(100), 10, AllNearEnemies).build(
            NONE,
            0,
            vec![MoveAttr::HitsAirborne, tag(TagKind::SmackedDown, false, 100)],
        ),
        row(805, "Terrain Pulse", T::Normal, Special, 50, Some(100), 10, NearOther)
            .build(NONE, 0, vec![MoveAttr::VariableType { source: TypeSource::Terrain }]),
        row(897, "Wicked Blow", T::Dark, Physical, 75, Some(100), 5, NearOther).build(
            CONTACT | MoveFlags::PUNCHING,
            0,
            vec![MoveAttr::CritOnly { unblockable: true }],
        ),
    ]
}

fn species(
    id: u16,
    name: &str,
    types: &[Type],
    base_stats: [u16; 6],
    abilities: &[Ability],
) -> SpeciesData {
    SpeciesData {
        id: SpeciesId(id),
        name: name.to_string(),
        types: types.to_vec(),
        base_stats,
        abilities: abilities.to_vec(),
        obtainable: true,
    }
}

fn species_table() -> Vec<SpeciesData> {
    use Ability as A;
    use Type as T;

    let mut missingno = species(0, "MissingNo.", &[T::Normal], [33, 136, 0, 6, 6, 29], &[]);
    missingno.obtainable = false;

    vec![
        missingno,
        species(1, "Bulbasaur", &[T::Grass, T::Poison], [45, 49, 49, 65, 65, 45], &[A::Overgrow, A::Chlorophyll]),
        species(4, "Charmander", &[T::Fire], [39, 52, 43, 60, 50, 65], &[A::Blaze]),
        species(7, "Squirtle", &[T::Water], [44, 48, 65, 50, 64, 43], &[A::Torrent]),
        species(25, "Pikachu", &[T::Electric], [35, 55, 40, 50, 50, 90], &[A::NoAbility]),
        species(59, "Arcanine", &[T::Fire], [90, 110, 80, 100, 80, 95], &[A::FlashFire]),
        species(76, "Golem", &[T::Rock, T::Ground], [80, 120, 130, 55, 65, 45], &[A::Sturdy]),
        species(94, "Gengar", &[T::Ghost, T::Poison], [60, 65, 60, 130, 75, 110], &[A::Levitate]),
        species(130, "Gyarados", &[T::Water, T::Flying], [95, 125, 79, 60, 100, 81], &[A::NoAbility]),
        species(134, "Vaporeon", &[T::Water], [130, 65, 60, 110, 95, 65], &[A::WaterAbsorb]),
        species(135, "Jolteon", &[T::Electric], [65, 65, 60, 110, 95, 130], &[A::VoltAbsorb]),
        species(143, "Snorlax", &[T::Normal], [160, 110, 65, 65, 110, 30], &[A::Immunity]),
        species(149, "Dragonite", &[T::Dragon, T::Flying], [91, 134, 95, 100, 100, 80], &[A::InnerFocus, A::Multiscale]),
        species(150, "Mewtwo", &[T::Psychic], [106, 110, 90, 154, 90, 130], &[A::NoAbility]),
        species(227, "Skarmory", &[T::Steel, T::Flying], [65, 80, 140, 40, 70, 70], &[A::Sturdy]),
        species(292, "Shedinja", &[T::Bug, T::Ghost], [1, 90, 45, 30, 30, 40], &[A::WonderGuard]),
        species(445, "Garchomp", &[T::Dragon, T::Ground], [108, 130, 95, 80, 85, 102], &[A::NoAbility]),
        species(462, "Magnezone", &[T::Electric, T::Steel], [70, 70, 115, 130, 90, 60], &[A::Sturdy]),
        species(468, "Togekiss", &[T::Fairy, T::Flying], [85, 50, 95, 120, 115, 80], &[A::Hustle, A::SuperLuck]),
        species(486, "Regigigas", &[T::Normal], [110, 160, 110, 80, 110, 100], &[A::SlowStart]),
        species(890, "Eternatus", &[T::Poison, T::Dragon], [140, 85, 95, 145, 95, 130], &[A::NoAbility]),
    ]
}

impl Dex {
    /// The built-in catalogue
    pub fn builtin() -> Self {
        let mut dex = Dex::new();
        for data in moves() {
            dex.insert_move(data);
        }
        for data in species_table() {
            dex.insert_species(data);
        }
        dex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struggle_is_present() {
        let dex = Dex::builtin();
        let struggle = dex.get_move(MoveId::STRUGGLE).unwrap();
        assert_eq!(struggle.name, "Struggle");
        assert!(struggle.is_attack());
    }

    #[test]
    fn test_ids_are_unique() {
        let rows = moves();
        let dex = Dex::builtin();
        assert_eq!(dex.move_count(), rows.len());
        assert_eq!(dex.species_count(), species_table().len());
    }

    #[test]
    fn test_one_hit_ko_carries_level_condition() {
        let dex = Dex::builtin();
        let fissure = dex.move_data(MoveId(90));
        assert!(fissure.is_one_hit_ko());
        assert!(fissure.conditions().any(|c| c == MoveCondition::UserLevelAtLeastTarget));
    }
}
