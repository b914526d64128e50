//! Ability effects
//!
//! Each function registers the hooks one ability contributes to a
//! [`Pipeline`]. Callers decide which combatant's ability applies and
//! whether it is suppressed; these only encode what the ability does.

use kazam_dex::{Ability, MoveData, MoveFlags, Stat, StatusEffect, TagKind, Type};

use crate::pipeline::{Flow, Pipeline, Scope};
use crate::types::{Combatant, Weather};

/// The stat a Ruin ability lowers for everyone else
pub(crate) fn ruin_stat(ability: Ability) -> Option<Stat> {
    match ability {
        Ability::TabletsOfRuin => Some(Stat::Atk),
        Ability::SwordOfRuin => Some(Stat::Def),
        Ability::VesselOfRuin => Some(Stat::Spa),
        Ability::BeadsOfRuin => Some(Stat::Spd),
        _ => None,
    }
}

/// Field-wide stat hooks from one combatant's ability.
///
/// A Ruin ability lowers `stat` on every combatant that does not hold the
/// same Ruin ability. The first one to apply claims the field scope.
pub(crate) fn push_field_stat_hooks(
    pipeline: &mut Pipeline<'_, f64>,
    source: Ability,
    checked: Ability,
    stat: Stat,
) {
    if ruin_stat(source) != Some(stat) {
        return;
    }
    let holds_same = ruin_stat(checked) == Some(stat);
    pipeline.push(Scope::Field, move |value| {
        if holds_same {
            return Flow::Continue;
        }
        *value *= 0.75;
        Flow::Claim
    });
}

/// The holder's own stat multipliers
pub(crate) fn push_own_stat_hooks(
    pipeline: &mut Pipeline<'_, f64>,
    ability: Ability,
    holder: &Combatant,
    stat: Stat,
    weather: Option<Weather>,
) {
    let multiplier = match (ability, stat) {
        (Ability::HugePower | Ability::PurePower, Stat::Atk) => 2.0,
        (Ability::Hustle, Stat::Atk) => 1.5,
        (Ability::Guts, Stat::Atk) if holder.status.is_some() => 1.5,
        (Ability::SwiftSwim, Stat::Spe) if weather.is_some_and(|w| w.is_rainy()) => 2.0,
        (Ability::Chlorophyll, Stat::Spe) if weather.is_some_and(|w| w.is_sunny()) => 2.0,
        (Ability::SandRush, Stat::Spe) if weather == Some(Weather::Sand) => 2.0,
        (Ability::SlushRush, Stat::Spe)
            if matches!(weather, Some(Weather::Hail | Weather::Snow)) =>
        {
            2.0
        }
        (Ability::FlowerGift, Stat::Atk | Stat::Spd) if weather.is_some_and(|w| w.is_sunny()) => {
            1.5
        }
        _ => return,
    };
    pipeline.push(Scope::Own, move |value| {
        *value *= multiplier;
        Flow::Continue
    });
}

/// Stat multipliers an ally's ability lends the holder
pub(crate) fn push_ally_stat_hooks(
    pipeline: &mut Pipeline<'_, f64>,
    ally_ability: Ability,
    stat: Stat,
    weather: Option<Weather>,
) {
    if ally_ability == Ability::FlowerGift
        && matches!(stat, Stat::Atk | Stat::Spd)
        && weather.is_some_and(|w| w.is_sunny())
    {
        pipeline.push(Scope::Ally, |value| {
            *value *= 1.5;
            Flow::Continue
        });
    }
}

/// Whether this ability ignores an opponent's stages for `stat`
pub(crate) fn ignores_opponent_stages(ability: Ability, stat: Stat) -> bool {
    ability == Ability::Unaware && stat != Stat::Spe && stat != Stat::Hp
}

/// Defender abilities that cancel an incoming move outright.
///
/// `multiplier` is the type multiplier computed so far; Wonder Guard reads
/// it. A cancelling hook zeroes the value.
pub(crate) fn push_immunity_hooks(
    pipeline: &mut Pipeline<'_, f64>,
    ability: Ability,
    data: &MoveData,
    move_type: Type,
    defender_grounded: bool,
) {
    let is_attack = data.is_attack();
    let sound = data.has_flag(MoveFlags::SOUND_BASED);
    let hits_airborne = data
        .attrs()
        .any(|a| matches!(a, kazam_dex::MoveAttr::HitsAirborne));
    let blocked = move |value: &f64| match ability {
        Ability::Levitate => move_type == Type::Ground && !defender_grounded && !hits_airborne,
        Ability::VoltAbsorb => move_type == Type::Electric,
        Ability::WaterAbsorb => move_type == Type::Water,
        Ability::FlashFire => move_type == Type::Fire,
        Ability::WonderGuard => is_attack && *value < 2.0,
        Ability::Soundproof => sound,
        _ => false,
    };
    pipeline.push(Scope::Own, move |value| {
        if blocked(value) {
            *value = 0.0;
            Flow::Cancel
        } else {
            Flow::Continue
        }
    });
}

/// Type-chart immunities the attacker's ability lets it hit through
pub(crate) fn ignores_type_immunity(ability: Ability, move_type: Type, defender_type: Type) -> bool {
    ability == Ability::Scrappy
        && defender_type == Type::Ghost
        && matches!(move_type, Type::Normal | Type::Fighting)
}

/// Power multiplier from the attacker's own ability
pub(crate) fn power_multiplier(
    ability: Ability,
    holder: &Combatant,
    move_type: Type,
    base_power: f64,
) -> f64 {
    match ability {
        Ability::Technician if base_power <= 60.0 => 1.5,
        _ => match ability.pinch_type() {
            Some(t) if t == move_type && holder.hp * 3 <= holder.max_hp() => 1.5,
            _ => 1.0,
        },
    }
}

/// Type an ability converts a move into, and the power bonus that comes
/// with the conversion
pub(crate) fn type_change(ability: Ability, base_type: Type, variable: bool) -> Option<(Type, f64)> {
    if variable {
        return None;
    }
    match ability {
        Ability::Normalize => Some((Type::Normal, 1.2)),
        _ => match ability.ate_type() {
            Some(t) if base_type == Type::Normal => Some((t, 1.2)),
            _ => None,
        },
    }
}

/// STAB after the attacker's ability
pub(crate) fn stab_bonus(ability: Ability, stab: f64) -> f64 {
    if ability == Ability::Adaptability && stab > 1.0 {
        stab + 0.5
    } else {
        stab
    }
}

/// Critical-hit multiplier after the attacker's ability
pub(crate) fn crit_multiplier(ability: Ability, is_critical: bool) -> f64 {
    match (is_critical, ability) {
        (false, _) => 1.0,
        (true, Ability::Sniper) => 2.25,
        (true, _) => 1.5,
    }
}

/// Damage multiplier the attacker's ability applies after the main formula
pub(crate) fn damage_boost(attacker: Ability, effectiveness: f64) -> f64 {
    if attacker == Ability::TintedLens && effectiveness < 1.0 {
        2.0
    } else {
        1.0
    }
}

/// Defensive damage hooks: the defender's ability, then its ally's
pub(crate) fn push_damage_hooks(
    pipeline: &mut Pipeline<'_, f64>,
    defender: Ability,
    defender_ally: Option<Ability>,
    context: DamageHookContext,
) {
    let defend = match defender {
        Ability::Multiscale | Ability::ShadowShield if context.defender_full_hp => 0.5,
        Ability::Filter | Ability::SolidRock | Ability::PrismArmor
            if context.effectiveness >= 2.0 =>
        {
            0.75
        }
        Ability::Fluffy => {
            let mut m = 1.0;
            if context.contact {
                m *= 0.5;
            }
            if context.move_type == Type::Fire {
                m *= 2.0;
            }
            m
        }
        _ => 1.0,
    };
    if defend != 1.0 {
        pipeline.push(Scope::Own, move |value| {
            *value = floor_damage(*value * defend);
            Flow::Continue
        });
    }

    if defender_ally == Some(Ability::FriendGuard) {
        pipeline.push(Scope::Ally, |value| {
            *value = floor_damage(*value * 0.75);
            Flow::Continue
        });
    }
}

/// Inputs the post-formula damage hooks read
#[derive(Debug, Clone, Copy)]
pub(crate) struct DamageHookContext {
    pub effectiveness: f64,
    pub defender_full_hp: bool,
    pub contact: bool,
    pub move_type: Type,
}

/// Whether the attacker's ability lets a burned user hit at full power
pub(crate) fn bypasses_burn(ability: Ability) -> bool {
    ability == Ability::Guts
}

/// Whether a critical hit is forced by the attacker's ability
pub(crate) fn forces_crit(ability: Ability, target: &Combatant) -> bool {
    ability == Ability::Merciless && target.status_effect().is_some_and(|s| s.is_poison())
}

pub(crate) fn blocks_crit(ability: Ability) -> bool {
    matches!(ability, Ability::BattleArmor | Ability::ShellArmor)
}

pub(crate) fn bonus_crit_stages(ability: Ability) -> u8 {
    u8::from(ability == Ability::SuperLuck)
}

/// Whether an attacker's ability bypasses a poison immunity of `defender_type`
pub(crate) fn ignores_status_immunity(
    ability: Ability,
    effect: StatusEffect,
    defender_type: Type,
) -> bool {
    ability == Ability::Corrosion
        && effect.is_poison()
        && matches!(defender_type, Type::Poison | Type::Steel)
}

/// Whether the holder's ability blocks a status on itself
pub(crate) fn blocks_own_status(
    ability: Ability,
    effect: StatusEffect,
    weather: Option<Weather>,
) -> bool {
    if ability == Ability::LeafGuard {
        return effect != StatusEffect::Faint && weather.is_some_and(|w| w.is_sunny());
    }
    ability.blocks_status(effect)
}

/// Whether the holder's ability blocks a tag on itself
pub(crate) fn blocks_own_tag(ability: Ability, tag: TagKind, weather: Option<Weather>) -> bool {
    match ability {
        Ability::OwnTempo => tag == TagKind::Confused,
        Ability::Oblivious => matches!(tag, TagKind::Infatuated | TagKind::Taunt),
        Ability::InnerFocus => tag == TagKind::Flinched,
        Ability::Insomnia | Ability::VitalSpirit | Ability::SweetVeil => tag == TagKind::Drowsy,
        Ability::LeafGuard => tag == TagKind::Drowsy && weather.is_some_and(|w| w.is_sunny()),
        _ => blocks_ally_tag(ability, tag),
    }
}

/// Whether an ability shields its whole side from a tag
pub(crate) fn blocks_ally_tag(ability: Ability, tag: TagKind) -> bool {
    match ability {
        Ability::AromaVeil => matches!(
            tag,
            TagKind::Taunt | TagKind::Encore | TagKind::Disabled | TagKind::Infatuated
        ),
        Ability::SweetVeil => tag == TagKind::Drowsy,
        _ => false,
    }
}

pub(crate) fn bypasses_screens(ability: Ability) -> bool {
    ability == Ability::Infiltrator
}

/// Floor a damage value, keeping at least 1
pub(crate) fn floor_damage(value: f64) -> f64 {
    value.floor().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kazam_dex::{Dex, MoveId};

    #[test]
    fn test_ruin_claims_field_scope() {
        let mut pipeline = Pipeline::new();
        push_field_stat_hooks(&mut pipeline, Ability::TabletsOfRuin, Ability::NoAbility, Stat::Atk);
        push_field_stat_hooks(&mut pipeline, Ability::TabletsOfRuin, Ability::NoAbility, Stat::Atk);
        assert_eq!(pipeline.run(100.0).value, 75.0);
    }

    #[test]
    fn test_ruin_skips_same_holder() {
        let mut pipeline = Pipeline::new();
        push_field_stat_hooks(
            &mut pipeline,
            Ability::TabletsOfRuin,
            Ability::TabletsOfRuin,
            Stat::Atk,
        );
        assert_eq!(pipeline.run(100.0).value, 100.0);
    }

    #[test]
    fn test_volt_absorb_cancels() {
        let dex = Dex::builtin();
        let thunderbolt = dex.move_data(MoveId(85));
        let mut pipeline = Pipeline::new();
        push_immunity_hooks(&mut pipeline, Ability::VoltAbsorb, &thunderbolt, Type::Electric, true);
        let applied = pipeline.run(1.0);
        assert!(applied.cancelled);
        assert_eq!(applied.value, 0.0);
    }

    #[test]
    fn test_wonder_guard_reads_multiplier() {
        let dex = Dex::builtin();
        let tackle = dex.move_data(MoveId(33));
        let mut pipeline = Pipeline::new();
        push_immunity_hooks(&mut pipeline, Ability::WonderGuard, &tackle, Type::Dark, true);
        assert!(!pipeline.run(2.0).cancelled);

        let mut pipeline = Pipeline::new();
        push_immunity_hooks(&mut pipeline, Ability::WonderGuard, &tackle, Type::Normal, true);
        assert!(pipeline.run(1.0).cancelled);
    }

    #[test]
    fn test_type_change() {
        assert_eq!(
            type_change(Ability::Pixilate, Type::Normal, false),
            Some((Type::Fairy, 1.2))
        );
        assert_eq!(type_change(Ability::Pixilate, Type::Fire, false), None);
        assert_eq!(type_change(Ability::Pixilate, Type::Normal, true), None);
        assert_eq!(
            type_change(Ability::Normalize, Type::Fire, false),
            Some((Type::Normal, 1.2))
        );
    }

    #[test]
    fn test_damage_hooks_floor_each_step() {
        let mut pipeline = Pipeline::new();
        push_damage_hooks(
            &mut pipeline,
            Ability::Multiscale,
            Some(Ability::FriendGuard),
            DamageHookContext {
                effectiveness: 1.0,
                defender_full_hp: true,
                contact: false,
                move_type: Type::Normal,
            },
        );
        // 101 -> 50 -> 37
        assert_eq!(pipeline.run(101.0).value, 37.0);
    }
}
