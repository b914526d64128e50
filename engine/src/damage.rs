//! Damage calculation
//!
//! Reads battle state and returns a number; applying it is
//! [`Battle::apply_damage`](crate::battle::Battle::apply_damage)'s job.

use kazam_dex::{
    Ability, MoveAttr, MoveCategory, MoveData, MoveFlags, MoveId, Stat, StatusEffect, TagKind,
    Type,
};

use crate::abilities::{self, DamageHookContext, floor_damage};
use crate::battle::BattleView;
use crate::effectiveness::{self, Effectiveness};
use crate::events::BattleEvent;
use crate::items;
use crate::mode::Mode;
use crate::pipeline::Pipeline;
use crate::power;
use crate::stat_calc::{StatQuery, effective_stat};
use crate::types::{BattlerIndex, Combatant, Side, SideCondition, Terrain};

const SPREAD_MULTIPLIER: f64 = 0.75;
const PARENTAL_BOND_STRIKE: f64 = 0.25;
const DAMAGE_BOOSTER: f64 = 1.05;
const DAMAGE_REDUCER: f64 = 0.975;
const MAX_STAB: f64 = 2.25;

/// One attacker hitting one defender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRequest {
    pub attacker: BattlerIndex,
    pub defender: BattlerIndex,
    pub move_id: MoveId,
    /// Ignore the defender's ability
    pub ignore_ability: bool,
    /// Ignore the attacker's ability
    pub ignore_source_ability: bool,
    /// Ignore the defender's ally's ability
    pub ignore_ally_ability: bool,
    /// Ignore the attacker's ally's ability
    pub ignore_source_ally_ability: bool,
    pub is_critical: bool,
}

impl DamageRequest {
    pub fn new(attacker: BattlerIndex, defender: BattlerIndex, move_id: MoveId) -> Self {
        Self {
            attacker,
            defender,
            move_id,
            ignore_ability: false,
            ignore_source_ability: false,
            ignore_ally_ability: false,
            ignore_source_ally_ability: false,
            is_critical: false,
        }
    }

    pub fn critical(mut self, is_critical: bool) -> Self {
        self.is_critical = is_critical;
        self
    }
}

/// How a hit landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    Effective,
    SuperEffective,
    NotVeryEffective,
    /// The defender's typing or the field made the hit do nothing
    NoEffect,
    /// A one-hit KO move that could not affect the defender
    Immune,
    OneHitKo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// An ability stopped the move entirely
    pub cancelled: bool,
    pub outcome: HitOutcome,
    pub amount: u32,
}

impl DamageResult {
    fn none(cancelled: bool, outcome: HitOutcome) -> Self {
        Self {
            cancelled,
            outcome,
            amount: 0,
        }
    }
}

/// Damage a move would deal.
///
/// In order: immunity and cancellation, fixed damage, one-hit KO, then the
/// standard formula with every multiplier floored once, then the
/// attacker's boost, party modifiers and the defender's reductions.
pub fn compute_damage(
    view: &BattleView<'_>,
    request: &DamageRequest,
    mode: &mut Mode<'_>,
) -> DamageResult {
    let data = view.dex.move_data(request.move_id);
    compute_damage_with(view, request, &data, mode)
}

pub(crate) fn compute_damage_with(
    view: &BattleView<'_>,
    request: &DamageRequest,
    data: &MoveData,
    mode: &mut Mode<'_>,
) -> DamageResult {
    let DamageRequest {
        attacker,
        defender,
        ..
    } = *request;
    let source = view.mon(attacker);
    let target = view.mon(defender);
    let broken = view.breaks_abilities(attacker, data);
    let source_ability = if request.ignore_source_ability {
        Ability::NoAbility
    } else {
        view.ability(attacker, false)
    };
    let target_ability = if request.ignore_ability {
        Ability::NoAbility
    } else {
        view.ability(defender, broken)
    };

    let move_type = power::move_type(view, attacker, data);
    let Effectiveness {
        multiplier: type_multiplier,
        cancelled,
    } = effectiveness::move_effectiveness(
        view,
        attacker,
        defender,
        data,
        request.ignore_ability,
        mode,
    );

    let arena_multiplier = field_multiplier(view, attacker, move_type);
    if cancelled || type_multiplier * arena_multiplier == 0.0 {
        let outcome = if data.is_one_hit_ko() {
            HitOutcome::Immune
        } else {
            HitOutcome::NoEffect
        };
        return DamageResult::none(cancelled, outcome);
    }

    let targets = view.move_targets(attacker, data.target);
    let spread_targets = if targets.multiple {
        targets
            .targets
            .iter()
            .filter(|&&t| !view.is_ally(attacker, t))
            .count()
    } else {
        1
    };

    if let Some(fixed) = fixed_damage(source.level, target.hp, data) {
        let mut scale = 1.0;
        if items::can_multi_strike(data, spread_targets) {
            scale = items::multi_lens_multiplier(source).unwrap_or(1.0);
        }
        return DamageResult {
            cancelled: false,
            outcome: HitOutcome::Effective,
            amount: floor_damage(fixed as f64 * scale) as u32,
        };
    }

    if data.is_one_hit_ko() {
        if target_ability == Ability::Sturdy {
            mode.emit(BattleEvent::AbilityRevealed {
                battler: defender,
                ability: target_ability,
            });
            return DamageResult::none(true, HitOutcome::NoEffect);
        }
        return DamageResult {
            cancelled: false,
            outcome: HitOutcome::OneHitKo,
            amount: target.hp,
        };
    }

    let power = power::move_power(view, attacker, data);
    let physical = data.category == MoveCategory::Physical;
    let (atk_stat, def_stat) = if physical {
        (Stat::Atk, Stat::Def)
    } else {
        (Stat::Spa, Stat::Spd)
    };
    let attack = effective_stat(
        view,
        attacker,
        atk_stat,
        &StatQuery {
            opponent: Some(defender),
            move_data: None,
            ignore_ability: request.ignore_source_ability,
            ignore_opponent_ability: request.ignore_ability,
            ignore_ally_ability: request.ignore_source_ally_ability,
            break_holder_ability: false,
            break_opponent_ability: broken,
            is_critical: request.is_critical,
        },
    ) as f64;
    let defense = effective_stat(
        view,
        defender,
        def_stat,
        &StatQuery {
            opponent: Some(attacker),
            move_data: Some(data),
            ignore_ability: request.ignore_ability,
            ignore_opponent_ability: request.ignore_source_ability,
            ignore_ally_ability: request.ignore_ally_ability,
            break_holder_ability: broken,
            break_opponent_ability: false,
            is_critical: request.is_critical,
        },
    )
    .max(1) as f64;

    let level = source.level as f64;
    let base = ((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0;

    let spread = if spread_targets > 1 {
        SPREAD_MULTIPLIER
    } else {
        1.0
    };

    let mut multi_strike = 1.0;
    if items::can_multi_strike(data, spread_targets) {
        if let Some(lens) = items::multi_lens_multiplier(source) {
            multi_strike *= lens;
        }
        if source_ability == Ability::ParentalBond
            && source.turn.hit_count > 1
            && source.turn.hits_left == 1
        {
            multi_strike = PARENTAL_BOND_STRIKE;
        }
    }

    let double_damage = if target.has_tag(TagKind::ReceiveDoubleDamage) {
        2.0
    } else {
        1.0
    };
    let critical = abilities::crit_multiplier(source_ability, request.is_critical);
    let random = mode.roll_range(85, 100, 100) as f64 / 100.0;
    let stab = stab_multiplier(source, source_ability, move_type);
    let burn = burn_multiplier(source, source_ability, data, physical);
    let screen = screen_multiplier(view, target.side, data.category, source_ability, request);
    let hits_tag = hits_tag_multiplier(data, target);
    let misty = if move_type == Type::Dragon
        && view.field.terrain == Some(Terrain::Misty)
        && view.is_grounded(defender)
    {
        0.5
    } else {
        1.0
    };

    let mut damage = floor_damage(
        base * spread
            * multi_strike
            * arena_multiplier
            * double_damage
            * critical
            * random
            * stab
            * type_multiplier
            * burn
            * screen
            * hits_tag
            * misty,
    );

    let boost = abilities::damage_boost(source_ability, type_multiplier);
    if boost != 1.0 {
        damage = floor_damage(damage * boost);
    }

    let attacker_mods = &view.field.side(source.side).modifiers;
    if source.side == Side::Enemy && attacker_mods.damage_booster > 0 {
        damage = floor_damage(damage * DAMAGE_BOOSTER.powi(attacker_mods.damage_booster as i32));
    }
    let defender_mods = &view.field.side(target.side).modifiers;
    if target.side == Side::Enemy && defender_mods.damage_reducer > 0 {
        damage = floor_damage(damage * DAMAGE_REDUCER.powi(defender_mods.damage_reducer as i32));
    }

    if !request.ignore_ability {
        let ally_ability = if request.ignore_ally_ability {
            None
        } else {
            view.ally(defender).map(|a| view.ability(a, broken))
        };
        let mut pipeline = Pipeline::new();
        abilities::push_damage_hooks(
            &mut pipeline,
            target_ability,
            ally_ability,
            DamageHookContext {
                effectiveness: type_multiplier,
                defender_full_hp: target.is_full_hp(),
                contact: data.has_flag(MoveFlags::MAKES_CONTACT),
                move_type,
            },
        );
        damage = pipeline.run(damage).value;
    }

    let mut amount = damage as u32;
    if data.attrs().any(|a| matches!(a, MoveAttr::SurviveDamage)) {
        amount = amount.min(target.hp.saturating_sub(1));
    }

    if !mode.is_simulated() {
        tracing::debug!(
            attacker = %attacker,
            defender = %defender,
            move_name = %data.name,
            power,
            attack,
            defense,
            random,
            amount,
            "damage computed"
        );
    }

    DamageResult {
        cancelled: false,
        outcome: outcome_for(type_multiplier),
        amount,
    }
}

/// Weather and terrain multiplier for the attacker's move type
fn field_multiplier(view: &BattleView<'_>, attacker: BattlerIndex, move_type: Type) -> f64 {
    let weather = view
        .weather()
        .map_or(1.0, |w| w.attack_multiplier(move_type));
    let terrain = match view.field.terrain {
        Some(terrain) if view.is_grounded(attacker) => terrain.attack_multiplier(move_type),
        _ => 1.0,
    };
    weather * terrain
}

/// Damage of a fixed-damage move, if this is one
fn fixed_damage(user_level: u8, target_hp: u32, data: &MoveData) -> Option<u32> {
    data.attrs().find_map(|attr| match attr {
        MoveAttr::FixedDamage { damage } => Some(*damage),
        MoveAttr::LevelDamage => Some(user_level as u32),
        MoveAttr::TargetHalfHpDamage => Some((target_hp / 2).max(1)),
        _ => None,
    })
}

fn stab_multiplier(
    source: &Combatant,
    ability: Ability,
    move_type: Type,
) -> f64 {
    let matches_type = source.base_types().contains(&move_type);
    let mut stab = 1.0;
    if matches_type && move_type != Type::Stellar {
        stab += 0.5;
    }
    stab = abilities::stab_bonus(ability, stab);
    match source.active_tera() {
        Some(Type::Stellar) => stab += if matches_type { 0.5 } else { 0.2 },
        Some(tera) if tera == move_type => stab += 0.5,
        _ => {}
    }
    stab.min(MAX_STAB)
}

fn burn_multiplier(
    source: &Combatant,
    ability: Ability,
    data: &MoveData,
    physical: bool,
) -> f64 {
    let bypass = data
        .attrs()
        .any(|a| matches!(a, MoveAttr::BypassBurnReduction))
        || abilities::bypasses_burn(ability);
    if physical && source.has_status(StatusEffect::Burn) && !bypass {
        0.5
    } else {
        1.0
    }
}

/// Reflect, Light Screen and Aurora Veil on the defending side. Critical
/// hits and Infiltrator go through.
fn screen_multiplier(
    view: &BattleView<'_>,
    defending: Side,
    category: MoveCategory,
    source_ability: Ability,
    request: &DamageRequest,
) -> f64 {
    if request.is_critical || abilities::bypasses_screens(source_ability) {
        return 1.0;
    }
    let side = view.field.side(defending);
    let screened = side.has(SideCondition::AuroraVeil)
        || match category {
            MoveCategory::Physical => side.has(SideCondition::Reflect),
            MoveCategory::Special => side.has(SideCondition::LightScreen),
            MoveCategory::Status => false,
        };
    match (screened, view.field.double) {
        (false, _) => 1.0,
        (true, true) => 2732.0 / 4096.0,
        (true, false) => 0.5,
    }
}

fn hits_tag_multiplier(data: &MoveData, target: &Combatant) -> f64 {
    data.attrs()
        .filter_map(|a| match a {
            MoveAttr::HitsTag {
                tag,
                double_damage: true,
            } if target.has_tag(*tag) => Some(2.0),
            _ => None,
        })
        .product()
}

fn outcome_for(multiplier: f64) -> HitOutcome {
    if multiplier < 1.0 {
        HitOutcome::NotVeryEffective
    } else if multiplier > 1.0 {
        HitOutcome::SuperEffective
    } else {
        HitOutcome::Effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleConfig};
    use crate::types::{CombatantSpec, Status, Tag, Weather};
    use kazam_dex::{Dex, ItemKind, SpeciesId};

    const P: BattlerIndex = BattlerIndex(0);
    const E: BattlerIndex = BattlerIndex(1);

    fn duel(player: CombatantSpec, enemy: CombatantSpec) -> Battle {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        battle.add_combatant(player).unwrap();
        battle.add_combatant(enemy).unwrap();
        battle
    }

    fn spec(species: u16, side: Side) -> CombatantSpec {
        CombatantSpec::new(SpeciesId(species), 50, side)
    }

    fn simulate(battle: &Battle, move_id: u16) -> DamageResult {
        battle
            .simulate_damage(DamageRequest::new(P, E, MoveId(move_id)))
            .unwrap()
    }

    #[test]
    fn test_known_value() {
        // Pikachu Thunderbolt into Snorlax, max roll, no crit, STAB only
        let battle = duel(spec(25, Side::Player), spec(143, Side::Enemy));
        let view = battle.view();
        let atk = view.mon(P).stat(Stat::Spa) as f64;
        let def = view.mon(E).stat(Stat::Spd) as f64;
        let base = (22.0 * 90.0 * atk / def) / 50.0 + 2.0;
        let expected = (base * 1.5).floor() as u32;
        let result = simulate(&battle, 85);
        assert_eq!(result.amount, expected);
        assert_eq!(result.outcome, HitOutcome::Effective);
    }

    #[test]
    fn test_immune_returns_zero() {
        let battle = duel(spec(445, Side::Player), spec(130, Side::Enemy));
        let result = simulate(&battle, 89);
        assert_eq!(result.amount, 0);
        assert_eq!(result.outcome, HitOutcome::NoEffect);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_live_immunity_skips_the_roll() {
        // Garchomp into Gyarados: Earthquake and Fissure both miss a Flying type
        let mut battle = duel(spec(445, Side::Player), spec(130, Side::Enemy));
        let quake = battle
            .compute_damage(DamageRequest::new(P, E, MoveId(89)))
            .unwrap();
        assert_eq!(quake.amount, 0);
        assert_eq!(quake.outcome, HitOutcome::NoEffect);
        let fissure = battle
            .compute_damage(DamageRequest::new(P, E, MoveId(90)))
            .unwrap();
        assert_eq!(fissure.amount, 0);
        assert_eq!(fissure.outcome, HitOutcome::Immune);
        assert_eq!(battle.rng().draws(), 0);

        // Sturdy turns a one-hit KO away before any roll too
        let mut battle = duel(spec(445, Side::Player), spec(76, Side::Enemy));
        let fissure = battle
            .compute_damage(DamageRequest::new(P, E, MoveId(90)))
            .unwrap();
        assert!(fissure.cancelled);
        assert_eq!(battle.rng().draws(), 0);
    }

    #[test]
    fn test_stab_values_and_cap() {
        let battle = duel(spec(25, Side::Player), spec(143, Side::Enemy));
        let pikachu = battle.combatant(P).unwrap().clone();

        assert_eq!(stab_multiplier(&pikachu, Ability::NoAbility, Type::Normal), 1.0);
        assert_eq!(stab_multiplier(&pikachu, Ability::NoAbility, Type::Electric), 1.5);
        assert_eq!(stab_multiplier(&pikachu, Ability::Adaptability, Type::Electric), 2.0);
        assert_eq!(stab_multiplier(&pikachu, Ability::Adaptability, Type::Normal), 1.0);

        let mut tera = pikachu.clone();
        tera.tera_type = Some(Type::Electric);
        tera.terastallized = true;
        assert_eq!(stab_multiplier(&tera, Ability::NoAbility, Type::Electric), 2.0);
        assert_eq!(stab_multiplier(&tera, Ability::Adaptability, Type::Electric), MAX_STAB);

        // A new Tera type only earns the plain bonus
        tera.tera_type = Some(Type::Water);
        assert_eq!(stab_multiplier(&tera, Ability::NoAbility, Type::Water), 1.5);
        assert_eq!(stab_multiplier(&tera, Ability::NoAbility, Type::Electric), 1.5);

        tera.tera_type = Some(Type::Stellar);
        assert_eq!(stab_multiplier(&tera, Ability::NoAbility, Type::Electric), 2.0);
        assert_eq!(stab_multiplier(&tera, Ability::NoAbility, Type::Normal), 1.2);
        assert_eq!(stab_multiplier(&tera, Ability::Adaptability, Type::Electric), MAX_STAB);
    }

    #[test]
    fn test_ability_cancel_flags_result() {
        let battle = duel(spec(25, Side::Player), spec(135, Side::Enemy));
        let result = simulate(&battle, 85);
        assert!(result.cancelled);
        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_fixed_damage_ignores_stats() {
        let battle = duel(spec(25, Side::Player), spec(143, Side::Enemy));
        assert_eq!(simulate(&battle, 49).amount, 20);
        assert_eq!(simulate(&battle, 82).amount, 40);
        // Seismic Toss deals the user's level
        assert_eq!(simulate(&battle, 69).amount, 50);
    }

    #[test]
    fn test_fixed_damage_still_respects_immunity() {
        // Night Shade into a Normal type
        let battle = duel(spec(94, Side::Player), spec(143, Side::Enemy));
        assert_eq!(simulate(&battle, 101).amount, 0);
    }

    #[test]
    fn test_multi_lens_scales_fixed_damage() {
        let battle = duel(
            spec(25, Side::Player).item(ItemKind::MultiLens, 1),
            spec(143, Side::Enemy),
        );
        // First strike of a lens-boosted move deals 75%
        assert_eq!(simulate(&battle, 49).amount, 15);
    }

    #[test]
    fn test_one_hit_ko() {
        let battle = duel(spec(445, Side::Player), spec(143, Side::Enemy));
        let result = simulate(&battle, 90);
        assert_eq!(result.outcome, HitOutcome::OneHitKo);
        assert_eq!(result.amount, battle.view().mon(E).hp);

        let battle = duel(spec(445, Side::Player), spec(76, Side::Enemy));
        let result = simulate(&battle, 90);
        assert!(result.cancelled);
        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_burn_halves_physical() {
        let mut battle = duel(spec(143, Side::Player), spec(143, Side::Enemy));
        let healthy = simulate(&battle, 34).amount;
        battle.combatant_mut(P).unwrap().status = Some(Status::Burn);
        let burned = simulate(&battle, 34).amount;
        assert!(burned < healthy);
        assert!(burned >= healthy / 2 - 1 && burned <= healthy / 2 + 1);
        // Facade ignores the burn penalty
        assert!(simulate(&battle, 263).amount > burned);
    }

    #[test]
    fn test_screens_and_crits() {
        let mut battle = duel(spec(143, Side::Player), spec(143, Side::Enemy));
        let open = simulate(&battle, 34).amount;
        battle.field.side_mut(Side::Enemy).add(SideCondition::Reflect, 5);
        let screened = simulate(&battle, 34).amount;
        assert!(screened < open);
        let crit = battle
            .simulate_damage(DamageRequest::new(P, E, MoveId(34)).critical(true))
            .unwrap()
            .amount;
        assert!(crit > open);
    }

    #[test]
    fn test_weather_boost_and_primal_cancel() {
        let mut battle = duel(spec(4, Side::Player), spec(143, Side::Enemy));
        let neutral = simulate(&battle, 53).amount;
        battle.field.weather = Some(Weather::Sun);
        assert!(simulate(&battle, 53).amount > neutral);
        battle.field.weather = Some(Weather::HeavyRain);
        let result = simulate(&battle, 53);
        assert_eq!(result.amount, 0);
        assert_eq!(result.outcome, HitOutcome::NoEffect);
    }

    #[test]
    fn test_hits_tag_double_damage() {
        let mut battle = duel(spec(143, Side::Player), spec(130, Side::Enemy));
        let grounded = simulate(&battle, 16).amount;
        battle
            .combatant_mut(E)
            .unwrap()
            .summon
            .tags
            .push(Tag::new(TagKind::Flying));
        assert!(simulate(&battle, 16).amount > grounded);
    }

    #[test]
    fn test_false_swipe_leaves_one_hp() {
        let mut battle = duel(spec(150, Side::Player), spec(25, Side::Enemy));
        battle.combatant_mut(E).unwrap().hp = 5;
        assert_eq!(simulate(&battle, 206).amount, 4);
    }

    #[test]
    fn test_multiscale_halves_at_full_hp() {
        let mut battle = duel(
            spec(143, Side::Player),
            spec(149, Side::Enemy).ability_index(1),
        );
        let full = simulate(&battle, 58).amount;
        let mon = battle.combatant_mut(E).unwrap();
        mon.hp -= 1;
        let hurt = simulate(&battle, 58).amount;
        assert!(full < hurt);

        let ignoring = DamageRequest {
            ignore_ability: true,
            ..DamageRequest::new(P, E, MoveId(58))
        };
        battle.combatant_mut(E).unwrap().hp += 1;
        assert_eq!(battle.simulate_damage(ignoring).unwrap().amount, hurt);
    }

    #[test]
    fn test_enemy_party_modifiers() {
        let mut battle = duel(spec(143, Side::Player), spec(143, Side::Enemy));
        let base = simulate(&battle, 34).amount;
        battle.field.side_mut(Side::Enemy).modifiers.damage_reducer = 4;
        assert!(simulate(&battle, 34).amount < base);
    }

    #[test]
    fn test_live_damage_rolls_once() {
        let mut battle = duel(spec(25, Side::Player), spec(143, Side::Enemy));
        let max = simulate(&battle, 85).amount;
        let live = battle
            .compute_damage(DamageRequest::new(P, E, MoveId(85)))
            .unwrap()
            .amount;
        assert!(live <= max);
        assert!(live as f64 >= (max as f64 * 0.85).floor() - 1.0);
        assert_eq!(battle.rng().draws(), 1);
    }
}
