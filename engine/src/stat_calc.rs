//! Effective stat calculation

use kazam_dex::{MoveData, MoveFlags, Stat, StatusEffect, TagKind, Type};

use crate::abilities;
use crate::battle::BattleView;
use crate::items;
use crate::pipeline::Pipeline;
use crate::types::{BattlerIndex, SideCondition, Weather, stage_multiplier};
use crate::types::stats::MAX_STAGE_MULTIPLIER;

/// Bonus a temporary stage booster adds to the stage multiplier
const TEMP_BOOST: f64 = 0.3;

/// Who is asking for a stat, and what may be ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct StatQuery<'m> {
    /// The other side of the matchup, when there is one
    pub opponent: Option<BattlerIndex>,
    /// The move being used against the holder
    pub move_data: Option<&'m MoveData>,
    pub ignore_ability: bool,
    pub ignore_opponent_ability: bool,
    pub ignore_ally_ability: bool,
    /// The holder's breakable ability is switched off (opposing Mold Breaker)
    pub break_holder_ability: bool,
    /// The opponent's breakable ability is switched off
    pub break_opponent_ability: bool,
    pub is_critical: bool,
}

impl<'m> StatQuery<'m> {
    pub fn against(opponent: BattlerIndex) -> Self {
        Self {
            opponent: Some(opponent),
            ..Self::default()
        }
    }
}

/// Stat value used in battle: permanent stat, then item, field, own and
/// ally hooks, then stat stages, then the fixed special cases. Floored.
pub fn effective_stat(
    view: &BattleView<'_>,
    holder: BattlerIndex,
    stat: Stat,
    query: &StatQuery<'_>,
) -> u32 {
    let mon = view.mon(holder);
    let weather = view.weather();

    let mut pipeline: Pipeline<'_, f64> = Pipeline::new();
    items::push_stat_hooks(&mut pipeline, mon, stat);
    for source in view.indices().filter(|&i| view.mon(i).is_active()) {
        abilities::push_field_stat_hooks(&mut pipeline, view.mon(source).ability, mon.ability, stat);
    }
    if !query.ignore_ability {
        let ability = view.ability(holder, query.break_holder_ability);
        abilities::push_own_stat_hooks(&mut pipeline, ability, mon, stat, weather);
    }
    if let Some(ally) = view.ally(holder) {
        let ignore = query.ignore_ally_ability
            || query
                .move_data
                .is_some_and(|m| m.has_flag(MoveFlags::IGNORE_ABILITIES));
        if !ignore {
            abilities::push_ally_stat_hooks(&mut pipeline, view.ability(ally, false), stat, weather);
        }
    }
    let base = pipeline.run(mon.stat(stat) as f64).value;

    let mut value = base * stage_factor(view, holder, stat, query);

    match stat {
        Stat::Atk => {
            if mon.has_tag(TagKind::SlowStart) {
                value = (value / 2.0).floor();
            }
        }
        Stat::Def => {
            if mon.is_of_type(Type::Ice) && weather == Some(Weather::Snow) {
                value *= 1.5;
            }
        }
        Stat::Spd => {
            if mon.is_of_type(Type::Rock) && weather == Some(Weather::Sand) {
                value *= 1.5;
            }
        }
        Stat::Spe => {
            let side = view.field.side(mon.side);
            if side.has(SideCondition::Tailwind) {
                value *= 2.0;
            }
            if side.has(SideCondition::Swamp) {
                value = (value / 4.0).floor();
            }
            if mon.has_tag(TagKind::SlowStart) {
                value = (value / 2.0).floor();
            }
            if mon.has_status(StatusEffect::Paralysis) {
                value = (value / 2.0).floor();
            }
        }
        Stat::Spa | Stat::Hp => {}
    }

    value.floor() as u32
}

/// Stage multiplier for `stat`, after crit clamping, stage-ignoring
/// effects and temporary boosters
fn stage_factor(
    view: &BattleView<'_>,
    holder: BattlerIndex,
    stat: Stat,
    query: &StatQuery<'_>,
) -> f64 {
    let Some(battle_stat) = stat.battle_stat() else {
        return 1.0;
    };
    let mon = view.mon(holder);
    let mut stage = mon.summon.stages.get(battle_stat);

    if let Some(opponent) = query.opponent {
        if query.is_critical {
            stage = if battle_stat.is_offensive() {
                stage.max(0)
            } else if battle_stat.is_defensive() {
                stage.min(0)
            } else {
                stage
            };
        }
        if !query.ignore_opponent_ability
            && abilities::ignores_opponent_stages(
                view.ability(opponent, query.break_opponent_ability),
                stat,
            )
        {
            return 1.0;
        }
        if query.move_data.is_some_and(|m| {
            m.attrs()
                .any(|a| matches!(a, kazam_dex::MoveAttr::IgnoreStatStages))
        }) {
            return 1.0;
        }
    }

    let mut multiplier = stage_multiplier(stage);
    if view
        .field
        .side(mon.side)
        .modifiers
        .temp_stat_boosts
        .contains(&battle_stat)
    {
        multiplier += TEMP_BOOST;
    }
    multiplier.min(MAX_STAGE_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleConfig};
    use crate::types::{CombatantSpec, Side, Tag};
    use kazam_dex::{Ability, BattleStat, ItemKind, SpeciesId};

    fn battle() -> (Battle, BattlerIndex, BattlerIndex) {
        let mut battle = Battle::new(kazam_dex::Dex::builtin().into(), BattleConfig::default());
        let player = battle
            .add_combatant(CombatantSpec::new(SpeciesId(25), 50, Side::Player))
            .unwrap();
        let enemy = battle
            .add_combatant(CombatantSpec::new(SpeciesId(143), 50, Side::Enemy))
            .unwrap();
        (battle, player, enemy)
    }

    #[test]
    fn test_unmodified_stat_matches_permanent() {
        let (battle, player, _) = battle();
        let view = battle.view();
        assert_eq!(effective_stat(&view, player, Stat::Spe, &StatQuery::default()), 110);
    }

    #[test]
    fn test_stages_and_items() {
        let (mut battle, player, _) = battle();
        let mon = battle.combatant_mut(player).unwrap();
        mon.summon.stages.atk = 2;
        mon.items.push(kazam_dex::HeldItem::new(ItemKind::ChoiceBand, 1));
        let atk = mon.stat(Stat::Atk) as f64;
        let view = battle.view();
        let expected = (atk * 1.5 * 2.0).floor() as u32;
        assert_eq!(effective_stat(&view, player, Stat::Atk, &StatQuery::default()), expected);
    }

    #[test]
    fn test_crit_ignores_unfavourable_stages() {
        let (mut battle, player, enemy) = battle();
        battle.combatant_mut(player).unwrap().summon.stages.atk = -2;
        battle.combatant_mut(enemy).unwrap().summon.stages.def = 2;
        let view = battle.view();
        let crit = StatQuery {
            is_critical: true,
            ..StatQuery::against(enemy)
        };
        assert_eq!(
            effective_stat(&view, player, Stat::Atk, &crit),
            view.mon(player).stat(Stat::Atk)
        );
        let crit = StatQuery {
            is_critical: true,
            ..StatQuery::against(player)
        };
        assert_eq!(
            effective_stat(&view, enemy, Stat::Def, &crit),
            view.mon(enemy).stat(Stat::Def)
        );
    }

    #[test]
    fn test_unaware_opponent() {
        let (mut battle, player, enemy) = battle();
        battle.combatant_mut(player).unwrap().summon.stages.atk = 6;
        battle.combatant_mut(enemy).unwrap().ability = Ability::Unaware;
        let view = battle.view();
        let base = view.mon(player).stat(Stat::Atk);
        assert_eq!(effective_stat(&view, player, Stat::Atk, &StatQuery::against(enemy)), base);
        let ignoring = StatQuery {
            ignore_opponent_ability: true,
            ..StatQuery::against(enemy)
        };
        assert_eq!(effective_stat(&view, player, Stat::Atk, &ignoring), base * 4);
    }

    #[test]
    fn test_temp_boost_is_capped() {
        let (mut battle, player, _) = battle();
        battle.combatant_mut(player).unwrap().summon.stages.atk = 6;
        battle
            .field
            .side_mut(Side::Player)
            .modifiers
            .temp_stat_boosts
            .insert(BattleStat::Atk);
        let view = battle.view();
        let base = view.mon(player).stat(Stat::Atk);
        assert_eq!(effective_stat(&view, player, Stat::Atk, &StatQuery::default()), base * 4);
    }

    #[test]
    fn test_speed_modifiers() {
        let (mut battle, player, _) = battle();
        battle.field.side_mut(Side::Player).add(SideCondition::Tailwind, 4);
        let mon = battle.combatant_mut(player).unwrap();
        mon.status = Some(crate::types::Status::Paralysis);
        mon.summon.tags.push(Tag::new(TagKind::SlowStart));
        let view = battle.view();
        // 110 * 2 / 2 / 2
        assert_eq!(effective_stat(&view, player, Stat::Spe, &StatQuery::default()), 55);
    }

    #[test]
    fn test_ruin_lowers_others() {
        let (mut battle, player, enemy) = battle();
        battle.combatant_mut(enemy).unwrap().ability = Ability::TabletsOfRuin;
        let view = battle.view();
        let base = view.mon(player).stat(Stat::Atk) as f64;
        assert_eq!(
            effective_stat(&view, player, Stat::Atk, &StatQuery::default()),
            (base * 0.75).floor() as u32
        );
        let own = view.mon(enemy).stat(Stat::Atk);
        assert_eq!(effective_stat(&view, enemy, Stat::Atk, &StatQuery::default()), own);
    }
}
