//! Critical hits

use kazam_dex::{MoveAttr, MoveData, TagKind, Type};

use crate::abilities;
use crate::battle::BattleView;
use crate::events::BattleEvent;
use crate::items;
use crate::mode::Mode;
use crate::types::{BattlerIndex, SideCondition};

/// Odds (1 in n) by crit stage
pub const CRIT_ODDS: [u32; 4] = [24, 8, 2, 1];

const MAX_CRIT_STAGE: u8 = 3;

/// Crit stage of `attacker` using `data`, before clamping
pub fn crit_stage(view: &BattleView<'_>, attacker: BattlerIndex, data: &MoveData) -> u8 {
    let mon = view.mon(attacker);
    let mut stage = data.crit_stages();
    stage += items::crit_stages(mon);
    if view.field.side(mon.side).modifiers.dire_hit {
        stage += 1;
    }
    stage += abilities::bonus_crit_stages(view.ability(attacker, false));
    if mon.has_tag(TagKind::CritBoost) {
        stage += 2;
    }
    if let Some(cheer) = mon.tag(TagKind::DragonCheer) {
        stage += cheer.layers().max(1);
    }
    stage
}

/// Decide whether a hit is critical.
///
/// Forced crits come from Laser Focus, crit-only moves and Merciless.
/// Lucky Chant and Battle Armor / Shell Armor block anything but an
/// unblockable forced crit, and are checked before any roll. Simulated
/// calls never roll and only report forced crits.
pub fn roll_critical(
    view: &BattleView<'_>,
    attacker: BattlerIndex,
    defender: BattlerIndex,
    data: &MoveData,
    mode: &mut Mode<'_>,
) -> bool {
    if data.attrs().any(|a| {
        matches!(
            a,
            MoveAttr::FixedDamage { .. } | MoveAttr::LevelDamage | MoveAttr::TargetHalfHpDamage
        )
    }) {
        return false;
    }

    let source = view.mon(attacker);
    let target = view.mon(defender);
    let crit_only = data.crit_only();
    let unblockable = crit_only == Some(true);
    let forced = source.has_tag(TagKind::AlwaysCrit)
        || crit_only.is_some()
        || abilities::forces_crit(view.ability(attacker, false), target);

    if !unblockable {
        if view.field.side_has(target.side, SideCondition::LuckyChant) {
            return false;
        }
        let ability = view.ability(defender, view.breaks_abilities(attacker, data));
        if abilities::blocks_crit(ability) {
            mode.emit(BattleEvent::AbilityRevealed {
                battler: defender,
                ability,
            });
            return false;
        }
    }
    if forced {
        return true;
    }

    let stage = crit_stage(view, attacker, data).min(MAX_CRIT_STAGE);
    let odds = CRIT_ODDS[stage as usize];
    odds == 1 || mode.roll_below(odds, 1) == 0
}

/// Dragon Cheer strength for a combatant of these types
pub(crate) fn dragon_cheer_layers(types: &[Type]) -> u8 {
    if types.contains(&Type::Dragon) { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleConfig};
    use crate::events::EventQueue;
    use crate::rng::BattleRng;
    use crate::types::{CombatantSpec, Side, Tag, TagPayload};
    use kazam_dex::{Ability, Dex, ItemKind, MoveId, SpeciesId};

    const P: BattlerIndex = BattlerIndex(0);
    const E: BattlerIndex = BattlerIndex(1);

    fn duel() -> Battle {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        battle
            .add_combatant(
                CombatantSpec::new(SpeciesId(468), 50, Side::Player).ability_index(1),
            )
            .unwrap();
        battle
            .add_combatant(CombatantSpec::new(SpeciesId(143), 50, Side::Enemy))
            .unwrap();
        battle
    }

    fn data(battle: &Battle, id: u16) -> MoveData {
        battle.dex().move_data(MoveId(id)).into_owned()
    }

    #[test]
    fn test_stage_sources_add_up() {
        let mut battle = duel();
        // Slash with Super Luck
        let slash = data(&battle, 163);
        assert_eq!(crit_stage(&battle.view(), P, &slash), 2);

        let mon = battle.combatant_mut(P).unwrap();
        mon.items.push(kazam_dex::HeldItem::new(ItemKind::ScopeLens, 1));
        mon.summon.tags.push(Tag::new(TagKind::CritBoost));
        assert_eq!(crit_stage(&battle.view(), P, &slash), 5);
    }

    #[test]
    fn test_dragon_cheer_strength() {
        let mut battle = duel();
        let tackle = data(&battle, 33);
        battle.combatant_mut(P).unwrap().summon.tags.push(
            Tag::new(TagKind::DragonCheer).with_payload(TagPayload::Layers(2)),
        );
        assert_eq!(crit_stage(&battle.view(), P, &tackle), 3);
        assert_eq!(dragon_cheer_layers(&[Type::Dragon, Type::Flying]), 2);
        assert_eq!(dragon_cheer_layers(&[Type::Fairy]), 1);
    }

    #[test]
    fn test_stage_three_always_crits() {
        let mut battle = duel();
        battle.combatant_mut(P).unwrap().summon.tags.push(Tag::new(TagKind::CritBoost));
        let slash = data(&battle, 163);
        let mut rng = BattleRng::new(1);
        let mut events = EventQueue::new();
        let mut mode = Mode::live(&mut rng, &mut events);
        assert!(roll_critical(&battle.view(), P, E, &slash, &mut mode));
        drop(mode);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_live_odds_follow_stage() {
        let mut battle = duel();
        let tackle = data(&battle, 33);
        let slash = data(&battle, 163);
        for (ability, move_data, odds) in [
            (Ability::NoAbility, &tackle, 24),
            (Ability::SuperLuck, &tackle, 8),
            (Ability::SuperLuck, &slash, 2),
        ] {
            battle.combatant_mut(P).unwrap().ability = ability;
            let mut rng = BattleRng::new(3);
            // Replays the same stream to predict each roll
            let mut expected = BattleRng::new(3);
            let mut events = EventQueue::new();
            let mut crits = 0;
            for _ in 0..480 {
                let mut mode = Mode::live(&mut rng, &mut events);
                let critical = roll_critical(&battle.view(), P, E, move_data, &mut mode);
                assert_eq!(critical, expected.int_below(odds) == 0, "1 in {odds}");
                crits += u32::from(critical);
            }
            assert_eq!(rng.draws(), 480);
            let mean = 480 / odds;
            assert!(crits > mean / 3 && crits < mean * 2, "{crits} crits at 1 in {odds}");
        }
    }

    #[test]
    fn test_simulated_never_rolls() {
        let battle = duel();
        let tackle = data(&battle, 33);
        assert!(!roll_critical(&battle.view(), P, E, &tackle, &mut Mode::Simulated));
        let frost_breath = data(&battle, 524);
        assert!(roll_critical(&battle.view(), P, E, &frost_breath, &mut Mode::Simulated));
    }

    #[test]
    fn test_lucky_chant_blocks_before_roll() {
        let mut battle = duel();
        battle.field.side_mut(Side::Enemy).add(SideCondition::LuckyChant, 5);
        let frost_breath = data(&battle, 524);
        let mut rng = BattleRng::new(1);
        let mut events = EventQueue::new();
        let mut mode = Mode::live(&mut rng, &mut events);
        assert!(!roll_critical(&battle.view(), P, E, &frost_breath, &mut mode));
        drop(mode);
        assert_eq!(rng.draws(), 0);

        // Wicked Blow cannot be blocked
        let wicked_blow = data(&battle, 897);
        assert!(roll_critical(&battle.view(), P, E, &wicked_blow, &mut Mode::Simulated));
    }

    #[test]
    fn test_battle_armor_and_mold_breaker() {
        let mut battle = duel();
        battle.combatant_mut(E).unwrap().ability = Ability::ShellArmor;
        let frost_breath = data(&battle, 524);
        assert!(!roll_critical(&battle.view(), P, E, &frost_breath, &mut Mode::Simulated));
        battle.combatant_mut(P).unwrap().ability = Ability::MoldBreaker;
        assert!(roll_critical(&battle.view(), P, E, &frost_breath, &mut Mode::Simulated));
    }

    #[test]
    fn test_fixed_damage_never_crits() {
        let mut battle = duel();
        battle.combatant_mut(P).unwrap().summon.tags.push(Tag::new(TagKind::AlwaysCrit));
        let sonic_boom = data(&battle, 49);
        assert!(!roll_critical(&battle.view(), P, E, &sonic_boom, &mut Mode::Simulated));
    }

    #[test]
    fn test_merciless_against_poisoned() {
        let mut battle = duel();
        battle.combatant_mut(P).unwrap().ability = Ability::Merciless;
        let tackle = data(&battle, 33);
        assert!(!roll_critical(&battle.view(), P, E, &tackle, &mut Mode::Simulated));
        battle.combatant_mut(E).unwrap().status = Some(crate::types::Status::Poison);
        assert!(roll_critical(&battle.view(), P, E, &tackle, &mut Mode::Simulated));
    }
}
