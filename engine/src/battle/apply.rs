//! Applying resolved numbers to battle state

use kazam_dex::{Ability, LapseType, MoveAttr, MoveId, StatusEffect, TagKind};

use super::Battle;
use crate::boss;
use crate::crit;
use crate::damage::{self, DamageRequest, DamageResult, HitOutcome};
use crate::error::BattleError;
use crate::events::{BattleEvent, Notice, SurviveSource};
use crate::items;
use crate::types::{BattleSpec, BattlerIndex, Status, Tag};

/// Strikes a 2-5 hit move lands, indexed by a draw below 20
const MULTI_HIT_TABLE: [(u32, u8); 4] = [(13, 2), (6, 3), (3, 4), (0, 5)];

/// How damage reaches a combatant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Skip the boss shield cap (recoil, status damage)
    pub ignore_segments: bool,
    /// Skip Endure, Sturdy and Focus Band
    pub prevent_endure: bool,
    /// The combatant dealing a move's damage, if any
    pub attacker: Option<BattlerIndex>,
}

impl ApplyOptions {
    pub fn from_move(attacker: BattlerIndex) -> Self {
        Self {
            attacker: Some(attacker),
            ..Self::default()
        }
    }
}

/// What one strike of a move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeResult {
    pub critical: bool,
    pub damage: DamageResult,
    /// HP actually removed after survive checks and shields
    pub dealt: u32,
    pub fainted: bool,
}

impl Battle {
    /// Set the attacker's strike counters for a move about to hit.
    ///
    /// Native multi-hit moves roll their count. Other attacks gain one
    /// strike per Multi-Lens and one from Parental Bond.
    pub fn prepare_strikes(
        &mut self,
        attacker: BattlerIndex,
        move_id: MoveId,
        spread_targets: usize,
    ) -> Result<u8, BattleError> {
        self.check(attacker)?;
        let data = self.dex().move_data(move_id).into_owned();
        let native = data.attrs().find_map(|a| match a {
            MoveAttr::MultiHit { min, max } => Some((*min, *max)),
            _ => None,
        });
        let mut hits = match native {
            Some((2, 5)) => {
                let roll = self.rng_mut().int_below(20);
                MULTI_HIT_TABLE
                    .iter()
                    .find(|(at_least, _)| roll >= *at_least)
                    .map_or(2, |(_, hits)| *hits)
            }
            Some((min, max)) => self.rng_mut().int_range(min as u32, max as u32) as u8,
            None => 1,
        };
        if items::can_multi_strike(&data, spread_targets) {
            let mon = &self.combatants()[attacker.0];
            hits += items::multi_lens_hits(mon);
            if mon.ability == Ability::ParentalBond {
                hits += 1;
            }
        }
        let turn = &mut self.mon_mut(attacker).turn;
        turn.hit_count = hits;
        turn.hits_left = hits;
        Ok(hits)
    }

    /// Resolve one strike: crit roll, damage, application.
    ///
    /// Counts down the attacker's remaining strikes and records the move as
    /// its last used.
    pub fn strike(
        &mut self,
        attacker: BattlerIndex,
        defender: BattlerIndex,
        move_id: MoveId,
    ) -> Result<StrikeResult, BattleError> {
        self.check(attacker)?;
        self.check(defender)?;
        if self.combatants()[attacker.0].turn.hit_count == 0 {
            let turn = &mut self.mon_mut(attacker).turn;
            turn.hit_count = 1;
            turn.hits_left = 1;
        }
        let data = self.dex().move_data(move_id).into_owned();

        let mark = self.events().len();
        let critical = if data.is_attack() {
            let (view, mut mode) = self.live();
            crit::roll_critical(&view, attacker, defender, &data, &mut mode)
        } else {
            false
        };
        let request = DamageRequest::new(attacker, defender, move_id).critical(critical);
        let result = {
            let (view, mut mode) = self.live();
            damage::compute_damage_with(&view, &request, &data, &mut mode)
        };
        self.sync_reveals(mark);

        if result.outcome == HitOutcome::OneHitKo {
            self.emit(BattleEvent::Notice {
                battler: Some(defender),
                notice: Notice::Ohko,
            });
        }
        let dealt = if result.amount > 0 {
            self.apply_damage(defender, result.amount, ApplyOptions::from_move(attacker))
        } else {
            0
        };

        let user = self.mon_mut(attacker);
        user.turn.hits_left = user.turn.hits_left.saturating_sub(1);
        user.summon.last_move = Some(move_id);
        Ok(StrikeResult {
            critical,
            damage: result,
            dealt,
            fainted: self.combatants()[defender.0].is_fainted(),
        })
    }

    /// Take HP from a combatant. Returns the HP actually removed.
    ///
    /// Lethal damage is survived at 1 HP by, in order, Endure, Sturdy, an
    /// Endure Token or Focus Band. A boss's shields then cap what is left.
    /// A faint is queued as an event; [`Battle::resolve_faint`] applies it.
    pub fn apply_damage(&mut self, target: BattlerIndex, amount: u32, options: ApplyOptions) -> u32 {
        if self.check(target).is_err() {
            tracing::warn!(battler = %target, amount, "damage to unknown battler ignored");
            return 0;
        }
        let spec = self.field.spec;
        let mon = &self.combatants()[target.0];
        if mon.is_fainted() {
            return 0;
        }

        let mut damage = amount;
        if let Some(attacker) = options.attacker {
            self.check_sturdy(attacker, target, damage);
        }
        if !options.prevent_endure && damage >= self.combatants()[target.0].hp {
            if let Some(source) = self.survive_source(target) {
                let hp = self.combatants()[target.0].hp;
                damage = hp.saturating_sub(1);
                tracing::debug!(battler = %target, ?source, "survived lethal damage");
                self.emit(BattleEvent::Survived {
                    battler: target,
                    source,
                });
            }
        }

        let mon = &self.combatants()[target.0];
        let mut cleared_index = mon.boss.map(|b| b.segment_index + 1);
        if mon.is_boss() && !options.ignore_segments {
            let hit = boss::segment_damage(mon, damage, spec);
            damage = hit.damage;
            cleared_index = Some(hit.cleared_index);
        }
        let last_shield = mon.boss.is_some_and(|b| b.segment_index < 1);
        if spec == BattleSpec::FinalBoss && mon.form_index == 0 && last_shield {
            damage = damage.min(mon.hp.saturating_sub(1));
        }

        let mon = self.mon_mut(target);
        let dealt = damage.min(mon.hp);
        mon.hp -= dealt;
        mon.turn.damage_taken = mon.turn.damage_taken.saturating_add(dealt);

        if let Some(shield) = mon.boss {
            if options.ignore_segments {
                let size = mon.max_hp() as f64 / shield.segment_count as f64;
                cleared_index = Some((mon.hp as f64 / size).ceil() as u8);
            }
            if let Some(cleared) = cleared_index.filter(|&c| c <= shield.segment_index) {
                self.clear_boss_segments(target, cleared);
            }
        }

        if self.combatants()[target.0].is_fainted() {
            self.emit(BattleEvent::Faint { battler: target });
            self.remove_tag(target, TagKind::Substitute);
            self.release_links(target);
        }
        dealt
    }

    /// A full-HP Sturdy holder about to take a lethal move hit gets the
    /// Sturdy tag for this turn
    fn check_sturdy(&mut self, attacker: BattlerIndex, target: BattlerIndex, damage: u32) {
        let view = self.view();
        let broken = view.mon(attacker).ability == Ability::MoldBreaker && attacker != target;
        let mon = view.mon(target);
        let lethal = damage >= mon.hp;
        if view.ability(target, broken) == Ability::Sturdy
            && mon.is_full_hp()
            && mon.max_hp() > 1
            && lethal
        {
            self.add_tag(target, Tag::new(TagKind::Sturdy));
        }
    }

    fn survive_source(&mut self, target: BattlerIndex) -> Option<SurviveSource> {
        let mon = &self.combatants()[target.0];
        let hp = mon.hp;
        if hp >= 1 && mon.has_tag(TagKind::Enduring) && self.lapse_tag(target, TagKind::Enduring) {
            return Some(SurviveSource::Endure);
        }
        let mon = &self.combatants()[target.0];
        if hp > 1 && mon.has_tag(TagKind::Sturdy) && self.lapse_tag(target, TagKind::Sturdy) {
            return Some(SurviveSource::Sturdy);
        }
        let mon = &self.combatants()[target.0];
        if hp >= 1
            && mon.has_tag(TagKind::EndureToken)
            && self.lapse_tag(target, TagKind::EndureToken)
        {
            return Some(SurviveSource::EndureToken);
        }
        let chance = items::focus_band_chance(&self.combatants()[target.0]);
        if chance > 0 && self.rng_mut().int_below(10) < chance {
            return Some(SurviveSource::FocusBand);
        }
        None
    }

    /// Apply a queued faint: the status becomes Faint, every tag lapses and
    /// stat stages reset
    pub fn resolve_faint(&mut self, target: BattlerIndex) -> bool {
        let Some(mon) = self.combatant_mut(target) else {
            return false;
        };
        if !mon.is_fainted() || mon.has_status(StatusEffect::Faint) {
            return false;
        }
        mon.status = Some(Status::Faint);
        mon.summon.stages.clear();
        self.lapse_tags(target, LapseType::Faint);
        self.emit(BattleEvent::StatusChange {
            battler: target,
            status: Some(StatusEffect::Faint),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::BattleConfig;
    use super::*;
    use crate::types::{CombatantSpec, Side};
    use kazam_dex::{Dex, ItemKind, SpeciesId};

    fn duel(defender: CombatantSpec) -> (Battle, BattlerIndex, BattlerIndex) {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        let a = battle
            .add_combatant(CombatantSpec::new(SpeciesId(150), 100, Side::Player))
            .unwrap();
        let d = battle.add_combatant(defender).unwrap();
        (battle, a, d)
    }

    #[test]
    fn test_faint_is_queued_not_applied() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(25), 50, Side::Enemy));
        let dealt = battle.apply_damage(d, 999, ApplyOptions::from_move(a));
        assert_eq!(dealt, 110);
        let mon = battle.combatant(d).unwrap();
        assert_eq!(mon.hp, 0);
        assert_eq!(mon.status, None);
        assert!(battle.events().iter().any(|e| *e == BattleEvent::Faint { battler: d }));

        assert!(battle.resolve_faint(d));
        assert!(battle.combatant(d).unwrap().has_status(StatusEffect::Faint));
        assert!(!battle.resolve_faint(d));
        assert_eq!(battle.apply_damage(d, 10, ApplyOptions::default()), 0);
    }

    #[test]
    fn test_endure_holds_at_one() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(25), 50, Side::Enemy));
        battle.add_tag(d, Tag::new(TagKind::Enduring));
        assert_eq!(battle.apply_damage(d, 500, ApplyOptions::from_move(a)), 109);
        assert_eq!(battle.combatant(d).unwrap().hp, 1);
        // Endure stays up for the rest of the turn
        assert_eq!(battle.apply_damage(d, 500, ApplyOptions::from_move(a)), 0);
        let prevented = ApplyOptions {
            prevent_endure: true,
            ..ApplyOptions::from_move(a)
        };
        assert_eq!(battle.apply_damage(d, 500, prevented), 1);
    }

    #[test]
    fn test_sturdy_needs_full_hp() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(76), 50, Side::Enemy));
        battle.apply_damage(d, 999, ApplyOptions::from_move(a));
        assert_eq!(battle.combatant(d).unwrap().hp, 1);
        assert!(battle.events().iter().any(|e| matches!(
            e,
            BattleEvent::Survived {
                source: SurviveSource::Sturdy,
                ..
            }
        )));
        battle.end_turn();
        battle.apply_damage(d, 999, ApplyOptions::from_move(a));
        assert!(battle.combatant(d).unwrap().is_fainted());
    }

    #[test]
    fn test_mold_breaker_ignores_sturdy() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(76), 50, Side::Enemy));
        battle.combatant_mut(a).unwrap().ability = Ability::MoldBreaker;
        battle.apply_damage(d, 999, ApplyOptions::from_move(a));
        assert!(battle.combatant(d).unwrap().is_fainted());
    }

    #[test]
    fn test_endure_token_is_consumed() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(25), 50, Side::Enemy));
        battle.add_tag(d, Tag::new(TagKind::EndureToken));
        battle.apply_damage(d, 500, ApplyOptions::from_move(a));
        let mon = battle.combatant(d).unwrap();
        assert_eq!(mon.hp, 1);
        assert!(!mon.has_tag(TagKind::EndureToken));
    }

    #[test]
    fn test_focus_band_draws_once() {
        let (mut battle, a, d) = duel(
            CombatantSpec::new(SpeciesId(25), 50, Side::Enemy).item(ItemKind::FocusBand, 5),
        );
        let before = battle.rng().draws();
        battle.apply_damage(d, 500, ApplyOptions::from_move(a));
        assert_eq!(battle.rng().draws(), before + 1);
        let hp = battle.combatant(d).unwrap().hp;
        assert!(hp == 0 || hp == 1);
    }

    #[test]
    fn test_faint_breaks_substitute_and_links() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(25), 50, Side::Enemy));
        battle.add_tag(d, Tag::new(TagKind::Substitute));
        let commander = battle.combatant(d).unwrap().id;
        battle.add_tag(a, Tag::new(TagKind::Commanded).with_source(Some(commander)));
        battle.apply_damage(d, 500, ApplyOptions::default());
        assert!(!battle.combatant(d).unwrap().has_tag(TagKind::Substitute));
        assert!(!battle.combatant(a).unwrap().has_tag(TagKind::Commanded));
    }

    #[test]
    fn test_boss_shield_caps_hit() {
        let (mut battle, a, d) =
            duel(CombatantSpec::new(SpeciesId(890), 100, Side::Enemy).boss(2));
        // 421 HP: the boundary sits at 210.5 and the hit stops there
        let dealt = battle.apply_damage(d, 421, ApplyOptions::from_move(a));
        let mon = battle.combatant(d).unwrap();
        assert_eq!(mon.max_hp(), 421);
        assert_eq!(dealt, 210);
        assert_eq!(mon.boss.unwrap().segment_index, 0);
        assert!(battle
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::BossSegmentCleared { segment_index: 0, .. })));
    }

    #[test]
    fn test_survive_checks_see_the_uncapped_hit() {
        let (mut battle, a, d) =
            duel(CombatantSpec::new(SpeciesId(890), 100, Side::Enemy).boss(2));
        battle.add_tag(d, Tag::new(TagKind::Enduring));
        let dealt = battle.apply_damage(d, 999, ApplyOptions::from_move(a));
        assert_eq!(dealt, 210);
        assert!(battle.events().iter().any(|e| matches!(
            e,
            BattleEvent::Survived {
                source: SurviveSource::Endure,
                ..
            }
        )));

        // A Focus Band rolls even though the shield would have held
        let (mut battle, a, d) = duel(
            CombatantSpec::new(SpeciesId(890), 100, Side::Enemy)
                .boss(2)
                .item(ItemKind::FocusBand, 1),
        );
        let before = battle.rng().draws();
        assert_eq!(battle.apply_damage(d, 999, ApplyOptions::from_move(a)), 210);
        assert!(battle.rng().draws() > before);
    }

    #[test]
    fn test_multi_lens_adds_strikes() {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        let a = battle
            .add_combatant(
                CombatantSpec::new(SpeciesId(150), 100, Side::Player).item(ItemKind::MultiLens, 2),
            )
            .unwrap();
        assert_eq!(battle.prepare_strikes(a, MoveId(33), 1).unwrap(), 3);
        let hits = battle.prepare_strikes(a, MoveId(331), 1).unwrap();
        assert!((2..=5).contains(&hits));
        assert_eq!(battle.prepare_strikes(a, MoveId(86), 1).unwrap(), 1);
    }

    #[test]
    fn test_strike_counts_down_and_records() {
        let (mut battle, a, d) = duel(CombatantSpec::new(SpeciesId(143), 50, Side::Enemy));
        battle.prepare_strikes(a, MoveId(33), 1).unwrap();
        let result = battle.strike(a, d, MoveId(33)).unwrap();
        assert!(result.dealt > 0);
        let mon = battle.combatant(a).unwrap();
        assert_eq!(mon.turn.hits_left, 0);
        assert_eq!(mon.summon.last_move, Some(MoveId(33)));
    }
}
