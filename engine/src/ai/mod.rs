//! Enemy move selection
//!
//! ```text
//! queued move ─► usable pool ─► single move / Encore
//!                     │
//!                     ▼
//!              knock-out filter ─► score (move, target) ─► ranked walk
//!                                                          │
//!                                  nothing usable ─► Struggle
//! ```
//!
//! Everything here reads the battle through a [`BattleView`] and predicts
//! damage in simulation. Only the final random choices draw from the RNG.

mod scoring;
mod select;

use kazam_dex::{MoveCondition, MoveData, MoveId, StatusEffect, TagKind};

pub use scoring::{target_benefit_score, user_benefit_score};
pub(crate) use select::choose;

use crate::battle::{Battle, BattleView};
use crate::types::{BattlerIndex, MoveSlot};

/// Score given to moves the AI should not pick
pub const UNUSABLE_SCORE: f64 = -20.0;

/// A chosen move and where it is aimed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub move_id: MoveId,
    pub targets: Vec<BattlerIndex>,
    /// Used without spending PP (queued follow-ups)
    pub ignore_pp: bool,
}

/// Whether `user` may select this move at all: PP left and not locked out
/// by Disable or Taunt
pub fn is_usable(view: &BattleView<'_>, user: BattlerIndex, slot: &MoveSlot) -> bool {
    if !slot.has_pp() {
        return false;
    }
    let mon = view.mon(user);
    let disabled = mon
        .tag(TagKind::Disabled)
        .is_some_and(|t| t.tracked_move() == Some(slot.id));
    if disabled {
        return false;
    }
    let taunted = mon.has_tag(TagKind::Taunt) && !view.dex.move_data(slot.id).is_attack();
    !taunted
}

/// Whether the move's own conditions hold against `target`
pub fn conditions_pass(
    view: &BattleView<'_>,
    user: BattlerIndex,
    target: BattlerIndex,
    data: &MoveData,
) -> bool {
    let source = view.mon(user);
    let foe = view.mon(target);
    let conditions = data.conditions().all(|c| match c {
        MoveCondition::FirstTurnOnly => source.summon.turns_on_field == 0,
        MoveCondition::UserAsleep => source.has_status(StatusEffect::Sleep),
        MoveCondition::UserLevelAtLeastTarget => source.level >= foe.level,
    });
    let boss_immune = data.is_one_hit_ko() && foe.is_boss();
    conditions && !boss_immune
}

/// Whether the move is guaranteed a critical hit for scoring purposes
fn predicts_crit(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData) -> bool {
    data.crit_only().is_some() || view.has_tag(user, TagKind::AlwaysCrit)
}

/// Drop queued moves the combatant can no longer carry out
pub(crate) fn drop_stale_queue(battle: &mut Battle, idx: BattlerIndex) {
    loop {
        let view = battle.view();
        let mon = view.mon(idx);
        let Some(queued) = mon.summon.move_queue.front() else {
            return;
        };
        let keep = queued.ignore_pp
            || mon
                .move_slot(queued.id)
                .is_some_and(|slot| is_usable(&view, idx, slot));
        if keep {
            return;
        }
        let dropped = queued.id;
        if let Some(mon) = battle.combatant_mut(idx) {
            mon.summon.move_queue.pop_front();
        }
        tracing::debug!(battler = %idx, move_id = %dropped, "queued move dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleConfig;
    use crate::types::{CombatantSpec, QueuedMove, Side, Tag, TagPayload};
    use kazam_dex::{Dex, SpeciesId};

    fn battle() -> (Battle, BattlerIndex, BattlerIndex) {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        let a = battle
            .add_combatant(
                CombatantSpec::new(SpeciesId(25), 50, Side::Enemy).moves(&[85, 86, 252, 90]),
            )
            .unwrap();
        let d = battle
            .add_combatant(CombatantSpec::new(SpeciesId(143), 60, Side::Player))
            .unwrap();
        (battle, a, d)
    }

    #[test]
    fn test_usability() {
        let (mut battle, a, _) = battle();
        let slots = battle.combatant(a).unwrap().moveset.clone();
        assert!(slots.iter().all(|s| is_usable(&battle.view(), a, s)));

        battle.add_tag(a, Tag::new(TagKind::Taunt));
        assert!(is_usable(&battle.view(), a, &slots[0]));
        assert!(!is_usable(&battle.view(), a, &slots[1]));

        battle.add_tag(
            a,
            Tag::new(TagKind::Disabled).with_payload(TagPayload::Move(MoveId(85))),
        );
        assert!(!is_usable(&battle.view(), a, &slots[0]));

        let mut empty = slots[2];
        empty.pp_used = empty.pp_max;
        assert!(!is_usable(&battle.view(), a, &empty));
    }

    #[test]
    fn test_conditions() {
        let (mut battle, a, d) = battle();
        let dex = Dex::builtin();
        let fake_out = dex.move_data(MoveId(252));
        let fissure = dex.move_data(MoveId(90));
        assert!(conditions_pass(&battle.view(), a, d, &fake_out));
        assert!(!conditions_pass(&battle.view(), a, d, &fissure));

        battle.end_turn();
        assert!(!conditions_pass(&battle.view(), a, d, &fake_out));
        battle.combatant_mut(a).unwrap().level = 60;
        assert!(conditions_pass(&battle.view(), a, d, &fissure));
        battle.combatant_mut(d).unwrap().boss = Some(crate::types::BossShieldState::new(2));
        assert!(!conditions_pass(&battle.view(), a, d, &fissure));
    }

    #[test]
    fn test_stale_queue_is_dropped() {
        let (mut battle, a, d) = battle();
        let mon = battle.combatant_mut(a).unwrap();
        mon.moveset[0].pp_used = mon.moveset[0].pp_max;
        mon.summon.move_queue.push_back(QueuedMove {
            id: MoveId(85),
            targets: vec![d],
            ignore_pp: false,
        });
        mon.summon.move_queue.push_back(QueuedMove {
            id: MoveId(19),
            targets: vec![d],
            ignore_pp: true,
        });
        drop_stale_queue(&mut battle, a);
        let queue = &battle.combatant(a).unwrap().summon.move_queue;
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, MoveId(19));
    }
}
