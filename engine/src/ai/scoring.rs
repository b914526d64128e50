//! Benefit heuristics for AI move scoring
//!
//! Positive scores favour the combatant being scored. The selector flips
//! the target score for opposing targets, so a harmful effect on a foe
//! ends up counting in the user's favour.

use kazam_dex::{MoveAttr, MoveCategory, MoveData, Stat, TagKind};

use crate::battle::BattleView;
use crate::effectiveness::attack_type_effectiveness;
use crate::mode::Mode;
use crate::stat_calc::{StatQuery, effective_stat};
use crate::state_machine::can_set_status;
use crate::types::BattlerIndex;
use crate::types::stats::{MAX_STAGE, MIN_STAGE};

/// Score for aiming at an opposing Commander's partner
const COMMANDER_SCORE: f64 = 20.0;

/// `Math.round` semantics: halves round towards positive infinity
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn self_targeted(attr: &MoveAttr) -> bool {
    match attr {
        MoveAttr::Status { self_target, .. }
        | MoveAttr::StatStageChange { self_target, .. }
        | MoveAttr::AddTag { self_target, .. } => *self_target,
        MoveAttr::Heal { .. } => true,
        _ => false,
    }
}

fn tag_score(tag: TagKind) -> f64 {
    match tag {
        TagKind::Flinched
        | TagKind::Confused
        | TagKind::Infatuated
        | TagKind::Drowsy
        | TagKind::Disabled
        | TagKind::ReceiveDoubleDamage => -5.0,
        TagKind::Trapped | TagKind::Bound | TagKind::Frenzy | TagKind::Taunt => -3.0,
        TagKind::Encore => -2.0,
        TagKind::Ingrain | TagKind::MagnetRisen => 3.0,
        TagKind::Protected
        | TagKind::Flying
        | TagKind::CritBoost
        | TagKind::AlwaysCrit
        | TagKind::Enduring => 5.0,
        _ => 0.0,
    }
}

/// Whether the user has an attack of this category to benefit from a stage change
fn has_attack(view: &BattleView<'_>, user: BattlerIndex, category: MoveCategory) -> bool {
    view.mon(user)
        .moveset
        .iter()
        .any(|slot| view.dex.move_data(slot.id).category == category)
}

/// How much the effect of one attribute is worth to `subject`
fn attr_score(
    view: &BattleView<'_>,
    user: BattlerIndex,
    subject: BattlerIndex,
    attr: &MoveAttr,
) -> f64 {
    match attr {
        MoveAttr::StatStageChange {
            stats,
            stages,
            self_target,
            ..
        } => {
            let mut score = 0.0;
            for &stat in stats {
                let current = view.mon(subject).summon.stages.get(stat);
                let levels = if *stages > 0 {
                    (current + stages).min(MAX_STAGE) - current
                } else {
                    (current + stages).max(MIN_STAGE) - current
                };
                let needed = match stat.permanent() {
                    Some(Stat::Atk) if *self_target => Some(MoveCategory::Physical),
                    Some(Stat::Def) if !*self_target => Some(MoveCategory::Physical),
                    Some(Stat::Spa) if *self_target => Some(MoveCategory::Special),
                    Some(Stat::Spd) if !*self_target => Some(MoveCategory::Special),
                    _ => None,
                };
                if needed.is_some_and(|category| !has_attack(view, user, category)) {
                    continue;
                }
                let levels = levels as f64;
                score += levels * 4.0 + if levels > 0.0 { -2.0 } else { 2.0 };
            }
            score
        }
        MoveAttr::Status { effect, chance, .. } => {
            let score = if *chance >= 100 {
                -10.0
            } else {
                (*chance as f64 * -0.1).floor()
            };
            let settable = view.mon(subject).status.is_none()
                && can_set_status(view, subject, *effect, Some(user), false, &mut Mode::Simulated);
            if settable { score } else { 0.0 }
        }
        MoveAttr::AddTag { tag, chance, .. } => {
            (tag_score(*tag) * (*chance).min(100) as f64 / 100.0).floor()
        }
        MoveAttr::Heal { ratio } => {
            let missing = 1.0 - view.mon(subject).hp_ratio();
            round_half_up((missing * 20.0 - ratio * 10.0) / (1.0 - ratio / 2.0))
        }
        MoveAttr::MultiHit { .. } => -5.0,
        _ => 0.0,
    }
}

/// Direct value of the move to its user, regardless of what it hits
pub fn user_benefit_score(data: &MoveData) -> f64 {
    data.attrs()
        .map(|attr| match attr {
            MoveAttr::Recoil { .. } => (data.power as f64 / 5.0 / -4.0).floor(),
            MoveAttr::HighCritRatio { .. } => 3.0,
            MoveAttr::CritOnly { .. } => 5.0,
            _ => 0.0,
        })
        .sum()
}

/// Value of the move's effects landing on `target`, from the target's
/// point of view. Attacks subtract their expected damage value.
pub fn target_benefit_score(
    view: &BattleView<'_>,
    user: BattlerIndex,
    target: BattlerIndex,
    data: &MoveData,
) -> f64 {
    let same_side = view.is_ally(user, target);
    if let Some(partner) = view.ally(target) {
        let target_id = view.mon(target).id;
        let commanding = view
            .mon(partner)
            .tag(TagKind::Commanded)
            .is_some_and(|t| t.source == Some(target_id));
        if commanding {
            return if same_side { -COMMANDER_SCORE } else { COMMANDER_SCORE };
        }
    }

    let mut score = 0.0;
    for attr in data.attrs() {
        let on_self = self_targeted(attr);
        let subject = if on_self { user } else { target };
        let sign = if on_self && target != user { -1.0 } else { 1.0 };
        score += attr_score(view, user, subject, attr) * sign;
    }
    if data.is_attack() {
        score -= attack_score(view, user, target, data);
    }
    score
}

/// Expected worth of an attack: effectiveness, how well the category
/// suits the user's stats, and raw power
fn attack_score(
    view: &BattleView<'_>,
    user: BattlerIndex,
    target: BattlerIndex,
    data: &MoveData,
) -> f64 {
    let effectiveness = attack_type_effectiveness(
        view,
        target,
        data.move_type,
        Some(user),
        None,
        false,
        &mut Mode::Simulated,
    );
    let mut score = if (effectiveness - 1.0).powi(2) * effectiveness < 1.0 {
        -2.0
    } else {
        2.0
    };

    let (own, other) = if data.category == MoveCategory::Physical {
        (Stat::Atk, Stat::Spa)
    } else {
        (Stat::Spa, Stat::Atk)
    };
    let query = StatQuery::against(target);
    let own = effective_stat(view, user, own, &query) as f64;
    let other = effective_stat(view, user, other, &query) as f64;
    let ratio = other / own;
    if ratio <= 0.75 {
        score *= 2.0;
    } else if ratio <= 0.875 {
        score *= 1.5;
    }
    score + (data.power as f64 / 5.0).floor()
}
