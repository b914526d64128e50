//! Held item effects

use kazam_dex::{ItemKind, MoveData, Stat};

use crate::pipeline::{Flow, Pipeline, Scope};
use crate::types::Combatant;

/// Register the holder's stat-boosting items
pub(crate) fn push_stat_hooks(pipeline: &mut Pipeline<'_, f64>, holder: &Combatant, stat: Stat) {
    for item in &holder.items {
        let boost = match (item.kind, stat) {
            (ItemKind::ChoiceBand, Stat::Atk)
            | (ItemKind::ChoiceSpecs, Stat::Spa)
            | (ItemKind::ChoiceScarf, Stat::Spe)
            | (ItemKind::AssaultVest, Stat::Spd)
            | (ItemKind::Eviolite, Stat::Def | Stat::Spd) => 1.5,
            _ => continue,
        };
        pipeline.push(Scope::Item, move |value| {
            *value *= boost;
            Flow::Continue
        });
    }
}

/// Crit stages granted by held items
pub(crate) fn crit_stages(holder: &Combatant) -> u8 {
    holder.item_stacks(ItemKind::ScopeLens).min(1)
}

/// Whether a move can take extra strikes from Multi-Lens or Parental Bond
pub(crate) fn can_multi_strike(data: &MoveData, spread_targets: usize) -> bool {
    data.is_attack()
        && !data.is_multi_hit()
        && !data.attrs().any(|a| matches!(a, kazam_dex::MoveAttr::Charge { .. }))
        && !(data.target.is_spread() && spread_targets > 1)
}

/// Extra strikes Multi-Lens adds to an eligible move
pub(crate) fn multi_lens_hits(holder: &Combatant) -> u8 {
    holder.item_stacks(ItemKind::MultiLens)
}

/// Damage scale Multi-Lens applies to the strike currently resolving.
///
/// The first strike loses a quarter per lens; each lens strike after it
/// deals a quarter. A strike past the lens strikes belongs to another
/// source and is left alone.
pub(crate) fn multi_lens_multiplier(holder: &Combatant) -> Option<f64> {
    let stacks = holder.item_stacks(ItemKind::MultiLens);
    if stacks == 0 {
        return None;
    }
    let turn = &holder.turn;
    if turn.hits_left == turn.hit_count {
        return Some(1.0 - 0.25 * stacks as f64);
    }
    if turn.strike_index() != stacks + 1 {
        return Some(0.25);
    }
    None
}

/// Chance out of 10 that Focus Band saves the holder
pub(crate) fn focus_band_chance(holder: &Combatant) -> u32 {
    holder.item_stacks(ItemKind::FocusBand) as u32
}
