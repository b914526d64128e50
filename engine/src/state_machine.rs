//! Status and tag transitions
//!
//! A combatant holds at most one [`Status`] and any number of tags, one
//! per kind. The checks here are pure over a [`BattleView`] so the AI can
//! ask them in simulation. The transitions are methods on [`Battle`].

use kazam_dex::{Ability, LapseType, StatusEffect, TagKind, Type};

use crate::abilities;
use crate::battle::{Battle, BattleView};
use crate::crit::dragon_cheer_layers;
use crate::events::{BattleEvent, Notice};
use crate::mode::Mode;
use crate::types::status::{SLEEP_TURNS_MAX, SLEEP_TURNS_MIN};
use crate::types::{BattlerIndex, SideCondition, Status, Tag, TagPayload, Terrain};

/// Most Stockpile layers a combatant can hold
pub const MAX_STOCKPILE: u8 = 3;

/// What a lapse pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LapseReport {
    pub removed: Vec<TagKind>,
    /// A tag stopped the combatant from moving (Flinch at PreMove)
    pub move_cancelled: bool,
}

fn blocked(mode: &mut Mode<'_>, battler: BattlerIndex, notice: Notice) -> bool {
    mode.emit(BattleEvent::Notice {
        battler: Some(battler),
        notice,
    });
    false
}

fn revealed(mode: &mut Mode<'_>, battler: BattlerIndex, ability: Ability, notice: Notice) -> bool {
    mode.emit(BattleEvent::AbilityRevealed { battler, ability });
    blocked(mode, battler, notice)
}

/// Whether `effect` can be inflicted on `target`.
///
/// Checks run in order: current status (only a different one blocks when
/// `overriding`), Misty Terrain, type immunities, Electric Terrain against
/// sleep, sun against freeze, the target's ability, its side's shielding
/// abilities and Safeguard. Live calls report the reason.
pub fn can_set_status(
    view: &BattleView<'_>,
    target: BattlerIndex,
    effect: StatusEffect,
    source: Option<BattlerIndex>,
    overriding: bool,
    mode: &mut Mode<'_>,
) -> bool {
    let mon = view.mon(target);
    if effect != StatusEffect::Faint {
        let present = match mon.status_effect() {
            Some(current) if overriding => current == effect,
            Some(_) => true,
            None => false,
        };
        if present {
            return blocked(mode, target, Notice::StatusAlreadyPresent(effect));
        }
        if view.field.terrain == Some(Terrain::Misty) && view.is_grounded(target) {
            return blocked(mode, target, Notice::StatusBlocked(effect));
        }
    }

    let source_ability = source.map(|s| view.ability(s, false));
    let types = mon.effective_types();
    let type_immune = match effect {
        StatusEffect::Poison | StatusEffect::Toxic => types.iter().any(|&t| {
            matches!(t, Type::Poison | Type::Steel)
                && !source_ability
                    .is_some_and(|a| abilities::ignores_status_immunity(a, effect, t))
        }),
        StatusEffect::Paralysis => types.contains(&Type::Electric),
        StatusEffect::Sleep => {
            view.field.terrain == Some(Terrain::Electric) && view.is_grounded(target)
        }
        StatusEffect::Freeze => {
            types.contains(&Type::Ice) || view.weather().is_some_and(|w| w.is_sunny())
        }
        StatusEffect::Burn => types.contains(&Type::Fire),
        StatusEffect::Faint => false,
    };
    if type_immune {
        return blocked(mode, target, Notice::StatusBlocked(effect));
    }

    let broken = source
        .is_some_and(|s| s != target && view.mon(s).ability == Ability::MoldBreaker);
    let own = view.ability(target, broken);
    if abilities::blocks_own_status(own, effect, view.weather()) {
        return revealed(mode, target, own, Notice::StatusBlocked(effect));
    }
    for member in view.allied_field(target) {
        let ability = view.ability(member, broken);
        if ability.shields_allies_from(effect) {
            return revealed(mode, member, ability, Notice::StatusBlocked(effect));
        }
    }

    if let Some(source) = source {
        let safeguarded = source != target
            && view.field.side_has(mon.side, SideCondition::Safeguard)
            && !source_ability.is_some_and(abilities::bypasses_screens);
        if safeguarded {
            return blocked(mode, target, Notice::ProtectedBySafeguard);
        }
    }
    true
}

/// Whether `tag` may be added to `target`, ignoring abilities and overlap
pub fn can_add_tag(view: &BattleView<'_>, target: BattlerIndex, tag: &Tag) -> bool {
    let mon = view.mon(target);
    match tag.kind {
        TagKind::Substitute => mon.hp.saturating_mul(4) > mon.max_hp(),
        TagKind::MagnetRisen | TagKind::Telekinesis => {
            !view.field.gravity && !mon.summon.tags.iter().any(|t| t.kind.is_grounding())
        }
        TagKind::Trapped | TagKind::Bound => {
            !mon.is_of_type(Type::Ghost) && !mon.summon.tags.iter().any(|t| t.kind.is_trap())
        }
        TagKind::Drowsy => {
            mon.status.is_none()
                && !(view.field.terrain == Some(Terrain::Electric) && view.is_grounded(target))
        }
        TagKind::Encore | TagKind::Disabled => {
            tag.tracked_move().or(mon.summon.last_move).is_some()
        }
        _ => true,
    }
}

/// Whether an ability on the target or its side refuses `kind`
fn tag_immunity(
    view: &BattleView<'_>,
    target: BattlerIndex,
    kind: TagKind,
) -> Option<(BattlerIndex, Ability)> {
    let own = view.ability(target, false);
    if abilities::blocks_own_tag(own, kind, view.weather()) {
        return Some((target, own));
    }
    view.allied_field(target).into_iter().find_map(|member| {
        let ability = view.ability(member, false);
        abilities::blocks_ally_tag(ability, kind).then_some((member, ability))
    })
}

impl Battle {
    /// Quiet status check, as the AI asks it
    pub fn can_set_status(
        &self,
        target: BattlerIndex,
        effect: StatusEffect,
        source: Option<BattlerIndex>,
    ) -> bool {
        if self.check(target).is_err() || source.is_some_and(|s| self.check(s).is_err()) {
            return false;
        }
        can_set_status(&self.view(), target, effect, source, false, &mut Mode::Simulated)
    }

    /// Inflict a status. Sleep lasts 2 to 4 turns and ends any charge or
    /// semi-invulnerable turn.
    pub fn try_set_status(
        &mut self,
        target: BattlerIndex,
        effect: StatusEffect,
        source: Option<BattlerIndex>,
    ) -> bool {
        if self.check(target).is_err() || source.is_some_and(|s| self.check(s).is_err()) {
            tracing::warn!(battler = %target, ?source, "status on unknown battler ignored");
            return false;
        }
        let mark = self.events().len();
        let allowed = {
            let (view, mut mode) = self.live();
            can_set_status(&view, target, effect, source, false, &mut mode)
        };
        self.sync_reveals(mark);
        if !allowed {
            return false;
        }
        if self.combatants()[target.0].is_fainted() && effect != StatusEffect::Faint {
            return false;
        }

        let mut sleep_turns = 0;
        if effect == StatusEffect::Sleep {
            let cleared: Vec<TagKind> = self.combatants()[target.0]
                .summon
                .tags
                .iter()
                .map(|t| t.kind)
                .filter(|k| k.is_cleared_by_sleep())
                .collect();
            if !cleared.is_empty() {
                for kind in cleared {
                    self.remove_tag(target, kind);
                }
                self.mon_mut(target).summon.move_queue.clear();
            }
            sleep_turns = self.rng_mut().int_range(SLEEP_TURNS_MIN, SLEEP_TURNS_MAX) as u8;
            self.emit(BattleEvent::Notice {
                battler: Some(target),
                notice: Notice::FellAsleep,
            });
        }

        let status = Status::new(effect, sleep_turns);
        self.mon_mut(target).status = Some(status);
        tracing::debug!(battler = %target, %status, "status set");
        self.emit(BattleEvent::StatusChange {
            battler: target,
            status: Some(effect),
        });
        true
    }

    /// Clear a non-faint status. Returns whether anything was cured.
    pub fn cure_status(&mut self, target: BattlerIndex) -> bool {
        let Some(mon) = self.combatant_mut(target) else {
            return false;
        };
        match mon.status {
            Some(status) if !status.is(StatusEffect::Faint) => {
                mon.status = None;
                self.emit(BattleEvent::StatusChange {
                    battler: target,
                    status: None,
                });
                true
            }
            _ => false,
        }
    }

    /// Add a tag. A tag already present overlaps instead; ability
    /// immunities and the tag's own conditions can refuse it.
    pub fn add_tag(&mut self, target: BattlerIndex, tag: Tag) -> bool {
        if self.check(target).is_err() {
            tracing::warn!(battler = %target, tag = %tag.kind, "tag on unknown battler ignored");
            return false;
        }
        let kind = tag.kind;
        if self.combatants()[target.0].has_tag(kind) {
            self.overlap_tag(target, kind);
            return false;
        }

        let (immunity, allowed) = {
            let view = self.view();
            (tag_immunity(&view, target, kind), can_add_tag(&view, target, &tag))
        };
        if let Some((holder, ability)) = immunity {
            let mark = self.events().len();
            self.emit(BattleEvent::AbilityRevealed {
                battler: holder,
                ability,
            });
            self.emit(BattleEvent::Notice {
                battler: Some(target),
                notice: Notice::TagBlocked(kind),
            });
            self.sync_reveals(mark);
            return false;
        }
        if !allowed {
            tracing::trace!(battler = %target, tag = %kind, "tag refused");
            return false;
        }

        self.mon_mut(target).summon.tags.push(tag);
        self.on_tag_added(target, kind);
        self.emit(BattleEvent::TagAdded {
            battler: target,
            tag: kind,
        });
        true
    }

    fn on_tag_added(&mut self, target: BattlerIndex, kind: TagKind) {
        match kind {
            TagKind::SmackedDown => {
                let lifted: Vec<TagKind> = self.combatants()[target.0]
                    .summon
                    .tags
                    .iter()
                    .map(|t| t.kind)
                    .filter(|k| k.is_floating() || *k == TagKind::Flying)
                    .collect();
                for lifted in lifted {
                    self.remove_tag(target, lifted);
                }
            }
            TagKind::Substitute => {
                let mon = self.mon_mut(target);
                let hp = mon.max_hp() / 4;
                if let Some(tag) = mon.tag_mut(kind) {
                    tag.payload = TagPayload::Hp(hp);
                }
                self.emit(BattleEvent::Notice {
                    battler: Some(target),
                    notice: Notice::SubstituteCreated,
                });
            }
            TagKind::DragonCheer => {
                let mon = self.mon_mut(target);
                let layers = dragon_cheer_layers(&mon.effective_types());
                if let Some(tag) = mon.tag_mut(kind) {
                    tag.payload = TagPayload::Layers(layers);
                }
            }
            TagKind::Stockpiling => {
                if let Some(tag) = self.mon_mut(target).tag_mut(kind) {
                    tag.payload = TagPayload::Layers(1);
                }
                self.emit(BattleEvent::Notice {
                    battler: Some(target),
                    notice: Notice::StockpileLayers(1),
                });
            }
            TagKind::Encore | TagKind::Disabled => {
                let mon = self.mon_mut(target);
                let last = mon.summon.last_move;
                if let Some(tag) = mon.tag_mut(kind) {
                    if tag.tracked_move().is_none() {
                        if let Some(id) = last {
                            tag.payload = TagPayload::Move(id);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn overlap_tag(&mut self, target: BattlerIndex, kind: TagKind) {
        if kind == TagKind::Stockpiling {
            let stacked = self.mon_mut(target).tag_mut(kind).and_then(|tag| {
                let layers = tag.layers();
                (layers < MAX_STOCKPILE).then(|| {
                    tag.payload = TagPayload::Layers(layers + 1);
                    layers + 1
                })
            });
            if let Some(layers) = stacked {
                self.emit(BattleEvent::Notice {
                    battler: Some(target),
                    notice: Notice::StockpileLayers(layers),
                });
            }
        }
        self.emit(BattleEvent::TagOverlap {
            battler: target,
            tag: kind,
        });
    }

    /// Remove a tag outright. Returns whether it was present.
    pub fn remove_tag(&mut self, target: BattlerIndex, kind: TagKind) -> bool {
        let Some(mon) = self.combatant_mut(target) else {
            return false;
        };
        let Some(pos) = mon.summon.tags.iter().position(|t| t.kind == kind) else {
            return false;
        };
        mon.summon.tags.remove(pos);
        self.emit(BattleEvent::TagRemoved {
            battler: target,
            tag: kind,
        });
        true
    }

    /// Run a CUSTOM lapse on one tag. Returns whether the tag was present;
    /// Endure and Sturdy hold, anything else is consumed.
    pub fn lapse_tag(&mut self, target: BattlerIndex, kind: TagKind) -> bool {
        let Some(mon) = self.combatant(target) else {
            return false;
        };
        if !mon.has_tag(kind) {
            return false;
        }
        if !kind.holds_on_custom_lapse() {
            self.remove_tag(target, kind);
        }
        true
    }

    /// Lapse every tag that listens to `lapse`. FAINT clears everything.
    pub fn lapse_tags(&mut self, target: BattlerIndex, lapse: LapseType) -> LapseReport {
        let mut report = LapseReport::default();
        let Some(mon) = self.combatant_mut(target) else {
            return report;
        };

        let mut exhausted = Vec::new();
        for tag in mon.summon.tags.iter_mut() {
            if lapse == LapseType::Faint {
                exhausted.push(tag.kind);
                continue;
            }
            if !tag.kind.lapse_types().contains(&lapse) {
                continue;
            }
            if tag.kind == TagKind::Flinched && lapse == LapseType::PreMove {
                report.move_cancelled = true;
            }
            let keep = if lapse == LapseType::Custom && tag.kind.holds_on_custom_lapse() {
                true
            } else {
                match tag.turns_left.as_mut() {
                    Some(turns) => {
                        *turns = turns.saturating_sub(1);
                        *turns > 0
                    }
                    None => lapse != LapseType::Custom,
                }
            };
            if !keep {
                exhausted.push(tag.kind);
            }
        }

        if report.move_cancelled {
            self.emit(BattleEvent::Notice {
                battler: Some(target),
                notice: Notice::Flinched,
            });
        }
        for kind in exhausted {
            self.remove_tag(target, kind);
            if kind == TagKind::Drowsy && lapse != LapseType::Faint {
                self.try_set_status(target, StatusEffect::Sleep, None);
            }
            report.removed.push(kind);
        }
        report
    }

    /// Undo links between `idx` and its partner when either leaves
    pub(crate) fn release_links(&mut self, idx: BattlerIndex) {
        let id = self.combatants()[idx.0].id;
        self.remove_tag(idx, TagKind::Commanded);
        let linked: Vec<BattlerIndex> = (0..self.combatants().len())
            .map(BattlerIndex)
            .filter(|&i| {
                self.combatants()[i.0]
                    .tag(TagKind::Commanded)
                    .is_some_and(|t| t.source == Some(id))
            })
            .collect();
        for other in linked {
            self.remove_tag(other, TagKind::Commanded);
        }
    }
}
