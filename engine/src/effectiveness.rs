//! Type effectiveness against a specific combatant

use kazam_dex::{MoveAttr, MoveData, TagKind, Type};

use crate::abilities;
use crate::battle::BattleView;
use crate::events::{BattleEvent, Notice};
use crate::mode::Mode;
use crate::pipeline::Pipeline;
use crate::power;
use crate::types::{BattlerIndex, Weather};

/// Effectiveness of a move, and whether an ability cancelled it outright
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effectiveness {
    pub multiplier: f64,
    pub cancelled: bool,
}

/// Chart multiplier of `move_type` against `defender`.
///
/// Handles Stellar, Ground against grounded Flying types, chart overrides
/// from the move, immunity bypasses and Strong Winds. Abilities on the
/// defender are not consulted here; see [`move_effectiveness`].
pub fn attack_type_effectiveness(
    view: &BattleView<'_>,
    defender: BattlerIndex,
    move_type: Type,
    source: Option<BattlerIndex>,
    data: Option<&MoveData>,
    ignore_strong_winds: bool,
    mode: &mut Mode<'_>,
) -> f64 {
    let target = view.mon(defender);
    if move_type == Type::Stellar {
        return if target.terastallized { 2.0 } else { 1.0 };
    }

    let mut types = target.effective_types();
    let hits_airborne =
        data.is_some_and(|m| m.attrs().any(|a| matches!(a, MoveAttr::HitsAirborne)));
    if move_type == Type::Ground && (view.is_grounded(defender) || hits_airborne) {
        types.retain(|t| *t != Type::Flying);
    }

    let source_ability = source
        .filter(|&s| view.mon(s).is_active())
        .map(|s| view.ability(s, false));

    let multiplier: f64 = types
        .iter()
        .map(|&defending| {
            let mut value = move_type.effectiveness(defending);
            if let Some(data) = data {
                for attr in data.attrs() {
                    if let MoveAttr::TypeChartOverride {
                        against,
                        multiplier,
                    } = attr
                    {
                        if *against == defending {
                            value = *multiplier;
                        }
                    }
                }
            }
            if source.is_some() && value == 0.0 {
                let scrappy = source_ability
                    .is_some_and(|a| abilities::ignores_type_immunity(a, move_type, defending));
                let foresight = target.has_tag(TagKind::Foresight);
                let miracle_eye = target.has_tag(TagKind::MiracleEye);
                if scrappy || exposed(foresight, miracle_eye, move_type, defending) {
                    value = 1.0;
                }
            }
            value
        })
        .product();

    if !ignore_strong_winds
        && view.weather() == Some(Weather::StrongWinds)
        && target.is_of_type(Type::Flying)
        && move_type.effectiveness(Type::Flying) == 2.0
    {
        mode.emit(BattleEvent::Notice {
            battler: Some(defender),
            notice: Notice::WindsWeakenedAttack,
        });
        return multiplier / 2.0;
    }
    multiplier
}

/// Foresight lets Normal and Fighting hit Ghost; Miracle Eye lets Psychic hit Dark
fn exposed(foresight: bool, miracle_eye: bool, move_type: Type, defending: Type) -> bool {
    (foresight && defending == Type::Ghost && matches!(move_type, Type::Normal | Type::Fighting))
        || (miracle_eye && defending == Type::Dark && move_type == Type::Psychic)
}

/// Full effectiveness of `attacker`'s move against `defender`.
///
/// Status moves start neutral. Defender abilities may cancel the move
/// unless `ignore_ability` is set; floating tags make Ground moves miss
/// unless the move specifically reaches them.
pub fn move_effectiveness(
    view: &BattleView<'_>,
    attacker: BattlerIndex,
    defender: BattlerIndex,
    data: &MoveData,
    ignore_ability: bool,
    mode: &mut Mode<'_>,
) -> Effectiveness {
    let move_type = power::move_type(view, attacker, data);
    let mut multiplier = if data.is_attack() {
        attack_type_effectiveness(view, defender, move_type, Some(attacker), Some(data), false, mode)
    } else {
        1.0
    };

    let mut cancelled = false;
    if !ignore_ability && attacker != defender {
        let broken = view.breaks_abilities(attacker, data);
        let ability = view.ability(defender, broken);
        let mut pipeline = Pipeline::new();
        abilities::push_immunity_hooks(
            &mut pipeline,
            ability,
            data,
            move_type,
            view.is_grounded_with(defender, broken),
        );
        let applied = pipeline.run(multiplier);
        multiplier = applied.value;
        if applied.cancelled {
            cancelled = true;
            tracing::debug!(
                battler = %defender,
                ?ability,
                move_name = %data.name,
                "move blocked by ability"
            );
            mode.emit(BattleEvent::AbilityRevealed {
                battler: defender,
                ability,
            });
        }
    }

    if move_type == Type::Ground {
        let target = view.mon(defender);
        let floating = target
            .summon
            .tags
            .iter()
            .any(|t| t.kind.is_floating() && !data.hits_tag(t.kind));
        if floating {
            multiplier = 0.0;
        }
    }

    Effectiveness {
        multiplier: if cancelled { 0.0 } else { multiplier },
        cancelled,
    }
}
