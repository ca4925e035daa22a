//! Effect resolution - the apply/unapply/handle lifecycle.
//!
//! `apply` installs an effect's hooks (listeners, flags, filters, auras,
//! deathrattle wrappers); `unapply` removes exactly what `apply` installed;
//! `handle` runs when one of the effect's listeners fires.
//!
//! The game keeps the per-player count registry current around these calls
//! (see [`Game::apply_effect`]), so the count-gated effects only look at the
//! count here.
//!
//! Two effects are deliberately not reversible: `SummonOnDeath` leaves the
//! deathrattle wrapper in place, and `StatsAura` leaves its aura alive until
//! the source minion leaves play.

use log::{debug, warn};
use smallvec::{smallvec, SmallVec};

use crate::auras::AuraPredicate;
use crate::cards::MinionType;
use crate::core::{EntityId, PlayerId};
use crate::error::Result;
use crate::events::{Character, EventKind, GameEvent};
use crate::game::{EventSource, Game, Handler};
use crate::mana::{CardFilter, ManaFilterEntry};

use super::deathrattle::Deathrattle;
use super::effect::{BuffSpec, EffectKind, EffectTag};
use super::instance::{EffectAction, EffectId};
use super::targeting::BuffTarget;

fn bind_players(
    game: &mut Game,
    id: EffectId,
    players: &[PlayerId],
    event: EventKind,
    handler: Handler,
) -> Result<()> {
    for &player in players {
        game.bind(EventSource::Player(player), event, handler);
    }
    game.effect_mut(id)?.state.bound_players = players.iter().copied().collect();
    Ok(())
}

fn unbind_players(game: &mut Game, players: &[PlayerId], event: EventKind, handler: &Handler) {
    for &player in players {
        game.unbind(EventSource::Player(player), event, handler);
    }
}

/// Install the effect's hooks.
pub(crate) fn apply(game: &mut Game, id: EffectId) -> Result<()> {
    let effect = game.effect(id)?;
    let kind = effect.kind.clone();
    let target = effect.target;
    let owner = game.minion(target)?.owner;
    let fire = Handler::fire(id);
    debug!("apply {} to {}", kind, target);

    match kind {
        EffectKind::KillMinion { when } => {
            let player = game.current_player();
            bind_players(game, id, &[player], when.event(), fire)?;
        }
        EffectKind::Immune => {
            game.minion_mut(target)?.immune = true;
            let player = game.current_player();
            bind_players(game, id, &[player], EventKind::TurnEnded, fire)?;
        }
        EffectKind::SummonOnDeath { card, count } => {
            let minion = game.minion_mut(target)?;
            let existing = minion.deathrattle.take();
            minion.deathrattle = Some(Deathrattle::chain(existing, Deathrattle::summon(card, count)));
        }
        EffectKind::DrawOnMinion { .. } => {
            bind_players(game, id, &[owner], EventKind::MinionPlaced, fire)?;
        }
        EffectKind::GrowIfSecret { .. } => {
            bind_players(game, id, &[owner], EventKind::TurnEnded, fire)?;
        }
        EffectKind::AddCardOnSpell { .. } => {
            bind_players(game, id, &[owner], EventKind::SpellCast, fire)?;
        }
        EffectKind::FreezeOnDamage | EffectKind::KillOnDamage => {
            game.bind(EventSource::Minion(target), EventKind::DidDamage, fire);
        }
        EffectKind::DrawOnAttack { .. } => {
            game.bind(EventSource::Minion(target), EventKind::Attack, fire);
        }
        EffectKind::Buff(spec) => {
            let players = spec.players.resolve(owner);
            bind_players(game, id, &players, spec.when.event(&spec.filter), fire)?;
        }
        EffectKind::ResurrectFriendlyMinionsAtEndOfTurn => {
            game.bind(EventSource::Player(owner), EventKind::MinionDied, fire);
            bind_players(game, id, &[owner, owner.opponent()], EventKind::TurnEnded, fire)?;
        }
        EffectKind::ChargeAura { players, .. } => {
            let players = players.resolve(owner);
            let target_type = game.minion(target)?.minion_type;
            if charge_qualifies(game, id, target_type)? {
                game.minion_mut(target)?.charge = true;
            }
            for &player in &players {
                let board: Vec<EntityId> = game.player(player).minions.iter().copied().collect();
                for minion in board {
                    charge_join(game, id, minion)?;
                }
            }
            bind_players(
                game,
                id,
                &players,
                EventKind::MinionPlayed,
                Handler::effect(id, EffectAction::ChargeJoined),
            )?;
        }
        EffectKind::StatsAura {
            attack,
            health,
            players,
            minion_type,
        } => {
            let players = players.resolve(owner);
            game.add_aura(target, attack, health, &players, AuraPredicate::from(minion_type))?;
        }
        EffectKind::IncreaseBattlecryMinionCost { amount } => {
            let filter = game.next_filter_id();
            let entry = ManaFilterEntry::new(filter, amount, 0, CardFilter::BattlecryMinion);
            let players: SmallVec<[PlayerId; 2]> = PlayerId::all().collect();
            for &player in &players {
                game.player_mut(player).mana_filters.push(entry);
            }
            let state = &mut game.effect_mut(id)?.state;
            state.filter = Some(filter);
            state.bound_players = players;
        }
        EffectKind::ManaFilter {
            amount,
            filter,
            minimum,
            players,
        } => {
            let filter_id = game.next_filter_id();
            let entry = ManaFilterEntry::new(filter_id, -amount, minimum, filter);
            let players = players.resolve(owner);
            for &player in &players {
                game.player_mut(player).mana_filters.push(entry);
            }
            let state = &mut game.effect_mut(id)?.state;
            state.filter = Some(filter_id);
            state.bound_players = players;
        }
        EffectKind::DoubleDeathrattle => {
            if game.player(owner).effect_count.count(EffectTag::DoubleDeathrattle) == 1 {
                game.bind(
                    EventSource::Player(owner),
                    EventKind::MinionDied,
                    Handler::DoubleDeathrattle,
                );
            }
            game.effect_mut(id)?.state.bound_players = smallvec![owner];
        }
        EffectKind::HealAsDamage => {
            if game.player(owner).effect_count.count(EffectTag::HealAsDamage) == 1 {
                game.player_mut(owner).heal_does_damage = true;
            }
            game.effect_mut(id)?.state.bound_players = smallvec![owner];
        }
    }
    Ok(())
}

/// Remove the effect's hooks.
pub(crate) fn unapply(game: &mut Game, id: EffectId) -> Result<()> {
    let effect = game.effect_mut(id)?;
    let kind = effect.kind.clone();
    let target = effect.target;
    let bound = std::mem::take(&mut effect.state.bound_players);
    let fire = Handler::fire(id);
    debug!("unapply {} from {}", kind, target);

    match kind {
        EffectKind::KillMinion { when } => {
            unbind_players(game, &bound, when.event(), &fire);
        }
        EffectKind::Immune => {
            if let Ok(minion) = game.minion_mut(target) {
                minion.immune = false;
            }
            unbind_players(game, &bound, EventKind::TurnEnded, &fire);
        }
        EffectKind::SummonOnDeath { .. } | EffectKind::StatsAura { .. } => {}
        EffectKind::DrawOnMinion { .. } => {
            unbind_players(game, &bound, EventKind::MinionPlaced, &fire);
        }
        EffectKind::GrowIfSecret { .. } => {
            unbind_players(game, &bound, EventKind::TurnEnded, &fire);
        }
        EffectKind::AddCardOnSpell { .. } => {
            unbind_players(game, &bound, EventKind::SpellCast, &fire);
        }
        EffectKind::FreezeOnDamage | EffectKind::KillOnDamage => {
            game.unbind(EventSource::Minion(target), EventKind::DidDamage, &fire);
        }
        EffectKind::DrawOnAttack { .. } => {
            game.unbind(EventSource::Minion(target), EventKind::Attack, &fire);
        }
        EffectKind::Buff(spec) => {
            unbind_players(game, &bound, spec.when.event(&spec.filter), &fire);
        }
        EffectKind::ResurrectFriendlyMinionsAtEndOfTurn => {
            if let Some(&owner) = bound.first() {
                game.unbind(EventSource::Player(owner), EventKind::MinionDied, &fire);
            }
            unbind_players(game, &bound, EventKind::TurnEnded, &fire);
            game.effect_mut(id)?.state.pending_resurrection.clear();
        }
        EffectKind::ChargeAura { .. } => {
            unbind_players(
                game,
                &bound,
                EventKind::MinionPlayed,
                &Handler::effect(id, EffectAction::ChargeJoined),
            );
            let (watched, temporary, permanent) = {
                let tracker = &mut game.effect_mut(id)?.state.charge;
                (
                    tracker.drain_watched(),
                    tracker.drain_temporary(),
                    tracker.drain_permanent(),
                )
            };
            for minion in watched {
                game.unbind(
                    EventSource::Minion(minion),
                    EventKind::Silenced,
                    &Handler::effect(id, EffectAction::ChargeAdopt(minion)),
                );
            }
            for minion in temporary {
                game.unbind(
                    EventSource::Minion(minion),
                    EventKind::Silenced,
                    &Handler::effect(id, EffectAction::ChargeMigrate(minion)),
                );
                if !hand_over_charge(game, id, minion)? {
                    if let Ok(m) = game.minion_mut(minion) {
                        m.charge = false;
                    }
                }
            }
            for minion in permanent {
                detach_permanent(game, id, minion);
            }
        }
        EffectKind::IncreaseBattlecryMinionCost { .. } | EffectKind::ManaFilter { .. } => {
            if let Some(filter) = game.effect_mut(id)?.state.filter.take() {
                for &player in &bound {
                    game.player_mut(player).mana_filters.remove(filter);
                }
            }
        }
        EffectKind::DoubleDeathrattle => {
            for &owner in &bound {
                if game.player(owner).effect_count.count(EffectTag::DoubleDeathrattle) == 0 {
                    game.unbind(
                        EventSource::Player(owner),
                        EventKind::MinionDied,
                        &Handler::DoubleDeathrattle,
                    );
                }
            }
        }
        EffectKind::HealAsDamage => {
            for &owner in &bound {
                if game.player(owner).effect_count.count(EffectTag::HealAsDamage) == 0 {
                    game.player_mut(owner).heal_does_damage = false;
                }
            }
        }
    }
    Ok(())
}

/// Run one of the effect's listeners.
pub(crate) fn handle(
    game: &mut Game,
    id: EffectId,
    action: EffectAction,
    event: &GameEvent,
) -> Result<()> {
    let effect = game.effect(id)?;
    let kind = effect.kind.clone();
    let target = effect.target;

    match (kind, action) {
        (EffectKind::KillMinion { .. }, EffectAction::Fire) => game.die(target, None),
        (EffectKind::Immune, EffectAction::Fire) => {
            game.minion_mut(target)?.immune = false;
            Ok(())
        }
        (EffectKind::DrawOnMinion { minion_type }, EffectAction::Fire) => {
            let Some(placed) = event.minion else {
                return Ok(());
            };
            if placed != target && minion_type.matches(game.minion(placed)?.minion_type) {
                let owner = game.minion(target)?.owner;
                game.draw(owner)?;
            }
            Ok(())
        }
        (EffectKind::GrowIfSecret { attack, health }, EffectAction::Fire) => {
            let owner = game.minion(target)?.owner;
            if !game.player(owner).secrets.is_empty() {
                game.change_attack(target, attack)?;
                game.increase_health(target, health)?;
            }
            Ok(())
        }
        (EffectKind::AddCardOnSpell { card }, EffectAction::Fire) => {
            let owner = game.minion(target)?.owner;
            let max_hand = game.config().max_hand_size;
            let hand = &mut game.player_mut(owner).hand;
            if hand.len() < max_hand {
                hand.push_back(card);
            }
            Ok(())
        }
        (EffectKind::FreezeOnDamage, EffectAction::Fire) => match event.character {
            Some(damaged) => game.freeze(damaged),
            None => Ok(()),
        },
        (EffectKind::KillOnDamage, EffectAction::Fire) => match event.character {
            Some(Character::Minion(damaged)) => game.die(damaged, Some(Character::Minion(target))),
            _ => Ok(()),
        },
        (EffectKind::DrawOnAttack { amount, first_player }, EffectAction::Fire) => {
            let player = PlayerId::new(if first_player { 0 } else { 1 });
            for _ in 0..amount {
                game.draw(player)?;
            }
            Ok(())
        }
        (EffectKind::Buff(spec), EffectAction::Fire) => fire_buff(game, target, &spec, event),
        (EffectKind::ResurrectFriendlyMinionsAtEndOfTurn, EffectAction::Fire) => {
            resurrect(game, id, target, event)
        }
        (EffectKind::ChargeAura { .. }, EffectAction::ChargeJoined) => match event.minion {
            Some(minion) => charge_join(game, id, minion),
            None => Ok(()),
        },
        (EffectKind::ChargeAura { .. }, EffectAction::ChargeAdopt(minion)) => {
            charge_adopt(game, id, minion)
        }
        (EffectKind::ChargeAura { .. }, EffectAction::ChargeMigrate(minion)) => {
            charge_migrate(game, id, minion)
        }
        (EffectKind::ChargeAura { .. }, EffectAction::ChargeRevoke(minion)) => {
            charge_revoke(game, id, minion)
        }
        (EffectKind::ChargeAura { .. }, EffectAction::ChargeCopied(minion)) => {
            charge_copied(game, id, minion, event)
        }
        (kind, action) => {
            warn!("{} has no handler for {:?}", kind, action);
            Ok(())
        }
    }
}

fn fire_buff(game: &mut Game, source: EntityId, spec: &BuffSpec, event: &GameEvent) -> Result<()> {
    let fires = if spec.when.is_turn_edge() {
        true
    } else if spec.filter.is_card_filter() {
        match event.card {
            Some(card) => spec.filter.matches_card(game.cards().lookup(card)?),
            None => false,
        }
    } else {
        match event.minion {
            Some(minion) => {
                let m = game.minion(minion)?;
                spec.filter
                    .matches_minion(m.id, m.minion_type, m.deathrattle.is_some(), source)
            }
            None => false,
        }
    };
    if !fires {
        return Ok(());
    }

    let owner = game.minion(source)?.owner;
    let recipient = match spec.target {
        BuffTarget::SelfOnly => Some(source),
        BuffTarget::Random => {
            let candidates = board_except(game, &[owner, owner.opponent()], source);
            game.rng_mut().choose(&candidates)
        }
        BuffTarget::RandomFriendly => {
            let candidates = board_except(game, &[owner], source);
            game.rng_mut().choose(&candidates)
        }
        BuffTarget::RandomEnemy => {
            let candidates = board_except(game, &[owner.opponent()], source);
            game.rng_mut().choose(&candidates)
        }
    };
    let Some(recipient) = recipient else {
        debug!("buff from {} has no {} target", source, spec.target.as_str());
        return Ok(());
    };

    if spec.health > 0 {
        game.increase_health(recipient, spec.health)?;
    } else if spec.health < 0 {
        game.decrease_health(recipient, -spec.health)?;
    }
    if spec.attack != 0 {
        game.change_attack(recipient, spec.attack)?;
    }
    Ok(())
}

fn board_except(game: &Game, players: &[PlayerId], except: EntityId) -> Vec<EntityId> {
    players
        .iter()
        .flat_map(|&p| game.player(p).minions.iter().copied())
        .filter(|&m| m != except)
        .collect()
}

fn resurrect(game: &mut Game, id: EffectId, source: EntityId, event: &GameEvent) -> Result<()> {
    match event.kind {
        EventKind::MinionDied => {
            if let Some(dead) = event.minion {
                let card = game.minion(dead)?.card;
                game.effect_mut(id)?.state.pending_resurrection.push(card);
            }
        }
        EventKind::TurnEnded => {
            let cards = std::mem::take(&mut game.effect_mut(id)?.state.pending_resurrection);
            let owner = game.minion(source)?.owner;
            for card in cards {
                let end = game.player(owner).minions.len();
                game.summon(card, owner, end)?;
            }
        }
        _ => {}
    }
    Ok(())
}

// === Charge aura ===

fn charge_qualifies(game: &Game, id: EffectId, minion_type: MinionType) -> Result<bool> {
    match &game.effect(id)?.kind {
        EffectKind::ChargeAura { minion_type: filter, .. } => Ok(filter.matches(minion_type)),
        _ => Ok(false),
    }
}

fn charge_join(game: &mut Game, id: EffectId, minion: EntityId) -> Result<()> {
    let effect = game.effect(id)?;
    if !effect.applied {
        return Ok(());
    }
    let target = effect.target;
    let m = game.minion(minion)?;
    if m.dead || !charge_qualifies(game, id, m.minion_type)? {
        return Ok(());
    }
    if minion == target {
        game.minion_mut(minion)?.charge = true;
        return Ok(());
    }
    if game.effect(id)?.state.charge.contains(minion) {
        return Ok(());
    }

    if m.charge {
        // Own charge, or another aura's. Take over if it goes away.
        game.effect_mut(id)?.state.charge.watch(minion);
        game.bind_once(
            EventSource::Minion(minion),
            EventKind::Silenced,
            Handler::effect(id, EffectAction::ChargeAdopt(minion)),
        );
        return Ok(());
    }

    game.minion_mut(minion)?.charge = true;
    grant_temporary(game, id, minion)
}

fn grant_temporary(game: &mut Game, id: EffectId, minion: EntityId) -> Result<()> {
    game.effect_mut(id)?.state.charge.track_temporary(minion);
    game.bind_once(
        EventSource::Minion(minion),
        EventKind::Silenced,
        Handler::effect(id, EffectAction::ChargeMigrate(minion)),
    );
    Ok(())
}

fn charge_adopt(game: &mut Game, id: EffectId, minion: EntityId) -> Result<()> {
    if adopt_watched(game, id, minion)? {
        game.minion_mut(minion)?.charge = true;
    }
    Ok(())
}

fn adopt_watched(game: &mut Game, id: EffectId, minion: EntityId) -> Result<bool> {
    if !game.effect_mut(id)?.state.charge.adopt(minion) {
        return Ok(false);
    }
    game.bind_once(
        EventSource::Minion(minion),
        EventKind::Silenced,
        Handler::effect(id, EffectAction::ChargeMigrate(minion)),
    );
    Ok(true)
}

/// Pass a temporary grant from a departing aura to another one watching the
/// minion. Returns whether one took it.
fn hand_over_charge(game: &mut Game, from: EffectId, minion: EntityId) -> Result<bool> {
    let heirs = game.applied_effects(|e| e.id != from && e.state.charge.is_watched(minion));
    let Some(&heir) = heirs.first() else {
        return Ok(false);
    };
    game.unbind(
        EventSource::Minion(minion),
        EventKind::Silenced,
        &Handler::effect(heir, EffectAction::ChargeAdopt(minion)),
    );
    adopt_watched(game, heir, minion)
}

fn charge_migrate(game: &mut Game, id: EffectId, minion: EntityId) -> Result<()> {
    if !game.effect_mut(id)?.state.charge.promote(minion) {
        return Ok(());
    }
    game.minion_mut(minion)?.charge = true;
    game.bind(
        EventSource::Minion(minion),
        EventKind::Silenced,
        Handler::effect(id, EffectAction::ChargeRevoke(minion)),
    );
    game.bind(
        EventSource::Minion(minion),
        EventKind::Copied,
        Handler::effect(id, EffectAction::ChargeCopied(minion)),
    );
    Ok(())
}

fn charge_revoke(game: &mut Game, id: EffectId, minion: EntityId) -> Result<()> {
    if game.effect_mut(id)?.state.charge.release(minion) {
        game.minion_mut(minion)?.charge = false;
        detach_permanent(game, id, minion);
    }
    Ok(())
}

fn charge_copied(game: &mut Game, id: EffectId, minion: EntityId, event: &GameEvent) -> Result<()> {
    if let Some(copy) = event.minion {
        game.minion_mut(copy)?.charge = false;
    }
    if game.effect_mut(id)?.state.charge.release(minion) {
        detach_permanent(game, id, minion);
    }
    Ok(())
}

fn detach_permanent(game: &mut Game, id: EffectId, minion: EntityId) {
    game.unbind(
        EventSource::Minion(minion),
        EventKind::Silenced,
        &Handler::effect(id, EffectAction::ChargeRevoke(minion)),
    );
    game.unbind(
        EventSource::Minion(minion),
        EventKind::Copied,
        &Handler::effect(id, EffectAction::ChargeCopied(minion)),
    );
}
