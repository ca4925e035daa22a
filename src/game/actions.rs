//! Board actions: turns, summoning, playing cards, combat, death, silence.
//!
//! Every action publishes its events on the relevant bus as it goes, so any
//! of these can be re-entered from inside a listener.

use log::debug;

use crate::cards::{CardDefinition, CardId, CardKind};
use crate::core::{EntityId, PlayerId};
use crate::effects::DeathrattleAction;
use crate::error::{EngineError, Result};
use crate::events::{Character, EventHost, GameEvent};

use super::handler::EventSource;
use super::minion::Minion;
use super::state::Game;

impl Game {
    // === Turns ===

    /// Publish `turn_started` for the current player, then on the game bus.
    pub fn start_turn(&mut self) -> Result<()> {
        let player = self.current_player();
        debug!("{} starts turn {}", player, self.turn());
        self.publish(EventSource::Player(player), &GameEvent::turn_started())?;
        self.publish(EventSource::Game, &GameEvent::turn_started())
    }

    /// Publish `turn_ended` for the current player, then on the game bus,
    /// then pass the turn.
    pub fn end_turn(&mut self) -> Result<()> {
        let player = self.current_player();
        debug!("{} ends turn {}", player, self.turn());
        self.publish(EventSource::Player(player), &GameEvent::turn_ended())?;
        self.publish(EventSource::Game, &GameEvent::turn_ended())?;
        self.pass_turn();
        Ok(())
    }

    // === Board ===

    fn board_full(&self, player: PlayerId) -> bool {
        self.player(player).minions.len() >= self.config().max_board_size
    }

    /// Create the minion, put it on the board and attach its card effects.
    fn place_minion(
        &mut self,
        card: &CardDefinition,
        player: PlayerId,
        position: usize,
    ) -> Result<EntityId> {
        let id = self.next_entity_id();
        self.insert_minion(Minion::from_card(id, card, player)?);

        let board = &mut self.player_mut(player).minions;
        let index = position.min(board.len());
        board.insert(index, id);

        if let Some(stats) = card.minion_stats() {
            for kind in &stats.effects {
                self.add_effect(id, kind.clone())?;
            }
        }
        Ok(id)
    }

    /// Summon a minion from its card at `position` (clamped to the board).
    ///
    /// Returns `None` without doing anything when the board is full.
    pub fn summon(
        &mut self,
        card: CardId,
        player: PlayerId,
        position: usize,
    ) -> Result<Option<EntityId>> {
        let definition = self.cards().lookup(card)?.clone();
        if !definition.is_minion() {
            return Err(EngineError::NotAMinion(card));
        }
        if self.board_full(player) {
            debug!("{} board full, {} not summoned", player, definition.name);
            return Ok(None);
        }

        let id = self.place_minion(&definition, player, position)?;
        debug!("summon {} ({}) for {}", id, definition.name, player);
        self.publish(EventSource::Player(player), &GameEvent::minion_placed(id))?;
        self.publish(EventSource::Player(player), &GameEvent::minion_summoned(id))?;
        Ok(Some(id))
    }

    /// Play the card at `hand_index`, paying its filtered cost.
    ///
    /// Returns the new minion for minion cards. A minion card is not played
    /// (and nothing is paid) when the board is full.
    pub fn play_card(&mut self, player: PlayerId, hand_index: usize) -> Result<Option<EntityId>> {
        let card = *self
            .player(player)
            .hand
            .get(hand_index)
            .ok_or(EngineError::HandIndexOutOfRange {
                player,
                index: hand_index,
            })?;
        let definition = self.cards().lookup(card)?.clone();
        let cost = self.player(player).effective_cost(&definition);
        let available = self.player(player).mana;
        if cost > available {
            return Err(EngineError::InsufficientMana {
                player,
                cost,
                available,
            });
        }
        if definition.is_minion() && self.board_full(player) {
            debug!("{} board full, cannot play {}", player, definition.name);
            return Ok(None);
        }

        let state = self.player_mut(player);
        state.hand.remove(hand_index);
        state.mana -= cost;
        debug!("{} plays {} for {}", player, definition.name, cost);

        let source = EventSource::Player(player);
        match &definition.kind {
            CardKind::Minion(_) => {
                let end = self.player(player).minions.len();
                let id = self.place_minion(&definition, player, end)?;
                self.publish(source, &GameEvent::minion_placed(id))?;
                self.publish(source, &GameEvent::minion_played(id))?;
                self.publish(source, &GameEvent::card_played(card))?;
                Ok(Some(id))
            }
            CardKind::Spell => {
                self.publish(source, &GameEvent::card_played(card))?;
                self.publish(source, &GameEvent::spell_cast(card))?;
                Ok(None)
            }
            CardKind::Secret => {
                self.player_mut(player).secrets.push_back(card);
                self.publish(source, &GameEvent::card_played(card))?;
                self.publish(source, &GameEvent::spell_cast(card))?;
                Ok(None)
            }
        }
    }

    /// Draw the top card of the deck. Cards drawn into a full hand are
    /// discarded; an empty deck draws nothing.
    pub fn draw(&mut self, player: PlayerId) -> Result<Option<CardId>> {
        let max_hand = self.config().max_hand_size;
        let state = self.player_mut(player);
        let Some(card) = state.deck.pop_front() else {
            debug!("{} has no cards left to draw", player);
            return Ok(None);
        };
        if state.hand.len() >= max_hand {
            debug!("{} burns {}", player, card);
            return Ok(None);
        }
        state.hand.push_back(card);
        Ok(Some(card))
    }

    /// Put a copy of `minion` on `new_owner`'s board.
    ///
    /// The copy carries the original's stat changes, keywords and deathrattle.
    /// `copied` is published on the original before the copy is announced.
    pub fn copy_minion(&mut self, minion: EntityId, new_owner: PlayerId) -> Result<Option<EntityId>> {
        let original = self.minion(minion)?;
        let card = original.card;
        let (attack_bonus, health_bonus, damage) =
            (original.attack_bonus, original.health_bonus, original.damage);
        let (charge, frozen, silenced) = (original.charge, original.frozen, original.silenced);
        let deathrattle = original.deathrattle.clone();

        if self.board_full(new_owner) {
            debug!("{} board full, {} not copied", new_owner, minion);
            return Ok(None);
        }
        let definition = self.cards().lookup(card)?.clone();
        let end = self.player(new_owner).minions.len();
        let copy = self.place_minion(&definition, new_owner, end)?;

        if silenced {
            let effects = self.minion(copy)?.effects.clone();
            for effect in effects {
                self.remove_effect(effect)?;
            }
        }
        let m = self.minion_mut(copy)?;
        m.attack_bonus = attack_bonus;
        m.health_bonus = health_bonus;
        m.damage = damage;
        m.charge = charge;
        m.frozen = frozen;
        m.silenced = silenced;
        m.deathrattle = deathrattle;
        debug!("copy {} as {} for {}", minion, copy, new_owner);

        self.publish(EventSource::Minion(minion), &GameEvent::copied(copy, new_owner))?;
        self.publish(EventSource::Player(new_owner), &GameEvent::minion_placed(copy))?;
        self.publish(EventSource::Player(new_owner), &GameEvent::minion_summoned(copy))?;
        Ok(Some(copy))
    }

    // === Stat changes ===

    pub fn change_attack(&mut self, minion: EntityId, delta: i64) -> Result<()> {
        self.minion_mut(minion)?.attack_bonus += delta;
        Ok(())
    }

    /// Raise max (and current) health.
    pub fn increase_health(&mut self, minion: EntityId, amount: i64) -> Result<()> {
        self.minion_mut(minion)?.health_bonus += amount;
        Ok(())
    }

    /// Lower max health. The minion dies if that leaves it at 0 or less.
    pub fn decrease_health(&mut self, minion: EntityId, amount: i64) -> Result<()> {
        self.minion_mut(minion)?.health_bonus -= amount;
        if !self.minion(minion)?.dead && self.health_of(minion)? <= 0 {
            self.die(minion, None)?;
        }
        Ok(())
    }

    pub fn freeze(&mut self, character: Character) -> Result<()> {
        match character {
            Character::Hero(player) => self.player_mut(player).hero_frozen = true,
            Character::Minion(minion) => self.minion_mut(minion)?.frozen = true,
        }
        Ok(())
    }

    // === Combat ===

    /// Deal damage from `source` (if a minion did it) to `target`.
    ///
    /// Immune minions take nothing and nothing is published. Otherwise the
    /// victim's owner hears `minion_damaged`, the source hears `did_damage`,
    /// and a minion left at 0 health or less dies.
    pub fn deal_damage(
        &mut self,
        source: Option<EntityId>,
        target: Character,
        amount: i64,
    ) -> Result<()> {
        if amount <= 0 {
            return Ok(());
        }
        match target {
            Character::Hero(player) => {
                self.player_mut(player).hero_health -= amount;
            }
            Character::Minion(victim) => {
                let minion = self.minion_mut(victim)?;
                if minion.dead {
                    return Ok(());
                }
                if minion.immune {
                    debug!("{} is immune to {} damage", victim, amount);
                    return Ok(());
                }
                minion.damage += amount;
                let owner = minion.owner;
                self.publish(
                    EventSource::Player(owner),
                    &GameEvent::minion_damaged(victim, amount),
                )?;
            }
        }

        if let Some(source) = source {
            self.publish(
                EventSource::Minion(source),
                &GameEvent::did_damage(amount, target),
            )?;
        }

        if let Character::Minion(victim) = target {
            if !self.minion(victim)?.dead && self.health_of(victim)? <= 0 {
                self.die(victim, source.map(Character::Minion))?;
            }
        }
        Ok(())
    }

    /// Restore health, or deal damage if `healer` has heal-as-damage active.
    pub fn heal(&mut self, healer: PlayerId, target: Character, amount: i64) -> Result<()> {
        if self.player(healer).heal_does_damage {
            return self.deal_damage(None, target, amount);
        }
        match target {
            Character::Hero(player) => {
                let max = self.config().hero_health;
                let hero = &mut self.player_mut(player).hero_health;
                *hero = (*hero + amount).min(max);
            }
            Character::Minion(minion) => {
                let m = self.minion_mut(minion)?;
                m.damage = (m.damage - amount).max(0);
            }
        }
        Ok(())
    }

    /// `attacker` attacks `target`: publish `attack`, then both sides deal
    /// their attack as damage to each other.
    pub fn attack(&mut self, attacker: EntityId, target: Character) -> Result<()> {
        debug!("{} attacks {}", attacker, target);
        self.publish(EventSource::Minion(attacker), &GameEvent::attack(target))?;

        if self.minion(attacker)?.dead {
            return Ok(());
        }
        let counter = match target {
            Character::Minion(defender) => {
                if self.minion(defender)?.dead {
                    return Ok(());
                }
                self.attack_of(defender)?
            }
            Character::Hero(_) => 0,
        };
        let damage = self.attack_of(attacker)?;

        self.deal_damage(Some(attacker), target, damage)?;
        if let Character::Minion(defender) = target {
            self.deal_damage(Some(defender), Character::Minion(attacker), counter)?;
        }
        Ok(())
    }

    // === Leaving play ===

    /// Kill a minion.
    ///
    /// Removes it from the board, unapplies its effects, drops its auras,
    /// runs its deathrattle and publishes `minion_died` on the owner. Killing
    /// a dead minion does nothing.
    pub fn die(&mut self, minion: EntityId, killer: Option<Character>) -> Result<()> {
        let m = self.minion_mut(minion)?;
        if m.dead {
            return Ok(());
        }
        m.dead = true;
        let owner = m.owner;

        let board = &mut self.player_mut(owner).minions;
        if let Some(index) = board.iter().position(|&id| id == minion) {
            board.remove(index);
        }
        debug!("{} dies", minion);

        let effects = self.minion(minion)?.effects.clone();
        for effect in effects {
            self.unapply_effect(effect)?;
        }
        self.remove_auras_of(minion)?;
        self.run_deathrattle(minion)?;
        self.publish(
            EventSource::Player(owner),
            &GameEvent::minion_died(minion, killer),
        )
    }

    /// Strip a minion's effects, auras, deathrattle, keywords and stat
    /// changes, then publish `silenced` on it.
    pub fn silence(&mut self, minion: EntityId) -> Result<()> {
        if self.minion(minion)?.dead {
            return Ok(());
        }
        let effects = self.minion(minion)?.effects.clone();
        for effect in effects {
            self.remove_effect(effect)?;
        }
        self.remove_auras_of(minion)?;

        let m = self.minion_mut(minion)?;
        m.deathrattle = None;
        m.charge = false;
        m.immune = false;
        m.frozen = false;
        m.silenced = true;
        m.attack_bonus = 0;
        if m.health_bonus > 0 {
            m.damage = (m.damage - m.health_bonus).max(0);
        }
        m.health_bonus = 0;
        debug!("{} silenced", minion);

        self.publish(EventSource::Minion(minion), &GameEvent::silenced())
    }

    fn remove_auras_of(&mut self, minion: EntityId) -> Result<()> {
        let auras = self.minion(minion)?.auras.clone();
        for aura in auras {
            self.remove_aura(aura)?;
        }
        Ok(())
    }

    /// Run the minion's deathrattle slot, if any, in chain order.
    pub(crate) fn run_deathrattle(&mut self, minion: EntityId) -> Result<()> {
        let m = self.minion(minion)?;
        let owner = m.owner;
        let Some(deathrattle) = m.deathrattle.clone() else {
            return Ok(());
        };

        for action in deathrattle.actions() {
            match action {
                DeathrattleAction::Summon { card, count } => {
                    for _ in 0..count {
                        let end = self.player(owner).minions.len();
                        self.summon(card, owner, end)?;
                    }
                }
                DeathrattleAction::Draw { count } => {
                    for _ in 0..count {
                        self.draw(owner)?;
                    }
                }
            }
        }
        Ok(())
    }
}
