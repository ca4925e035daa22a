//! Game state: the arena that owns every bus.
//!
//! ## Game
//!
//! Players, minions, effect instances and auras all live in one `Game`. They
//! refer to each other by id (`EntityId`, `EffectId`, `AuraId`), never by
//! pointer, so listeners, effects and auras can be stored as plain values on
//! the buses and the whole game can be cloned.
//!
//! ## Event Dispatch
//!
//! `Game` implements [`EventHost`]: `publish(source, event)` runs the
//! listeners on the bus `source` names. A listener is a [`Handler`]; effect
//! handlers are routed to the effect resolver.
//!
//! ## Effect Lifecycle
//!
//! [`Game::apply_effect`] bumps the owner's count registry *before* the
//! effect installs its hooks; [`Game::unapply_effect`] drops the count
//! *before* the hooks come off. Count-gated effects rely on that order.

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::auras::{AuraEngine, AuraId, AuraPredicate};
use crate::cards::CardRegistry;
use crate::core::{EntityId, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::effects::{resolver, EffectId, EffectInstance, EffectKind};
use crate::error::{EngineError, Result};
use crate::events::{EventBus, EventHost, EventKind, GameEvent};
use crate::mana::FilterId;

use super::handler::{EventSource, Handler};
use super::minion::Minion;
use super::player::Player;

/// The effect core's game.
///
/// ## Example
///
/// ```
/// use ccg_effects::cards::{CardDefinition, CardId, CardRegistry};
/// use ccg_effects::core::{GameConfig, PlayerId};
/// use ccg_effects::effects::EffectKind;
/// use ccg_effects::game::Game;
///
/// let cards = CardRegistry::new()
///     .with_card(CardDefinition::minion(CardId::new(1), "Yeti", 4, 4, 5));
/// let mut game = Game::new(GameConfig::default(), cards);
///
/// let p0 = PlayerId::new(0);
/// let yeti = game.summon(CardId::new(1), p0, 0).unwrap().unwrap();
/// game.add_effect(yeti, EffectKind::HealAsDamage).unwrap();
/// assert!(game.player(p0).heal_does_damage);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    cards: CardRegistry,
    players: PlayerMap<Player>,
    minions: FxHashMap<EntityId, Minion>,
    effects: FxHashMap<EffectId, EffectInstance>,
    auras: AuraEngine,
    bus: EventBus<Handler>,
    current_player: PlayerId,
    turn: u32,
    rng: GameRng,
    next_entity: EntityId,
    next_effect: u32,
    next_filter: u32,
}

impl Game {
    /// Create a game with empty boards, hands and decks.
    #[must_use]
    pub fn new(config: GameConfig, cards: CardRegistry) -> Self {
        let players = PlayerMap::new(|id| Player::new(id, &config));
        let rng = GameRng::new(config.seed);
        Self {
            config,
            cards,
            players,
            minions: FxHashMap::default(),
            effects: FxHashMap::default(),
            auras: AuraEngine::new(),
            bus: EventBus::new(),
            current_player: PlayerId::new(0),
            turn: 1,
            rng,
            next_entity: EntityId::FIRST,
            next_effect: 0,
            next_filter: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Direct access for setting up hands, decks and mana.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Look up a minion, dead or alive.
    pub fn minion(&self, id: EntityId) -> Result<&Minion> {
        self.minions.get(&id).ok_or(EngineError::MinionNotFound(id))
    }

    pub(crate) fn minion_mut(&mut self, id: EntityId) -> Result<&mut Minion> {
        self.minions.get_mut(&id).ok_or(EngineError::MinionNotFound(id))
    }

    /// Minions on `player`'s board, left to right.
    #[must_use]
    pub fn board(&self, player: PlayerId) -> Vec<EntityId> {
        self.players[player].minions.iter().copied().collect()
    }

    pub fn effect(&self, id: EffectId) -> Result<&EffectInstance> {
        self.effects.get(&id).ok_or(EngineError::EffectNotFound(id))
    }

    pub(crate) fn effect_mut(&mut self, id: EffectId) -> Result<&mut EffectInstance> {
        self.effects.get_mut(&id).ok_or(EngineError::EffectNotFound(id))
    }

    /// Applied effects matching `predicate`, oldest first.
    pub(crate) fn applied_effects(&self, predicate: impl Fn(&EffectInstance) -> bool) -> Vec<EffectId> {
        let mut ids: Vec<EffectId> = self
            .effects
            .values()
            .filter(|e| e.applied && predicate(e))
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn auras(&self) -> &AuraEngine {
        &self.auras
    }

    /// The bus `source` names, if it exists.
    #[must_use]
    pub fn bus(&self, source: EventSource) -> Option<&EventBus<Handler>> {
        match source {
            EventSource::Game => Some(&self.bus),
            EventSource::Player(player) => Some(&self.players[player].bus),
            EventSource::Minion(id) => self.minions.get(&id).map(|m| &m.bus),
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        self.next_entity.advance()
    }

    pub(crate) fn insert_minion(&mut self, minion: Minion) {
        self.minions.insert(minion.id, minion);
    }

    pub(crate) fn next_filter_id(&mut self) -> FilterId {
        let id = FilterId(self.next_filter);
        self.next_filter += 1;
        id
    }

    pub(crate) fn pass_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.turn += 1;
    }

    // === Bus helpers ===

    pub(crate) fn bind(&mut self, source: EventSource, event: EventKind, handler: Handler) {
        if let Some(bus) = self.bus_mut(source) {
            bus.bind(event, handler);
        }
    }

    pub(crate) fn bind_once(&mut self, source: EventSource, event: EventKind, handler: Handler) {
        if let Some(bus) = self.bus_mut(source) {
            bus.bind_once(event, handler);
        }
    }

    pub(crate) fn unbind(&mut self, source: EventSource, event: EventKind, handler: &Handler) -> bool {
        self.bus_mut(source)
            .is_some_and(|bus| bus.unbind(event, handler))
    }

    // === Stats ===

    /// Attack including aura bonuses.
    pub fn attack_of(&self, id: EntityId) -> Result<i64> {
        let minion = self.minion(id)?;
        Ok(minion.own_attack() + self.auras.bonus(id).0)
    }

    /// Max health including aura bonuses.
    pub fn max_health_of(&self, id: EntityId) -> Result<i64> {
        let minion = self.minion(id)?;
        Ok(minion.own_max_health() + self.auras.bonus(id).1)
    }

    /// Current health.
    pub fn health_of(&self, id: EntityId) -> Result<i64> {
        Ok(self.max_health_of(id)? - self.minion(id)?.damage)
    }

    // === Effect lifecycle ===

    /// Attach an effect to a minion and apply it.
    pub fn add_effect(&mut self, target: EntityId, kind: EffectKind) -> Result<EffectId> {
        self.minion(target)?;
        let id = EffectId(self.next_effect);
        self.next_effect += 1;
        self.effects.insert(id, EffectInstance::new(id, kind, target));
        self.minion_mut(target)?.effects.push(id);
        self.apply_effect(id)?;
        Ok(id)
    }

    /// Install an attached effect's hooks.
    ///
    /// Applying an effect that is already applied is a contract violation.
    pub fn apply_effect(&mut self, id: EffectId) -> Result<()> {
        let effect = self.effect(id)?;
        debug_assert!(!effect.applied, "{} applied twice", id);
        let (target, tag) = (effect.target, effect.kind.tag());
        let owner = self.minion(target)?.owner;

        self.players[owner].effect_count.increment(tag);
        self.effect_mut(id)?.applied = true;
        resolver::apply(self, id)
    }

    /// Remove an applied effect's hooks. Unapplied effects are left alone.
    pub fn unapply_effect(&mut self, id: EffectId) -> Result<()> {
        let effect = self.effect(id)?;
        if !effect.applied {
            return Ok(());
        }
        let (target, tag) = (effect.target, effect.kind.tag());
        let owner = self.minion(target)?.owner;

        self.players[owner].effect_count.decrement(tag);
        self.effect_mut(id)?.applied = false;
        resolver::unapply(self, id)
    }

    /// Unapply and detach an effect.
    pub fn remove_effect(&mut self, id: EffectId) -> Result<()> {
        self.unapply_effect(id)?;
        if let Some(effect) = self.effects.remove(&id) {
            if let Ok(minion) = self.minion_mut(effect.target) {
                minion.effects.retain(|&e| e != id);
            }
        }
        Ok(())
    }

    // === Auras ===

    /// Register a stat aura projected by `source` over `players`' boards.
    pub fn add_aura(
        &mut self,
        source: EntityId,
        attack: i64,
        health: i64,
        players: &[PlayerId],
        predicate: AuraPredicate,
    ) -> Result<AuraId> {
        self.minion(source)?;
        let id = self.auras.insert(source, attack, health, players, predicate);

        let mut candidates = Vec::new();
        for &player in players {
            for minion in self.players[player].minions.iter() {
                if let Some(m) = self.minions.get(minion) {
                    candidates.push((m.id, m.minion_type));
                }
            }
        }
        if let Some(aura) = self.auras.get_mut(id) {
            for (minion, minion_type) in candidates {
                if aura.selects(minion, minion_type) {
                    aura.members.insert(minion);
                }
            }
        }

        for &player in players {
            self.bind(EventSource::Player(player), EventKind::MinionPlaced, Handler::AuraJoin(id));
            self.bind(EventSource::Player(player), EventKind::MinionDied, Handler::AuraLeave(id));
        }
        self.minion_mut(source)?.auras.push(id);
        debug!("add {} from {} (+{}/+{})", id, source, attack, health);
        Ok(id)
    }

    /// Remove an aura. Members lose the bonus; a health bonus is taken out of
    /// damage first, so current health only drops if it exceeded the new max.
    pub fn remove_aura(&mut self, id: AuraId) -> Result<()> {
        let aura = self.auras.remove(id).ok_or(EngineError::AuraNotFound(id))?;
        for &player in &aura.players {
            self.unbind(EventSource::Player(player), EventKind::MinionPlaced, &Handler::AuraJoin(id));
            self.unbind(EventSource::Player(player), EventKind::MinionDied, &Handler::AuraLeave(id));
        }
        if let Ok(source) = self.minion_mut(aura.source) {
            source.auras.retain(|&a| a != id);
        }
        if aura.health > 0 {
            for member in &aura.members {
                if let Ok(minion) = self.minion_mut(*member) {
                    minion.damage = (minion.damage - aura.health).max(0);
                }
            }
        }
        debug!("remove {} from {}", id, aura.source);
        Ok(())
    }

    fn aura_join(&mut self, id: AuraId, minion: EntityId) -> Result<()> {
        let m = self.minion(minion)?;
        let (owner, minion_type, dead) = (m.owner, m.minion_type, m.dead);
        if let Some(aura) = self.auras.get_mut(id) {
            if !dead && aura.covers(owner) && aura.selects(minion, minion_type) {
                aura.members.insert(minion);
            }
        }
        Ok(())
    }

    fn aura_leave(&mut self, id: AuraId, minion: EntityId) {
        if let Some(aura) = self.auras.get_mut(id) {
            aura.members.remove(&minion);
        }
    }
}

impl EventHost for Game {
    type Source = EventSource;
    type Handler = Handler;
    type Error = EngineError;

    fn bus_mut(&mut self, source: EventSource) -> Option<&mut EventBus<Handler>> {
        match source {
            EventSource::Game => Some(&mut self.bus),
            EventSource::Player(player) => Some(&mut self.players[player].bus),
            EventSource::Minion(id) => self.minions.get_mut(&id).map(|m| &mut m.bus),
        }
    }

    fn invoke(&mut self, _source: EventSource, handler: &Handler, event: &GameEvent) -> Result<()> {
        match *handler {
            Handler::Effect { effect, action } => {
                // A removed effect has nothing left to run. Unapplied ones still fire.
                if !self.effects.contains_key(&effect) {
                    trace!("skip {} ({:?}): removed", effect, action);
                    return Ok(());
                }
                resolver::handle(self, effect, action, event)
            }
            Handler::DoubleDeathrattle => {
                let Some(minion) = event.minion else {
                    return Ok(());
                };
                if self.minion(minion)?.deathrattle.is_some() {
                    self.run_deathrattle(minion)?;
                }
                Ok(())
            }
            Handler::AuraJoin(aura) => match event.minion {
                Some(minion) => self.aura_join(aura, minion),
                None => Ok(()),
            },
            Handler::AuraLeave(aura) => {
                if let Some(minion) = event.minion {
                    self.aura_leave(aura, minion);
                }
                Ok(())
            }
        }
    }
}
