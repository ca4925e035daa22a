//! Behaviour of the individual effect kinds.

use ccg_effects::cards::{CardDefinition, CardId, CardRegistry, MinionType, TypeFilter};
use ccg_effects::core::{EntityId, GameConfig, PlayerId};
use ccg_effects::effects::EffectKind;
use ccg_effects::events::Character;
use ccg_effects::game::Game;

const WISP: CardId = CardId::new(1);
const RAPTOR: CardId = CardId::new(2);
const YETI: CardId = CardId::new(3);
const MURLOC: CardId = CardId::new(4);
const ARCANE: CardId = CardId::new(5);
const SNIPE: CardId = CardId::new(6);
const BUZZARD: CardId = CardId::new(7);

fn p0() -> PlayerId {
    PlayerId::new(0)
}

fn p1() -> PlayerId {
    PlayerId::new(1)
}

fn registry() -> CardRegistry {
    CardRegistry::new()
        .with_card(CardDefinition::minion(WISP, "Wisp", 0, 1, 1))
        .with_card(
            CardDefinition::minion(RAPTOR, "Bloodfen Raptor", 2, 3, 2)
                .with_minion_type(MinionType::Beast),
        )
        .with_card(CardDefinition::minion(YETI, "Chillwind Yeti", 4, 4, 5))
        .with_card(
            CardDefinition::minion(MURLOC, "Murloc Raider", 1, 2, 1)
                .with_minion_type(MinionType::Murloc),
        )
        .with_card(CardDefinition::spell(ARCANE, "Arcane Missiles", 1))
        .with_card(CardDefinition::secret(SNIPE, "Snipe", 2))
        .with_card(
            CardDefinition::minion(BUZZARD, "Scavenging Hyena", 2, 2, 1)
                .with_minion_type(MinionType::Beast)
                .with_effect(EffectKind::DrawOnMinion {
                    minion_type: TypeFilter::Only(MinionType::Beast),
                }),
        )
}

fn new_game() -> Game {
    Game::new(GameConfig::new(17), registry())
}

fn summon(game: &mut Game, card: CardId, player: PlayerId) -> EntityId {
    let end = game.player(player).minions.len();
    game.summon(card, player, end).unwrap().unwrap()
}

fn stats(game: &Game, minion: EntityId) -> (i64, i64) {
    (game.attack_of(minion).unwrap(), game.health_of(minion).unwrap())
}

fn stock_deck(game: &mut Game, player: PlayerId, cards: usize) {
    for _ in 0..cards {
        game.player_mut(player).deck.push_back(WISP);
    }
}

// === Draw on minion ===

/// Test drawing for every friendly minion placed.
#[test]
fn test_draw_on_any_minion() {
    let mut game = new_game();
    stock_deck(&mut game, p0(), 5);
    let source = summon(&mut game, YETI, p0());
    game.add_effect(source, EffectKind::DrawOnMinion { minion_type: TypeFilter::All })
        .unwrap();

    summon(&mut game, WISP, p0());
    summon(&mut game, RAPTOR, p0());
    summon(&mut game, WISP, p1());
    assert_eq!(game.player(p0()).hand.len(), 2);
}

/// Test that a tribe-restricted draw does not count its own arrival.
#[test]
fn test_draw_on_beast_excludes_self() {
    let mut game = new_game();
    stock_deck(&mut game, p0(), 5);

    summon(&mut game, BUZZARD, p0());
    assert!(game.player(p0()).hand.is_empty());

    summon(&mut game, WISP, p0());
    assert!(game.player(p0()).hand.is_empty());

    summon(&mut game, RAPTOR, p0());
    assert_eq!(game.player(p0()).hand.len(), 1);
}

// === Grow, add card ===

/// Test that growth needs an active secret.
#[test]
fn test_grow_if_secret() {
    let mut game = new_game();
    let source = summon(&mut game, WISP, p0());
    game.add_effect(source, EffectKind::GrowIfSecret { attack: 2, health: 2 }).unwrap();

    game.end_turn().unwrap();
    assert_eq!(stats(&game, source), (1, 1));

    game.end_turn().unwrap();
    game.player_mut(p0()).secrets.push_back(SNIPE);
    game.end_turn().unwrap();
    assert_eq!(stats(&game, source), (3, 3));
}

/// Test adding a card to hand whenever a spell is cast.
#[test]
fn test_add_card_on_spell() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    game.add_effect(source, EffectKind::AddCardOnSpell { card: ARCANE }).unwrap();

    game.player_mut(p0()).hand.push_back(SNIPE);
    game.player_mut(p0()).hand.push_back(WISP);
    game.play_card(p0(), 0).unwrap();
    assert_eq!(game.player(p0()).hand.iter().copied().collect::<Vec<_>>(), vec![WISP, ARCANE]);
    assert_eq!(game.player(p0()).secrets.len(), 1);

    game.play_card(p0(), 0).unwrap();
    assert_eq!(game.player(p0()).hand.iter().copied().collect::<Vec<_>>(), vec![ARCANE]);
}

/// Test that the added card respects the hand limit.
#[test]
fn test_add_card_on_spell_hand_limit() {
    let mut game = Game::new(GameConfig::new(1).with_max_hand_size(1), registry());
    let source = summon(&mut game, YETI, p0());
    game.add_effect(source, EffectKind::AddCardOnSpell { card: ARCANE }).unwrap();

    game.player_mut(p0()).hand.push_back(ARCANE);
    game.player_mut(p0()).hand.push_back(YETI);
    game.play_card(p0(), 0).unwrap();
    assert_eq!(game.player(p0()).hand.iter().copied().collect::<Vec<_>>(), vec![YETI]);
}

// === Damage triggers ===

/// Test freezing whatever the minion damages.
#[test]
fn test_freeze_on_damage() {
    let mut game = new_game();
    let attacker = summon(&mut game, WISP, p0());
    let defender = summon(&mut game, YETI, p1());
    game.add_effect(attacker, EffectKind::FreezeOnDamage).unwrap();

    game.attack(attacker, Character::Minion(defender)).unwrap();
    assert!(game.minion(defender).unwrap().frozen);
    assert!(game.minion(attacker).unwrap().dead);

    let again = summon(&mut game, WISP, p0());
    game.add_effect(again, EffectKind::FreezeOnDamage).unwrap();
    game.attack(again, Character::Hero(p1())).unwrap();
    assert!(game.player(p1()).hero_frozen);
    assert_eq!(game.player(p1()).hero_health, 29);
}

/// Test destroying any minion damaged by this one.
#[test]
fn test_kill_on_damage() {
    let mut game = new_game();
    let attacker = summon(&mut game, WISP, p0());
    let defender = summon(&mut game, YETI, p1());
    game.add_effect(attacker, EffectKind::KillOnDamage).unwrap();

    game.attack(attacker, Character::Minion(defender)).unwrap();
    assert!(game.minion(defender).unwrap().dead);
    assert!(game.board(p1()).is_empty());
}

/// Test the attack-triggered draw for either player.
#[test]
fn test_draw_on_attack() {
    let mut game = new_game();
    stock_deck(&mut game, p0(), 3);
    stock_deck(&mut game, p1(), 3);
    let first = summon(&mut game, YETI, p0());
    let second = summon(&mut game, YETI, p0());
    game.add_effect(first, EffectKind::DrawOnAttack { amount: 2, first_player: true })
        .unwrap();
    game.add_effect(second, EffectKind::DrawOnAttack { amount: 1, first_player: false })
        .unwrap();

    game.attack(first, Character::Hero(p1())).unwrap();
    assert_eq!(game.player(p0()).hand.len(), 2);

    game.attack(second, Character::Hero(p1())).unwrap();
    assert_eq!(game.player(p1()).hand.len(), 1);
    assert_eq!(game.player(p1()).hero_health, 22);
}

// === Buffs ===

/// Test gaining stats whenever any minion dies.
#[test]
fn test_buff_on_any_death() {
    let mut game = new_game();
    let ghoul = summon(&mut game, YETI, p0());
    let friend = summon(&mut game, WISP, p0());
    let enemy = summon(&mut game, WISP, p1());
    game.add_effect(ghoul, EffectKind::buff("death", "minion", "self", 1, 1, "both").unwrap())
        .unwrap();

    game.die(friend, None).unwrap();
    game.die(enemy, None).unwrap();
    assert_eq!(stats(&game, ghoul), (6, 7));
}

/// Test gaining attack when a spell is played.
#[test]
fn test_buff_on_played_spell() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    game.add_effect(source, EffectKind::buff("played", "spell", "self", 1, 0, "friendly").unwrap())
        .unwrap();

    game.player_mut(p0()).hand.push_back(ARCANE);
    game.player_mut(p0()).hand.push_back(WISP);
    game.player_mut(p0()).hand.push_back(SNIPE);
    game.play_card(p0(), 0).unwrap();
    game.play_card(p0(), 0).unwrap();
    game.play_card(p0(), 0).unwrap();
    assert_eq!(stats(&game, source), (6, 5));
}

/// Test gaining attack when this minion takes damage.
#[test]
fn test_buff_on_self_damage() {
    let mut game = new_game();
    let berserker = summon(&mut game, YETI, p0());
    let other = summon(&mut game, YETI, p0());
    game.add_effect(berserker, EffectKind::buff("damaged", "self", "self", 3, 0, "friendly").unwrap())
        .unwrap();

    game.deal_damage(None, Character::Minion(other), 1).unwrap();
    assert_eq!(stats(&game, berserker), (4, 5));

    game.deal_damage(None, Character::Minion(berserker), 1).unwrap();
    assert_eq!(stats(&game, berserker), (7, 4));
}

/// Test a tribe-filtered summon buff.
#[test]
fn test_buff_on_summoned_tribe() {
    let mut game = new_game();
    let warleader = summon(&mut game, YETI, p0());
    game.add_effect(warleader, EffectKind::buff("summoned", "murloc", "self", 1, 0, "both").unwrap())
        .unwrap();

    summon(&mut game, MURLOC, p1());
    summon(&mut game, WISP, p0());
    assert_eq!(stats(&game, warleader), (5, 5));
}

/// Test that an unknown tribe never matches.
#[test]
fn test_buff_unknown_tribe_never_fires() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    game.add_effect(source, EffectKind::buff("summoned", "dinosaur", "self", 1, 1, "both").unwrap())
        .unwrap();

    summon(&mut game, MURLOC, p0());
    summon(&mut game, RAPTOR, p1());
    assert_eq!(stats(&game, source), (4, 5));
}

/// Test a random enemy buff with and without candidates.
#[test]
fn test_buff_random_enemy() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    game.add_effect(
        source,
        EffectKind::buff("turn_ended", "minion", "random_enemy", 1, 1, "friendly").unwrap(),
    )
    .unwrap();

    game.end_turn().unwrap();
    assert_eq!(stats(&game, source), (4, 5));

    let enemy = summon(&mut game, RAPTOR, p1());
    game.end_turn().unwrap();
    game.end_turn().unwrap();
    assert_eq!(stats(&game, enemy), (4, 3));
}

/// Test that a negative health buff can kill.
#[test]
fn test_negative_health_buff_kills() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    let enemy = summon(&mut game, WISP, p1());
    game.add_effect(
        source,
        EffectKind::buff("turn_ended", "minion", "random_enemy", 0, -1, "friendly").unwrap(),
    )
    .unwrap();

    game.end_turn().unwrap();
    assert!(game.minion(enemy).unwrap().dead);
    assert!(game.board(p1()).is_empty());
}

/// Test that random friendly targets never include the source.
#[test]
fn test_buff_random_friendly_excludes_source() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    let friend = summon(&mut game, WISP, p0());
    game.add_effect(
        source,
        EffectKind::buff("turn_ended", "minion", "random_friendly", 2, 0, "friendly").unwrap(),
    )
    .unwrap();

    game.end_turn().unwrap();
    assert_eq!(stats(&game, friend), (3, 1));
    assert_eq!(stats(&game, source), (4, 5));
}

/// Test that a buff killed earlier in the same turn end still fires.
#[test]
fn test_buff_fires_after_its_source_dies_mid_publish() {
    let mut game = new_game();
    let killer = summon(&mut game, YETI, p0());
    let doomed = summon(&mut game, WISP, p0());
    let enemy = summon(&mut game, WISP, p1());
    game.add_effect(
        killer,
        EffectKind::buff("turn_ended", "minion", "random_friendly", 0, -10, "friendly").unwrap(),
    )
    .unwrap();
    let id = game
        .add_effect(
            doomed,
            EffectKind::buff("turn_ended", "minion", "random_enemy", 1, 0, "friendly").unwrap(),
        )
        .unwrap();

    game.end_turn().unwrap();
    assert!(game.minion(doomed).unwrap().dead);
    assert!(!game.effect(id).unwrap().applied);
    assert_eq!(stats(&game, enemy), (2, 1));

    // Unbound for the next turn end.
    game.end_turn().unwrap();
    game.end_turn().unwrap();
    assert_eq!(stats(&game, enemy), (2, 1));
}

// === Resurrection ===

/// Test resummoning friendly minions that died this turn.
#[test]
fn test_resurrect_at_end_of_turn() {
    let mut game = new_game();
    let source = summon(&mut game, YETI, p0());
    let friend = summon(&mut game, RAPTOR, p0());
    let enemy = summon(&mut game, WISP, p1());
    let id = game
        .add_effect(source, EffectKind::ResurrectFriendlyMinionsAtEndOfTurn)
        .unwrap();

    game.die(friend, None).unwrap();
    game.die(enemy, None).unwrap();
    assert_eq!(
        game.effect(id).unwrap().to_string(),
        "ResurrectFriendlyMinionsAtEndOfTurn([Card(2)])"
    );

    game.end_turn().unwrap();
    let board = game.board(p0());
    assert_eq!(board.len(), 2);
    assert_eq!(game.minion(board[1]).unwrap().card, RAPTOR);
    assert!(game.board(p1()).is_empty());
    assert!(game.effect(id).unwrap().state.pending_resurrection.is_empty());

    game.end_turn().unwrap();
    assert_eq!(game.board(p0()).len(), 2);
}

// === Descriptions ===

/// Test describing effects for logs.
#[test]
fn test_effect_descriptions() {
    let kill = EffectKind::kill_minion("turn_started").unwrap();
    assert_eq!(kill.to_string(), "KillMinion(turn_started)");

    let filter = EffectKind::mana_filter(2, "spell", 1, "friendly").unwrap();
    assert_eq!(filter.to_string(), "ManaFilter(2, 1, spell, friendly)");

    assert!(EffectKind::kill_minion("noon").is_err());
    assert!(EffectKind::charge_aura("nobody", TypeFilter::All).is_err());
}
