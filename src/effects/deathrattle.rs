//! Deathrattle chains.
//!
//! A minion has at most one deathrattle slot. Granting a second deathrattle
//! wraps whatever is already there: the result runs the original first, then
//! the new action. Stacking grants nests the wrappers but keeps firing order
//! equal to grant order.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A single deathrattle action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathrattleAction {
    /// Summon `count` copies of `card` at the end of the owner's board.
    Summon { card: CardId, count: u32 },
    /// The owner draws `count` cards.
    Draw { count: u32 },
}

/// The callable occupying a minion's deathrattle slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deathrattle {
    Action(DeathrattleAction),
    /// Run the first, then the second.
    Then(Box<Deathrattle>, Box<Deathrattle>),
}

impl Deathrattle {
    /// Summon `count` copies of `card`.
    #[must_use]
    pub fn summon(card: CardId, count: u32) -> Self {
        Deathrattle::Action(DeathrattleAction::Summon { card, count })
    }

    /// Draw `count` cards.
    #[must_use]
    pub fn draw(count: u32) -> Self {
        Deathrattle::Action(DeathrattleAction::Draw { count })
    }

    /// Wrap an existing slot value so it runs before `next`.
    ///
    /// ```
    /// use ccg_effects::cards::CardId;
    /// use ccg_effects::effects::{Deathrattle, DeathrattleAction};
    ///
    /// let first = Deathrattle::chain(None, Deathrattle::draw(1));
    /// let both = Deathrattle::chain(Some(first), Deathrattle::summon(CardId::new(4), 2));
    ///
    /// assert_eq!(both.actions(), vec![
    ///     DeathrattleAction::Draw { count: 1 },
    ///     DeathrattleAction::Summon { card: CardId::new(4), count: 2 },
    /// ]);
    /// ```
    #[must_use]
    pub fn chain(existing: Option<Deathrattle>, next: Deathrattle) -> Self {
        match existing {
            Some(existing) => Deathrattle::Then(Box::new(existing), Box::new(next)),
            None => next,
        }
    }

    /// Leaf actions in firing order.
    #[must_use]
    pub fn actions(&self) -> Vec<DeathrattleAction> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions(&self, out: &mut Vec<DeathrattleAction>) {
        match self {
            Deathrattle::Action(action) => out.push(*action),
            Deathrattle::Then(first, second) => {
                first.collect_actions(out);
                second.collect_actions(out);
            }
        }
    }
}
