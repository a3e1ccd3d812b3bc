use serde::{Deserialize, Serialize};

use crate::{Card, IllegalPlacement, Rank, Suit};

/// The maximum number of value cards in one caravan.
pub const MAX_HEIGHT: usize = 7;

/// The smallest value at which a caravan counts as sold.
pub const SOLD_MIN: u32 = 21;
/// The largest value at which a caravan counts as sold.
pub const SOLD_MAX: u32 = 26;

/// In which order the ranks of a caravan have to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// A pile of value cards, some of which have function cards attached.
///
/// The suit is fixed by the first card and the direction by the second
/// one. Both stay fixed until the caravan is [discarded](Caravan::discard),
/// or a Queen is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caravan {
    /// Value cards, in the order they were placed.
    cards: Vec<Card>,
    /// The function cards attached to `cards[i]`.
    ///
    /// Always exactly as long as `cards`.
    applied_face_cards: Vec<Vec<Card>>,
    suit: Option<Suit>,
    direction: Option<Direction>,
}

impl Caravan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_HEIGHT
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn applied_face_cards(&self) -> &[Vec<Card>] {
        &self.applied_face_cards
    }

    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// The card placed last.
    pub fn top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Does `card` continue the caravan's direction from its top card?
    pub fn matches_direction(&self, card: Card) -> bool {
        let (Some(top), Some(new)) = (self.top_card().and_then(|c| c.value()), card.value()) else {
            return false;
        };
        match self.direction {
            Some(Direction::Ascending) => top < new,
            Some(Direction::Descending) => top > new,
            None => false,
        }
    }

    pub fn matches_suit(&self, card: Card) -> bool {
        self.suit.is_some() && self.suit == card.suit
    }

    /// Checks whether `card` may be placed on top of the caravan, and if not, why.
    pub fn check_append(&self, card: Card) -> Result<(), IllegalPlacement> {
        if !card.is_value_card() {
            return Err(IllegalPlacement::NotAValueCard { card });
        }
        if self.is_full() {
            return Err(IllegalPlacement::CaravanFull);
        }
        let Some(top_card) = self.top_card() else {
            return Ok(());
        };
        if top_card.rank == card.rank {
            return Err(IllegalPlacement::SameRankAsTop { top_card });
        }
        if self.cards.len() >= 2 && !self.matches_suit(card) && !self.matches_direction(card) {
            return Err(IllegalPlacement::BreaksSuitAndDirection { top_card });
        }
        Ok(())
    }

    /// Determine if `card` can be placed on top of the caravan.
    ///
    /// An empty caravan takes any value card, a caravan with one card any
    /// value card of a different rank. After that, the card additionally
    /// has to match the caravan's suit or continue its direction.
    pub fn is_correct_append(&self, card: Card) -> bool {
        self.check_append(card).is_ok()
    }

    /// Places a value card on top of the caravan.
    pub fn append(&mut self, card: Card) -> Result<(), IllegalPlacement> {
        self.check_append(card)?;
        match self.cards.first() {
            None => self.suit = card.suit,
            Some(first) if self.cards.len() == 1 => {
                self.direction = Some(if first.value() > card.value() {
                    Direction::Descending
                } else {
                    Direction::Ascending
                });
            }
            Some(_) => {}
        }
        self.cards.push(card);
        self.applied_face_cards.push(Vec::new());
        Ok(())
    }

    /// Attaches a function card to the value card at `card_index` and
    /// resolves its effect on this caravan.
    ///
    /// A Jack removes the card it targets, including everything attached to
    /// it. A Queen reverses the direction and takes over the suit. Kings and
    /// Jokers just stay attached; the Joker's effect on the rest of the table
    /// is handled by [`Table::apply`](crate::Table::apply).
    pub fn apply(&mut self, function_card: Card, card_index: usize) -> Result<(), IllegalPlacement> {
        if !function_card.is_function_card() {
            return Err(IllegalPlacement::NotAFunctionCard {
                card: function_card,
            });
        }
        if card_index >= self.cards.len() {
            return Err(IllegalPlacement::NoCardAtPosition {
                card_index,
                len: self.cards.len(),
            });
        }
        match function_card.rank {
            Rank::Jack => {
                self.remove(card_index);
            }
            Rank::Queen => {
                self.applied_face_cards[card_index].push(function_card);
                self.direction = self.direction.map(Direction::reversed);
                self.suit = function_card.suit;
            }
            _ => self.applied_face_cards[card_index].push(function_card),
        }
        Ok(())
    }

    /// Takes the value card at `card_index` off the caravan, together with
    /// the function cards attached to it.
    pub fn remove(&mut self, card_index: usize) -> Option<(Card, Vec<Card>)> {
        if card_index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(card_index);
        let attached = self.applied_face_cards.remove(card_index);
        if self.cards.is_empty() {
            self.discard();
        }
        Some((card, attached))
    }

    /// Removes every value card for which `pred` returns true, returning how many were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(usize, Card) -> bool) -> usize {
        let doomed: Vec<usize> = (0..self.cards.len())
            .filter(|&i| pred(i, self.cards[i]))
            .collect();
        for &i in doomed.iter().rev() {
            self.remove(i);
        }
        doomed.len()
    }

    /// Resets the caravan to a fresh, empty one.
    pub fn discard(&mut self) {
        *self = Self::default();
    }

    /// How many Kings are attached to the card at `card_index`.
    pub fn kings_on(&self, card_index: usize) -> usize {
        self.applied_face_cards
            .get(card_index)
            .map_or(0, |faces| faces.iter().filter(|c| c.rank == Rank::King).count())
    }

    /// The sum of the card values, each doubled once per attached King.
    pub fn value(&self) -> u32 {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| card.value().unwrap_or(0) << self.kings_on(i))
            .sum()
    }

    pub fn is_sold(&self) -> bool {
        (SOLD_MIN..=SOLD_MAX).contains(&self.value())
    }
}
