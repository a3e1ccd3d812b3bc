use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{standard_deck, Caravan, Card, Hand};

/// The three caravan slots in front of a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CaravanPosition {
    Left,
    Middle,
    Right,
}

impl CaravanPosition {
    pub const ALL: [CaravanPosition; 3] = [
        CaravanPosition::Left,
        CaravanPosition::Middle,
        CaravanPosition::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The neighbouring slot to the left, if any.
    pub fn left(self) -> Option<Self> {
        match self {
            CaravanPosition::Left => None,
            CaravanPosition::Middle => Some(CaravanPosition::Left),
            CaravanPosition::Right => Some(CaravanPosition::Middle),
        }
    }

    /// The neighbouring slot to the right, if any.
    pub fn right(self) -> Option<Self> {
        match self {
            CaravanPosition::Left => Some(CaravanPosition::Middle),
            CaravanPosition::Middle => Some(CaravanPosition::Right),
            CaravanPosition::Right => None,
        }
    }
}

/// Where a player sits at the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerPosition {
    Top,
    Bottom,
}

impl PlayerPosition {
    pub const ALL: [PlayerPosition; 2] = [PlayerPosition::Top, PlayerPosition::Bottom];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerPosition::Top => PlayerPosition::Bottom,
            PlayerPosition::Bottom => PlayerPosition::Top,
        }
    }
}

/// A player's draw pile.
///
/// The top of the deck is the front of the queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: VecDeque::from(cards),
        }
    }

    /// All 54 cards, unshuffled.
    pub fn standard() -> Self {
        Self::new(standard_deck())
    }

    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Takes the card from the top of the deck.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Puts a card at the bottom of the deck.
    pub fn place_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// The state of a single player during one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub deck: Deck,
    pub hand: Hand,
    caravans: [Caravan; 3],
}

impl Player {
    pub fn new(deck: Deck, hand: Hand) -> Self {
        Self {
            deck,
            hand,
            caravans: Default::default(),
        }
    }

    /// Deals `hand_size` cards off the top of `deck` into a new hand.
    pub fn deal(mut deck: Deck, hand_size: usize) -> Self {
        let mut hand_cards = Vec::with_capacity(hand_size);
        while hand_cards.len() < hand_size {
            match deck.pop() {
                Some(card) => hand_cards.push(card),
                None => break,
            }
        }
        Self::new(deck, Hand::new(hand_cards))
    }

    /// A player with a shuffled standard deck.
    pub fn shuffled(rng: &mut StdRng, hand_size: usize) -> Self {
        let mut deck = Deck::standard();
        deck.shuffle(rng);
        Self::deal(deck, hand_size)
    }

    pub fn caravan(&self, position: CaravanPosition) -> &Caravan {
        &self.caravans[position.index()]
    }

    pub fn caravan_mut(&mut self, position: CaravanPosition) -> &mut Caravan {
        &mut self.caravans[position.index()]
    }

    pub fn caravans(&self) -> &[Caravan; 3] {
        &self.caravans
    }

    pub fn caravans_mut(&mut self) -> &mut [Caravan; 3] {
        &mut self.caravans
    }

    /// Draw a new card from the deck to the hand, if there are any left.
    pub fn draw_from_deck(&mut self) -> Option<Card> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        Some(card)
    }

    /// Removes the card at `position` from the hand and draws a replacement.
    pub fn play_from_hand(&mut self, position: usize) -> Option<Card> {
        let card = self.hand.remove(position)?;
        self.draw_from_deck();
        Some(card)
    }

    pub fn discard_caravan(&mut self, position: CaravanPosition) {
        self.caravan_mut(position).discard();
    }
}
