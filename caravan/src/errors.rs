use crate::{Card, PickedCardPosition, RoundState};

/// The error type for changing a single [`Caravan`](crate::Caravan).
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    NotAValueCard { card: Card },
    NotAFunctionCard { card: Card },
    CaravanFull,
    SameRankAsTop { top_card: Card },
    BreaksSuitAndDirection { top_card: Card },
    NoCardAtPosition { card_index: usize, len: usize },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::NotAValueCard { card } =>
                write!(f, "Only value cards can be placed on top of a caravan, but {} is a function card", card),
            IllegalPlacement::NotAFunctionCard { card } =>
                write!(f, "Only function cards can be attached to a card, but {} is a value card", card),
            IllegalPlacement::CaravanFull =>
                write!(f, "The caravan already holds the maximum number of cards"),
            IllegalPlacement::SameRankAsTop { top_card } =>
                write!(f, "A card of the same rank as the top card {} cannot be placed on it", top_card),
            IllegalPlacement::BreaksSuitAndDirection { top_card } =>
                write!(f, "The card neither matches the caravan's suit nor continues its direction from {}", top_card),
            IllegalPlacement::NoCardAtPosition { card_index, len } =>
                write!(f, "There is no card at position {} of a caravan with {} cards", card_index, len),
        }
    }
}

/// The error type for operations on a [`RoundManager`](crate::RoundManager).
///
/// Moves that are merely against the rules are not errors, they are
/// answered by [`is_current_picked_card_position_correct()`](crate::RoundManager::is_current_picked_card_position_correct).
/// These errors mean the caller invoked an operation it should not have.
#[derive(Debug)]
pub enum RoundError {
    InvalidState {
        operation: &'static str,
        state: RoundState,
    },
    EmptyHand,
    IncorrectPlacement {
        card: Card,
        position: PickedCardPosition,
    },
    DiscardDuringOpening {
        turn: u32,
    },
    IllegalPlacement(IllegalPlacement),
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::IllegalPlacement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IllegalPlacement> for RoundError {
    fn from(err: IllegalPlacement) -> Self {
        RoundError::IllegalPlacement(err)
    }
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::InvalidState { operation, state } => {
                write!(f, "Cannot {} while the round is in the {} state", operation, state.name())
            }
            RoundError::EmptyHand => write!(f, "Tried to take a card from an empty hand"),
            RoundError::IncorrectPlacement { card, position } => write!(
                f,
                "{} cannot be placed at index {} ({:?}) of the {:?} player's {:?} caravan",
                card, position.card_index, position.location, position.player, position.caravan
            ),
            RoundError::DiscardDuringOpening { turn } => write!(
                f,
                "Discarding is not allowed during the opening, but it is turn {}",
                turn
            ),
            RoundError::IllegalPlacement(_) => write!(f, "The caravan refused the card"),
        }
    }
}
