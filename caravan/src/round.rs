mod movement;

pub use movement::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Card, CaravanPosition, Hand, HorizontalDirection, PlayerPosition, RoundConfig, RoundError,
    Selection, Table, OPENING_TURNS,
};

/// The player whose hand is played from.
pub const ACTIVE_PLAYER: PlayerPosition = PlayerPosition::Bottom;

/// Where a picked card would be placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedCardPosition {
    pub player: PlayerPosition,
    pub caravan: CaravanPosition,
    /// For [`Location::Other`], the card the picked card is attached to.
    /// For [`Location::Top`], the length of the caravan.
    pub card_index: usize,
    pub location: Location,
}

/// A card lifted from the hand, on its way to the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PickedCard {
    pub card: Card,
    /// Where the card sits in the hand. It stays there until placed.
    pub hand_index: usize,
    pub position: PickedCardPosition,
}

/// The state of a round, together with the data that only exists in that state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundState {
    /// Choosing a card from the hand.
    SelectCard,
    /// Moving a picked card across the table.
    PlaceCard(PickedCard),
    /// Choosing one of the active player's caravans to discard.
    DiscardCaravan(Selection<CaravanPosition>),
    /// Waiting for the player to confirm leaving the round.
    ConfirmExit,
    /// The player left the round. Nothing happens anymore.
    Exited,
}

impl RoundState {
    pub fn name(&self) -> &'static str {
        match self {
            RoundState::SelectCard => "select card",
            RoundState::PlaceCard(_) => "place card",
            RoundState::DiscardCaravan(_) => "discard caravan",
            RoundState::ConfirmExit => "confirm exit",
            RoundState::Exited => "exited",
        }
    }
}

/// Drives a round of Caravan on a table it borrows for the round's duration.
///
/// Every operation is only valid in some states; calling it in any other
/// state returns [`RoundError::InvalidState`] and changes nothing.
#[derive(Debug)]
pub struct RoundManager<'t> {
    table: &'t mut Table,
    config: RoundConfig,
    state: RoundState,
    turn_count: u32,
    /// Turns finished by each player, indexed by the seat they started the round in.
    turns_taken: [u32; 2],
    /// Whether the players sit in the opposite seats than at the start of the round.
    sides_swapped: bool,
}

impl<'t> RoundManager<'t> {
    pub fn new(table: &'t mut Table, config: RoundConfig) -> Self {
        Self {
            table,
            config,
            state: RoundState::SelectCard,
            turn_count: 1,
            turns_taken: [0; 2],
            sides_swapped: false,
        }
    }

    /// Read-only view of the table, e.g. for rendering.
    pub fn table(&self) -> &Table {
        self.table
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// The number of the current turn, starting at 1.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_exited(&self) -> bool {
        self.state == RoundState::Exited
    }

    /// The seat at the start of the round of the player now sitting at `seat`.
    pub fn starting_seat(&self, seat: PlayerPosition) -> PlayerPosition {
        if self.sides_swapped {
            seat.opponent()
        } else {
            seat
        }
    }

    /// How many turns the player who started the round at `starting_seat` has finished.
    pub fn turns_taken_by(&self, starting_seat: PlayerPosition) -> u32 {
        self.turns_taken[starting_seat.index()]
    }

    /// Is the opening rule in effect for the active player's current turn?
    ///
    /// Each player has their own [`OPENING_TURNS`] opening turns, no matter
    /// how often the sides are swapped.
    pub fn in_opening(&self) -> bool {
        self.config.opening_rule
            && self.turns_taken_by(self.starting_seat(ACTIVE_PLAYER)) < OPENING_TURNS
    }

    /// The winner of the round, named by the seat they started the round in.
    pub fn winner(&self) -> Option<PlayerPosition> {
        self.table.winner().map(|seat| self.starting_seat(seat))
    }

    /// The active player's hand, including the cursor of the selected card.
    pub fn hand(&self) -> &Hand {
        &self.table.player(ACTIVE_PLAYER).hand
    }

    pub fn picked_card(&self) -> Option<Card> {
        match &self.state {
            RoundState::PlaceCard(picked) => Some(picked.card),
            _ => None,
        }
    }

    pub fn picked_card_position(&self) -> Option<PickedCardPosition> {
        match &self.state {
            RoundState::PlaceCard(picked) => Some(picked.position),
            _ => None,
        }
    }

    /// The caravan currently chosen for discarding.
    pub fn selected_discard_caravan(&self) -> Option<CaravanPosition> {
        match &self.state {
            RoundState::DiscardCaravan(selection) => selection.current().copied(),
            _ => None,
        }
    }

    fn expect_state(&self, operation: &'static str, valid: bool) -> Result<(), RoundError> {
        if valid {
            Ok(())
        } else {
            Err(RoundError::InvalidState {
                operation,
                state: self.state.clone(),
            })
        }
    }

    fn change_state(&mut self, state: RoundState) {
        debug!(from = self.state.name(), to = state.name(), "Round state changed");
        self.state = state;
    }

    /// Notify that the player has finished the turn.
    fn finish_turn(&mut self) {
        let player = self.starting_seat(ACTIVE_PLAYER);
        info!(turn = self.turn_count, ?player, "Turn finished");
        self.turns_taken[player.index()] += 1;
        self.turn_count += 1;
    }

    /// Return to card selection, discarding any picked card or caravan
    /// selection. In card selection, begin exiting the round instead.
    pub fn cancel(&mut self) -> Result<(), RoundError> {
        match self.state {
            RoundState::PlaceCard(_) | RoundState::DiscardCaravan(_) | RoundState::ConfirmExit => {
                self.change_state(RoundState::SelectCard)
            }
            RoundState::SelectCard => self.change_state(RoundState::ConfirmExit),
            RoundState::Exited => {
                return Err(RoundError::InvalidState {
                    operation: "cancel",
                    state: RoundState::Exited,
                })
            }
        }
        Ok(())
    }

    /// Leave the round after the exit was requested with [`Self::cancel()`].
    pub fn confirm_exit(&mut self) -> Result<(), RoundError> {
        self.expect_state("confirm exit", self.state == RoundState::ConfirmExit)?;
        self.change_state(RoundState::Exited);
        Ok(())
    }

    /// Exchange the players' seats, so that the other player plays from the bottom.
    pub fn swap_sides(&mut self) -> Result<(), RoundError> {
        self.expect_state("swap sides", self.state == RoundState::SelectCard)?;
        self.table.swap_players();
        self.sides_swapped = !self.sides_swapped;
        debug!(turn = self.turn_count, "Players swapped sides");
        Ok(())
    }

    // SelectCard state methods

    /// Move the hand cursor, wrapping around at both ends.
    pub fn move_card_selection(&mut self, direction: HorizontalDirection) -> Result<(), RoundError> {
        self.expect_state("move the card selection", self.state == RoundState::SelectCard)?;
        self.table.player_mut(ACTIVE_PLAYER).hand.step(direction);
        Ok(())
    }

    /// Lift the selected hand card and put it at its default position on the table.
    pub fn pick_selected_card(&mut self) -> Result<(), RoundError> {
        self.expect_state("pick a card", self.state == RoundState::SelectCard)?;
        let hand = self.hand();
        let hand_index = hand.index();
        let card = *hand.current().ok_or(RoundError::EmptyHand)?;
        let position = PickedCardPosition::initial(self.table);
        self.change_state(RoundState::PlaceCard(PickedCard {
            card,
            hand_index,
            position,
        }));
        Ok(())
    }

    /// Discard the selected hand card instead of playing it.
    pub fn discard_selected_card(&mut self) -> Result<(), RoundError> {
        self.expect_state("discard a card", self.state == RoundState::SelectCard)?;
        if self.in_opening() {
            return Err(RoundError::DiscardDuringOpening {
                turn: self.turn_count,
            });
        }
        let player = self.table.player_mut(ACTIVE_PLAYER);
        let card = player
            .play_from_hand(player.hand.index())
            .ok_or(RoundError::EmptyHand)?;
        debug!(%card, "Discarded card from hand");
        self.finish_turn();
        Ok(())
    }

    /// Start choosing a caravan to discard.
    pub fn begin_discard(&mut self) -> Result<(), RoundError> {
        self.expect_state("begin discarding", self.state == RoundState::SelectCard)?;
        if self.in_opening() {
            return Err(RoundError::DiscardDuringOpening {
                turn: self.turn_count,
            });
        }
        self.change_state(RoundState::DiscardCaravan(Selection::new(
            CaravanPosition::ALL.to_vec(),
        )));
        Ok(())
    }

    // DiscardCaravan state methods

    /// Move the discard cursor over the three caravans, wrapping around.
    pub fn move_discard_selection(&mut self, direction: HorizontalDirection) -> Result<(), RoundError> {
        if let RoundState::DiscardCaravan(selection) = &mut self.state {
            selection.step(direction);
            return Ok(());
        }
        self.expect_state("move the discard selection", false)
    }

    /// Discards a caravan of a player, resetting it to empty. Ends the turn.
    pub fn discard_caravan(
        &mut self,
        player: PlayerPosition,
        caravan: CaravanPosition,
    ) -> Result<(), RoundError> {
        self.expect_state(
            "discard a caravan",
            matches!(self.state, RoundState::DiscardCaravan(_)),
        )?;
        self.table.player_mut(player).discard_caravan(caravan);
        debug!(?player, ?caravan, "Discarded caravan");
        self.change_state(RoundState::SelectCard);
        self.finish_turn();
        Ok(())
    }

    /// Discards the active player's caravan under the discard cursor.
    pub fn discard_selected_caravan(&mut self) -> Result<(), RoundError> {
        let caravan = self.selected_discard_caravan();
        match caravan {
            Some(caravan) => self.discard_caravan(ACTIVE_PLAYER, caravan),
            None => self.expect_state("discard the selected caravan", false),
        }
    }

    // PlaceCard state methods

    /// Perform a bound checked move of the picked card.
    pub fn move_picked_card(&mut self, direction: MoveDirection) -> Result<(), RoundError> {
        let RoundState::PlaceCard(picked) = &self.state else {
            return self.expect_state("move the picked card", false);
        };
        let position = picked.position.moved(direction, self.table);
        if let RoundState::PlaceCard(picked) = &mut self.state {
            picked.position = position;
        }
        Ok(())
    }

    /// Determine if the picked card may be placed where it currently is.
    ///
    /// A value card is placed correctly if it is on the free slot of a
    /// caravan and either follows its suit or its direction. A function card
    /// is placed correctly if it is on an existing card.
    ///
    /// With the opening rule in effect, only value cards are correct, and
    /// only on one of the active player's empty caravans.
    ///
    /// Returns false if no card is picked.
    pub fn is_current_picked_card_position_correct(&self) -> bool {
        let RoundState::PlaceCard(PickedCard { card, position, .. }) = self.state else {
            return false;
        };
        let caravan = self.table.caravan(position.player, position.caravan);
        if self.in_opening() {
            return card.is_value_card()
                && position.player == ACTIVE_PLAYER
                && position.location == Location::Top
                && caravan.is_empty();
        }
        match position.location {
            Location::Top => card.is_value_card() && caravan.is_correct_append(card),
            Location::Other => card.is_function_card() && position.card_index < caravan.len(),
        }
    }

    /// Put the picked card onto the table and end the turn.
    ///
    /// Value cards are appended to the caravan, function cards are attached
    /// to the card they are on. The card leaves the hand, and the player
    /// draws a new one if the deck isn't empty.
    pub fn place_picked_card(&mut self) -> Result<(), RoundError> {
        let RoundState::PlaceCard(PickedCard {
            card,
            hand_index,
            position,
        }) = self.state
        else {
            return self.expect_state("place the picked card", false);
        };
        if !self.is_current_picked_card_position_correct() {
            return Err(RoundError::IncorrectPlacement { card, position });
        }
        match position.location {
            Location::Top => self
                .table
                .caravan_mut(position.player, position.caravan)
                .append(card)?,
            Location::Other => {
                self.table
                    .apply(card, position.player, position.caravan, position.card_index)?
            }
        }
        self.table.player_mut(ACTIVE_PLAYER).play_from_hand(hand_index);
        debug!(%card, ?position, "Placed card");
        self.change_state(RoundState::SelectCard);
        self.finish_turn();
        Ok(())
    }
}
