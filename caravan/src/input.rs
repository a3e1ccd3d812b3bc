use crate::{HorizontalDirection, MoveDirection, RoundError, RoundManager, RoundState};

/// Everything a player can ask the round to do.
///
/// Front ends map their raw input events onto these.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserInput {
    Left,
    Right,
    Up,
    Down,
    Accept,
    Cancel,
    DiscardCard,
    DiscardCaravan,
}

impl UserInput {
    fn horizontal(self) -> Option<HorizontalDirection> {
        match self {
            UserInput::Left => Some(HorizontalDirection::Left),
            UserInput::Right => Some(HorizontalDirection::Right),
            _ => None,
        }
    }

    fn movement(self) -> Option<MoveDirection> {
        match self {
            UserInput::Left => Some(MoveDirection::Left),
            UserInput::Right => Some(MoveDirection::Right),
            UserInput::Up => Some(MoveDirection::Up),
            UserInput::Down => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

impl RoundManager<'_> {
    /// Dispatch an input to the operation it means in the current state.
    ///
    /// Inputs that mean nothing in the current state are ignored, and so are
    /// moves against the rules: accepting a picked card in an incorrect
    /// position, or discarding during the opening. An error is only returned
    /// if the round itself is inconsistent.
    pub fn handle_input(&mut self, input: UserInput) -> Result<(), RoundError> {
        match self.state() {
            RoundState::SelectCard => match input {
                UserInput::Left => self.move_card_selection(HorizontalDirection::Left),
                UserInput::Right => self.move_card_selection(HorizontalDirection::Right),
                UserInput::Accept if !self.hand().is_empty() => self.pick_selected_card(),
                UserInput::Cancel => self.cancel(),
                UserInput::DiscardCard if !self.hand().is_empty() && !self.in_opening() => {
                    self.discard_selected_card()
                }
                UserInput::DiscardCaravan if !self.in_opening() => self.begin_discard(),
                _ => Ok(()),
            },
            RoundState::PlaceCard(_) => match input {
                UserInput::Accept if self.is_current_picked_card_position_correct() => {
                    self.place_picked_card()
                }
                UserInput::Cancel => self.cancel(),
                _ => match input.movement() {
                    Some(direction) => self.move_picked_card(direction),
                    None => Ok(()),
                },
            },
            RoundState::DiscardCaravan(_) => match input {
                UserInput::Accept => self.discard_selected_caravan(),
                UserInput::Cancel => self.cancel(),
                _ => match input.horizontal() {
                    Some(direction) => self.move_discard_selection(direction),
                    None => Ok(()),
                },
            },
            RoundState::ConfirmExit => match input {
                UserInput::Accept => self.confirm_exit(),
                UserInput::Cancel => self.cancel(),
                _ => Ok(()),
            },
            RoundState::Exited => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, CaravanPosition, Card, Deck, Hand, Player, PlayerPosition, RoundConfig, Table};

    use UserInput::*;

    fn table_with_hand(hand: &[Card]) -> Table {
        Table::new(
            Player::new(Deck::default(), Hand::default()),
            Player::new(Deck::default(), Hand::new(hand.to_vec())),
        )
    }

    fn feed(round: &mut RoundManager, inputs: &[UserInput]) {
        for &input in inputs {
            round.handle_input(input).unwrap();
        }
    }

    #[test]
    fn play_a_few_turns() {
        let mut table = table_with_hand(&[card!("7♠"), card!("9♠"), card!("K♥"), card!("T♣")]);
        let mut round = RoundManager::new(&mut table, RoundConfig::default());
        // 7♠ onto the empty left caravan
        feed(&mut round, &[Accept, Accept]);
        // 9♠ on top of it
        feed(&mut round, &[Accept, Down, Accept]);
        // K♥ onto the 7♠
        feed(&mut round, &[Accept, Up, Accept]);
        // T♣ onto the empty middle caravan
        feed(&mut round, &[Accept, Down, Right, Accept]);

        let table = round.table();
        let left = table.caravan(PlayerPosition::Bottom, CaravanPosition::Left);
        assert_eq!(left.cards(), &[card!("7♠"), card!("9♠")]);
        assert_eq!(left.value(), 23);
        let middle = table.caravan(PlayerPosition::Bottom, CaravanPosition::Middle);
        assert_eq!(middle.cards(), &[card!("T♣")]);
        assert_eq!(round.turn_count(), 5);
        assert!(round.hand().is_empty());
    }

    #[test]
    fn incorrect_accept_is_ignored() {
        let mut table = table_with_hand(&[card!("K♥")]);
        let mut round = RoundManager::new(&mut table, RoundConfig::default());
        feed(&mut round, &[Accept, Accept, Up, Left]);
        assert!(matches!(round.state(), RoundState::PlaceCard(_)));
        assert_eq!(round.turn_count(), 1);
        feed(&mut round, &[Cancel]);
        assert_eq!(round.state(), &RoundState::SelectCard);
    }

    #[test]
    fn discard_caravan_by_keys() {
        let mut table = table_with_hand(&[card!("7♠"), card!("8♦")]);
        let mut round = RoundManager::new(&mut table, RoundConfig::default());
        feed(&mut round, &[Accept, Accept]);
        feed(&mut round, &[DiscardCaravan, Right, Left, Up, Accept]);
        assert!(round
            .table()
            .caravan(PlayerPosition::Bottom, CaravanPosition::Left)
            .is_empty());
        assert_eq!(round.turn_count(), 3);
    }

    #[test]
    fn exiting_by_keys() {
        let mut table = table_with_hand(&[]);
        let mut round = RoundManager::new(&mut table, RoundConfig::default());
        // An empty hand has nothing to pick or discard
        feed(&mut round, &[Accept, DiscardCard, Left]);
        assert_eq!(round.state(), &RoundState::SelectCard);
        feed(&mut round, &[Cancel, Left, Cancel]);
        assert_eq!(round.state(), &RoundState::SelectCard);
        feed(&mut round, &[Cancel, Accept]);
        assert!(round.is_exited());
        feed(&mut round, &[Cancel, Accept, DiscardCaravan]);
        assert!(round.is_exited());
    }

    #[test]
    fn opening_refusals_are_ignored() {
        let mut table = table_with_hand(&[card!("7♠")]);
        let config = RoundConfig {
            opening_rule: true,
            ..RoundConfig::default()
        };
        let mut round = RoundManager::new(&mut table, config);
        feed(&mut round, &[DiscardCaravan, DiscardCard]);
        assert_eq!(round.state(), &RoundState::SelectCard);
        assert_eq!(round.hand().len(), 1);
    }
}
