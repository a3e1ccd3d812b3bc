use serde::{Deserialize, Serialize};

use crate::{CaravanPosition, PickedCardPosition, PlayerPosition, Table};

/// Directions in which a picked card can be moved across the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Where the picked card would end up relative to the caravan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// The free slot above the top card, where a value card is appended.
    Top,
    /// On an existing card, where a function card is attached.
    Other,
}

impl PickedCardPosition {
    /// The position a card is picked up to: the bottom player's left
    /// caravan, on its current top card, or on the free slot if it is empty.
    pub fn initial(table: &Table) -> Self {
        let (player, caravan) = (PlayerPosition::Bottom, CaravanPosition::Left);
        let len = table.caravan(player, caravan).len();
        if len == 0 {
            Self::top_of(player, caravan, 0)
        } else {
            Self {
                player,
                caravan,
                card_index: len - 1,
                location: Location::Other,
            }
        }
    }

    fn top_of(player: PlayerPosition, caravan: CaravanPosition, len: usize) -> Self {
        Self {
            player,
            caravan,
            card_index: len,
            location: Location::Top,
        }
    }

    /// The position after one step in `direction`, bounds-checked against
    /// the caravans on `table`.
    ///
    /// Index 0 is the card closest to the middle of the table, so the top
    /// player's caravans grow upwards and the bottom player's downwards.
    pub fn moved(self, direction: MoveDirection, table: &Table) -> Self {
        match (direction, self.player) {
            (MoveDirection::Up, PlayerPosition::Top)
            | (MoveDirection::Down, PlayerPosition::Bottom) => self.outward(table),
            (MoveDirection::Down, PlayerPosition::Top)
            | (MoveDirection::Up, PlayerPosition::Bottom) => self.inward(table),
            (MoveDirection::Left, _) => match self.caravan.left() {
                Some(neighbour) => self.sideways(neighbour, table),
                None => self,
            },
            (MoveDirection::Right, _) => match self.caravan.right() {
                Some(neighbour) => self.sideways(neighbour, table),
                None => self,
            },
        }
    }

    fn outward(self, table: &Table) -> Self {
        let len = table.caravan(self.player, self.caravan).len();
        match self.location {
            Location::Other if self.card_index + 1 < len => Self {
                card_index: self.card_index + 1,
                ..self
            },
            Location::Other => Self::top_of(self.player, self.caravan, len),
            Location::Top => self,
        }
    }

    fn inward(self, table: &Table) -> Self {
        let len = table.caravan(self.player, self.caravan).len();
        match self.location {
            Location::Top if len > 0 => Self {
                card_index: len - 1,
                location: Location::Other,
                ..self
            },
            Location::Other if self.card_index > 0 => Self {
                card_index: self.card_index - 1,
                ..self
            },
            // Closest to the middle: hop over to the opponent's caravan,
            // but only if there is a card to land on.
            _ => {
                let opponent = self.player.opponent();
                if table.caravan(opponent, self.caravan).is_empty() {
                    self
                } else {
                    Self {
                        player: opponent,
                        card_index: 0,
                        location: Location::Other,
                        ..self
                    }
                }
            }
        }
    }

    fn sideways(self, neighbour: CaravanPosition, table: &Table) -> Self {
        let len = table.caravan(self.player, neighbour).len();
        // Keep the height if the neighbour has a card there. From the free
        // slot this means the neighbour is longer.
        if self.card_index < len {
            Self {
                caravan: neighbour,
                location: Location::Other,
                ..self
            }
        } else {
            Self::top_of(self.player, neighbour, len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, Card, Deck, Hand, Player};

    use CaravanPosition::*;
    use MoveDirection::{Down, Up};
    use MoveDirection as Move;
    use PlayerPosition::*;

    fn table_with(caravans: &[(PlayerPosition, CaravanPosition, &[Card])]) -> Table {
        let mut table = Table::new(
            Player::new(Deck::default(), Hand::default()),
            Player::new(Deck::default(), Hand::default()),
        );
        for &(player, caravan, cards) in caravans {
            for &card in cards {
                table.caravan_mut(player, caravan).append(card).unwrap();
            }
        }
        table
    }

    fn pos(
        player: PlayerPosition,
        caravan: CaravanPosition,
        card_index: usize,
        location: Location,
    ) -> PickedCardPosition {
        PickedCardPosition {
            player,
            caravan,
            card_index,
            location,
        }
    }

    #[test]
    fn initial_position() {
        let table = table_with(&[]);
        assert_eq!(
            PickedCardPosition::initial(&table),
            pos(Bottom, Left, 0, Location::Top)
        );
        let table = table_with(&[(Bottom, Left, &[card!("7♠"), card!("9♠")])]);
        assert_eq!(
            PickedCardPosition::initial(&table),
            pos(Bottom, Left, 1, Location::Other)
        );
    }

    #[test]
    fn vertical_within_caravan() {
        let table = table_with(&[(Bottom, Left, &[card!("7♠"), card!("9♠")])]);
        let start = pos(Bottom, Left, 0, Location::Other);
        let down = start.moved(Down, &table);
        assert_eq!(down, pos(Bottom, Left, 1, Location::Other));
        let down = down.moved(Down, &table);
        assert_eq!(down, pos(Bottom, Left, 2, Location::Top));
        // Can't go beyond the free slot
        assert_eq!(down.moved(Down, &table), down);
        let up = down.moved(Up, &table);
        assert_eq!(up, pos(Bottom, Left, 1, Location::Other));
        assert_eq!(up.moved(Up, &table), start);
    }

    #[test]
    fn crossing_needs_a_card_on_the_other_side() {
        let table = table_with(&[(Bottom, Left, &[card!("7♠")])]);
        let start = pos(Bottom, Left, 0, Location::Other);
        assert_eq!(start.moved(Up, &table), start);

        let table = table_with(&[
            (Bottom, Left, &[card!("7♠")]),
            (Top, Left, &[card!("3♦"), card!("5♦")]),
        ]);
        let crossed = start.moved(Up, &table);
        assert_eq!(crossed, pos(Top, Left, 0, Location::Other));
        assert_eq!(crossed.moved(Up, &table), pos(Top, Left, 1, Location::Other));
        assert_eq!(
            crossed.moved(Up, &table).moved(Up, &table),
            pos(Top, Left, 2, Location::Top)
        );
        assert_eq!(crossed.moved(Down, &table), start);
    }

    #[test]
    fn crossing_from_an_empty_caravan() {
        let table = table_with(&[(Top, Middle, &[card!("3♦")])]);
        let start = pos(Bottom, Middle, 0, Location::Top);
        assert_eq!(start.moved(Up, &table), pos(Top, Middle, 0, Location::Other));
        assert_eq!(start.moved(Down, &table), start);
    }

    #[test]
    fn sideways_moves() {
        let table = table_with(&[
            (Bottom, Left, &[card!("7♠"), card!("9♠")]),
            (Bottom, Middle, &[card!("2♦"), card!("4♦"), card!("6♦")]),
            (Bottom, Right, &[card!("A♣"), card!("3♣")]),
        ]);
        let top = pos(Bottom, Left, 2, Location::Top);
        // Through a longer caravan and back onto a free slot
        let right_twice = top.moved(Move::Right, &table).moved(Move::Right, &table);
        assert_eq!(right_twice, pos(Bottom, Right, 2, Location::Top));
        // Longer neighbour: keep the index, land on its card
        assert_eq!(top.moved(Move::Right, &table), pos(Bottom, Middle, 2, Location::Other));
        // Shorter neighbour: clamp to its free slot
        let on_card = pos(Bottom, Middle, 2, Location::Other);
        assert_eq!(on_card.moved(Move::Left, &table), pos(Bottom, Left, 2, Location::Top));
        assert_eq!(on_card.moved(Move::Right, &table), pos(Bottom, Right, 2, Location::Top));
        // Long enough neighbour keeps the card index
        let low = pos(Bottom, Middle, 1, Location::Other);
        assert_eq!(low.moved(Move::Left, &table), pos(Bottom, Left, 1, Location::Other));
        // No wrap-around
        let edge = pos(Bottom, Left, 0, Location::Other);
        assert_eq!(edge.moved(Move::Left, &table), edge);
        assert_eq!(
            pos(Bottom, Right, 1, Location::Other).moved(Move::Right, &table),
            pos(Bottom, Right, 1, Location::Other)
        );
    }

    #[test]
    fn equal_length_just_switches() {
        let table = table_with(&[
            (Bottom, Left, &[card!("7♠")]),
            (Bottom, Middle, &[card!("3♦")]),
        ]);
        let top = pos(Bottom, Left, 1, Location::Top);
        assert_eq!(top.moved(Move::Right, &table), pos(Bottom, Middle, 1, Location::Top));
        assert_eq!(top.moved(Move::Right, &table).moved(Move::Left, &table), top);
    }

    #[test]
    fn left_and_right_are_symmetric() {
        let table = table_with(&[
            (Top, Left, &[card!("7♠")]),
            (Top, Right, &[card!("7♥")]),
        ]);
        let middle = pos(Top, Middle, 0, Location::Top);
        assert_eq!(middle.moved(Move::Left, &table), pos(Top, Left, 0, Location::Other));
        assert_eq!(middle.moved(Move::Right, &table), pos(Top, Right, 0, Location::Other));
        let left = pos(Top, Left, 0, Location::Other);
        assert_eq!(left.moved(Move::Right, &table), pos(Top, Middle, 0, Location::Top));
        let right = pos(Top, Right, 0, Location::Other);
        assert_eq!(right.moved(Move::Left, &table), pos(Top, Middle, 0, Location::Top));
    }
}
