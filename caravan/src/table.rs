use std::cmp::Ordering;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Caravan, CaravanPosition, Card, IllegalPlacement, Player, PlayerPosition, Rank};

/// Two players facing each other, each with three caravans.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Indexed by [`PlayerPosition::index()`].
    players: [Player; 2],
}

impl Table {
    pub fn new(top: Player, bottom: Player) -> Self {
        Self {
            players: [top, bottom],
        }
    }

    /// Deals both players a freshly shuffled deck.
    pub fn shuffled(rng: &mut StdRng, hand_size: usize) -> Self {
        let top = Player::shuffled(rng, hand_size);
        let bottom = Player::shuffled(rng, hand_size);
        Self::new(top, bottom)
    }

    pub fn player(&self, position: PlayerPosition) -> &Player {
        &self.players[position.index()]
    }

    pub fn player_mut(&mut self, position: PlayerPosition) -> &mut Player {
        &mut self.players[position.index()]
    }

    pub fn caravan(&self, player: PlayerPosition, caravan: CaravanPosition) -> &Caravan {
        self.player(player).caravan(caravan)
    }

    pub fn caravan_mut(&mut self, player: PlayerPosition, caravan: CaravanPosition) -> &mut Caravan {
        self.player_mut(player).caravan_mut(caravan)
    }

    /// All six caravans with their positions, top player first, left to right.
    pub fn caravans(&self) -> impl Iterator<Item = (PlayerPosition, CaravanPosition, &Caravan)> {
        PlayerPosition::ALL.into_iter().flat_map(move |p| {
            CaravanPosition::ALL
                .into_iter()
                .map(move |c| (p, c, self.caravan(p, c)))
        })
    }

    /// Exchanges the seats of the two players.
    pub fn swap_players(&mut self) {
        self.players.swap(0, 1);
    }

    /// Attaches a function card to a card on the table and resolves its effect.
    ///
    /// A Joker attached to an Ace removes every other card of the Ace's suit
    /// from the table. Attached to a numbered card, it removes every other
    /// card of that rank.
    pub fn apply(
        &mut self,
        function_card: Card,
        player: PlayerPosition,
        caravan: CaravanPosition,
        card_index: usize,
    ) -> Result<(), IllegalPlacement> {
        let target = self.caravan(player, caravan).cards().get(card_index).copied();
        self.caravan_mut(player, caravan).apply(function_card, card_index)?;
        if let (Rank::Joker, Some(target)) = (function_card.rank, target) {
            let protected = (player, caravan, card_index);
            let removed = self.remove_where(|pos, card| {
                pos != protected
                    && match target.rank {
                        Rank::Ace => card.suit == target.suit,
                        _ => card.rank == target.rank,
                    }
            });
            debug!(%target, removed, "Joker resolved");
        }
        Ok(())
    }

    /// Removes every card on the table matching `pred`, which receives the
    /// card's (player, caravan, index) position.
    fn remove_where(
        &mut self,
        mut pred: impl FnMut((PlayerPosition, CaravanPosition, usize), Card) -> bool,
    ) -> usize {
        let mut removed = 0;
        for player in PlayerPosition::ALL {
            for caravan in CaravanPosition::ALL {
                removed += self
                    .caravan_mut(player, caravan)
                    .remove_where(|i, card| pred((player, caravan, i), card));
            }
        }
        removed
    }

    /// The player who wins the column of caravans at `caravan`, if decided.
    ///
    /// A sold caravan wins against an unsold one, and against a sold one
    /// with a lower value. Equal sold caravans leave the column open.
    pub fn column_winner(&self, caravan: CaravanPosition) -> Option<PlayerPosition> {
        let top = self.caravan(PlayerPosition::Top, caravan);
        let bottom = self.caravan(PlayerPosition::Bottom, caravan);
        match (top.is_sold(), bottom.is_sold()) {
            (false, false) => None,
            (true, false) => Some(PlayerPosition::Top),
            (false, true) => Some(PlayerPosition::Bottom),
            (true, true) => match top.value().cmp(&bottom.value()) {
                Ordering::Less => Some(PlayerPosition::Bottom),
                Ordering::Equal => None,
                Ordering::Greater => Some(PlayerPosition::Top),
            },
        }
    }

    /// The winner of the round, once all three columns are decided.
    pub fn winner(&self) -> Option<PlayerPosition> {
        let mut columns_won = [0; 2];
        for caravan in CaravanPosition::ALL {
            columns_won[self.column_winner(caravan)?.index()] += 1;
        }
        if columns_won[PlayerPosition::Top.index()] >= 2 {
            Some(PlayerPosition::Top)
        } else {
            Some(PlayerPosition::Bottom)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{card, Deck, Hand};

    fn empty_table() -> Table {
        Table::new(
            Player::new(Deck::default(), Hand::default()),
            Player::new(Deck::default(), Hand::default()),
        )
    }

    fn fill(table: &mut Table, player: PlayerPosition, caravan: CaravanPosition, cards: &[Card]) {
        for &card in cards {
            table.caravan_mut(player, caravan).append(card).unwrap();
        }
    }

    #[test]
    fn swapping_players() {
        let mut table = Table::shuffled(&mut StdRng::seed_from_u64(3), 8);
        let top = table.player(PlayerPosition::Top).clone();
        let bottom = table.player(PlayerPosition::Bottom).clone();
        table.swap_players();
        assert_eq!(table.player(PlayerPosition::Top), &bottom);
        assert_eq!(table.player(PlayerPosition::Bottom), &top);
    }

    #[test]
    fn joker_on_numbered_card() {
        use CaravanPosition::*;
        use PlayerPosition::*;
        let mut table = empty_table();
        fill(&mut table, Bottom, Left, &[card!("7♠"), card!("9♠")]);
        fill(&mut table, Bottom, Middle, &[card!("9♦"), card!("2♦")]);
        fill(&mut table, Top, Right, &[card!("9♣")]);
        table.apply(Card::JOKER, Bottom, Left, 1).unwrap();
        assert_eq!(table.caravan(Bottom, Left).cards(), &[card!("7♠"), card!("9♠")]);
        assert_eq!(table.caravan(Bottom, Left).applied_face_cards()[1], vec![Card::JOKER]);
        assert_eq!(table.caravan(Bottom, Middle).cards(), &[card!("2♦")]);
        // The caravan keeps its suit and direction while cards remain
        assert_eq!(table.caravan(Bottom, Middle).suit(), Some(crate::Suit::Diamond));
        assert!(table.caravan(Top, Right).is_empty());
        assert_eq!(table.caravan(Top, Right).suit(), None);
    }

    #[test]
    fn joker_on_ace() {
        use CaravanPosition::*;
        use PlayerPosition::*;
        let mut table = empty_table();
        fill(&mut table, Top, Left, &[card!("A♥"), card!("5♥"), card!("6♣")]);
        fill(&mut table, Top, Middle, &[card!("A♠"), card!("3♥")]);
        table.apply(Card::JOKER, Top, Left, 0).unwrap();
        assert_eq!(table.caravan(Top, Left).cards(), &[card!("A♥"), card!("6♣")]);
        assert_eq!(table.caravan(Top, Middle).cards(), &[card!("A♠")]);
    }

    #[test]
    fn illegal_application_changes_nothing() {
        let mut table = empty_table();
        let before = table.clone();
        assert_eq!(
            table.apply(Card::JOKER, PlayerPosition::Top, CaravanPosition::Left, 0),
            Err(IllegalPlacement::NoCardAtPosition {
                card_index: 0,
                len: 0
            })
        );
        assert_eq!(table, before);
    }

    #[test]
    fn columns_and_winner() {
        use CaravanPosition::*;
        use PlayerPosition::*;
        let mut table = empty_table();
        assert_eq!(table.winner(), None);
        fill(&mut table, Top, Left, &[card!("T♠"), card!("9♠"), card!("4♠")]);
        fill(&mut table, Bottom, Left, &[card!("T♥"), card!("9♥"), card!("2♥")]);
        assert_eq!(table.column_winner(Left), Some(Top));
        fill(&mut table, Bottom, Middle, &[card!("T♦"), card!("9♦"), card!("3♦")]);
        assert_eq!(table.column_winner(Middle), Some(Bottom));
        assert_eq!(table.winner(), None);
        fill(&mut table, Top, Right, &[card!("T♣"), card!("9♣"), card!("5♣")]);
        fill(&mut table, Bottom, Right, &[card!("T♥"), card!("9♥"), card!("6♥")]);
        assert_eq!(table.column_winner(Right), Some(Bottom));
        assert_eq!(table.winner(), Some(Bottom));
    }

    #[test]
    fn tie_leaves_column_open() {
        use CaravanPosition::*;
        use PlayerPosition::*;
        let mut table = empty_table();
        fill(&mut table, Top, Middle, &[card!("T♠"), card!("9♠"), card!("4♠")]);
        fill(&mut table, Bottom, Middle, &[card!("T♥"), card!("9♥"), card!("4♥")]);
        assert_eq!(table.column_winner(Middle), None);
    }
}
