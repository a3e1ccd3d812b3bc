use crate::{Card, Rank, Suit, SUITED_RANKS, SUITS};

impl quickcheck::Arbitrary for Suit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&SUITS).unwrap()
    }
}

impl quickcheck::Arbitrary for Rank {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // One Joker per 27 cards, like two Jokers in a 54 card deck
        if u8::arbitrary(g) % 27 == 0 {
            Rank::Joker
        } else {
            *g.choose(&SUITED_RANKS).unwrap()
        }
    }
}

impl quickcheck::Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        match Rank::arbitrary(g) {
            Rank::Joker => Card::JOKER,
            rank => Card::new(rank, Suit::arbitrary(g)),
        }
    }
}
