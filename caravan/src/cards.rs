use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A playing card in a 54-card Caravan deck.
///
/// Every card except the [Joker](Rank::Joker) has a suit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

/// The suit of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spade,
    #[serde(rename = "♥")]
    Heart,
    #[serde(rename = "♦")]
    Diamond,
    #[serde(rename = "♣")]
    Club,
}

/// The rank of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "*")]
    Joker,
}

/// Whether a card is placed on a caravan or attached to a card in one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardKind {
    /// Ace through 10.
    Value,
    /// Jack, Queen, King and Joker.
    Function,
}

pub const SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

/// All ranks that come with a suit, i.e. everything except the Joker.
pub const SUITED_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    /// The numeric value, which only value cards have.
    pub fn value(self) -> Option<u32> {
        match self {
            Rank::Ace => Some(1),
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Ten => Some(10),
            Rank::Jack | Rank::Queen | Rank::King | Rank::Joker => None,
        }
    }

    pub fn kind(self) -> CardKind {
        match self.value() {
            Some(_) => CardKind::Value,
            None => CardKind::Function,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "*",
        }
    }
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Heart | Suit::Diamond)
    }
}

impl Card {
    pub const JOKER: Card = Card {
        rank: Rank::Joker,
        suit: None,
    };

    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.rank.kind()
    }

    pub fn is_value_card(&self) -> bool {
        self.kind() == CardKind::Value
    }

    pub fn is_function_card(&self) -> bool {
        self.kind() == CardKind::Function
    }

    /// The card's numeric value, `None` for function cards.
    pub fn value(&self) -> Option<u32> {
        self.rank.value()
    }

    /// Render this card as a Unicode playing cards character
    pub fn unicode_char(&self) -> char {
        // https://en.wikipedia.org/wiki/Playing_Cards_(Unicode_block)
        let row = match self.suit {
            Some(Suit::Spade) => 0,
            Some(Suit::Heart) => 1,
            Some(Suit::Diamond) => 2,
            Some(Suit::Club) => 3,
            None => return '🃏',
        };
        let col = match self.rank {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            // 12 is the knight, which is not part of the deck
            Rank::Queen => 13,
            Rank::King => 14,
            Rank::Joker => 15,
        };
        let codepoint = 0x1F0A0 + 16 * row + col;
        char::from_u32(codepoint).unwrap_or('🂠')
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit.symbol()),
            None => write!(f, "{}", self.rank),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidRank,
    InvalidSuit,
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::LessThanTwoChars => write!(f, "Card code is shorter than two characters"),
            CardFromStrErr::MoreThanTwoChars => write!(f, "Card code is longer than two characters"),
            CardFromStrErr::InvalidRank => write!(f, "Card code has an unknown rank"),
            CardFromStrErr::InvalidSuit => write!(f, "Card code has an unknown suit"),
        }
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Card::JOKER);
        }
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let suit_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let rank = match rank_char {
            'A' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            _ => return Err(CardFromStrErr::InvalidRank),
        };
        let suit = match suit_char {
            '♠' => Suit::Spade,
            '♥' => Suit::Heart,
            '♦' => Suit::Diamond,
            '♣' => Suit::Club,
            _ => return Err(CardFromStrErr::InvalidSuit),
        };
        Ok(Card::new(rank, suit))
    }
}

/// Shorthand for creating cards from a two-character string.
///
/// The first character is the [rank](Rank) (note: 10 is `T`), the second is
/// the [suit](Suit) as a unicode character (♠, ♥, ♦, or ♣). A single `*` is
/// the Joker.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use caravan::{card, Card, Rank, Suit};
/// assert_eq!(card!("T♥"), Card::new(Rank::Ten, Suit::Heart));
/// assert_eq!(card!("*"), Card::JOKER);
/// ```
#[macro_export]
macro_rules! card {
    ($rs:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($rs)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

/// The 54 cards of a fresh deck, suit by suit, followed by the two Jokers.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(54);
    for suit in SUITS {
        for rank in SUITED_RANKS {
            cards.push(Card::new(rank, suit));
        }
    }
    cards.push(Card::JOKER);
    cards.push(Card::JOKER);
    cards
}
