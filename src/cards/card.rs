//! Card identity and values.
//!
//! Every card is a small `Copy` value: suit, rank, and a `CardKind`
//! discriminator. Attack and health are derived from the rank and kind,
//! so a card's printed values can never drift during a game.
//!
//! ## Ranks
//!
//! | Rank    | Kind      | Attack | Health |
//! |---------|-----------|--------|--------|
//! | 1       | Companion | 1      | 1      |
//! | 2..=10  | Standard  | rank   | rank   |
//! | 11 (J)  | Enemy     | 10     | 20     |
//! | 12 (Q)  | Enemy     | 15     | 30     |
//! | 13 (K)  | Enemy     | 20     | 40     |
//!
//! Damage taken by the enemy currently being fought is tracked separately
//! by `ActiveEnemy`, never on the card.

use serde::{Deserialize, Serialize};

/// Card suit.
///
/// Variant order is alphabetical, which is also the order suit effects
/// resolve in when several suits appear in one play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in effect-resolution order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Dense index (0..4) in alphabetical order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Observation code: hearts=1, diamonds=2, spades=3, clubs=4.
    ///
    /// Zero is reserved for padding in observation vectors.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Spades => 3,
            Suit::Clubs => 4,
        }
    }

    /// Lowercase suit name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Card variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Number card, ranks 2..=10.
    Standard,
    /// Animal companion (ace), rank 1.
    Companion,
    /// Royal enemy: jack, queen or king.
    Enemy,
}

/// Stable identity of a card within the 52-card pool.
///
/// Computed as `suit_index * 13 + (rank - 1)`, so it is always in `0..52`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Get the raw identity.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: u8,
    kind: CardKind,
}

impl Card {
    /// Rank of animal companions.
    pub const COMPANION_RANK: u8 = 1;
    /// Rank of jacks.
    pub const JACK: u8 = 11;
    /// Rank of queens.
    pub const QUEEN: u8 = 12;
    /// Rank of kings.
    pub const KING: u8 = 13;

    /// Create a number card.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is outside `2..=10`. Use `from_rank` for ranks that
    /// are not known to be valid.
    #[must_use]
    pub fn standard(suit: Suit, rank: u8) -> Self {
        assert!((2..=10).contains(&rank), "Number card rank must be 2-10, got {rank}");
        Self { suit, rank, kind: CardKind::Standard }
    }

    /// Create an animal companion.
    #[must_use]
    pub const fn companion(suit: Suit) -> Self {
        Self { suit, rank: Self::COMPANION_RANK, kind: CardKind::Companion }
    }

    /// Create a royal enemy card.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not 11, 12 or 13.
    #[must_use]
    pub fn enemy(suit: Suit, rank: u8) -> Self {
        assert!(
            (Self::JACK..=Self::KING).contains(&rank),
            "Enemy rank must be 11-13, got {rank}"
        );
        Self { suit, rank, kind: CardKind::Enemy }
    }

    /// Create whichever variant the rank implies.
    ///
    /// Returns `None` for ranks outside `1..=13`.
    #[must_use]
    pub fn from_rank(suit: Suit, rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::companion(suit)),
            2..=10 => Some(Self::standard(suit, rank)),
            11..=13 => Some(Self::enemy(suit, rank)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn kind(self) -> CardKind {
        self.kind
    }

    #[must_use]
    pub const fn is_companion(self) -> bool {
        matches!(self.kind, CardKind::Companion)
    }

    #[must_use]
    pub const fn is_enemy(self) -> bool {
        matches!(self.kind, CardKind::Enemy)
    }

    /// Attack value.
    #[must_use]
    pub const fn attack(self) -> i32 {
        match self.rank {
            Self::JACK => 10,
            Self::QUEEN => 15,
            Self::KING => 20,
            r => r as i32,
        }
    }

    /// Health value: twice the attack for enemies, equal to attack otherwise.
    ///
    /// For held cards this is the amount of damage the card absorbs when
    /// sacrificed.
    #[must_use]
    pub const fn health(self) -> i32 {
        match self.kind {
            CardKind::Enemy => self.attack() * 2,
            CardKind::Standard | CardKind::Companion => self.attack(),
        }
    }

    /// Pool identity of this card.
    #[must_use]
    pub const fn id(self) -> CardId {
        CardId((self.suit.index() * 13) as u8 + self.rank - 1)
    }

    fn rank_label(self) -> String {
        match self.rank {
            1 => "A".to_string(),
            Self::JACK => "J".to_string(),
            Self::QUEEN => "Q".to_string(),
            Self::KING => "K".to_string(),
            r => r.to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit.symbol())
    }
}
