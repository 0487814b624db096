//! Ordinal ratings carried by mentors and teams.
//!
//! Each rating stores its level, the position of its label in the matching
//! [`Vocabulary`](crate::Vocabulary). Cost and value tables in the parameters
//! are indexed by these levels.

macro_rules! ordinal_level {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            /// Creates a rating from its level.
            pub const fn new(level: usize) -> Self {
                $name(level)
            }

            /// Position of the rating in its vocabulary.
            #[inline]
            pub const fn level(self) -> usize {
                self.0
            }
        }
    };
}

ordinal_level! {
    /// How comfortable a mentor is mentoring a team alone (0 = least).
    ComfortLevel
}

ordinal_level! {
    /// How confident a mentor is in one skill (0 = least).
    SkillConfidence
}

ordinal_level! {
    /// How much a team wants one skill (0 = least).
    SkillRequest
}

/// How practical a transit mode is for a mentor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransitConvenience {
    NotPossible,
    Inconvenient,
    Convenient,
}

impl TransitConvenience {
    /// All conveniences in vocabulary order.
    pub const ALL: [TransitConvenience; 3] = [
        TransitConvenience::NotPossible,
        TransitConvenience::Inconvenient,
        TransitConvenience::Convenient,
    ];

    /// Maps a vocabulary level to a convenience.
    pub fn from_level(level: usize) -> Option<Self> {
        Self::ALL.get(level).copied()
    }

    /// Position in the vocabulary and in the convenience weight table.
    pub fn level(self) -> usize {
        match self {
            TransitConvenience::NotPossible => 0,
            TransitConvenience::Inconvenient => 1,
            TransitConvenience::Convenient => 2,
        }
    }
}
