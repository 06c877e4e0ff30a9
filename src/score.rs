use crate::error::PickerError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A discrete effort level. The declaration order is the rank order, so the
/// derived `Ord` compares by rank.
///
/// `Skipped` means the user explicitly chose not to rate the activity. It is
/// different from "no score yet", which callers express as `None`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(into = "u8", try_from = "u8")]
pub enum Score {
    Skipped = 0,
    Easy1 = 1,
    Easy2 = 2,
    Easy3 = 3,
    Moderate1 = 4,
    Moderate2 = 5,
    Moderate3 = 6,
    Hard1 = 7,
    Hard2 = 8,
    AllOut1 = 9,
    AllOut2 = 10,
}

/// The four qualitative bands. Sizes are 3, 3, 2, 2 in ascending order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Segment {
    Easy,
    Moderate,
    Hard,
    AllOut,
}

pub const SEGMENT_COUNT: usize = 4;

/// Number of ranked (non-skipped) scores.
pub const RANKED_SCORE_COUNT: usize = 10;

impl Score {
    pub const MAX_RANK: u8 = 10;

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::iter().nth(rank as usize)
    }

    /// Total constructor over the full domain: out-of-range values snap to
    /// the nearest bound.
    pub fn clamp(raw: i64) -> Self {
        ScoreRange::FULL.clamp(raw)
    }

    pub fn is_skipped(self) -> bool {
        self == Score::Skipped
    }

    pub fn segment(self) -> Option<Segment> {
        match self {
            Score::Skipped => None,
            Score::Easy1 | Score::Easy2 | Score::Easy3 => Some(Segment::Easy),
            Score::Moderate1 | Score::Moderate2 | Score::Moderate3 => Some(Segment::Moderate),
            Score::Hard1 | Score::Hard2 => Some(Segment::Hard),
            Score::AllOut1 | Score::AllOut2 => Some(Segment::AllOut),
        }
    }

    pub fn segment_index(self) -> Option<usize> {
        self.segment().map(Segment::index)
    }

    pub fn advanced_by(self, delta: i64) -> Self {
        ScoreRange::FULL.advance(self, delta)
    }

    pub fn distance_to(self, other: Score) -> i64 {
        other.rank() as i64 - self.rank() as i64
    }

    /// Fill level for a bar-style icon, 0.0 for skipped up to 1.0.
    pub fn fill_fraction(self) -> f32 {
        self.rank() as f32 / Self::MAX_RANK as f32
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.rank()
    }
}

impl TryFrom<u8> for Score {
    type Error = PickerError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Score::from_rank(rank)
            .ok_or_else(|| PickerError::Validation(format!("No effort score with rank {}", rank)))
    }
}

impl Segment {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Inclusive rank range covered by this segment.
    pub fn ranks(self) -> RangeInclusive<u8> {
        match self {
            Segment::Easy => 1..=3,
            Segment::Moderate => 4..=6,
            Segment::Hard => 7..=8,
            Segment::AllOut => 9..=10,
        }
    }

    pub fn len(self) -> usize {
        self.ranks().count()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn first(self) -> Score {
        Score::clamp(*self.ranks().start() as i64)
    }

    pub fn last(self) -> Score {
        Score::clamp(*self.ranks().end() as i64)
    }

    pub fn scores(self) -> Vec<Score> {
        Score::iter().filter(|s| s.segment() == Some(self)).collect()
    }

    /// Number of ranked scores in all segments before this one.
    pub fn scores_before(self) -> usize {
        (*self.ranks().start() - 1) as usize
    }
}

/// A contiguous, inclusive window of the score domain with clamping helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub lower: Score,
    pub upper: Score,
}

impl ScoreRange {
    /// Every score, `Skipped` included.
    pub const FULL: ScoreRange = ScoreRange {
        lower: Score::Skipped,
        upper: Score::AllOut2,
    };

    /// The scores the picker can select.
    pub const RANKED: ScoreRange = ScoreRange {
        lower: Score::Easy1,
        upper: Score::AllOut2,
    };

    pub fn clamp(&self, raw: i64) -> Score {
        let lo = self.lower.rank() as i64;
        let hi = self.upper.rank() as i64;
        let rank = raw.clamp(lo, hi);
        Score::from_rank(rank as u8).unwrap_or(self.lower)
    }

    pub fn advance(&self, score: Score, delta: i64) -> Score {
        self.clamp((score.rank() as i64).saturating_add(delta))
    }

    pub fn contains(&self, score: Score) -> bool {
        self.lower <= score && score <= self.upper
    }

    pub fn len(&self) -> usize {
        (self.upper.rank() - self.lower.rank()) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.upper < self.lower
    }

    pub fn iter(&self) -> impl Iterator<Item = Score> + '_ {
        Score::iter().filter(move |s| self.contains(*s))
    }
}

/// One row of the list-style selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Section { segment: Segment, scores: Vec<Score> },
    NoScore(Score),
}

/// The list alternative to the picker: the four segments in order, then a
/// trailing entry for explicitly skipping.
pub fn list_entries() -> Vec<ListEntry> {
    let mut entries: Vec<ListEntry> = Segment::iter()
        .map(|segment| ListEntry::Section {
            segment,
            scores: segment.scores(),
        })
        .collect();
    entries.push(ListEntry::NoScore(Score::Skipped));
    entries
}
