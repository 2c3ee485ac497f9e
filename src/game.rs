//! "Spot the difference": draw a row from a random dataset and let the
//! operator guess whether it is real or synthetic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::data::model::{DatasetLabel, TrafficTable};
use crate::data::store::DatasetStore;

pub const MIN_SAMPLE_SIZE: usize = 5;
pub const MAX_SAMPLE_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// Guess / verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Real,
    Synthetic,
}

impl Guess {
    pub const ALL: [Guess; 2] = [Guess::Real, Guess::Synthetic];

    pub fn name(self) -> &'static str {
        match self {
            Guess::Real => "Real",
            Guess::Synthetic => "Synthetic",
        }
    }

    /// `Real` is right only for the real table, `Synthetic` for any other.
    pub fn is_correct(self, actual: DatasetLabel) -> bool {
        match self {
            Guess::Real => !actual.is_synthetic(),
            Guess::Synthetic => actual.is_synthetic(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub guess: Guess,
    pub actual: DatasetLabel,
    pub correct: bool,
}

impl Verdict {
    pub fn message(&self) -> String {
        if self.correct {
            format!("Correct! It was {}.", self.actual)
        } else {
            format!("Oops! It was actually {}.", self.actual)
        }
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// The row currently on show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub label: DatasetLabel,
    pub row: usize,
}

/// Uniform draws over datasets and rows.
#[derive(Debug, Clone)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    /// Seeded for reproducible sessions, from entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Sampler { rng }
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Sampler { rng }
    }

    pub fn draw_label(&mut self) -> DatasetLabel {
        *DatasetLabel::ALL
            .choose(&mut self.rng)
            .unwrap_or(&DatasetLabel::Real)
    }

    /// Pick a dataset uniformly, then a row uniformly within it.
    pub fn draw_round(&mut self, store: &DatasetStore) -> Round {
        let label = self.draw_label();
        let n = store.table(label).len();
        let row = if n == 0 { 0 } else { self.rng.gen_range(0..n) };
        log::debug!("New round: row {row} of {label}");
        Round { label, row }
    }

    /// Distinct row indices of `table`. `size` is clamped to the sample-size
    /// bounds and to the table length.
    pub fn draw_sample(&mut self, table: &TrafficTable, size: usize) -> Vec<usize> {
        let amount = clamp_sample_size(size).min(table.len());
        rand::seq::index::sample(&mut self.rng, table.len(), amount).into_vec()
    }
}

pub fn clamp_sample_size(size: usize) -> usize {
    size.clamp(MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE)
}

// ---------------------------------------------------------------------------
// Game controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No guess yet.
    Idle,
    /// A guess is selected but not revealed.
    Guessed(Guess),
    Revealed(Verdict),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub played: u32,
    pub correct: u32,
}

/// One round of the guessing game plus the running score.
#[derive(Debug, Clone)]
pub struct GameController {
    round: Round,
    phase: GamePhase,
    score: Score,
}

impl GameController {
    pub fn new(round: Round) -> Self {
        GameController {
            round,
            phase: GamePhase::Idle,
            score: Score::default(),
        }
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn current_guess(&self) -> Option<Guess> {
        match self.phase {
            GamePhase::Idle => None,
            GamePhase::Guessed(g) => Some(g),
            GamePhase::Revealed(v) => Some(v.guess),
        }
    }

    /// Replace the round and go back to `Idle`. The score carries over.
    pub fn start_round(&mut self, round: Round) {
        self.round = round;
        self.phase = GamePhase::Idle;
    }

    /// Select (or change) the guess. Ignored once the answer is revealed.
    pub fn select(&mut self, guess: Guess) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::Guessed(_) => {
                self.phase = GamePhase::Guessed(guess);
                true
            }
            GamePhase::Revealed(_) => false,
        }
    }

    /// Reveal the answer for the selected guess. Does nothing while `Idle`;
    /// revealing twice returns the same verdict without rescoring.
    pub fn reveal(&mut self) -> Option<Verdict> {
        match self.phase {
            GamePhase::Idle => None,
            GamePhase::Revealed(v) => Some(v),
            GamePhase::Guessed(guess) => {
                let verdict = Verdict {
                    guess,
                    actual: self.round.label,
                    correct: guess.is_correct(self.round.label),
                };
                self.score.played += 1;
                if verdict.correct {
                    self.score.correct += 1;
                }
                self.phase = GamePhase::Revealed(verdict);
                Some(verdict)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::fixtures::{store, traffic_table};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn round(label: DatasetLabel) -> Round {
        Round { label, row: 0 }
    }

    #[test]
    fn real_guess_is_correct_only_for_real() {
        assert!(Guess::Real.is_correct(DatasetLabel::Real));
        for label in [DatasetLabel::Ctgan, DatasetLabel::TableGan, DatasetLabel::Custom] {
            assert!(!Guess::Real.is_correct(label));
        }
    }

    #[test]
    fn synthetic_guess_is_correct_for_every_synthetic_label() {
        assert!(!Guess::Synthetic.is_correct(DatasetLabel::Real));
        for label in [DatasetLabel::Ctgan, DatasetLabel::TableGan, DatasetLabel::Custom] {
            assert!(Guess::Synthetic.is_correct(label));
        }
    }

    #[test]
    fn phases_move_idle_guessed_revealed() {
        let mut game = GameController::new(round(DatasetLabel::TableGan));
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.reveal(), None);

        assert!(game.select(Guess::Real));
        assert!(game.select(Guess::Synthetic));
        assert_eq!(game.phase(), GamePhase::Guessed(Guess::Synthetic));

        let verdict = game.reveal().unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.message(), "Correct! It was TableGAN.");
        assert_eq!(game.phase(), GamePhase::Revealed(verdict));

        // Locked until the next round.
        assert!(!game.select(Guess::Real));
        assert_eq!(game.current_guess(), Some(Guess::Synthetic));
    }

    #[test]
    fn score_counts_each_reveal_once() {
        let mut game = GameController::new(round(DatasetLabel::Real));
        game.select(Guess::Synthetic);
        let verdict = game.reveal().unwrap();
        assert_eq!(verdict.message(), "Oops! It was actually Real.");
        game.reveal();
        assert_eq!(game.score(), Score { played: 1, correct: 0 });

        game.start_round(round(DatasetLabel::Real));
        assert_eq!(game.phase(), GamePhase::Idle);
        game.select(Guess::Real);
        assert_eq!(game.reveal().unwrap().message(), "Correct! It was Real.");
        assert_eq!(game.score(), Score { played: 2, correct: 1 });
    }

    #[test]
    fn seeded_samplers_are_reproducible() {
        let store = store();
        let mut a = Sampler::from_seed(Some(7));
        let mut b = Sampler::from_seed(Some(7));
        for _ in 0..10 {
            assert_eq!(a.draw_round(&store), b.draw_round(&store));
        }
    }

    #[test]
    fn rounds_cover_every_label_and_stay_in_bounds() {
        let store = store();
        let mut sampler = Sampler::from_seed(Some(1));
        let mut seen = BTreeSet::new();
        for _ in 0..400 {
            let round = sampler.draw_round(&store);
            assert!(round.row < store.table(round.label).len());
            seen.insert(round.label);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn labels_are_drawn_uniformly() {
        let store = store();
        let mut sampler = Sampler::from_seed(Some(2024));
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[sampler.draw_round(&store).label.index()] += 1;
        }
        for (label, count) in DatasetLabel::ALL.into_iter().zip(counts) {
            assert!(
                (800..=1200).contains(&count),
                "{label} drawn {count} times out of 4000"
            );
        }
    }

    #[test]
    fn sample_size_is_clamped() {
        let table = traffic_table("t", 0.0, 30);
        let mut sampler = Sampler::from_seed(Some(3));
        assert_eq!(sampler.draw_sample(&table, 1).len(), MIN_SAMPLE_SIZE);
        assert_eq!(sampler.draw_sample(&table, 99).len(), MAX_SAMPLE_SIZE);
        let small = traffic_table("small", 0.0, 3);
        assert_eq!(sampler.draw_sample(&small, 10).len(), 3);
    }

    proptest! {
        #[test]
        fn samples_are_distinct_rows_of_the_table(size in 5usize..=20, seed in any::<u64>()) {
            let table = traffic_table("t", 0.0, 25);
            let mut sampler = Sampler::from_seed(Some(seed));
            let rows = sampler.draw_sample(&table, size);
            prop_assert_eq!(rows.len(), size);
            let distinct: BTreeSet<_> = rows.iter().copied().collect();
            prop_assert_eq!(distinct.len(), size);
            prop_assert!(rows.iter().all(|&r| r < table.len()));
        }
    }
}
