use crate::config::DashboardConfig;
use crate::data::model::DatasetLabel;
use crate::data::schema::Feature;
use crate::data::store::DatasetStore;
use crate::engine::timeseries::{clamp_index, slider_range};
use crate::engine::{
    Distribution, FrequencyComparison, MeanComparison, TimeWindow, compare_distribution,
    mean_comparison, protocol_comparison, time_window,
};
use crate::error::ViewError;
use crate::game::{GameController, GamePhase, Guess, Sampler, Verdict, clamp_sample_size};

// ---------------------------------------------------------------------------
// Controls and refresh instructions
// ---------------------------------------------------------------------------

/// One user interaction with a dashboard control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SelectDataset(DatasetLabel),
    SetTimeIndex(usize),
    ToggleFeature(Feature),
    SelectAllFeatures,
    ClearFeatures,
    SetDensityFeature(Feature),
    SetSampleSize(usize),
    Resample,
    Guess(Guess),
    Reveal,
    NewRound,
}

/// Which view models a handled control recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub flow: bool,
    pub means: bool,
    pub density: bool,
    pub sample: bool,
    pub game: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh {
        flow: false,
        means: false,
        density: false,
        sample: false,
        game: false,
    };

    pub const ALL: Refresh = Refresh {
        flow: true,
        means: true,
        density: true,
        sample: true,
        game: true,
    };

    pub fn any(&self) -> bool {
        *self != Refresh::NONE
    }

    pub fn merge(self, other: Refresh) -> Refresh {
        Refresh {
            flow: self.flow || other.flow,
            means: self.means || other.means,
            density: self.density || other.density,
            sample: self.sample || other.sample,
            game: self.game || other.game,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection and cached view models
// ---------------------------------------------------------------------------

/// Current value of every selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub dataset: DatasetLabel,
    pub time_index: usize,
    /// Selected features, kept in [`Feature::ALL`] order.
    pub features: Vec<Feature>,
    pub density_feature: Feature,
    pub sample_size: usize,
}

/// Everything the central panel draws, recomputed only when its inputs change.
#[derive(Debug, Clone)]
pub struct Views {
    pub flow: Result<TimeWindow, ViewError>,
    pub means: MeanComparison,
    pub density: Result<Distribution, ViewError>,
    pub protocol: Option<FrequencyComparison>,
    pub sample: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub selection: Selection,
    pub views: Views,
    pub game: GameController,
    sampler: Sampler,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub show_detection_demo: bool,
}

impl AppState {
    pub fn new(store: &DatasetStore, config: &DashboardConfig) -> Self {
        let mut sampler = Sampler::from_seed(config.seed);
        let dataset = DatasetLabel::Real;
        let selection = Selection {
            dataset,
            time_index: clamp_index(store.table(dataset).len(), config.time_index),
            features: Feature::default_selection(),
            density_feature: Feature::Sbytes,
            sample_size: clamp_sample_size(config.sample_size),
        };
        let views = Views {
            flow: time_window(store.get(dataset), selection.time_index),
            means: mean_comparison(store, &selection.features),
            density: compare_distribution(store, selection.density_feature.column()),
            protocol: protocol_comparison(store),
            sample: sampler.draw_sample(store.table(dataset), selection.sample_size),
        };
        let game = GameController::new(sampler.draw_round(store));

        AppState {
            selection,
            views,
            game,
            sampler,
            status_message: None,
            show_detection_demo: config.show_detection_demo,
        }
    }

    /// Answer of the last reveal, shown until the next round.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.game.phase() {
            GamePhase::Revealed(verdict) => Some(verdict),
            _ => None,
        }
    }

    /// Valid time-slider positions for the selected dataset.
    pub fn time_range(&self, store: &DatasetStore) -> std::ops::RangeInclusive<usize> {
        slider_range(store.table(self.selection.dataset).len())
    }

    /// Apply one control and recompute the views it affects.
    ///
    /// Any control other than the guess selector and the reveal trigger
    /// starts a new round of the guessing game.
    pub fn handle(&mut self, store: &DatasetStore, control: Control) -> Refresh {
        log::debug!("Handling {control:?}");
        let mut refresh = match control {
            Control::SelectDataset(label) => {
                if label == self.selection.dataset {
                    return Refresh::NONE;
                }
                self.selection.dataset = label;
                self.selection.time_index =
                    clamp_index(store.table(label).len(), self.selection.time_index);
                self.refresh_flow(store);
                self.refresh_sample(store);
                Refresh {
                    flow: true,
                    sample: true,
                    ..Refresh::NONE
                }
            }
            Control::SetTimeIndex(index) => {
                let index = clamp_index(store.table(self.selection.dataset).len(), index);
                if index == self.selection.time_index {
                    return Refresh::NONE;
                }
                self.selection.time_index = index;
                self.refresh_flow(store);
                Refresh {
                    flow: true,
                    ..Refresh::NONE
                }
            }
            Control::ToggleFeature(feature) => {
                if self.selection.features.contains(&feature) {
                    self.selection.features.retain(|f| *f != feature);
                } else {
                    self.selection.features.push(feature);
                    self.selection.features.sort();
                }
                self.refresh_means(store)
            }
            Control::SelectAllFeatures => {
                self.selection.features = Feature::ALL.to_vec();
                self.refresh_means(store)
            }
            Control::ClearFeatures => {
                self.selection.features.clear();
                self.refresh_means(store)
            }
            Control::SetDensityFeature(feature) => {
                if feature == self.selection.density_feature {
                    return Refresh::NONE;
                }
                self.selection.density_feature = feature;
                self.views.density = compare_distribution(store, feature.column());
                Refresh {
                    density: true,
                    ..Refresh::NONE
                }
            }
            Control::SetSampleSize(size) => {
                let size = clamp_sample_size(size);
                if size == self.selection.sample_size {
                    return Refresh::NONE;
                }
                self.selection.sample_size = size;
                self.refresh_sample(store);
                Refresh {
                    sample: true,
                    ..Refresh::NONE
                }
            }
            Control::Resample => {
                self.refresh_sample(store);
                Refresh {
                    sample: true,
                    ..Refresh::NONE
                }
            }
            Control::NewRound => Refresh::NONE,
            Control::Guess(guess) => {
                return Refresh {
                    game: self.game.select(guess),
                    ..Refresh::NONE
                };
            }
            Control::Reveal => {
                let before = self.verdict();
                let changed = self.game.reveal().is_some() && before.is_none();
                return Refresh {
                    game: changed,
                    ..Refresh::NONE
                };
            }
        };

        self.start_round(store);
        refresh.game = true;
        refresh
    }

    /// Apply the controls collected during one frame, in order.
    pub fn handle_all(
        &mut self,
        store: &DatasetStore,
        controls: impl IntoIterator<Item = Control>,
    ) -> Refresh {
        controls
            .into_iter()
            .fold(Refresh::NONE, |acc, control| acc.merge(self.handle(store, control)))
    }

    /// Swap in a freshly loaded store and recompute everything.
    pub fn reload(&mut self, store: &DatasetStore) -> Refresh {
        self.selection.time_index =
            clamp_index(store.table(self.selection.dataset).len(), self.selection.time_index);
        self.refresh_flow(store);
        self.views.means = mean_comparison(store, &self.selection.features);
        self.views.density = compare_distribution(store, self.selection.density_feature.column());
        self.views.protocol = protocol_comparison(store);
        self.refresh_sample(store);
        self.start_round(store);
        Refresh::ALL
    }

    fn start_round(&mut self, store: &DatasetStore) {
        let round = self.sampler.draw_round(store);
        self.game.start_round(round);
    }

    fn refresh_flow(&mut self, store: &DatasetStore) {
        self.views.flow = time_window(store.get(self.selection.dataset), self.selection.time_index);
        if let Err(e) = &self.views.flow {
            log::warn!("{e}");
        }
    }

    fn refresh_sample(&mut self, store: &DatasetStore) {
        self.views.sample = self
            .sampler
            .draw_sample(store.table(self.selection.dataset), self.selection.sample_size);
    }

    fn refresh_means(&mut self, store: &DatasetStore) -> Refresh {
        self.views.means = mean_comparison(store, &self.selection.features);
        Refresh {
            means: true,
            ..Refresh::NONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::fixtures::{store, store_with, without};

    fn config() -> DashboardConfig {
        DashboardConfig {
            seed: Some(11),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn initial_views_follow_the_defaults() {
        let store = store();
        let state = AppState::new(&store, &config());
        assert_eq!(state.selection.dataset, DatasetLabel::Real);
        // 30 fixture rows, default index 50 → clamped to 29.
        assert_eq!(state.selection.time_index, 29);
        assert_eq!(state.time_range(&store), 0..=29);
        assert_eq!(state.views.flow.as_ref().unwrap().len(), 29);
        assert_eq!(state.views.means.shape(), (4, 4));
        assert!(state.views.protocol.is_some());
        assert_eq!(state.views.sample.len(), 5);
        assert_eq!(state.game.phase(), GamePhase::Idle);
    }

    #[test]
    fn guess_and_reveal_keep_the_round() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        let round = state.game.round();

        let refresh = state.handle(&store, Control::Guess(Guess::Synthetic));
        assert!(refresh.game);
        let refresh = state.handle(&store, Control::Reveal);
        assert!(refresh.game && !refresh.means);

        assert_eq!(state.game.round(), round);
        let verdict = state.verdict().unwrap();
        assert_eq!(verdict.actual, round.label);
        assert_eq!(verdict.correct, round.label.is_synthetic());

        // Revealing again changes nothing.
        assert!(!state.handle(&store, Control::Reveal).any());
    }

    #[test]
    fn other_controls_start_a_new_round() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        state.handle(&store, Control::Guess(Guess::Real));
        state.handle(&store, Control::Reveal);
        assert!(state.verdict().is_some());

        let refresh = state.handle(&store, Control::ToggleFeature(Feature::Rate));
        assert!(refresh.means && refresh.game);
        assert_eq!(state.game.phase(), GamePhase::Idle);
        assert!(state.verdict().is_none());
        assert_eq!(state.game.score().played, 1);
    }

    #[test]
    fn feature_toggles_keep_canonical_order() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        state.handle(&store, Control::ToggleFeature(Feature::Dur));
        state.handle(&store, Control::ToggleFeature(Feature::Dload));
        state.handle(&store, Control::ToggleFeature(Feature::Dur));
        assert_eq!(
            state.selection.features,
            vec![Feature::Dur, Feature::Spkts, Feature::Dpkts, Feature::Sbytes, Feature::Dload]
        );
        assert_eq!(state.views.means.shape(), (4, 5));

        state.handle(&store, Control::ClearFeatures);
        assert_eq!(state.views.means.shape(), (4, 0));
        state.handle(&store, Control::SelectAllFeatures);
        assert_eq!(state.views.means.shape(), (4, 8));
    }

    #[test]
    fn dataset_without_timestamp_only_skips_the_flow_view() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::TableGan {
                without(&t, "timestamp")
            } else {
                t
            }
        });
        let mut state = AppState::new(&store, &config());
        let refresh = state.handle(&store, Control::SelectDataset(DatasetLabel::TableGan));
        assert!(refresh.flow && refresh.sample);
        assert!(state.views.flow.is_err());
        assert_eq!(state.views.means.shape(), (4, 4));
        assert_eq!(state.views.sample.len(), 5);
    }

    #[test]
    fn a_frame_of_controls_reports_every_recomputed_view() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        let refresh = state.handle_all(
            &store,
            [
                Control::SetTimeIndex(3),
                Control::ToggleFeature(Feature::Rate),
                Control::SelectDataset(DatasetLabel::Real),
            ],
        );
        assert!(refresh.flow && refresh.means && refresh.game);
        assert!(!refresh.density && !refresh.sample);
        assert!(!state.handle_all(&store, []).any());
    }

    #[test]
    fn verdict_follows_the_game_phase() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        assert_eq!(state.verdict(), None);
        state.handle(&store, Control::Guess(Guess::Real));
        assert_eq!(state.verdict(), None);
        state.handle(&store, Control::Reveal);
        assert_eq!(
            state.game.phase(),
            GamePhase::Revealed(state.verdict().unwrap())
        );
        state.handle(&store, Control::NewRound);
        assert_eq!(state.verdict(), None);
    }

    #[test]
    fn unchanged_values_are_no_ops() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        assert!(!state.handle(&store, Control::SelectDataset(DatasetLabel::Real)).any());
        assert!(!state.handle(&store, Control::SetTimeIndex(500)).any());
        assert!(!state.handle(&store, Control::SetSampleSize(1)).any());

        let refresh = state.handle(&store, Control::SetTimeIndex(3));
        assert!(refresh.flow);
        assert_eq!(state.views.flow.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn sample_size_and_density_feature_update_their_views() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        state.handle(&store, Control::SetSampleSize(12));
        assert_eq!(state.views.sample.len(), 12);

        let refresh = state.handle(&store, Control::SetDensityFeature(Feature::Dur));
        assert!(refresh.density);
        assert!(matches!(
            state.views.density,
            Ok(Distribution::Density { ref column, .. }) if column == "dur"
        ));
    }

    #[test]
    fn reload_recomputes_everything() {
        let store = store();
        let mut state = AppState::new(&store, &config());
        let smaller = store_with(|label, t| {
            if label == DatasetLabel::Real {
                without(&t, "proto")
            } else {
                t
            }
        });
        assert_eq!(state.reload(&smaller), Refresh::ALL);
        assert!(state.views.protocol.is_none());
    }
}
