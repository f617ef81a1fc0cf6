//! In-process predictor built on character n-gram profiles.
//!
//! Labeled keystrokes extend the labeled participant's profile. Unlabeled
//! keystrokes go into a rolling window of the most recent characters, and
//! each one is answered with the participant whose profile is most similar
//! to that window. State is kept separately per session id.

use super::{PredictionFuture, PredictionRequest, PredictionResponse, Predictor, PredictorError};
use crate::config::{SessionConfig, MASH_WINDOW};
use crate::core::{ParticipantId, SessionId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::trace;

/// Longest n-gram counted.
const MAX_GRAM: usize = 3;

type Profile = HashMap<String, u32>;

fn add_grams(profile: &mut Profile, recent: &[char]) {
    // Count every gram that ends with the newest character.
    for len in 1..=recent.len().min(MAX_GRAM) {
        let gram: String = recent[recent.len() - len..].iter().collect();
        *profile.entry(gram).or_insert(0) += 1;
    }
}

fn profile_of(chars: &VecDeque<char>) -> Profile {
    let chars: Vec<char> = chars.iter().copied().collect();
    let mut profile = Profile::new();
    for end in 1..=chars.len() {
        let start = end.saturating_sub(MAX_GRAM);
        add_grams(&mut profile, &chars[start..end]);
    }
    profile
}

fn cosine(a: &Profile, b: &Profile) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(gram, &x)| b.get(gram).map(|&y| f64::from(x) * f64::from(y)))
        .sum();
    let norm = |p: &Profile| p.values().map(|&v| f64::from(v).powi(2)).sum::<f64>().sqrt();
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[derive(Debug, Default)]
struct Masher {
    profile: Profile,
    tail: Vec<char>,
}

impl Masher {
    fn push(&mut self, c: char) {
        self.tail.push(c);
        if self.tail.len() > MAX_GRAM {
            self.tail.remove(0);
        }
        add_grams(&mut self.profile, &self.tail);
    }
}

#[derive(Debug, Default)]
struct Game {
    // Join order doubles as the tie-break order.
    mashers: Vec<(ParticipantId, Masher)>,
    unlabeled: VecDeque<char>,
}

impl Game {
    fn masher(&mut self, id: ParticipantId) -> &mut Masher {
        let index = match self.mashers.iter().position(|(known, _)| *known == id) {
            Some(index) => index,
            None => {
                self.mashers.push((id, Masher::default()));
                self.mashers.len() - 1
            }
        };
        &mut self.mashers[index].1
    }

    fn best_match(&self) -> Option<ParticipantId> {
        let window = profile_of(&self.unlabeled);
        let mut best: Option<(ParticipantId, f64)> = None;
        for (id, masher) in &self.mashers {
            if masher.profile.is_empty() {
                continue;
            }
            let score = cosine(&window, &masher.profile);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((*id, score));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Guesses typists from keystrokes alone, without leaving the process.
#[derive(Debug)]
pub struct MashProfiler {
    window: usize,
    games: Mutex<HashMap<SessionId, Game>>,
}

impl Default for MashProfiler {
    fn default() -> Self {
        Self::new(MASH_WINDOW)
    }
}

impl MashProfiler {
    /// `window` is how many recent unlabeled characters are classified.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            games: Mutex::new(HashMap::new()),
        }
    }

    /// Profiler classifying the session's configured `mash_window`.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.mash_window)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Incorporate one keystroke and, if it is unlabeled, guess its typist.
    pub fn observe(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictorError> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| PredictorError::Unavailable("profiler state poisoned".to_string()))?;
        let game = games.entry(request.session_id.clone()).or_default();

        match request.participant_id {
            Some(id) => {
                game.masher(id).push(request.character);
                Ok(PredictionResponse::none())
            }
            None => {
                game.unlabeled.push_back(request.character);
                while game.unlabeled.len() > self.window {
                    game.unlabeled.pop_front();
                }
                let guess = game.best_match();
                trace!(session = %request.session_id, has_guess = guess.is_some(), "Classified window");
                Ok(PredictionResponse {
                    predicted_participant_id: guess,
                })
            }
        }
    }
}

impl Predictor for MashProfiler {
    fn predict(&self, request: PredictionRequest) -> PredictionFuture<'_> {
        let response = self.observe(&request);
        Box::pin(std::future::ready(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(profiler: &MashProfiler, game: &str, who: Option<ParticipantId>, text: &str) -> PredictionResponse {
        let mut last = PredictionResponse::none();
        for c in text.chars() {
            last = profiler
                .observe(&PredictionRequest {
                    character: c,
                    session_id: SessionId::new(game),
                    participant_id: who,
                })
                .unwrap();
        }
        last
    }

    #[test]
    fn labeled_keystrokes_never_predict() {
        let profiler = MashProfiler::default();
        let alice = ParticipantId::new();
        assert_eq!(feed(&profiler, "g", Some(alice), "asdf"), PredictionResponse::none());
    }

    #[test]
    fn no_training_data_means_no_guess() {
        let profiler = MashProfiler::default();
        assert_eq!(feed(&profiler, "g", None, "qwer"), PredictionResponse::none());
    }

    #[test]
    fn guesses_the_closest_profile() {
        let profiler = MashProfiler::default();
        let left = ParticipantId::new();
        let right = ParticipantId::new();
        feed(&profiler, "g", Some(left), &"asdfqwerzxcv".repeat(20));
        feed(&profiler, "g", Some(right), &"jkl;uiopm,./".repeat(20));

        let guess = feed(&profiler, "g", None, "jkl;uiopm,./jkl;");
        assert_eq!(guess, PredictionResponse::guess(right));

        let guess = feed(&profiler, "g", None, &"qwerasdfzxcv".repeat(3));
        assert_eq!(guess, PredictionResponse::guess(left));
    }

    #[test]
    fn sessions_are_isolated() {
        let profiler = MashProfiler::default();
        let alice = ParticipantId::new();
        feed(&profiler, "one", Some(alice), "asdfasdf");

        assert_eq!(feed(&profiler, "two", None, "asdf"), PredictionResponse::none());
        assert_eq!(feed(&profiler, "one", None, "asdf"), PredictionResponse::guess(alice));
    }

    #[test]
    fn window_keeps_only_recent_characters() {
        let profiler = MashProfiler::new(4);
        feed(&profiler, "g", None, "abcdefgh");

        let games = profiler.games.lock().unwrap();
        let game = &games[&SessionId::new("g")];
        assert_eq!(game.unlabeled.iter().collect::<String>(), "efgh");
    }

    #[test]
    fn configured_window_changes_the_guess() {
        let narrow = MashProfiler::from_config(&SessionConfig {
            mash_window: 2,
            ..SessionConfig::default()
        });
        let wide = MashProfiler::from_config(&SessionConfig::default());
        assert_eq!(narrow.window(), 2);
        assert_eq!(wide.window(), MASH_WINDOW);

        let a = ParticipantId::new();
        let l = ParticipantId::new();
        for profiler in [&narrow, &wide] {
            feed(profiler, "g", Some(a), &"a".repeat(40));
            feed(profiler, "g", Some(l), &"l".repeat(40));
        }

        assert_eq!(feed(&narrow, "g", None, "aaaaaaaaaall"), PredictionResponse::guess(l));
        assert_eq!(feed(&wide, "g", None, "aaaaaaaaaall"), PredictionResponse::guess(a));
    }

    #[test]
    fn cosine_of_identical_profiles_is_one() {
        let text: VecDeque<char> = "asdf".chars().collect();
        let profile = profile_of(&text);
        assert!((cosine(&profile, &profile) - 1.0).abs() < 1e-9);
    }
}
