use std::time::{Duration, Instant};

use log::{info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::{Action, GameState, decide_tick};
use crate::input::GameInput;
use crate::ticker::Ticker;

/// What the caller should do after an input was handled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One play session: the single owner of game state, randomness and the tick
/// scheduler.
///
/// Input and timer adapters only hold a `&mut Session`; renderers read
/// through [`Session::state`].
#[derive(Debug)]
pub struct Session {
    state: GameState,
    rng: StdRng,
    ticker: Ticker,
    games_played: u32,
}

impl Session {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self::from_rng(StdRng::from_entropy(), tick_interval)
    }

    /// Creates a reproducible session.
    #[must_use]
    pub fn with_seed(seed: u64, tick_interval: Duration) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), tick_interval)
    }

    fn from_rng(mut rng: StdRng, tick_interval: Duration) -> Self {
        let state = GameState::new(&mut rng);
        Self {
            state,
            rng,
            ticker: Ticker::new(tick_interval),
            games_played: 1,
        }
    }

    /// Replaces the current state, e.g. with a hand-built scenario.
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Starts the tick scheduler.
    pub fn begin(&mut self, now: Instant) {
        info!(
            "game {} started: head {:?}, food {:?}",
            self.games_played,
            self.state.head(),
            self.state.food
        );
        self.ticker.start(now);
    }

    /// Stops the tick scheduler. No further moves are produced until a restart.
    pub fn end(&mut self) {
        self.ticker.stop();
    }

    /// Routes one input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Flow {
        match input {
            GameInput::Direction(direction) => {
                self.state
                    .apply(Action::ChangeDirection(direction), &mut self.rng);
                Flow::Continue
            }
            GameInput::Restart if self.state.is_game_over() => {
                self.restart(now);
                Flow::Continue
            }
            GameInput::Restart => Flow::Continue,
            GameInput::Quit => Flow::Quit,
        }
    }

    /// Runs the per-tick decision when the scheduler is due.
    ///
    /// Returns the applied action, if any. The ticker is stopped in the same
    /// call that applies `GameOver`.
    pub fn on_tick(&mut self, now: Instant) -> Option<Action> {
        if !self.ticker.poll(now) {
            return None;
        }

        let action = decide_tick(&self.state);
        self.state.apply(action, &mut self.rng);

        match action {
            Action::GameOver => {
                self.ticker.stop();
                info!(
                    "game {} over at {:?} with score {} and length {}",
                    self.games_played,
                    self.state.head(),
                    self.state.score,
                    self.state.snake_len()
                );
                crate::logging::log_final_state(&self.state);
            }
            _ => trace!("{} -> head {:?}", action.kind(), self.state.head()),
        }

        Some(action)
    }

    fn restart(&mut self, now: Instant) {
        self.state = GameState::new(&mut self.rng);
        self.games_played += 1;
        info!("restarting session");
        self.begin(now);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::game::{Action, GameState};
    use crate::geometry::Coordinate;
    use crate::input::{Direction, GameInput};

    use super::{Flow, Session};

    const PERIOD: Duration = Duration::from_millis(150);

    fn session_with(state: GameState) -> (Session, Instant) {
        let mut session = Session::with_seed(7, PERIOD);
        session.set_state(state);
        let start = Instant::now();
        session.begin(start);
        (session, start)
    }

    #[test]
    fn seeded_sessions_start_identically() {
        let first = Session::with_seed(99, PERIOD);
        let second = Session::with_seed(99, PERIOD);

        assert_eq!(first.state(), second.state());
        assert!(!first.ticker().is_running());
    }

    #[test]
    fn tick_before_deadline_does_nothing() {
        let state = GameState::from_parts(
            Coordinate::new(5, 5),
            [],
            Direction::Right,
            Coordinate::new(20, 20),
            0,
        );
        let (mut session, start) = session_with(state.clone());

        assert_eq!(session.on_tick(start + PERIOD / 2), None);
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn direction_change_is_visible_to_the_next_move() {
        let state = GameState::from_parts(
            Coordinate::new(5, 5),
            [],
            Direction::Right,
            Coordinate::new(20, 20),
            0,
        );
        let (mut session, start) = session_with(state);

        let flow = session.handle_input(GameInput::Direction(Direction::Up), start);
        assert_eq!(flow, Flow::Continue);

        assert_eq!(session.on_tick(start + PERIOD), Some(Action::Move));
        assert_eq!(session.state().head(), Coordinate::new(5, 4));
    }

    #[test]
    fn game_over_stops_the_ticker() {
        let state = GameState::from_parts(
            Coordinate::new(0, 5),
            [],
            Direction::Left,
            Coordinate::new(20, 20),
            0,
        );
        let (mut session, start) = session_with(state);

        assert_eq!(session.on_tick(start + PERIOD), Some(Action::GameOver));
        assert!(session.state().is_game_over());
        assert!(!session.ticker().is_running());

        let frozen = session.state().clone();
        assert_eq!(session.on_tick(start + PERIOD * 5), None);
        assert_eq!(session.state(), &frozen);
    }

    #[test]
    fn restart_is_ignored_while_running() {
        let state = GameState::from_parts(
            Coordinate::new(5, 5),
            [],
            Direction::Right,
            Coordinate::new(20, 20),
            3,
        );
        let (mut session, start) = session_with(state.clone());

        session.handle_input(GameInput::Restart, start);

        assert_eq!(session.state(), &state);
        assert_eq!(session.games_played(), 1);
    }

    #[test]
    fn restart_after_game_over_starts_a_fresh_game() {
        let state = GameState::from_parts(
            Coordinate::new(0, 5),
            [],
            Direction::Left,
            Coordinate::new(20, 20),
            4,
        );
        let (mut session, start) = session_with(state);
        session.on_tick(start + PERIOD);

        let later = start + PERIOD * 2;
        session.handle_input(GameInput::Restart, later);

        assert!(!session.state().is_game_over());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().snake_len(), 1);
        assert_eq!(session.games_played(), 2);
        assert!(session.ticker().is_running());
        assert_eq!(session.on_tick(later + PERIOD), Some(Action::Move));
    }

    #[test]
    fn quit_is_reported_to_the_caller() {
        let mut session = Session::with_seed(1, PERIOD);
        assert_eq!(
            session.handle_input(GameInput::Quit, Instant::now()),
            Flow::Quit
        );
    }

    #[test]
    fn end_stops_the_ticker() {
        let mut session = Session::with_seed(1, PERIOD);
        let start = Instant::now();
        session.begin(start);

        session.end();

        assert!(!session.ticker().is_running());
        assert_eq!(session.on_tick(start + PERIOD), None);
    }
}
