//! State
//!
//! The media player delegates every button press to its current state
//! object. A state reacts, possibly swaps itself for another state, and
//! reports the text to display.

use crate::console::Prompt;
use crate::error::{PlaygroundError, Result};
use std::fmt;
use std::io::{BufRead, Write};

pub const LOCKED_TEXT: &str = "Locked...";
pub const STOP_TEXT: &str = "Stop playing";

/// Everything the states manipulate, apart from the state itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    playing: bool,
    playlist: Vec<String>,
    current_track: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::with_tracks(12)
    }
}

impl Deck {
    pub fn with_tracks(count: usize) -> Self {
        Self {
            playing: false,
            playlist: (1..=count.max(1)).map(|i| format!("Track {i}")).collect(),
            current_track: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_track(&self) -> usize {
        self.current_track
    }

    fn start_playback(&self) -> String {
        format!("Playing {}", self.playlist[self.current_track])
    }

    fn next_track(&mut self) -> String {
        self.current_track = (self.current_track + 1) % self.playlist.len();
        self.start_playback()
    }

    fn previous_track(&mut self) -> String {
        self.current_track = self
            .current_track
            .checked_sub(1)
            .unwrap_or(self.playlist.len() - 1);
        self.start_playback()
    }

    fn rewind(&mut self) {
        self.current_track = 0;
    }
}

/// Result of one button press: the state to switch to and what to show.
pub struct Transition {
    pub next: Box<dyn PlayerState>,
    pub display: String,
}

impl Transition {
    fn to(next: impl PlayerState + 'static, display: impl Into<String>) -> Self {
        Self {
            next: Box::new(next),
            display: display.into(),
        }
    }

    fn stay(current: Box<dyn PlayerState>, display: impl Into<String>) -> Self {
        Self {
            next: current,
            display: display.into(),
        }
    }
}

pub trait PlayerState: fmt::Debug {
    fn name(&self) -> &'static str;
    fn on_lock(self: Box<Self>, deck: &mut Deck) -> Transition;
    fn on_play(self: Box<Self>, deck: &mut Deck) -> Transition;
    fn on_next(self: Box<Self>, deck: &mut Deck) -> Transition;
    fn on_previous(self: Box<Self>, deck: &mut Deck) -> Transition;
}

#[derive(Debug)]
pub struct LockedState;

impl LockedState {
    /// Entering the locked state always stops playback.
    fn enter(deck: &mut Deck) -> Self {
        deck.playing = false;
        LockedState
    }
}

impl PlayerState for LockedState {
    fn name(&self) -> &'static str {
        "locked"
    }

    fn on_lock(self: Box<Self>, deck: &mut Deck) -> Transition {
        if deck.playing {
            Transition::to(ReadyState, STOP_TEXT)
        } else {
            Transition::stay(self, LOCKED_TEXT)
        }
    }

    fn on_play(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::to(ReadyState, "Ready")
    }

    fn on_next(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::stay(self, LOCKED_TEXT)
    }

    fn on_previous(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::stay(self, LOCKED_TEXT)
    }
}

#[derive(Debug)]
pub struct ReadyState;

impl PlayerState for ReadyState {
    fn name(&self) -> &'static str {
        "ready"
    }

    fn on_lock(self: Box<Self>, deck: &mut Deck) -> Transition {
        Transition::to(LockedState::enter(deck), LOCKED_TEXT)
    }

    fn on_play(self: Box<Self>, deck: &mut Deck) -> Transition {
        let action = deck.start_playback();
        Transition::to(PlayingState, action)
    }

    fn on_next(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::stay(self, LOCKED_TEXT)
    }

    fn on_previous(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::stay(self, LOCKED_TEXT)
    }
}

#[derive(Debug)]
pub struct PlayingState;

impl PlayerState for PlayingState {
    fn name(&self) -> &'static str {
        "playing"
    }

    fn on_lock(self: Box<Self>, deck: &mut Deck) -> Transition {
        let locked = LockedState::enter(deck);
        deck.rewind();
        Transition::to(locked, STOP_TEXT)
    }

    fn on_play(self: Box<Self>, _deck: &mut Deck) -> Transition {
        Transition::to(ReadyState, "Paused...")
    }

    fn on_next(self: Box<Self>, deck: &mut Deck) -> Transition {
        let action = deck.next_track();
        Transition::stay(self, action)
    }

    fn on_previous(self: Box<Self>, deck: &mut Deck) -> Transition {
        let action = deck.previous_track();
        Transition::stay(self, action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Stop,
    Next,
    Prev,
}

const BUTTON_NAMES: &str = "one of play, stop, next, prev";

impl std::str::FromStr for Button {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "play" => Ok(Button::Play),
            "stop" | "lock" => Ok(Button::Stop),
            "next" => Ok(Button::Next),
            "prev" | "previous" => Ok(Button::Prev),
            _ => Err(PlaygroundError::invalid_choice(s, BUTTON_NAMES)),
        }
    }
}

#[derive(Debug)]
pub struct Player {
    // Only `None` while a transition is in flight.
    state: Option<Box<dyn PlayerState>>,
    deck: Deck,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Starts in the ready state with playback flagged on.
    pub fn new() -> Self {
        let mut deck = Deck::default();
        deck.playing = true;
        Self {
            state: Some(Box::new(ReadyState)),
            deck,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.as_ref().map_or("transitioning", |s| s.name())
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Feeds a button press to the current state and returns the display text.
    pub fn press(&mut self, button: Button) -> String {
        let Some(state) = self.state.take() else {
            return String::new();
        };
        let from = state.name();
        let transition = match button {
            Button::Play => state.on_play(&mut self.deck),
            Button::Stop => state.on_lock(&mut self.deck),
            Button::Next => state.on_next(&mut self.deck),
            Button::Prev => state.on_previous(&mut self.deck),
        };
        tracing::debug!(?button, from, to = transition.next.name(), "player transition");
        self.state = Some(transition.next);
        transition.display
    }
}

/// The player's buttons as a line prompt. Ends on `quit` or end of input.
pub fn run_player_session<R: BufRead, W: Write>(player: &mut Player, prompt: &mut Prompt<R, W>) -> Result<()> {
    writeln!(prompt.out(), "Buttons: play, stop, next, prev (quit to leave)")?;
    loop {
        let line = match prompt.ask("> ") {
            Ok(line) => line,
            Err(PlaygroundError::InputClosed) => return Ok(()),
            Err(err) => return Err(err),
        };
        match line.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            _ => {}
        }
        match line.parse::<Button>() {
            Ok(button) => {
                let display = player.press(button);
                writeln!(prompt.out(), "{display}")?;
            }
            Err(err) => writeln!(prompt.out(), "{err}")?,
        }
    }
}
