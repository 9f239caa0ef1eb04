use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::state::{GameState, Phase, SnapshotError, Stage, MAX_TARGET, MIN_TARGET};
use crate::core::game::ShellSignal;

pub const WON_MESSAGE: &str = "Parabéns, você venceu!";
pub const GIVEN_UP_MESSAGE: &str = "Você desistiu!";
pub const CONFIRM_PROMPT: &str = "Parabéns, você venceu! Deseja jogar novamente?";

/// Inbound events the shell forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    Tap,
    GiveUp,
    Restart,
    /// "Sim" on the win prompt.
    ConfirmYes,
    /// "Desistir" on the win prompt.
    ConfirmGiveUp,
    /// "Não" on the win prompt.
    ConfirmNo,
    Exit,
}

/// A choice the shell should currently offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    pub label: &'static str,
    pub event: TapEvent,
}

impl Affordance {
    const fn new(label: &'static str, event: TapEvent) -> Self {
        Self { label, event }
    }

    /// Key that triggers this choice: the first letter of its label.
    pub fn hotkey(&self) -> char {
        self.label
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or(' ')
    }
}

const PLAYING_OPTIONS: &[Affordance] = &[
    Affordance::new("Clique aqui!", TapEvent::Tap),
    Affordance::new("Desistir", TapEvent::GiveUp),
];

const PROMPT_OPTIONS: &[Affordance] = &[
    Affordance::new("Sim", TapEvent::ConfirmYes),
    Affordance::new("Desistir", TapEvent::ConfirmGiveUp),
    Affordance::new("Não", TapEvent::ConfirmNo),
];

// "Sair" after an unprompted win gives up rather than closing.
const WON_OPTIONS: &[Affordance] = &[
    Affordance::new("Jogar Novamente", TapEvent::Restart),
    Affordance::new("Sair", TapEvent::GiveUp),
];

const GIVEN_UP_OPTIONS: &[Affordance] = &[
    Affordance::new("Jogar Novamente", TapEvent::Restart),
    Affordance::new("Sair", TapEvent::Exit),
];

/// Everything the shell renders, derived from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub phase: Phase,
    pub stage: Stage,
    pub message: Option<&'static str>,
    pub prompt: Option<&'static str>,
    pub options: &'static [Affordance],
}

impl GameView {
    pub fn show_prompt(&self) -> bool {
        self.prompt.is_some()
    }
}

/// Sole owner of the live `GameState`. Every operation is total: calls that
/// do not fit the current phase are ignored.
pub struct GameController<R = StdRng> {
    state: GameState,
    rng: R,
}

impl GameController<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let state = GameState::fresh(draw_target(&mut rng));
        debug!(target_count = state.target_count, "new game");
        Self { state, rng }
    }

    /// Resume a previously persisted game. The stored target is kept.
    pub fn restore(state: GameState, rng: R) -> Result<Self, SnapshotError> {
        state.validate()?;
        debug!(?state, "game restored");
        Ok(Self { state, rng })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn new_game(&mut self) {
        self.state = GameState::fresh(draw_target(&mut self.rng));
        debug!(target_count = self.state.target_count, "new game");
    }

    pub fn tap(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }

        self.state.click_count += 1;
        let progress = self.state.progress();
        self.state.stage = Stage::for_progress(progress);
        if self.state.stage == Stage::Victory {
            self.state.phase = Phase::Won;
            self.state.awaiting_confirmation = true;
            info!(taps = self.state.click_count, "target reached");
        } else {
            debug!(
                taps = self.state.click_count,
                progress,
                stage = ?self.state.stage,
                "tap"
            );
        }
    }

    pub fn give_up(&mut self) {
        match self.state.phase {
            Phase::Playing | Phase::Won => {
                self.state.phase = Phase::GivenUp;
                self.state.stage = Stage::Defeat;
                self.state.awaiting_confirmation = false;
                info!(taps = self.state.click_count, "game given up");
            }
            Phase::GivenUp => {}
        }
    }

    /// Same as `new_game`. The shell only offers it once a game is over.
    pub fn restart(&mut self) {
        info!(phase = ?self.state.phase, "restart");
        self.new_game();
    }

    /// "Não" on the win prompt: asks the shell to close.
    pub fn decline_after_win(&self) -> Option<ShellSignal> {
        self.prompt_open().then_some(ShellSignal::Exit)
    }

    /// "Sair" after giving up: asks the shell to close.
    pub fn exit(&self) -> Option<ShellSignal> {
        (self.state.phase == Phase::GivenUp).then_some(ShellSignal::Exit)
    }

    /// Dispatch one inbound event.
    pub fn apply(&mut self, event: TapEvent) -> Option<ShellSignal> {
        match event {
            TapEvent::Tap => self.tap(),
            TapEvent::GiveUp => self.give_up(),
            TapEvent::Restart => self.restart(),
            TapEvent::ConfirmYes => {
                if self.prompt_open() {
                    self.restart();
                }
            }
            TapEvent::ConfirmGiveUp => {
                if self.prompt_open() {
                    self.give_up();
                }
            }
            TapEvent::ConfirmNo => return self.decline_after_win(),
            TapEvent::Exit => return self.exit(),
        }
        None
    }

    pub fn view(&self) -> GameView {
        let (message, prompt, options) = match self.state.phase {
            Phase::Playing => (None, None, PLAYING_OPTIONS),
            Phase::Won if self.state.awaiting_confirmation => {
                (None, Some(CONFIRM_PROMPT), PROMPT_OPTIONS)
            }
            Phase::Won => (Some(WON_MESSAGE), None, WON_OPTIONS),
            Phase::GivenUp => (Some(GIVEN_UP_MESSAGE), None, GIVEN_UP_OPTIONS),
        };
        GameView {
            phase: self.state.phase,
            stage: self.state.stage,
            message,
            prompt,
            options,
        }
    }

    fn prompt_open(&self) -> bool {
        self.state.phase == Phase::Won && self.state.awaiting_confirmation
    }
}

fn draw_target<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(MIN_TARGET..=MAX_TARGET)
}
