//! Tap-to-target game: reach a hidden number of taps
pub mod controller;
pub mod renderer;
pub mod state;

pub use controller::{Affordance, GameController, GameView, TapEvent};
pub use renderer::TapRenderer;
pub use state::{GameState, Phase, SnapshotError, Stage};

use crossterm::event::{KeyCode, KeyEvent};

use crate::{Context, Game, ShellSignal};

/// Binds the controller to the engine: keys in, stage and text out.
pub struct TapGame {
    controller: GameController,
}

impl TapGame {
    pub fn new(controller: GameController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Maps a key to whichever current choice it triggers.
    pub fn event_for_key(view: &GameView, code: KeyCode) -> Option<TapEvent> {
        let key = match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                return view
                    .options
                    .iter()
                    .any(|o| o.event == TapEvent::Tap)
                    .then_some(TapEvent::Tap);
            }
            KeyCode::Char(c) => c.to_ascii_lowercase(),
            _ => return None,
        };
        view.options
            .iter()
            .find(|o| o.hotkey() == key)
            .map(|o| o.event)
    }
}

impl Game for TapGame {
    type Action = TapEvent;
    type State = GameState;

    fn handle_input(&self, event: KeyEvent, ctx: &Context<Self::Action>) {
        if let Some(action) = Self::event_for_key(&self.controller.view(), event.code) {
            ctx.send_action(action);
        }
    }

    fn handle_action(&mut self, action: Self::Action) -> Option<ShellSignal> {
        self.controller.apply(action)
    }

    fn state(&self) -> &Self::State {
        self.controller.state()
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        TapRenderer::render(frame, &self.controller.view());
    }
}
