/// Core game interface for the tapterm framework
use crossterm::event::KeyEvent;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Signals a game raises towards the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellSignal {
    /// The game asked for the application to close.
    Exit,
}

/// Handed to games while they translate input, so they can queue actions
/// without touching their own state.
pub struct Context<A> {
    tx: UnboundedSender<A>,
}

impl<A> Context<A> {
    pub fn new(tx: UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Queue an action for the engine to dispatch on its next turn.
    pub fn send_action(&self, action: A) {
        // The receiver only goes away while the engine is shutting down.
        let _ = self.tx.send(action);
    }
}

/// Main game trait that every game driven by the engine implements
pub trait Game {
    /// Discrete event produced by input and applied to the game state
    type Action: std::fmt::Debug + Send + 'static;

    /// State the engine snapshots so a suspended session can resume
    type State: Serialize;

    /// Translate a key press into zero or more actions.
    fn handle_input(&self, event: KeyEvent, ctx: &Context<Self::Action>);

    /// Apply one action. Returning a signal ends the session.
    fn handle_action(&mut self, action: Self::Action) -> Option<ShellSignal>;

    fn state(&self) -> &Self::State;

    fn render(&self, frame: &mut ratatui::Frame);
}
