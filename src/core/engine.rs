use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::{DefaultTerminal, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::snapshot::SnapshotStore;
use crate::{Context, Game, ShellSignal};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Why the engine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game asked to close; its snapshot is discarded.
    Closed(ShellSignal),
    /// The shell went away (Esc, Ctrl-C); the snapshot is kept for next time.
    Suspended,
}

pub struct Engine<G: Game> {
    game: G,
    store: Option<SnapshotStore>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, store: Option<SnapshotStore>) -> Self {
        Self { game, store }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<SessionEnd> {
        let (key_tx, key_rx) = mpsc::unbounded_channel::<KeyEvent>();
        let pump = spawn_input_pump(key_tx);

        // `drive` drops the receiver on return, which stops the pump on its next poll.
        let driven = self.drive(&mut terminal, key_rx).await;
        let pumped = pump.await;

        let end = match driven? {
            Some(end) => {
                match pumped {
                    Ok(Err(e)) => warn!(error = ?e, "input pump failed"),
                    Err(e) => warn!(error = ?e, "input pump panicked"),
                    Ok(Ok(())) => {}
                }
                end
            }
            None => {
                // Terminal input is gone: keep the game for next time and report why.
                self.finish(SessionEnd::Suspended)?;
                return match pumped {
                    Ok(Err(e)) => Err(e.context("reading terminal input")),
                    Err(e) => Err(anyhow!(e).context("terminal input task panicked")),
                    Ok(Ok(())) => Ok(SessionEnd::Suspended),
                };
            }
        };

        self.finish(end)?;
        Ok(end)
    }

    /// Runs the draw/dispatch loop until the session ends. `Ok(None)` means the
    /// key source closed before any end was requested.
    async fn drive<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut key_rx: UnboundedReceiver<KeyEvent>,
    ) -> Result<Option<SessionEnd>>
    where
        B: Backend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<G::Action>();
        let ctx = Context::new(action_tx);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            terminal.draw(|f| self.game.render(f))?;

            tokio::select! {
                // Queued actions go first so keys apply in the order they were pressed.
                biased;

                Some(action) = action_rx.recv() => {
                    if let Some(end) = self.on_action(action)? {
                        return Ok(Some(end));
                    }
                }

                key = key_rx.recv() => match key {
                    Some(key) => {
                        if let Some(end) = self.on_key(key, &ctx) {
                            return Ok(Some(end));
                        }
                    }
                    None => return Ok(None),
                },

                _ = &mut ctrl_c => return Ok(Some(SessionEnd::Suspended)),
            }
        }
    }

    /// Handles one key press. Esc and Ctrl-C suspend the session.
    pub fn on_key(&self, key: KeyEvent, ctx: &Context<G::Action>) -> Option<SessionEnd> {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            return Some(SessionEnd::Suspended);
        }
        self.game.handle_input(key, ctx);
        None
    }

    /// Applies one action and snapshots the result.
    pub fn on_action(&mut self, action: G::Action) -> Result<Option<SessionEnd>> {
        debug!(?action, "dispatch");
        if let Some(signal) = self.game.handle_action(action) {
            return Ok(Some(SessionEnd::Closed(signal)));
        }
        self.persist()?;
        Ok(None)
    }

    /// Leaves the snapshot store consistent with how the session ended.
    pub fn finish(&self, end: SessionEnd) -> Result<()> {
        info!(?end, "session ended");
        match (end, &self.store) {
            (SessionEnd::Closed(ShellSignal::Exit), Some(store)) => store.clear(),
            (SessionEnd::Suspended, Some(_)) => self.persist(),
            (_, None) => Ok(()),
        }
    }

    fn persist(&self) -> Result<()> {
        match &self.store {
            Some(store) => store
                .save(self.game.state())
                .context("saving game snapshot"),
            None => Ok(()),
        }
    }
}

/// Reads terminal events on a blocking thread and forwards key presses.
fn spawn_input_pump(tx: UnboundedSender<KeyEvent>) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            if !event::poll(INPUT_POLL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                    break;
                }
            }
        }
        Ok(())
    })
}
