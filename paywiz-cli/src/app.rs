//! The interactive terminal front end.
//!
//! Reads commands line by line from stdin, forwards wizard commands to the
//! controller and redraws whenever a new snapshot, notification or route
//! arrives.

use crate::embed::{TerminalNavigator, iframe_snippet};
use crate::input::{HELP, Input, parse_input};
use crate::render::{
    ScreenKey, render_countdown_line, render_embed_page, render_notification, render_screen,
};
use crate::shutdown::shutdown_signal;
use paywiz_core::collaborators::{Clipboard, Navigator};
use paywiz_core::events::{CommandSender, NotificationReceiver};
use paywiz_core::receipt::{Receipt, ReceiptFormat};
use paywiz_core::wizard::{Command, WizardState};
use paywiz_sdk::config::WizardSettings;
use paywiz_sdk::objects::{Notification, Route};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

pub struct Terminal {
    settings: WizardSettings,
    command_tx: CommandSender,
    navigator: TerminalNavigator,
    clipboard: Arc<dyn Clipboard>,
}

/// Channels the terminal observes.
pub struct TerminalInputs {
    pub snapshot_rx: watch::Receiver<WizardState>,
    pub notification_rx: NotificationReceiver,
    pub route_rx: watch::Receiver<Route>,
}

/// What the loop should do after handling one line.
enum Flow {
    Continue,
    Quit,
}

impl Terminal {
    pub fn new(
        settings: WizardSettings,
        command_tx: CommandSender,
        navigator: TerminalNavigator,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            settings,
            command_tx,
            navigator,
            clipboard,
        }
    }

    /// Run until `quit`, end of input or a shutdown signal.
    pub async fn run(self, inputs: TerminalInputs) -> anyhow::Result<()> {
        let TerminalInputs {
            mut snapshot_rx,
            mut notification_rx,
            mut route_rx,
        } = inputs;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let mut shown = ScreenKey::of(&snapshot_rx.borrow_and_update());
        self.redraw(&snapshot_rx.borrow());
        println!("Введите help для списка команд");

        loop {
            tokio::select! {
                biased;

                result = &mut shutdown => {
                    result?;
                    break;
                }

                Some(notification) = notification_rx.recv() => {
                    println!("{}", render_notification(&notification));
                }

                Ok(()) = route_rx.changed() => {
                    self.redraw(&snapshot_rx.borrow());
                }

                Ok(()) = snapshot_rx.changed() => {
                    let state = snapshot_rx.borrow_and_update().clone();
                    let key = ScreenKey::of(&state);
                    if key != shown {
                        shown = key;
                        self.redraw(&state);
                    } else if let Some(line) = render_countdown_line(&state) {
                        println!("{line}");
                    }
                }

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::info!("End of input");
                        break;
                    };
                    let state = snapshot_rx.borrow().clone();
                    match self.handle_line(&line, &state).await? {
                        Flow::Continue => {}
                        Flow::Quit => break,
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_line(&self, line: &str, state: &WizardState) -> anyhow::Result<Flow> {
        let input = match parse_input(line) {
            Ok(input) => input,
            Err(e) => {
                println!("{e}");
                return Ok(Flow::Continue);
            }
        };

        if self.navigator.current() == Route::Embed {
            match input {
                Input::Wizard(Command::Back) => {
                    self.navigator.navigate_to(Route::Payment);
                    return Ok(Flow::Continue);
                }
                Input::Wizard(Command::CopyTransferTarget) => {
                    self.copy_embed_snippet();
                    return Ok(Flow::Continue);
                }
                _ => {}
            }
        }

        match input {
            Input::Wizard(command) => {
                if self.navigator.current() == Route::Embed {
                    self.navigator.navigate_to(Route::Payment);
                }
                self.command_tx.send(command).await?;
            }
            Input::Save(format) => self.save_receipt(state, format),
            Input::Embed => self.navigator.navigate_to(Route::Embed),
            Input::Status => self.redraw(state),
            Input::Help => println!("{HELP}"),
            Input::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn redraw(&self, state: &WizardState) {
        match self.navigator.current() {
            Route::Payment => println!("{}", render_screen(state, &self.settings)),
            Route::Embed => println!("{}", render_embed_page(&self.settings)),
        }
    }

    fn copy_embed_snippet(&self) {
        match self.clipboard.copy(&iframe_snippet(&self.settings.embed)) {
            Ok(()) => println!(
                "{}",
                render_notification(&Notification::info(
                    "Скопировано!",
                    "Код скопирован в буфер обмена",
                ))
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to copy embed snippet"),
        }
    }

    /// Export is best-effort: failures are reported and the session goes on.
    fn save_receipt(&self, state: &WizardState, format: ReceiptFormat) {
        if !self.settings.flow.receipt_export {
            println!("Сохранение чека отключено");
            return;
        }
        let Some(receipt) = Receipt::from_state(state, &self.settings.receipt) else {
            println!("Чек появится после оплаты");
            return;
        };
        match receipt.export(&self.settings.receipt.export_dir, format) {
            Ok(path) => println!("Чек сохранён: {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to export receipt");
                println!("Не удалось сохранить чек: {e}");
            }
        }
    }
}
