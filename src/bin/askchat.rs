//! Interactive chat with a question-answering backend.
//!
//! Each line typed at the prompt is sent to the backend's `/ask` endpoint and the answer is
//! printed above the prompt.  The prompt stays live while questions are outstanding.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on localhost:5000 (or $ASKCHAT_BACKEND_URL)
//! askchat
//!
//! # Talk to a specific backend
//! askchat --backend-url http://backend.example.com:8080
//!
//! # Wait for each answer before accepting the next question (refused lines are reported)
//! askchat --exclusive
//!
//! # Disable colors (useful for piping output)
//! askchat --no-color
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/clear` - Clear the message list
//! - `/config` - Show the current configuration
//! - `/quit` - Exit the application
//! - `//text` - Send `/text` as a question

use std::sync::Arc;
use std::thread;

use arrrg::CommandLine;
use futures::channel::mpsc::{self, UnboundedSender};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};
use tokio::sync::oneshot;

use askchat::widget::{
    ChatCommand, ChatWidget, OverlapPolicy, SUBMIT_KEY, TerminalDisplay, TextField, TriggerEvent,
    WidgetArgs, WidgetConfig, WidgetEvent, help_text, parse_command,
};
use askchat::{AskClient, ExchangeLogger, StderrLogger, Transport};

/// An external printer that can be sent back from the input thread.
struct SendPrinter(Box<dyn ExternalPrinter + Send>);

impl ExternalPrinter for SendPrinter {
    fn print(&mut self, msg: String) -> rustyline::Result<()> {
        self.0.print(msg)
    }
}

/// Main entry point for the askchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = WidgetArgs::from_command_line_relaxed("askchat [OPTIONS]");
    let config = WidgetConfig::from(args);

    let client = AskClient::with_options(config.backend_url.clone(), Some(config.timeout))?;
    let summary = describe_config(&config, &client);
    println!("askchat (backend: {})", client.endpoint());
    println!("Type /help for commands, /quit to exit\n");

    let logger: Arc<dyn ExchangeLogger> = if config.verbose {
        Arc::new(StderrLogger::verbose())
    } else {
        Arc::new(StderrLogger::new())
    };

    let (events_tx, events_rx) = mpsc::unbounded();
    let (printer_tx, printer_rx) = oneshot::channel();
    let reader = thread::spawn(move || read_lines(printer_tx, events_tx, summary));

    let printer = match printer_rx.await {
        Ok(Ok(printer)) => printer,
        Ok(Err(err)) => return Err(err.into()),
        Err(_) => return Err("input thread exited before starting".into()),
    };

    let transport: Arc<dyn Transport> = Arc::new(client);
    let display = TerminalDisplay::new(printer, config.use_color);
    let mut widget = ChatWidget::new(transport, TextField::new(), display)
        .with_logger(logger)
        .with_overlap(config.overlap);
    widget.run(events_rx).await;

    if reader.join().is_err() {
        return Err("input thread panicked".into());
    }
    Ok(())
}

/// Reads lines until EOF or `/quit`, turning each into widget events.
fn read_lines(
    printer_tx: oneshot::Sender<Result<SendPrinter, String>>,
    events: UnboundedSender<WidgetEvent>,
    summary: String,
) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            let _ = printer_tx.send(Err(format!("could not open terminal: {err}")));
            return;
        }
    };
    match rl.create_external_printer() {
        Ok(printer) => {
            if printer_tx.send(Ok(SendPrinter(Box::new(printer)))).is_err() {
                return;
            }
        }
        Err(err) => {
            let _ = printer_tx.send(Err(format!("could not create printer: {err}")));
            return;
        }
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let question = match parse_command(&line) {
                    None => line.clone(),
                    Some(ChatCommand::Ask(question)) => question,
                    Some(ChatCommand::Quit) => {
                        println!("Goodbye!");
                        break;
                    }
                    Some(ChatCommand::Clear) => {
                        if events.unbounded_send(WidgetEvent::ClearView).is_err() {
                            break;
                        }
                        continue;
                    }
                    Some(ChatCommand::Help) => {
                        for line in help_text().lines() {
                            println!("    {}", line);
                        }
                        continue;
                    }
                    Some(ChatCommand::ShowConfig) => {
                        for line in summary.lines() {
                            println!("    {}", line);
                        }
                        continue;
                    }
                    Some(ChatCommand::Invalid(message)) => {
                        eprintln!("Error: {message}");
                        continue;
                    }
                };

                let typed = line.trim();
                if !typed.is_empty() {
                    let _ = rl.add_history_entry(typed);
                }
                let enter = WidgetEvent::Triggered(TriggerEvent::KeyPress(SUBMIT_KEY.to_string()));
                if events
                    .unbounded_send(WidgetEvent::InputChanged(question))
                    .and_then(|_| events.unbounded_send(enter))
                    .is_err()
                {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Input error: {}", err);
                break;
            }
        }
    }
}

fn describe_config(config: &WidgetConfig, client: &AskClient) -> String {
    let overlap = match config.overlap {
        OverlapPolicy::Concurrent => "concurrent",
        OverlapPolicy::Exclusive => "exclusive (one question at a time)",
    };
    format!(
        "Current Configuration:\n  Backend: {}\n  Timeout: {}s\n  Overlap: {}\n  Color: {}\n  Verbose logging: {}",
        client.endpoint(),
        config.timeout.as_secs(),
        overlap,
        if config.use_color { "on" } else { "off" },
        if config.verbose { "on" } else { "off" },
    )
}
