use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    ai::FunctionClient,
    config::AppConfig,
    console::{self, Command},
    infrastructure::{
        notifier::{Toast, ToastNotifier},
        shutdown::Shutdown,
    },
    view::{ClassifierView, KeyEvent, Pending},
};

pub struct ClassifierApp {
    view: ClassifierView,
    toasts: UnboundedReceiver<Toast>,
    shutdown: Shutdown,
}

impl ClassifierApp {
    pub fn initialize(config: &AppConfig, shutdown: Shutdown) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("spam-classifier/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let backend = FunctionClient::new(http, &config.backend)?;
        tracing::info!(target: "backend", endpoint = %backend.endpoint(), "classifier backend configured");

        let (notifier, toasts) = ToastNotifier::channel();
        let view = ClassifierView::mount(Arc::new(backend), Arc::new(notifier), &shutdown);

        Ok(Self {
            view,
            toasts,
            shutdown,
        })
    }

    /// Classifies a single message and prints the outcome.
    pub async fn run_once(mut self, message: String) -> Result<()> {
        print!("{}", console::header());
        self.view.update_input(message);
        let pending = self.view.submit();
        self.settle(pending).await;
        Ok(())
    }

    pub async fn run_interactive(mut self) -> Result<()> {
        print!("{}", console::header());
        println!();

        let mut lines = console::spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
        let mut shutdown = self.shutdown.subscribe();

        loop {
            let line = tokio::select! {
                line = lines.recv() => line.transpose()?,
                _ = shutdown.notified() => {
                    tracing::info!(target: "console", "shutdown requested");
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };

            match console::parse_line(&line) {
                Command::Quit => break,
                Command::Clear => {
                    self.view.update_input(String::new());
                    print!("{}", console::draw(&self.view.render()));
                }
                Command::Classify => {
                    let pending = self.view.submit();
                    self.settle(pending).await;
                }
                Command::Append(text) => self.append(&text),
                Command::AppendThenChord(text) => {
                    self.append(&text);
                    let outcome = self.view.handle_key_down(KeyEvent::ctrl_enter());
                    self.settle(outcome.pending).await;
                }
            }
        }

        self.shutdown.trigger();
        Ok(())
    }

    fn append(&self, text: &str) {
        let mut input = self.view.input();
        if !input.is_empty() {
            input.push('\n');
        }
        input.push_str(text);
        self.view.update_input(input);
    }

    async fn settle(&mut self, pending: Option<Pending>) {
        if let Some(pending) = pending {
            print!("{}", console::draw(&self.view.render()));
            if let Err(err) = pending.await {
                tracing::error!(target: "console", error = %err, "classification task did not complete");
            }
        }
        while let Ok(toast) = self.toasts.try_recv() {
            println!("{}", toast.line());
        }
        print!("{}", console::draw(&self.view.render()));
    }
}
