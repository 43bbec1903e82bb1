use std::{future::Future, io, sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::{
    api::WalletApi,
    app::{
        ui,
        wallet::{Wallet, WalletSnapshot},
    },
    models::DisplayableInvestment,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tab {
    Wallet,
    Assets,
}

/// Runs a task in the background and delivers its result over the given
/// channel. The caller returns immediately, so the event loop keeps
/// drawing and handling keys while the task is in flight.
pub fn dispatch<T, F>(tx: &mpsc::UnboundedSender<T>, task: F)
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(task.await);
    });
}

pub struct App {
    api: WalletApi,
    wallet: Wallet,
    tab: Tab,
    table_state: TableState,
    input: Option<String>,
    popup_message: Option<String>,
    error_popup: Option<String>,
    loading: bool,
    refresh_tx: mpsc::UnboundedSender<(u64, Result<WalletSnapshot>)>,
    refresh_rx: mpsc::UnboundedReceiver<(u64, Result<WalletSnapshot>)>,
    action_tx: mpsc::UnboundedSender<Result<String>>,
    action_rx: mpsc::UnboundedReceiver<Result<String>>,
}

impl App {
    pub fn new(api: WalletApi) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let wallet = Wallet::new(Arc::new(api.clone()));
        Self {
            api,
            wallet,
            tab: Tab::Wallet,
            table_state: TableState::default(),
            input: None,
            popup_message: None,
            error_popup: None,
            loading: false,
            refresh_tx,
            refresh_rx,
            action_tx,
            action_rx,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.spawn_refresh();

        loop {
            terminal.draw(|frame| {
                ui::render(
                    frame,
                    &self.wallet,
                    self.tab,
                    &mut self.table_state,
                    &self.input,
                    &self.popup_message,
                    &self.error_popup,
                    self.loading,
                )
            })?;

            self.drain_finished_refreshes();
            self.drain_finished_actions();

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.input.is_some() {
                    self.handle_input_key(key.code);
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Enter | KeyCode::Esc => {
                        if self.error_popup.is_some() {
                            self.clear_error_popup();
                            continue;
                        }
                        if self.popup_message.is_some() {
                            self.clear_popup();
                            continue;
                        }
                        if key.code == KeyCode::Esc {
                            self.table_state.select(None);
                        }
                    }
                    KeyCode::Tab => {
                        self.tab = match self.tab {
                            Tab::Wallet => Tab::Assets,
                            Tab::Assets => Tab::Wallet,
                        };
                        self.table_state.select(None);
                    }
                    KeyCode::Down => self.select_next(),
                    KeyCode::Up => self.select_previous(),
                    KeyCode::Char('r') => self.spawn_refresh(),
                    KeyCode::Char('i') => {
                        if self.tab == Tab::Assets && self.selected_asset_id().is_some() {
                            self.input = Some(String::new());
                        }
                    }
                    KeyCode::Char('w') => self.withdraw_selected(),
                    KeyCode::Char('x') => self.remove_selected(),
                    _ => {}
                }
            }
        }
    }

    /// Applies finished background refreshes. A snapshot from a refresh
    /// that is no longer the latest one is dropped by the wallet.
    fn drain_finished_refreshes(&mut self) {
        while let Ok((generation, outcome)) = self.refresh_rx.try_recv() {
            match outcome {
                Ok(snapshot) => {
                    if self.wallet.apply(generation, snapshot) {
                        self.loading = false;
                    }
                }
                Err(err) => {
                    if self.wallet.is_latest(generation) {
                        self.loading = false;
                        self.show_error_popup(&err.to_string());
                    }
                }
            }
        }
    }

    /// Reports finished invest/withdraw/remove actions. A successful
    /// action triggers a refresh so the wallet reflects it.
    fn drain_finished_actions(&mut self) {
        while let Ok(outcome) = self.action_rx.try_recv() {
            match outcome {
                Ok(message) => {
                    self.show_popup(&message);
                    self.spawn_refresh();
                }
                Err(err) => self.show_error_popup(&err.to_string()),
            }
        }
    }

    fn spawn_refresh(&mut self) {
        self.loading = true;
        let (generation, fetch) = self.wallet.start_refresh();
        dispatch(&self.refresh_tx, async move { (generation, fetch.await) });
    }

    fn spawn_action<F>(&mut self, action: F, success: &'static str)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        dispatch(&self.action_tx, async move {
            action.await.map(|_| success.to_string())
        });
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.input = None,
            KeyCode::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let Some(input) = self.input.as_mut() {
                    input.push(c);
                }
            }
            KeyCode::Enter => self.submit_investment(),
            _ => {}
        }
    }

    fn submit_investment(&mut self) {
        let Some(raw) = self.input.take() else {
            return;
        };
        let Some(asset_id) = self.selected_asset_id() else {
            return;
        };

        match raw.parse::<Decimal>() {
            Ok(value) => {
                let api = self.api.clone();
                self.spawn_action(
                    async move { api.create_investment(value, &asset_id).await },
                    "Investment registered",
                );
            }
            Err(_) => self.show_error_popup(&format!("Invalid amount '{}'", raw)),
        }
    }

    fn withdraw_selected(&mut self) {
        let Some(row) = self.selected_wallet_row() else {
            return;
        };
        if *row.is_history() {
            self.show_error_popup("Investment was already withdrawn");
            return;
        }

        let api = self.api.clone();
        self.spawn_action(
            async move { api.withdraw_investment(row.id()).await },
            "Investment withdrawn",
        );
    }

    fn remove_selected(&mut self) {
        let Some(row) = self.selected_wallet_row() else {
            return;
        };

        let api = self.api.clone();
        self.spawn_action(
            async move { api.remove_investment(row.id()).await },
            "Investment removed",
        );
    }

    fn selected_asset_id(&self) -> Option<String> {
        if self.tab != Tab::Assets {
            return None;
        }
        let snapshot = self.wallet.snapshot()?;
        let index = self.table_state.selected()?;
        snapshot.assets().get(index).map(|asset| asset.id().clone())
    }

    fn selected_wallet_row(&self) -> Option<DisplayableInvestment> {
        if self.tab != Tab::Wallet {
            return None;
        }
        let snapshot = self.wallet.snapshot()?;
        let index = self.table_state.selected()?;
        ui::wallet_rows(snapshot).get(index).map(|row| (*row).clone())
    }

    fn row_count(&self) -> usize {
        let Some(snapshot) = self.wallet.snapshot() else {
            return 0;
        };
        match self.tab {
            Tab::Wallet => snapshot.active().len() + snapshot.history().len(),
            Tab::Assets => snapshot.assets().len(),
        }
    }

    fn select_next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i == 0 => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}
