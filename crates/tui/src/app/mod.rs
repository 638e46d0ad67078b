use std::time::Duration;

use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use api_types::Currency;

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    form::{FormIntent, TransactionForm},
    store::TransactionStore,
    ui::{self, keymap::AppAction},
};

/// What the key handler is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Search,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line status message shown in the bottom bar.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct AppState {
    pub mode: Mode,
    pub store: TransactionStore,
    pub form: Option<TransactionForm>,
    pub search: String,
    pub selected: usize,
    pub notice: Option<Notice>,
    pub currency: Currency,
    pub timezone: Tz,
    pub base_url: String,
}

impl AppState {
    pub fn select_next(&mut self) {
        let len = self.store.transactions().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.store.transactions().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub struct App {
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|err| AppError::Terminal(format!("invalid timezone: {err}")))?;

        let state = AppState {
            mode: Mode::List,
            store: TransactionStore::new(client),
            form: None,
            search: String::new(),
            selected: 0,
            notice: None,
            currency: config.currency,
            timezone,
            base_url: config.base_url,
        };

        Ok(Self {
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        if let Err(err) = self.state.store.fetch(None).await {
            self.state.notice = Some(Notice::error(message_for_error(err)));
        }
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let editing = matches!(self.state.mode, Mode::Search | Mode::Form);
        match ui::keymap::map_key(key, editing) {
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::Cancel => {
                self.state.form = None;
                self.state.mode = Mode::List;
            }
            AppAction::NextField => {
                if let Some(form) = self.state.form.as_mut() {
                    form.next_field();
                }
            }
            AppAction::Submit => self.submit().await?,
            AppAction::Backspace => match self.state.mode {
                Mode::Search => {
                    self.state.search.pop();
                }
                Mode::Form => {
                    if let Some(form) = self.state.form.as_mut() {
                        form.backspace();
                    }
                }
                Mode::List => {}
            },
            AppAction::Up => match self.state.mode {
                Mode::List => self.state.select_prev(),
                Mode::Form => {
                    if let Some(form) = self.state.form.as_mut() {
                        form.toggle_kind();
                    }
                }
                Mode::Search => {}
            },
            AppAction::Down => match self.state.mode {
                Mode::List => self.state.select_next(),
                Mode::Form => {
                    if let Some(form) = self.state.form.as_mut() {
                        form.toggle_kind();
                    }
                }
                Mode::Search => {}
            },
            AppAction::Input(ch) => match self.state.mode {
                Mode::List => self.handle_list_key(ch).await?,
                Mode::Search => self.state.search.push(ch),
                Mode::Form => {
                    if let Some(form) = self.state.form.as_mut() {
                        form.push(ch);
                    }
                }
            },
            AppAction::None => {}
        }

        Ok(())
    }

    async fn handle_list_key(&mut self, ch: char) -> Result<()> {
        match ch {
            '/' => {
                self.state.search = self.state.store.query().unwrap_or_default().to_string();
                self.state.mode = Mode::Search;
            }
            'n' | 'N' => {
                self.state.form = Some(TransactionForm::create());
                self.state.mode = Mode::Form;
            }
            'e' | 'E' => {
                if let Some(tx) = self.state.store.transactions().get(self.state.selected) {
                    self.state.form = Some(TransactionForm::edit(tx));
                    self.state.mode = Mode::Form;
                }
            }
            'd' | 'D' => self.delete_selected().await?,
            'r' | 'R' => {
                let query = self.state.store.query().map(str::to_string);
                self.refresh(query.as_deref()).await;
            }
            'c' | 'C' => self.refresh(None).await,
            'j' | 'J' => self.state.select_next(),
            'k' | 'K' => self.state.select_prev(),
            _ => {}
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        match self.state.mode {
            Mode::Search => {
                let query = self.state.search.clone();
                self.state.mode = Mode::List;
                self.refresh(Some(&query)).await;
                self.state.selected = 0;
            }
            Mode::Form => self.submit_form().await?,
            Mode::List => {}
        }
        Ok(())
    }

    async fn submit_form(&mut self) -> Result<()> {
        let Some(form) = self.state.form.as_mut() else {
            return Ok(());
        };
        let Some(output) = form.validate() else {
            // Field error is shown inside the form itself.
            return Ok(());
        };
        let intent = form.intent;

        let result = match intent {
            FormIntent::Create => {
                self.state
                    .store
                    .create(&output.description, output.price, &output.category, output.kind)
                    .await
            }
            FormIntent::Edit { id } => {
                self.state
                    .store
                    .edit(id, &output.description, output.price, &output.category, output.kind)
                    .await
            }
        };

        self.state.form = None;
        self.state.mode = Mode::List;
        self.state.notice = match result {
            Ok(()) => match intent {
                FormIntent::Create => Some(Notice::info("Transaction recorded.")),
                FormIntent::Edit { .. } => Some(Notice::info("Transaction updated.")),
            },
            Err(err) => Some(Notice::error(message_for_error(err))),
        };
        self.state.clamp_selection();
        Ok(())
    }

    async fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self
            .state
            .store
            .transactions()
            .get(self.state.selected)
            .map(|tx| tx.id)
        else {
            return Ok(());
        };

        self.state.notice = match self.state.store.delete(id).await {
            Ok(()) => Some(Notice::info("Transaction deleted.")),
            Err(err) => Some(Notice::error(message_for_error(err))),
        };
        self.state.clamp_selection();
        Ok(())
    }

    async fn refresh(&mut self, query: Option<&str>) {
        match self.state.store.fetch(query).await {
            Ok(()) => {
                self.state.notice = None;
                self.state.clamp_selection();
            }
            Err(err) => {
                self.state.notice = Some(Notice::error(message_for_error(err)));
            }
        }
    }
}

fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::NotFound => {
            "Transaction no longer exists on the server. Refresh with 'r'.".to_string()
        }
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Server unreachable: {err}"),
    }
}
