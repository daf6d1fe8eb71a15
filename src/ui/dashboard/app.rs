use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::api::ApiClient;
use crate::auth;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::session::Session;
use crate::task::Filter;

use super::editor::{FieldId, FormAction, FormKind, FormState};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct AuthState {
    pub(crate) form: FormState,
    pub(crate) notice: Option<(String, StatusKind)>,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

pub(crate) struct BoardState {
    pub(crate) dashboard: Dashboard,
    pub(crate) selected: usize,
    pub(crate) form: Option<FormState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) notice: Option<(String, StatusKind)>,
}

pub(crate) enum Screen {
    Auth(AuthState),
    Board(BoardState),
}

pub(crate) struct AppState {
    pub(crate) screen: Screen,
    quit: bool,
}

impl BoardState {
    fn new(mut dashboard: Dashboard) -> Result<Self> {
        dashboard.load()?;
        Ok(Self {
            dashboard,
            selected: 0,
            form: None,
            delete_confirm: None,
            notice: None,
        })
    }

    pub(crate) fn selected_task_id(&self) -> Option<String> {
        self.dashboard
            .visible()
            .get(self.selected)
            .map(|task| task.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.dashboard.visible().len() as isize;
        if len == 0 {
            return;
        }
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;
    }

    fn info(&mut self, message: impl Into<String>) {
        self.notice = Some((message.into(), StatusKind::Info));
    }

    fn error(&mut self, err: &crate::error::Error) {
        self.notice = Some((err.user_message(), StatusKind::Error));
    }
}

/// Run the interactive dashboard.
///
/// Starts on the auth screen when no session token is present, otherwise
/// straight on the board. All requests run sequentially in the event loop.
pub fn run(api: &ApiClient, session: &mut Session) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, api, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &ApiClient,
    session: &mut Session,
) -> Result<()> {
    let screen = match session.token() {
        Some(token) => Screen::Board(BoardState::new(Dashboard::new(
            api.clone(),
            token.to_string(),
        ))?),
        None => Screen::Auth(AuthState {
            form: FormState::login(),
            notice: None,
        }),
    };
    let mut app = AppState {
        screen,
        quit: false,
    };

    while !app.quit {
        terminal.draw(|frame| view::render(frame, &mut app))?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        handle_key(&mut app, api, session, key);
    }

    Ok(())
}

fn handle_key(app: &mut AppState, api: &ApiClient, session: &mut Session, key: KeyEvent) {
    let mut quit = app.quit;
    let next = match &mut app.screen {
        Screen::Auth(state) => handle_auth_key(state, api, session, key, &mut quit),
        Screen::Board(state) => handle_board_key(state, session, key, &mut quit),
    };
    app.quit = quit;
    if let Some(next) = next {
        app.screen = next;
    }
}

fn handle_auth_key(
    state: &mut AuthState,
    api: &ApiClient,
    session: &mut Session,
    key: KeyEvent,
    quit: &mut bool,
) -> Option<Screen> {
    // Ctrl+R flips between "Sign in" and "Create an account"
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        state.form = match state.form.kind() {
            FormKind::Login => FormState::register(),
            _ => FormState::login(),
        };
        state.notice = None;
        return None;
    }

    match state.form.handle_key(key) {
        FormAction::None => None,
        FormAction::Cancel => {
            *quit = true;
            None
        }
        FormAction::Submit => submit_auth(state, api, session),
    }
}

fn submit_auth(state: &mut AuthState, api: &ApiClient, session: &mut Session) -> Option<Screen> {
    let email = state.form.value(FieldId::Email).to_string();
    let password = state.form.value(FieldId::Password).to_string();

    match state.form.kind() {
        FormKind::Login => match auth::login(api, session, &email, &password) {
            Ok(()) => {
                let token = session.token().unwrap_or_default().to_string();
                match BoardState::new(Dashboard::new(api.clone(), token)) {
                    Ok(mut board) => {
                        board.info("Welcome");
                        Some(Screen::Board(board))
                    }
                    Err(err) => {
                        state.notice = Some((err.user_message(), StatusKind::Error));
                        None
                    }
                }
            }
            Err(err) => {
                state.form.set_error(err.user_message());
                state.form.clear_field(FieldId::Password);
                None
            }
        },
        _ => {
            let name = state.form.value(FieldId::Name).to_string();
            match auth::register(api, &name, &email, &password) {
                Ok(()) => {
                    // Back to login mode with the email kept, like the
                    // web client after a successful registration.
                    let mut form = FormState::login();
                    for ch in email.chars() {
                        form.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
                    }
                    state.form = form;
                    state.notice = Some((
                        "Account created successfully! Please login.".to_string(),
                        StatusKind::Info,
                    ));
                    None
                }
                Err(err) => {
                    state.form.set_error(err.user_message());
                    None
                }
            }
        }
    }
}

fn handle_board_key(
    state: &mut BoardState,
    session: &mut Session,
    key: KeyEvent,
    quit: &mut bool,
) -> Option<Screen> {
    if state.delete_confirm.is_some() {
        handle_delete_confirm_key(state, key);
        return None;
    }

    if state.form.is_some() {
        handle_board_form_key(state, key);
        return None;
    }

    // Ctrl+L logs out and returns to the auth screen
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        if let Err(err) = session.clear() {
            state.error(&err);
            return None;
        }
        return Some(Screen::Auth(AuthState {
            form: FormState::login(),
            notice: Some(("Logged out".to_string(), StatusKind::Info)),
        }));
    }

    match key.code {
        KeyCode::Char('q') => *quit = true,
        KeyCode::Char('r') => match state.dashboard.load() {
            Ok(()) => {
                state.clamp_selection();
                state.info("Reloaded");
            }
            Err(err) => state.error(&err),
        },
        KeyCode::Char('n') => {
            state.notice = None;
            state.form = Some(FormState::new_task());
        }
        KeyCode::Char('e') => {
            if let Some(id) = state.selected_task_id() {
                match state.dashboard.start_edit(&id) {
                    Ok(()) => {
                        if let Some(task) = state.dashboard.task_by_id(&id) {
                            state.form = Some(FormState::edit_task(task));
                        }
                        state.notice = None;
                    }
                    Err(err) => state.error(&err),
                }
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('t') => {
            if let Some(id) = state.selected_task_id() {
                match state.dashboard.toggle(&id) {
                    Ok(()) => state.clamp_selection(),
                    Err(err) => state.error(&err),
                }
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_task_id() {
                let title = state
                    .dashboard
                    .task_by_id(&id)
                    .map(|task| task.title.clone())
                    .unwrap_or_default();
                state.delete_confirm = Some(DeleteConfirmState { task_id: id, title });
            }
        }
        KeyCode::Char('1') => {
            state.dashboard.set_filter(Filter::All);
            state.clamp_selection();
        }
        KeyCode::Char('2') => {
            state.dashboard.set_filter(Filter::Pending);
            state.clamp_selection();
        }
        KeyCode::Char('3') => {
            state.dashboard.set_filter(Filter::Completed);
            state.clamp_selection();
        }
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        _ => {}
    }

    None
}

fn handle_board_form_key(state: &mut BoardState, key: KeyEvent) {
    let Some(form) = state.form.as_mut() else {
        return;
    };

    match form.handle_key(key) {
        FormAction::None => {}
        FormAction::Cancel => {
            if form.kind() == FormKind::EditTask {
                state.dashboard.cancel_edit();
            }
            state.form = None;
        }
        FormAction::Submit => {
            let title = form.value(FieldId::Title).to_string();
            let description = form.value(FieldId::Description).to_string();
            let outcome = match form.kind() {
                FormKind::EditTask => {
                    if let Some(slot) = state.dashboard.edit_mut() {
                        slot.title = title;
                        slot.description = description;
                    }
                    state.dashboard.save_edit().map(|()| "Task updated")
                }
                _ => state
                    .dashboard
                    .create(&title, &description)
                    .map(|()| "Task created"),
            };

            match outcome {
                Ok(message) => {
                    state.form = None;
                    state.clamp_selection();
                    state.info(message);
                }
                Err(err) => {
                    if let Some(form) = state.form.as_mut() {
                        form.set_error(err.user_message());
                    }
                }
            }
        }
    }
}

fn handle_delete_confirm_key(state: &mut BoardState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(confirm) = state.delete_confirm.take() {
                match state.dashboard.delete(&confirm.task_id) {
                    Ok(()) => {
                        state.clamp_selection();
                        state.info("Task deleted");
                    }
                    Err(err) => state.error(&err),
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.delete_confirm = None;
        }
        _ => {}
    }
}
