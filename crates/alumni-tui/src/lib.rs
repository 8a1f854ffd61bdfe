// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_app::{
    AppCommand, AppMode, AppState, AuthModal, AuthMode, AuthPayload, COLUMN_COUNT, ColumnKey,
    FormField, ModalFocus, Notice, NoticeTone, TabKind,
};
use alumni_table::{Cells, EXPORT_FILE_NAME, Table, TableOp, TableOutcome, sort_announcement};
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row as TableRow, Table as TableWidget, Tabs, Wrap,
};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(120);
const HALF_PAGE_ROWS: isize = 10;
const INPUT_CURSOR: &str = "▏";
const SELECTED_MARK: &str = "● ";
const SECRET_MASK: char = '•';
const TAB_PADDING: u16 = 1;
const TAB_DIVIDER: u16 = 1;
const COLUMN_SPACING: u16 = 1;
const COLUMN_WIDTHS: [Constraint; COLUMN_COUNT] = [
    Constraint::Length(9),
    Constraint::Min(12),
    Constraint::Min(10),
    Constraint::Min(10),
    Constraint::Min(8),
];

/// Everything the shell needs from the outside world.
pub trait AppRuntime {
    fn load_roster(&mut self) -> Result<Vec<Cells>>;
    /// Hands an export payload to the user. Returns where it landed.
    fn download(&mut self, file_name: &str, payload: &[u8]) -> Result<PathBuf>;
    fn submit_auth(&mut self, payload: &AuthPayload) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub notice_timeout: Duration,
    pub loading_delay: Duration,
    pub startup_delay: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            notice_timeout: Duration::from_secs(4),
            loading_delay: Duration::from_millis(300),
            startup_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    LoadingFinished { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    ActivateHeader,
    ActivateColumn(usize),
    ToggleSelection,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEvent {
    CursorUpdated,
    Op(TableOp),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalAction {
    Stay,
    Activate,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenAreas {
    tabs: Rect,
    body: Rect,
    search: Rect,
    table: Rect,
    status: Rect,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    table: Table,
    cursor_row: usize,
    cursor_col: usize,
    modal: Option<AuthModal>,
    loading: bool,
    loading_token: u64,
    status_token: u64,
    options: UiOptions,
}

impl ViewData {
    fn new(table: Table, options: UiOptions) -> Self {
        Self {
            table,
            options,
            ..Self::default()
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let (internal_tx, internal_rx) = mpsc::channel();
    let mut view_data = ViewData::new(Table::default(), options);
    load_table(state, runtime, &mut view_data, &internal_tx);
    start_loading(&mut view_data, &internal_tx, options.startup_delay);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        match next_event() {
            Ok(Some(Event::Key(key))) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(Some(Event::Mouse(mouse))) => match terminal.size() {
                Ok(size) => {
                    let screen = Rect::new(0, 0, size.width, size.height);
                    handle_mouse_event(
                        state,
                        runtime,
                        &mut view_data,
                        &internal_tx,
                        mouse,
                        screen,
                    );
                }
                Err(error) => warn!("terminal size unavailable: {error}"),
            },
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn next_event() -> Result<Option<Event>> {
    if !event::poll(POLL_INTERVAL).context("poll event")? {
        return Ok(None);
    }
    event::read().context("read event").map(Some)
}

fn load_table<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match runtime.load_roster() {
        Ok(records) => {
            view_data.table = Table::new(records);
            info!(rows = view_data.table.len(), "roster loaded");
        }
        Err(error) => {
            warn!("roster load failed: {error:#}");
            emit_status(
                state,
                view_data,
                internal_tx,
                Notice::danger(format!("load failed: {error:#}")),
            );
        }
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::LoadingFinished { token } if token == view_data.loading_token => {
                view_data.loading = false;
            }
            InternalEvent::ClearStatus { .. } | InternalEvent::LoadingFinished { .. } => {}
        }
    }
}

fn schedule(internal_tx: &Sender<InternalEvent>, after: Duration, event: InternalEvent) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(event);
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    notice: Notice,
) {
    match notice.tone {
        NoticeTone::Danger => warn!(text = %notice.text, "notice"),
        NoticeTone::Info | NoticeTone::Success => info!(text = %notice.text, "notice"),
    }
    state.dispatch(AppCommand::SetStatus(notice));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule(
        internal_tx,
        view_data.options.notice_timeout,
        InternalEvent::ClearStatus {
            token: view_data.status_token,
        },
    );
}

/// Shows the loading overlay for `delay`. Input keeps flowing while it is up.
fn start_loading(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>, delay: Duration) {
    view_data.loading = true;
    view_data.loading_token = view_data.loading_token.saturating_add(1);
    schedule(
        internal_tx,
        delay,
        InternalEvent::LoadingFinished {
            token: view_data.loading_token,
        },
    );
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if matches!(state.mode, AppMode::Auth(_)) {
        handle_modal_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.menu.expanded {
        handle_menu_key(state, key);
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if handle_table_key(state, runtime, view_data, internal_tx, key) {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => {
            state.dispatch(AppCommand::NextTab);
        }
        (KeyCode::BackTab, _) => {
            state.dispatch(AppCommand::PrevTab);
        }
        (KeyCode::Char('m'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::ToggleMenu);
        }
        (KeyCode::Char('L'), _) => open_auth(state, view_data, AuthMode::Login),
        (KeyCode::Char('R'), _) => open_auth(state, view_data, AuthMode::Register),
        (KeyCode::Char('/'), _) => {
            state.dispatch(AppCommand::FocusSearch);
        }
        (KeyCode::Esc, _) if state.status.is_some() => {
            state.dispatch(AppCommand::ClearStatus);
        }
        _ => {}
    }
    false
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    let command = match key.code {
        KeyCode::Char('j') | KeyCode::Down => AppCommand::MoveMenuCursor(1),
        KeyCode::Char('k') | KeyCode::Up => AppCommand::MoveMenuCursor(-1),
        KeyCode::Enter | KeyCode::Char(' ') => AppCommand::JumpToMenuEntry,
        KeyCode::Esc | KeyCode::Char('m') => AppCommand::ToggleMenu,
        _ => return,
    };
    state.dispatch(command);
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let mut query = view_data.table.query().to_owned();
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            state.dispatch(AppCommand::ExitToNav);
            return;
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            query.clear();
        }
        (KeyCode::Backspace, _) => {
            if query.pop().is_none() {
                return;
            }
        }
        (KeyCode::Char(value), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            query.push(value);
        }
        _ => return,
    }
    run_table_op(state, runtime, view_data, internal_tx, TableOp::Search(query));
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if state.active_tab != TabKind::Directory || state.mode != AppMode::Nav {
        return false;
    }
    let Some(command) = table_command_for_key(key) else {
        return false;
    };

    match apply_table_command(view_data, command) {
        TableEvent::Op(op) => run_table_op(state, runtime, view_data, internal_tx, op),
        TableEvent::CursorUpdated | TableEvent::Ignored => {}
    }
    true
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(HALF_PAGE_ROWS))
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(-HALF_PAGE_ROWS))
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('g'), _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::ActivateHeader),
        (KeyCode::Char(digit @ '1'..='5'), _) => Some(TableCommand::ActivateColumn(
            digit as usize - '1' as usize,
        )),
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Some(TableCommand::ToggleSelection),
        (KeyCode::Char('x'), KeyModifiers::NONE) => Some(TableCommand::Export),
        _ => None,
    }
}

fn apply_table_command(view_data: &mut ViewData, command: TableCommand) -> TableEvent {
    match command {
        TableCommand::MoveRow(delta) => {
            move_row(view_data, delta);
            TableEvent::CursorUpdated
        }
        TableCommand::MoveColumn(delta) => {
            let last = COLUMN_COUNT - 1;
            view_data.cursor_col = step(view_data.cursor_col, delta).min(last);
            TableEvent::CursorUpdated
        }
        TableCommand::JumpFirstRow => {
            view_data.cursor_row = 0;
            TableEvent::CursorUpdated
        }
        TableCommand::JumpLastRow => {
            view_data.cursor_row = view_data.table.visible_count().saturating_sub(1);
            TableEvent::CursorUpdated
        }
        TableCommand::ActivateHeader => match ColumnKey::from_index(view_data.cursor_col) {
            Some(key) => TableEvent::Op(TableOp::ActivateHeader(key)),
            None => TableEvent::Ignored,
        },
        TableCommand::ActivateColumn(index) => match ColumnKey::from_index(index) {
            Some(key) => {
                view_data.cursor_col = index;
                TableEvent::Op(TableOp::ActivateHeader(key))
            }
            None => TableEvent::Ignored,
        },
        TableCommand::ToggleSelection => {
            match view_data.table.visible_rows().nth(view_data.cursor_row) {
                Some(row) => TableEvent::Op(TableOp::ToggleSelection(row.id())),
                None => TableEvent::Ignored,
            }
        }
        TableCommand::Export => TableEvent::Op(TableOp::Export),
    }
}

fn run_table_op<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    op: TableOp,
) {
    if matches!(
        op,
        TableOp::Search(_) | TableOp::ActivateHeader(_) | TableOp::Sort { .. }
    ) {
        let delay = view_data.options.loading_delay;
        start_loading(view_data, internal_tx, delay);
    }

    let outcome = view_data.table.dispatch(op);
    clamp_cursor(view_data);

    match outcome {
        TableOutcome::Filtered { .. } | TableOutcome::Toggled { .. } => {}
        TableOutcome::Sorted { announcement, .. } => {
            emit_status(state, view_data, internal_tx, Notice::info(announcement));
        }
        TableOutcome::Exported { payload, rows } => {
            let notice = match runtime.download(EXPORT_FILE_NAME, &payload) {
                Ok(path) => {
                    Notice::success(format!("Exported {rows} rows to {}", path.display()))
                }
                Err(error) => Notice::danger(format!("export failed: {error:#}")),
            };
            emit_status(state, view_data, internal_tx, notice);
        }
        TableOutcome::ExportFailed(error) => {
            emit_status(state, view_data, internal_tx, Notice::danger(error.to_string()));
        }
        TableOutcome::UnknownRow(id) => {
            warn!(row = id.get(), "selection target is not in the table");
        }
    }
}

fn open_auth(state: &mut AppState, view_data: &mut ViewData, mode: AuthMode) {
    state.dispatch(AppCommand::OpenAuth(mode));
    view_data.modal = Some(AuthModal::open(mode));
}

fn close_auth(state: &mut AppState, view_data: &mut ViewData) {
    view_data.modal = None;
    state.dispatch(AppCommand::CloseAuth);
}

fn handle_modal_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(modal) = view_data.modal.as_mut() else {
        state.dispatch(AppCommand::CloseAuth);
        return;
    };

    let action = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => ModalAction::Close,
        (KeyCode::Tab, _) => {
            modal.focus_next();
            ModalAction::Stay
        }
        (KeyCode::BackTab, _) => {
            modal.focus_prev();
            ModalAction::Stay
        }
        (KeyCode::Enter, _) => ModalAction::Activate,
        (KeyCode::Char(' '), _) if modal.focused_field().is_none() => ModalAction::Activate,
        (KeyCode::Backspace, _) => {
            modal.pop_char();
            ModalAction::Stay
        }
        (KeyCode::Char(value), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            modal.push_char(value);
            ModalAction::Stay
        }
        _ => ModalAction::Stay,
    };

    match action {
        ModalAction::Stay => {}
        ModalAction::Close => close_auth(state, view_data),
        ModalAction::Activate => activate_modal_focus(state, runtime, view_data, internal_tx),
    }
}

fn activate_modal_focus<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(focus) = view_data.modal.as_ref().map(|modal| modal.focus) else {
        return;
    };
    match focus {
        ModalFocus::ModeTab(mode) => {
            if let Some(modal) = view_data.modal.as_mut() {
                modal.switch_mode(mode);
            }
            state.dispatch(AppCommand::OpenAuth(mode));
        }
        ModalFocus::Close => close_auth(state, view_data),
        ModalFocus::Field(_) | ModalFocus::Submit => {
            submit_auth(state, runtime, view_data, internal_tx);
        }
    }
}

fn submit_auth<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(modal) = view_data.modal.as_mut() else {
        return;
    };
    let payload = match modal.submit() {
        Ok(payload) => payload,
        Err(error) => {
            debug!(field = error.field.as_str(), %error, "form rejected");
            modal.focus = ModalFocus::Field(error.field);
            return;
        }
    };

    let mode = payload.mode();
    match runtime.submit_auth(&payload) {
        Ok(()) => {
            close_auth(state, view_data);
            emit_status(
                state,
                view_data,
                internal_tx,
                Notice::success(mode.success_message()),
            );
        }
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            Notice::danger(format!("{} failed: {error:#}", mode.as_str())),
        ),
    }
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
    screen: Rect,
) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }

    if matches!(state.mode, AppMode::Auth(_)) {
        if !area_contains(modal_area(screen), mouse.column, mouse.row) {
            close_auth(state, view_data);
        }
        return;
    }

    let areas = screen_areas(screen);
    if area_contains(areas.status, mouse.column, mouse.row) {
        if state.status.is_some() {
            state.dispatch(AppCommand::ClearStatus);
        }
        return;
    }

    if area_contains(areas.tabs, mouse.column, mouse.row) {
        if let Some(tab) = tab_at(areas.tabs, mouse.column, mouse.row) {
            state.dispatch(AppCommand::SelectTab(tab));
        }
        return;
    }

    let table_reachable = state.active_tab == TabKind::Directory && !state.menu.expanded;
    if !table_reachable || !area_contains(areas.table, mouse.column, mouse.row) {
        return;
    }

    if mouse.row == areas.table.y.saturating_add(1) {
        if let Some(key) = header_key_at(areas.table, mouse.column) {
            view_data.cursor_col = key.index();
            run_table_op(
                state,
                runtime,
                view_data,
                internal_tx,
                TableOp::ActivateHeader(key),
            );
        }
        return;
    }

    let visible = view_data.table.visible_count();
    let Some(index) = row_index_at(areas.table, mouse.row, view_data.cursor_row, visible) else {
        return;
    };
    let Some(id) = view_data.table.visible_rows().nth(index).map(|row| row.id()) else {
        return;
    };
    view_data.cursor_row = index;
    view_data.table.dispatch(TableOp::ToggleSelection(id));
}

/// Mirrors the `Tabs` layout: each title is padded by one cell on both sides
/// and followed by a one-cell divider.
fn tab_at(area: Rect, column: u16, row: u16) -> Option<TabKind> {
    let inner = bordered().inner(area);
    if row != inner.y || column < inner.x {
        return None;
    }
    let mut x = inner.x;
    for tab in TabKind::ALL {
        let label_width = u16::try_from(tab.label().chars().count()).unwrap_or(u16::MAX);
        let width = label_width.saturating_add(TAB_PADDING * 2);
        if column < x.saturating_add(width) {
            return Some(tab);
        }
        x = x.saturating_add(width).saturating_add(TAB_DIVIDER);
        if column < x {
            return None;
        }
    }
    None
}

/// Column cells laid out the way the table widget lays them out inside its
/// border.
fn header_key_at(area: Rect, column: u16) -> Option<ColumnKey> {
    let inner = bordered().inner(area);
    let cells = Layout::horizontal(COLUMN_WIDTHS)
        .spacing(COLUMN_SPACING)
        .split(inner);
    cells
        .iter()
        .position(|cell| column >= cell.x && column < cell.x.saturating_add(cell.width))
        .and_then(ColumnKey::from_index)
}

fn bordered() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

fn modal_area(screen: Rect) -> Rect {
    centered_rect(60, 60, screen)
}

fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Body rows inside the bordered table: top border and header above, bottom
/// border below.
fn table_viewport_rows(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(3))
}

fn scroll_offset(cursor_row: usize, viewport: usize) -> usize {
    if viewport == 0 || cursor_row < viewport {
        return 0;
    }
    cursor_row + 1 - viewport
}

fn row_index_at(area: Rect, y: u16, cursor_row: usize, visible: usize) -> Option<usize> {
    let first_body_row = area.y.saturating_add(2);
    if y < first_body_row {
        return None;
    }
    let viewport = table_viewport_rows(area);
    let line = usize::from(y - first_body_row);
    if line >= viewport {
        return None;
    }
    let index = scroll_offset(cursor_row, viewport) + line;
    (index < visible).then_some(index)
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let row_count = view_data.table.visible_count();
    if row_count == 0 {
        view_data.cursor_row = 0;
        return;
    }
    view_data.cursor_row = step(view_data.cursor_row, delta).min(row_count - 1);
}

fn step(current: usize, delta: isize) -> usize {
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    }
}

fn clamp_cursor(view_data: &mut ViewData) {
    let row_count = view_data.table.visible_count();
    view_data.cursor_row = view_data.cursor_row.min(row_count.saturating_sub(1));
}

fn screen_areas(area: Rect) -> ScreenAreas {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(outer[1]);

    ScreenAreas {
        tabs: outer[0],
        body: outer[1],
        search: body[0],
        table: body[1],
        status: outer[2],
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let areas = screen_areas(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(TabKind::ALL.iter().map(|tab| tab.label()))
        .block(Block::default().title("alumni").borders(Borders::ALL))
        .padding(" ", " ")
        .divider(symbols::line::VERTICAL)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, areas.tabs);

    match state.active_tab {
        TabKind::Home => {
            let home = Paragraph::new(render_home_text(view_data))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("home"));
            frame.render_widget(home, areas.body);
        }
        TabKind::About => {
            let about = Paragraph::new(about_text())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("about"));
            frame.render_widget(about, areas.body);
        }
        TabKind::Directory => {
            let search = Paragraph::new(search_line(state, view_data))
                .block(Block::default().borders(Borders::ALL).title("search"));
            frame.render_widget(search, areas.search);
            render_table(frame, areas.table, state, view_data);
        }
    }

    let tone = state
        .status
        .as_ref()
        .map_or(NoticeTone::Info, |notice| notice.tone);
    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(tone_color(tone)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, areas.status);

    if state.menu.expanded {
        let area = centered_rect(36, 30, frame.area());
        frame.render_widget(Clear, area);
        let menu = Paragraph::new(render_menu_text(state))
            .block(Block::default().title("sections").borders(Borders::ALL));
        frame.render_widget(menu, area);
    }

    if let Some(modal) = &view_data.modal {
        let area = modal_area(frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(render_modal_text(modal)).block(
            Block::default()
                .title(modal.mode.label())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(dialog, area);
    }

    if view_data.loading {
        let area = centered_rect(24, 14, frame.area());
        frame.render_widget(Clear, area);
        let loading = Paragraph::new("loading…")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let header = TableRow::new(ColumnKey::ALL.iter().map(|key| {
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if key.index() == view_data.cursor_col {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(header_label(&view_data.table, *key)).style(style)
    }));

    let viewport = table_viewport_rows(area);
    let offset = scroll_offset(view_data.cursor_row, viewport);
    let rows = view_data
        .table
        .visible_rows()
        .enumerate()
        .skip(offset)
        .take(viewport)
        .map(|(index, row)| {
            let on_cursor = index == view_data.cursor_row;
            let mut style = Style::default();
            if row.is_selected() {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if on_cursor {
                style = style.bg(Color::DarkGray);
            }

            let cells = row
                .cells()
                .iter()
                .enumerate()
                .map(|(column, text)| {
                    let text = if column == 0 && row.is_selected() {
                        format!("{SELECTED_MARK}{text}")
                    } else {
                        text.clone()
                    };
                    let cell_style = if on_cursor
                        && column == view_data.cursor_col
                        && state.mode == AppMode::Nav
                    {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        style
                    };
                    Cell::from(text).style(cell_style)
                })
                .collect::<Vec<_>>();
            TableRow::new(cells)
        });

    let mut block = Block::default()
        .title(table_title(&view_data.table))
        .borders(Borders::ALL);
    if let Some(key) = view_data.table.sort_state().active {
        let direction = view_data.table.sort_state().direction;
        block = block.title_bottom(sort_announcement(key, direction));
    }

    let table = TableWidget::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(block);
    frame.render_widget(table, area);
}

fn header_label(table: &Table, key: ColumnKey) -> String {
    let mut label = key.label().to_owned();
    if let Some(direction) = table.sort_state().direction_for(key) {
        label.push(' ');
        label.push_str(direction.arrow());
    }
    label
}

fn table_title(table: &Table) -> String {
    format!(
        "alumni {}/{} shown, {} selected",
        table.visible_count(),
        table.len(),
        table.selected_count()
    )
}

fn search_line(state: &AppState, view_data: &ViewData) -> String {
    let query = view_data.table.query();
    if state.mode == AppMode::Search {
        return format!("{query}{INPUT_CURSOR}");
    }
    if query.is_empty() {
        "press / to search by name, role, company or domain".to_owned()
    } else {
        query.to_owned()
    }
}

fn render_home_text(view_data: &ViewData) -> String {
    format!(
        "Welcome to the alumni network.\n\n\
         {} alumni on file, {} selected.\n\n\
         / search the directory    tab switch sections    m section menu\n\
         L log in    R register    ctrl+q quit",
        view_data.table.len(),
        view_data.table.selected_count()
    )
}

fn about_text() -> &'static str {
    "The directory lists graduates by serial number, name, role, company and domain.\n\n\
     Sort any column, narrow the list with a search, select the rows you care about \
     and export what you see to CSV."
}

fn render_menu_text(state: &AppState) -> String {
    TabKind::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let marker = if index == state.menu.cursor { ">" } else { " " };
            let active = if *tab == state.active_tab { " *" } else { "" };
            format!("{marker} {}{active}", tab.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_modal_text(modal: &AuthModal) -> String {
    let mut lines = Vec::new();

    let tabs = AuthMode::ALL
        .iter()
        .map(|mode| {
            let focus = focus_marker(modal.focus == ModalFocus::ModeTab(*mode));
            if *mode == modal.mode {
                format!("{focus}[{}]", mode.label())
            } else {
                format!("{focus} {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(tabs);
    lines.push(String::new());

    for field in FormField::fields_for(modal.mode) {
        let focused = modal.focus == ModalFocus::Field(*field);
        let value = modal.field_value(*field);
        let shown = if field.is_secret() {
            SECRET_MASK.to_string().repeat(value.chars().count())
        } else {
            value.to_owned()
        };
        let cursor = if focused { INPUT_CURSOR } else { "" };
        lines.push(format!(
            "{}{:>10}: {shown}{cursor}",
            focus_marker(focused),
            field.label()
        ));
        if let Some(error) = modal.error_for(*field) {
            lines.push(format!("{:>13}! {error}", ""));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}[{}]  {}[close]",
        focus_marker(modal.focus == ModalFocus::Submit),
        modal.mode.label(),
        focus_marker(modal.focus == ModalFocus::Close),
    ));
    lines.join("\n")
}

fn focus_marker(focused: bool) -> &'static str {
    if focused { ">" } else { " " }
}

fn status_text(state: &AppState) -> String {
    let hints = match state.mode {
        AppMode::Nav if state.menu.expanded => "j/k move | enter jump | esc close",
        AppMode::Nav if state.active_tab == TabKind::Directory => {
            "j/k h/l | s/1-5 sort | enter select | / search | x export | m menu | L/R | ctrl+q"
        }
        AppMode::Nav => "tab switch | / search | m menu | L login | R register | ctrl+q",
        AppMode::Search => "type to filter | ctrl+u clear | esc done",
        AppMode::Auth(_) => "tab/shift+tab move | enter submit | esc close",
    };
    let mode = mode_label(state.mode);
    match &state.status {
        Some(notice) => format!("{mode} | {} | {hints}", notice.text),
        None => format!("{mode} | {hints}"),
    }
}

fn mode_label(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Nav => "NAV",
        AppMode::Search => "SEARCH",
        AppMode::Auth(_) => "AUTH",
    }
}

fn tone_color(tone: NoticeTone) -> Color {
    match tone {
        NoticeTone::Info => Color::Yellow,
        NoticeTone::Success => Color::Green,
        NoticeTone::Danger => Color::Red,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
