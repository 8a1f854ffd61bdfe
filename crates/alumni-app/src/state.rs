// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, AuthMode, Notice, TabKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub expanded: bool,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: TabKind,
    pub menu: MenuState,
    pub status: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: TabKind::Home,
            menu: MenuState::default(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    ToggleMenu,
    MoveMenuCursor(isize),
    JumpToMenuEntry,
    OpenAuth(AuthMode),
    CloseAuth,
    FocusSearch,
    ExitToNav,
    SetStatus(Notice),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(TabKind),
    MenuToggled(bool),
    StatusUpdated(Notice),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => self.select_tab(tab),
            AppCommand::ToggleMenu => {
                self.menu.expanded = !self.menu.expanded;
                if self.menu.expanded {
                    self.menu.cursor = tab_position(self.active_tab);
                }
                vec![AppEvent::MenuToggled(self.menu.expanded)]
            }
            AppCommand::MoveMenuCursor(delta) => {
                if !self.menu.expanded {
                    return Vec::new();
                }
                let last = TabKind::ALL.len().saturating_sub(1);
                let next = if delta.is_negative() {
                    self.menu.cursor.saturating_sub(delta.unsigned_abs())
                } else {
                    self.menu.cursor.saturating_add(delta as usize)
                };
                self.menu.cursor = next.min(last);
                Vec::new()
            }
            AppCommand::JumpToMenuEntry => {
                if !self.menu.expanded {
                    return Vec::new();
                }
                let target = TabKind::ALL
                    .get(self.menu.cursor)
                    .copied()
                    .unwrap_or(self.active_tab);
                self.menu.expanded = false;
                let mut events = vec![AppEvent::MenuToggled(false)];
                events.extend(self.select_tab(target));
                events
            }
            AppCommand::OpenAuth(mode) => {
                self.menu.expanded = false;
                self.mode = AppMode::Auth(mode);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::CloseAuth | AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::FocusSearch => {
                let mut events = Vec::new();
                if self.active_tab != TabKind::Directory {
                    events.extend(self.select_tab(TabKind::Directory));
                }
                self.mode = AppMode::Search;
                events.push(AppEvent::ModeChanged(self.mode));
                events
            }
            AppCommand::SetStatus(notice) => {
                self.status = Some(notice.clone());
                vec![AppEvent::StatusUpdated(notice)]
            }
            AppCommand::ClearStatus => {
                self.status = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tab_position(self.active_tab) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_tab(tabs[next])
    }

    fn select_tab(&mut self, tab: TabKind) -> Vec<AppEvent> {
        self.active_tab = tab;
        vec![AppEvent::TabChanged(tab)]
    }
}

fn tab_position(tab: TabKind) -> usize {
    TabKind::ALL
        .iter()
        .position(|candidate| *candidate == tab)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, AuthMode, Notice, TabKind};

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            active_tab: TabKind::About,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, TabKind::Home);
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::Home)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, TabKind::About);
    }

    #[test]
    fn menu_toggle_tracks_expanded_flag() {
        let mut state = AppState::default();

        let opened = state.dispatch(AppCommand::ToggleMenu);
        assert!(state.menu.expanded);
        assert_eq!(opened, vec![AppEvent::MenuToggled(true)]);

        let closed = state.dispatch(AppCommand::ToggleMenu);
        assert!(!state.menu.expanded);
        assert_eq!(closed, vec![AppEvent::MenuToggled(false)]);
    }

    #[test]
    fn menu_jump_selects_tab_and_collapses() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ToggleMenu);
        state.dispatch(AppCommand::MoveMenuCursor(5));
        assert_eq!(state.menu.cursor, TabKind::ALL.len() - 1);

        state.dispatch(AppCommand::MoveMenuCursor(-1));
        let events = state.dispatch(AppCommand::JumpToMenuEntry);
        assert_eq!(state.active_tab, TabKind::Directory);
        assert!(!state.menu.expanded);
        assert_eq!(
            events,
            vec![
                AppEvent::MenuToggled(false),
                AppEvent::TabChanged(TabKind::Directory),
            ]
        );
    }

    #[test]
    fn menu_commands_are_ignored_while_collapsed() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::MoveMenuCursor(1)).is_empty());
        assert!(state.dispatch(AppCommand::JumpToMenuEntry).is_empty());
        assert_eq!(state.active_tab, TabKind::Home);
    }

    #[test]
    fn search_focus_switches_to_directory() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::FocusSearch);
        assert_eq!(state.active_tab, TabKind::Directory);
        assert_eq!(state.mode, AppMode::Search);

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn auth_open_collapses_menu() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ToggleMenu);
        state.dispatch(AppCommand::OpenAuth(AuthMode::Register));
        assert_eq!(state.mode, AppMode::Auth(AuthMode::Register));
        assert!(!state.menu.expanded);

        state.dispatch(AppCommand::CloseAuth);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        let notice = Notice::danger("No data to export");
        let events = state.dispatch(AppCommand::SetStatus(notice.clone()));
        assert_eq!(state.status, Some(notice.clone()));
        assert_eq!(events, vec![AppEvent::StatusUpdated(notice)]);

        state.dispatch(AppCommand::ClearStatus);
        assert!(state.status.is_none());
    }
}
