// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

pub const COLUMN_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    SrNo,
    Name,
    Role,
    Company,
    Domain,
}

impl ColumnKey {
    pub const ALL: [Self; COLUMN_COUNT] = [
        Self::SrNo,
        Self::Name,
        Self::Role,
        Self::Company,
        Self::Domain,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SrNo => "sr-no",
            Self::Name => "name",
            Self::Role => "role",
            Self::Company => "company",
            Self::Domain => "domain",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sr-no" => Some(Self::SrNo),
            "name" => Some(Self::Name),
            "role" => Some(Self::Role),
            "company" => Some(Self::Company),
            "domain" => Some(Self::Domain),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SrNo => "Sr. No.",
            Self::Name => "Name",
            Self::Role => "Role",
            Self::Company => "Company",
            Self::Domain => "Domain",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::SrNo => 0,
            Self::Name => 1,
            Self::Role => 2,
            Self::Company => 3,
            Self::Domain => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::SrNo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Home,
    Directory,
    About,
}

impl TabKind {
    pub const ALL: [Self; 3] = [Self::Home, Self::Directory, Self::About];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Directory => "directory",
            Self::About => "about",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Self::Home),
            "directory" => Some(Self::Directory),
            "about" => Some(Self::About),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Directory => "alumni",
            Self::About => "about",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub const ALL: [Self; 2] = [Self::Login, Self::Register];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Login => "Login successful!",
            Self::Register => "Registration successful!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    LoginEmail,
    LoginPassword,
    RegisterName,
    RegisterEmail,
    RegisterPassword,
}

impl FormField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoginEmail => "login-email",
            Self::LoginPassword => "login-password",
            Self::RegisterName => "register-name",
            Self::RegisterEmail => "register-email",
            Self::RegisterPassword => "register-password",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LoginEmail | Self::RegisterEmail => "email",
            Self::LoginPassword | Self::RegisterPassword => "password",
            Self::RegisterName => "full name",
        }
    }

    pub const fn is_secret(self) -> bool {
        matches!(self, Self::LoginPassword | Self::RegisterPassword)
    }

    pub const fn fields_for(mode: AuthMode) -> &'static [Self] {
        match mode {
            AuthMode::Login => &[Self::LoginEmail, Self::LoginPassword],
            AuthMode::Register => &[
                Self::RegisterName,
                Self::RegisterEmail,
                Self::RegisterPassword,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeTone {
    Info,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: NoticeTone::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: NoticeTone::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: NoticeTone::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
    Auth(AuthMode),
}

#[cfg(test)]
mod tests {
    use super::{AuthMode, ColumnKey, FormField, SortDirection, TabKind};

    #[test]
    fn column_keys_round_trip_wire_names() {
        for key in ColumnKey::ALL {
            assert_eq!(ColumnKey::parse(key.as_str()), Some(key));
            assert_eq!(ColumnKey::from_index(key.index()), Some(key));
        }
        assert_eq!(ColumnKey::parse("grad-year"), None);
        assert_eq!(ColumnKey::from_index(5), None);
    }

    #[test]
    fn only_serial_column_is_numeric() {
        let numeric = ColumnKey::ALL
            .iter()
            .filter(|key| key.is_numeric())
            .collect::<Vec<_>>();
        assert_eq!(numeric, vec![&ColumnKey::SrNo]);
    }

    #[test]
    fn sort_direction_flips_and_labels() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.flipped(), SortDirection::Asc);
        assert_eq!(SortDirection::Desc.label(), "descending");
    }

    #[test]
    fn tab_parse_accepts_config_names() {
        assert_eq!(TabKind::parse("directory"), Some(TabKind::Directory));
        assert_eq!(TabKind::parse("Directory"), None);
    }

    #[test]
    fn register_mode_lists_three_fields() {
        assert_eq!(FormField::fields_for(AuthMode::Register).len(), 3);
        assert_eq!(
            FormField::fields_for(AuthMode::Login),
            &[FormField::LoginEmail, FormField::LoginPassword]
        );
    }
}
