// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::sync::LazyLock;

use crate::{AuthMode, FormField};

pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingName,
    InvalidEmail,
    ShortPassword,
    MissingPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FormField,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub const fn new(field: FormField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }

    pub const fn message(&self) -> &'static str {
        match self.kind {
            ValidationErrorKind::MissingName => "Please enter your full name",
            ValidationErrorKind::InvalidEmail => "Please enter a valid email address",
            ValidationErrorKind::ShortPassword => "Password must be at least 8 characters long",
            ValidationErrorKind::MissingPassword => "Please enter your password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFormInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPayload {
    Login(LoginFormInput),
    Register(RegisterFormInput),
}

impl AuthPayload {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Login(_) => AuthMode::Login,
            Self::Register(_) => AuthMode::Register,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Login(login) => login.validate(),
            Self::Register(register) => register.validate(),
        }
    }
}

impl LoginFormInput {
    pub fn validate(&self) -> ValidationResult<()> {
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::new(
                FormField::LoginEmail,
                ValidationErrorKind::InvalidEmail,
            ));
        }
        if self.password.is_empty() {
            return Err(ValidationError::new(
                FormField::LoginPassword,
                ValidationErrorKind::MissingPassword,
            ));
        }
        Ok(())
    }
}

impl RegisterFormInput {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new(
                FormField::RegisterName,
                ValidationErrorKind::MissingName,
            ));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::new(
                FormField::RegisterEmail,
                ValidationErrorKind::InvalidEmail,
            ));
        }
        if !is_valid_password(&self.password) {
            return Err(ValidationError::new(
                FormField::RegisterPassword,
                ValidationErrorKind::ShortPassword,
            ));
        }
        Ok(())
    }
}

/// One stop in the modal's tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalFocus {
    ModeTab(AuthMode),
    Field(FormField),
    Submit,
    Close,
}

/// Auth dialog state. Focus never leaves the dialog while it is open:
/// stepping past either end of the tab order wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthModal {
    pub mode: AuthMode,
    pub login: LoginFormInput,
    pub register: RegisterFormInput,
    pub focus: ModalFocus,
    pub error: Option<ValidationError>,
}

impl AuthModal {
    pub fn open(mode: AuthMode) -> Self {
        Self {
            mode,
            login: LoginFormInput::default(),
            register: RegisterFormInput::default(),
            focus: first_field_focus(mode),
            error: None,
        }
    }

    pub fn focus_order(&self) -> Vec<ModalFocus> {
        let mut order = AuthMode::ALL
            .iter()
            .map(|mode| ModalFocus::ModeTab(*mode))
            .collect::<Vec<_>>();
        order.extend(
            FormField::fields_for(self.mode)
                .iter()
                .map(|field| ModalFocus::Field(*field)),
        );
        order.push(ModalFocus::Submit);
        order.push(ModalFocus::Close);
        order
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order
            .iter()
            .position(|focus| *focus == self.focus)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = order[next];
    }

    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = ModalFocus::ModeTab(mode);
    }

    pub fn focused_field(&self) -> Option<FormField> {
        match self.focus {
            ModalFocus::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::LoginEmail => &self.login.email,
            FormField::LoginPassword => &self.login.password,
            FormField::RegisterName => &self.register.name,
            FormField::RegisterEmail => &self.register.email,
            FormField::RegisterPassword => &self.register.password,
        }
    }

    fn field_value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::LoginEmail => &mut self.login.email,
            FormField::LoginPassword => &mut self.login.password,
            FormField::RegisterName => &mut self.register.name,
            FormField::RegisterEmail => &mut self.register.email,
            FormField::RegisterPassword => &mut self.register.password,
        }
    }

    pub fn push_char(&mut self, value: char) -> bool {
        let Some(field) = self.focused_field() else {
            return false;
        };
        self.field_value_mut(field).push(value);
        true
    }

    pub fn pop_char(&mut self) -> bool {
        let Some(field) = self.focused_field() else {
            return false;
        };
        self.field_value_mut(field).pop().is_some()
    }

    pub fn payload(&self) -> AuthPayload {
        match self.mode {
            AuthMode::Login => AuthPayload::Login(self.login.clone()),
            AuthMode::Register => AuthPayload::Register(self.register.clone()),
        }
    }

    /// Clears the previous error, then validates the active form. A failure
    /// is recorded against its field and leaves every value untouched.
    pub fn submit(&mut self) -> ValidationResult<AuthPayload> {
        self.error = None;
        let payload = self.payload();
        if let Err(error) = payload.validate() {
            self.error = Some(error);
            return Err(error);
        }
        Ok(payload)
    }

    pub fn error_for(&self, field: FormField) -> Option<&ValidationError> {
        self.error.as_ref().filter(|error| error.field == field)
    }
}

fn first_field_focus(mode: AuthMode) -> ModalFocus {
    FormField::fields_for(mode)
        .first()
        .map(|field| ModalFocus::Field(*field))
        .unwrap_or(ModalFocus::Submit)
}
