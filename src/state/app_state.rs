//! Application-level state: toasts, forms, profile preferences.

use crate::navigation::Tab;
use std::time::{Duration, Instant};

/// Tabs reachable from the home screen's shortcut cards, in card order.
pub const HOME_SHORTCUTS: [Tab; 3] = [Tab::Market, Tab::Signals, Tab::CopyTrade];

/// A transient message shown over the current screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: Option<String>,
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
    pub duration: Duration,
}

/// Toast severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Toast {
    fn new(message: impl Into<String>, level: ToastLevel, secs: u64) -> Self {
        Self {
            title: None,
            message: message.into(),
            level,
            shown_at: Instant::now(),
            duration: Duration::from_secs(secs),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error, 8)
    }

    /// Attach a title line.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override how long the toast stays up.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.duration
    }
}

/// Field focused in the login/register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Password,
    FullName,
}

/// Credentials being typed on the login or register route.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub focus: FormField,
    /// Request in flight.
    pub submitting: bool,
    /// Last failure shown under the form.
    pub error: Option<String>,
}

impl AuthForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::FullName => &mut self.full_name,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    /// Move focus to the next field. The full-name field only exists on the
    /// register form.
    pub fn next_field(&mut self, registering: bool) {
        self.focus = match (self.focus, registering) {
            (FormField::Email, _) => FormField::Password,
            (FormField::Password, true) => FormField::FullName,
            (FormField::Password, false) | (FormField::FullName, _) => FormField::Email,
        };
    }

    /// Whether enough has been typed to submit.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Forget everything but the email.
    pub fn reset(&mut self) {
        let email = std::mem::take(&mut self.email);
        *self = Self {
            email,
            ..Self::default()
        };
    }
}

/// Profile screen state.
#[derive(Debug, Clone)]
pub struct ProfileState {
    /// Email of the signed-in user.
    pub email: Option<String>,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    /// Token from the last successful push registration.
    pub push_token: Option<String>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            email: None,
            notifications_enabled: true,
            dark_mode: true,
            push_token: None,
        }
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current toast.
    pub toast: Option<Toast>,
    /// Login/register form.
    pub form: AuthForm,
    /// Profile.
    pub profile: ProfileState,
    /// Highlighted home shortcut card.
    pub home_shortcut: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Drop the toast once its time is up.
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    /// Tab behind the highlighted home shortcut.
    pub fn selected_shortcut(&self) -> Tab {
        HOME_SHORTCUTS[self.home_shortcut.min(HOME_SHORTCUTS.len() - 1)]
    }

    pub fn move_shortcut(&mut self, delta: i32) {
        let last = HOME_SHORTCUTS.len() as i64 - 1;
        self.home_shortcut = (self.home_shortcut as i64 + delta as i64).clamp(0, last) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_typing_goes_to_focused_field() {
        let mut form = AuthForm::default();
        for c in "a@b.com".chars() {
            form.push_char(c);
        }
        form.next_field(false);
        form.push_char('p');
        form.push_char('x');
        form.pop_char();

        assert_eq!(form.email, "a@b.com");
        assert_eq!(form.password, "p");
        assert!(form.is_complete());
    }

    #[test]
    fn test_full_name_only_on_register() {
        let mut form = AuthForm::default();
        form.next_field(false);
        form.next_field(false);
        assert_eq!(form.focus, FormField::Email);

        form.next_field(true);
        form.next_field(true);
        assert_eq!(form.focus, FormField::FullName);
    }

    #[test]
    fn test_reset_keeps_email() {
        let mut form = AuthForm {
            email: "a@b.com".into(),
            password: "secret".into(),
            error: Some("bad".into()),
            ..AuthForm::default()
        };
        form.reset();
        assert_eq!(form.email, "a@b.com");
        assert!(form.password.is_empty());
        assert!(form.error.is_none());
    }

    #[test]
    fn test_shortcut_cursor_clamps() {
        let mut state = AppState::default();
        assert_eq!(state.selected_shortcut(), Tab::Market);
        state.move_shortcut(10);
        assert_eq!(state.selected_shortcut(), Tab::CopyTrade);
        state.move_shortcut(-1);
        assert_eq!(state.selected_shortcut(), Tab::Signals);
    }

    #[test]
    fn test_toast_expiry() {
        let mut state = AppState {
            toast: Some(Toast::info("hello").with_duration(Duration::from_secs(1))),
            ..AppState::default()
        };
        let shown = state.toast.as_ref().unwrap().shown_at;

        state.expire_toast(shown);
        assert!(state.toast.is_some());
        state.expire_toast(shown + Duration::from_secs(2));
        assert!(state.toast.is_none());
    }
}
