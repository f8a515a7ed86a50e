//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::navigation::{Route, Tab};
use crate::state::Store;
use crate::ui::Theme;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let session = match &store.app.profile.email {
            Some(email) if store.nav.in_main_app() => {
                Span::styled(format!("● {email}"), Style::default().fg(theme.positive))
            }
            _ => Span::styled("○ Signed out", Style::default().fg(theme.inactive)),
        };

        let route = Span::styled(
            match store.nav.current() {
                Route::Login => " Login ".to_string(),
                Route::Register => " Register ".to_string(),
                Route::MainApp => format!(" {} ", store.nav.tab().title()),
            },
            Style::default().fg(theme.neutral),
        );

        let busy = if store.nav.in_main_app() && store.is_busy() {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(theme.neutral)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(theme.inactive));

        // Create the status line
        let left_content = vec![
            Span::styled(
                " SpreadEdge ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            session,
            Span::raw(" | "),
            route,
            busy,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint
        let left_len = status_line.width();
        let right_len = help_hint.width();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph = Paragraph::new(Line::from(full_line))
            .style(theme.border().add_modifier(Modifier::REVERSED));

        frame.render_widget(paragraph, area);
    }
}

/// Render the one-line key hints for the current screen.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    store: &Store,
    kb: &KeyBindings,
    theme: &Theme,
) {
    let hints: Vec<(String, &str)> = match store.nav.current() {
        Route::Login => vec![
            ("Enter".into(), "log in"),
            ("Tab".into(), "next field"),
            ("Ctrl+r".into(), "register"),
            ("Ctrl+c".into(), "quit"),
        ],
        Route::Register => vec![
            ("Enter".into(), "create account"),
            ("Tab".into(), "next field"),
            ("Esc".into(), "back"),
        ],
        Route::MainApp => {
            let mut hints = vec![(format!("{}-{}", kb.home, kb.profile), "tabs")];
            match store.nav.tab() {
                Tab::Home => hints.push((kb.select.clone(), "open")),
                Tab::Signals => hints.push((kb.test_notification.clone(), "test notification")),
                Tab::Market => hints.push((kb.filter.clone(), "filter")),
                Tab::Performance if store.performance.detail.is_some() => {
                    hints.push((kb.back.clone(), "back"))
                }
                Tab::Performance => hints.push((kb.select.clone(), "details")),
                Tab::CopyTrade => hints.push((kb.follow.clone(), "follow")),
                Tab::Profile => {
                    hints.push((kb.refresh_session.clone(), "refresh session"));
                    hints.push((kb.logout.clone(), "log out"));
                }
            }
            if store.nav.tab().fetches_data() {
                hints.push((kb.refresh.clone(), "refresh"));
            }
            hints.push((kb.quit.clone(), "quit"));
            hints
        }
    };

    let spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {key} "), Style::default().fg(theme.accent)),
                Span::styled(format!("{label} "), Style::default().fg(theme.inactive)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
