//! Login and register form.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::navigation::Route;
use crate::state::{FormField, Store};
use crate::ui::Theme;

/// Credentials form for the login and register routes.
pub struct LoginForm;

impl LoginForm {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let registering = store.nav.current() == Route::Register;
        let form = &store.app.form;

        let popup = centered_rect(50, 70, area);
        frame.render_widget(Clear, popup);

        let title = if registering {
            " Create Account "
        } else {
            " Login "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut fields = vec![
            (FormField::Email, "Email", form.email.clone()),
            (FormField::Password, "Password", "•".repeat(form.password.chars().count())),
        ];
        if registering {
            fields.push((FormField::FullName, "Full name", form.full_name.clone()));
        }

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let banner = Paragraph::new(Line::from(Span::styled(
            "SpreadEdge",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .centered();
        frame.render_widget(banner, rows[0]);

        for (i, (field, label, value)) in fields.into_iter().enumerate() {
            let focused = form.focus == field;
            let border = if focused {
                Style::default().fg(theme.primary)
            } else {
                theme.border()
            };
            let cursor = if focused && !form.submitting { "▏" } else { "" };
            let input = Paragraph::new(format!("{value}{cursor}")).block(
                Block::default()
                    .title(format!(" {label} "))
                    .borders(Borders::ALL)
                    .border_style(border),
            );
            frame.render_widget(input, rows[i + 1]);
        }

        let status_row = rows[rows.len() - 2];
        let status = if form.submitting {
            Line::from(Span::styled(
                if registering {
                    "Creating account..."
                } else {
                    "Logging in..."
                },
                Style::default()
                    .fg(theme.neutral)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else if let Some(error) = &form.error {
            Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error)))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(status).centered(), status_row);
    }
}
