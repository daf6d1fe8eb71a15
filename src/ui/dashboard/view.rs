use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{Filter, Task, TaskStatus};

use super::app::{AppState, AuthState, BoardState, DeleteConfirmState, Screen, StatusKind};
use super::editor::{FormKind, FormState};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    match &app.screen {
        Screen::Auth(state) => render_auth(frame, state),
        Screen::Board(state) => render_board(frame, state),
    }
}

fn render_auth(frame: &mut Frame, state: &AuthState) {
    let area = frame.size();
    let title = match state.form.kind() {
        FormKind::Login => "Sign in",
        _ => "Create an account",
    };

    let height = (state.form.fields().len() as u16 * 2 + 8).min(area.height.saturating_sub(2));
    let width = 48u16.min(area.width.saturating_sub(4));
    let modal = centered_rect(width, height, area);
    frame.render_widget(Clear, modal);

    let mut lines = form_lines(&state.form, width as usize);
    lines.push(Line::from(""));
    if let Some((message, kind)) = &state.notice {
        lines.push(Line::from(Span::styled(
            message.clone(),
            notice_style(*kind),
        )));
    }
    lines.push(Line::from(Span::styled(
        match state.form.kind() {
            FormKind::Login => "enter submit  tab next  ctrl+r register  esc quit",
            _ => "enter submit  tab next  ctrl+r login  esc quit",
        },
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        );
    frame.render_widget(widget, modal);
}

fn render_board(frame: &mut Frame, state: &BoardState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_filter_tabs(frame, state, chunks[0]);
    render_task_list(frame, state, chunks[1]);
    render_footer(frame, state, chunks[2]);

    if let Some(form) = state.form.as_ref() {
        render_task_form_modal(frame, area, form);
    }
    if let Some(confirm) = state.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, confirm);
    }
}

fn render_filter_tabs(frame: &mut Frame, state: &BoardState, area: Rect) {
    let counts = state.dashboard.counts();
    let tabs = vec![
        ("1 All", Filter::All, counts.total, COLOR_INFO),
        ("2 Pending", Filter::Pending, counts.pending, COLOR_WARNING),
        (
            "3 Completed",
            Filter::Completed,
            counts.completed,
            COLOR_SUCCESS,
        ),
    ];

    let mut spans = Vec::new();
    for (idx, (label, filter, count, color)) in tabs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let text = format!("{label} ({count})");
        let style = if state.dashboard.filter() == filter {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(text, style));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_task_list(frame: &mut Frame, state: &BoardState, area: Rect) {
    let visible = state.dashboard.visible();
    let width = area.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line<'static>> = Vec::new();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks found",
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for (idx, task) in visible.iter().enumerate() {
        lines.push(render_task_row(task, idx == state.selected, width));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title("Tasks"),
    );
    frame.render_widget(widget, area);
}

fn render_task_row(task: &Task, selected: bool, width: usize) -> Line<'static> {
    let marker = match task.status {
        TaskStatus::Completed => "[x] ",
        TaskStatus::Pending => "[ ] ",
    };
    let title_width = width.saturating_sub(marker.len() + 2);
    let title = truncate_text(&task.title, title_width);

    let marker_style = match task.status {
        TaskStatus::Completed => Style::default().fg(COLOR_SUCCESS),
        TaskStatus::Pending => Style::default().fg(COLOR_WARNING),
    };
    let mut title_style = match task.status {
        TaskStatus::Completed => Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT),
        TaskStatus::Pending => Style::default().fg(COLOR_TEXT),
    };
    let mut row_prefix = Span::raw("  ");
    if selected {
        title_style = title_style.bg(COLOR_BG_MUTED).add_modifier(Modifier::BOLD);
        row_prefix = Span::styled("> ", Style::default().fg(COLOR_ACCENT));
    }

    Line::from(vec![
        row_prefix,
        Span::styled(marker.to_string(), marker_style),
        Span::styled(title, title_style),
    ])
}

fn render_footer(frame: &mut Frame, state: &BoardState, area: Rect) {
    let hint = "n new  e edit  space toggle  d delete  r reload  1/2/3 filter  ctrl+l logout  q quit";
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((message, kind)) = &state.notice {
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(message.clone(), notice_style(*kind)),
        ])
    } else {
        Line::from(hint_span)
    };

    let counts = state.dashboard.counts();
    let counts_line = Line::from(Span::styled(
        format!(
            "{} total, {} pending, {} completed",
            counts.total, counts.pending, counts.completed
        ),
        Style::default().fg(COLOR_ACCENT),
    ));

    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER)),
        );
    frame.render_widget(widget, area);
}

fn render_task_form_modal(frame: &mut Frame, area: Rect, form: &FormState) {
    let title = match form.kind() {
        FormKind::EditTask => "Edit Task",
        _ => "New Task",
    };
    let width = area.width.saturating_sub(8).min(64);
    let height = (form.fields().len() as u16 * 2 + 6).min(area.height.saturating_sub(4));
    let modal = centered_rect(width, height, area);
    frame.render_widget(Clear, modal);

    let mut lines = form_lines(form, width as usize);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter save  tab next  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        );
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let width = area.width.saturating_sub(8).min(56);
    let height = 8u16.min(area.height.saturating_sub(4));
    let modal = centered_rect(width, height, area);
    frame.render_widget(Clear, modal);

    let title_width = (width as usize).saturating_sub(8);
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Delete task?",
        Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    if !state.title.trim().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Title: ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                truncate_text(&state.title, title_width),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "y/enter confirm  n/esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ERROR))
            .title("Delete Task"),
    );
    frame.render_widget(widget, modal);
}

fn form_lines(form: &FormState, width: usize) -> Vec<Line<'static>> {
    let value_width = width.saturating_sub(4);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (idx, field) in form.fields().iter().enumerate() {
        let active = idx == form.active_index();
        let label_style = if active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        let mut label = field.label.to_string();
        if field.required {
            label.push('*');
        }
        lines.push(Line::from(Span::styled(label, label_style)));

        let shown = if field.masked {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let mut shown = truncate_text(&shown, value_width);
        if active {
            shown.push('_');
        }
        let value_style = if active {
            Style::default().fg(COLOR_TEXT).bg(COLOR_BG_MUTED)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(shown, value_style),
        ]));
    }

    if let Some(error) = form.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines
}

fn notice_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Error => Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
        StatusKind::Info => Style::default().fg(COLOR_SUCCESS),
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let truncated: String = text.chars().take(width - 3).collect();
    format!("{truncated}...")
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
