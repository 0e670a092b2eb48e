//! TUI rendering: orchestrates all panes.

pub mod form;
pub mod submission_detail;
pub mod submission_list;

use chrono::Local;
use estagio_core::{form::Notice, store::SubmissionStore};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, PASSWORD_PROMPT, Screen};

// ─── Root draw ───────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: SubmissionStore + 'static>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Form => form::draw(f, rows[1], app),
    Screen::Dashboard => {
      submission_list::draw(f, rows[1], app);
      if let Some(submission) = app.selected_submission() {
        submission_detail::draw(f, rows[1], submission);
      }
    }
  }
  draw_status(f, rows[2], app);

  if let Some(attempt) = &app.prompt {
    draw_prompt(f, area, attempt);
  }
}

/// A `width`×`height` rectangle centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
    .flex(Flex::Center)
    .areas(row);
  cell
}

// ─── Header ──────────────────────────────────────────────────────────────────

fn draw_header<S: SubmissionStore + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%d/%m/%Y").to_string();

  let title = match app.screen {
    Screen::Form => " EstágioDev  O primeiro passo para sua carreira de sucesso.",
    Screen::Dashboard => " EstágioDev  Dashboard de Inscrições",
  };
  let left = Span::styled(
    title,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::Indexed(54)));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Password prompt ─────────────────────────────────────────────────────────

fn draw_prompt(f: &mut Frame, area: Rect, attempt: &str) {
  let popup = centered(area, 50, 5);
  let block = Block::default()
    .title(" Dashboard ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));
  let inner = block.inner(popup);
  f.render_widget(Clear, popup);
  f.render_widget(block, popup);

  let masked = "•".repeat(attempt.chars().count());
  f.render_widget(
    Paragraph::new(vec![
      Line::from(PASSWORD_PROMPT),
      Line::from(""),
      Line::from(Span::styled(
        format!("{masked}_"),
        Style::default().fg(Color::Yellow),
      )),
    ]),
    inner,
  );
}

// ─── Status bar ──────────────────────────────────────────────────────────────

fn draw_status<S: SubmissionStore + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match app.screen {
    _ if app.prompt.is_some() => ("SENHA", "Enter confirmar  Esc cancelar"),
    Screen::Form => (
      "FORM",
      "Tab/↑↓ campos  Espaço marcar  ←→ opção  Ctrl-S enviar  F2 dashboard",
    ),
    Screen::Dashboard if app.selected.is_some() => (
      "DETALHE",
      "Esc fechar  o WhatsApp  q sair",
    ),
    Screen::Dashboard if app.filter_active => (
      "BUSCA",
      "Digite para filtrar  Esc cancelar  Enter selecionar",
    ),
    Screen::Dashboard => (
      "LISTA",
      "↑↓/jk navegar  Enter detalhe  / buscar  o WhatsApp  r recarregar  x sair  F2 form",
    ),
  };

  let (status, status_style) = match (app.screen, app.form.notice()) {
    (Screen::Form, Some(Notice::Success(m))) => (m.clone(), Style::default().fg(Color::Green)),
    (Screen::Form, Some(Notice::Error(m))) => (m.clone(), Style::default().fg(Color::Red)),
    _ if !app.status_msg.is_empty() => {
      (app.status_msg.clone(), Style::default().fg(Color::Yellow))
    }
    _ => (hints.to_string(), Style::default().fg(Color::DarkGray)),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), status_style);

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
