//! Submissions table.

use chrono::Local;
use estagio_core::{
  store::SubmissionStore,
  view::{ListRow, NO_SUBMISSIONS},
};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::App;

/// Render the submissions table into `area`.
pub fn draw<S: SubmissionStore + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let filtered = app.filtered_submissions();
  let total = app.submissions.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Inscrições ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Inscrições ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar at the bottom of the inner area.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if filtered.is_empty() {
    f.render_widget(
      Paragraph::new(NO_SUBMISSIONS).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let rows: Vec<Row> = filtered
    .iter()
    .map(|s| {
      let row = ListRow::new(s, &Local);
      Row::new(vec![
        Cell::from(row.full_name),
        Cell::from(format!("{} ↗", row.phone)).style(Style::default().fg(Color::Cyan)),
        Cell::from(row.availability),
        Cell::from(row.created_at),
      ])
    })
    .collect();

  let header = Row::new(vec![
    "Nome Completo",
    "Telefone",
    "Disponibilidade (Estágio)",
    "Data de Inscrição",
  ])
  .style(
    Style::default()
      .fg(Color::Gray)
      .add_modifier(Modifier::BOLD),
  );

  let widths = [
    Constraint::Percentage(34),
    Constraint::Length(20),
    Constraint::Percentage(26),
    Constraint::Length(18),
  ];

  let mut state = TableState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner_area,
    &mut state,
  );
}
