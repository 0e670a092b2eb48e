//! Detail modal drawn over the submissions table.

use chrono::Local;
use estagio_core::{
  phone,
  submission::Submission,
  view::{DetailBody, DetailView},
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered;

/// Render the detail modal for `submission`, centred in `area`.
pub fn draw(f: &mut Frame, area: Rect, submission: &Submission) {
  let view = DetailView::new(submission, &Local);

  let mut lines: Vec<Line> = Vec::new();
  for section in &view.sections {
    lines.push(Line::from(Span::styled(
      section.label,
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )));
    match &section.body {
      DetailBody::Text(text) => lines.push(Line::from(format!("  {text}"))),
      DetailBody::Bullets(items) => {
        lines.extend(items.iter().map(|item| Line::from(format!("  • {item}"))));
      }
      DetailBody::Tags(tags) => {
        let mut spans = vec![Span::raw("  ")];
        for tag in tags {
          spans.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(Color::Black).bg(Color::Magenta),
          ));
          spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
      }
      DetailBody::Empty(placeholder) => lines.push(Line::from(Span::styled(
        format!("  {placeholder}"),
        Style::default().fg(Color::DarkGray),
      ))),
    }
    lines.push(Line::from(""));
  }
  lines.push(Line::from(Span::styled(
    phone::whatsapp_link(&submission.phone),
    Style::default().fg(Color::DarkGray),
  )));

  let height = lines.len() as u16 + 2;
  let popup = centered(area, 70, height);
  let block = Block::default()
    .title(format!(" {} ", DetailView::TITLE))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);

  f.render_widget(Clear, popup);
  f.render_widget(block, popup);
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
