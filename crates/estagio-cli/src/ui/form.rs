//! Form screen: the opportunity description beside the application form.

use estagio_core::{
  schedule::{ScheduleInput, Weekday},
  store::SubmissionStore,
  submission::Course,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, FormItem};

const ABOUT: &str = "Estamos buscando estudantes talentosos e motivados para se \
                     juntarem à nossa equipe. Oferecemos um ambiente de \
                     aprendizado dinâmico, projetos desafiadores e a chance de \
                     crescer profissionalmente.";

const BENEFITS: [&str; 4] = [
  "Bolsa-auxílio compatível com o mercado",
  "Vale-transporte",
  "Lanche no local",
  "Mentoria com profissionais experientes",
];

const HOW_TO_APPLY: &str = "Preencha o formulário ao lado com atenção. \
                            Entraremos em contato com os candidatos \
                            selecionados para a próxima fase do processo \
                            seletivo. Boa sorte!";

/// Render the form screen into `area`.
pub fn draw<S: SubmissionStore + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_about(f, cols[0]);
  draw_form(f, cols[1], app);
}

// ─── Opportunity ─────────────────────────────────────────────────────────────

fn draw_about(f: &mut Frame, area: Rect) {
  let heading = Style::default()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

  let mut lines = vec![
    Line::from(Span::styled("Sobre a Oportunidade", heading)),
    Line::from(ABOUT),
    Line::from(""),
    Line::from(Span::styled("Benefícios:", heading)),
  ];
  lines.extend(BENEFITS.iter().map(|b| {
    Line::from(vec![
      Span::styled("  ✓ ", Style::default().fg(Color::Red)),
      Span::raw(*b),
    ])
  }));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled("Como se inscrever:", heading)));
  lines.push(Line::from(HOW_TO_APPLY));

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

// ─── Form ────────────────────────────────────────────────────────────────────

fn draw_form<S: SubmissionStore + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let form = app.form.form();
  let items = app.items();

  let mut lines: Vec<Line> = Vec::new();
  let mut focus_line = 0;

  for (i, item) in items.iter().enumerate() {
    let focused = i == app.focus;
    if focused {
      focus_line = lines.len();
    }
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };

    // Section headings ahead of grouped rows.
    match item {
      FormItem::Day(Weekday::Segunda) => {
        lines.push(Line::from(Span::styled(
          "  Dia e horário do seu curso",
          Style::default().fg(Color::Gray),
        )));
      }
      FormItem::Course(Course::Informatica) => {
        lines.push(Line::from(Span::styled(
          "  Cursos que já fez (selecione múltiplos)",
          Style::default().fg(Color::Gray),
        )));
      }
      _ => {}
    }

    let line = match *item {
      FormItem::FullName => text_row(marker, "Nome Completo", &form.full_name, cursor, label_style),
      FormItem::Phone => text_row(marker, "Telefone (com DDD)", form.phone(), cursor, label_style),
      FormItem::ScheduleText => {
        let text = match form.schedule() {
          ScheduleInput::FreeText(t) => t.as_str(),
          ScheduleInput::Weekly(_) => "",
        };
        if text.is_empty() && !focused {
          Line::from(vec![
            Span::styled(format!("{marker}Dia e horário do seu curso: "), label_style),
            Span::styled("Ex: Segunda a Sexta, 19h - 22h", Style::default().fg(Color::DarkGray)),
          ])
        } else {
          text_row(marker, "Dia e horário do seu curso", text, cursor, label_style)
        }
      }
      FormItem::Day(day) => {
        let checked = form.day(day).is_some_and(|d| d.checked);
        check_row(marker, &format!("  {day}"), checked, label_style)
      }
      FormItem::DayFrom(day) => {
        let value = form.day(day).map(|d| d.from.as_str()).unwrap_or_default();
        text_row(marker, "      das (HH:MM)", value, cursor, label_style)
      }
      FormItem::DayTo(day) => {
        let value = form.day(day).map(|d| d.to.as_str()).unwrap_or_default();
        text_row(marker, "      até (HH:MM)", value, cursor, label_style)
      }
      FormItem::SchoolName => {
        text_row(marker, "Nome da Escola/Faculdade", &form.school_name, cursor, label_style)
      }
      FormItem::Course(course) => {
        check_row(marker, &format!("  {course}"), form.is_course_checked(course), label_style)
      }
      FormItem::OtherCourse => {
        text_row(marker, "      Qual outro curso?", form.other_course_name(), cursor, label_style)
      }
      FormItem::Availability => {
        let value = form
          .availability
          .map(|a| a.to_string())
          .unwrap_or_else(|| "Selecione...".to_string());
        Line::from(vec![
          Span::styled(format!("{marker}Horário disponível para estagiar: "), label_style),
          Span::raw(format!("‹ {value} ›")),
        ])
      }
      FormItem::Submit => {
        let (label, style) = if app.form.is_busy() {
          ("[ Enviando... ]", Style::default().fg(Color::DarkGray))
        } else if focused {
          ("[ Enviar Inscrição ]", Style::default().fg(Color::Black).bg(Color::Magenta))
        } else {
          ("[ Enviar Inscrição ]", Style::default().fg(Color::Magenta))
        };
        lines.push(Line::from(""));
        Line::from(vec![Span::raw(marker), Span::styled(label, style)])
      }
    };
    lines.push(line);

    if let Some(message) = item.field().and_then(|field| app.form.errors().message(field)) {
      lines.push(Line::from(Span::styled(
        format!("    {message}"),
        Style::default().fg(Color::Red),
      )));
    }
  }

  let block = Block::default()
    .title(" Inscrição ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Keep the focused row in view.
  let visible = area.height.saturating_sub(2) as usize;
  let scroll = focus_line.saturating_sub(visible.saturating_sub(2)) as u16;

  f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn text_row<'a>(
  marker: &'a str,
  label: &'a str,
  value: &str,
  cursor: &'a str,
  label_style: Style,
) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{marker}{label}: "), label_style),
    Span::raw(format!("{value}{cursor}")),
  ])
}

fn check_row<'a>(marker: &'a str, label: &str, checked: bool, label_style: Style) -> Line<'a> {
  let mark = if checked { "[x]" } else { "[ ]" };
  Line::from(vec![
    Span::raw(marker),
    Span::styled(format!("{mark}{label}"), label_style),
  ])
}
