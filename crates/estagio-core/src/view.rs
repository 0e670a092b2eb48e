//! Dashboard view models: one table row per submission and a labelled detail
//! panel. Rendering front-ends only lay these out; every formatting decision
//! (phone mask, dates, placeholders) is made here.

use std::fmt::Display;

use chrono::TimeZone;
use uuid::Uuid;

use crate::{
  phone,
  schedule::CourseSchedule,
  submission::Submission,
};

pub const LIST_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";
pub const DETAIL_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const NO_SCHEDULE: &str = "Não informado.";
pub const NO_COURSES: &str = "Nenhum curso informado.";
pub const NO_SUBMISSIONS: &str = "Nenhuma inscrição encontrada.";

// ─── List ────────────────────────────────────────────────────────────────────

/// One table row. Column order: name, phone, availability, date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
  pub id:           Uuid,
  pub full_name:    String,
  /// Masked phone, re-derived from the stored digits.
  pub phone:        String,
  /// Messaging deep link for the phone column.
  pub phone_link:   String,
  pub availability: String,
  pub created_at:   String,
}

impl ListRow {
  /// Build a row, rendering the creation date in `tz`.
  pub fn new<Tz>(submission: &Submission, tz: &Tz) -> Self
  where
    Tz: TimeZone,
    Tz::Offset: Display,
  {
    Self {
      id:           submission.id,
      full_name:    submission.full_name.clone(),
      phone:        phone::format_display(&submission.phone),
      phone_link:   phone::whatsapp_link(&submission.phone),
      availability: submission.availability.to_string(),
      created_at:   submission
        .created_at
        .with_timezone(tz)
        .format(LIST_DATE_FORMAT)
        .to_string(),
    }
  }
}

// ─── Detail ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailBody {
  /// A single line.
  Text(String),
  /// One bullet per entry.
  Bullets(Vec<String>),
  /// Inline chips.
  Tags(Vec<String>),
  /// Placeholder for an empty optional collection.
  Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
  pub label: &'static str,
  pub body:  DetailBody,
}

/// The modal detail panel for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
  pub id:       Uuid,
  pub sections: Vec<DetailSection>,
}

impl DetailView {
  pub const TITLE: &'static str = "Detalhes da Inscrição";

  pub fn new<Tz>(submission: &Submission, tz: &Tz) -> Self
  where
    Tz: TimeZone,
    Tz::Offset: Display,
  {
    let section = |label: &'static str, body: DetailBody| DetailSection { label, body };

    let created_at = submission
      .created_at
      .with_timezone(tz)
      .format(DETAIL_DATE_FORMAT)
      .to_string();

    Self {
      id:       submission.id,
      sections: vec![
        section("Nome Completo", DetailBody::Text(submission.full_name.clone())),
        section(
          "Telefone",
          DetailBody::Text(phone::format_display(&submission.phone)),
        ),
        section(
          "Instituição de Ensino",
          DetailBody::Text(submission.school_name.clone()),
        ),
        section("Horário do Curso", schedule_body(&submission.course_schedule)),
        section("Cursos Concluídos", courses_body(submission)),
        section(
          "Disponibilidade para Estágio",
          DetailBody::Text(submission.availability.to_string()),
        ),
        section("Data da Inscrição", DetailBody::Text(created_at)),
      ],
    }
  }

  pub fn section(&self, label: &str) -> Option<&DetailBody> {
    self
      .sections
      .iter()
      .find(|s| s.label == label)
      .map(|s| &s.body)
  }
}

fn schedule_body(schedule: &CourseSchedule) -> DetailBody {
  if schedule.is_empty() {
    return DetailBody::Empty(NO_SCHEDULE);
  }
  match schedule {
    CourseSchedule::FreeText(text) => DetailBody::Text(text.trim().to_owned()),
    CourseSchedule::Weekly(days) => DetailBody::Bullets(
      days
        .iter()
        .map(|(day, range)| format!("{day}: {range}"))
        .collect(),
    ),
  }
}

fn courses_body(submission: &Submission) -> DetailBody {
  if submission.completed_courses.is_empty() {
    return DetailBody::Empty(NO_COURSES);
  }
  let mut tags: Vec<String> = submission
    .completed_courses
    .iter()
    .map(ToString::to_string)
    .collect();
  if let Some(other) = submission.other_course() {
    tags.push(other.to_owned());
  }
  DetailBody::Tags(tags)
}

#[cfg(test)]
mod tests {
  use std::collections::{BTreeMap, BTreeSet};

  use chrono::{FixedOffset, NaiveTime, TimeZone as _, Utc};

  use super::*;
  use crate::{
    schedule::{TimeRange, Weekday},
    submission::{Availability, Course},
  };

  fn submission() -> Submission {
    Submission {
      id:                Uuid::nil(),
      full_name:         "Ana Silva".into(),
      phone:             "11987654321".into(),
      school_name:       "Escola X".into(),
      completed_courses: BTreeSet::new(),
      other_course_name: None,
      availability:      Availability::Manha,
      course_schedule:   CourseSchedule::default(),
      created_at:        Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap(),
    }
  }

  fn hm(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }

  #[test]
  fn list_row_columns() {
    let row = ListRow::new(&submission(), &Utc);
    assert_eq!(row.full_name, "Ana Silva");
    assert_eq!(row.phone, "(11) 98765-4321");
    assert_eq!(row.phone_link, "https://wa.me/5511987654321");
    assert_eq!(row.availability, "Manhã");
    assert_eq!(row.created_at, "07/03/2025 14:05");
  }

  #[test]
  fn list_row_date_uses_display_time_zone() {
    let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
    let row = ListRow::new(&submission(), &sao_paulo);
    assert_eq!(row.created_at, "07/03/2025 11:05");
  }

  #[test]
  fn detail_sections_in_order() {
    let view = DetailView::new(&submission(), &Utc);
    let labels: Vec<_> = view.sections.iter().map(|s| s.label).collect();
    assert_eq!(labels, [
      "Nome Completo",
      "Telefone",
      "Instituição de Ensino",
      "Horário do Curso",
      "Cursos Concluídos",
      "Disponibilidade para Estágio",
      "Data da Inscrição",
    ]);
    assert_eq!(
      view.section("Data da Inscrição"),
      Some(&DetailBody::Text("07/03/2025 14:05:09".into()))
    );
  }

  #[test]
  fn empty_collections_show_placeholders() {
    let view = DetailView::new(&submission(), &Utc);
    assert_eq!(
      view.section("Horário do Curso"),
      Some(&DetailBody::Empty(NO_SCHEDULE))
    );
    assert_eq!(
      view.section("Cursos Concluídos"),
      Some(&DetailBody::Empty(NO_COURSES))
    );
  }

  #[test]
  fn weekly_schedule_renders_one_bullet_per_day() {
    let mut s = submission();
    let mut days = BTreeMap::new();
    days.insert(Weekday::Quarta, TimeRange { from: hm(19, 0), to: hm(22, 0) });
    days.insert(Weekday::Segunda, TimeRange { from: hm(7, 30), to: hm(11, 0) });
    s.course_schedule = CourseSchedule::Weekly(days);

    let view = DetailView::new(&s, &Utc);
    assert_eq!(
      view.section("Horário do Curso"),
      Some(&DetailBody::Bullets(vec![
        "Segunda: 07:30–11:00".into(),
        "Quarta: 19:00–22:00".into(),
      ]))
    );
  }

  #[test]
  fn free_text_schedule_renders_single_line() {
    let mut s = submission();
    s.course_schedule = CourseSchedule::FreeText("Segunda a Sexta, 19h - 22h".into());
    let view = DetailView::new(&s, &Utc);
    assert_eq!(
      view.section("Horário do Curso"),
      Some(&DetailBody::Text("Segunda a Sexta, 19h - 22h".into()))
    );
  }

  #[test]
  fn other_course_shown_only_with_sentinel() {
    let mut s = submission();
    s.completed_courses = [Course::Excel].into();
    s.other_course_name = Some("Curso Z".into());
    let view = DetailView::new(&s, &Utc);
    assert_eq!(
      view.section("Cursos Concluídos"),
      Some(&DetailBody::Tags(vec!["Excel".into()]))
    );

    s.completed_courses.insert(Course::Outros);
    let view = DetailView::new(&s, &Utc);
    assert_eq!(
      view.section("Cursos Concluídos"),
      Some(&DetailBody::Tags(vec![
        "Excel".into(),
        "Outros".into(),
        "Curso Z".into(),
      ]))
    );
  }
}
