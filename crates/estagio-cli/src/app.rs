//! Application state machine and event dispatcher.

use std::{
  io,
  process::{Command, Stdio},
  sync::Arc,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use estagio_core::{
  Error,
  form::{ApplicationForm, Field, FormController},
  gate::Session,
  phone, reader,
  schedule::{ScheduleInput, ScheduleMode, Weekday},
  store::SubmissionStore,
  submission::{Availability, Course, Submission},
  writer,
};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::IntoEnumIterator as _;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const PASSWORD_PROMPT: &str = "Digite a senha para acessar o dashboard:";
pub const WRONG_PASSWORD_MESSAGE: &str = "Senha incorreta!";
pub const LOGOUT_MESSAGE: &str = "Você saiu com segurança!";
pub const LOAD_FAILURE_MESSAGE: &str = "Não foi possível carregar os dados.";
pub const LOADING_MESSAGE: &str = "Carregando inscrições…";
pub const SENDING_MESSAGE: &str = "Enviando…";

// ─── Screen ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Opportunity description and the application form.
  Form,
  /// Submissions table; the detail opens as a modal on top of it.
  Dashboard,
}

// ─── Form rows ───────────────────────────────────────────────────────────────

/// One focusable row of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItem {
  FullName,
  Phone,
  ScheduleText,
  Day(Weekday),
  DayFrom(Weekday),
  DayTo(Weekday),
  SchoolName,
  Course(Course),
  OtherCourse,
  Availability,
  Submit,
}

impl FormItem {
  /// The validated field this row edits.
  pub fn field(self) -> Option<Field> {
    match self {
      FormItem::FullName => Some(Field::FullName),
      FormItem::Phone => Some(Field::Phone),
      FormItem::ScheduleText => Some(Field::CourseSchedule),
      FormItem::DayFrom(day) => Some(Field::DayFrom(day)),
      FormItem::DayTo(day) => Some(Field::DayTo(day)),
      FormItem::SchoolName => Some(Field::SchoolName),
      FormItem::Availability => Some(Field::Availability),
      FormItem::Day(_) | FormItem::Course(_) | FormItem::OtherCourse | FormItem::Submit => None,
    }
  }

  fn is_text(self) -> bool {
    matches!(
      self,
      FormItem::FullName
        | FormItem::Phone
        | FormItem::ScheduleText
        | FormItem::DayFrom(_)
        | FormItem::DayTo(_)
        | FormItem::SchoolName
        | FormItem::OtherCourse
    )
  }
}

/// The rows currently shown for `form`, top to bottom. Time inputs appear only
/// under checked days, and the other-course input only while the sentinel
/// course is checked.
pub fn form_items(form: &ApplicationForm) -> Vec<FormItem> {
  let mut items = vec![FormItem::FullName, FormItem::Phone];

  match form.schedule() {
    ScheduleInput::FreeText(_) => items.push(FormItem::ScheduleText),
    ScheduleInput::Weekly(_) => {
      for day in Weekday::iter() {
        items.push(FormItem::Day(day));
        if form.day(day).is_some_and(|d| d.checked) {
          items.push(FormItem::DayFrom(day));
          items.push(FormItem::DayTo(day));
        }
      }
    }
  }

  items.push(FormItem::SchoolName);
  for course in Course::iter() {
    items.push(FormItem::Course(course));
    if course == Course::Outros && form.shows_other_course() {
      items.push(FormItem::OtherCourse);
    }
  }
  items.push(FormItem::Availability);
  items.push(FormItem::Submit);
  items
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S: SubmissionStore> {
  /// Current screen.
  pub screen: Screen,

  /// Form state and submit lifecycle.
  pub form: FormController<S>,

  /// Index into [`form_items`] of the focused row.
  pub focus: usize,

  /// In-flight write, if any.
  pending: Option<JoinHandle<estagio_core::Result<Submission>>>,

  /// Dashboard access for this run of the client.
  pub session: Session,

  /// Password being typed; `Some` while the prompt is open.
  pub prompt: Option<String>,

  /// Submissions loaded for the dashboard, newest first.
  pub submissions: Vec<Submission>,

  /// Current fuzzy-filter string.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* submission list.
  pub list_cursor: usize,

  /// Submission shown in the detail modal.
  pub selected: Option<Uuid>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl<S: SubmissionStore + 'static> App<S> {
  pub fn new(store: Arc<S>, session: Session, mode: ScheduleMode) -> Self {
    Self {
      screen: Screen::Form,
      form: FormController::new(store, mode),
      focus: 0,
      pending: None,
      session,
      prompt: None,
      submissions: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      selected: None,
      status_msg: String::new(),
    }
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  pub fn items(&self) -> Vec<FormItem> { form_items(self.form.form()) }

  pub fn focused_item(&self) -> Option<FormItem> {
    self.items().get(self.focus).copied()
  }

  pub fn is_submitting(&self) -> bool { self.pending.is_some() }

  fn clamp_focus(&mut self) {
    let len = self.items().len();
    self.focus = self.focus.min(len.saturating_sub(1));
  }

  /// Validate and hand the write to a background task. Ignored while a
  /// previous submit is in flight.
  pub fn start_submit(&mut self) {
    match self.form.begin_submit() {
      Ok(input) => {
        let store = Arc::clone(self.form.store());
        self.pending = Some(tokio::spawn(async move {
          writer::write_submission(store.as_ref(), input).await
        }));
        self.status_msg = SENDING_MESSAGE.into();
      }
      Err(Error::Validation(errors)) => {
        if let Some(i) = self
          .items()
          .iter()
          .position(|item| item.field().is_some_and(|f| errors.get(f).is_some()))
        {
          self.focus = i;
        }
        self.status_msg = errors.to_string();
      }
      Err(_) => {}
    }
  }

  /// Collect the outcome of a finished background write.
  pub async fn poll_submit(&mut self) {
    let Some(handle) = self.pending.take_if(|h| h.is_finished()) else {
      return;
    };
    let result = handle.await.unwrap_or_else(|e| {
      tracing::error!(error = %e, "submit task failed");
      Err(Error::WriteFailure)
    });
    if self.form.finish_submit(result).is_ok() {
      self.focus = 0;
    }
    self.status_msg.clear();
  }

  fn edit_text(&mut self, item: FormItem, edit: impl FnOnce(&mut String)) {
    let form = self.form.form_mut();
    match item {
      FormItem::FullName => edit(&mut form.full_name),
      FormItem::SchoolName => edit(&mut form.school_name),
      FormItem::Phone => {
        let mut text = form.phone().to_owned();
        edit(&mut text);
        form.set_phone(&text);
      }
      FormItem::ScheduleText => {
        if let ScheduleInput::FreeText(current) = form.schedule() {
          let mut text = current.clone();
          edit(&mut text);
          form.set_schedule_text(&text);
        }
      }
      FormItem::DayFrom(day) => {
        let mut text = form.day(day).map(|d| d.from.clone()).unwrap_or_default();
        edit(&mut text);
        form.set_day_from(day, &text);
      }
      FormItem::DayTo(day) => {
        let mut text = form.day(day).map(|d| d.to.clone()).unwrap_or_default();
        edit(&mut text);
        form.set_day_to(day, &text);
      }
      FormItem::OtherCourse => {
        let mut text = form.other_course_name().to_owned();
        edit(&mut text);
        form.set_other_course_name(&text);
      }
      _ => {}
    }
  }

  fn backspace(&mut self, item: FormItem) {
    if item == FormItem::Phone {
      // Delete a digit, not a mask character.
      let form = self.form.form_mut();
      let mut digits = phone::strip(form.phone());
      digits.pop();
      form.set_phone(&digits);
    } else {
      self.edit_text(item, |t| {
        t.pop();
      });
    }
  }

  /// Activate a checkbox or cycle a choice. Returns `false` if `item` is not
  /// toggleable.
  fn toggle(&mut self, item: FormItem, forward: bool) -> bool {
    let form = self.form.form_mut();
    match item {
      FormItem::Day(day) => form.toggle_day(day),
      FormItem::Course(course) => form.toggle_course(course),
      FormItem::Availability => form.availability = cycle(form.availability, forward),
      _ => return false,
    }
    self.clamp_focus();
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
      self.start_submit();
      return Ok(true);
    }

    let Some(item) = self.focused_item() else {
      self.clamp_focus();
      return Ok(true);
    };

    match key.code {
      KeyCode::Tab | KeyCode::Down => {
        if self.focus + 1 < self.items().len() {
          self.focus += 1;
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = self.focus.saturating_sub(1);
      }
      KeyCode::Esc => {
        self.form.take_notice();
        self.status_msg.clear();
      }
      KeyCode::Enter => {
        if item == FormItem::Submit {
          self.start_submit();
        } else if !self.toggle(item, true) && self.focus + 1 < self.items().len() {
          self.focus += 1;
        }
      }
      KeyCode::Left if item == FormItem::Availability => {
        self.toggle(item, false);
      }
      KeyCode::Right if item == FormItem::Availability => {
        self.toggle(item, true);
      }
      KeyCode::Char(' ') if !item.is_text() => {
        self.toggle(item, true);
      }
      KeyCode::Char(c) if item.is_text() => {
        self.edit_text(item, |t| t.push(c));
      }
      KeyCode::Backspace if item.is_text() => self.backspace(item),
      _ => {}
    }
    Ok(true)
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  /// Enter the dashboard, prompting for the password while locked.
  pub async fn open_dashboard(&mut self) {
    if self.session.is_unlocked() {
      self.screen = Screen::Dashboard;
      self.reload().await;
    } else {
      self.prompt = Some(String::new());
    }
  }

  /// Reload submissions through the reader. A failure leaves an empty list.
  pub async fn reload(&mut self) {
    self.status_msg = LOADING_MESSAGE.into();
    let result =
      reader::load_submissions(&self.session, self.form.store().as_ref()).await;
    self.list_cursor = 0;
    self.selected = None;
    match result {
      Ok(list) => {
        self.submissions = list;
        self.status_msg.clear();
      }
      Err(Error::Locked) => {
        self.submissions.clear();
        self.screen = Screen::Form;
        self.prompt = Some(String::new());
        self.status_msg.clear();
      }
      Err(_) => {
        self.submissions.clear();
        self.status_msg = LOAD_FAILURE_MESSAGE.into();
      }
    }
  }

  /// Lock the session and return to the form.
  pub fn logout(&mut self) {
    self.session.logout();
    self.submissions.clear();
    self.selected = None;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
    self.screen = Screen::Form;
    self.status_msg = LOGOUT_MESSAGE.into();
  }

  /// Returns submissions that match the current filter query.
  pub fn filtered_submissions(&self) -> Vec<&Submission> {
    if self.filter.is_empty() {
      return self.submissions.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .submissions
      .iter()
      .filter(|s| matcher.fuzzy_match(&s.full_name, &self.filter).is_some())
      .collect()
  }

  /// The submission under the list cursor in the filtered view, if any.
  pub fn cursor_submission(&self) -> Option<&Submission> {
    self.filtered_submissions().get(self.list_cursor).copied()
  }

  /// The submission open in the detail modal.
  pub fn selected_submission(&self) -> Option<&Submission> {
    let id = self.selected?;
    self.submissions.iter().find(|s| s.id == id)
  }

  fn open_whatsapp(&mut self) {
    let target = self.selected_submission().or_else(|| self.cursor_submission());
    let Some(url) = target.map(|s| phone::whatsapp_link(&s.phone)) else {
      return;
    };
    match open_in_browser(&url) {
      Ok(()) => self.status_msg = format!("Abrindo {url}"),
      Err(e) => {
        tracing::warn!(%url, error = %e, "failed to open browser");
        self.status_msg = format!("Não foi possível abrir {url}");
      }
    }
  }

  async fn handle_prompt_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let Some(attempt) = self.prompt.as_mut() else {
      return Ok(true);
    };
    match key.code {
      KeyCode::Esc => self.prompt = None,
      KeyCode::Backspace => {
        attempt.pop();
      }
      KeyCode::Char(c) => attempt.push(c),
      KeyCode::Enter => {
        let attempt = std::mem::take(attempt);
        self.prompt = None;
        if self.session.unlock(&attempt).is_ok() {
          self.screen = Screen::Dashboard;
          self.reload().await;
        } else {
          self.screen = Screen::Form;
          self.status_msg = WRONG_PASSWORD_MESSAGE.into();
        }
      }
      _ => {}
    }
    Ok(true)
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Open the detail straight away if there's exactly one match.
        let only = match self.filtered_submissions().as_slice() {
          [one] => Some(one.id),
          _ => None,
        };
        if only.is_some() {
          self.selected = only;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_dashboard_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if self.selected.is_some() {
      match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Left | KeyCode::Char('h') => {
          self.selected = None;
        }
        KeyCode::Char('o') => self.open_whatsapp(),
        _ => {}
      }
      return Ok(true);
    }

    if self.filter_active {
      return self.handle_filter_key(key);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc => self.screen = Screen::Form,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_submissions().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        self.selected = self.cursor_submission().map(|s| s.id);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('o') => self.open_whatsapp(),
      KeyCode::Char('r') => self.reload().await,
      KeyCode::Char('x') => self.logout(),
      _ => {}
    }
    Ok(true)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.prompt.is_some() {
      return self.handle_prompt_key(key).await;
    }

    if key.code == KeyCode::F(2) {
      match self.screen {
        Screen::Form => self.open_dashboard().await,
        Screen::Dashboard => self.screen = Screen::Form,
      }
      return Ok(true);
    }

    match self.screen {
      Screen::Form => self.handle_form_key(key).await,
      Screen::Dashboard => self.handle_dashboard_key(key).await,
    }
  }
}

/// Step through the availability options, wrapping at either end.
fn cycle(current: Option<Availability>, forward: bool) -> Option<Availability> {
  let options: Vec<_> = Availability::iter().collect();
  let next = match (current.and_then(|a| options.iter().position(|o| *o == a)), forward) {
    (None, true) => 0,
    (None, false) => options.len() - 1,
    (Some(i), true) => (i + 1) % options.len(),
    (Some(i), false) => (i + options.len() - 1) % options.len(),
  };
  options.get(next).copied()
}

/// Open `url` with the platform's default handler, detached from the terminal.
fn open_in_browser(url: &str) -> io::Result<()> {
  #[cfg(target_os = "macos")]
  let mut cmd = Command::new("open");
  #[cfg(target_os = "windows")]
  let mut cmd = {
    let mut c = Command::new("cmd");
    c.args(["/C", "start", ""]);
    c
  };
  #[cfg(not(any(target_os = "macos", target_os = "windows")))]
  let mut cmd = Command::new("xdg-open");

  cmd
    .arg(url)
    .stdin(Stdio::null())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .spawn()
    .map(|_| ())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone as _, Utc};
  use estagio_core::{
    form::{FieldError, Notice, SUCCESS_MESSAGE},
    gate::AdminSecret,
    memory::MemoryStore,
    schedule::CourseSchedule,
  };

  use super::*;

  const SECRET: &str = "s3nha.2025";

  fn app(store: &MemoryStore) -> App<MemoryStore> {
    App::new(
      Arc::new(store.clone()),
      Session::new(AdminSecret::new(SECRET)),
      ScheduleMode::Weekly,
    )
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  async fn press(app: &mut App<MemoryStore>, code: KeyCode) -> bool {
    app.handle_key(key(code)).await.unwrap()
  }

  async fn type_text(app: &mut App<MemoryStore>, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c)).await;
    }
  }

  fn focus(app: &mut App<MemoryStore>, item: FormItem) {
    app.focus = app.items().iter().position(|i| *i == item).unwrap();
  }

  async fn settle(app: &mut App<MemoryStore>) {
    while app.is_submitting() {
      tokio::task::yield_now().await;
      app.poll_submit().await;
    }
  }

  fn stored(name: &str, created_at: chrono::DateTime<Utc>) -> Submission {
    Submission {
      id: Uuid::new_v4(),
      full_name: name.into(),
      phone: "11987654321".into(),
      school_name: "Escola X".into(),
      completed_courses: Default::default(),
      other_course_name: None,
      availability: Availability::Tarde,
      course_schedule: CourseSchedule::default(),
      created_at,
    }
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  #[test]
  fn other_course_row_follows_sentinel() {
    let mut form = ApplicationForm::default();
    assert!(!form_items(&form).contains(&FormItem::OtherCourse));
    form.toggle_course(Course::Outros);
    let items = form_items(&form);
    let outros = items.iter().position(|i| *i == FormItem::Course(Course::Outros)).unwrap();
    assert_eq!(items[outros + 1], FormItem::OtherCourse);
  }

  #[test]
  fn time_rows_only_under_checked_days() {
    let mut form = ApplicationForm::new(ScheduleMode::Weekly);
    assert!(!form_items(&form).contains(&FormItem::DayFrom(Weekday::Quarta)));
    form.toggle_day(Weekday::Quarta);
    let items = form_items(&form);
    assert!(items.contains(&FormItem::DayFrom(Weekday::Quarta)));
    assert!(items.contains(&FormItem::DayTo(Weekday::Quarta)));

    let free = ApplicationForm::new(ScheduleMode::FreeText);
    assert!(form_items(&free).contains(&FormItem::ScheduleText));
    assert!(!form_items(&free).contains(&FormItem::Day(Weekday::Segunda)));
  }

  #[test]
  fn availability_cycles_both_ways() {
    assert_eq!(cycle(None, true), Some(Availability::Manha));
    assert_eq!(cycle(None, false), Some(Availability::Flexivel));
    assert_eq!(cycle(Some(Availability::Flexivel), true), Some(Availability::Manha));
    assert_eq!(cycle(Some(Availability::Tarde), false), Some(Availability::Manha));
  }

  #[tokio::test]
  async fn phone_is_masked_while_typing() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    focus(&mut app, FormItem::Phone);
    type_text(&mut app, "11987654321").await;
    assert_eq!(app.form.form().phone(), "(11) 98765-4321");

    press(&mut app, KeyCode::Backspace).await;
    assert_eq!(app.form.form().phone(), "(11) 98765-432");
  }

  #[tokio::test]
  async fn empty_submit_focuses_first_error_and_writes_nothing() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    focus(&mut app, FormItem::Submit);
    press(&mut app, KeyCode::Enter).await;

    assert!(!app.is_submitting());
    assert_eq!(app.focused_item(), Some(FormItem::FullName));
    assert_eq!(app.form.errors().get(Field::FullName), Some(FieldError::Required));
    assert!(store.is_empty());
  }

  #[tokio::test]
  async fn filled_form_submits_in_background_and_resets() {
    let store = MemoryStore::new();
    let mut app = app(&store);

    type_text(&mut app, "Ana Silva").await;
    press(&mut app, KeyCode::Tab).await;
    type_text(&mut app, "11987654321").await;
    focus(&mut app, FormItem::SchoolName);
    type_text(&mut app, "Escola X").await;
    focus(&mut app, FormItem::Course(Course::Excel));
    press(&mut app, KeyCode::Char(' ')).await;
    focus(&mut app, FormItem::Availability);
    press(&mut app, KeyCode::Right).await;

    app
      .handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
      .await
      .unwrap();
    assert!(app.is_submitting());
    // A second submit while busy is ignored.
    app.start_submit();
    settle(&mut app).await;

    let records = store.snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_name, "Ana Silva");
    assert_eq!(records[0].phone, "11987654321");
    assert_eq!(records[0].availability, Availability::Manha);
    assert_eq!(app.form.notice(), Some(&Notice::Success(SUCCESS_MESSAGE.into())));
    assert_eq!(app.form.form(), &ApplicationForm::new(ScheduleMode::Weekly));
    assert_eq!(app.focus, 0);
  }

  #[tokio::test]
  async fn failed_submit_keeps_values() {
    let store = MemoryStore::new();
    store.set_fail_writes(true);
    let mut app = app(&store);
    let form = app.form.form_mut();
    form.full_name = "Ana Silva".into();
    form.set_phone("1133334444");
    form.school_name = "Escola X".into();
    form.availability = Some(Availability::Tarde);

    app.start_submit();
    settle(&mut app).await;

    assert!(matches!(app.form.notice(), Some(Notice::Error(_))));
    assert_eq!(app.form.form().full_name, "Ana Silva");
    assert!(store.is_empty());
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn wrong_password_returns_to_form() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    press(&mut app, KeyCode::F(2)).await;
    assert!(app.prompt.is_some());

    type_text(&mut app, "errada").await;
    press(&mut app, KeyCode::Enter).await;

    assert!(app.prompt.is_none());
    assert_eq!(app.screen, Screen::Form);
    assert_eq!(app.status_msg, WRONG_PASSWORD_MESSAGE);
    assert!(!app.session.is_unlocked());
  }

  #[tokio::test]
  async fn empty_prompt_without_configured_password_stays_locked() {
    let store = MemoryStore::new();
    store.seed(stored("Ana Silva", Utc::now()));
    let mut app = App::new(
      Arc::new(store.clone()),
      Session::new(AdminSecret::new(String::new())),
      ScheduleMode::Weekly,
    );

    press(&mut app, KeyCode::F(2)).await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.screen, Screen::Form);
    assert_eq!(app.status_msg, WRONG_PASSWORD_MESSAGE);
    assert!(!app.session.is_unlocked());
    assert!(app.submissions.is_empty());
  }

  #[tokio::test]
  async fn unlock_loads_newest_first_and_opens_detail() {
    let store = MemoryStore::new();
    let t1 = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    store.seed(stored("Primeira", t1));
    store.seed(stored("Segunda", t1 + Duration::hours(3)));
    let mut app = app(&store);

    press(&mut app, KeyCode::F(2)).await;
    type_text(&mut app, SECRET).await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.screen, Screen::Dashboard);
    let names: Vec<_> = app.submissions.iter().map(|s| s.full_name.as_str()).collect();
    assert_eq!(names, ["Segunda", "Primeira"]);

    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.selected_submission().unwrap().full_name, "Primeira");

    press(&mut app, KeyCode::Esc).await;
    assert!(app.selected.is_none());
  }

  #[tokio::test]
  async fn unlocked_session_skips_prompt_until_logout() {
    let store = MemoryStore::new();
    let mut app = app(&store);
    app.session.unlock(SECRET).unwrap();

    press(&mut app, KeyCode::F(2)).await;
    assert!(app.prompt.is_none());
    assert_eq!(app.screen, Screen::Dashboard);

    press(&mut app, KeyCode::Char('x')).await;
    assert_eq!(app.screen, Screen::Form);
    assert_eq!(app.status_msg, LOGOUT_MESSAGE);

    press(&mut app, KeyCode::F(2)).await;
    assert!(app.prompt.is_some());
  }

  #[tokio::test]
  async fn read_failure_shows_empty_list() {
    let store = MemoryStore::new();
    store.seed(stored("Ana Silva", Utc::now()));
    store.set_fail_reads(true);
    let mut app = app(&store);
    app.session.unlock(SECRET).unwrap();

    app.open_dashboard().await;
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(app.submissions.is_empty());
    assert_eq!(app.status_msg, LOAD_FAILURE_MESSAGE);
  }

  #[tokio::test]
  async fn filter_narrows_by_name() {
    let store = MemoryStore::new();
    store.seed(stored("Ana Silva", Utc::now()));
    store.seed(stored("Bruno Costa", Utc::now()));
    let mut app = app(&store);
    app.session.unlock(SECRET).unwrap();
    app.open_dashboard().await;

    press(&mut app, KeyCode::Char('/')).await;
    type_text(&mut app, "bruno").await;
    assert_eq!(app.filtered_submissions().len(), 1);

    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.selected_submission().unwrap().full_name, "Bruno Costa");
  }
}
