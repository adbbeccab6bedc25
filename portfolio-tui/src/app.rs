use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use log::info;
use portfolio::comment::{CommentQuery, SortOption};
use portfolio::config::PortfolioConfig;
use portfolio::fact;
use portfolio::render::{Element, InputField, MemoryTarget};
use portfolio::theme::{BackgroundTheme, ThemeCursor};
use portfolio::{CommentView, ConfigError, FetchError, HttpBackend};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Comment,
    Rename,
    MaxCount,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Comment => "New comment",
            FormKind::Rename => "Change display name",
            FormKind::MaxCount => "Max comments (empty for all)",
        }
    }
}

/// Modal text form. Enter submits, Tab/arrows move between fields.
pub struct InputForm {
    pub kind: FormKind,
    pub fields: Vec<(&'static str, String)>,
    pub focus: usize,
}

impl InputForm {
    fn new(kind: FormKind, fields: Vec<(&'static str, String)>) -> Self {
        Self { kind, fields, focus: 0 }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn input_char(&mut self, c: char) {
        if let Some((_, value)) = self.fields.get_mut(self.focus) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some((_, value)) = self.fields.get_mut(self.focus) {
            value.pop();
        }
    }

    fn value(&self, index: usize) -> String {
        self.fields.get(index).map(|(_, v)| v.clone()).unwrap_or_default()
    }
}

pub struct StatusMessage {
    pub msg: String,
    pub color: Color,
    time: Instant,
}

pub struct App {
    view: CommentView<HttpBackend, MemoryTarget>,
    cursor: ThemeCursor,
    drafts: HashMap<InputField, String>,
    pub form: Option<InputForm>,
    pub status: Option<StatusMessage>,
    pub scroll: usize,
}

impl App {
    pub fn new(config: &PortfolioConfig) -> Result<Self, ConfigError> {
        let backend = HttpBackend::from_config(config)?;
        let view = CommentView::new(backend, MemoryTarget::new()).with_query(config.query());
        let mut app = Self {
            view,
            cursor: ThemeCursor::default(),
            drafts: HashMap::new(),
            form: None,
            status: None,
            scroll: 0,
        };
        app.cursor.current().apply(app.view.target_mut());
        fact::show_random_fact(&mut rand::thread_rng(), app.view.target_mut());
        Ok(app)
    }

    pub fn document(&self) -> &MemoryTarget {
        self.view.target()
    }

    pub fn theme(&self) -> &'static BackgroundTheme {
        self.cursor.current()
    }

    pub fn query(&self) -> CommentQuery {
        self.view.query()
    }

    pub fn base_url(&self) -> &str {
        self.view.backend().base_url()
    }

    pub async fn refresh(&mut self) {
        match self.view.refresh().await {
            Ok(()) => self.set_status("Refreshed".into(), Color::Green),
            Err(e) => self.report(e),
        }
    }

    pub fn prev_background(&mut self) {
        self.cursor.advance_and_apply(-1, self.view.target_mut());
    }

    pub fn next_background(&mut self) {
        self.cursor.advance_and_apply(1, self.view.target_mut());
    }

    pub fn random_fact(&mut self) {
        fact::show_random_fact(&mut rand::thread_rng(), self.view.target_mut());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let len = self.document().comment_blocks().count();
        if self.scroll + 1 < len {
            self.scroll += 1;
        }
    }

    pub fn open_form(&mut self, kind: FormKind) {
        let needs = match kind {
            FormKind::Comment => Some(Element::CommentForm),
            FormKind::Rename => Some(Element::NameForm),
            FormKind::MaxCount => None,
        };
        if let Some(element) = needs {
            if !self.document().is_visible(element) {
                self.set_status("Log in first (press r to load login status)".into(), Color::Yellow);
                return;
            }
        }
        let fields = match kind {
            FormKind::Comment => vec![("author", self.draft(InputField::Author)), ("comment", self.draft(InputField::CommentText))],
            FormKind::Rename => vec![("name", self.draft(InputField::DisplayName))],
            FormKind::MaxCount => {
                vec![("max", self.query().max_count.map(|m| m.to_string()).unwrap_or_default())]
            }
        };
        self.form = Some(InputForm::new(kind, fields));
    }

    pub fn close_form(&mut self) {
        if let Some(form) = self.form.take() {
            self.stash_drafts(&form);
        }
    }

    pub async fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        self.stash_drafts(&form);
        match form.kind {
            FormKind::Comment => {
                let (author, text) = (form.value(0), form.value(1));
                match self.view.post_comment(&author, &text).await {
                    Ok(n) => self.set_status(format!("Comment posted ({n} shown)"), Color::Green),
                    Err(e) => self.report(e),
                }
            }
            FormKind::Rename => match self.view.update_display_name(&form.value(0)).await {
                Ok(()) => self.set_status("Display name updated".into(), Color::Green),
                Err(e) => self.report(e),
            },
            FormKind::MaxCount => {
                let raw = form.value(0);
                let max = match raw.trim() {
                    "" => None,
                    s => match s.parse::<NonZeroU32>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            self.set_status(format!("invalid max count `{s}`"), Color::Red);
                            return;
                        }
                    },
                };
                let sort = self.query().sort;
                self.load(max, sort).await;
            }
        }
        self.apply_cleared_inputs();
    }

    pub async fn delete_all(&mut self) {
        match self.view.delete_all_comments().await {
            Ok(_) => self.set_status("All comments deleted".into(), Color::Green),
            Err(e) => self.report(e),
        }
    }

    pub async fn cycle_sort(&mut self) {
        let query = self.query();
        let sort = Some(query.sort.unwrap_or_default().cycle());
        self.load(query.max_count, sort).await;
    }

    async fn load(&mut self, max: Option<NonZeroU32>, sort: Option<SortOption>) {
        self.scroll = 0;
        match self.view.load_comments(max, sort).await {
            Ok(n) => self.set_status(format!("{n} comments loaded"), Color::Green),
            Err(e) => self.report(e),
        }
    }

    pub fn tick(&mut self) {
        if let Some(status) = &self.status {
            if status.time.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    pub fn set_status(&mut self, msg: String, color: Color) {
        self.status = Some(StatusMessage { msg, color, time: Instant::now() });
    }

    fn report(&mut self, err: FetchError) {
        self.set_status(format!("Error: {err}"), Color::Red);
    }

    fn draft(&self, field: InputField) -> String {
        self.drafts.get(&field).cloned().unwrap_or_default()
    }

    fn stash_drafts(&mut self, form: &InputForm) {
        let slots: &[InputField] = match form.kind {
            FormKind::Comment => &[InputField::Author, InputField::CommentText],
            FormKind::Rename => &[InputField::DisplayName],
            FormKind::MaxCount => &[],
        };
        for (i, field) in slots.iter().enumerate() {
            self.drafts.insert(*field, form.value(i));
        }
    }

    fn apply_cleared_inputs(&mut self) {
        for field in self.view.target_mut().take_cleared() {
            info!("clearing {field:?} input");
            self.drafts.remove(&field);
        }
    }
}
