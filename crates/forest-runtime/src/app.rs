#![forbid(unsafe_code)]

//! The application store: every piece of Focus Forest state behind one
//! handle, with the read accessors and intent handlers a presentation layer
//! needs.
//!
//! Writers are fixed: [`Settings`] owns the preference cells,
//! [`Navigation`] the page and sidebar, [`FocusSession`] the session cells
//! and the only [`LedgerWriter`](crate::ledger::LedgerWriter). The store
//! hands out read-only signals and derived values.

use std::fmt;
use std::rc::Rc;

use forest_i18n::{Language, StringCatalog, bundled_catalog};
use forest_style::{FontSize, ThemeColor};
use web_time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, ForestConfig};
use crate::error::{FocusError, ReactiveError};
use crate::ledger::{CompletedEntry, ForestLedger};
use crate::navigation::{LayoutMode, Navigation, Page};
use crate::projection::{StyleProjection, StyleVars};
use crate::reactive::{Computed, ReactiveScope, ReadSignal};
use crate::session::{FocusSession, SessionStatus};
use crate::settings::Settings;
use crate::ticker::ScheduledTick;

/// Why the store could not be built.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("reactive wiring failed: {0}")]
    Reactive(#[from] ReactiveError),
}

pub struct FocusForest {
    settings: Settings,
    navigation: Navigation,
    session: FocusSession,
    ledger: ForestLedger,
    style: StyleProjection,
    catalog: Rc<StringCatalog>,
    page_title: Computed<String>,
    forest_summary: Computed<String>,
    scope: ReactiveScope,
}

impl FocusForest {
    /// Build the store from `config` with the system clock and the bundled
    /// string tables.
    pub fn new(config: &ForestConfig) -> Result<Self, InitError> {
        Self::with_parts(config, Rc::new(SystemClock), bundled_catalog())
    }

    /// Build the store with an explicit clock and catalog.
    pub fn with_parts(
        config: &ForestConfig,
        clock: Rc<dyn Clock>,
        catalog: StringCatalog,
    ) -> Result<Self, InitError> {
        config.validate()?;
        let language = config.resolve_language()?;

        let settings = Settings::new(
            config.theme_color,
            language,
            config.username.clone(),
            config.font_size,
        );
        let navigation = Navigation::new(
            config.initial_page,
            config.viewport_width_px,
            config.narrow_breakpoint_px,
        );
        let (ledger, writer) = ForestLedger::new(clock);
        let session = FocusSession::new(writer, config.tick_interval());
        let style =
            StyleProjection::new(settings.theme_color_signal(), settings.font_size_signal())?;
        let catalog = Rc::new(catalog);

        let page_title = {
            let (page, lang, catalog) = (
                navigation.current_page_signal(),
                settings.language_signal(),
                Rc::clone(&catalog),
            );
            Computed::new(move || {
                let page = page.get();
                catalog
                    .get(lang.get(), page.as_str())
                    .unwrap_or(page.as_str())
                    .to_owned()
            })
        };

        let forest_summary = {
            let (count, lang, catalog) = (
                ledger.count_signal(),
                settings.language_signal(),
                Rc::clone(&catalog),
            );
            Computed::new(move || summarize(&catalog, lang.get(), count.get()))
        };

        let mut scope = ReactiveScope::new();
        scope.hold(session.status_signal().subscribe(|status| {
            tracing::debug!(target: "forest::app", status = %status, "session status changed");
        }));

        tracing::info!(
            target: "forest::app",
            language = %language,
            page = %config.initial_page,
            "focus forest ready"
        );

        Ok(Self {
            settings,
            navigation,
            session,
            ledger,
            style,
            catalog,
            page_title,
            forest_summary,
            scope,
        })
    }

    // -----------------------------------------------------------------------
    // Component access
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    #[must_use]
    pub fn session(&self) -> &FocusSession {
        &self.session
    }

    #[must_use]
    pub fn ledger(&self) -> &ForestLedger {
        &self.ledger
    }

    #[must_use]
    pub fn style(&self) -> &StyleProjection {
        &self.style
    }

    #[must_use]
    pub fn catalog(&self) -> &StringCatalog {
        &self.catalog
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn current_page(&self) -> Page {
        self.navigation.current_page()
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.navigation.sidebar_open()
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.navigation.layout()
    }

    #[must_use]
    pub fn theme_color(&self) -> ThemeColor {
        self.settings.theme_color()
    }

    #[must_use]
    pub fn hover_color(&self) -> String {
        self.style.hover_color()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.settings.language()
    }

    #[must_use]
    pub fn username(&self) -> String {
        self.settings.username()
    }

    #[must_use]
    pub fn font_size(&self) -> FontSize {
        self.settings.font_size()
    }

    /// The font size preference resolved to units (14, 16 or 18).
    #[must_use]
    pub fn font_size_units(&self) -> u16 {
        self.style.base_font_size()
    }

    #[must_use]
    pub fn style_vars(&self) -> StyleVars {
        self.style.vars()
    }

    #[must_use]
    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.session.elapsed_seconds()
    }

    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.session.formatted_time()
    }

    #[must_use]
    pub fn task_label(&self) -> String {
        self.session.task_label()
    }

    /// Snapshot of the forest in completion order.
    #[must_use]
    pub fn forest(&self) -> Vec<CompletedEntry> {
        self.ledger.all()
    }

    #[must_use]
    pub fn forest_count(&self) -> usize {
        self.ledger.count()
    }

    #[must_use]
    pub fn forest_count_signal(&self) -> ReadSignal<usize> {
        self.ledger.count_signal()
    }

    /// Title of the current page in the active language.
    #[must_use]
    pub fn page_title(&self) -> String {
        self.page_title.get()
    }

    /// Headline of the forest page, e.g. `Task Completed! 3 tasks`.
    #[must_use]
    pub fn forest_summary(&self) -> String {
        self.forest_summary.get()
    }

    /// Look up `key` in the active language, falling back to English and
    /// finally to the key itself.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.catalog
            .get(self.settings.language(), key)
            .unwrap_or(key)
            .to_owned()
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    pub fn set_page(&self, page: Page) {
        self.navigation.set_page(page);
        tracing::debug!(target: "forest::app", page = %page, "page selected");
    }

    /// [`set_page`](Self::set_page) by page identifier.
    pub fn set_page_id(&self, id: &str) -> Result<Page, FocusError> {
        let page = logged("set_page", id.parse::<Page>().map_err(FocusError::from))?;
        self.set_page(page);
        Ok(page)
    }

    pub fn toggle_sidebar(&self) {
        self.navigation.toggle_sidebar();
        tracing::debug!(
            target: "forest::app",
            open = self.navigation.sidebar_open_signal().get_untracked(),
            "sidebar toggled"
        );
    }

    pub fn set_theme_color(&self, hex: &str) -> Result<ThemeColor, FocusError> {
        logged("set_theme_color", self.settings.set_theme_color(hex))
    }

    pub fn set_language(&self, code: &str) -> Result<Language, FocusError> {
        logged("set_language", self.settings.set_language(code))
    }

    pub fn set_username(&self, name: &str) {
        self.settings.set_username(name);
        tracing::debug!(target: "forest::app", "username changed");
    }

    pub fn set_font_size(&self, size: FontSize) {
        self.settings.set_font_size(size);
        tracing::debug!(target: "forest::app", size = %size, "font size changed");
    }

    pub fn set_font_size_named(&self, name: &str) -> Result<FontSize, FocusError> {
        logged("set_font_size", self.settings.set_font_size_named(name))
    }

    /// Start focusing on `task`; ticks are anchored at the current instant.
    pub fn start_session(&self, task: &str) -> Result<(), FocusError> {
        self.start_session_at(task, Instant::now())
    }

    pub fn start_session_at(&self, task: &str, now: Instant) -> Result<(), FocusError> {
        logged("start_session", self.session.start(task, now))
    }

    /// Finish the running session and plant its tree.
    pub fn finish_session(&self) -> Result<CompletedEntry, FocusError> {
        logged("finish_session", self.session.finish())
    }

    pub fn edit_task_label(&self, text: &str) -> Result<(), FocusError> {
        logged("edit_task_label", self.session.edit_task_label(text))
    }

    pub fn on_viewport_changed(&self, is_narrow: bool) {
        self.navigation.on_viewport_changed(is_narrow);
    }

    pub fn on_viewport_width(&self, width_px: u32) {
        self.navigation.on_viewport_width(width_px);
    }

    /// Count one tick of the running session.
    pub fn tick(&self) -> bool {
        self.session.tick()
    }

    /// Apply every tick due by `now`.
    pub fn advance_to(&self, now: Instant) -> u64 {
        self.session.advance_to(now)
    }

    pub fn schedule_tick(&self) -> Option<ScheduledTick> {
        self.session.schedule_tick()
    }
}

impl fmt::Debug for FocusForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusForest")
            .field("navigation", &self.navigation)
            .field("settings", &self.settings)
            .field("session", &self.session)
            .field("ledger", &self.ledger)
            .field("held", &self.scope.len())
            .finish_non_exhaustive()
    }
}

fn summarize(catalog: &StringCatalog, language: Language, count: usize) -> String {
    let headline = catalog.get(language, "task_completed").unwrap_or("Task Completed!");
    let count = u64::try_from(count).unwrap_or(u64::MAX);
    match catalog.format_plural(language, "task_count", count, &[]) {
        Some(tally) => format!("{headline} {tally}"),
        None => format!("{headline} {count}"),
    }
}

fn logged<T>(intent: &'static str, result: Result<T, FocusError>) -> Result<T, FocusError> {
    match &result {
        Ok(_) => tracing::debug!(target: "forest::app", intent, "intent applied"),
        Err(err) => tracing::warn!(target: "forest::app", intent, error = %err, "intent rejected"),
    }
    result
}
