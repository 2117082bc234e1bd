//! The mod download list page: search orchestration and page state.
//!
//! A search runs as a two-stage pipeline:
//!
//! 1. **Worker stage** (tokio runtime): resolve the effective game version
//!    on a blocking thread, then query the catalog.
//! 2. **UI stage** (the thread that owns the page): the completion arrives
//!    as a [`PageMessage`] over an mpsc channel and is applied by
//!    [`SearchPage::process_messages`] or [`SearchPage::wait_message`].
//!
//! All state writes happen in the UI stage. Each search carries a request
//! token and only the newest one is applied, so an older search that
//! finishes late cannot overwrite newer results.

use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use modshelf_catalog::CatalogClient;
use modshelf_core::{
    AddonFile, CatalogEntry, Category, IndentedCategory, SearchQuery, Section, flatten_categories,
};

use crate::error::SearchError;
use crate::game_version::VersionResolver;
use crate::observer::{Observers, PageEvent, SubscriptionId};
use crate::repository::{Profile, ProfileVersion};

/// Receives the file a user picked on the detail page.
pub trait DownloadCallback: Send + Sync {
    fn download(&self, profile: &Profile, version: Option<&str>, file: &AddonFile);
}

/// Where an activated list item goes (the detail/download page).
pub trait Navigator {
    fn navigate(
        &self,
        entry: &CatalogEntry,
        version: Option<&ProfileVersion>,
        callback: Option<Arc<dyn DownloadCallback>>,
    );
}

/// Observable page state. Only the page mutates it.
#[derive(Debug, Clone)]
pub struct PageState {
    pub loading: bool,
    pub failed: bool,
    pub results: Vec<CatalogEntry>,
    pub categories: Vec<IndentedCategory>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            loading: false,
            failed: false,
            results: Vec::new(),
            categories: vec![IndentedCategory::NONE],
        }
    }
}

/// What a finished search produced.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The game version actually sent to the catalog.
    pub game_version: String,
    pub entries: Vec<CatalogEntry>,
}

/// Completions sent from the worker stage to the UI stage.
#[derive(Debug)]
pub enum PageMessage {
    SearchFinished {
        token: u64,
        result: Result<SearchOutcome, SearchError>,
    },
    CategoriesLoaded {
        result: Result<Vec<Category>, SearchError>,
    },
}

type Wakeup = Arc<dyn Fn() + Send + Sync>;

pub struct SearchPage {
    section: Section,
    version_selection: bool,
    catalog: Arc<dyn CatalogClient>,
    resolver: Arc<dyn VersionResolver>,
    runtime: Handle,
    version: Option<ProfileVersion>,
    callback: Option<Arc<dyn DownloadCallback>>,
    navigator: Option<Box<dyn Navigator>>,
    wakeup: Option<Wakeup>,

    state: PageState,
    observers: Observers,
    category_forest: Vec<Category>,
    categories_pending: bool,
    last_game_version: Option<String>,

    message_tx: mpsc::Sender<PageMessage>,
    message_rx: mpsc::Receiver<PageMessage>,

    /// Token of the most recently issued search; 0 before the first one.
    latest_token: u64,
    search_initialized: bool,
}

impl SearchPage {
    pub fn new(
        section: Section,
        catalog: Arc<dyn CatalogClient>,
        resolver: Arc<dyn VersionResolver>,
        runtime: Handle,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            section,
            version_selection: false,
            catalog,
            resolver,
            runtime,
            version: None,
            callback: None,
            navigator: None,
            wakeup: None,
            state: PageState::default(),
            observers: Observers::new(),
            category_forest: Vec::new(),
            categories_pending: false,
            last_game_version: None,
            message_tx: tx,
            message_rx: rx,
            latest_token: 0,
            search_initialized: false,
        }
    }

    /// Callback handed to the detail page when an entry is activated.
    pub fn with_callback(mut self, callback: Arc<dyn DownloadCallback>) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Whether the page offers a chooser over installed versions.
    pub fn with_version_selection(mut self, enabled: bool) -> Self {
        self.version_selection = enabled;
        self
    }

    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Called from the worker stage after each completion is queued, so an
    /// event loop can wake up and drain messages (e.g. request a repaint).
    pub fn with_wakeup(mut self, wakeup: impl Fn() + Send + Sync + 'static) -> Self {
        self.wakeup = Some(Arc::new(wakeup));
        self
    }

    // -- Accessors --

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_failed(&self) -> bool {
        self.state.failed
    }

    pub fn results(&self) -> &[CatalogEntry] {
        &self.state.results
    }

    pub fn categories(&self) -> &[IndentedCategory] {
        &self.state.categories
    }

    /// The category tree the flattened rows came from.
    pub fn category_forest(&self) -> &[Category] {
        &self.category_forest
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn version(&self) -> Option<&ProfileVersion> {
        self.version.as_ref()
    }

    pub fn version_selection(&self) -> bool {
        self.version_selection
    }

    /// Game version sent with the last applied search.
    pub fn last_game_version(&self) -> Option<&str> {
        self.last_game_version.as_deref()
    }

    /// The free-text game version only applies when no installed version
    /// is selected.
    pub fn game_version_hint_visible(&self) -> bool {
        self.version
            .as_ref()
            .and_then(|v| v.selected_version())
            .is_none()
    }

    /// Installed versions of the bound profile, for a version chooser.
    ///
    /// Empty unless version selection is enabled and a profile is bound.
    pub fn installed_versions(&self) -> io::Result<Vec<String>> {
        match &self.version {
            Some(v) if self.version_selection => v.profile.repository().versions(),
            _ => Ok(Vec::new()),
        }
    }

    // -- Observers --

    pub fn subscribe(&mut self, listener: impl FnMut(&PageEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // -- Operations --

    /// Bind the page to a profile and (optionally) an installed version.
    ///
    /// Resets the loading and failed flags. The first call also issues the
    /// initial, unfiltered search.
    pub fn load_version(&mut self, profile: Profile, version: Option<String>) {
        self.version = Some(ProfileVersion::new(profile, version));

        self.set_loading(false);
        self.set_failed(false);

        if !self.search_initialized {
            self.search_initialized = true;
            self.search(SearchQuery::new());
        }
    }

    /// Start a search and return its request token.
    ///
    /// Returns immediately; the result is applied when its completion is
    /// drained on this thread.
    pub fn search(&mut self, query: SearchQuery) -> u64 {
        self.latest_token += 1;
        let token = self.latest_token;

        self.set_failed(false);
        self.set_loading(true);

        log::debug!(
            "Search #{}: section={} category={} offset={} filter='{}' sort={} hint='{}'",
            token,
            self.section.short_name(),
            query.category_id,
            query.page_offset,
            query.name_filter,
            query.sort.short_name(),
            query.game_version,
        );

        let catalog = Arc::clone(&self.catalog);
        let resolver = Arc::clone(&self.resolver);
        let version = self.version.clone();
        let section = self.section;
        let tx = self.message_tx.clone();
        let wakeup = self.wakeup.clone();

        self.runtime.spawn(async move {
            let result = run_search(catalog, resolver, version, section, query).await;
            if tx.send(PageMessage::SearchFinished { token, result }).is_err() {
                log::debug!("Search #{} finished after its page was dropped", token);
            }
            if let Some(wake) = wakeup {
                wake();
            }
        });

        token
    }

    /// Fetch the section's categories in the background.
    pub fn load_categories(&mut self) {
        self.categories_pending = true;
        let catalog = Arc::clone(&self.catalog);
        let section = self.section;
        let tx = self.message_tx.clone();
        let wakeup = self.wakeup.clone();

        self.runtime.spawn(async move {
            let result = catalog
                .get_categories(section)
                .await
                .map_err(SearchError::from);
            if tx.send(PageMessage::CategoriesLoaded { result }).is_err() {
                log::debug!("Categories arrived after their page was dropped");
            }
            if let Some(wake) = wakeup {
                wake();
            }
        });
    }

    /// Open the detail page for the result at `index`.
    ///
    /// Returns false when the index is out of range or no navigator is set.
    pub fn activate(&self, index: usize) -> bool {
        let (Some(entry), Some(navigator)) = (self.state.results.get(index), &self.navigator) else {
            return false;
        };
        log::debug!("Opening entry {} ({})", entry.id, entry.name);
        navigator.navigate(entry, self.version.as_ref(), self.callback.clone());
        true
    }

    // -- UI stage --

    /// Apply every completion that has arrived. Never blocks.
    pub fn process_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.message_rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }

    /// Block up to `timeout` for one completion, then drain any others.
    ///
    /// Returns false if nothing arrived in time.
    pub fn wait_message(&mut self, timeout: Duration) -> bool {
        match self.message_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.handle_message(msg);
                self.process_messages();
                true
            }
            Err(_) => false,
        }
    }

    /// Pump completions until the newest search has settled.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> bool {
        self.wait_while(timeout, |page| page.state.loading)
    }

    /// Pump completions until the category request has answered.
    pub fn wait_for_categories(&mut self, timeout: Duration) -> bool {
        self.wait_while(timeout, |page| page.categories_pending)
    }

    /// A timeout too large to represent as an `Instant` waits without a
    /// deadline.
    fn wait_while(&mut self, timeout: Duration, busy: impl Fn(&Self) -> bool) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        self.process_messages();
        while busy(self) {
            let arrived = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    !remaining.is_zero() && self.wait_message(remaining)
                }
                None => self.wait_forever(),
            };
            if !arrived {
                return false;
            }
        }
        true
    }

    /// Block until one completion arrives, then drain any others.
    fn wait_forever(&mut self) -> bool {
        match self.message_rx.recv() {
            Ok(msg) => {
                self.handle_message(msg);
                self.process_messages();
                true
            }
            Err(_) => false,
        }
    }

    fn handle_message(&mut self, msg: PageMessage) {
        match msg {
            PageMessage::SearchFinished { token, result } => {
                if token != self.latest_token {
                    log::debug!(
                        "Discarding stale search #{} (latest is #{})",
                        token,
                        self.latest_token
                    );
                    return;
                }
                self.set_loading(false);
                match result {
                    Ok(outcome) => {
                        log::debug!(
                            "Search #{} returned {} entries for game version '{}'",
                            token,
                            outcome.entries.len(),
                            outcome.game_version
                        );
                        self.last_game_version = Some(outcome.game_version);
                        self.state.results = outcome.entries;
                        self.observers
                            .notify(PageEvent::ResultsReplaced(self.state.results.len()));
                    }
                    Err(e) => {
                        log::warn!("Search #{} failed: {}", token, e);
                        self.set_failed(true);
                    }
                }
            }
            PageMessage::CategoriesLoaded { result } => {
                self.categories_pending = false;
                match result {
                    Ok(forest) => {
                        self.state.categories = flatten_categories(&forest);
                        self.category_forest = forest;
                    }
                    Err(e) => {
                        log::warn!("Failed to load {} categories: {}", self.section.short_name(), e);
                        self.state.categories = vec![IndentedCategory::NONE];
                        self.category_forest.clear();
                    }
                }
                self.observers
                    .notify(PageEvent::CategoriesReplaced(self.state.categories.len()));
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if self.state.loading != loading {
            self.state.loading = loading;
            self.observers.notify(PageEvent::LoadingChanged(loading));
        }
    }

    fn set_failed(&mut self, failed: bool) {
        if self.state.failed != failed {
            self.state.failed = failed;
            self.observers.notify(PageEvent::FailedChanged(failed));
        }
    }
}

/// Worker stage: resolve the game version, then query the catalog.
async fn run_search(
    catalog: Arc<dyn CatalogClient>,
    resolver: Arc<dyn VersionResolver>,
    version: Option<ProfileVersion>,
    section: Section,
    query: SearchQuery,
) -> Result<SearchOutcome, SearchError> {
    let hint = query.game_version;
    let game_version = tokio::task::spawn_blocking(move || {
        resolve_game_version(resolver.as_ref(), version.as_ref(), hint)
    })
    .await?;

    let entries = catalog
        .search_paginated(
            &game_version,
            query.category_id,
            section,
            query.page_offset,
            &query.name_filter,
            query.sort,
        )
        .await?;

    Ok(SearchOutcome {
        game_version,
        entries,
    })
}

/// The game version a search should use.
///
/// With an installed version selected, the version embedded in its jar
/// (empty if it cannot be read) and the hint is ignored. Otherwise the hint,
/// unmodified.
pub fn resolve_game_version(
    resolver: &dyn VersionResolver,
    version: Option<&ProfileVersion>,
    hint: String,
) -> String {
    match version.and_then(|v| v.selected_jar()) {
        Some(jar) => resolver.minecraft_version(&jar).unwrap_or_default(),
        None => hint,
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
