use crate::view::DashboardView;
use reddit_client::PostSource;
use std::time::Duration;
use themetracer_core::{CoreError, ErrorReporter, Post, PostPage, SearchQuery, SourceConfig};
use tracing::{info, warn};

const SUCCESS_DURATION: Duration = Duration::from_millis(3000);
const ERROR_DURATION: Duration = Duration::from_millis(5000);
const SEARCH_ERROR_MESSAGE: &str = "Something went wrong with your search. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient toast for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, description: String, duration: Duration) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            duration,
        }
    }
}

#[derive(Debug)]
pub enum Message {
    Search(SearchQuery),
    LoadMore,
    SearchFinished(SearchOutcome),
    SetUseLiveSource(bool),
    SetSeedIdea(Option<String>),
    DismissNotifications,
}

/// A fetch that has been started but not awaited. Owns a source built from
/// the settings in force when it was issued.
#[derive(Debug)]
pub struct SearchTicket {
    id: u64,
    query: SearchQuery,
    after: Option<String>,
    limit: u32,
    append: bool,
    source: PostSource,
}

impl SearchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn uses_live_source(&self) -> bool {
        self.source.is_live()
    }

    pub async fn run(self) -> SearchOutcome {
        let result = self
            .source
            .fetch(&self.query, self.limit, self.after.as_deref())
            .await;
        SearchOutcome {
            id: self.id,
            query: self.query,
            append: self.append,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub id: u64,
    pub query: SearchQuery,
    pub append: bool,
    pub result: Result<PostPage, CoreError>,
}

/// Headless dashboard state: current results, pagination, loading flags,
/// settings and pending notifications.
pub struct Dashboard {
    settings: SourceConfig,
    results: Vec<Post>,
    after: Option<String>,
    current_query: Option<SearchQuery>,
    seed_idea: Option<String>,
    loading: bool,
    search_performed: bool,
    latest_search: u64,
    notifications: Vec<Notification>,
    reporter: ErrorReporter,
}

impl Dashboard {
    pub fn new(settings: SourceConfig) -> Self {
        Self {
            settings,
            results: Vec::new(),
            after: None,
            current_query: None,
            seed_idea: None,
            loading: false,
            search_performed: false,
            latest_search: 0,
            notifications: Vec::new(),
            reporter: ErrorReporter::new("dashboard"),
        }
    }

    pub fn update(&mut self, message: Message) -> Option<SearchTicket> {
        match message {
            Message::Search(query) => self.begin_search(query),
            Message::LoadMore => self.begin_load_more(),
            Message::SearchFinished(outcome) => {
                self.complete(outcome);
                None
            }
            Message::SetUseLiveSource(enabled) => {
                self.set_use_live_source(enabled);
                None
            }
            Message::SetSeedIdea(idea) => {
                self.set_seed_idea(idea);
                None
            }
            Message::DismissNotifications => {
                self.notifications.clear();
                None
            }
        }
    }

    /// Starts a fresh search. Any in-flight search is superseded: its
    /// outcome will be discarded when it arrives.
    pub fn begin_search(&mut self, query: SearchQuery) -> Option<SearchTicket> {
        info!("Search triggered for '{}'", query.term);
        self.search_performed = true;
        self.after = None;
        self.current_query = Some(query.clone());
        self.issue(query, None, false)
    }

    /// Requests the next page of the current search, if there is one.
    pub fn begin_load_more(&mut self) -> Option<SearchTicket> {
        let query = self.current_query.clone()?;
        let after = self.after.clone()?;
        if self.loading {
            return None;
        }
        self.issue(query, Some(after), true)
    }

    fn issue(
        &mut self,
        query: SearchQuery,
        after: Option<String>,
        append: bool,
    ) -> Option<SearchTicket> {
        self.latest_search += 1;
        let id = self.latest_search;

        match PostSource::from_config(&self.settings) {
            Ok(source) => {
                self.loading = true;
                Some(SearchTicket {
                    id,
                    query,
                    after,
                    limit: self.settings.page_size,
                    append,
                    source,
                })
            }
            Err(e) => {
                self.fail(&e, &query, append);
                None
            }
        }
    }

    pub fn complete(&mut self, outcome: SearchOutcome) {
        if outcome.id != self.latest_search {
            warn!(
                "Discarding stale results for '{}' (search {} superseded by {})",
                outcome.query.term, outcome.id, self.latest_search
            );
            return;
        }
        self.loading = false;

        match outcome.result {
            Ok(page) => {
                let fetched = page.posts.len();
                if outcome.append {
                    self.results.extend(page.posts);
                    self.notify(Notification::new(
                        NotificationKind::Success,
                        "More results loaded",
                        format!("Loaded {} more posts", fetched),
                        SUCCESS_DURATION,
                    ));
                } else {
                    self.results = page.posts;
                    self.notify(Notification::new(
                        NotificationKind::Success,
                        "Search completed",
                        format!("Found {} posts about \"{}\"", fetched, outcome.query.term),
                        SUCCESS_DURATION,
                    ));
                }
                self.after = page.after;
                info!(
                    "Search {} for '{}' returned {} posts",
                    outcome.id, outcome.query.term, fetched
                );
            }
            Err(e) => self.fail(&e, &outcome.query, outcome.append),
        }
    }

    fn fail(&mut self, error: &CoreError, query: &SearchQuery, append: bool) {
        let message = self.reporter.report_fetch_error(error, query);
        self.loading = false;
        if !append {
            self.results.clear();
            self.after = None;
        }
        warn!("Search failed: {}", message);
        self.notify(Notification::new(
            NotificationKind::Error,
            "Error",
            SEARCH_ERROR_MESSAGE.to_string(),
            ERROR_DURATION,
        ));
    }

    /// Issues a search and applies its outcome before returning.
    pub async fn search(&mut self, query: SearchQuery) {
        if let Some(ticket) = self.begin_search(query) {
            let outcome = ticket.run().await;
            self.complete(outcome);
        }
    }

    pub async fn load_more(&mut self) {
        if let Some(ticket) = self.begin_load_more() {
            let outcome = ticket.run().await;
            self.complete(outcome);
        }
    }

    /// Takes effect on the next search; results already shown are kept.
    pub fn set_use_live_source(&mut self, enabled: bool) {
        self.settings.use_live_source = enabled;
        info!("API mode toggled: {}", if enabled { "real" } else { "mock" });
        let (title, description) = if enabled {
            ("Using Real Reddit API", "Now fetching real data from Reddit")
        } else {
            ("Using Mock Data", "Now using simulated data for demos")
        };
        self.notify(Notification::new(
            NotificationKind::Info,
            title,
            description.to_string(),
            SUCCESS_DURATION,
        ));
    }

    /// Stored on one line: the idea is spliced into headings and bold spans.
    pub fn set_seed_idea(&mut self, idea: Option<String>) {
        self.seed_idea = idea
            .map(|i| i.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|i| !i.is_empty());
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn settings(&self) -> &SourceConfig {
        &self.settings
    }

    pub fn uses_live_source(&self) -> bool {
        self.settings.use_live_source
    }

    pub fn results(&self) -> &[Post] {
        &self.results
    }

    pub fn seed_idea(&self) -> Option<&str> {
        self.seed_idea.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_performed(&self) -> bool {
        self.search_performed
    }

    pub fn has_more(&self) -> bool {
        self.after.is_some()
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(
            &self.results,
            self.seed_idea(),
            self.loading,
            self.search_performed,
            self.has_more(),
        )
    }
}
