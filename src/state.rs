//! Shared engine state: the loaded corpus, the navigation session and a cache
//! of rendered articles.
//!
//! One `DocState` is owned by the server and shared by every tool call. The
//! corpus is replaced wholesale on each load; the session (open folders, nav
//! collapsed flag, current page and query) survives reloads.

use crate::config::EngineOptions;
use crate::corpus::Corpus;
use crate::dom::Fragment;
use crate::error::LoadError;
use crate::fetch::SourceFetcher;
use crate::loader::load_all_docs;
use crate::render::{HtmlSanitizer, MarkdownRenderer, Renderer, Sanitizer, render_article};
use crate::router::{Route, parse_route};
use crate::search::{highlight_terms, split_terms};
use crate::store::{KeyValueStore, ViewPrefs};
use crate::toc::{TocEntry, build_toc};
use crate::tree::ancestor_keys;
use crate::types::Page;
use crate::view::{PageView, SearchResults, View, format_navigation};
use lru::LruCache;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Maximum number of rendered articles kept in memory.
const ARTICLE_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(64).unwrap();

/// Suggestions listed for an unknown page id.
const SUGGESTION_LIMIT: usize = 5;

/// Progress of the corpus load.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Corpus>),
    /// A fatal load error, kept until the next load.
    Failed(String),
}

/// A page rendered and sanitized, with heading ids assigned.
#[derive(Debug)]
pub struct Article {
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// The page this was rendered from. A cached article is only served for
    /// this exact page, never for the page of a later corpus.
    source: Arc<Page>,
}

#[derive(Debug, Default)]
struct Session {
    open_folders: BTreeSet<String>,
    nav_collapsed: bool,
    current_page: Option<String>,
    /// Last search, used to highlight opened pages.
    current_query: String,
}

pub struct DocState {
    options: EngineOptions,
    fetcher: SourceFetcher,
    renderer: Option<Arc<dyn Renderer>>,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    prefs: ViewPrefs,

    corpus: RwLock<LoadState>,
    session: Mutex<Session>,
    /// Rendered articles by page id; cleared on every load.
    articles: Mutex<LruCache<String, Arc<Article>>>,
}

impl std::fmt::Debug for DocState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocState")
            .field("options", &self.options)
            .field("has_renderer", &self.renderer.is_some())
            .field("has_sanitizer", &self.sanitizer.is_some())
            .field("prefs", &self.prefs)
            .finish_non_exhaustive()
    }
}

impl DocState {
    /// Create state with the Markdown renderer and HTML sanitizer, restoring
    /// folder and navigation preferences from `store`.
    pub fn new(options: EngineOptions, store: Arc<dyn KeyValueStore>) -> Self {
        let prefs = ViewPrefs::new(store, options.storage_key.clone());
        let session = Session {
            open_folders: prefs.open_folders(),
            nav_collapsed: prefs.nav_collapsed(),
            ..Session::default()
        };

        Self {
            options,
            fetcher: SourceFetcher::new(),
            renderer: Some(Arc::new(MarkdownRenderer)),
            sanitizer: Some(Arc::new(HtmlSanitizer)),
            prefs,
            corpus: RwLock::new(LoadState::Loading),
            session: Mutex::new(session),
            articles: Mutex::new(LruCache::new(ARTICLE_CACHE_SIZE)),
        }
    }

    /// Replace the rendering collaborators. `None` disables a stage.
    #[must_use]
    pub fn with_collaborators(
        mut self,
        renderer: Option<Arc<dyn Renderer>>,
        sanitizer: Option<Arc<dyn Sanitizer>>,
    ) -> Self {
        self.renderer = renderer;
        self.sanitizer = sanitizer;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub async fn load_state(&self) -> LoadState {
        self.corpus.read().await.clone()
    }

    /// Fetch and build the corpus. A fatal error is kept as the load state
    /// and shown by every view until the next load; there is no retry.
    pub async fn load(&self) -> Result<Arc<Corpus>, LoadError> {
        *self.corpus.write().await = LoadState::Loading;
        let start = std::time::Instant::now();

        let result = load_all_docs(&self.fetcher, &self.options.load_options())
            .await
            .map(|set| Arc::new(Corpus::build(set, self.renderer.as_deref(), &self.options.lang)));

        self.articles.lock().await.clear();
        let mut state = self.corpus.write().await;
        match &result {
            Ok(corpus) => {
                tracing::info!(
                    "Loaded {} pages for '{}' in {:?}",
                    corpus.pages().len(),
                    corpus.site_title(),
                    start.elapsed()
                );
                *state = LoadState::Ready(Arc::clone(corpus));
            }
            Err(e) => {
                tracing::error!("Failed to load documentation: {}", e);
                *state = LoadState::Failed(e.to_string());
            }
        }
        result
    }

    /// Discard the corpus and rendered articles and load again.
    pub async fn reload(&self) -> Result<Arc<Corpus>, LoadError> {
        tracing::info!("Reloading documentation");
        self.load().await
    }

    /// The corpus, or the view to show while it is unavailable.
    pub async fn corpus(&self) -> Result<Arc<Corpus>, View> {
        match &*self.corpus.read().await {
            LoadState::Ready(corpus) => Ok(Arc::clone(corpus)),
            LoadState::Loading => Err(View::Loading),
            LoadState::Failed(message) => Err(View::Error {
                message: message.clone(),
            }),
        }
    }

    /// Run a query and remember it as the current search.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<SearchResults, View> {
        let corpus = self.corpus().await?;
        let limit = limit.unwrap_or(self.options.search_limit);
        let hits = corpus
            .index()
            .search(query, limit, self.options.snippet_radius);

        self.session.lock().await.current_query = query.to_string();

        Ok(SearchResults {
            query: query.to_string(),
            hits,
            corpus,
        })
    }

    /// Open a page by id or by route fragment.
    ///
    /// The home route opens the first page. Opening a page expands every
    /// folder above it. When `highlight` is not `false`, terms of the current
    /// search are marked in a fresh copy of the article.
    pub async fn open(&self, target: &str, highlight: Option<bool>) -> View {
        let corpus = match self.corpus().await {
            Ok(corpus) => corpus,
            Err(view) => return view,
        };

        let route = route_for(target);
        let page = match &route {
            Route::Home => corpus.first_page(),
            Route::Page(id) => corpus.page(id),
        };
        let Some(page) = page else {
            return match route {
                Route::Home => View::Empty {
                    site_title: corpus.site_title().to_string(),
                },
                Route::Page(id) => {
                    tracing::debug!("Page not found: {}", id);
                    View::NotFound {
                        suggestions: corpus.suggest(&id, SUGGESTION_LIMIT),
                        id,
                    }
                }
            };
        };
        if route == Route::Home {
            tracing::debug!("Redirecting home to {}", page.id);
        }

        let terms = {
            let mut session = self.session.lock().await;
            session.current_page = Some(page.id.clone());

            let before = session.open_folders.len();
            session.open_folders.extend(ancestor_keys(&page.path));
            if session.open_folders.len() != before {
                self.prefs.save_open_folders(&session.open_folders);
            }

            split_terms(&session.current_query)
        };

        let article = self.article(page).await;
        let (html, marks) = if highlight.unwrap_or(true) && !terms.is_empty() {
            let mut fragment = Fragment::parse(&article.html);
            let marks = highlight_terms(&mut fragment, &terms);
            (fragment.to_html(), marks)
        } else {
            (article.html.clone(), 0)
        };

        View::Page(PageView::new(
            page,
            corpus.site_title(),
            html,
            article.toc.clone(),
            marks,
        ))
    }

    /// Rendered article for `page`, from the cache when possible.
    async fn article(&self, page: &Arc<Page>) -> Arc<Article> {
        let mut articles = self.articles.lock().await;
        if let Some(article) = articles.get(&page.id) {
            if Arc::ptr_eq(&article.source, page) {
                tracing::trace!("Article cache hit for {}", page.id);
                return Arc::clone(article);
            }
            tracing::debug!("Discarding article of {} from a previous load", page.id);
        }

        let html = render_article(
            &page.content,
            self.renderer.as_deref(),
            self.sanitizer.as_deref(),
        );
        let mut fragment = Fragment::parse(&html);
        let toc = build_toc(&mut fragment);
        let article = Arc::new(Article {
            html: fragment.to_html(),
            toc,
            source: Arc::clone(page),
        });
        articles.put(page.id.clone(), Arc::clone(&article));
        article
    }

    /// Flip a folder between open and closed; returns whether it is now open.
    pub async fn toggle_folder(&self, key: &str) -> Result<bool, String> {
        if let Ok(corpus) = self.corpus().await
            && !corpus.tree().folders().iter().any(|f| !f.key.is_empty() && f.key == key)
        {
            return Err(format!("Unknown folder '{}'", key));
        }

        let mut session = self.session.lock().await;
        let open = if session.open_folders.remove(key) {
            false
        } else {
            session.open_folders.insert(key.to_string());
            true
        };
        self.prefs.save_open_folders(&session.open_folders);
        Ok(open)
    }

    pub async fn set_nav_collapsed(&self, collapsed: bool) {
        self.session.lock().await.nav_collapsed = collapsed;
        self.prefs.save_nav_collapsed(collapsed);
    }

    /// The navigation tree as text.
    pub async fn navigation(&self) -> Result<String, View> {
        let corpus = self.corpus().await?;
        let session = self.session.lock().await;
        Ok(format_navigation(
            &corpus,
            &session.open_folders,
            session.nav_collapsed,
            session.current_page.as_deref(),
        ))
    }

    pub async fn open_folders(&self) -> BTreeSet<String> {
        self.session.lock().await.open_folders.clone()
    }

    pub async fn current_page(&self) -> Option<String> {
        self.session.lock().await.current_page.clone()
    }
}

/// Bare ids open that page; fragments go through the router.
fn route_for(target: &str) -> Route {
    let target = target.trim();
    if target.is_empty() || target.starts_with('#') {
        parse_route(target)
    } else {
        Route::Page(target.to_string())
    }
}
