//! Corpus loading: single bundle or manifest plus many bundles.
//!
//! In manifest mode every bundle is fetched concurrently and the results are
//! collected settled: a bundle that fails to load is logged and skipped, it
//! never aborts the others. Only the manifest itself is fatal.

use crate::error::LoadError;
use crate::fetch::{Fetcher, join_url};
use crate::ids::IdResolver;
use crate::manifest::parse_manifest;
use crate::text::slugify;
use crate::types::{DEFAULT_ORDER, DEFAULT_SITE_TITLE, DocSet, Page, PageBundle, RawPage};
use futures::future::join_all;

/// Where the documentation corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSource {
    /// One bundle containing every page.
    Single { url: String },
    /// A manifest listing bundles relative to `dir`.
    Manifest { dir: String, index_url: String },
}

/// Inputs for [`load_all_docs`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub source: DocSource,
    /// Site title supplied by the caller, if any.
    pub title: Option<String>,
}

/// Load and normalize every page described by `options`.
pub async fn load_all_docs<F: Fetcher>(
    fetcher: &F,
    options: &LoadOptions,
) -> Result<DocSet, LoadError> {
    match &options.source {
        DocSource::Single { url } => load_single(fetcher, url, options.title.as_deref()).await,
        DocSource::Manifest { dir, index_url } => {
            load_manifest(fetcher, dir, index_url, options.title.as_deref()).await
        }
    }
}

async fn load_single<F: Fetcher>(
    fetcher: &F,
    url: &str,
    title: Option<&str>,
) -> Result<DocSet, LoadError> {
    let bundle = PageBundle::from_json(&fetcher.fetch_json(url).await?);

    let site_title = bundle
        .site_title
        .clone()
        .or_else(|| title.map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());

    let mut resolver = IdResolver::new();
    let pages = bundle
        .pages
        .iter()
        .map(|raw| normalize_page(raw, None, None, &mut resolver))
        .collect();

    Ok(DocSet { site_title, pages })
}

async fn load_manifest<F: Fetcher>(
    fetcher: &F,
    dir: &str,
    index_url: &str,
    title: Option<&str>,
) -> Result<DocSet, LoadError> {
    let start = std::time::Instant::now();
    let entries = parse_manifest(fetcher.fetch_json(index_url).await?)?;
    tracing::info!("Loading {} bundles listed in {}", entries.len(), index_url);

    let fetches = entries.iter().map(|entry| async move {
        let url = join_url(dir, &entry.file);
        match fetcher.fetch_json(&url).await {
            Ok(data) => Some(PageBundle::from_json(&data)),
            Err(e) => {
                tracing::warn!("Skipping bundle {}: {}", url, e);
                None
            }
        }
    });
    let bundles = join_all(fetches).await;

    let fallback_title = title.unwrap_or(DEFAULT_SITE_TITLE);
    let mut site_title = fallback_title.to_string();
    let mut resolver = IdResolver::new();
    let mut pages = Vec::new();

    for (entry, bundle) in entries.iter().zip(bundles) {
        let Some(bundle) = bundle else { continue };

        // First bundle title that differs from the running default wins,
        // unless the caller supplied one.
        if title.is_none()
            && site_title == fallback_title
            && let Some(bundle_title) = &bundle.site_title
        {
            site_title.clone_from(bundle_title);
        }

        let namespace = entry.effective_namespace();
        pages.extend(bundle.pages.iter().map(|raw| {
            normalize_page(
                raw,
                entry.path_prefix.as_deref(),
                namespace.as_deref(),
                &mut resolver,
            )
        }));
    }

    tracing::debug!("Loaded {} pages in {:?}", pages.len(), start.elapsed());
    Ok(DocSet { site_title, pages })
}

/// Turn a raw bundle page into a [`Page`], claiming a unique id.
fn normalize_page(
    raw: &RawPage,
    path_prefix: Option<&[String]>,
    namespace: Option<&str>,
    resolver: &mut IdResolver,
) -> Page {
    let mut path = raw.path_segments();
    if let Some(prefix) = path_prefix.filter(|p| !p.is_empty()) {
        path.splice(0..0, prefix.iter().cloned());
    }

    let raw_id = raw
        .id()
        .unwrap_or_else(|| raw.title().map(slugify).unwrap_or_default());
    let id = resolver.resolve(&raw_id, namespace);
    let title = raw.title().map_or_else(|| id.clone(), str::to_owned);

    Page {
        id,
        title,
        path,
        order: raw.order().unwrap_or(DEFAULT_ORDER),
        content: raw.content().to_string(),
    }
}
