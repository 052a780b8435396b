//! Page identifier resolution across merged bundles.

use ahash::AHashSet;

/// Claims a unique identifier for `raw_id`, recording it in `used`.
///
/// Resolution order:
/// 1. an empty `raw_id` is replaced by a random `page-<hex>` id
/// 2. an unused id is returned unchanged
/// 3. with a namespace, `namespace:raw_id`, then `namespace:raw_id-2`, `-3`, ...
/// 4. without one, `raw_id-2`, `raw_id-3`, ...
pub fn ensure_unique_page_id(
    raw_id: &str,
    used: &mut AHashSet<String>,
    namespace: Option<&str>,
) -> String {
    let mut base = raw_id.trim().to_string();
    if base.is_empty() {
        base = format!("page-{:x}", rand::random::<u64>());
    }
    if used.insert(base.clone()) {
        return base;
    }

    let stem = match namespace.map(str::trim).filter(|ns| !ns.is_empty()) {
        Some(ns) => {
            let candidate = format!("{}:{}", ns, base);
            if used.insert(candidate.clone()) {
                return candidate;
            }
            candidate
        }
        None => base,
    };

    let mut suffix = 2usize;
    loop {
        let candidate = format!("{}-{}", stem, suffix);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Tracks claimed ids for one corpus load.
#[derive(Debug, Default)]
pub struct IdResolver {
    used: AHashSet<String>,
}

impl IdResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `raw_id` against every id claimed so far.
    pub fn resolve(&mut self, raw_id: &str, namespace: Option<&str>) -> String {
        ensure_unique_page_id(raw_id, &mut self.used, namespace)
    }
}
