use super::{
    APPEAR_THRESHOLD, COLD_START_BEGIN_MARKER, COLD_START_END_MARKER, COLD_START_RANGE_BEGIN,
    LEGACY_APPEAR_THRESHOLD, RANGE_SIZE, RANGE_STRIDE, VERY_END,
};
use crate::profiles::{MethodProfiles, COLD_START};
use crate::registry::{MethodId, MethodRegistry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Memoized sort keys, shareable across sorts of the same profile.
///
/// Not synchronized: a parallel sort needs one cache per worker or a lock
/// around the comparator.
pub type SortKeyCache = HashMap<MethodId, f64>;

type TieBreak<'a> = Box<dyn Fn(MethodId, MethodId) -> Ordering + 'a>;

/// Orders methods by where they executed in the profiled interactions.
///
/// Comparisons fill the borrowed [`SortKeyCache`] as a side effect, which is
/// why they take `&mut self`.
///
/// # Example
///
/// ```ignore
/// let mut cache = SortKeyCache::new();
/// let mut comparator =
///     ProfiledComparator::new(&profiles, &registry, &whitelist, &mut cache, false);
/// methods.sort_by(|a, b| comparator.compare(*a, *b));
/// ```
pub struct ProfiledComparator<'a, R: MethodRegistry + ?Sized> {
    profiles: &'a MethodProfiles,
    registry: &'a R,
    whitelisted_substrings: &'a [String],
    cache: &'a mut SortKeyCache,
    legacy_order: bool,
    interactions: Vec<String>,
    markers: Option<(MethodId, MethodId)>,
    tie_break: TieBreak<'a>,
}

impl<'a, R: MethodRegistry + ?Sized> ProfiledComparator<'a, R> {
    pub fn new(
        profiles: &'a MethodProfiles,
        registry: &'a R,
        whitelisted_substrings: &'a [String],
        cache: &'a mut SortKeyCache,
        legacy_order: bool,
    ) -> Self {
        let begin = registry.resolve(COLD_START_BEGIN_MARKER);
        let end = registry.resolve(COLD_START_END_MARKER);
        let interactions = ordered_interactions(profiles, legacy_order);

        tracing::debug!(
            "Profiled order over interactions {:?} (legacy: {}, markers: {}/{})",
            interactions,
            legacy_order,
            begin.is_some(),
            end.is_some()
        );

        Self {
            profiles,
            registry,
            whitelisted_substrings,
            cache,
            legacy_order,
            interactions,
            markers: begin.zip(end),
            tie_break: Box::new(move |a, b| registry.compare_methods(a, b)),
        }
    }

    /// Replace the registry's ordering as the tie-break for equal keys.
    pub fn with_tie_break<F>(mut self, tie_break: F) -> Self
    where
        F: Fn(MethodId, MethodId) -> Ordering + 'a,
    {
        self.tie_break = Box::new(tie_break);
        self
    }

    /// Interactions in range order: cold start first, then by name.
    pub fn interactions(&self) -> &[String] {
        &self.interactions
    }

    /// Raw key from profile data alone; [`VERY_END`] if nothing qualifies.
    pub fn get_method_sort_num(&self, method: MethodId) -> f64 {
        let mut range_begin = 0.0;
        for interaction_id in &self.interactions {
            if interaction_id == COLD_START {
                if let Some((begin, end)) = self.markers {
                    if method == begin {
                        return range_begin;
                    }
                    if method == end {
                        return range_begin + RANGE_SIZE;
                    }
                }
            }

            if let Some(stat) = self.profiles.method_stats(interaction_id).get(&method) {
                if self.legacy_order && stat.appear_percent >= LEGACY_APPEAR_THRESHOLD {
                    return range_begin + RANGE_SIZE / 2.0;
                }
                if !self.legacy_order && stat.appear_percent >= APPEAR_THRESHOLD {
                    return range_begin + stat.order_percent * RANGE_SIZE / 100.0;
                }
            }
            range_begin += RANGE_STRIDE;
        }

        VERY_END
    }

    /// Key for a method without profile data: mid cold start if its
    /// deobfuscated name contains a whitelisted substring.
    pub fn get_method_sort_num_override(&self, method: MethodId) -> f64 {
        let Some(name) = self.registry.deobfuscated_name(method) else {
            return VERY_END;
        };
        if self
            .whitelisted_substrings
            .iter()
            .any(|substr| name.contains(substr.as_str()))
        {
            COLD_START_RANGE_BEGIN + RANGE_SIZE / 2.0
        } else {
            VERY_END
        }
    }

    /// Cached sort key, computing and caching it on first use.
    pub fn sort_key(&mut self, method: MethodId) -> f64 {
        if let Some(&key) = self.cache.get(&method) {
            return key;
        }
        let mut key = self.get_method_sort_num(method);
        if key == VERY_END {
            key = self.get_method_sort_num_override(method);
        }
        self.cache.insert(method, key);
        key
    }

    /// Total order over methods: ascending key, then the tie-break.
    pub fn compare(&mut self, a: MethodId, b: MethodId) -> Ordering {
        let key_a = self.sort_key(a);
        let key_b = self.sort_key(b);
        // total_cmp keeps NaN order percents ordered
        match key_a.total_cmp(&key_b) {
            Ordering::Equal => (self.tie_break)(a, b),
            ordering => ordering,
        }
    }

    /// [`compare`](Self::compare) extended to absent methods, which sort first.
    pub fn compare_nullable(&mut self, a: Option<MethodId>, b: Option<MethodId>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => self.compare(a, b),
        }
    }

    /// Strict "less than" predicate.
    pub fn less(&mut self, a: Option<MethodId>, b: Option<MethodId>) -> bool {
        self.compare_nullable(a, b) == Ordering::Less
    }

    /// Sort `methods` into profiled layout order.
    pub fn sort(&mut self, methods: &mut [MethodId]) {
        methods.sort_by(|a, b| self.compare(*a, *b));
    }
}

fn compare_interactions(a: &str, b: &str) -> Ordering {
    match (a == COLD_START, b == COLD_START) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Interaction ids that get a key range, in range order.
///
/// The empty id of older profiles counts as cold start. Legacy ordering only
/// uses cold start.
fn ordered_interactions(profiles: &MethodProfiles, legacy_order: bool) -> Vec<String> {
    let mut interactions: Vec<String> = profiles
        .interactions()
        .map(|id| if id.is_empty() { COLD_START } else { id })
        .filter(|id| !legacy_order || *id == COLD_START)
        .map(str::to_string)
        .collect();
    interactions.sort_by(|a, b| compare_interactions(a, b));
    interactions.dedup();
    interactions
}
