use std::{cell::RefCell, cmp::Ordering, fmt};

use tracing::debug;

use crate::core::entities::Snapshot;
use crate::projection::filter::{
    ALL_CATEGORIES, CategoryKind, Categorized, FilterSpec, Predicate, Searchable,
};

/// A record together with its position in the source snapshot.
#[derive(Debug)]
pub struct Row<'a, T> {
    pub position: usize,
    pub record: &'a T,
}

impl<T> Clone for Row<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Row<'_, T> {}

/// One stage of a projection.
/// Steps may only drop or reorder rows, never invent them.
pub trait ProjectionStep<T> {
    fn process<'a>(&self, rows: Vec<Row<'a, T>>) -> Vec<Row<'a, T>>;

    /// Human-readable name for this step (used in debug logs)
    fn name(&self) -> &str;
}

/// Keeps only the records inside the screen's scope ("this day", "this patient").
pub struct ScopeStep<'f, T> {
    name: String,
    keep: Box<dyn Fn(&T) -> bool + 'f>,
}

impl<'f, T> ScopeStep<'f, T> {
    pub fn new(name: impl Into<String>, keep: impl Fn(&T) -> bool + 'f) -> Self {
        Self {
            name: name.into(),
            keep: Box::new(keep),
        }
    }

    pub fn contains(&self, record: &T) -> bool {
        (self.keep)(record)
    }
}

impl<T> ProjectionStep<T> for ScopeStep<'_, T> {
    fn process<'a>(&self, rows: Vec<Row<'a, T>>) -> Vec<Row<'a, T>> {
        rows.into_iter().filter(|row| (self.keep)(row.record)).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Applies the combined text + category predicate.
pub struct PredicateStep<C> {
    predicate: Predicate<C>,
}

impl<C: CategoryKind> PredicateStep<C> {
    pub fn new(spec: &FilterSpec) -> Self {
        Self {
            predicate: Predicate::from_spec(spec),
        }
    }
}

impl<T, C> ProjectionStep<T> for PredicateStep<C>
where
    C: CategoryKind,
    T: Searchable + Categorized<Category = C>,
{
    fn process<'a>(&self, rows: Vec<Row<'a, T>>) -> Vec<Row<'a, T>> {
        rows.into_iter()
            .filter(|row| self.predicate.matches(row.record))
            .collect()
    }

    fn name(&self) -> &str {
        "filter"
    }
}

/// Stable sort; records comparing equal keep their snapshot order.
pub struct SortStep<'f, T> {
    name: String,
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'f>,
}

impl<'f, T> SortStep<'f, T> {
    pub fn new(name: impl Into<String>, compare: impl Fn(&T, &T) -> Ordering + 'f) -> Self {
        Self {
            name: name.into(),
            compare: Box::new(compare),
        }
    }
}

impl<T> ProjectionStep<T> for SortStep<'_, T> {
    fn process<'a>(&self, mut rows: Vec<Row<'a, T>>) -> Vec<Row<'a, T>> {
        // `sort_by` is a stable merge sort
        rows.sort_by(|a, b| (self.compare)(a.record, b.record));
        rows
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Per-category totals shown on filter chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts<C> {
    all: usize,
    by_category: Vec<(C, usize)>,
}

impl<C: CategoryKind> CategoryCounts<C> {
    pub fn tally<'a, T>(records: impl IntoIterator<Item = &'a T>) -> Self
    where
        T: Categorized<Category = C> + 'a,
    {
        let mut by_category: Vec<(C, usize)> = C::ALL.iter().map(|c| (*c, 0)).collect();
        let mut all = 0;
        for record in records {
            all += 1;
            let category = record.category();
            if let Some(slot) = by_category.iter_mut().find(|(c, _)| *c == category) {
                slot.1 += 1;
            }
        }
        Self { all, by_category }
    }

    pub fn all(&self) -> usize {
        self.all
    }

    pub fn get(&self, category: C) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Count for a chip key; `"all"` gives the scoped total, unknown keys 0.
    pub fn for_key(&self, key: &str) -> usize {
        if key == ALL_CATEGORIES {
            return self.all;
        }
        C::from_key(key).map(|c| self.get(c)).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.by_category.iter().copied()
    }
}

/// What a list screen renders.
pub struct Projection<'a, T, C> {
    pub items: Vec<&'a T>,
    pub counts: CategoryCounts<C>,
}

impl<T, C: fmt::Debug> fmt::Debug for Projection<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("items", &self.items.len())
            .field("counts", &self.counts)
            .finish()
    }
}

impl<'a, T, C> Projection<'a, T, C> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied()
    }
}

struct CachedProjection<C> {
    version: u64,
    spec: FilterSpec,
    positions: Vec<usize>,
    counts: CategoryCounts<C>,
}

/// Scope → predicate → sort over a record snapshot.
///
/// A projector is built for one screen state (selected day, patient...). The
/// last result of [`ViewProjector::project_snapshot`] is memoized on the
/// snapshot version and filter spec; changing the scope means building a new
/// projector.
pub struct ViewProjector<'f, T: Categorized> {
    scope: Option<ScopeStep<'f, T>>,
    sort: Option<SortStep<'f, T>>,
    cache: RefCell<Option<CachedProjection<T::Category>>>,
}

impl<'f, T> ViewProjector<'f, T>
where
    T: Searchable + Categorized,
{
    pub fn new() -> Self {
        Self {
            scope: None,
            sort: None,
            cache: RefCell::new(None),
        }
    }

    pub fn with_scope(
        mut self,
        name: impl Into<String>,
        keep: impl Fn(&T) -> bool + 'f,
    ) -> Self {
        self.scope = Some(ScopeStep::new(name, keep));
        self
    }

    pub fn with_sort(
        mut self,
        name: impl Into<String>,
        compare: impl Fn(&T, &T) -> Ordering + 'f,
    ) -> Self {
        self.sort = Some(SortStep::new(name, compare));
        self
    }

    fn scoped_rows<'a>(&self, records: &'a [T]) -> Vec<Row<'a, T>> {
        let rows: Vec<Row<'a, T>> = records
            .iter()
            .enumerate()
            .map(|(position, record)| Row { position, record })
            .collect();
        match &self.scope {
            Some(scope) => scope.process(rows),
            None => rows,
        }
    }

    /// Records inside the scope, in snapshot order.
    pub fn scoped<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        self.scoped_rows(records)
            .into_iter()
            .map(|row| row.record)
            .collect()
    }

    /// Chip counts under the scope. The search text plays no part here.
    pub fn counts(&self, records: &[T]) -> CategoryCounts<T::Category> {
        CategoryCounts::tally(self.scoped(records))
    }

    fn run<'a>(
        &self,
        records: &'a [T],
        spec: &FilterSpec,
    ) -> (Vec<Row<'a, T>>, CategoryCounts<T::Category>) {
        let scoped = self.scoped_rows(records);
        let counts = CategoryCounts::tally(scoped.iter().map(|row| row.record));

        let predicate = PredicateStep::<T::Category>::new(spec);
        let mut steps: Vec<&dyn ProjectionStep<T>> = vec![&predicate];
        if let Some(sort) = &self.sort {
            steps.push(sort);
        }

        let mut rows = scoped;
        for step in steps {
            let before = rows.len();
            rows = step.process(rows);
            debug!(step = step.name(), before, after = rows.len(), "projection step");
        }
        (rows, counts)
    }

    pub fn project<'a>(
        &self,
        records: &'a [T],
        spec: &FilterSpec,
    ) -> Projection<'a, T, T::Category> {
        let (rows, counts) = self.run(records, spec);
        Projection {
            items: rows.into_iter().map(|row| row.record).collect(),
            counts,
        }
    }

    /// Like [`ViewProjector::project`], reusing the previous result when
    /// neither the snapshot version nor the filter spec changed.
    pub fn project_snapshot<'a>(
        &self,
        snapshot: &'a Snapshot<T>,
        spec: &FilterSpec,
    ) -> Projection<'a, T, T::Category> {
        let records = snapshot.records();
        if let Some(cached) = self.cache.borrow().as_ref() {
            if cached.version == snapshot.version() && &cached.spec == spec {
                debug!(version = cached.version, "projection cache hit");
                return Projection {
                    items: cached.positions.iter().map(|i| &records[*i]).collect(),
                    counts: cached.counts.clone(),
                };
            }
        }

        let (rows, counts) = self.run(records, spec);
        *self.cache.borrow_mut() = Some(CachedProjection {
            version: snapshot.version(),
            spec: spec.clone(),
            positions: rows.iter().map(|row| row.position).collect(),
            counts: counts.clone(),
        });
        Projection {
            items: rows.into_iter().map(|row| row.record).collect(),
            counts,
        }
    }
}

impl<T: Searchable + Categorized> Default for ViewProjector<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
