pub mod calendar;
pub mod filter;
pub mod projector;
pub mod views;

pub use calendar::CalendarDay;
pub use filter::{
    ALL_CATEGORIES, ActiveCategory, CategoryKind, Categorized, FilterSpec, Predicate, Searchable,
};
pub use projector::{
    CategoryCounts, PredicateStep, Projection, ProjectionStep, Row, ScopeStep, SortStep,
    ViewProjector,
};
pub use views::AppointmentTab;
