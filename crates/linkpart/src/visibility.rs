//! Visibility as a pure function of explicit predicate lists.
//!
//! An element is shown when at least one "requested" predicate holds and no
//! "forced hidden" predicate does. `Rules<T>` keeps both lists next to the
//! element kind they apply to; nothing registers or unregisters at runtime.

/// `any(requested) && !any(forced_hidden)`.
#[inline]
pub fn compose(requested: &[bool], forced_hidden: &[bool]) -> bool {
    requested.iter().any(|&r| r) && !forced_hidden.iter().any(|&h| h)
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Predicate lists for one kind of displayable element.
pub struct Rules<T> {
    requested: Vec<Predicate<T>>,
    forced_hidden: Vec<Predicate<T>>,
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self {
            requested: Vec::new(),
            forced_hidden: Vec::new(),
        }
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(mut self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.requested.push(Box::new(pred));
        self
    }

    pub fn force_hidden(mut self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.forced_hidden.push(Box::new(pred));
        self
    }

    pub fn is_visible(&self, item: &T) -> bool {
        let requested: Vec<bool> = self.requested.iter().map(|p| p(item)).collect();
        let hidden: Vec<bool> = self.forced_hidden.iter().map(|p| p(item)).collect();
        compose(&requested, &hidden)
    }
}

impl<T> std::fmt::Debug for Rules<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("requested", &self.requested.len())
            .field("forced_hidden", &self.forced_hidden.len())
            .finish()
    }
}
