//! Filters and declared members
//!
//! A processor type is declared as an ordered list of [`Member`]s. Members
//! carrying the filter tag become [`Filter`]s when the type is built; the rest
//! are plain methods that never take part in the pipeline.

pub mod builtin;
pub mod registry;

pub use registry::FilterRegistry;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Callable shared by filters and plain methods: `(instance, string) -> string`
pub type MemberFn<S> = Arc<dyn Fn(&S, &str) -> anyhow::Result<String> + Send + Sync>;

/// A member declared on a processor type
pub struct Member<S> {
    name: Cow<'static, str>,
    func: MemberFn<S>,
    tagged: bool,
}

impl<S> Member<S> {
    /// Declare a member tagged as a filter
    pub fn filter<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&S, &str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            tagged: true,
        }
    }

    /// Declare an untagged member with the same signature as a filter
    pub fn method<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&S, &str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            tagged: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this member carries the filter tag
    pub fn is_filter(&self) -> bool {
        self.tagged
    }

    pub(crate) fn call(&self, state: &S, input: &str) -> anyhow::Result<String> {
        (self.func)(state, input)
    }

    /// Turn a tagged member into a filter at the given declaration index
    pub(crate) fn to_filter(&self, index: usize) -> Option<Filter<S>> {
        self.tagged.then(|| Filter {
            name: self.name.clone(),
            index,
            func: Arc::clone(&self.func),
        })
    }
}

impl<S> Clone for Member<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
            tagged: self.tagged,
        }
    }
}

impl<S> fmt::Debug for Member<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("tagged", &self.tagged)
            .finish_non_exhaustive()
    }
}

/// A collected filter: a tagged member frozen at its declaration index
pub struct Filter<S> {
    name: Cow<'static, str>,
    index: usize,
    func: MemberFn<S>,
}

impl<S> Filter<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this filter among all members declared on its type
    pub fn index(&self) -> usize {
        self.index
    }

    /// Apply the transformation to one value
    pub fn apply(&self, state: &S, input: &str) -> anyhow::Result<String> {
        (self.func)(state, input)
    }
}

impl<S> fmt::Debug for Filter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
