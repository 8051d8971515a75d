use super::builtin;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A stateless named transformation that can be looked up by name
pub type NamedFn = Arc<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;

/// Name → stateless filter table
///
/// Entries keep their registration order so listings are stable. Registering
/// an existing name replaces the entry in place.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    entries: Vec<(Cow<'static, str>, NamedFn)>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every builtin filter
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_infallible("capitalize", builtin::capitalize);
        registry.register_infallible("remove_double_spaces", builtin::remove_double_spaces);
        registry.register_infallible("collapse_whitespace", builtin::collapse_whitespace);
        registry.register_infallible("trim", builtin::trim);
        registry.register_infallible("lowercase", builtin::lowercase);
        registry.register_infallible("uppercase", builtin::uppercase);
        registry
    }

    /// Register a fallible filter
    pub fn register<F>(&mut self, name: impl Into<Cow<'static, str>>, func: F) -> &mut Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        let name = name.into();
        let func: NamedFn = Arc::new(func);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => {
                tracing::debug!("Replacing registered filter '{}'", name);
                entry.1 = func;
            }
            None => self.entries.push((name, func)),
        }
        self
    }

    /// Register a filter that cannot fail
    pub fn register_infallible<F>(&mut self, name: impl Into<Cow<'static, str>>, func: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(name, move |input| Ok(func(input)))
    }

    pub fn get(&self, name: &str) -> Option<&NamedFn> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, func)| func)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
