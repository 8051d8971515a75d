use super::ProcessorType;
use crate::error::{FilterError, Result};
use crate::filter::{FilterRegistry, Member};
use std::borrow::Cow;
use std::sync::Arc;

/// Declares the members of a processor type in order
///
/// Declaring a name twice replaces the earlier member but keeps its position.
pub struct ProcessorTypeBuilder<S = ()> {
    name: String,
    members: Vec<Member<S>>,
}

impl<S> ProcessorTypeBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Declare a member tagged as a filter
    pub fn filter<F>(self, name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&S, &str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.member(Member::filter(name, func))
    }

    /// Declare an untagged member; it is never applied by the pipeline
    pub fn method<F>(self, name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&S, &str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.member(Member::method(name, func))
    }

    pub fn member(mut self, member: Member<S>) -> Self {
        match self.members.iter_mut().find(|m| m.name() == member.name()) {
            Some(existing) => {
                tracing::debug!(
                    "Redeclaring member '{}' on processor type '{}'",
                    member.name(),
                    self.name
                );
                *existing = member;
            }
            None => self.members.push(member),
        }
        self
    }

    pub fn members<I>(self, members: I) -> Self
    where
        I: IntoIterator<Item = Member<S>>,
    {
        members.into_iter().fold(self, Self::member)
    }

    /// Finish the declaration and collect the tagged members
    pub fn build(self) -> Arc<ProcessorType<S>> {
        Arc::new(ProcessorType::from_members(self.name, self.members))
    }
}

impl<S: 'static> ProcessorTypeBuilder<S> {
    /// Declare one filter per name, looked up in `registry`, in the given order
    ///
    /// Every entry gets its own slot, so a name listed twice runs twice.
    /// Fails with [`FilterError::UnknownFilter`] on the first name the registry
    /// does not know.
    pub fn from_registry<I, N>(
        name: impl Into<String>,
        filter_names: I,
        registry: &FilterRegistry,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut builder = Self::new(name);
        for filter_name in filter_names {
            let filter_name = filter_name.as_ref();
            let func = registry.get(filter_name).cloned().ok_or_else(|| {
                FilterError::UnknownFilter {
                    processor: builder.name.clone(),
                    name: filter_name.to_string(),
                }
            })?;
            builder.members.push(Member::filter(
                filter_name.to_string(),
                move |_: &S, input: &str| func(input),
            ));
        }
        Ok(builder)
    }
}
