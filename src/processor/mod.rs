//! Processor types and instances
//!
//! A [`ProcessorType`] is built once from an ordered list of declared members.
//! At build time it keeps exactly the members tagged as filters, in
//! declaration order. Every [`Processor`] instance of that type shares the
//! collected sequence and threads its input through it.

mod builder;

#[cfg(test)]
mod tests;

pub use builder::ProcessorTypeBuilder;

use crate::error::{FilterError, Result};
use crate::filter::{Filter, Member, builtin};
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// An ordered, immutable filter pipeline declared under a name
pub struct ProcessorType<S = ()> {
    name: String,
    members: Vec<Member<S>>,
    filters: Arc<[Filter<S>]>,
}

impl<S> ProcessorType<S> {
    pub fn builder(name: impl Into<String>) -> ProcessorTypeBuilder<S> {
        ProcessorTypeBuilder::new(name)
    }

    /// Collect the tagged members. This runs once, when the type is built.
    fn from_members(name: String, members: Vec<Member<S>>) -> Self {
        let filters: Arc<[Filter<S>]> = members
            .iter()
            .enumerate()
            .filter_map(|(index, member)| member.to_filter(index))
            .collect();

        tracing::debug!(
            "Built processor type '{}': {} members, {} filters",
            name,
            members.len(),
            filters.len()
        );

        Self {
            name,
            members,
            filters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collected filters in declaration order
    pub fn filters(&self) -> &[Filter<S>] {
        &self.filters
    }

    /// Every declared member, tagged or not, in declaration order
    pub fn members(&self) -> &[Member<S>] {
        &self.members
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(Filter::name)
    }

    /// Create an instance of this type carrying `state`
    pub fn instance(self: &Arc<Self>, state: S) -> Processor<S> {
        Processor::new(Arc::clone(self), state)
    }
}

impl<S> fmt::Debug for ProcessorType<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorType")
            .field("name", &self.name)
            .field("filters", &self.filter_names().collect::<Vec<_>>())
            .field("members", &self.members.len())
            .finish()
    }
}

/// A runtime value of a processor type
pub struct Processor<S = ()> {
    kind: Arc<ProcessorType<S>>,
    state: S,
}

impl<S> Processor<S> {
    pub fn new(kind: Arc<ProcessorType<S>>, state: S) -> Self {
        Self { kind, state }
    }

    pub fn kind(&self) -> &Arc<ProcessorType<S>> {
        &self.kind
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Apply every filter in order, feeding each result into the next
    ///
    /// The first failing filter aborts the call; no partial result is returned.
    /// With no filters the input comes back unchanged.
    pub fn process(&self, input: &str) -> Result<String> {
        let mut value = input.to_owned();
        for filter in self.kind.filters.iter() {
            value = self.run(filter.name(), filter.index(), || {
                filter.apply(&self.state, &value)
            })?;
            tracing::trace!("{}.{} -> {:?}", self.kind.name, filter.name(), value);
        }
        Ok(value)
    }

    /// Like [`Processor::process`], but rejects input that is not UTF-8
    pub fn process_bytes(&self, input: &[u8]) -> Result<String> {
        let input = std::str::from_utf8(input)?;
        self.process(input)
    }

    /// Call a single declared member by name, outside the pipeline
    pub fn call_method(&self, name: &str, input: &str) -> Result<String> {
        let (index, member) = self
            .kind
            .members
            .iter()
            .enumerate()
            .find(|(_, member)| member.name() == name)
            .ok_or_else(|| FilterError::UnknownMethod {
                processor: self.kind.name.clone(),
                name: name.to_string(),
            })?;

        self.run(member.name(), index, || member.call(&self.state, input))
    }

    fn run<F>(&self, filter: &str, index: usize, apply: F) -> Result<String>
    where
        F: FnOnce() -> anyhow::Result<String>,
    {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(apply)) {
            Ok(result) => result,
            Err(payload) => Err(anyhow::anyhow!("panicked: {}", panic_message(&*payload))),
        };

        outcome.map_err(|source| {
            tracing::warn!(
                "Filter '{}' of processor '{}' failed: {}",
                filter,
                self.kind.name,
                source
            );
            FilterError::Invocation {
                processor: self.kind.name.clone(),
                filter: filter.to_string(),
                index,
                source,
            }
        })
    }
}

impl<S: Sync> Processor<S> {
    /// Process many inputs in parallel, returning results in input order
    ///
    /// Any failure fails the whole batch with the error of the earliest
    /// failing input.
    pub fn process_all<I>(&self, inputs: &[I]) -> Result<Vec<String>>
    where
        I: AsRef<str> + Sync,
    {
        let outcomes: Vec<Result<String>> = inputs
            .par_iter()
            .map(|input| self.process(input.as_ref()))
            .collect();
        outcomes.into_iter().collect()
    }
}

impl<S: fmt::Debug> fmt::Debug for Processor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("kind", &self.kind.name)
            .field("state", &self.state)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The demo processor: `capitalize` then `remove_double_spaces`, plus an
/// untagged `shout` method
pub fn my_string_processor() -> Arc<ProcessorType> {
    ProcessorType::<()>::builder("my_string_processor")
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .method("shout", |_, s| Ok(format!("{}!", builtin::uppercase(s))))
        .filter("remove_double_spaces", |_, s| {
            Ok(builtin::remove_double_spaces(s))
        })
        .build()
}
