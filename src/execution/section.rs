//! Section Composition
//!
//! A flow body can be assembled from sections contributed by several
//! features. Each section carries a modifier that says how it combines
//! with whatever the earlier sections installed:
//!
//! | Modifier  | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `On`      | Installs the section only if the body is still empty     |
//! | `After`   | Appends the section                                      |
//! | `Before`  | Prepends the section; if it yields a value, stop there   |
//! | `Replace` | Discards everything so far and installs the section      |

use std::future::Future;

use log::debug;

use crate::error::Result;

use super::branch::{Branch, Step};
use super::cell::CellWrite;

/// How a section combines with the sections declared before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionModifier {
    On,
    After,
    Before,
    Replace,
}

/// One feature's contribution to a flow body.
#[derive(Debug)]
pub struct Section<'a, T> {
    feature: String,
    modifier: SectionModifier,
    step: Step<'a, T>,
}

impl<'a, T: Send + 'a> Section<'a, T> {
    /// Creates a section whose step is named after its feature.
    pub fn new<F, Fut>(feature: impl Into<String>, modifier: SectionModifier, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        let feature = feature.into();
        Self {
            step: Step::new(feature.clone(), body),
            feature,
            modifier,
        }
    }

    pub fn on<F, Fut>(feature: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        Self::new(feature, SectionModifier::On, body)
    }

    pub fn after<F, Fut>(feature: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        Self::new(feature, SectionModifier::After, body)
    }

    pub fn before<F, Fut>(feature: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        Self::new(feature, SectionModifier::Before, body)
    }

    pub fn replace<F, Fut>(feature: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(Option<T>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<CellWrite<T>>> + Send + 'a,
    {
        Self::new(feature, SectionModifier::Replace, body)
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn modifier(&self) -> SectionModifier {
        self.modifier
    }
}

/// Builds a branch from sections, applied in declaration order.
pub fn compose<'a, T>(
    name: impl Into<String>,
    sections: impl IntoIterator<Item = Section<'a, T>>,
) -> Branch<'a, T>
where
    T: Clone + Send + 'a,
{
    let mut branch = Branch::new(name);

    for Section {
        feature,
        modifier,
        step,
    } in sections
    {
        match modifier {
            SectionModifier::On if branch.is_empty() => branch.push(step),
            SectionModifier::On => {
                debug!(
                    "Section '{}' ignored: '{}' already has a body",
                    feature,
                    branch.name()
                );
            }
            SectionModifier::After => branch.push(step),
            SectionModifier::Before => branch.push_front(step.exit_on_value()),
            SectionModifier::Replace => {
                debug!("Section '{}' replaces the body of '{}'", feature, branch.name());
                branch.clear();
                branch.push(step);
            }
        }
    }

    branch
}
