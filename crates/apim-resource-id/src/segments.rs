// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::{IdError, PROVIDER_NAMESPACE};

/// Cursor over the `key/value` pairs of a resource id path.
pub(crate) struct Segments<'a> {
    input: &'a str,
    pairs: Vec<(&'a str, &'a str)>,
    next: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn parse(input: &'a str) -> Result<Self, IdError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        let Some(path) = trimmed.strip_prefix('/') else {
            return Err(IdError::NotRooted(input.to_string()));
        };
        let path = path.strip_suffix('/').unwrap_or(path);

        let components: Vec<&str> = path.split('/').collect();
        if components.len() % 2 != 0 {
            return Err(IdError::OddSegments(input.to_string()));
        }

        let mut pairs = Vec::with_capacity(components.len() / 2);
        for chunk in components.chunks(2) {
            let (key, value) = (chunk[0], chunk[1]);
            if key.is_empty() || value.is_empty() {
                return Err(IdError::EmptySegment {
                    key: key.to_string(),
                    input: input.to_string(),
                });
            }
            pairs.push((key, value));
        }

        Ok(Self {
            input,
            pairs,
            next: 0,
        })
    }

    /// Takes the next pair, which must be keyed exactly `key`.
    pub(crate) fn take(&mut self, key: &'static str) -> Result<String, IdError> {
        let Some((found, value)) = self.pairs.get(self.next) else {
            return Err(IdError::MissingSegment {
                key,
                input: self.input.to_string(),
            });
        };
        if *found != key {
            return Err(IdError::UnexpectedSegment {
                expected: key,
                found: (*found).to_string(),
                input: self.input.to_string(),
            });
        }
        self.next += 1;
        Ok((*value).to_string())
    }

    /// Takes the `providers` pair and checks it names the API Management namespace.
    pub(crate) fn take_provider(&mut self) -> Result<(), IdError> {
        let provider = self.take("providers")?;
        if !provider.eq_ignore_ascii_case(PROVIDER_NAMESPACE) {
            return Err(IdError::WrongProvider { found: provider });
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<(), IdError> {
        if self.next != self.pairs.len() {
            return Err(IdError::TrailingSegments(self.input.to_string()));
        }
        Ok(())
    }
}
