// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Generate ids for resources created without an explicit name.

use rand::{Rng, distr::Alphanumeric};

/// The number of characters in generated ids.
///
/// With 62 possible characters per position this is about 119 bits of
/// randomness, collisions are not a practical concern.
pub const AUTO_ID_LENGTH: usize = 20;

/// A source of ids for new resources.
///
/// Applications rarely need to implement this trait. The default
/// implementation, [RandomIds], is appropriate for production use. Tests may
/// want to inject a deterministic generator, any `Fn() -> String` closure
/// implements this trait.
///
/// # Example
/// ```
/// # use cloudref_names::{IdGenerator, RandomIds};
/// let id = RandomIds.generate();
/// assert_eq!(id.len(), cloudref_names::AUTO_ID_LENGTH);
///
/// let fixed = || "my-id".to_string();
/// assert_eq!(fixed.generate(), "my-id");
/// ```
pub trait IdGenerator: Send + Sync {
    /// Returns a new id. It must be non-empty and cannot contain `/`.
    fn generate(&self) -> String;
}

/// Generates random alphanumeric ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(AUTO_ID_LENGTH)
            .map(char::from)
            .collect()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}
