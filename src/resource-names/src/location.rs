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

use crate::DELIMITER;

/// Qualifies a bare location id with its project.
///
/// Some requests name a location, e.g. the zone of a Bigtable cluster.
/// Applications may provide just the location id (`us-east1-b`), while the
/// service expects a full name (`projects/{project}/locations/us-east1-b`).
/// Names that already contain a `locations` segment are returned unchanged.
///
/// # Example
/// ```
/// # use cloudref_names::qualify_location;
/// assert_eq!(
///     qualify_location("my-project", "us-east1-b"),
///     "projects/my-project/locations/us-east1-b"
/// );
/// assert_eq!(
///     qualify_location("my-project", "projects/other/locations/us-east1-b"),
///     "projects/other/locations/us-east1-b"
/// );
/// ```
pub fn qualify_location(project_id: &str, location: &str) -> String {
    if location.split(DELIMITER).any(|s| s == "locations") {
        return location.to_string();
    }
    format!("projects/{project_id}/locations/{location}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("us-east1-b", "projects/p/locations/us-east1-b")]
    #[test_case("projects/p/locations/us-east1-b", "projects/p/locations/us-east1-b")]
    #[test_case("projects/other/locations/europe-west1-c", "projects/other/locations/europe-west1-c")]
    #[test_case("locations/us-east1-b", "locations/us-east1-b")]
    #[test_case("my-locations-zone", "projects/p/locations/my-locations-zone")]
    fn qualify(input: &str, want: &str) {
        assert_eq!(qualify_location("p", input), want);
    }
}
