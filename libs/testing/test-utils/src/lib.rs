//! Shared test utilities for the tracker crates
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations applied
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let name = builder.name("project", "main");
//! }
//! ```

use uuid::Uuid;

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same test name always yields the same ids and names, so failures
/// reproduce exactly.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_assign_engineers");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic id for `label`, distinct per label within one builder.
    ///
    /// Handy for ids that must not exist in the store.
    pub fn id(&self, label: &str) -> Uuid {
        Uuid::from_u64_pair(self.hash_with(label, 0), self.hash_with(label, 1))
    }

    fn hash_with(&self, label: &str, lane: u8) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        (self.seed, label, lane).hash(&mut hasher);
        hasher.finish()
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("engineer", "lead"), "test-engineer-7-lead");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::collections::BTreeSet;
    use std::fmt::Debug;

    /// Assert two collections hold the same elements, ignoring order.
    pub fn assert_same_members<T, A, B>(actual: A, expected: B, context: &str)
    where
        T: Ord + Debug,
        A: IntoIterator<Item = T>,
        B: IntoIterator<Item = T>,
    {
        let actual: BTreeSet<T> = actual.into_iter().collect();
        let expected: BTreeSet<T> = expected.into_iter().collect();
        assert_eq!(actual, expected, "{}: membership differs", context);
    }
}
