//! Content hashing for the incremental cache.
//!
//! [`ContentHash`] folds the inputs that determine a method's artifact into a single 64-bit
//! key. The hash function uses FNV-1a inspired sequential mixing so that component order
//! matters and repeated components do not cancel out.
//!
//! # Example Usage
//!
//! ```rust
//! use dotweave::utils::ContentHash;
//!
//! let key = ContentHash::new()
//!     .add_component("MyService")
//!     .add_component("Add")
//!     .finalize();
//! assert_ne!(key, ContentHash::new().finalize());
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};

/// Order-sensitive hash builder using FNV-1a inspired mixing
pub struct ContentHash {
    state: u64,
}

impl ContentHash {
    /// Create a new hash builder
    #[must_use]
    pub fn new() -> Self {
        ContentHash {
            state: 0xcbf2_9ce4_8422_2325_u64, // FNV-1a 64-bit offset basis
        }
    }

    fn mix(&mut self, value: u64) {
        self.state ^= value;
        self.state = self.state.wrapping_mul(0x0100_0000_01b3_u64); // FNV-1a 64-bit prime

        self.state ^= self.state >> 33;
        self.state = self.state.wrapping_mul(0xff51_afd7_ed55_8ccd_u64);
        self.state ^= self.state >> 33;
    }

    /// Add a hashable component
    ///
    /// ## Arguments
    /// * `component` - Any hashable value to fold into the key
    #[must_use]
    pub fn add_component<T: Hash + ?Sized>(mut self, component: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        component.hash(&mut hasher);
        self.mix(hasher.finish());
        self
    }

    /// Add every item of a sequence, followed by its length
    #[must_use]
    pub fn add_all<'a, T, I>(self, items: I) -> Self
    where
        T: Hash + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut count = 0usize;
        let mut this = self;
        for item in items {
            this = this.add_component(item);
            count += 1;
        }
        this.add_component(&count)
    }

    /// Finalize the hash and return the key
    #[must_use]
    pub fn finalize(self) -> u64 {
        self.state
    }
}

impl Default for ContentHash {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let hash1 = ContentHash::new()
            .add_component("MyApp")
            .add_component("MyService")
            .finalize();

        let hash2 = ContentHash::new()
            .add_component("MyApp")
            .add_component("MyService")
            .finalize();

        assert_eq!(hash1, hash2, "Hash should be deterministic");
    }

    #[test]
    fn test_hash_order_sensitive() {
        let hash1 = ContentHash::new()
            .add_component(&"first")
            .add_component(&"second")
            .finalize();

        let hash2 = ContentHash::new()
            .add_component(&"second")
            .add_component(&"first")
            .finalize();

        assert_ne!(hash1, hash2, "Hash should be order-sensitive");
    }

    #[test]
    fn test_hash_no_self_cancellation() {
        let once = ContentHash::new().add_component(&7u32).finalize();
        let twice = ContentHash::new()
            .add_component(&7u32)
            .add_component(&7u32)
            .finalize();

        assert_ne!(once, twice);
        assert_ne!(twice, ContentHash::new().finalize());
    }

    #[test]
    fn test_add_all_includes_length() {
        let split = ContentHash::new()
            .add_all(["a", "b"].iter())
            .add_all(["c"].iter())
            .finalize();
        let merged = ContentHash::new()
            .add_all(["a"].iter())
            .add_all(["b", "c"].iter())
            .finalize();

        assert_ne!(split, merged);
    }
}
