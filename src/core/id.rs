//! Deterministic zone id generation.
//!
//! Ids carry an explicit counter instead of relying on shared mutable
//! state, so repeated runs over the same input produce identical ids and
//! parallel test runs never interfere.

/// Generates sequential ids of the form `{prefix}_{n}`.
#[derive(Clone, Debug)]
pub struct ZoneIdGenerator {
    prefix: String,
    counter: u64,
}

impl ZoneIdGenerator {
    /// Create a generator with the given prefix, starting at 0.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Produce the next id and advance the counter.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.prefix, self.counter);
        self.counter += 1;
        id
    }
}
