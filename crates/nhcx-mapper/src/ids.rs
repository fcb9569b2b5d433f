//! Resource id generation

use uuid::Uuid;

/// Generates bundle-unique resource ids
///
/// Production mapping uses random UUIDs; tests use the sequential mode so
/// two runs over the same input produce byte-identical bundles.
#[derive(Debug)]
pub struct IdGenerator {
    mode: Mode,
}

#[derive(Debug)]
enum Mode {
    Random,
    Sequential(u128),
}

impl IdGenerator {
    /// Random UUID v4 ids - the production mode
    pub fn random() -> Self {
        Self { mode: Mode::Random }
    }

    /// Deterministic ids counting up from 1, rendered as UUIDs
    pub fn sequential() -> Self {
        Self {
            mode: Mode::Sequential(0),
        }
    }

    /// Produce the next fresh id
    pub fn fresh(&mut self) -> String {
        match &mut self.mode {
            Mode::Random => Uuid::new_v4().to_string(),
            Mode::Sequential(counter) => {
                *counter += 1;
                Uuid::from_u128(*counter).to_string()
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}
