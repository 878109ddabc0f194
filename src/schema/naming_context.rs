pub const DEFAULT_NAME_PREFIX: &str = "EXPR$";

/// Positional naming state for one schema derivation.
///
/// `position` is the index of the next output field within the list being
/// built (projection or aggregate output); `generated` counts how many
/// default names were handed out over the whole derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    prefix: String,
    position: usize,
    generated: usize,
}

impl Default for NamingContext {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PREFIX)
    }
}

impl NamingContext {
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), position: 0, generated: 0 }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn begin_list(&mut self) {
        self.position = 0;
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Name for the field at the current position. Does not advance.
    pub fn default_name(&mut self) -> String {
        self.name_at(self.position)
    }

    /// Name for an explicit position, regardless of the current one.
    pub fn name_at(&mut self, position: usize) -> String {
        self.generated += 1;
        format!("{}{}", self.prefix, position)
    }

    pub fn generated(&self) -> usize {
        self.generated
    }
}
