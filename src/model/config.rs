//! Parser configuration

/// Configuration for parsing PDO files
///
/// The limits guard against corrupt count fields turning into huge
/// allocations. The defaults comfortably exceed anything Pepakura writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    max_element_count: usize,
    max_string_bytes: usize,
    max_texture_bytes: usize,
    validate: bool,
}

impl ParserConfig {
    /// Default upper bound for every count-prefixed list
    pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 4 * 1024 * 1024;
    /// Default upper bound for a string length prefix, in bytes
    pub const DEFAULT_MAX_STRING_BYTES: usize = 1024 * 1024;
    /// Default upper bound for texture payloads and decoded pixel buffers
    pub const DEFAULT_MAX_TEXTURE_BYTES: usize = 256 * 1024 * 1024;

    /// Create a configuration with the default limits and validation disabled
    pub fn new() -> Self {
        Self {
            max_element_count: Self::DEFAULT_MAX_ELEMENT_COUNT,
            max_string_bytes: Self::DEFAULT_MAX_STRING_BYTES,
            max_texture_bytes: Self::DEFAULT_MAX_TEXTURE_BYTES,
            validate: false,
        }
    }

    /// Set the maximum number of elements accepted for any list
    pub fn with_max_element_count(mut self, max: usize) -> Self {
        self.max_element_count = max;
        self
    }

    /// Set the maximum accepted string length prefix in bytes
    pub fn with_max_string_bytes(mut self, max: usize) -> Self {
        self.max_string_bytes = max;
        self
    }

    /// Set the maximum accepted texture payload size in bytes
    pub fn with_max_texture_bytes(mut self, max: usize) -> Self {
        self.max_texture_bytes = max;
        self
    }

    /// Run reference validation after parsing
    ///
    /// # Example
    ///
    /// ```
    /// use libpdo::ParserConfig;
    ///
    /// let config = ParserConfig::new().with_validation(true);
    /// assert!(config.validate());
    /// ```
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Maximum number of elements accepted for any list
    pub fn max_element_count(&self) -> usize {
        self.max_element_count
    }

    /// Maximum accepted string length prefix in bytes
    pub fn max_string_bytes(&self) -> usize {
        self.max_string_bytes
    }

    /// Maximum accepted texture payload size in bytes
    pub fn max_texture_bytes(&self) -> usize {
        self.max_texture_bytes
    }

    /// Whether reference validation runs after parsing
    pub fn validate(&self) -> bool {
        self.validate
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
