/// Configuration options for the octet parser.
///
/// These options bound the resources a single parse may consume: how deep
/// containers may nest and how wide the fixed-point number fields may grow.
///
/// # Examples
///
/// ```rust
/// use jsonoctet::{Parser, ParserOptions};
///
/// let options = ParserOptions {
///     max_depth: 32,
///     ..Default::default()
/// };
/// let mut buffer = [0u8; 64];
/// // 32 levels need four bytes of nesting stack.
/// let parser = Parser::<_, 4>::with_options(&mut buffer, options, |_, _| Ok(()));
/// assert!(parser.is_valid());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum container nesting depth.
    ///
    /// A document nested exactly this deep is accepted; one more level fails
    /// with [`ParseError::TooDeep`](crate::ParseError::TooDeep). The limit
    /// that applies is the smaller of this value and the bit capacity of the
    /// parser's nesting stack (`STACK_BYTES * 8`).
    ///
    /// # Default
    ///
    /// `8`
    pub max_depth: u16,

    /// Largest value the number mantissa may hold.
    ///
    /// Integer digits that would push the mantissa past this value fail with
    /// [`ParseError::NumberOverflow`](crate::ParseError::NumberOverflow).
    /// Excess fraction digits are dropped instead.
    ///
    /// # Default
    ///
    /// `u32::MAX`
    pub max_mantissa: u64,

    /// Largest decimal exponent magnitude accepted after `e`/`E`.
    ///
    /// # Default
    ///
    /// `u8::MAX`
    pub max_exponent: u16,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on parse errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_mantissa: u64::from(u32::MAX),
            max_exponent: u16::from(u8::MAX),
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
