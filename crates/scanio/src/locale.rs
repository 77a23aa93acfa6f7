//! Numeral symbols used to read localized numbers.

use std::borrow::Cow;

/// The locale-specific spelling of numbers: separators, native digits, sign
/// affixes and the names of the special float values.
///
/// ```rust
/// use scanio::Locale;
///
/// let accounting = Locale::us()
///     .with_tag("en-US-accounting")
///     .with_negative_affixes("(", ")");
/// assert_eq!(accounting.negative_prefix(), "(");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: Cow<'static, str>,
    grouping_separator: Option<char>,
    decimal_separator: char,
    zero_digit: char,
    positive_prefix: Cow<'static, str>,
    positive_suffix: Cow<'static, str>,
    negative_prefix: Cow<'static, str>,
    negative_suffix: Cow<'static, str>,
    nan: Cow<'static, str>,
    infinity: Cow<'static, str>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::us()
    }
}

impl Locale {
    const fn western(tag: &'static str, grouping: char, decimal: char) -> Self {
        Self {
            tag: Cow::Borrowed(tag),
            grouping_separator: Some(grouping),
            decimal_separator: decimal,
            zero_digit: '0',
            positive_prefix: Cow::Borrowed(""),
            positive_suffix: Cow::Borrowed(""),
            negative_prefix: Cow::Borrowed("-"),
            negative_suffix: Cow::Borrowed(""),
            nan: Cow::Borrowed("NaN"),
            infinity: Cow::Borrowed("∞"),
        }
    }

    /// English (United States). The default.
    #[must_use]
    pub const fn us() -> Self {
        Self::western("en-US", ',', '.')
    }

    #[must_use]
    pub const fn uk() -> Self {
        Self::western("en-GB", ',', '.')
    }

    /// The locale-neutral root.
    #[must_use]
    pub const fn root() -> Self {
        Self::western("und", ',', '.')
    }

    #[must_use]
    pub const fn germany() -> Self {
        Self::western("de-DE", '.', ',')
    }

    /// French (France); groups with a narrow no-break space.
    #[must_use]
    pub const fn france() -> Self {
        Self::western("fr-FR", '\u{202f}', ',')
    }

    #[must_use]
    pub const fn switzerland() -> Self {
        Self::western("de-CH", '\u{2019}', '.')
    }

    /// Arabic with Arabic-Indic digits.
    #[must_use]
    pub const fn arabic() -> Self {
        Self {
            tag: Cow::Borrowed("ar-EG"),
            grouping_separator: Some('\u{066c}'),
            decimal_separator: '\u{066b}',
            zero_digit: '\u{0660}',
            positive_prefix: Cow::Borrowed(""),
            positive_suffix: Cow::Borrowed(""),
            negative_prefix: Cow::Borrowed("-"),
            negative_suffix: Cow::Borrowed(""),
            nan: Cow::Borrowed("ليس رقم"),
            infinity: Cow::Borrowed("∞"),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the grouping separator; `None` disables grouped numerals.
    #[must_use]
    pub fn with_grouping_separator(mut self, separator: Option<char>) -> Self {
        self.grouping_separator = separator;
        self
    }

    #[must_use]
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Sets the zero of the native digit run; the nine characters after it
    /// are read as 1 through 9.
    #[must_use]
    pub fn with_zero_digit(mut self, zero: char) -> Self {
        self.zero_digit = zero;
        self
    }

    #[must_use]
    pub fn with_positive_affixes(
        mut self,
        prefix: impl Into<Cow<'static, str>>,
        suffix: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.positive_prefix = prefix.into();
        self.positive_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_negative_affixes(
        mut self,
        prefix: impl Into<Cow<'static, str>>,
        suffix: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.negative_prefix = prefix.into();
        self.negative_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_nan(mut self, nan: impl Into<Cow<'static, str>>) -> Self {
        self.nan = nan.into();
        self
    }

    #[must_use]
    pub fn with_infinity(mut self, infinity: impl Into<Cow<'static, str>>) -> Self {
        self.infinity = infinity.into();
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn grouping_separator(&self) -> Option<char> {
        self.grouping_separator
    }

    #[must_use]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[must_use]
    pub fn zero_digit(&self) -> char {
        self.zero_digit
    }

    #[must_use]
    pub fn positive_prefix(&self) -> &str {
        &self.positive_prefix
    }

    #[must_use]
    pub fn positive_suffix(&self) -> &str {
        &self.positive_suffix
    }

    #[must_use]
    pub fn negative_prefix(&self) -> &str {
        &self.negative_prefix
    }

    #[must_use]
    pub fn negative_suffix(&self) -> &str {
        &self.negative_suffix
    }

    #[must_use]
    pub fn nan(&self) -> &str {
        &self.nan
    }

    #[must_use]
    pub fn infinity(&self) -> &str {
        &self.infinity
    }

    /// Value of `ch` as a digit of this locale's native run, if it is one.
    /// ASCII digits are not part of the native run unless the zero digit is
    /// `'0'`.
    pub(crate) fn native_digit(&self, ch: char) -> Option<u32> {
        let value = u32::from(ch).checked_sub(u32::from(self.zero_digit))?;
        (value < 10).then_some(value)
    }

    /// The native digit with value `value`, if it is a valid character.
    pub(crate) fn native_char(&self, value: u32) -> Option<char> {
        char::from_u32(u32::from(self.zero_digit) + value)
    }

    /// Whether the native digit run differs from ASCII.
    pub(crate) fn has_native_digits(&self) -> bool {
        self.zero_digit != '0'
    }
}
