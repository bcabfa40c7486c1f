//! Placeholder substitution for bundle messages.
//!
//! Patterns follow the familiar `MessageFormat` conventions: `{0}` refers to
//! the first positional argument, `{name}` to a named one, and an optional
//! style may follow a comma (`{0,number}`, `{0,number,integer}`,
//! `{0,number,percent}`). A single quote starts or ends a literal section and
//! `''` produces one quote. Placeholders without a matching argument are
//! copied through unchanged.
//!
//! A [`MessageFormatter`] is built for each call and never shared, so
//! concurrent formatting on one bundle cannot observe another caller's
//! arguments.

use std::collections::HashMap;

use fixed_decimal::{Decimal, FloatPrecision, SignDisplay};
use fluent_bundle::FluentValue;
use fluent_bundle::types::FluentNumber;
use icu::decimal::DecimalFormatter;
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::locale::Locale as IcuLocale;
use tracing::debug;

use crate::Locale;

const DEFAULT_MAX_FRACTION_DIGITS: usize = 3;
const MAX_FRACTION_DIGITS: i16 = 20;

/// Supplies values for placeholders by name.
///
/// Slices answer to decimal indices (`"0"`, `"1"`, …); maps answer to their
/// keys.
pub trait ArgumentSource {
    /// Value for the placeholder called `name`.
    fn argument(&self, name: &str) -> Option<&FluentValue<'_>>;
}

impl ArgumentSource for [FluentValue<'_>] {
    fn argument(&self, name: &str) -> Option<&FluentValue<'_>> {
        name.parse::<usize>().ok().and_then(|index| self.get(index))
    }
}

impl<const N: usize> ArgumentSource for [FluentValue<'_>; N] {
    fn argument(&self, name: &str) -> Option<&FluentValue<'_>> {
        self.as_slice().argument(name)
    }
}

impl ArgumentSource for Vec<FluentValue<'_>> {
    fn argument(&self, name: &str) -> Option<&FluentValue<'_>> {
        self.as_slice().argument(name)
    }
}

impl<S: std::hash::BuildHasher> ArgumentSource for HashMap<&str, FluentValue<'_>, S> {
    fn argument(&self, name: &str) -> Option<&FluentValue<'_>> {
        self.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    Default,
    Integer,
    Percent,
}

/// Formats a single pattern against one set of arguments.
///
/// Numbers are rendered with the CLDR decimal symbols and grouping rules of
/// the locale, falling back through its more general tags and finally to the
/// root data.
pub struct MessageFormatter<'a, A: ArgumentSource + ?Sized> {
    locale: IcuLocale,
    args: &'a A,
}

impl<'a, A: ArgumentSource + ?Sized> MessageFormatter<'a, A> {
    /// Creates a formatter rendering numbers for `locale`.
    #[must_use]
    pub fn new(locale: &Locale, args: &'a A) -> Self {
        Self {
            locale: icu_locale(locale),
            args,
        }
    }

    /// Substitutes every placeholder in `pattern`.
    #[must_use]
    pub fn format(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len());
        let mut chars = pattern.chars().peekable();
        let mut quoted = false;
        while let Some(ch) = chars.next() {
            match ch {
                '\'' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    out.push('\'');
                }
                '\'' => quoted = !quoted,
                '{' if !quoted => {
                    let mut body = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        body.push(inner);
                    }
                    if closed {
                        self.render_placeholder(&body, &mut out);
                    } else {
                        out.push('{');
                        out.push_str(&body);
                    }
                }
                other => out.push(other),
            }
        }
        out
    }

    fn render_placeholder(&self, body: &str, out: &mut String) {
        let mut parts = body.split(',').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let style = match (parts.next(), parts.next()) {
            (Some("number"), Some("integer")) => NumberStyle::Integer,
            (Some("number"), Some("percent")) => NumberStyle::Percent,
            _ => NumberStyle::Default,
        };
        match self.args.argument(name) {
            Some(FluentValue::String(text)) => out.push_str(text),
            Some(FluentValue::Number(number)) => out.push_str(&self.number(number, style)),
            _ => {
                out.push('{');
                out.push_str(body);
                out.push('}');
            }
        }
    }

    fn number(&self, number: &FluentNumber, style: NumberStyle) -> String {
        let Ok(mut decimal) = Decimal::try_from_f64(number.value, FloatPrecision::RoundTrip) else {
            return number.value.to_string();
        };
        let options = &number.options;
        match style {
            NumberStyle::Default => {
                let min_fraction = fraction_digits(options.minimum_fraction_digits.unwrap_or(0));
                let max_fraction = fraction_digits(
                    options
                        .maximum_fraction_digits
                        .unwrap_or(DEFAULT_MAX_FRACTION_DIGITS),
                )
                .max(min_fraction);
                if *decimal.magnitude_range().start() < -max_fraction {
                    decimal.round(-max_fraction);
                }
                decimal.trim_end();
                decimal.pad_end(-min_fraction);
            }
            NumberStyle::Integer => decimal.round(0),
            NumberStyle::Percent => {
                decimal.multiply_pow10(2);
                decimal.round(0);
            }
        }
        decimal.apply_sign_display(SignDisplay::Negative);

        let mut text = self.render(&decimal, options.use_grouping);
        if style == NumberStyle::Percent {
            text.push('%');
        }
        text
    }

    fn render(&self, decimal: &Decimal, use_grouping: bool) -> String {
        let mut options = DecimalFormatterOptions::default();
        if !use_grouping {
            options.grouping_strategy = Some(GroupingStrategy::Never);
        }
        match DecimalFormatter::try_new(self.locale.clone().into(), options) {
            Ok(formatter) => formatter.format(decimal).to_string(),
            Err(err) => {
                debug!(locale = %self.locale, error = %err, "no decimal data, using plain digits");
                decimal.to_string()
            }
        }
    }
}

/// ICU locale for `locale`, trying ever more general tags before the root.
fn icu_locale(locale: &Locale) -> IcuLocale {
    std::iter::successors(Some(locale.clone()), Locale::fallback)
        .find_map(|candidate| candidate.tag().parse::<IcuLocale>().ok())
        .unwrap_or(icu::locale::locale!("und"))
}

fn fraction_digits(digits: usize) -> i16 {
    i16::try_from(digits)
        .unwrap_or(MAX_FRACTION_DIGITS)
        .min(MAX_FRACTION_DIGITS)
}

/// Formats `pattern` for `locale` using `args`.
///
/// # Examples
///
/// ```
/// use fluent_bundle::FluentValue;
/// use locale_bundle::{bundle::format_message, locale};
///
/// let args = [FluentValue::from("Ada"), FluentValue::from(1234.5)];
/// let text = format_message("{0} owes {1}", &locale::of("de"), &args);
/// assert_eq!(text, "Ada owes 1.234,5");
/// ```
#[must_use]
pub fn format_message<A: ArgumentSource + ?Sized>(pattern: &str, locale: &Locale, args: &A) -> String {
    MessageFormatter::new(locale, args).format(pattern)
}
