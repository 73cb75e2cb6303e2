//! Common utility for formatting summaries of meshes and results
//!
//! These are left public for convenience, since the same conventions are
//! wanted anywhere a mesh or manifest is printed.

// standard library
use std::fmt::{Display, LowerExp};

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumFormat {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition. Card times are printed this way.
    ///
    /// ```rust
    /// # use fetools_format::NumFormat;
    /// let number = -1.0;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((250.0).sci(3, 2), "2.500e+02".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // `LowerExp` output always contains 'e'
        let split = num.find('e').unwrap_or(num.len());
        let exp = num.split_off(split);
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', exp.get(1..).unwrap_or("0")),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Join a list of names for display, eliding the middle of long lists
///
/// Field and group lists can be very long for real meshes (thousands of grain
/// elsets are common), so only the first and last few entries are shown.
///
/// ```rust
/// # use fetools_format::elided_list;
/// assert_eq!(elided_list(&["a", "b", "c"], 4), "a, b, c");
/// assert_eq!(elided_list(&[1, 2, 3, 4, 5, 6], 4), "1, 2, ..., 5, 6");
/// assert_eq!(elided_list::<&str>(&[], 4), "none");
/// ```
pub fn elided_list<T: Display>(items: &[T], max: usize) -> String {
    if items.is_empty() {
        return "none".to_string();
    }

    if items.len() <= max {
        return join(items.iter());
    }

    let head = max.div_ceil(2);
    let tail = max / 2;
    f!(
        "{}, ..., {}",
        join(items[..head].iter()),
        join(items[items.len() - tail..].iter())
    )
}

fn join<'a, T: Display + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    items
        .map(|item| f!("{item}"))
        .collect::<Vec<String>>()
        .join(", ")
}
