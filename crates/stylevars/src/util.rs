use crate::value::Value;
use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Returns the value from a nested map via a dot-formatted path
///
/// `foo.bar.baz` looks up `foo` in `root`, then `bar` inside of it and so on.
/// Any missing or non-indexable step yields `None`.
///
/// Literal dots inside of keys cannot be expressed.
pub(crate) fn dot_access<'v>(root: &'v IndexMap<String, Value>, path: &str) -> Option<&'v Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;

    segments.try_fold(root.get(first)?, |value, segment| value.get(segment))
}

pub(crate) trait RegexExt {
    fn try_replace_all<E>(
        &self,
        haystack: &str,
        replacement: impl FnMut(&Captures) -> Result<String, E>,
    ) -> Result<String, E>;
}

impl RegexExt for Regex {
    /// Like [Regex::replace_all] but the replacement may fail
    ///
    /// The first error aborts and is returned as-is.
    fn try_replace_all<E>(
        &self,
        haystack: &str,
        mut replacement: impl FnMut(&Captures) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut result = String::with_capacity(haystack.len());
        let mut last_end = 0;

        for captures in self.captures_iter(haystack) {
            let Some(full) = captures.get(0) else {
                continue;
            };

            result.push_str(&haystack[last_end..full.start()]);
            result.push_str(&replacement(&captures)?);
            last_end = full.end();
        }

        result.push_str(&haystack[last_end..]);
        Ok(result)
    }
}
