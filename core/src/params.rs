//! Ordered name/value pairs and their URL-encoded serialization.
//!
//! # Design
//! Query strings and form bodies allow repeated keys, so pairs live in an
//! ordered list rather than a map: appends never de-duplicate and encoding
//! preserves insertion order. Serialization is
//! `application/x-www-form-urlencoded`: UTF-8 percent-encoding, `&` between
//! pairs, `=` within a pair, space as `+`.

use url::form_urlencoded;

/// A single (name, value) pair. Duplicates by name are permitted and preserved.
pub type Pair = (String, String);

/// Serialize pairs as `application/x-www-form-urlencoded`.
///
/// An empty slice encodes to the empty string; callers must not append a
/// stray `?` or write an empty body in that case.
pub fn encode_pairs(pairs: &[Pair]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}
