//! Wire codec for the backslash-delimited status protocol.
//!
//! A reply datagram is a flat sequence of `\key\value` pairs, optionally
//! wrapped in one leading and one trailing backslash. Decoding never fails:
//! malformed payloads degrade to a partial or empty table.

use log::debug;
use std::collections::HashMap;

/// Field delimiter used by both requests and replies.
pub const DELIMITER: char = '\\';

/// The only request this client speaks.
pub const QUERY_REQUEST: &[u8] = b"\\players\\final\\";

/// Ordered key/value table decoded from a reply.
///
/// Keys keep the position of their first arrival; a later duplicate
/// overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl KeyValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returning the previous value when the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Value for `key`, or the empty string when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = KeyValueTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

pub fn encode_request() -> &'static [u8] {
    QUERY_REQUEST
}

/// True when `bytes` is exactly the status request.
pub fn is_query_request(bytes: &[u8]) -> bool {
    bytes == QUERY_REQUEST
}

/// Decodes a raw reply datagram into a [`KeyValueTable`].
///
/// Invalid UTF-8 is replaced rather than rejected, one leading and one
/// trailing delimiter are stripped, empty tokens are kept, and an odd
/// trailing token is dropped.
pub fn decode_reply(bytes: &[u8]) -> KeyValueTable {
    let text = String::from_utf8_lossy(bytes);
    debug!("Raw reply ({} bytes): {:?}", bytes.len(), text);

    let body = text.strip_prefix(DELIMITER).unwrap_or(&text);
    let body = body.strip_suffix(DELIMITER).unwrap_or(body);

    let tokens: Vec<&str> = body.split(DELIMITER).collect();
    if tokens.len() % 2 != 0 {
        debug!(
            "Dropping unpaired trailing token {:?}",
            tokens.last().copied().unwrap_or_default()
        );
    }

    let table: KeyValueTable = tokens
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();

    debug!("Decoded {} fields from {} tokens", table.len(), tokens.len());
    table
}

/// Encodes a table as a reply payload, `\k1\v1\k2\v2\`.
///
/// An empty table encodes to an empty payload. Keys or values containing
/// the delimiter are written as-is and will not survive a decode.
pub fn encode_reply(table: &KeyValueTable) -> Vec<u8> {
    if table.is_empty() {
        return Vec::new();
    }

    let mut out = String::new();
    for (key, value) in table.iter() {
        out.push(DELIMITER);
        out.push_str(key);
        out.push(DELIMITER);
        out.push_str(value);
    }
    out.push(DELIMITER);
    out.into_bytes()
}
