//! The in-memory value tree shared by both ISLA codecs.
//!
//! Text and binary leaves carry their natural payload type (UTF-8 string vs
//! arbitrary bytes), so the tree comes in two non-generic flavors,
//! [`TextValue`] and [`BinValue`], rather than one value type that has to
//! decide at runtime whether a leaf is a string. They share an accessor
//! vocabulary (`as_*`, `get_*`, `parse_*`, `index`) but are otherwise
//! independent — there is no conversion between them.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// The tag of a [`TextValue`] or [`BinValue`], returned by `kind()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Leaf,
    List,
    Map,
    /// Sentinel for a text scope that was opened but never populated.
    /// [`BinValue`] never produces this kind — the binary format has no
    /// equivalent of an "opened but empty" scope distinct from an empty
    /// list/map.
    None,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Leaf => "leaf",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::None => "none",
        })
    }
}

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Leaf => "leaf",
        ValueKind::List => "list",
        ValueKind::Map => "map",
        ValueKind::None => "none",
    }
}

/// Ordered map backing both [`TextValue::Map`] and [`BinValue::Map`].
///
/// Iteration order is unspecified by the format, but an insertion-ordered
/// map gives deterministic, reproducible output without imposing a sort
/// order on keys — callers who need canonical byte-for-byte output can sort
/// keys themselves before encoding.
pub type ValueMap<K, V> = IndexMap<K, V>;

// ===========================================================================
// TextValue
// ===========================================================================

/// A node in the text-format value tree. Leaves are UTF-8 strings.
#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    Leaf(String),
    List(Vec<TextValue>),
    Map(ValueMap<String, TextValue>),
    /// A scope that was opened in the source but contained no content line
    /// before it dedented or the input ended. Distinct from an empty list
    /// or empty map.
    None,
}

impl TextValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TextValue::Leaf(_) => ValueKind::Leaf,
            TextValue::List(_) => ValueKind::List,
            TextValue::Map(_) => ValueKind::Map,
            TextValue::None => ValueKind::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TextValue::None)
    }

    // -- fallible typed views -----------------------------------------------

    pub fn as_leaf(&self) -> Result<&str> {
        match self {
            TextValue::Leaf(s) => Ok(s),
            other => Err(Error::TypeMismatch {
                expected: "leaf",
                actual: kind_name(other.kind()),
            }),
        }
    }

    pub fn as_list(&self) -> Result<&[TextValue]> {
        match self {
            TextValue::List(l) => Ok(l),
            other => Err(Error::TypeMismatch {
                expected: "list",
                actual: kind_name(other.kind()),
            }),
        }
    }

    pub fn as_map(&self) -> Result<&ValueMap<String, TextValue>> {
        match self {
            TextValue::Map(m) => Ok(m),
            other => Err(Error::TypeMismatch {
                expected: "map",
                actual: kind_name(other.kind()),
            }),
        }
    }

    // -- infallible typed views ----------------------------------------------

    pub fn as_leaf_or_empty(&self) -> &str {
        match self {
            TextValue::Leaf(s) => s,
            _ => "",
        }
    }

    pub fn as_list_or_empty(&self) -> &[TextValue] {
        match self {
            TextValue::List(l) => l,
            _ => &[],
        }
    }

    pub fn as_map_or_empty(&self) -> Cow<'_, ValueMap<String, TextValue>> {
        match self {
            TextValue::Map(m) => Cow::Borrowed(m),
            _ => Cow::Owned(ValueMap::new()),
        }
    }

    // -- indexing -------------------------------------------------------------

    pub fn index(&self, i: usize) -> Result<&TextValue> {
        let list = self.as_list()?;
        list.get(i).ok_or(Error::ListIndexOutOfRange {
            index: i,
            length: list.len(),
        })
    }

    pub fn index_key(&self, key: &str) -> Result<&TextValue> {
        let map = self.as_map()?;
        map.get(key).ok_or_else(|| Error::MapKeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.as_map()?.contains_key(key))
    }

    pub fn get<'v>(&'v self, i: usize, fallback: &'v TextValue) -> &'v TextValue {
        self.index(i).unwrap_or(fallback)
    }

    pub fn get_key<'v>(&'v self, key: &str, fallback: &'v TextValue) -> &'v TextValue {
        self.index_key(key).unwrap_or(fallback)
    }

    pub fn get_leaf<'v>(&'v self, i: usize, fallback: &'v str) -> &'v str {
        match self.index(i) {
            Ok(TextValue::Leaf(s)) => s,
            _ => fallback,
        }
    }

    pub fn get_leaf_key<'v>(&'v self, key: &str, fallback: &'v str) -> &'v str {
        match self.index_key(key) {
            Ok(TextValue::Leaf(s)) => s,
            _ => fallback,
        }
    }

    pub fn get_list<'v>(&'v self, i: usize, fallback: &'v [TextValue]) -> &'v [TextValue] {
        match self.index(i) {
            Ok(TextValue::List(l)) => l,
            _ => fallback,
        }
    }

    pub fn get_list_key<'v>(&'v self, key: &str, fallback: &'v [TextValue]) -> &'v [TextValue] {
        match self.index_key(key) {
            Ok(TextValue::List(l)) => l,
            _ => fallback,
        }
    }

    pub fn get_map<'v>(
        &'v self,
        i: usize,
        fallback: &'v ValueMap<String, TextValue>,
    ) -> &'v ValueMap<String, TextValue> {
        match self.index(i) {
            Ok(TextValue::Map(m)) => m,
            _ => fallback,
        }
    }

    pub fn get_map_key<'v>(
        &'v self,
        key: &str,
        fallback: &'v ValueMap<String, TextValue>,
    ) -> &'v ValueMap<String, TextValue> {
        match self.index_key(key) {
            Ok(TextValue::Map(m)) => m,
            _ => fallback,
        }
    }

    // -- parse family ---------------------------------------------------------

    pub fn parse<T>(&self, i: usize, f: impl FnOnce(&TextValue) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(v) => f(v),
            Err(_) => fallback,
        }
    }

    pub fn parse_key<T>(&self, key: &str, f: impl FnOnce(&TextValue) -> T, fallback: T) -> T {
        match self.index_key(key) {
            Ok(v) => f(v),
            Err(_) => fallback,
        }
    }

    pub fn parse_leaf<T>(&self, i: usize, f: impl FnOnce(&str) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(TextValue::Leaf(s)) => f(s),
            _ => fallback,
        }
    }

    pub fn parse_leaf_key<T>(&self, key: &str, f: impl FnOnce(&str) -> T, fallback: T) -> T {
        match self.index_key(key) {
            Ok(TextValue::Leaf(s)) => f(s),
            _ => fallback,
        }
    }

    pub fn parse_list<T>(&self, i: usize, f: impl FnOnce(&[TextValue]) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(TextValue::List(l)) => f(l),
            _ => fallback,
        }
    }

    pub fn parse_list_key<T>(
        &self,
        key: &str,
        f: impl FnOnce(&[TextValue]) -> T,
        fallback: T,
    ) -> T {
        match self.index_key(key) {
            Ok(TextValue::List(l)) => f(l),
            _ => fallback,
        }
    }

    pub fn parse_map<T>(
        &self,
        i: usize,
        f: impl FnOnce(&ValueMap<String, TextValue>) -> T,
        fallback: T,
    ) -> T {
        match self.index(i) {
            Ok(TextValue::Map(m)) => f(m),
            _ => fallback,
        }
    }

    pub fn parse_map_key<T>(
        &self,
        key: &str,
        f: impl FnOnce(&ValueMap<String, TextValue>) -> T,
        fallback: T,
    ) -> T {
        match self.index_key(key) {
            Ok(TextValue::Map(m)) => f(m),
            _ => fallback,
        }
    }

    // -- iteration --------------------------------------------------------

    /// Visit `(index, value)` pairs if this is a list; yields nothing
    /// otherwise (never an error — wrong-tag iteration is just empty).
    pub fn iter_list(&self) -> Box<dyn Iterator<Item = (usize, &TextValue)> + '_> {
        match self {
            TextValue::List(l) => Box::new(l.iter().enumerate()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Visit `(key, value)` pairs if this is a map; yields nothing
    /// otherwise.
    pub fn iter_map(&self) -> Box<dyn Iterator<Item = (&str, &TextValue)> + '_> {
        match self {
            TextValue::Map(m) => Box::new(m.iter().map(|(k, v)| (k.as_str(), v))),
            _ => Box::new(std::iter::empty()),
        }
    }

    // -- convenience builders -----------------------------------------------

    /// Build a list of leaves from any iterable of string-like items.
    pub fn leaf_list<I, S>(items: I) -> TextValue
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TextValue::List(items.into_iter().map(|s| TextValue::Leaf(s.into())).collect())
    }

    /// Build a map of leaves from any iterable of `(key, value)` string-like
    /// pairs.
    pub fn leaf_map<I, K, S>(items: I) -> TextValue
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        TextValue::Map(
            items
                .into_iter()
                .map(|(k, v)| (k.into(), TextValue::Leaf(v.into())))
                .collect(),
        )
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValue::Leaf(s) => f.write_str(s),
            TextValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            TextValue::Map(map) => {
                f.write_str("[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("]")
            }
            TextValue::None => f.write_str("none"),
        }
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        TextValue::Leaf(s.to_string())
    }
}

impl From<String> for TextValue {
    fn from(s: String) -> Self {
        TextValue::Leaf(s)
    }
}

impl From<Vec<TextValue>> for TextValue {
    fn from(v: Vec<TextValue>) -> Self {
        TextValue::List(v)
    }
}

impl From<ValueMap<String, TextValue>> for TextValue {
    fn from(m: ValueMap<String, TextValue>) -> Self {
        TextValue::Map(m)
    }
}

impl FromIterator<(String, TextValue)> for TextValue {
    fn from_iter<I: IntoIterator<Item = (String, TextValue)>>(iter: I) -> Self {
        TextValue::Map(iter.into_iter().collect())
    }
}

// ===========================================================================
// BinValue
// ===========================================================================

/// A node in the binary-format value tree. Leaves are arbitrary bytes.
///
/// There is no `None` variant: the binary format has no concept of an
/// opened-but-empty scope distinct from an empty list or map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinValue {
    Leaf(Vec<u8>),
    List(Vec<BinValue>),
    Map(ValueMap<Vec<u8>, BinValue>),
}

impl BinValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            BinValue::Leaf(_) => ValueKind::Leaf,
            BinValue::List(_) => ValueKind::List,
            BinValue::Map(_) => ValueKind::Map,
        }
    }

    pub fn as_leaf(&self) -> Result<&[u8]> {
        match self {
            BinValue::Leaf(b) => Ok(b),
            other => Err(Error::TypeMismatch {
                expected: "leaf",
                actual: kind_name(other.kind()),
            }),
        }
    }

    pub fn as_list(&self) -> Result<&[BinValue]> {
        match self {
            BinValue::List(l) => Ok(l),
            other => Err(Error::TypeMismatch {
                expected: "list",
                actual: kind_name(other.kind()),
            }),
        }
    }

    pub fn as_map(&self) -> Result<&ValueMap<Vec<u8>, BinValue>> {
        match self {
            BinValue::Map(m) => Ok(m),
            other => Err(Error::TypeMismatch {
                expected: "map",
                actual: kind_name(other.kind()),
            }),
        }
    }

    pub fn as_leaf_or_empty(&self) -> &[u8] {
        match self {
            BinValue::Leaf(b) => b,
            _ => &[],
        }
    }

    pub fn as_list_or_empty(&self) -> &[BinValue] {
        match self {
            BinValue::List(l) => l,
            _ => &[],
        }
    }

    pub fn as_map_or_empty(&self) -> Cow<'_, ValueMap<Vec<u8>, BinValue>> {
        match self {
            BinValue::Map(m) => Cow::Borrowed(m),
            _ => Cow::Owned(ValueMap::new()),
        }
    }

    pub fn index(&self, i: usize) -> Result<&BinValue> {
        let list = self.as_list()?;
        list.get(i).ok_or(Error::ListIndexOutOfRange {
            index: i,
            length: list.len(),
        })
    }

    pub fn index_key(&self, key: &[u8]) -> Result<&BinValue> {
        let map = self.as_map()?;
        map.get(key).ok_or_else(|| Error::MapKeyNotFound {
            key: String::from_utf8_lossy(key).into_owned(),
        })
    }

    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        Ok(self.as_map()?.contains_key(key))
    }

    pub fn get<'v>(&'v self, i: usize, fallback: &'v BinValue) -> &'v BinValue {
        self.index(i).unwrap_or(fallback)
    }

    pub fn get_key<'v>(&'v self, key: &[u8], fallback: &'v BinValue) -> &'v BinValue {
        self.index_key(key).unwrap_or(fallback)
    }

    pub fn get_leaf<'v>(&'v self, i: usize, fallback: &'v [u8]) -> &'v [u8] {
        match self.index(i) {
            Ok(BinValue::Leaf(b)) => b,
            _ => fallback,
        }
    }

    pub fn get_leaf_key<'v>(&'v self, key: &[u8], fallback: &'v [u8]) -> &'v [u8] {
        match self.index_key(key) {
            Ok(BinValue::Leaf(b)) => b,
            _ => fallback,
        }
    }

    pub fn get_list<'v>(&'v self, i: usize, fallback: &'v [BinValue]) -> &'v [BinValue] {
        match self.index(i) {
            Ok(BinValue::List(l)) => l,
            _ => fallback,
        }
    }

    pub fn get_list_key<'v>(&'v self, key: &[u8], fallback: &'v [BinValue]) -> &'v [BinValue] {
        match self.index_key(key) {
            Ok(BinValue::List(l)) => l,
            _ => fallback,
        }
    }

    pub fn get_map<'v>(
        &'v self,
        i: usize,
        fallback: &'v ValueMap<Vec<u8>, BinValue>,
    ) -> &'v ValueMap<Vec<u8>, BinValue> {
        match self.index(i) {
            Ok(BinValue::Map(m)) => m,
            _ => fallback,
        }
    }

    pub fn get_map_key<'v>(
        &'v self,
        key: &[u8],
        fallback: &'v ValueMap<Vec<u8>, BinValue>,
    ) -> &'v ValueMap<Vec<u8>, BinValue> {
        match self.index_key(key) {
            Ok(BinValue::Map(m)) => m,
            _ => fallback,
        }
    }

    pub fn parse<T>(&self, i: usize, f: impl FnOnce(&BinValue) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(v) => f(v),
            Err(_) => fallback,
        }
    }

    pub fn parse_key<T>(&self, key: &[u8], f: impl FnOnce(&BinValue) -> T, fallback: T) -> T {
        match self.index_key(key) {
            Ok(v) => f(v),
            Err(_) => fallback,
        }
    }

    pub fn parse_leaf<T>(&self, i: usize, f: impl FnOnce(&[u8]) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(BinValue::Leaf(b)) => f(b),
            _ => fallback,
        }
    }

    pub fn parse_leaf_key<T>(&self, key: &[u8], f: impl FnOnce(&[u8]) -> T, fallback: T) -> T {
        match self.index_key(key) {
            Ok(BinValue::Leaf(b)) => f(b),
            _ => fallback,
        }
    }

    pub fn parse_list<T>(&self, i: usize, f: impl FnOnce(&[BinValue]) -> T, fallback: T) -> T {
        match self.index(i) {
            Ok(BinValue::List(l)) => f(l),
            _ => fallback,
        }
    }

    pub fn parse_list_key<T>(
        &self,
        key: &[u8],
        f: impl FnOnce(&[BinValue]) -> T,
        fallback: T,
    ) -> T {
        match self.index_key(key) {
            Ok(BinValue::List(l)) => f(l),
            _ => fallback,
        }
    }

    pub fn parse_map<T>(
        &self,
        i: usize,
        f: impl FnOnce(&ValueMap<Vec<u8>, BinValue>) -> T,
        fallback: T,
    ) -> T {
        match self.index(i) {
            Ok(BinValue::Map(m)) => f(m),
            _ => fallback,
        }
    }

    pub fn parse_map_key<T>(
        &self,
        key: &[u8],
        f: impl FnOnce(&ValueMap<Vec<u8>, BinValue>) -> T,
        fallback: T,
    ) -> T {
        match self.index_key(key) {
            Ok(BinValue::Map(m)) => f(m),
            _ => fallback,
        }
    }

    // -- iteration --------------------------------------------------------

    pub fn iter_list(&self) -> Box<dyn Iterator<Item = (usize, &BinValue)> + '_> {
        match self {
            BinValue::List(l) => Box::new(l.iter().enumerate()),
            _ => Box::new(std::iter::empty()),
        }
    }

    pub fn iter_map(&self) -> Box<dyn Iterator<Item = (&[u8], &BinValue)> + '_> {
        match self {
            BinValue::Map(m) => Box::new(m.iter().map(|(k, v)| (k.as_slice(), v))),
            _ => Box::new(std::iter::empty()),
        }
    }

    // -- convenience builders -----------------------------------------------

    pub fn leaf_list<I, B>(items: I) -> BinValue
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        BinValue::List(items.into_iter().map(|b| BinValue::Leaf(b.into())).collect())
    }

    pub fn leaf_map<I, K, B>(items: I) -> BinValue
    where
        I: IntoIterator<Item = (K, B)>,
        K: Into<Vec<u8>>,
        B: Into<Vec<u8>>,
    {
        BinValue::Map(
            items
                .into_iter()
                .map(|(k, v)| (k.into(), BinValue::Leaf(v.into())))
                .collect(),
        )
    }
}

impl fmt::Display for BinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinValue::Leaf(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
            BinValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            BinValue::Map(map) => {
                f.write_str("[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", String::from_utf8_lossy(k), v)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&[u8]> for BinValue {
    fn from(b: &[u8]) -> Self {
        BinValue::Leaf(b.to_vec())
    }
}

impl From<Vec<u8>> for BinValue {
    fn from(b: Vec<u8>) -> Self {
        BinValue::Leaf(b)
    }
}

impl From<Vec<BinValue>> for BinValue {
    fn from(v: Vec<BinValue>) -> Self {
        BinValue::List(v)
    }
}

impl From<ValueMap<Vec<u8>, BinValue>> for BinValue {
    fn from(m: ValueMap<Vec<u8>, BinValue>) -> Self {
        BinValue::Map(m)
    }
}

impl FromIterator<(Vec<u8>, BinValue)> for BinValue {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, BinValue)>>(iter: I) -> Self {
        BinValue::Map(iter.into_iter().collect())
    }
}
