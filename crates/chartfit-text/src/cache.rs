//! Per-render measurement memo.
//!
//! A [`CachedTextMeasurer`] borrows the backend for the duration of one layout pass and is
//! dropped with it; nothing is shared between renders.

use crate::measure::{TextMeasurer, TextMetrics, TextStyle};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    text: String,
    font_family: Option<String>,
    font_size_bits: u64,
    font_weight: Option<String>,
}

impl MemoKey {
    fn new(text: &str, style: &TextStyle) -> Self {
        Self {
            text: text.to_string(),
            font_family: style.font_family.clone(),
            font_size_bits: style.font_size.to_bits(),
            font_weight: style.font_weight.clone(),
        }
    }
}

pub struct CachedTextMeasurer<'a> {
    inner: &'a dyn TextMeasurer,
    memo: RefCell<FxHashMap<MemoKey, TextMetrics>>,
}

impl<'a> CachedTextMeasurer<'a> {
    pub fn new(inner: &'a dyn TextMeasurer) -> Self {
        Self {
            inner,
            memo: RefCell::new(FxHashMap::default()),
        }
    }

    /// Number of distinct `(text, font)` pairs measured so far.
    pub fn len(&self) -> usize {
        self.memo.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.borrow().is_empty()
    }
}

impl TextMeasurer for CachedTextMeasurer<'_> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let key = MemoKey::new(text, style);
        if let Some(hit) = self.memo.borrow().get(&key) {
            return *hit;
        }
        let metrics = self.inner.measure(text, style);
        self.memo.borrow_mut().insert(key, metrics);
        metrics
    }
}
