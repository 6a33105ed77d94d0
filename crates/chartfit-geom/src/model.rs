use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// One data value to be encoded by area.
///
/// `order` is the caller-defined processing order (e.g. ascending weight for an apex-up
/// pyramid); ties keep input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub id: String,
    pub weight: f64,
    pub order: usize,
}

impl WeightedItem {
    pub fn new(id: impl Into<String>, weight: f64, order: usize) -> Self {
        Self {
            id: id.into(),
            weight,
            order,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() {
            return Err(Error::NonFiniteWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        if self.weight < 0.0 {
            return Err(Error::NegativeWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

/// Builds items from `(id, weight)` pairs, numbering them in input order.
pub fn items_in_order<I, S>(pairs: I) -> Vec<WeightedItem>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(order, (id, weight))| WeightedItem::new(id, weight, order))
        .collect()
}

/// Validates every item and returns them sorted by `order` (stable).
pub(crate) fn validated_in_order(items: &[WeightedItem]) -> Result<Vec<&WeightedItem>> {
    for item in items {
        item.validate()?;
    }
    let mut ordered: Vec<&WeightedItem> = items.iter().collect();
    ordered.sort_by_key(|item| item.order);
    Ok(ordered)
}
