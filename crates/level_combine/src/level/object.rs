//! A single placed entity inside a level.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::Offset;
use crate::level::field::{self, Field};

/// Order-preserving attribute map attached to every object.
pub type Attributes = Map<String, Value>;

/// Type tag of collectable coins; each one gets a completion flag on save.
pub const COIN_TYPE: &str = "special.coin";

/// One placed entity: a dot-segmented type tag (`"death.basic-spike"`) plus
/// free-form attributes. Only `x`, `y` and `rotation` are ever interpreted;
/// everything else is carried through verbatim.
///
/// `Clone` is a deep copy, so a cloned object never aliases its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Attributes,
}

impl LevelObject {
    pub fn new(kind: impl Into<String>, data: Attributes) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Object with integer `x`/`y` and no other attributes.
    pub fn at(kind: impl Into<String>, x: i64, y: i64) -> Self {
        let mut data = Attributes::new();
        data.insert("x".into(), Value::from(x));
        data.insert("y".into(), Value::from(y));
        Self::new(kind, data)
    }

    pub fn get_data(&self, name: &str) -> Field<i64> {
        field::get(&self.data, name)
    }

    pub fn set_data(&mut self, name: &str, value: Field<i64>) {
        field::set(&mut self.data, name, value);
    }

    pub fn x(&self) -> Field<i64> {
        self.get_data("x")
    }

    pub fn y(&self) -> Field<i64> {
        self.get_data("y")
    }

    pub fn rotation(&self) -> Field<i64> {
        self.get_data("rotation")
    }

    /// Grid cell occupied by this object, if both coordinates are numeric.
    pub fn position(&self) -> Option<Offset> {
        self.x().zip(self.y()).map(|(x, y)| Offset::new(x, y)).into_option()
    }

    /// Translate by `(dx, dy)`. Each axis is skipped when its attribute is
    /// absent or when the sum would overflow `i64`; a skipped axis keeps its
    /// stored value.
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.update_axis("x", |v| v.checked_add(dx));
        self.update_axis("y", |v| v.checked_add(dy));
    }

    /// Rewrite the numeric attribute `name` with `f`. Nothing is written when
    /// the attribute is absent or `f` returns `None`.
    pub fn update_axis(&mut self, name: &str, f: impl FnOnce(i64) -> Option<i64>) {
        let value = self.get_data(name).into_option().and_then(f);
        self.set_data(name, value.into());
    }

    /// Leading segment of the type tag: `"death"` for `"death.basic-spike"`.
    pub fn category(&self) -> &str {
        self.kind.split('.').next().unwrap_or_default()
    }

    pub fn is_coin(&self) -> bool {
        self.kind == COIN_TYPE
    }
}
