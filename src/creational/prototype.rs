//! Prototype
//!
//! Shapes clone themselves through the trait object, so a cache of
//! preconfigured prototypes can hand out copies without knowing their
//! concrete types.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeBase {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

pub trait Shape: Debug {
    fn base(&self) -> &ShapeBase;
    fn clone_box(&self) -> Box<dyn Shape>;
    fn as_any(&self) -> &dyn Any;

    /// Field-wise equality across trait objects; different kinds never match.
    fn same_as(&self, other: &dyn Shape) -> bool;
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub width: i32,
    pub height: i32,
}

impl Shape for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Shape) -> bool {
        other.as_any().downcast_ref::<Circle>() == Some(self)
    }
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Shape) -> bool {
        other.as_any().downcast_ref::<Rectangle>() == Some(self)
    }
}

/// Identity, not equality: true only for the very same allocation.
pub fn is_same_object(a: &dyn Shape, b: &dyn Shape) -> bool {
    std::ptr::eq(a.as_any() as *const dyn Any as *const u8, b.as_any() as *const dyn Any as *const u8)
}

pub const BIG_GREEN_CIRCLE: &str = "Big green circle";
pub const MEDIUM_BLUE_RECTANGLE: &str = "Medium blue rectangle";

#[derive(Debug)]
pub struct BundledShapeCache {
    cache: HashMap<String, Box<dyn Shape>>,
}

impl Default for BundledShapeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BundledShapeCache {
    pub fn new() -> Self {
        let circle = Circle {
            base: ShapeBase {
                x: 5,
                y: 7,
                color: "Green".to_string(),
            },
            radius: 45,
        };
        let rectangle = Rectangle {
            base: ShapeBase {
                x: 6,
                y: 9,
                color: "Blue".to_string(),
            },
            width: 8,
            height: 10,
        };

        let mut cache = Self {
            cache: HashMap::new(),
        };
        cache.put(BIG_GREEN_CIRCLE, Box::new(circle));
        cache.put(MEDIUM_BLUE_RECTANGLE, Box::new(rectangle));
        cache
    }

    /// Registers a prototype, replacing any previous one under `key`.
    pub fn put(&mut self, key: impl Into<String>, shape: Box<dyn Shape>) {
        self.cache.insert(key.into(), shape);
    }

    /// A fresh copy of the prototype stored under `key`.
    pub fn get(&self, key: &str) -> Option<Box<dyn Shape>> {
        self.cache.get(key).map(|prototype| prototype.clone_box())
    }
}
