use crate::math::{IVec3, Vec3};

/// Axis-aligned rectangle given by its origin and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy + std::ops::Add<Output = T>> Rect<T> {
    pub fn max_x(&self) -> T {
        self.x + self.width
    }

    pub fn max_y(&self) -> T {
        self.y + self.height
    }
}

/// Axis-aligned box given by its center and half-size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub extents: Vec3,
}

impl Bounds {
    pub const fn new(center: Vec3, extents: Vec3) -> Self {
        Bounds { center, extents }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Bounds {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }
}

/// Integer box given by its minimum corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundsInt {
    pub position: IVec3,
    pub size: IVec3,
}

impl BoundsInt {
    pub const fn new(position: IVec3, size: IVec3) -> Self {
        BoundsInt { position, size }
    }

    pub fn min(&self) -> IVec3 {
        self.position
    }

    pub fn max(&self) -> IVec3 {
        self.position + self.size
    }
}
