//! Values exchanged between panels and the widget toolkit.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use tickscope_core::geometry::{Bounds, BoundsInt, Rect};
use tickscope_core::math::{IVec2, IVec3, Vec2, Vec3, Vec4};

/// The shape of a value field, fixed at widget creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Text,
    Vec2,
    Vec3,
    Vec4,
    IVec2,
    IVec3,
    Rect,
    RectInt,
    Bounds,
    BoundsInt,
}

impl FieldKind {
    /// Whether the field is edited as a group of numeric components.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            FieldKind::Vec2
                | FieldKind::Vec3
                | FieldKind::Vec4
                | FieldKind::IVec2
                | FieldKind::IVec3
                | FieldKind::Rect
                | FieldKind::RectInt
                | FieldKind::Bounds
                | FieldKind::BoundsInt
        )
    }
}

/// The currently selected entry of an enum field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumChoice {
    /// Position in the option list, `None` if the value is not listed.
    pub index: Option<usize>,
    pub name: &'static str,
}

/// A displayed widget value.
///
/// Equality treats NaN components as equal to each other, so a value always
/// equals itself.
#[derive(Debug, Clone)]
pub enum WidgetValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    IVec2(IVec2),
    IVec3(IVec3),
    Rect(Rect<f32>),
    RectInt(Rect<i32>),
    Bounds(Bounds),
    BoundsInt(BoundsInt),
    Enum(EnumChoice),
    Image(ImageSource),
}

fn same_floats(a: &[f32], b: &[f32]) -> bool {
    a.iter()
        .zip(b)
        .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
}

fn rect_components(rect: &Rect<f32>) -> [f32; 4] {
    [rect.x, rect.y, rect.width, rect.height]
}

impl PartialEq for WidgetValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Vec2(a), Self::Vec2(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Vec3(a), Self::Vec3(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Vec4(a), Self::Vec4(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::IVec2(a), Self::IVec2(b)) => a == b,
            (Self::IVec3(a), Self::IVec3(b)) => a == b,
            (Self::Rect(a), Self::Rect(b)) => same_floats(&rect_components(a), &rect_components(b)),
            (Self::RectInt(a), Self::RectInt(b)) => a == b,
            (Self::Bounds(a), Self::Bounds(b)) => {
                same_floats(&a.center.to_array(), &b.center.to_array())
                    && same_floats(&a.extents.to_array(), &b.extents.to_array())
            }
            (Self::BoundsInt(a), Self::BoundsInt(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Image(a), Self::Image(b)) => a == b,
            _ => false,
        }
    }
}

impl WidgetValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WidgetValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            WidgetValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            WidgetValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            WidgetValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// A value type that can be shown in a value field.
pub trait FieldValue: Clone + PartialEq + 'static {
    const KIND: FieldKind;

    fn to_widget_value(&self) -> WidgetValue;

    /// Convert an edited value back. `None` if the value has the wrong shape.
    fn from_widget_value(value: &WidgetValue) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl FieldValue for $ty {
            const KIND: FieldKind = FieldKind::$kind;

            fn to_widget_value(&self) -> WidgetValue {
                WidgetValue::$variant(*self)
            }

            fn from_widget_value(value: &WidgetValue) -> Option<Self> {
                match value {
                    WidgetValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_field_value!(bool, Bool, Bool);
impl_field_value!(i64, Long, Int);
impl_field_value!(f64, Double, Float);
impl_field_value!(Vec2, Vec2, Vec2);
impl_field_value!(Vec3, Vec3, Vec3);
impl_field_value!(Vec4, Vec4, Vec4);
impl_field_value!(IVec2, IVec2, IVec2);
impl_field_value!(IVec3, IVec3, IVec3);
impl_field_value!(Rect<f32>, Rect, Rect);
impl_field_value!(Rect<i32>, RectInt, RectInt);
impl_field_value!(Bounds, Bounds, Bounds);
impl_field_value!(BoundsInt, BoundsInt, BoundsInt);

impl FieldValue for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn to_widget_value(&self) -> WidgetValue {
        WidgetValue::Int(i64::from(*self))
    }

    fn from_widget_value(value: &WidgetValue) -> Option<Self> {
        value.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_widget_value(&self) -> WidgetValue {
        WidgetValue::Float(f64::from(*self))
    }

    fn from_widget_value(value: &WidgetValue) -> Option<Self> {
        value.as_float().map(|v| v as f32)
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_widget_value(&self) -> WidgetValue {
        WidgetValue::Text(self.clone())
    }

    fn from_widget_value(value: &WidgetValue) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

/// An enum that can be picked from a dropdown.
///
/// ```
/// use tickscope_ui::EnumValue;
///
/// #[derive(Clone, Copy, PartialEq)]
/// enum Quality {
///     Low,
///     High,
/// }
///
/// impl EnumValue for Quality {
///     fn variants() -> &'static [Self] {
///         &[Quality::Low, Quality::High]
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Quality::Low => "Low",
///             Quality::High => "High",
///         }
///     }
/// }
///
/// assert_eq!(Quality::High.name(), "High");
/// ```
pub trait EnumValue: Clone + PartialEq + 'static {
    /// Every selectable value, in display order.
    fn variants() -> &'static [Self];

    fn name(&self) -> &'static str;

    fn choice(&self) -> EnumChoice {
        EnumChoice {
            index: Self::variants().iter().position(|v| v == self),
            name: self.name(),
        }
    }

    fn option_names() -> Vec<String> {
        Self::variants().iter().map(|v| v.name().to_string()).collect()
    }
}

/// A handle to image content owned by the host.
///
/// Two sources are equal only if they share the same allocation, so swapping
/// in new content is always seen as a change, even if the pixels match.
#[derive(Clone)]
pub struct ImageSource(Rc<dyn Any>);

impl ImageSource {
    pub fn new<T: Any>(image: T) -> Self {
        Self(Rc::new(image))
    }

    pub fn from_rc<T: Any>(image: Rc<T>) -> Self {
        Self(image)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageSource({:p})", self.addr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Mode {
        Idle,
        Run,
    }

    impl EnumValue for Mode {
        fn variants() -> &'static [Self] {
            &[Mode::Idle, Mode::Run]
        }

        fn name(&self) -> &'static str {
            match self {
                Mode::Idle => "Idle",
                Mode::Run => "Run",
            }
        }
    }

    #[test]
    fn test_int_field_rejects_out_of_range() {
        assert_eq!(i32::from_widget_value(&WidgetValue::Int(7)), Some(7));
        assert_eq!(i32::from_widget_value(&WidgetValue::Int(i64::MAX)), None);
        assert_eq!(i32::from_widget_value(&WidgetValue::Float(1.0)), None);
    }

    #[test]
    fn test_composite_kinds() {
        assert!(Vec3::KIND.is_composite());
        assert!(Bounds::KIND.is_composite());
        assert!(Rect::<i32>::KIND.is_composite());
        assert!(BoundsInt::KIND.is_composite());
        assert!(!f32::KIND.is_composite());
        assert!(!String::KIND.is_composite());
    }

    #[test]
    fn test_composite_equality_is_structural() {
        let a = Rect::new(0.0, 0.0, 2.0, 3.0).to_widget_value();
        let b = Rect::new(0.0, 0.0, 2.0, 3.0).to_widget_value();
        assert_eq!(a, b);
        assert_ne!(a, Rect::new(0.0, 1.0, 2.0, 3.0).to_widget_value());
    }

    #[test]
    fn test_nan_components_equal_themselves() {
        let a = Vec3::new(f32::NAN, 1.0, 2.0).to_widget_value();
        assert_eq!(a, a.clone());
        assert_ne!(a, Vec3::new(f32::NAN, 1.0, 3.0).to_widget_value());
        assert_eq!(WidgetValue::Float(f64::NAN), WidgetValue::Float(f64::NAN));
        assert_ne!(WidgetValue::Float(f64::NAN), WidgetValue::Float(0.0));
    }

    #[test]
    fn test_integer_composites() {
        let rect = Rect::new(1, 2, 3, 4);
        assert_eq!(Rect::<i32>::KIND, FieldKind::RectInt);
        assert_eq!(Rect::<i32>::from_widget_value(&rect.to_widget_value()), Some(rect));
        assert_eq!(Rect::<i32>::from_widget_value(&Rect::new(1.0, 2.0, 3.0, 4.0).to_widget_value()), None);

        let bounds = BoundsInt::new(IVec3::ZERO, IVec3::ONE);
        assert_eq!(BoundsInt::from_widget_value(&bounds.to_widget_value()), Some(bounds));
    }

    #[test]
    fn test_enum_choice() {
        assert_eq!(
            Mode::Run.choice(),
            EnumChoice {
                index: Some(1),
                name: "Run"
            }
        );
        assert_eq!(Mode::option_names(), vec!["Idle", "Run"]);
    }

    #[test]
    fn test_image_identity() {
        let shared = Rc::new([0u8; 4]);
        let a = ImageSource::from_rc(Rc::clone(&shared));
        let b = ImageSource::from_rc(shared);
        let c = ImageSource::new([0u8; 4]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(c.downcast_ref::<[u8; 4]>(), Some(&[0u8; 4]));
    }
}
