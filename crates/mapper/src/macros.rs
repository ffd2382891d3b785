//! Declarative [`Reflect`](crate::Reflect) implementation for user structs.

/// Implement [`Reflect`](crate::Reflect) for a struct.
///
/// Fields are listed with their types, in declaration order; a field may
/// carry a mapping tag with `=> "tag"`, which participates in the
/// profile-matching fallback chain. The struct must implement `Default`
/// so unmatched destination fields keep their zero values.
///
/// ```
/// use mapper::reflect_struct;
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// pub struct ProductDto {
///     pub id: i64,
///     pub title: String,
/// }
///
/// reflect_struct!(ProductDto {
///     id: i64,
///     title: String => "name",
/// });
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ty { $($field:ident : $fty:ty $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Struct($crate::StructShape {
                    name: ::std::any::type_name::<$ty>(),
                    fields: ::std::vec![
                        $($crate::FieldShape {
                            name: stringify!($field),
                            tag: $crate::__reflect_tag!($($tag)?),
                            shape: <$fty as $crate::Reflect>::shape,
                        },)*
                    ],
                })
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Struct($crate::StructValue {
                    type_name: ::std::any::type_name::<$ty>(),
                    fields: ::std::vec![
                        $((stringify!($field), $crate::Reflect::to_value(&self.$field)),)*
                    ],
                })
            }

            fn from_value(value: &$crate::Value) -> Self {
                let mut out = <$ty as ::std::default::Default>::default();
                if let $crate::Value::Struct(reflected) = value {
                    $(if let ::std::option::Option::Some(field) =
                        reflected.field(stringify!($field))
                    {
                        if !::std::matches!(field, $crate::Value::Skip) {
                            out.$field = $crate::Reflect::from_value(field);
                        }
                    })*
                }
                out
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_tag {
    () => {
        ::std::option::Option::None
    };
    ($tag:literal) => {
        ::std::option::Option::Some($tag)
    };
}
