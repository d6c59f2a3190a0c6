//! Macros for ergonomic scene definition.

/// Generate a scene enum, its key enum and the `Scene` implementation.
///
/// Variants may be unit, tuple or struct-like. The key enum has one unit
/// variant per scene variant, with the same name.
///
/// # Example
///
/// ```
/// use waymark::core::Scene;
/// use waymark::scene_enum;
///
/// scene_enum! {
///     pub enum Checkout {
///         Cart,
///         Address { street: String },
///         Payment(u64),
///     }
///     key: CheckoutKey
/// }
///
/// let scene = Checkout::Address { street: "Main".into() };
/// assert_eq!(scene.key(), CheckoutKey::Address);
/// assert_eq!(scene.name(), "Address");
/// assert_eq!(Checkout::Payment(10).key(), CheckoutKey::Payment);
/// ```
#[macro_export]
macro_rules! scene_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
                $( ( $($tuple_ty:ty),* $(,)? ) )?
                $( { $($field:ident : $field_ty:ty),* $(,)? } )?
            ),* $(,)?
        }

        key: $key:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
                $( ( $($tuple_ty),* ) )?
                $( { $($field : $field_ty),* } )?
            ),*
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $key {
            $($variant),*
        }

        impl $crate::core::Scene for $name {
            type Key = $key;

            fn key(&self) -> $key {
                match self {
                    $(Self::$variant { .. } => $key::$variant),*
                }
            }

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }
        }
    };
}
