//! Macros for defining kind enums.

/// Macro for defining a kind enum: a closed catalog of values, each one
/// having a fixed textual name.
///
/// The textual name is used both for [`Display`]/[`FromStr`] and for
/// (de)serialization, and the variants are listed in [`ALL`] in the order of
/// their declaration.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube => "cube",
///
///         #[doc = "A sphere"]
///         Sphere => "sphere",
///     }
/// }
///
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!(Kind::ALL, &[Kind::Cube, Kind::Sphere]);
/// ```
///
/// [`ALL`]: #associatedconstant.ALL
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident => $text:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[strum(serialize = $text)]
                $variant,
            )*
        }

        impl $name {
            /// All the variants, in the order of their declaration.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the textual name of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }

        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                let text = <
                    ::std::string::String
                        as $crate::private::serde::Deserialize
                >::deserialize(deserializer)?;
                text.parse().map_err(|_| {
                    <D::Error as $crate::private::serde::de::Error>::custom(
                        ::std::format!(
                            "invalid `{}` value: {text}",
                            ::core::stringify!($name),
                        ),
                    )
                })
            }
        }
    };
}
