//! # Closed Vocabularies
//!
//! Many model fields carry one of a fixed set of string codes (a redirect
//! status, a card brand, an intent's next action). Every such field is
//! declared with [`closed_vocabulary!`] and parsed by the single generic
//! [`parse_code`]:
//!
//! - Matching is exact string equality. No case folding, no trimming.
//! - An unknown code yields `None`. There is no default member.
//!
//! The macro also derives `Display` (the code), `FromStr` (failing with
//! [`VocabularyError`](crate::error::VocabularyError)), and serde impls that
//! read and write the code string.

/// A closed enumeration backed by string codes.
pub trait ClosedVocabulary: Sized + Copy + 'static {
    /// Human-readable vocabulary name, used in error messages.
    const NAME: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The wire code of this member.
    fn code(&self) -> &'static str;
}

/// Parse `code` into a member of `T`, or `None` when it is not in the table.
pub fn parse_code<T: ClosedVocabulary>(code: &str) -> Option<T> {
    T::ALL.iter().copied().find(|member| member.code() == code)
}

/// [`parse_code`] over an optional code.
pub fn parse_opt_code<T: ClosedVocabulary>(code: Option<&str>) -> Option<T> {
    code.and_then(parse_code)
}

/// Declare a closed vocabulary.
///
/// ```
/// paymodel_core::closed_vocabulary! {
///     /// Fruit on offer.
///     pub enum Fruit: "fruit" {
///         Apple => "apple",
///         BloodOrange => "blood_orange",
///     }
/// }
///
/// assert_eq!(Fruit::from_code("apple"), Some(Fruit::Apple));
/// assert_eq!(Fruit::from_code("Apple"), None);
/// assert_eq!(Fruit::BloodOrange.to_string(), "blood_orange");
/// ```
#[macro_export]
macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::vocabulary::ClosedVocabulary for $name {
            const NAME: &'static str = $label;
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn code(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code ),+
                }
            }
        }

        impl $name {
            /// Parse a wire code; unknown codes yield `None`.
            pub fn from_code(code: &str) -> ::std::option::Option<Self> {
                $crate::vocabulary::parse_code(code)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::vocabulary::ClosedVocabulary::code(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::VocabularyError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $crate::vocabulary::parse_code(s).ok_or_else(|| $crate::error::VocabularyError::Unknown {
                    vocabulary: $label,
                    code: s.to_string(),
                })
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::vocabulary::ClosedVocabulary::code(self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let code = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                code.parse::<Self>()
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
