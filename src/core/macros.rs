//! Macros for declaring phase enums.

/// Generate a [`State`](crate::core::State) implementation for a plain enum.
///
/// Extra attributes are forwarded, so `#[derive(Copy, Eq, Hash)]` can be
/// added on top of the generated `Clone, PartialEq, Debug` and serde derives.
///
/// # Example
///
/// ```
/// use pagefade::state_enum;
/// use pagefade::core::State;
///
/// state_enum! {
///     pub enum RevealState {
///         Waiting,
///         Revealed,
///     }
///     final: [Revealed]
/// }
///
/// assert_eq!(RevealState::Waiting.name(), "Waiting");
/// assert!(RevealState::Revealed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
