//! Macros for ergonomic state declarations.

/// Declare a fieldless enum and implement `State` for it.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`,
/// `Serialize` and `Deserialize`, so it can key the machine's tables and
/// travel inside a [`Snapshot`](crate::snapshot::Snapshot). The calling
/// crate needs `serde` as a dependency.
///
/// # Example
///
/// ```
/// use statewise::state_enum;
/// use statewise::core::State;
///
/// state_enum! {
///     pub enum PluginMode {
///         Browse,
///         Edit,
///         Preview,
///     }
/// }
///
/// assert_eq!(PluginMode::Edit.name(), "Edit");
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
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
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
        }
    };
}
