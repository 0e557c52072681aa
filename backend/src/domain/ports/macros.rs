//! Port error enums carrying a single diagnostic message per variant.
//!
//! ```text
//! define_port_error! {
//!     pub enum LocationStoreError {
//!         Connection => "location store unreachable: {message}",
//!     }
//! }
//! ```
//!
//! expands to `LocationStoreError::Connection { message: String }`, a
//! `thiserror` display built from the template, a snake_case constructor
//! taking `impl Into<String>` and a `message()` accessor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $template:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($template)]
                $variant { message: String },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build a [`" $name "::" $variant "`] error."]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                )+

                /// Diagnostic text supplied by the adapter.
                pub fn message(&self) -> &str {
                    match self {
                        $(Self::$variant { message } => message.as_str(),)+
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
