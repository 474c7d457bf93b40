use std::fmt;

/// Error types that can be built from a plain message.
///
/// Implement this for a crate's error type and invoke [`impl_context!`] next
/// to it to get `.context()` / `.with_context()` on `Result` and `Option`.
pub trait FromMessage: Sized {
    fn from_message(message: String) -> Self;

    /// `"<context>: <source>"`.
    fn from_context(context: impl fmt::Display, source: impl fmt::Display) -> Self {
        Self::from_message(format!("{context}: {source}"))
    }
}

/// Generate a crate-local `Context` extension trait for `Result` and
/// `Option` that converts failures into `$error` through [`FromMessage`].
///
/// ```ignore
/// // in crates/protocol/src/error.rs
/// dialogflow_common::impl_context!(Error);
/// ```
#[macro_export]
macro_rules! impl_context {
    ($error:ty) => {
        pub trait Context<T> {
            fn context(self, context: impl ::std::fmt::Display) -> ::std::result::Result<T, $error>;

            fn with_context<C, F>(self, f: F) -> ::std::result::Result<T, $error>
            where
                C: ::std::fmt::Display,
                F: FnOnce() -> C;
        }

        impl<T, E: ::std::fmt::Display> Context<T> for ::std::result::Result<T, E> {
            fn context(self, context: impl ::std::fmt::Display) -> ::std::result::Result<T, $error> {
                self.map_err(|source| <$error as $crate::FromMessage>::from_context(context, source))
            }

            fn with_context<C, F>(self, f: F) -> ::std::result::Result<T, $error>
            where
                C: ::std::fmt::Display,
                F: FnOnce() -> C,
            {
                self.map_err(|source| <$error as $crate::FromMessage>::from_context(f(), source))
            }
        }

        impl<T> Context<T> for Option<T> {
            fn context(self, context: impl ::std::fmt::Display) -> ::std::result::Result<T, $error> {
                self.ok_or_else(|| <$error as $crate::FromMessage>::from_message(context.to_string()))
            }

            fn with_context<C, F>(self, f: F) -> ::std::result::Result<T, $error>
            where
                C: ::std::fmt::Display,
                F: FnOnce() -> C,
            {
                self.ok_or_else(|| <$error as $crate::FromMessage>::from_message(f().to_string()))
            }
        }
    };
}
