/// Implements the constructors shared by the string newtypes in this workspace.
#[macro_export]
macro_rules! impl_text_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }
    };
}
