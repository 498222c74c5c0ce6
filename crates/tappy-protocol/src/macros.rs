/// Declare a typed message whose payload is always empty.
///
/// Any bytes received in the payload of such a message are ignored.
macro_rules! empty_message {
    ($(#[$meta:meta])* $name:ident, $family:expr, $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $crate::message::TypedMessage for $name {
            const FAMILY: tappy_core::CommandFamily = $family;
            const CODE: u8 = $code;
            const NAME: &'static str = stringify!($name);

            fn payload(&self) -> Vec<u8> {
                Vec::new()
            }

            fn parse_payload(_payload: &[u8]) -> tappy_core::Result<Self> {
                Ok($name)
            }
        }
    };
}

/// Declare a `[major, minor]` version response.
macro_rules! version_response {
    ($(#[$meta:meta])* $name:ident, $family:expr, $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub major: u8,
            pub minor: u8,
        }

        impl $name {
            pub fn new(major: u8, minor: u8) -> Self {
                Self { major, minor }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}.{}", self.major, self.minor)
            }
        }

        impl $crate::message::TypedMessage for $name {
            const FAMILY: tappy_core::CommandFamily = $family;
            const CODE: u8 = $code;
            const NAME: &'static str = stringify!($name);

            fn payload(&self) -> Vec<u8> {
                vec![self.major, self.minor]
            }

            fn parse_payload(payload: &[u8]) -> tappy_core::Result<Self> {
                $crate::payload::require_len(stringify!($name), payload, 2)?;
                Ok(Self::new(payload[0], payload[1]))
            }
        }
    };
}

/// Declare an error response carrying an error header and message text.
macro_rules! error_response {
    ($(#[$meta:meta])* $name:ident, $family:expr, $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub error_code: u8,
            pub internal_error_code: u8,
            pub reader_status: u8,
            pub error_message: String,
        }

        impl $name {
            pub fn new(
                error_code: u8,
                internal_error_code: u8,
                reader_status: u8,
                error_message: impl Into<String>,
            ) -> Self {
                Self {
                    error_code,
                    internal_error_code,
                    reader_status,
                    error_message: error_message.into(),
                }
            }
        }

        impl $crate::message::TypedMessage for $name {
            const FAMILY: tappy_core::CommandFamily = $family;
            const CODE: u8 = $code;
            const NAME: &'static str = stringify!($name);

            fn payload(&self) -> Vec<u8> {
                $crate::payload::ErrorFields::encode(
                    self.error_code,
                    self.internal_error_code,
                    self.reader_status,
                    &self.error_message,
                )
            }

            fn parse_payload(payload: &[u8]) -> tappy_core::Result<Self> {
                let fields = $crate::payload::ErrorFields::parse(stringify!($name), payload)?;
                Ok(Self {
                    error_code: fields.error_code,
                    internal_error_code: fields.internal_error_code,
                    reader_status: fields.reader_status,
                    error_message: fields.error_message,
                })
            }
        }
    };
}
