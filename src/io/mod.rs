use crate::errors::LayoutError;

#[cfg(feature = "dxf-io")]
pub mod dxf;

/// Generic I/O and format‑conversion errors.
///
/// The DXF variant is only constructed with the `dxf-io` feature.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    Layout(LayoutError),

    MalformedInput(String),

    #[cfg(feature = "dxf-io")]
    /// Error bubbled up from the `dxf` crate while reading or writing.
    Dxf(::dxf::DxfError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            Layout(error) => write!(f, "Layout failed: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),

            #[cfg(feature = "dxf-io")]
            Dxf(error) => write!(f, "DXF error: {error}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<LayoutError> for IoError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

#[cfg(feature = "dxf-io")]
impl From<::dxf::DxfError> for IoError {
    fn from(value: ::dxf::DxfError) -> Self {
        Self::Dxf(value)
    }
}
