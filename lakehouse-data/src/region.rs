//! Region to service-URL resolution.

use strum::{Display, EnumIter, EnumString};

/// The regions the Lakehouse Data service is deployed in.
///
/// ## Examples
///
/// ```rust
/// use lakehouse_data::Region;
///
/// let region: Region = "eu-de".parse().unwrap();
/// assert_eq!(region.service_url(), "https://api.eu-de.lakehouse.dev");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Region {
    /// Dallas.
    UsSouth,
    /// Washington DC.
    UsEast,
    /// London.
    EuGb,
    /// Frankfurt.
    EuDe,
    /// Tokyo.
    JpTok,
    /// Sydney.
    AuSyd,
}

impl Region {
    /// Returns the public endpoint for this region.
    pub fn service_url(&self) -> &'static str {
        match self {
            Self::UsSouth => "https://api.us-south.lakehouse.dev",
            Self::UsEast => "https://api.us-east.lakehouse.dev",
            Self::EuGb => "https://api.eu-gb.lakehouse.dev",
            Self::EuDe => "https://api.eu-de.lakehouse.dev",
            Self::JpTok => "https://api.jp-tok.lakehouse.dev",
            Self::AuSyd => "https://api.au-syd.lakehouse.dev",
        }
    }
}
