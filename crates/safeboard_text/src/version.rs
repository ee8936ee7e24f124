use std::fmt;

use serde::{Deserialize, Serialize};

/// Network protocol version of a connected client.
///
/// Text conversion is parameterized by this so that features the client
/// cannot display are downgraded instead of being sent as-is.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub i32);

impl ProtocolVersion {
    /// 1.8.x
    pub const V1_8: Self = Self(47);
    /// 1.13
    pub const V1_13: Self = Self(393);
    /// 1.16, first version with RGB colors and fonts.
    pub const V1_16: Self = Self(735);
    /// 1.20.3, first version with score number formats.
    pub const V1_20_3: Self = Self(765);
    /// 1.21
    pub const LATEST: Self = Self(767);

    pub const fn supports_rgb(self) -> bool {
        self.0 >= Self::V1_16.0
    }

    pub const fn supports_fonts(self) -> bool {
        self.0 >= Self::V1_16.0
    }

    pub const fn supports_number_format(self) -> bool {
        self.0 >= Self::V1_20_3.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl From<i32> for ProtocolVersion {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "protocol {}", self.0)
    }
}
