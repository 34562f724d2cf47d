//! Response builders
//!
//! One module per ONVIF service. Builders return body fragments only; the
//! dispatcher wraps them with [`crate::soap::envelope::wrap`]. All dynamic
//! text is escaped before insertion.

pub mod device;
pub mod media;
pub mod ptz;
