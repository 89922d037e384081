//! C++ native peer generation.

pub mod constants;
pub mod mangle;
pub mod peer;
pub mod signature;
pub mod types;

pub use constants::{define_for_static, format_constant};
pub use mangle::{MangleContext, mangle};
pub use peer::{PEER_SUFFIX, PeerGenerator, PeerSource};
pub use signature::{class_descriptor, method_descriptor, type_descriptor};
pub use types::{NativeTypeCategory, ReturnCategory};
