/// Platform-specific functionality: extended-length paths and best-effort
/// owner lookup.
///
/// Owner lookup is implemented for Windows (security descriptor owner SID)
/// and Unix (password database). On any other host it is unsupported and
/// always yields an empty owner.
pub mod long_path;
pub mod owner;

pub use long_path::{extended_length, to_extended_length};
pub use owner::{NoOwner, OwnerResolver, SystemOwner};
