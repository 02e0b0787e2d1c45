/// Best-effort file owner lookup.
///
/// Owner resolution is a capability the extractor consults but never lets
/// fail a record: every lookup problem collapses to `None`, which the
/// report renders as an empty cell.
use std::fs::Metadata;
use std::path::Path;
use tracing::debug;

/// Resolves the display name of a file's owner.
pub trait OwnerResolver {
    /// Owner display string, or `None` when it cannot be determined.
    ///
    /// `meta` is the stat result the caller already holds for `path`.
    fn resolve(&self, path: &Path, meta: &Metadata) -> Option<String>;
}

/// Never resolves an owner. Used when owner lookup is switched off or the
/// report has no owner column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOwner;

impl OwnerResolver for NoOwner {
    fn resolve(&self, _path: &Path, _meta: &Metadata) -> Option<String> {
        None
    }
}

/// Host owner lookup.
///
/// - Windows: owner SID from the file's security descriptor, rendered as
///   `DOMAIN\name`.
/// - Unix: owning uid (from the caller's metadata, no second stat) looked
///   up in the password database.
/// - Elsewhere: unsupported, always `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOwner;

impl OwnerResolver for SystemOwner {
    fn resolve(&self, path: &Path, meta: &Metadata) -> Option<String> {
        let owner = imp::lookup(path, meta);
        if owner.is_none() {
            debug!("No owner resolved for {}", path.display());
        }
        owner
    }
}

#[cfg(windows)]
mod imp {
    use std::fs::Metadata;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Foundation::{LocalFree, ERROR_SUCCESS, HLOCAL};
    use windows::Win32::Security::Authorization::{GetNamedSecurityInfoW, SE_FILE_OBJECT};
    use windows::Win32::Security::{
        LookupAccountSidW, OWNER_SECURITY_INFORMATION, PSECURITY_DESCRIPTOR, PSID, SID_NAME_USE,
    };

    /// Maximum account and domain name length (UNLEN / DNLEN are far smaller).
    const NAME_CAPACITY: usize = 256;

    pub(super) fn lookup(path: &Path, _meta: &Metadata) -> Option<String> {
        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();

        let mut owner = PSID::default();
        let mut descriptor = PSECURITY_DESCRIPTOR::default();
        // SAFETY: `wide` is NUL-terminated and outlives the call; the out
        // pointers reference live locals.
        let status = unsafe {
            GetNamedSecurityInfoW(
                PCWSTR(wide.as_ptr()),
                SE_FILE_OBJECT,
                OWNER_SECURITY_INFORMATION,
                Some(&mut owner as *mut PSID),
                None,
                None,
                None,
                &mut descriptor,
            )
        };
        if status != ERROR_SUCCESS {
            return None;
        }

        // `owner` points into `descriptor`, so resolve before freeing it.
        let name = account_name(owner);
        // SAFETY: the descriptor was allocated by GetNamedSecurityInfoW with
        // LocalAlloc and is not used after this point.
        unsafe {
            let _ = LocalFree(HLOCAL(descriptor.0));
        }
        name
    }

    fn account_name(sid: PSID) -> Option<String> {
        let mut name = [0u16; NAME_CAPACITY];
        let mut domain = [0u16; NAME_CAPACITY];
        let mut name_len = NAME_CAPACITY as u32;
        let mut domain_len = NAME_CAPACITY as u32;
        let mut sid_use = SID_NAME_USE::default();

        // SAFETY: buffers and their lengths match; `sid` is valid while the
        // owning security descriptor is alive.
        unsafe {
            LookupAccountSidW(
                PCWSTR::null(),
                sid,
                PWSTR(name.as_mut_ptr()),
                &mut name_len,
                PWSTR(domain.as_mut_ptr()),
                &mut domain_len,
                &mut sid_use,
            )
        }
        .ok()?;

        let name = String::from_utf16_lossy(&name[..name_len as usize]);
        let domain = String::from_utf16_lossy(&domain[..domain_len as usize]);
        if domain.is_empty() {
            Some(name)
        } else {
            Some(format!("{domain}\\{name}"))
        }
    }
}

#[cfg(unix)]
mod imp {
    use std::ffi::CStr;
    use std::fs::Metadata;
    use std::os::unix::fs::MetadataExt;
    use std::path::Path;
    use std::{mem, ptr};

    pub(super) fn lookup(_path: &Path, meta: &Metadata) -> Option<String> {
        user_name(meta.uid())
    }

    pub(super) fn user_name(uid: libc::uid_t) -> Option<String> {
        let mut buf = vec![0; 2048];
        let mut passwd = unsafe { mem::zeroed::<libc::passwd>() };
        let mut result = ptr::null_mut::<libc::passwd>();

        loop {
            let r = unsafe {
                libc::getpwuid_r(uid, &mut passwd, buf.as_mut_ptr(), buf.len(), &mut result)
            };
            if r != libc::ERANGE {
                break;
            }
            let newsize = buf.len().checked_mul(2)?;
            buf.resize(newsize, 0);
        }

        // No such user, or the lookup failed.
        if result.is_null() || passwd.pw_name.is_null() {
            return None;
        }

        // SAFETY: pw_name points into `buf`, which is still alive.
        let name = unsafe { CStr::from_ptr(passwd.pw_name) };
        Some(name.to_string_lossy().into_owned())
    }
}

#[cfg(not(any(windows, unix)))]
mod imp {
    use std::fs::Metadata;
    use std::path::Path;

    pub(super) fn lookup(_path: &Path, _meta: &Metadata) -> Option<String> {
        None
    }
}
