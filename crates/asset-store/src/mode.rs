use std::fmt;

const DIR_BIT: u32 = 1 << 31;
const PERM_MASK: u32 = 0o777;
const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;

/// File mode: unix permission bits plus a directory flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    /// Mode of a regular file with the given permission bits.
    pub const fn file(perm: u32) -> Self {
        Self(perm & PERM_MASK)
    }

    /// Mode of a directory with the given permission bits.
    pub const fn dir(perm: u32) -> Self {
        Self(DIR_BIT | (perm & PERM_MASK))
    }

    /// Convert a unix `st_mode` value (file type and permissions).
    pub fn from_unix(mode: u32) -> Self {
        if mode & S_IFMT == S_IFDIR {
            Self::dir(mode)
        } else {
            Self::file(mode)
        }
    }

    pub const fn is_dir(self) -> bool {
        self.0 & DIR_BIT != 0
    }

    pub const fn permissions(self) -> u32 {
        self.0 & PERM_MASK
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(10);
        out.push(if self.is_dir() { 'd' } else { '-' });
        for shift in [6u32, 3, 0] {
            let bits = (self.permissions() >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&out)
    }
}
