use crate::error::StoreError;
use std::fmt;

/// Separator between the environment segment and the config name in a store key.
pub const KEY_SEPARATOR: char = '/';

/// Longest config name accepted, in bytes. Names become file names, and most filesystems stop at 255.
pub const MAX_NAME_LEN: usize = 255;

/// Config names may not start with this; the prefix is kept for in-flight dump files.
pub const RESERVED_PREFIX: &str = ".cfgsynctmp.";

/// The first segment of every key: a deployment environment such as `prod` or `staging`.
///
/// Never empty and never contains the key separator, whitespace or control characters, so
/// `"<env>/"` is a prefix that no other environment shares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Environment(String);

impl Environment {
    /// The list prefix `"<env>/"` covering exactly the keys of this environment.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}{KEY_SEPARATOR}", self.0)
    }

    /// The full store key `"<env>/<name>"`.
    #[must_use]
    pub fn key(&self, name: &ConfigName) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.0, name.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Environment {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, StoreError> {
        if value.is_empty() {
            return Err(StoreError::InvalidName {
                message: "EMPTY".into(),
                context: Some("Environment cannot be empty".into()),
            });
        }

        if value.chars().any(|c| c == KEY_SEPARATOR || c.is_whitespace() || c.is_control()) {
            return Err(StoreError::InvalidName {
                message: value.to_owned().into(),
                context: Some("Environment contains a separator, whitespace or control character".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Environment {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, StoreError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The second key segment, also used verbatim as a file name by dump and restore.
///
/// Rejects anything that would not land as a single entry inside the target directory:
/// empty names, `.` and `..`, path separators of either platform, NUL and other control characters.
/// Names starting with [`RESERVED_PREFIX`] are refused as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigName(String);

impl ConfigName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ConfigName {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, StoreError> {
        let reason = if value.is_empty() {
            Some("Config name cannot be empty")
        } else if value == "." || value == ".." {
            Some("Config name cannot be a relative directory reference")
        } else if value.len() > MAX_NAME_LEN {
            Some("Config name is too long")
        } else if value.chars().any(|c| c == '/' || c == '\\') {
            Some("Config name contains a path separator")
        } else if value.chars().any(char::is_control) {
            Some("Config name contains a control character")
        } else if value.starts_with(RESERVED_PREFIX) {
            Some("Config name uses the reserved temporary-file prefix")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StoreError::InvalidName {
                message: if value.is_empty() { "EMPTY".into() } else { value.escape_debug().to_string().into() },
                context: Some(reason.into()),
            }),
            None => Ok(Self(value.to_owned())),
        }
    }
}

impl TryFrom<String> for ConfigName {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, StoreError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for ConfigName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
