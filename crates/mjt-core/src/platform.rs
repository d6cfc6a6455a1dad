//! Platform-specific path syntax rules.
//!
//! Validity is judged per target platform rather than portably: a path that
//! is fine on Linux may be rejected for Windows. The checks are purely
//! syntactic and never touch the filesystem.
//!
//! | platform  | invalid chars                    | max length | other rules |
//! |-----------|----------------------------------|------------|-------------|
//! | linux     | NUL                              | 4096 bytes | component ≤ 255 bytes |
//! | macos     | NUL, `:`                         | 1024 bytes | component ≤ 255 bytes |
//! | windows   | `<>"\|?*`, U+0000–U+001F, `:`*   | 260 chars  | reserved device names, no trailing `.`/space |
//! | universal | union of the above               | 260 chars  | union of the above |
//!
//! \* `:` is allowed as the drive-letter separator (`C:`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::errors::CoreError;

const POSIX_COMPONENT_MAX: usize = 255;
const LINUX_PATH_MAX: usize = 4096;
const MACOS_PATH_MAX: usize = 1024;
const WINDOWS_PATH_MAX: usize = 260;

const WINDOWS_INVALID_CHARS: &[char] = &['<', '>', '"', '|', '?', '*', ':'];

const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Rule set a path is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    Macos,
    Universal,
}

impl Platform {
    /// Rules of the platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Linux
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Universal => "universal",
        }
    }

    const fn windows_rules(self) -> bool {
        matches!(self, Self::Windows | Self::Universal)
    }

    const fn max_len(self) -> usize {
        match self {
            Self::Linux => LINUX_PATH_MAX,
            Self::Macos => MACOS_PATH_MAX,
            Self::Windows | Self::Universal => WINDOWS_PATH_MAX,
        }
    }

    fn is_invalid_char(self, ch: char) -> bool {
        if ch == '\0' {
            return true;
        }
        match self {
            Self::Linux => false,
            Self::Macos => ch == ':',
            Self::Windows | Self::Universal => {
                u32::from(ch) < 0x20 || WINDOWS_INVALID_CHARS.contains(&ch)
            }
        }
    }

    fn is_separator(self, ch: char) -> bool {
        ch == '/' || (self.windows_rules() && ch == '\\')
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::Macos),
            "universal" => Ok(Self::Universal),
            other => Err(CoreError::InvalidPlatform(other.to_string())),
        }
    }
}

/// Why a path failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathIssue {
    #[error("path is empty")]
    Empty,

    #[error("path is {len} long, {platform} allows at most {max}")]
    TooLong {
        len: usize,
        max: usize,
        platform: Platform,
    },

    #[error("component '{component}' is {len} bytes long, at most {max} allowed")]
    ComponentTooLong {
        component: String,
        len: usize,
        max: usize,
    },

    #[error("invalid character {ch:?} in '{component}' for {platform}")]
    InvalidChar {
        ch: char,
        component: String,
        platform: Platform,
    },

    #[error("'{0}' is a reserved device name on windows")]
    ReservedName(String),

    #[error("'{0}' ends with a space or period, not allowed on windows")]
    TrailingDotOrSpace(String),
}

/// Check `path` against the syntax rules of `platform`.
///
/// # Errors
///
/// The first [`PathIssue`] found, scanning components left to right.
pub fn validate_filepath(path: &Path, platform: Platform) -> Result<(), PathIssue> {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return Err(PathIssue::Empty);
    }

    let len = if platform.windows_rules() {
        text.chars().count()
    } else {
        text.len()
    };
    if len > platform.max_len() {
        return Err(PathIssue::TooLong {
            len,
            max: platform.max_len(),
            platform,
        });
    }

    let body = if platform.windows_rules() {
        strip_drive(&text)
    } else {
        &text
    };

    for component in body
        .split(|ch| platform.is_separator(ch))
        .filter(|c| !c.is_empty())
    {
        validate_component(component, platform)?;
    }

    Ok(())
}

/// `true` when [`validate_filepath`] accepts `path`.
#[must_use]
pub fn is_valid_filepath(path: &Path, platform: Platform) -> bool {
    validate_filepath(path, platform).is_ok()
}

fn validate_component(component: &str, platform: Platform) -> Result<(), PathIssue> {
    if component.len() > POSIX_COMPONENT_MAX {
        return Err(PathIssue::ComponentTooLong {
            component: component.to_string(),
            len: component.len(),
            max: POSIX_COMPONENT_MAX,
        });
    }

    if let Some(ch) = component.chars().find(|ch| platform.is_invalid_char(*ch)) {
        return Err(PathIssue::InvalidChar {
            ch,
            component: component.to_string(),
            platform,
        });
    }

    if platform.windows_rules() && !matches!(component, "." | "..") {
        if is_reserved_name(component) {
            return Err(PathIssue::ReservedName(component.to_string()));
        }
        if component.ends_with(' ') || component.ends_with('.') {
            return Err(PathIssue::TrailingDotOrSpace(component.to_string()));
        }
    }

    Ok(())
}

fn strip_drive(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &text[2..]
    } else {
        text
    }
}

fn is_reserved_name(component: &str) -> bool {
    let stem = component.split('.').next().unwrap_or(component).trim_end();
    WINDOWS_RESERVED_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(stem))
}

/// Rewrite every normal component of `path` so it satisfies `platform`.
///
/// Invalid characters are dropped, trailing spaces and periods stripped,
/// reserved device names get `_` appended to their stem (`CON.obj` becomes
/// `CON_.obj`), and over-long components cut at a char boundary. A component
/// that sanitizes to nothing becomes `_` so the directory depth is unchanged.
#[must_use]
pub fn sanitize_filepath(path: &Path, platform: Platform) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => {
                out.push(sanitize_component(&name.to_string_lossy(), platform));
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn sanitize_component(component: &str, platform: Platform) -> String {
    let mut cleaned: String = component
        .chars()
        .filter(|ch| !platform.is_invalid_char(*ch) && !platform.is_separator(*ch))
        .collect();

    if platform.windows_rules() {
        let trimmed_len = cleaned.trim_end_matches([' ', '.']).len();
        cleaned.truncate(trimmed_len);
        if is_reserved_name(&cleaned) {
            let at = cleaned.find('.').unwrap_or(cleaned.len());
            cleaned.insert(at, '_');
        }
    }

    if cleaned.len() > POSIX_COMPONENT_MAX {
        let mut cut = POSIX_COMPONENT_MAX;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }

    if cleaned.is_empty() {
        cleaned.push('_');
    }
    cleaned
}

/// String form of `path` with `/` separators.
#[must_use]
pub fn to_posix_string(path: &Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("assets/Box_1/mesh.obj", Platform::Linux, true)]
    #[case("assets/Box_1/mesh.obj", Platform::Windows, true)]
    #[case("", Platform::Linux, false)]
    #[case("a\0b.obj", Platform::Linux, false)]
    #[case("a:b.obj", Platform::Linux, true)]
    #[case("a:b.obj", Platform::Macos, false)]
    #[case("a:b.obj", Platform::Windows, false)]
    #[case("C:\\assets\\box.obj", Platform::Windows, true)]
    #[case("dir/what?.obj", Platform::Linux, true)]
    #[case("dir/what?.obj", Platform::Windows, false)]
    #[case("dir/<tag>.xml", Platform::Windows, false)]
    #[case("dir/CON", Platform::Windows, false)]
    #[case("dir/con.txt", Platform::Windows, false)]
    #[case("dir/CONSOLE.txt", Platform::Windows, true)]
    #[case("dir/LPT3.obj", Platform::Universal, false)]
    #[case("dir/trailing. /mesh.obj", Platform::Windows, false)]
    #[case("dir/trailing. /mesh.obj", Platform::Linux, true)]
    #[case("../up/./mesh.obj", Platform::Windows, true)]
    #[case("tab\there.obj", Platform::Windows, false)]
    fn validity_table(#[case] path: &str, #[case] platform: Platform, #[case] valid: bool) {
        assert_eq!(is_valid_filepath(Path::new(path), platform), valid, "{path} on {platform}");
    }

    #[test]
    fn component_length_limit_is_enforced() {
        let long = "a".repeat(256);
        let issue = validate_filepath(Path::new(&long), Platform::Linux).unwrap_err();
        assert!(matches!(issue, PathIssue::ComponentTooLong { len: 256, .. }));
    }

    #[test]
    fn windows_total_length_limit_is_enforced() {
        let path = format!("{}/{}", "a".repeat(200), "b".repeat(100));
        assert!(is_valid_filepath(Path::new(&path), Platform::Linux));
        let issue = validate_filepath(Path::new(&path), Platform::Windows).unwrap_err();
        assert!(matches!(issue, PathIssue::TooLong { max: 260, .. }));
    }

    #[test]
    fn issue_message_names_the_component() {
        let issue = validate_filepath(Path::new("dir/bad|name.obj"), Platform::Windows).unwrap_err();
        let text = issue.to_string();
        assert!(text.contains("bad|name.obj"), "{text}");
        assert!(text.contains("windows"), "{text}");
    }

    #[rstest]
    #[case("dir/what?.obj", "dir/what.obj")]
    #[case("dir/a<b>c.obj", "dir/abc.obj")]
    #[case("Box_1 ./mesh.obj", "Box_1/mesh.obj")]
    #[case("dir/CON.obj", "dir/CON_.obj")]
    #[case("dir/???", "dir/_")]
    fn sanitize_table(#[case] input: &str, #[case] expected: &str) {
        let out = sanitize_filepath(Path::new(input), Platform::Universal);
        assert_eq!(out, PathBuf::from(expected));
        assert!(is_valid_filepath(&out, Platform::Universal));
    }

    #[test]
    fn sanitize_keeps_root_and_parent_components() {
        let out = sanitize_filepath(Path::new("/data/../objs/x*.obj"), Platform::Universal);
        assert_eq!(out, PathBuf::from("/data/../objs/x.obj"));
    }

    #[test]
    fn platform_parses_aliases() {
        assert_eq!("win32".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("Darwin".parse::<Platform>().unwrap(), Platform::Macos);
        assert!(matches!(
            "beos".parse::<Platform>(),
            Err(CoreError::InvalidPlatform(name)) if name == "beos"
        ));
    }

    #[test]
    fn posix_string_uses_forward_slashes() {
        let path = Path::new("assets").join("box.obj");
        assert_eq!(to_posix_string(&path), "assets/box.obj");
    }
}
