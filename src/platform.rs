//! Target platform enumeration and the interactive selection menu.

use std::fmt;
use std::io::{BufRead, Write as _};

/// One of the four supported OS/architecture targets.
///
/// The selector also recognises the two Windows menu entries, but they are
/// explicitly unsupported and never produce a `Platform` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux32,
    Linux64,
    Osx32,
    Osx64,
}

impl Platform {
    /// All supported targets, in menu order.
    pub const ALL: [Self; 4] = [Self::Linux32, Self::Linux64, Self::Osx32, Self::Osx64];

    /// The config key holding this platform's package list.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Linux32 => "linux_32",
            Self::Linux64 => "linux_64",
            Self::Osx32 => "osx_32",
            Self::Osx64 => "osx_64",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Linux32 => "Linux 32 bit",
            Self::Linux64 => "Linux 64 bit",
            Self::Osx32 => "OSX 32 bit",
            Self::Osx64 => "OSX 64 bit",
        }
    }

    /// Whether the post-install library path registration applies.
    #[must_use]
    pub const fn is_linux(self) -> bool {
        matches!(self, Self::Linux32 | Self::Linux64)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const MENU: &str = "\nPlease select your target operating system:\n\
                    \x20 1) Windows 32 bit\n\
                    \x20 2) Windows 64 bit\n\
                    \x20 3) Linux 32 bit\n\
                    \x20 4) Linux 64 bit\n\
                    \x20 5) OSX 32 bit\n\
                    \x20 6) OSX 64 bit\n\
                    \x20 q) Quit\n";

/// Outcome of parsing one line of menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A supported platform was chosen.
    Target(Platform),
    /// A recognised but unsupported entry (the Windows options).
    Unsupported,
    /// Explicit quit request.
    Quit,
    /// Anything else.
    Invalid,
}

/// Parse one line of menu input.
#[must_use]
pub fn parse_selection(input: &str) -> Selection {
    match input.trim() {
        "1" | "2" => Selection::Unsupported,
        "3" => Selection::Target(Platform::Linux32),
        "4" => Selection::Target(Platform::Linux64),
        "5" => Selection::Target(Platform::Osx32),
        "6" => Selection::Target(Platform::Osx64),
        "q" | "Q" | "quit" => Selection::Quit,
        _ => Selection::Invalid,
    }
}

/// Present the platform menu until a supported platform is chosen.
///
/// Returns `None` when the user quits, or on end-of-input so a closed stdin
/// cannot re-prompt forever. Unsupported and invalid selections print
/// distinct messages and re-prompt.
///
/// # Errors
///
/// Returns an error if reading from `input` or flushing stdout fails.
pub fn choose(input: &mut impl BufRead) -> std::io::Result<Option<Platform>> {
    loop {
        println!("{MENU}");
        print!("Enter selection: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }

        match parse_selection(&line) {
            Selection::Target(platform) => return Ok(Some(platform)),
            Selection::Quit => return Ok(None),
            Selection::Unsupported => {
                println!("Currently unsupported target operating system");
            }
            Selection::Invalid => println!("Invalid selection"),
        }
    }
}
