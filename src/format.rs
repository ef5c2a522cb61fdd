#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

use chrono::{DateTime, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use core::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
        }
    }
}

impl Format {
    pub fn message(self, f: &mut fmt::Formatter, msg: &impl ToString) -> fmt::Result {
        let msg = msg.to_string();
        let lines = msg.lines();
        if self.detailed {
            for line in lines {
                writeln!(f, "    {}", line.trim())?;
            }
        } else if let Some(line) = lines.map(str::trim).find(|s| !s.is_empty()) {
            f.write_str(line)?;
        }
        Ok(())
    }

    pub fn position(self, f: &mut fmt::Formatter, position: usize) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, "{}", position.to_string().yellow().bold());
        }
        write!(f, "{}", position)
    }

    pub fn head(self, f: &mut fmt::Formatter, position: usize, head: usize) -> fmt::Result {
        if !self.head || position != head {
            return Ok(());
        }
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(
                f,
                " {}{}{}",
                "[".yellow(),
                "HEAD".cyan().bold(),
                "]".yellow()
            );
        }
        f.write_str(" [HEAD]")
    }

    pub fn timestamp(self, f: &mut fmt::Formatter, at: &DateTime<Utc>) -> fmt::Result {
        let at = at.format("%H:%M:%S").to_string();
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", at.yellow());
        }
        f.write_char(' ')?;
        f.write_str(&at)
    }
}
