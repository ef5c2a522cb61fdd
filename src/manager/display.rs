use crate::format::Format;
use crate::{Entry, OperationManager, OperationRecord};
use core::fmt::{self, Write};

/// Configurable display formatting for the [`OperationManager`].
///
/// Records are listed newest first, numbered from `1`. The line numbered `0`
/// is the state before anything was recorded.
pub struct Display<'a, A, S> {
    manager: &'a OperationManager<A, S>,
    format: Format,
}

impl<A, S> Display<'_, A, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }
}

impl<A: fmt::Display, S> Display<'_, A, S> {
    fn fmt_list(
        &self,
        f: &mut fmt::Formatter,
        position: usize,
        entry: Option<&Entry<OperationRecord<A>>>,
    ) -> fmt::Result {
        self.format.position(f, position)?;

        if let Some(entry) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.recorded_at())?;
            }
        }

        let head = self.manager.cursor.map_or(0, |cursor| cursor + 1);
        self.format.head(f, position, head)?;

        match entry {
            Some(entry) if self.format.detailed => {
                writeln!(f)?;
                self.format.message(f, entry)
            }
            Some(entry) => {
                f.write_char(' ')?;
                self.format.message(f, entry)?;
                writeln!(f)
            }
            None => writeln!(f),
        }
    }
}

impl<'a, A, S> From<&'a OperationManager<A, S>> for Display<'a, A, S> {
    fn from(manager: &'a OperationManager<A, S>) -> Self {
        Display {
            manager,
            format: Format::default(),
        }
    }
}

impl<A: fmt::Display, S> fmt::Display for Display<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.manager.entries.iter().enumerate().rev() {
            self.fmt_list(f, i + 1, Some(entry))?;
        }
        self.fmt_list(f, 0, None)
    }
}
