use std::io::{self, Write};

use uploader_core::Notice;

use super::render::DisplayCommand;

/// Paints display commands to a writer, skipping sections that did not change.
pub struct Terminal<W: Write, E: Write> {
    out: W,
    err: E,
    last_progress: Option<u8>,
    last_sessions: Vec<String>,
    last_table: Vec<String>,
}

impl Terminal<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> Terminal<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            last_progress: None,
            last_sessions: Vec::new(),
            last_table: Vec::new(),
        }
    }

    pub fn apply(&mut self, commands: Vec<DisplayCommand>) -> io::Result<()> {
        for command in commands {
            match command {
                DisplayCommand::SetProgress { percent, text } => {
                    if self.last_progress != Some(percent) {
                        writeln!(self.out, "{text}")?;
                        self.last_progress = Some(percent);
                    }
                }
                DisplayCommand::ShowSessions { lines } => {
                    if lines != self.last_sessions {
                        for line in &lines {
                            writeln!(self.out, "{line}")?;
                        }
                        self.last_sessions = lines;
                    }
                }
                DisplayCommand::ReplaceTable { lines } => {
                    // Every repaint prints the whole listing, never a partial diff.
                    if lines != self.last_table {
                        writeln!(self.out)?;
                        for line in &lines {
                            writeln!(self.out, "{line}")?;
                        }
                        writeln!(self.out)?;
                        self.last_table = lines;
                    }
                }
            }
        }
        self.out.flush()
    }

    /// Notices go straight to the error stream, before anything else is painted.
    pub fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        writeln!(self.err, "!! {notice}")?;
        self.err.flush()
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}
