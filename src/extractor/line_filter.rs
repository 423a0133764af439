use std::fmt;
use std::io::{self, BufRead, Write};

/// Literal prefix key supplied by the caller.
///
/// Nothing about the token is checked: `2024-13-99` is a valid key that
/// matches no line, and the empty key matches every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDate(String);

impl TargetDate {
    pub fn new<S: Into<String>>(date: S) -> Self {
        Self(date.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ordinal, case-sensitive comparison of the key's bytes. Lines
    /// shorter than the key never match.
    pub fn matches(&self, line: &[u8]) -> bool {
        line.starts_with(self.as_bytes())
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetDate {
    fn from(date: &str) -> Self {
        Self::new(date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_scanned: u64,
    pub lines_matched: u64,
    pub bytes_scanned: u64,
    pub bytes_written: u64,
}

/// Copy every line of `reader` that starts with `target` into `writer`,
/// each followed by a single `\n`.
///
/// Lines are split on `\n` only; anything else (including a `\r` before the
/// newline, or invalid UTF-8) stays part of the line. A trailing line with
/// no newline still counts. `on_line` is called after each line with the
/// running totals.
pub fn filter_lines<R, W, F>(
    target: &TargetDate,
    reader: &mut R,
    writer: &mut W,
    mut on_line: F,
) -> io::Result<FilterStats>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    F: FnMut(&FilterStats),
{
    let mut stats = FilterStats::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }

        stats.lines_scanned += 1;
        stats.bytes_scanned += read as u64;

        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        if target.matches(line) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
            stats.lines_matched += 1;
            stats.bytes_written += line.len() as u64 + 1;
        }

        on_line(&stats);
    }

    Ok(stats)
}
