//! Corpus assembly and serialization.
//!
//! A corpus is `[header] + body + [terminator]`: the fixed comment line, the
//! synthesized instruction lines in generation order, and the literal `stop`.
//! Its line count always equals the size that was requested.
//!
//! The writers take the body as an iterator, so a body fresh from
//! [`Synthesizer::lines`] is streamed to disk one line at a time; [`Corpus`]
//! is the in-memory form for callers that want to inspect or render it.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::slice;

use rand::Rng;

use crate::config::{HEADER_COMMENT, MIN_LINES, TERMINATOR};
use crate::error::{HarnessError, Result};
use crate::grammar::InstructionLine;
use crate::synth::Synthesizer;

/// Number of body lines for a corpus of `total_lines` lines.
///
/// Sizes below [`MIN_LINES`] are rejected rather than clamped.
pub fn body_len(total_lines: u64) -> Result<usize> {
    let invalid = || HarnessError::InvalidLineCount {
        requested: total_lines,
    };
    let body = total_lines.checked_sub(MIN_LINES).ok_or_else(invalid)?;
    usize::try_from(body).map_err(|_| invalid())
}

/// A fully assembled, in-memory corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    body: Vec<InstructionLine>,
}

impl Corpus {
    /// Build a corpus of exactly `total_lines` lines using `synth` for the body.
    ///
    /// Fails with [`HarnessError::CorpusTooLarge`] when the body cannot be
    /// allocated.
    pub fn generate<R: Rng>(total_lines: u64, synth: &mut Synthesizer<R>) -> Result<Self> {
        let count = body_len(total_lines)?;
        let mut body = Vec::new();
        body.try_reserve_exact(count)
            .map_err(|_| HarnessError::CorpusTooLarge {
                requested: total_lines,
            })?;
        body.extend(synth.lines(count));
        Ok(Corpus { body })
    }

    pub fn from_body(body: Vec<InstructionLine>) -> Self {
        Corpus { body }
    }

    pub fn header(&self) -> &'static str {
        HEADER_COMMENT
    }

    pub fn body(&self) -> &[InstructionLine] {
        &self.body
    }

    pub fn terminator(&self) -> &'static str {
        TERMINATOR
    }

    /// Header and terminator included.
    pub fn line_count(&self) -> usize {
        self.body.len() + 2
    }

    /// Serialize into any writer; see [`write_lines`].
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        write_lines(out, self.header(), self, self.terminator())
    }

    /// Create or truncate `path` and write the corpus into it.
    pub fn write_file(&self, path: &Path) -> io::Result<()> {
        write_corpus(path, self.header(), self, self.terminator())
    }

    /// Render the whole corpus into a `String`, exactly as it is written to disk.
    pub fn render(&self) -> String {
        let mut buf = Vec::with_capacity(self.line_count() * 24);
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a InstructionLine;
    type IntoIter = slice::Iter<'a, InstructionLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

/// Write `header`, each body line, then `terminator` to `out`.
///
/// Every line but the terminator is followed by `\n`; the terminator ends the
/// stream without a line break.
pub fn write_lines<W, I>(mut out: W, header: &str, body: I, terminator: &str) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: fmt::Display,
{
    writeln!(out, "{}", header)?;
    for line in body {
        writeln!(out, "{}", line)?;
    }
    write!(out, "{}", terminator)?;
    out.flush()
}

/// Create (or truncate) `path` for writing a corpus.
///
/// Fails with the underlying I/O error if the parent directory is missing or
/// not writable, or if `path` itself cannot be opened for writing. Nothing on
/// disk is changed in that case.
pub fn create_corpus_file(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

/// Create (or truncate) the file at `path` and write a corpus into it.
pub fn write_corpus<I>(path: &Path, header: &str, body: I, terminator: &str) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    write_lines(create_corpus_file(path)?, header, body, terminator)
}
