//! Sentence-block extraction from CoNLL-2009 annotation.
//!
//! Annotation files address sentences while excerpts are expressed in
//! pages of the primary data. Each sentence is mapped to the pages it
//! occupies, and every page that passes the [`PageFilter`] produces one
//! block:
//!
//! ```text
//! # sentenceIndex=<1-based sentence>
//! # pageIndex=<1-based page>
//! <sentence lines>
//!
//! ```
//!
//! A sentence spanning two selected pages is written twice, once per page.
//! The scan ends as soon as the filter has passed its last fragment.

use std::io::{self, BufRead, Read, Write};
use std::sync::Arc;

use serde::Serialize;

use super::{check_content_type, require_fragments, ExcerptError, ExcerptHandler, Loaded, SourceFormat};
use super::filter::PageFilter;
use crate::fragment::{set, Fragment};
use crate::mapping::{Mapping, MappingError};

/// Reads sentences, i.e. maximal runs of content lines.
///
/// A content line is non-blank after trimming and does not start with `#`.
/// Blank lines and comment lines both terminate a sentence.
#[derive(Debug)]
pub struct SentenceReader<R> {
    reader: R,
    lines: Vec<String>,
    buf: String,
}

impl<R: BufRead> SentenceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lines: Vec::new(),
            buf: String::new(),
        }
    }

    /// Advance to the next sentence. Returns false at end of input.
    ///
    /// The lines of the previous sentence are discarded first.
    pub fn next_sentence(&mut self) -> io::Result<bool> {
        self.lines.clear();

        while let Some(line) = self.read_line()? {
            if is_content_line(&line) {
                self.lines.push(line);
            } else if !self.lines.is_empty() {
                break;
            }
        }

        Ok(!self.lines.is_empty())
    }

    /// Raw lines of the current sentence, without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the current sentence, one line per line.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        let line = self.buf.trim_end_matches(['\n', '\r']);
        Ok(Some(line.to_string()))
    }
}

fn is_content_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// Counters of one sentence excerpt run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentenceStats {
    pub sentences_read: u64,
    pub blocks_written: u64,
    /// True if no further page could match while unread sentences remained
    pub stopped_early: bool,
}

/// Write the sentence blocks selected by page `fragments` to `writer`.
///
/// `fragments` must be sorted and disjoint. The mapping translates 0-based
/// sentence ordinals into 0-based page ranges; sentences outside its domain
/// or with an inverted range are skipped. A sentence spanning more than
/// `max_fan_out` pages fails the run.
pub fn excerpt_sentences<R, M, W>(
    reader: R,
    mapping: &M,
    fragments: &[Fragment],
    writer: &mut W,
    max_fan_out: u64,
) -> Result<SentenceStats, ExcerptError>
where
    R: BufRead,
    M: Mapping + ?Sized,
    W: Write + ?Sized,
{
    let mut filter = PageFilter::new(fragments);
    let mut sentences = SentenceReader::new(reader);
    let mut stats = SentenceStats::default();

    loop {
        if filter.is_eos() {
            stats.stopped_early = sentences.next_sentence()?;
            break;
        }
        if !sentences.next_sentence()? {
            break;
        }
        let sentence = stats.sentences_read;
        stats.sentences_read += 1;

        let (begin, end) = match mapping.target_range(sentence) {
            Ok((begin, end)) if begin <= end => (begin, end),
            Ok((begin, end)) => {
                tracing::debug!(sentence, begin, end, "skipping sentence with inverted page range");
                continue;
            }
            Err(MappingError::OutOfRange { .. }) => {
                tracing::debug!(sentence, "skipping sentence outside of mapping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if end - begin >= max_fan_out {
            return Err(ExcerptError::FanOut {
                sentence: sentence + 1,
                fan_out: (end - begin).saturating_add(1),
                max: max_fan_out,
            });
        }

        for page in begin..=end {
            let page = page.checked_add(1).ok_or(MappingError::Overflow {
                index: page,
                offset: 1,
            })?;
            if filter.test(page)? {
                writeln!(writer, "# sentenceIndex={}", sentence + 1)?;
                writeln!(writer, "# pageIndex={}", page)?;
                sentences.write_to(writer)?;
                writer.write_all(b"\n")?;
                stats.blocks_written += 1;
            }
        }
    }

    writer.flush()?;
    tracing::debug!(
        sentences = stats.sentences_read,
        blocks = stats.blocks_written,
        stopped_early = stats.stopped_early,
        "sentence excerpt finished"
    );
    Ok(stats)
}

#[derive(Debug)]
struct Source {
    text: String,
    sentences: u64,
}

/// Excerpt handler for CoNLL-2009 files, one segment per sentence.
///
/// Fragments passed to `excerpt` address pages of the primary data.
#[derive(Debug)]
pub struct ConllHandler {
    mapping: Arc<dyn Mapping>,
    max_fan_out: u64,
    source: Loaded<Source>,
}

impl ConllHandler {
    pub fn new(mapping: Arc<dyn Mapping>, max_fan_out: u64) -> Self {
        Self {
            mapping,
            max_fan_out,
            source: Loaded::default(),
        }
    }
}

impl ExcerptHandler for ConllHandler {
    fn format(&self) -> SourceFormat {
        SourceFormat::Conll09
    }

    fn segment_label(&self) -> &'static str {
        "sentence"
    }

    fn init(&mut self, content_type: &str, input: &mut dyn Read) -> Result<(), ExcerptError> {
        self.source.ensure_fresh()?;
        check_content_type(self.format(), content_type)?;

        let mut text = String::new();
        input.read_to_string(&mut text)?;

        let mut reader = SentenceReader::new(text.as_bytes());
        let mut sentences = 0u64;
        while reader.next_sentence()? {
            sentences += 1;
        }
        if sentences == 0 {
            return Err(ExcerptError::EmptyResource(self.segment_label()));
        }

        tracing::debug!(sentences, "loaded CoNLL annotation");
        self.source = Loaded::Ready(Source { text, sentences });
        Ok(())
    }

    fn segments(&self) -> Result<u64, ExcerptError> {
        Ok(self.source.get()?.sentences)
    }

    fn excerpt(&self, fragments: &[Fragment], output: &mut dyn Write) -> Result<(), ExcerptError> {
        let source = self.source.get()?;
        require_fragments(fragments)?;

        let mut pages = fragments.to_vec();
        set::normalize(&mut pages);

        excerpt_sentences(
            source.text.as_bytes(),
            self.mapping.as_ref(),
            &pages,
            output,
            self.max_fan_out,
        )?;
        Ok(())
    }

    fn close(&mut self) {
        self.source.close();
    }
}
