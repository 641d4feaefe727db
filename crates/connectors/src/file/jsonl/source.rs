use crate::file::jsonl::error::FileError;
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
};

const READ_BUFFER_BYTES: usize = 256 * 1024;

/// A non-blank input line and its 1-based position in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: u64,
    pub text: String,
}

/// Forward-only reader producing one non-blank line at a time.
///
/// Both `\n` and `\r\n` terminate a line. Once the stream is exhausted the
/// source keeps returning `None`; it cannot be rewound.
pub struct LineSource<R> {
    lines: Lines<R>,
    line_no: u64,
    blank_lines: u64,
}

impl LineSource<BufReader<File>> {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|err| FileError::from_open(&path.display().to_string(), err))?;
        Ok(Self::new(BufReader::with_capacity(READ_BUFFER_BYTES, file)))
    }
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            lines: reader.lines(),
            line_no: 0,
            blank_lines: 0,
        }
    }

    /// Returns the next non-blank line, `None` at end of input.
    ///
    /// Read failures (including invalid UTF-8) are returned as errors and are
    /// never reported as end of input.
    pub async fn next_line(&mut self) -> Result<Option<RawLine>, FileError> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(text)) => {
                    self.line_no += 1;
                    if text.trim().is_empty() {
                        self.blank_lines += 1;
                        continue;
                    }
                    return Ok(Some(RawLine {
                        number: self.line_no,
                        text,
                    }));
                }
                Ok(None) => return Ok(None),
                Err(source) => {
                    return Err(FileError::Read {
                        line: self.line_no,
                        source,
                    });
                }
            }
        }
    }

    pub fn blank_lines(&self) -> u64 {
        self.blank_lines
    }
}
