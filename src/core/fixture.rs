//! # Fixture Reader Module / Fixture 读取模块
//!
//! Parses the line-oriented fixture format into [`TestCase`] values.
//! A block is five non-comment lines followed by optional extra lines and a
//! `--` terminator:
//!
//! 将面向行的 fixture 格式解析为 [`TestCase`] 值。
//! 每个块由五个非注释行组成，后跟可选的额外行和 `--` 终止符：
//!
//! ```text
//! # comment lines start with '#'
//! <test name>
//! <space-separated CLI arguments>
//! <expected integer exit code>
//! <expected stdout regular expression>
//! <expected stderr regular expression>
//! [optional extra lines]
//! --
//! ```
//!
//! A malformed block yields one [`FixtureError`] and the reader resumes at the
//! next block.

use std::fmt;
use std::io::{self, BufRead};
use thiserror::Error;

use crate::core::models::{OutputPattern, TestCase};

/// The line that closes a case definition.
pub const TERMINATOR: &str = "--";

/// Marks a comment when it is the first character of a line.
pub const COMMENT_MARKER: u8 = b'#';

/// Which captured stream a pattern applies to.
/// 模式所适用的捕获流。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Problems found while reading a fixture.
/// Everything except [`FixtureError::Io`] only invalidates a single block.
///
/// 读取 fixture 时发现的问题。
/// 除 [`FixtureError::Io`] 外，其他错误只会使单个块无效。
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Premature test case definition end")]
    UnnamedEnd { line: usize },

    #[error("Premature test case definition '{name}' end")]
    PrematureEnd { name: String, line: usize },

    #[error("Invalid exit status value for test case '{name}'")]
    InvalidStatus {
        name: String,
        value: String,
        line: usize,
    },

    #[error("Invalid {stream} regexp in test case '{name}'")]
    InvalidPattern {
        name: String,
        stream: Stream,
        line: usize,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read fixture: {0}")]
    Io(#[from] io::Error),
}

impl FixtureError {
    /// Line number (1-based) the diagnostic refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            FixtureError::UnnamedEnd { line }
            | FixtureError::PrematureEnd { line, .. }
            | FixtureError::InvalidStatus { line, .. }
            | FixtureError::InvalidPattern { line, .. } => Some(*line),
            FixtureError::Io(_) => None,
        }
    }

    /// `true` when the rest of the fixture can no longer be read.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FixtureError::Io(_))
    }
}

/// A forward-only reader yielding one item per fixture block.
///
/// 一个只向前读取的读取器，每个 fixture 块产生一项。
pub struct FixtureReader<R> {
    source: R,
    line_no: usize,
    finished: bool,
}

impl<R: BufRead> FixtureReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            line_no: 0,
            finished: false,
        }
    }

    /// Next non-comment line with trailing whitespace removed, or `None` at end of input.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.source.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if buf.first() != Some(&COMMENT_MARKER) {
                return Ok(Some(String::from_utf8_lossy(&buf).trim_end().to_string()));
            }
        }
    }

    /// Fetches a mandatory field of the case named `name`.
    fn field(&mut self, name: &str, block_start: usize) -> Result<String, FixtureError> {
        match self.next_line()? {
            Some(line) if line != TERMINATOR => Ok(line),
            _ => Err(FixtureError::PrematureEnd {
                name: name.to_string(),
                line: block_start,
            }),
        }
    }

    /// Consumes lines up to and including the terminator, or to end of input.
    fn skip_block(&mut self) -> io::Result<()> {
        while let Some(line) = self.next_line()? {
            if line == TERMINATOR {
                break;
            }
        }
        Ok(())
    }

    fn read_case(&mut self) -> Result<Option<TestCase>, FixtureError> {
        let Some(name) = self.next_line()? else {
            return Ok(None);
        };
        let block_start = self.line_no;
        if name == TERMINATOR {
            return Err(FixtureError::UnnamedEnd { line: block_start });
        }

        let args = self
            .field(&name, block_start)?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let status = self.field(&name, block_start)?;
        let expected_status = match status.trim().parse::<i32>() {
            Ok(code) => code,
            Err(_) => {
                self.skip_block()?;
                return Err(FixtureError::InvalidStatus {
                    name,
                    value: status,
                    line: block_start,
                });
            }
        };

        let expected_stdout = self.pattern(&name, Stream::Stdout, block_start)?;
        let expected_stderr = self.pattern(&name, Stream::Stderr, block_start)?;

        // Anything between the stderr pattern and the terminator is reserved.
        self.skip_block()?;

        Ok(Some(TestCase {
            name,
            args,
            expected_status,
            expected_stdout,
            expected_stderr,
        }))
    }

    fn pattern(
        &mut self,
        name: &str,
        stream: Stream,
        block_start: usize,
    ) -> Result<OutputPattern, FixtureError> {
        let source = self.field(name, block_start)?;
        match OutputPattern::compile(&source) {
            Ok(pattern) => Ok(pattern),
            Err(source) => {
                self.skip_block()?;
                Err(FixtureError::InvalidPattern {
                    name: name.to_string(),
                    stream,
                    line: block_start,
                    source,
                })
            }
        }
    }
}

impl<R: BufRead> Iterator for FixtureReader<R> {
    type Item = Result<TestCase, FixtureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_case() {
            Ok(Some(case)) => Some(Ok(case)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                if err.is_fatal() {
                    self.finished = true;
                }
                Some(Err(err))
            }
        }
    }
}

/// Parses a whole fixture held in memory.
///
/// 解析保存在内存中的整个 fixture。
pub fn parse_str(text: &str) -> FixtureReader<io::Cursor<&[u8]>> {
    FixtureReader::new(io::Cursor::new(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> (Vec<TestCase>, Vec<FixtureError>) {
        let mut cases = Vec::new();
        let mut errors = Vec::new();
        for item in parse_str(text) {
            match item {
                Ok(case) => cases.push(case),
                Err(err) => errors.push(err),
            }
        }
        (cases, errors)
    }

    #[test]
    fn reads_cases_in_file_order() {
        let text = "\
# leading comment
help
--help
0
.*Usage.*
^$
--
no-args

2
^$
.*missing.*
--
";
        let (cases, errors) = collect(text);
        assert!(errors.is_empty());
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "help");
        assert_eq!(cases[0].args, vec!["--help"]);
        assert_eq!(cases[0].expected_status, 0);
        assert_eq!(cases[0].expected_stdout.as_str(), ".*Usage.*");
        assert_eq!(cases[0].expected_stderr.as_str(), "^$");
        assert_eq!(cases[1].name, "no-args");
        assert!(cases[1].args.is_empty());
        assert_eq!(cases[1].expected_status, 2);
    }

    #[test]
    fn comments_inside_a_block_are_skipped() {
        let text = "verify\n# the jar to check\n-v  signed.jar\n# exit code\n0\n.*\n.*\n--\n";
        let (cases, errors) = collect(text);
        assert!(errors.is_empty());
        assert_eq!(cases[0].args, vec!["-v", "signed.jar"]);
    }

    #[test]
    fn extra_lines_before_terminator_are_ignored() {
        let text = "a\nx\n0\n.*\n.*\nreserved: 1\nmore\n--\nb\ny\n1\n.*\n.*\n--\n";
        let (cases, errors) = collect(text);
        assert!(errors.is_empty());
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn last_block_may_end_at_end_of_input() {
        let (cases, errors) = collect("a\nx\n0\n.*\n.*");
        assert!(errors.is_empty());
        assert_eq!(cases.len(), 1);
    }

    #[test]
    fn empty_fixture_yields_nothing() {
        let (cases, errors) = collect("");
        assert!(cases.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn missing_stderr_field_abandons_only_that_case() {
        let text = "help\n--help\n0\n.*Usage.*\n--\nnext\n\n0\n^$\n^$\n--\n";
        let (cases, errors) = collect(text);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Premature test case definition 'help' end"
        );
        assert_eq!(errors[0].line(), Some(1));
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "next");
    }

    #[test]
    fn truncated_block_at_end_of_input_is_diagnosed() {
        let (cases, errors) = collect("help\n--help\n");
        assert!(cases.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FixtureError::PrematureEnd { .. }));
    }

    #[test]
    fn stray_terminator_is_reported_without_a_name() {
        let (cases, errors) = collect("--\na\nx\n0\n.*\n.*\n--\n");
        assert_eq!(cases.len(), 1);
        assert_eq!(errors[0].to_string(), "Premature test case definition end");
    }

    #[test]
    fn invalid_exit_status_skips_to_terminator() {
        let text = "bad\nx\nzero\n.*\n.*\n--\ngood\ny\n0\n.*\n.*\n--\n";
        let (cases, errors) = collect(text);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Invalid exit status value for test case 'bad'"
        );
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "good");
    }

    #[test]
    fn exit_status_allows_sign_and_padding() {
        let (cases, _) = collect("neg\nx\n -1 \n.*\n.*\n--\n");
        assert_eq!(cases[0].expected_status, -1);
    }

    #[test]
    fn invalid_pattern_abandons_the_case() {
        let text = "bad\nx\n0\n(unclosed\n.*\n--\nbad-err\nx\n0\n.*\n[z-a]\n--\ngood\nx\n0\n.*\n.*\n--\n";
        let (cases, errors) = collect(text);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].to_string(),
            "Invalid stdout regexp in test case 'bad'"
        );
        assert_eq!(
            errors[1].to_string(),
            "Invalid stderr regexp in test case 'bad-err'"
        );
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "good");
    }

    #[test]
    fn invalid_utf8_does_not_stop_the_reader() {
        let bytes: &[u8] = b"# caf\xe9 signer\nhelp\n--help\n0\n.*\n^$\n--\nl\xe9gacy\n\n0\n.*\n.*\n--\n";
        let cases: Vec<_> = FixtureReader::new(bytes).collect::<Result<_, _>>().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "help");
        assert_eq!(cases[0].args, vec!["--help"]);
        assert_eq!(cases[1].name, "l\u{FFFD}gacy");
    }

    #[test]
    fn io_errors_stop_the_reader() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut reader = FixtureReader::new(io::BufReader::new(Broken));
        let first = reader.next();
        assert!(matches!(first, Some(Err(FixtureError::Io(_)))));
        assert!(reader.next().is_none());
    }
}
