//! Single-pass line classifier for JavaScript-like source text.
//!
//! Every line is either code or blank/comment. The scanner tracks the state
//! that crosses line boundaries (an open `/* */` comment, an open string
//! continued with a trailing backslash) and nothing else.
//!
//! A `/` that does not start a comment may be division or the start of a
//! regular expression literal. Telling those apart needs a real parser, so
//! the scanner never tries. It marks the line as code and skips the rest of
//! it, unless the rest of the line could change how *later* lines are read
//! (a `/*`, or a quote on a line that ends in a continuation backslash). In
//! that case the whole file is rejected with [`Unsupported`] instead of
//! risking a wrong count.

use std::fmt;

use thiserror::Error;

use super::stats::LineCounts;

/// Why a file could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// `*/` seen outside of a block comment
    UnexpectedBlockCommentEnd,
    /// `/*` later on a line that contains an ambiguous `/`
    BlockCommentAfterAmbiguousSlash,
    /// A quote after an ambiguous `/` on a line ending in `\`
    MultiLineStringAfterAmbiguousSlash,
    /// String literal still open at a line end without continuation
    UnclosedStringAtEndOfLine,
    /// Block comment still open at end of file
    UnclosedBlockComment,
    /// String literal still open at end of file
    UnclosedStringAtEndOfFile,
}

impl UnsupportedKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnexpectedBlockCommentEnd => {
                "unexpected block-comment end while not in a block comment"
            }
            Self::BlockCommentAfterAmbiguousSlash => {
                "potential block-comment start after a possible regular-expression literal"
            }
            Self::MultiLineStringAfterAmbiguousSlash => {
                "potential multi-line string literal after a possible regular-expression literal"
            }
            Self::UnclosedStringAtEndOfLine => "unclosed string literal at end of line",
            Self::UnclosedBlockComment => "unclosed block comment at end of file",
            Self::UnclosedStringAtEndOfFile => "unclosed string literal at end of file",
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A construct the scanner cannot classify without risking later lines.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at line {}", .line_num + 1)]
pub struct Unsupported {
    pub kind: UnsupportedKind,
    /// 0-based line index
    pub line_num: usize,
}

impl Unsupported {
    pub fn new(kind: UnsupportedKind, line_num: usize) -> Self {
        Self { kind, line_num }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// 1-based line number, for people.
    pub fn display_line(&self) -> usize {
        self.line_num + 1
    }
}

/// Quote character of an open string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

impl Quote {
    fn byte(self) -> u8 {
        match self {
            Self::Double => b'"',
            Self::Single => b'\'',
        }
    }
}

/// Scanner state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Normal,
    BlockComment,
    String(Quote),
}

/// Count total and code lines in `text`.
///
/// Lines are the segments between `\n` characters, so a trailing newline
/// produces a final empty line and `""` is one empty line. Only `\n` ends a
/// line; callers reading CRLF files normalize them first.
///
/// # Example
///
/// ```rust
/// use jsloclib::classify;
///
/// let counts = classify("foo();\n// comment\n\nbar(); /* done */\n").unwrap();
/// assert_eq!(counts.total, 5);
/// assert_eq!(counts.sloc, 2);
///
/// // A possible regex followed by a comment start cannot be classified safely
/// let err = classify("x = a / b; /* tail */").unwrap_err();
/// assert_eq!(err.line_num, 0);
/// ```
pub fn classify(text: &str) -> Result<LineCounts, Unsupported> {
    let mut state = ScanState::default();
    let mut counts = LineCounts::default();

    for (line_num, line) in text.split('\n').enumerate() {
        counts.total += 1;
        if scan_line(line.as_bytes(), line_num, &mut state)? {
            counts.sloc += 1;
        }
    }

    // split() always yields at least one segment
    let last_line = counts.total as usize - 1;
    match state {
        ScanState::Normal => Ok(counts),
        ScanState::BlockComment => Err(Unsupported::new(
            UnsupportedKind::UnclosedBlockComment,
            last_line,
        )),
        ScanState::String(_) => Err(Unsupported::new(
            UnsupportedKind::UnclosedStringAtEndOfFile,
            last_line,
        )),
    }
}

/// Scan one line, updating `state`. Returns whether the line holds code.
fn scan_line(line: &[u8], line_num: usize, state: &mut ScanState) -> Result<bool, Unsupported> {
    let mut saw_code = false;
    let mut i = 0;

    while i < line.len() {
        match *state {
            ScanState::BlockComment => match find(&line[i..], b"*/") {
                Some(offset) => {
                    *state = ScanState::Normal;
                    i += offset + 2;
                }
                None => break,
            },
            ScanState::String(quote) => {
                saw_code = true;
                let c = line[i];
                if c == quote.byte() {
                    *state = ScanState::Normal;
                } else if c == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            ScanState::Normal => {
                let c = line[i];
                let next = line.get(i + 1).copied();
                match c {
                    b' ' | b'\t' => {}
                    b'"' => {
                        saw_code = true;
                        *state = ScanState::String(Quote::Double);
                    }
                    b'\'' => {
                        saw_code = true;
                        *state = ScanState::String(Quote::Single);
                    }
                    b'/' => match next {
                        Some(b'*') => {
                            *state = ScanState::BlockComment;
                            i += 1;
                        }
                        Some(b'/') => break,
                        _ => {
                            saw_code = true;
                            check_after_ambiguous_slash(line, &line[i + 1..], line_num)?;
                            break;
                        }
                    },
                    b'*' if next == Some(b'/') => {
                        return Err(Unsupported::new(
                            UnsupportedKind::UnexpectedBlockCommentEnd,
                            line_num,
                        ));
                    }
                    _ => saw_code = true,
                }
                i += 1;
            }
        }
    }

    if matches!(state, ScanState::String(_)) && !ends_with_continuation(line) {
        return Err(Unsupported::new(
            UnsupportedKind::UnclosedStringAtEndOfLine,
            line_num,
        ));
    }

    Ok(saw_code)
}

/// Reject the line if what follows an ambiguous `/` could leak into later lines.
fn check_after_ambiguous_slash(
    line: &[u8],
    suffix: &[u8],
    line_num: usize,
) -> Result<(), Unsupported> {
    if find(suffix, b"/*").is_some() {
        return Err(Unsupported::new(
            UnsupportedKind::BlockCommentAfterAmbiguousSlash,
            line_num,
        ));
    }
    let has_quote = suffix.iter().any(|&b| b == b'"' || b == b'\'');
    if has_quote && ends_with_continuation(line) {
        return Err(Unsupported::new(
            UnsupportedKind::MultiLineStringAfterAmbiguousSlash,
            line_num,
        ));
    }
    Ok(())
}

fn ends_with_continuation(line: &[u8]) -> bool {
    line.last() == Some(&b'\\')
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_count(code: &str, total: u64, sloc: u64) {
        let counts = classify(code).unwrap_or_else(|e| panic!("unexpected {e:?} for {code:?}"));
        assert_eq!(counts.total, total, "total for {code:?}");
        assert_eq!(counts.sloc, sloc, "sloc for {code:?}");
    }

    fn expect_unsupported(code: &str) -> Unsupported {
        match classify(code) {
            Ok(counts) => panic!("expected unsupported for {code:?}, got {counts:?}"),
            Err(e) => e,
        }
    }

    fn double_quoted(code: &str) -> String {
        code.replace('\'', "\"")
    }

    #[test]
    fn test_empty_file() {
        expect_count("", 1, 0);
    }

    #[test]
    fn test_simple_sloc() {
        expect_count("foo();\nbar();\nbaz();", 3, 3);
    }

    #[test]
    fn test_trailing_newline_is_blank_line() {
        expect_count("foo();\nbar();\n", 3, 2);
    }

    #[test]
    fn test_blank_lines() {
        expect_count("foo();\n\nbar();\n    \nbaz();", 5, 3);
        expect_count("\n\n    \n    \n", 5, 0);
        expect_count("\t\t\n  \t", 2, 0);
    }

    #[test]
    fn test_carriage_return_is_code() {
        expect_count("\r\n", 2, 1);
        expect_count("foo();\n\r", 2, 2);
    }

    #[test]
    fn test_continuation_must_be_last_character() {
        let err = expect_unsupported("foo('a\\\r\nb');");
        assert_eq!(err.kind, UnsupportedKind::UnclosedStringAtEndOfLine);
        assert_eq!(err.line_num, 0);
    }

    #[test]
    fn test_line_comments() {
        expect_count("foo();\nbar();  // comment\nbaz();", 3, 3);
        expect_count("foo();\n  // comment\nbaz();", 3, 2);
    }

    #[test]
    fn test_single_line_block_comments() {
        expect_count("foo();\nbar();  /* comment */\nbaz();", 3, 3);
        expect_count("foo();\n/* comment */ bar();\nbaz();", 3, 3);
        expect_count("foo();\n/* comment */ bar(); /* comment B */\nbaz();", 3, 3);
        expect_count("foo();\n  /* comment */\nbaz();", 3, 2);
        expect_count("foo();\n/* comment 1 */ /* comment 2 */\nbaz();", 3, 2);
    }

    #[test]
    fn test_multi_line_block_comments() {
        expect_count("foo();\n  /* a\n     b */\nbaz();", 4, 2);
        expect_count(
            "foo();\n  /* comment 1\n     comment 2\n     comment 3 */\nbaz();",
            5,
            2,
        );
    }

    #[test]
    fn test_code_around_multi_line_block_comments() {
        expect_count(
            "foo();\nbar();  /* comment 1\n   comment 2\n   comment 3 */\nbaz();",
            5,
            3,
        );
        expect_count(
            "foo();\n/* comment 1\n   comment 2\n   comment 3 */ bar();\nbaz();",
            5,
            3,
        );
        expect_count(
            "foo();\n/* comment 1\n   comment 2\n   comment 3 */ bar(); /* comment 1B\n   comment 2B\n   comment 3B */\nbaz();",
            7,
            3,
        );
    }

    #[test]
    fn test_code_after_block_comment_close_is_scanned() {
        // A string opened after the close must still be tracked
        expect_count("/* a\n b */ x = 'c\\\nd';\ny();", 4, 3);
        // An ambiguous slash after the close gets the usual treatment
        let err = expect_unsupported("/* a\n b */ x = 1 / 2; /* c */");
        assert_eq!(err.kind, UnsupportedKind::BlockCommentAfterAmbiguousSlash);
        assert_eq!(err.line_num, 1);
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        expect_count("foo();\nbar('/* foo */');\nbaz();", 3, 3);
        expect_count(
            "foo();\nbar('/* foo');\nrealCode();\n/* comment 1\n   comment 2 */\nbaz();",
            6,
            4,
        );
        expect_count(
            "foo();\nbar('/* foo'); /* real comment */\nrealCode();\n/* comment 1\n   comment 2 */\nbaz();",
            6,
            4,
        );
    }

    #[test]
    fn test_block_comment_end_inside_would_be_string() {
        expect_count(
            "foo();\n/* comment 1\nbar('...*/\nbaz1();\nbaz2('*/')\nbaz3();",
            6,
            4,
        );
    }

    #[test]
    fn test_escaped_quotes() {
        let code = "foo();\nbar('\\'/*');\nrealCode();\n /* comment 2\n    comment 3 */\nbaz();";
        expect_count(code, 6, 4);
        expect_count(&double_quoted(code), 6, 4);
    }

    #[test]
    fn test_nested_differing_quotes() {
        expect_count(
            "foo();\nbar('\"/*');\nrealCode();\n /* comment 2\n    comment 3 */\nbaz();",
            6,
            4,
        );
        expect_count(
            "foo();\nbar(\"'/*\");\nrealCode();\n /* comment 2\n    comment 3 */\nbaz();",
            6,
            4,
        );
    }

    #[test]
    fn test_comment_starts_inside_comments() {
        expect_count(
            "foo();\n/* comment 1\n/* comment 2\n   comment 3\n   comment 4 */\nbaz();",
            6,
            2,
        );
        expect_count("foo();\n/* comment 1 /* still comment 1 */\nbaz();", 3, 2);
        expect_count(
            "foo();\nbar();  // comment 1 /* still comment 1\nrealCode();\nbaz();",
            4,
            4,
        );
    }

    #[test]
    fn test_block_comment_end_inside_line_comment_still_closes() {
        expect_count("foo();\n/* comment 1\n  // comment 2 */\nbaz();", 4, 2);
    }

    #[test]
    fn test_block_comment_opener_star_does_not_close() {
        expect_count("/*/ still comment\n*/\nfoo();", 3, 1);
    }

    #[test]
    fn test_line_continued_strings() {
        expect_count("foo('s\\\nstill');\nbaz();", 3, 3);
        let code = "foo('string\\\nstill string');\nbaz();";
        expect_count(code, 3, 3);
        expect_count(&double_quoted(code), 3, 3);
    }

    #[test]
    fn test_block_comment_after_possible_regex() {
        let err = expect_unsupported("foo();\nbar(/xyz/); /* c */\nbaz();");
        assert_eq!(err.kind, UnsupportedKind::BlockCommentAfterAmbiguousSlash);
        assert_eq!(err.line_num, 1);

        // Division is indistinguishable here, so it is flagged too
        expect_unsupported("foo();\nbar(1/3); /* real comment */\nbaz();");
        expect_unsupported("foo();\nbar(/xyz/); /* real comment\n comment 2 */\nbaz();");
    }

    #[test]
    fn test_comment_start_inside_possible_regex() {
        expect_unsupported("foo();\nbar(/'/); /* comment 1\n  comment 2\n  comment 3 */\nbaz();");
        expect_unsupported(
            "foo();\nbar(/\\/* foo/);\nrealCode();\n/* comment 1\n   comment 2 */\nbaz();",
        );
        expect_unsupported(
            "foo();\nbar(/xyz\\/xyz\\/* foo/); /* real comment */\nrealCode();\n/* comment 1\n   comment 2 */\nbaz();",
        );
    }

    #[test]
    fn test_string_after_possible_regex_on_continued_line() {
        let code = "foo();\nbar(/xyz/); baz(' string\\\n still string');\nlast();";
        let err = expect_unsupported(code);
        assert_eq!(err.kind, UnsupportedKind::MultiLineStringAfterAmbiguousSlash);
        assert_eq!(err.line_num, 1);
        expect_unsupported(&double_quoted(code));

        let code = "foo();\nbar(1/3); baz(' string\\\n still string');\nlast();";
        expect_unsupported(code);
        expect_unsupported(&double_quoted(code));

        let code = "foo();\nbar(/'/); \\\n still string');\nlast();";
        expect_unsupported(code);
        expect_unsupported(&double_quoted(code));
    }

    #[test]
    fn test_string_after_possible_regex_on_plain_line() {
        for code in [
            "foo();\nbar(/xyz/); baz('string');\nlast();",
            "foo();\nbar(1/3); baz('string');\nlast();",
            "foo();\nbar(/'/);\nlast();",
        ] {
            expect_count(code, 3, 3);
            expect_count(&double_quoted(code), 3, 3);
        }
    }

    #[test]
    fn test_constructs_before_possible_regex_are_fine() {
        let code = "foo();\nbar('abc'); baz(/xyz/);\nlast();";
        expect_count(code, 3, 3);
        expect_count(&double_quoted(code), 3, 3);
        expect_count("foo();\n/* comment */ baz(/xyz/);\nlast();", 3, 3);
        expect_count("foo();\nbaz(/.*/);\nlast();", 3, 3);
        expect_count("foo();\nbar(/xyz/); // comment\nbaz();", 3, 3);
    }

    #[test]
    fn test_slashes_inside_comments() {
        expect_count("foo();\nbar(); /* real /comment/ /* */\nbaz();", 3, 3);
        expect_count(
            "foo();\nbar(); /* comment 1\n  comment /2/ /*\n  comment 3 */\nbaz();",
            5,
            3,
        );
        expect_count("foo();\nbar(); // real /line/ comment /*\nbaz();", 3, 3);
    }

    #[test]
    fn test_slashes_inside_strings() {
        let code = "foo();\nbar('string /content/ here'); /* foo */\nbaz();";
        expect_count(code, 3, 3);
        expect_count(&double_quoted(code), 3, 3);

        let code = "foo();\nbar('string \\\n  /content/ here'); /* foo */\nbaz();";
        expect_count(code, 4, 4);
        expect_count(&double_quoted(code), 4, 4);
    }

    #[test]
    fn test_slash_at_end_of_line() {
        expect_count("x = a /\n  b;", 2, 2);
    }

    #[test]
    fn test_unclosed_block_comment() {
        let err = expect_unsupported("foo();\n/* never closed");
        assert_eq!(err.kind, UnsupportedKind::UnclosedBlockComment);
        assert_eq!(err.line_num, 1);

        let err = expect_unsupported("foo();\n/* comment 1\nrealCode();\nbaz();");
        assert_eq!(err.line_num, 3);
        expect_unsupported("foo();\nbar();  /* comment 1\nrealCode('*/');\nbaz();");
    }

    #[test]
    fn test_unexpected_block_comment_end() {
        let err = expect_unsupported("foo();\nbar();*/\nbaz();");
        assert_eq!(err.kind, UnsupportedKind::UnexpectedBlockCommentEnd);
        assert_eq!(err.line_num, 1);
    }

    #[test]
    fn test_unclosed_string() {
        let err = expect_unsupported("foo('abc);\nbar();");
        assert_eq!(err.kind, UnsupportedKind::UnclosedStringAtEndOfLine);
        assert_eq!(err.line_num, 0);

        for code in [
            "foo('string);\nrealCode();\nbaz();",
            "foo('string);\nrealCode(');\nbaz();",
        ] {
            assert_eq!(expect_unsupported(code).line_num, 0);
            assert_eq!(expect_unsupported(&double_quoted(code)).line_num, 0);
        }
    }

    #[test]
    fn test_string_continued_into_end_of_file() {
        let err = expect_unsupported("foo();\nbar('abc\\");
        assert_eq!(err.kind, UnsupportedKind::UnclosedStringAtEndOfFile);
        assert_eq!(err.line_num, 1);
    }

    #[test]
    fn test_non_ascii_text() {
        expect_count("// café\nlet s = 'naïve \\é';\n/* ü\n ö */ x();", 4, 2);
    }

    #[test]
    fn test_idempotent() {
        let code = "foo();\n/* a\n b */ bar('x\\\ny');\n\n// c\n";
        let first = classify(code);
        assert_eq!(first, classify(code));
        assert_eq!(first.unwrap(), LineCounts { total: 7, sloc: 3 });

        let bad = "foo('abc);";
        assert_eq!(classify(bad), classify(bad));
    }

    #[test]
    fn test_unsupported_display() {
        let err = Unsupported::new(UnsupportedKind::UnclosedBlockComment, 4);
        assert_eq!(err.display_line(), 5);
        assert_eq!(
            err.to_string(),
            "unclosed block comment at end of file at line 5"
        );
    }
}
