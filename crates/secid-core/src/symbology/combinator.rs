//! Parsing primitives shared by every symbology component.
//!
//! Backtrackable failures travel as `nom::Err::Error`, committed ones as
//! `nom::Err::Failure`. Only the delimiter combinators in this module
//! consume `/`, `//`, `@` and whitespace; token parsers never do.

use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::character::complete::{char, satisfy};
use nom::combinator::{cut, eof, not, opt, peek};
use nom::error::{ErrorKind, ParseError as NomParseError};
use nom::sequence::{preceded, terminated};
use nom::{Err, IResult, Parser};

use crate::ParseError;

pub(crate) type PResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;

/// Value parser run once a discriminator has been chosen.
pub(crate) type Branch<O> = for<'b> fn(&'b str) -> PResult<'b, O>;

const END_OF_INPUT: &str = "end of input";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reason {
    Expected(&'static str),
    UnknownScheme,
    UnknownProvider,
    UnknownIdentifierType,
    SubParse {
        type_label: &'static str,
        cause: ParseError,
    },
    Nom(ErrorKind),
}

/// Failure at a point of the remaining input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GrammarError<'a> {
    input: &'a str,
    reason: Reason,
}

impl<'a> GrammarError<'a> {
    pub(crate) fn new(input: &'a str, reason: Reason) -> Self {
        Self { input, reason }
    }

    /// Resolves the remaining-input pointer into an offset within `full`.
    pub(crate) fn into_parse_error(self, full: &str) -> ParseError {
        let position = full.len().saturating_sub(self.input.len());
        let found = leading_token(self.input);

        match self.reason {
            Reason::Expected(expected) => ParseError::UnexpectedToken {
                expected,
                found,
                position,
            },
            Reason::Nom(kind) => ParseError::UnexpectedToken {
                expected: describe(kind),
                found,
                position,
            },
            Reason::UnknownScheme => ParseError::UnknownScheme { found, position },
            Reason::UnknownProvider => ParseError::UnknownProvider { found, position },
            Reason::UnknownIdentifierType => ParseError::UnknownIdentifierType { found, position },
            Reason::SubParse { type_label, cause } => ParseError::CommittedSubParseFailed {
                type_label,
                position,
                cause: Box::new(cause),
            },
        }
    }
}

impl<'a> NomParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::new(input, Reason::Nom(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

fn describe(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Eof => END_OF_INPUT,
        _ => "token",
    }
}

/// The token a diagnostic should quote as "found".
fn leading_token(input: &str) -> String {
    if input.is_empty() {
        return String::from(END_OF_INPUT);
    }

    let end = input
        .char_indices()
        .find(|&(_, ch)| !is_token_char(ch))
        .map_or(input.len(), |(index, _)| index);

    match end {
        0 if input.starts_with(is_space) => String::from("whitespace"),
        0 => input.chars().take(1).collect(),
        _ => input[..end].to_owned(),
    }
}

/// Runs `parser` over the whole of `input` and resolves any failure
/// against it.
pub(crate) fn complete<'a, O>(
    mut parser: impl FnMut(&'a str) -> PResult<'a, O>,
    input: &'a str,
) -> Result<O, ParseError> {
    match parser(input) {
        Ok((_, value)) => Ok(value),
        Err(Err::Error(error) | Err::Failure(error)) => Err(error.into_parse_error(input)),
        Err(Err::Incomplete(_)) => Err(ParseError::UnexpectedToken {
            expected: "complete input",
            found: String::from(END_OF_INPUT),
            position: input.len(),
        }),
    }
}

/// Whitespace as the grammar sees it: any Unicode white space, line breaks
/// included.
pub(crate) fn is_space(ch: char) -> bool {
    ch.is_whitespace()
}

/// Characters that may appear inside a token: anything but the delimiters.
pub(crate) fn is_token_char(ch: char) -> bool {
    !is_space(ch) && ch != '/' && ch != '@'
}

/// Replaces a backtrackable failure with "expected `label`" at the start of
/// the attempt. Committed failures pass through untouched.
pub(crate) fn expected<'a, O, F>(
    label: &'static str,
    mut parser: F,
) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: Parser<&'a str, O, GrammarError<'a>>,
{
    move |input: &'a str| match parser.parse(input) {
        Err(Err::Error(_)) => Err(Err::Error(GrammarError::new(
            input,
            Reason::Expected(label),
        ))),
        other => other,
    }
}

pub(crate) fn double_slash(input: &str) -> PResult<'_, &str> {
    expected("'//'", tag("//"))(input)
}

pub(crate) fn slash(input: &str) -> PResult<'_, char> {
    expected("'/'", char('/'))(input)
}

pub(crate) fn at_sign(input: &str) -> PResult<'_, char> {
    expected("'@'", char('@'))(input)
}

pub(crate) fn whitespace(input: &str) -> PResult<'_, &str> {
    expected("whitespace", take_while1(is_space))(input)
}

pub(crate) fn end_of_input(input: &str) -> PResult<'_, &str> {
    expected(END_OF_INPUT, eof)(input)
}

/// A non-empty run of token characters.
pub(crate) fn token<'a>(label: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    expected(label, take_while1(is_token_char))
}

/// Optional `delimiter value` pair. Once the delimiter is consumed the
/// value is committed: a bad value is an error, not an absent suffix.
pub(crate) fn suffix<'a, D, DO, P, O>(
    delimiter: D,
    value: P,
) -> impl FnMut(&'a str) -> PResult<'a, Option<O>>
where
    D: Parser<&'a str, DO, GrammarError<'a>>,
    P: Parser<&'a str, O, GrammarError<'a>>,
{
    opt(preceded(delimiter, cut(value)))
}

/// Closed set of case-insensitive words.
pub(crate) trait Keyword: Copy + Sized + 'static {
    const MEMBERS: &'static [Self];

    fn keyword(self) -> &'static str;

    fn lookup(word: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|candidate| candidate.keyword().eq_ignore_ascii_case(word))
    }
}

/// Reads one token and resolves it against `K::MEMBERS`, reporting `unknown`
/// at the token start when it is not a member.
pub(crate) fn keyword<'a, K>(
    label: &'static str,
    unknown: Reason,
) -> impl FnMut(&'a str) -> PResult<'a, K>
where
    K: Keyword,
{
    let mut word = token(label);
    move |input: &'a str| {
        let (rest, raw) = word(input)?;
        match K::lookup(raw) {
            Some(value) => Ok((rest, value)),
            None => Err(Err::Error(GrammarError::new(input, unknown.clone()))),
        }
    }
}

/// Discriminated alternation with commit-on-match.
///
/// Tags are tried in order with ordinary backtracking. The first tag that
/// matches a whole token commits the parse: the following `/` and the
/// branch's value parser run under `cut`, and no other tag is tried.
pub(crate) fn commit_on_match<'a, K, O>(
    label: &'static str,
    branches: &'static [(K, Branch<O>)],
    unknown: Reason,
) -> impl FnMut(&'a str) -> PResult<'a, (K, O)>
where
    K: Keyword,
    O: 'static,
{
    move |input: &'a str| {
        peek(token(label))(input)?;

        for &(discriminator, branch) in branches {
            let mut tagged = terminated(
                tag_no_case::<_, _, GrammarError<'a>>(discriminator.keyword()),
                not(satisfy(is_token_char)),
            );
            match tagged.parse(input) {
                Ok((rest, _)) => {
                    let (rest, value) = cut(preceded(slash, branch))(rest)?;
                    return Ok((rest, (discriminator, value)));
                }
                Err(Err::Error(_)) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(Err::Error(GrammarError::new(input, unknown.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<'a, O>(
        mut parser: impl FnMut(&'a str) -> PResult<'a, O>,
        input: &'a str,
    ) -> Result<(&'a str, O), ParseError> {
        complete(|input| parser(input).map(|(rest, value)| (rest, (rest, value))), input)
    }

    #[test]
    fn expected_reports_label_and_found_token() {
        let err = run(double_slash, "/blp").expect_err("must fail");
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "'//'",
                found: "/".into(),
                position: 0,
            }
        );
    }

    #[test]
    fn found_is_end_of_input_when_exhausted() {
        let err = run(token("scheme"), "").expect_err("must fail");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, .. } if found == END_OF_INPUT
        ));
    }

    #[test]
    fn token_stops_at_delimiters() {
        assert_eq!(run(token("word"), "abc/def"), Ok(("/def", "abc")));
        assert_eq!(run(token("word"), "abc@def"), Ok(("@def", "abc")));
        assert_eq!(run(token("word"), "abc def"), Ok((" def", "abc")));
    }

    #[test]
    fn whitespace_accepts_every_char_that_ends_a_token() {
        for gap in [" ", "\t", "\n", "\r\n", "\u{3000}", " \t "] {
            let input = format!("{gap}Equity");
            assert_eq!(run(whitespace, &input), Ok(("Equity", gap)));
            assert!(!gap.chars().any(is_token_char));
        }
    }

    #[test]
    fn suffix_is_absent_without_delimiter() {
        let result = run(suffix(at_sign, token("source")), " Equity");
        assert_eq!(result, Ok((" Equity", None)));
    }

    #[test]
    fn suffix_commits_after_delimiter() {
        let mut parser = suffix(at_sign, token("source"));
        let error = parser("@").expect_err("must fail");
        assert!(matches!(error, Err::Failure(_)));
    }

    #[test]
    fn leading_token_quotes_offending_word() {
        assert_eq!(leading_token("xyz/rest"), "xyz");
        assert_eq!(leading_token("@rest"), "@");
        assert_eq!(leading_token(""), END_OF_INPUT);
    }
}
