use libisa::instruction::kind::InstructionKind;

use crate::AssemblyError;


pub const COMMENT_CHAR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based.
    pub number: usize,
    pub label: Option<&'a str>,
    pub statement: Option<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Origin(&'a str),
    Byte(&'a str),
    Instruction {
        kind: InstructionKind,
        operands: Vec<&'a str>,
    },
}

/// Returns `None` for lines with nothing but whitespace or a comment.
pub fn parse_line(number: usize, text: &str) -> Result<Option<Line<'_>>, AssemblyError> {
    let mut text = strip_comment(text).trim();
    if text.is_empty() {
        return Ok(None);
    }

    let mut label = None;
    if let Some((name, rest)) = text.split_once(':') {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(AssemblyError::InvalidLabel {
                line: number,
                label: name.to_string(),
            });
        }

        label = Some(name);
        text = rest.trim();
    }

    let statement = if text.is_empty() {
        None
    } else if text.starts_with('.') {
        Some(parse_directive(number, text)?)
    } else {
        Some(parse_instruction(number, text)?)
    };

    Ok(Some(Line {
        number,
        label,
        statement,
    }))
}

fn parse_directive(number: usize, text: &str) -> Result<Statement<'_>, AssemblyError> {
    let (name, value) = split_head(text);

    let value = value.ok_or_else(|| AssemblyError::MissingDirectiveValue {
        line: number,
        directive: name.to_string(),
    });

    match name.to_ascii_lowercase().as_str() {
        ".org" => Ok(Statement::Origin(value?)),
        ".byte" => Ok(Statement::Byte(value?)),
        _ => Err(AssemblyError::UnknownDirective {
            line: number,
            directive: name.to_string(),
        }),
    }
}

fn parse_instruction(number: usize, text: &str) -> Result<Statement<'_>, AssemblyError> {
    let (mnemonic, operands) = split_head(text);

    let kind = mnemonic
        .parse::<InstructionKind>()
        .map_err(|_| AssemblyError::UnknownMnemonic {
            line: number,
            mnemonic: mnemonic.to_string(),
        })?;

    let operands: Vec<&str> = operands
        .map(|operands| operands.split(',').map(str::trim).collect())
        .unwrap_or_default();

    Ok(Statement::Instruction { kind, operands })
}

/// Splits off the first whitespace-separated token.
fn split_head(text: &str) -> (&str, Option<&str>) {
    match text.split_once(char::is_whitespace) {
        Some((head, rest)) if !rest.trim().is_empty() => (head, Some(rest.trim())),
        Some((head, _)) => (head, None),
        None => (text, None),
    }
}

fn strip_comment(text: &str) -> &str {
    text.split_once(COMMENT_CHAR)
        .map_or(text, |(code, _)| code)
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
