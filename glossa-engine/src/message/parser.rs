//! MessageFormat pattern parser
//!
//! Apostrophes follow the "double optional" convention: `''` is a literal
//! apostrophe, and a single apostrophe only starts quoting when it is
//! followed by a character that would otherwise be syntax (`{`, `}`, `|`, or
//! `#` inside a plural sub-message). A closing brace outside any argument is
//! literal text.

use super::ast::{
    ArgumentFormat, DateLength, Message, NumberStyle, Part, Placeholder, PluralBlock,
    PluralSelector, SelectBlock,
};
use glossa_core::{Diagnostic, DiagnosticCode};
use icu_plurals::PluralCategory;

type ParseResult<T> = Result<T, Diagnostic>;

/// Parse a complete pattern
pub fn parse(pattern: &str) -> ParseResult<Message> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
    };
    parser.message(false, false)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

fn is_syntax(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | ',' | '\'' | '#' | '|' | ':' | '=')
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn unmatched(&self) -> Diagnostic {
        Diagnostic::new(
            DiagnosticCode::UnmatchedBraces,
            format!("unmatched '{{' in pattern, input ends at offset {}", self.pos),
        )
    }

    fn syntax(&self, what: &str) -> Diagnostic {
        Diagnostic::new(
            DiagnosticCode::PatternSyntax,
            format!("{what} at offset {}", self.pos),
        )
    }

    fn expect(&mut self, wanted: char) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.syntax(&format!("expected '{wanted}'"))),
            None => Err(self.unmatched()),
        }
    }

    fn message(&mut self, in_plural: bool, nested: bool) -> ParseResult<Message> {
        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            match self.peek() {
                None if nested => return Err(self.unmatched()),
                None => break,
                Some('}') if nested => break,
                Some('\'') => self.apostrophe(&mut text, in_plural),
                Some('{') => {
                    flush(&mut text, &mut parts);
                    self.pos += 1;
                    parts.push(Part::Placeholder(self.placeholder()?));
                }
                Some('#') if in_plural => {
                    flush(&mut text, &mut parts);
                    self.pos += 1;
                    parts.push(Part::Pound);
                }
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }

        flush(&mut text, &mut parts);
        Ok(parts)
    }

    fn apostrophe(&mut self, text: &mut String, in_plural: bool) {
        match self.peek_at(1) {
            Some('\'') => {
                text.push('\'');
                self.pos += 2;
            }
            Some('{' | '}' | '|') => self.quoted(text),
            Some('#') if in_plural => self.quoted(text),
            _ => {
                text.push('\'');
                self.pos += 1;
            }
        }
    }

    /// Quoted literal; an unterminated quote runs to the end of the pattern
    fn quoted(&mut self, text: &mut String) {
        self.pos += 1;
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c != '\'' {
                text.push(c);
            } else if self.peek() == Some('\'') {
                text.push('\'');
                self.pos += 1;
            } else {
                return;
            }
        }
    }

    fn identifier(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| !is_syntax(c)) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn placeholder(&mut self) -> ParseResult<Placeholder> {
        self.skip_whitespace();
        let name = self.identifier();
        if name.is_empty() {
            return match self.peek() {
                None => Err(self.unmatched()),
                Some(_) => Err(self.syntax("bad argument name")),
            };
        }
        self.skip_whitespace();

        let format = match self.peek() {
            None => return Err(self.unmatched()),
            Some('}') => ArgumentFormat::Simple,
            Some(',') => {
                self.pos += 1;
                self.skip_whitespace();
                let kind = self.identifier();
                self.skip_whitespace();
                self.typed(&kind)?
            }
            Some(_) => return Err(self.syntax("bad argument syntax")),
        };

        self.expect('}')?;
        Ok(Placeholder { name, format })
    }

    fn typed(&mut self, kind: &str) -> ParseResult<ArgumentFormat> {
        match kind {
            "number" => {
                let style = self.style()?;
                Ok(ArgumentFormat::Number(NumberStyle::parse(style.as_deref())?))
            }
            "date" => Ok(ArgumentFormat::Date(DateLength::parse(self.style()?.as_deref())?)),
            "time" => Ok(ArgumentFormat::Time(DateLength::parse(self.style()?.as_deref())?)),
            "plural" => {
                self.expect(',')?;
                Ok(ArgumentFormat::Plural(self.plural_block()?))
            }
            "selectordinal" => {
                self.expect(',')?;
                Ok(ArgumentFormat::SelectOrdinal(self.plural_block()?))
            }
            "select" => {
                self.expect(',')?;
                Ok(ArgumentFormat::Select(self.select_block()?))
            }
            "" => Err(self.syntax("missing argument type")),
            other => Err(Diagnostic::new(
                DiagnosticCode::IllegalArgument,
                format!("unsupported argument type '{other}'"),
            )),
        }
    }

    /// Optional `, style` up to the closing brace, which is left in place
    fn style(&mut self) -> ParseResult<Option<String>> {
        match self.peek() {
            Some('}') => return Ok(None),
            Some(',') => self.pos += 1,
            Some(_) => return Err(self.syntax("expected ',' or '}'")),
            None => return Err(self.unmatched()),
        }

        let mut style = String::new();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.unmatched()),
                Some('}') if depth == 0 => break,
                Some('\'') => {
                    self.pos += 1;
                    while let Some(c) = self.peek() {
                        self.pos += 1;
                        if c == '\'' {
                            break;
                        }
                        style.push(c);
                    }
                }
                Some(c) => {
                    match c {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    style.push(c);
                    self.pos += 1;
                }
            }
        }

        let style = style.trim();
        Ok((!style.is_empty()).then(|| style.to_string()))
    }

    fn plural_block(&mut self) -> ParseResult<PluralBlock> {
        self.skip_whitespace();
        let mut offset = 0;
        if self.starts_with("offset:") {
            self.pos += "offset:".len();
            self.skip_whitespace();
            let digits = self.number_token();
            offset = digits
                .parse::<i64>()
                .map_err(|_| self.syntax("bad plural offset"))?;
        }

        let mut cases = Vec::new();
        loop {
            self.skip_whitespace();
            let selector = match self.peek() {
                None => return Err(self.unmatched()),
                Some('}') => break,
                Some('=') => {
                    self.pos += 1;
                    let digits = self.number_token();
                    let value = digits
                        .parse::<f64>()
                        .map_err(|_| self.syntax("bad explicit plural value"))?;
                    PluralSelector::Exact(value)
                }
                Some(_) => {
                    let keyword = self.identifier();
                    if keyword.is_empty() {
                        return Err(self.syntax("bad plural selector"));
                    }
                    PluralSelector::Category(plural_category(&keyword)?)
                }
            };
            let message = self.sub_message(true)?;
            cases.push((selector, message));
        }

        let block = PluralBlock { offset, cases };
        if block.other().is_none() {
            return Err(missing_other("plural"));
        }
        Ok(block)
    }

    fn select_block(&mut self) -> ParseResult<SelectBlock> {
        let mut cases = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.unmatched()),
                Some('}') => break,
                Some(_) => {}
            }
            let key = self.identifier();
            if key.is_empty() {
                return Err(self.syntax("bad select key"));
            }
            let message = self.sub_message(false)?;
            cases.push((key, message));
        }

        if !cases.iter().any(|(key, _)| key == "other") {
            return Err(missing_other("select"));
        }
        Ok(SelectBlock { cases })
    }

    fn sub_message(&mut self, in_plural: bool) -> ParseResult<Message> {
        self.skip_whitespace();
        self.expect('{')?;
        let message = self.message(in_plural, true)?;
        self.expect('}')?;
        Ok(message)
    }

    fn number_token(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }
}

fn flush(text: &mut String, parts: &mut Message) {
    if !text.is_empty() {
        parts.push(Part::Literal(std::mem::take(text)));
    }
}

fn plural_category(keyword: &str) -> ParseResult<PluralCategory> {
    match keyword {
        "zero" => Ok(PluralCategory::Zero),
        "one" => Ok(PluralCategory::One),
        "two" => Ok(PluralCategory::Two),
        "few" => Ok(PluralCategory::Few),
        "many" => Ok(PluralCategory::Many),
        "other" => Ok(PluralCategory::Other),
        _ => Err(Diagnostic::new(
            DiagnosticCode::IllegalArgument,
            format!("unknown plural keyword '{keyword}'"),
        )),
    }
}

fn missing_other(kind: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::IllegalArgument,
        format!("{kind} argument is missing the 'other' case"),
    )
}

impl DateLength {
    /// Read a date or time style name
    pub fn parse(style: Option<&str>) -> ParseResult<Self> {
        match style {
            None | Some("medium") => Ok(DateLength::Medium),
            Some("short") => Ok(DateLength::Short),
            Some("long") => Ok(DateLength::Long),
            Some("full") => Ok(DateLength::Full),
            Some(other) => Err(Diagnostic::new(
                DiagnosticCode::IllegalArgument,
                format!("unsupported date/time style '{other}'"),
            )),
        }
    }
}
