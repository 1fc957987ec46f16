//! Adapter from `cssparser` rule iteration to [`Stylesheet`].

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};
use indexmap::IndexMap;

use super::{Rule, RuleKind, Stylesheet};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CssError {
    UnterminatedBlock,
}

type CssParseError<'i> = ParseError<'i, CssError>;

pub(super) fn parse(css: &str) -> crate::error::Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rule_parser = TopLevelParser { len: css.len() };

    let mut rules = Vec::new();
    for item in StyleSheetParser::new(&mut parser, &mut rule_parser) {
        match item {
            Ok(rule) => rules.push(rule),
            Err((err, _)) => return Err(parse_error(err)),
        }
    }
    Ok(Stylesheet { rules })
}

fn parse_error(err: CssParseError<'_>) -> Error {
    let message = match err.kind {
        ParseErrorKind::Custom(CssError::UnterminatedBlock) => "unterminated block".to_owned(),
        ParseErrorKind::Basic(kind) => format!("{kind:?}"),
    };
    Error::Parse { line: err.location.line + 1, column: err.location.column, message }
}

/// Raw source text of everything left in `input`, trimmed.
fn remaining_text(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Builds rules for the top level of a document.
struct TopLevelParser {
    /// Byte length of the source; a block that runs to it was never closed.
    len: usize,
}

impl TopLevelParser {
    fn declarations<'i>(
        &self,
        input: &mut Parser<'i, '_>,
    ) -> Result<IndexMap<String, String>, CssParseError<'i>> {
        let mut declarations = IndexMap::new();
        let mut item_parser = DeclarationListParser;

        // Nested rules (e.g. inside `@media`) come back as errors and are skipped.
        for (name, value) in RuleBodyParser::new(input, &mut item_parser).flatten() {
            declarations.insert(name, value);
        }

        if input.position().byte_index() >= self.len {
            return Err(input.new_custom_error(CssError::UnterminatedBlock));
        }
        Ok(declarations)
    }
}

struct AtPrelude {
    name: String,
    prelude: String,
}

impl AtPrelude {
    fn into_rule(self, declarations: IndexMap<String, String>) -> Rule {
        let kind = if self.name == "font-face" {
            RuleKind::FontFace
        } else {
            RuleKind::At { name: self.name, prelude: self.prelude }
        };
        Rule { kind, declarations }
    }
}

impl<'i> AtRuleParser<'i> for TopLevelParser {
    type Prelude = AtPrelude;
    type AtRule = Rule;
    type Error = CssError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<AtPrelude, CssParseError<'i>> {
        Ok(AtPrelude { name: name.to_ascii_lowercase(), prelude: remaining_text(input) })
    }

    fn rule_without_block(&mut self, prelude: AtPrelude, _start: &ParserState) -> Result<Rule, ()> {
        Ok(prelude.into_rule(IndexMap::new()))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: AtPrelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Rule, CssParseError<'i>> {
        let declarations = self.declarations(input)?;
        Ok(prelude.into_rule(declarations))
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelParser {
    type Prelude = String;
    type QualifiedRule = Rule;
    type Error = CssError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<String, CssParseError<'i>> {
        Ok(remaining_text(input))
    }

    fn parse_block<'t>(
        &mut self,
        selector: String,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Rule, CssParseError<'i>> {
        let declarations = self.declarations(input)?;
        Ok(Rule { kind: RuleKind::Style { selector }, declarations })
    }
}

/// Reads `name: value` pairs from a block body, values as raw text.
struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = (String, String);
    type Error = CssError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<(String, String), CssParseError<'i>> {
        Ok((name.to_ascii_lowercase(), remaining_text(input)))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = CssError;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = CssError;
}

impl<'i> RuleBodyItemParser<'i, (String, String), CssError> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}
