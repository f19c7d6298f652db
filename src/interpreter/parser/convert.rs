use tracing::trace;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            form_table::{FormTable, Probe},
        },
        lexer::{
            glyphs::{QUOTE, ZILDE},
            numeric::parse_numbers,
        },
        symbol::table::{SymbolKind, SymbolTable, SymbolValue},
        token::{Token, TokenClass},
        value::array::{Array, Element},
    },
};

/// Binds names and materializes literals ahead of recognition.
///
/// - A simple name takes the class of its binding: unbound names and arrays
///   are variables, labels become their line number.
/// - A distinguished name is classified by the forms registered for it.
/// - Numeric and character literals become constants; a literal of one item
///   is a scalar.
///
/// # Errors
/// Returns a `SyntaxError` for an unknown distinguished name or a malformed
/// numeric literal.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::form_table::FormTable,
///     lexer::tokenize,
///     parser::convert::convert_tokens,
///     symbol::table::SymbolTable,
///     token::TokenClass,
///     value::array::Array,
/// };
///
/// let symbols = SymbolTable::workspace();
/// let tokens = convert_tokens(tokenize("X←'A' ⎕IO").unwrap(), &symbols, FormTable::standard()).unwrap();
/// assert_eq!(tokens[0].class, TokenClass::VariableName);
/// assert_eq!(tokens[2].array(), Some(&Array::scalar('A'.into())));
/// assert_eq!(tokens[3].class, TokenClass::SystemVariableName);
/// ```
pub fn convert_tokens(tokens: Vec<Token>, symbols: &SymbolTable<'_>, forms: &FormTable) -> EvalResult<Vec<Token>> {
    tokens.into_iter()
          .map(|token| {
              let converted = convert(token, symbols, forms)?;
              trace!(class = ?converted.class, offset = converted.offset, "converted");
              Ok(converted)
          })
          .collect()
}

fn convert(token: Token, symbols: &SymbolTable<'_>, forms: &FormTable) -> EvalResult<Token> {
    let offset = token.offset;
    match token.class {
        TokenClass::SimpleIdentifier => {
            let name = token.text().unwrap_or_default();
            let class = match symbols.lookup(&name) {
                Some(SymbolValue::Label(line)) => {
                    return Ok(Token::value(TokenClass::Constant, Array::number(*line), offset));
                },
                Some(value) => name_class(value.kind()),
                None => TokenClass::VariableName,
            };
            Ok(token.with_class(class))
        },
        TokenClass::DistinguishedIdentifier => {
            let name = token.text().unwrap_or_default();
            let class = system_class(&name, forms).ok_or_else(|| {
                                                      AplError::syntax(format!("Unknown system name '{name}'."))
                                                          .at(offset)
                                                  })?;
            Ok(token.with_class(class))
        },
        TokenClass::NumericLiteral => {
            let text = token.text().unwrap_or_default();
            let numbers = parse_numbers(&text).map_err(|e| e.at(offset))?;
            let array = match numbers.as_slice() {
                [number] => Array::number(*number),
                _ => Array::numbers(numbers),
            };
            Ok(Token::value(TokenClass::Constant, array, offset))
        },
        TokenClass::CharacterLiteral => {
            let text = token.text().unwrap_or_default();
            Ok(Token::value(TokenClass::Constant, character_literal(&text), offset))
        },
        TokenClass::Primitive if token.glyph() == Some(ZILDE) => {
            Ok(Token::value(TokenClass::Constant, Array::zilde(), offset))
        },
        _ => Ok(token),
    }
}

/// Returns the class a binding of `kind` gives a name.
const fn name_class(kind: SymbolKind) -> TokenClass {
    match kind {
        SymbolKind::Variable | SymbolKind::Label => TokenClass::VariableName,
        SymbolKind::NiladicFunction => TokenClass::NiladicDefinedFunctionName,
        SymbolKind::Function => TokenClass::DefinedFunctionName,
        SymbolKind::MonadicOperator => TokenClass::DefinedMonadicOperatorName,
        SymbolKind::DyadicOperator => TokenClass::DefinedDyadicOperatorName,
    }
}

/// Classifies a distinguished name by the forms registered for it.
fn system_class(name: &str, forms: &FormTable) -> Option<TokenClass> {
    let probe = Probe::name(name);
    if forms.lookup(&[probe.clone(), Probe::glyph('←'), Probe::constant()]).is_some() {
        Some(TokenClass::SystemVariableName)
    } else if forms.lookup(std::slice::from_ref(&probe)).is_some() {
        Some(TokenClass::NiladicSystemFunctionName)
    } else if forms.lookup(&[probe.clone(), Probe::constant()]).is_some()
              || forms.lookup(&[Probe::constant(), probe, Probe::constant()]).is_some()
    {
        Some(TokenClass::SystemFunctionName)
    } else {
        None
    }
}

/// Strips the quotes of a character literal and undoubles inner quotes.
fn character_literal(text: &str) -> Array {
    let inner = text.strip_prefix(QUOTE)
                    .and_then(|rest| rest.strip_suffix(QUOTE))
                    .unwrap_or(text);
    let doubled = format!("{QUOTE}{QUOTE}");
    let chars: Vec<char> = inner.replace(&doubled, &QUOTE.to_string()).chars().collect();
    match chars.as_slice() {
        [c] => Array::scalar(Element::Char(*c)),
        _ => Array::vector(chars.into_iter().map(Element::Char).collect()),
    }
}
