//! The character set of the language.

/// Negative sign of numeric literals, and a name character.
pub const OVERBAR: char = '¯';
/// Exponent marker of numeric literals.
pub const EXPONENT: char = 'E';
/// Imaginary marker of numeric literals.
pub const IMAGINARY: char = 'J';
/// Decimal point.
pub const DOT: char = '.';
/// Delimiter of character literals.
pub const QUOTE: char = '\'';
/// Starts a comment running to the end of the line.
pub const LAMP: char = '⍝';
/// Prefix of system names.
pub const QUAD: char = '⎕';
/// Character input/output.
pub const QUOTE_QUAD: char = '⍞';
/// Empty numeric vector.
pub const ZILDE: char = '⍬';
/// Assignment.
pub const LEFT_ARROW: char = '←';
/// Branch.
pub const RIGHT_ARROW: char = '→';
/// Jot: outer product and composition.
pub const JOT: char = '∘';

/// Characters that separate statements.
pub const STATEMENT_SEPARATORS: &[char] = &['⋄', '◊', '\n'];
/// Characters that separate tokens without producing one.
pub const BLANKS: &[char] = &[' ', '\t', '\r'];
/// Names usable without a definition inside direct functions.
pub const DIRECT_IDENTIFIERS: &[char] = &['⍺', '⍵'];
/// Letters usable in names besides the alphabetic characters.
pub const EXTRA_LETTERS: &[char] = &['∆', '⍙', '_'];

/// Every glyph that stands on its own as a token.
pub const IDEOGRAMS: &str = "+-×÷⌈⌊*⍟|!○~?∧∨⍲⍱<≤=≥>≠⍴,⍪⍳⌽⊖⍉↑↓⊂⊃≡≢∊⍷⍋⍒/\\⌿⍀¨⍨.∘⍤⍥←→()[];⍬⊣⊢⌷⍕⍎⊥⊤⌹";

/// Glyphs the recognizer accepts as primitive functions.
pub const PRIMITIVE_FUNCTIONS: &str = "+-×÷⌈⌊*⍟|!○~?∧∨⍲⍱<≤=≥>≠⍴,⍪⍳⌽⊖⍉↑↓⊂≡∊⍋⍒/⌿";
/// Glyphs the recognizer accepts as monadic operators after a function.
pub const MONADIC_OPERATORS: &str = "/\\⌿⍀¨⍨";
/// Glyphs the recognizer accepts as dyadic operators between functions.
pub const DYADIC_OPERATORS: &str = "∘⍤⍥";

/// Returns `true` for characters that may start a name.
#[must_use]
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '∆' || c == '⍙'
}

/// Returns `true` for characters that may continue a name.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || EXTRA_LETTERS.contains(&c) || c == OVERBAR
}

/// Returns `true` for glyphs that form a token on their own.
#[must_use]
pub fn is_ideogram(c: char) -> bool {
    IDEOGRAMS.contains(c)
}

/// Every character the interpreter understands, in a fixed order.
///
/// # Example
/// ```
/// use aplite::interpreter::lexer::glyphs::atomic_vector;
///
/// let av = atomic_vector();
/// assert!(av.contains(&'⍴'));
/// assert!(av.contains(&'A'));
/// ```
#[must_use]
pub fn atomic_vector() -> Vec<char> {
    (' '..='~').chain(IDEOGRAMS.chars())
               .chain([OVERBAR, LAMP, QUAD, QUOTE_QUAD, '⋄', '∆', '⍙', '⍺', '⍵'])
               .fold(Vec::new(), |mut av, c| {
                   if !av.contains(&c) {
                       av.push(c);
                   }
                   av
               })
}
