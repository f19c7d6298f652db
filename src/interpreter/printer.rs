use crate::interpreter::{
    lexer::glyphs::OVERBAR,
    value::{
        array::{Array, Element},
        number::Number,
    },
};
pub use crate::interpreter::symbol::system::DEFAULT_PRINT_PRECISION;

/// Magnitudes from here on print in exponent form.
const LARGE: f64 = 1e15;
/// Magnitudes below this print in exponent form.
const SMALL: f64 = 1e-6;

/// Formats a real number with `precision` significant digits.
///
/// # Example
/// ```
/// use aplite::interpreter::printer::format_real;
///
/// assert_eq!(format_real(-3.0, 10), "¯3");
/// assert_eq!(format_real(1.0 / 3.0, 5), "0.33333");
/// assert_eq!(format_real(0.000_000_15, 10), "1.5E¯7");
/// assert_eq!(format_real(2.5e20, 10), "2.5E20");
/// assert_eq!(format_real(123_456.7, 3), "1.23E5");
/// assert_eq!(format_real(99.96, 3), "100");
/// ```
#[must_use]
pub fn format_real(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let magnitude = value.abs();
    let text = if magnitude == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && magnitude < LARGE {
        format!("{value:.0}")
    } else {
        let scientific = format!("{:.*e}", precision - 1, value);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let digits = i32::try_from(precision).unwrap_or(i32::MAX);
        let rounded = magnitude >= SMALL && f64::from(exponent) < LARGE.log10() && exponent < digits;
        if rounded {
            let decimals = usize::try_from(digits - 1 - exponent).unwrap_or(0);
            trim_fraction(&format!("{value:.decimals$}"))
        } else {
            format!("{}E{exponent}", trim_fraction(mantissa))
        }
    };
    text.replace('-', &OVERBAR.to_string())
}

/// Drops trailing zeros of a fraction, and the point if nothing is left.
fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Formats a number, complex values as `aJb`.
///
/// # Example
/// ```
/// use aplite::interpreter::{printer::format_number, value::number::Number};
///
/// assert_eq!(format_number(Number::new(1.5, -2.0), 10), "1.5J¯2");
/// assert_eq!(format_number(Number::from_real(42.0), 10), "42");
/// ```
#[must_use]
pub fn format_number(number: Number, precision: usize) -> String {
    if number.imaginary == 0.0 {
        format_real(number.real, precision)
    } else {
        format!("{}J{}", format_real(number.real, precision), format_real(number.imaginary, precision))
    }
}

/// A rendered rectangle of text.
#[derive(Debug)]
struct Block {
    lines: Vec<String>,
    width: usize,
    align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// How an item separates itself from its neighbours in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    Char,
    Number,
    Nested,
}

impl Block {
    fn line(text: String, align: Align) -> Self {
        Self { width: text.chars().count(),
               lines: vec![text],
               align }
    }

    fn from_lines(lines: Vec<String>, align: Align) -> Self {
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        Self { lines, width, align }
    }

    fn height(&self) -> usize {
        self.lines.len()
    }

    /// Returns line `row` padded to `width`.
    fn padded(&self, row: usize, width: usize) -> String {
        let line = self.lines.get(row).map_or("", String::as_str);
        let fill = " ".repeat(width.saturating_sub(line.chars().count()));
        match self.align {
            Align::Left => format!("{line}{fill}"),
            Align::Right => format!("{fill}{line}"),
        }
    }
}

fn spacing(element: &Element) -> Spacing {
    match element {
        Element::Char(_) => Spacing::Char,
        Element::Number(_) => Spacing::Number,
        Element::Array(_) => Spacing::Nested,
    }
}

fn element_block(element: &Element, precision: usize) -> Block {
    match element {
        Element::Char(c) => Block::line(c.to_string(), Align::Left),
        Element::Number(number) => Block::line(format_number(*number, precision), Align::Right),
        Element::Array(inner) => {
            let rendered = array_lines(inner, precision);
            Block::from_lines(rendered, Align::Left)
        },
    }
}

/// Lays out a matrix of items with aligned columns.
fn matrix_lines(items: &[Element], rows: usize, columns: usize, precision: usize) -> Vec<String> {
    if rows == 0 {
        return Vec::new();
    }
    if columns == 0 {
        return vec![String::new(); rows];
    }
    let blocks: Vec<Block> = items.iter().map(|item| element_block(item, precision)).collect();
    let widths: Vec<usize> = (0..columns).map(|j| (0..rows).map(|i| blocks[i * columns + j].width).max().unwrap_or(0))
                                         .collect();
    let column_spacing: Vec<Spacing> =
        (0..columns).map(|j| {
                        let kinds = (0..rows).map(|i| spacing(&items[i * columns + j]));
                        kinds.fold(Spacing::Char, |acc, kind| match (acc, kind) {
                                 (Spacing::Nested, _) | (_, Spacing::Nested) => Spacing::Nested,
                                 (Spacing::Number, _) | (_, Spacing::Number) => Spacing::Number,
                                 _ => Spacing::Char,
                             })
                    })
                    .collect();
    let gaps: Vec<usize> = (0..columns).map(|j| {
                                           if j == 0 {
                                               return 0;
                                           }
                                           match (column_spacing[j - 1], column_spacing[j]) {
                                               (Spacing::Char, Spacing::Char) => 0,
                                               (Spacing::Nested, _) | (_, Spacing::Nested) => 2,
                                               _ => 1,
                                           }
                                       })
                                       .collect();

    let mut lines = Vec::new();
    for i in 0..rows {
        let height = (0..columns).map(|j| blocks[i * columns + j].height()).max().unwrap_or(1);
        for row in 0..height {
            let mut line = String::new();
            for j in 0..columns {
                line.push_str(&" ".repeat(gaps[j]));
                line.push_str(&blocks[i * columns + j].padded(row, widths[j]));
            }
            lines.push(line.trim_end().to_string());
        }
    }
    lines
}

fn array_lines(array: &Array, precision: usize) -> Vec<String> {
    match array.shape() {
        [] => element_block(&array.first(), precision).lines,
        [len] => matrix_lines(array.ravel(), 1, *len, precision),
        [rows, columns] => matrix_lines(array.ravel(), *rows, *columns, precision),
        [leading @ .., rows, columns] => {
            let plane = rows * columns;
            let planes: usize = leading.iter().product();
            let mut lines = Vec::new();
            for k in 0..planes {
                if k > 0 {
                    lines.push(String::new());
                }
                let items = &array.ravel()[k * plane..(k + 1) * plane];
                lines.extend(matrix_lines(items, *rows, *columns, precision));
            }
            lines
        },
    }
}

/// Renders an array for display with `precision` significant digits.
///
/// # Example
/// ```
/// use aplite::interpreter::{printer::format_array, value::array::Array};
///
/// assert_eq!(format_array(&Array::numbers([1.0, -2.0, 3.5]), 10), "1 ¯2 3.5");
/// assert_eq!(format_array(&Array::chars("HELLO"), 10), "HELLO");
/// let matrix = Array::numbers([1.0, 20.0, 300.0, 4.0]).reshaped(vec![2, 2]).unwrap();
/// assert_eq!(format_array(&matrix, 10), "  1 20\n300  4");
/// ```
#[must_use]
pub fn format_array(array: &Array, precision: usize) -> String {
    array_lines(array, precision).join("\n")
}
