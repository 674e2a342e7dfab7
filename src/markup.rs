//! Inline color/style markup used by panel text.
//!
//! Panel text is plain `String`s carrying directives in square brackets:
//!
//! - `[#rrggbb]` or `[green]` sets the foreground color
//! - `[-]` resets the foreground color
//! - `[::b]` turns on bold (`d` dim, `i` italic, `u` underline)
//! - `[::-]` clears all modifiers
//! - `[fg::attrs]` combines both
//!
//! A bracket pair that is not a valid directive is kept as literal text, so
//! `[2]` renders as-is. `[[]` is always a literal `[`; [`escape`] uses it to
//! embed names taken from the cluster. Directives carry no width: alignment
//! must always be computed on [`visible_width`].

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fg {
    Keep,
    Reset,
    Set(Color),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Attrs {
    Keep,
    Reset,
    Add(Modifier),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Directive {
    fg: Fg,
    attrs: Attrs,
}

impl Directive {
    fn apply(self, style: Style) -> Style {
        let style = match self.fg {
            Fg::Keep => style,
            Fg::Reset => Style { fg: None, ..style },
            Fg::Set(color) => style.fg(color),
        };
        match self.attrs {
            Attrs::Keep => style,
            Attrs::Reset => Style {
                add_modifier: Modifier::empty(),
                sub_modifier: Modifier::empty(),
                ..style
            },
            Attrs::Add(m) => style.add_modifier(m),
        }
    }
}

enum Token<'a> {
    Text(&'a str),
    Directive(Directive),
}

fn parse_color(s: &str) -> Option<Color> {
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    let color = match s {
        "white" => Color::White,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        _ => return None,
    };
    Some(color)
}

fn parse_directive(inner: &str) -> Option<Directive> {
    let (fg, attrs) = match inner.split_once("::") {
        Some((fg, attrs)) => (fg, Some(attrs)),
        None => (inner, None),
    };
    let fg = match fg {
        "" => Fg::Keep,
        "-" => Fg::Reset,
        other => Fg::Set(parse_color(other)?),
    };
    let attrs = match attrs {
        None | Some("") => Attrs::Keep,
        Some("-") => Attrs::Reset,
        Some(flags) => {
            let mut m = Modifier::empty();
            for c in flags.chars() {
                m |= match c {
                    'b' => Modifier::BOLD,
                    'd' => Modifier::DIM,
                    'i' => Modifier::ITALIC,
                    'u' => Modifier::UNDERLINED,
                    _ => return None,
                };
            }
            Attrs::Add(m)
        }
    };
    if fg == Fg::Keep && attrs == Attrs::Keep {
        return None;
    }
    Some(Directive { fg, attrs })
}

const ESCAPED_OPEN: &str = "[[]";

/// Makes `s` render verbatim, whatever brackets it contains.
pub fn escape(s: &str) -> String {
    s.replace('[', ESCAPED_OPEN)
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;
    while let Some(offset) = s[pos..].find('[') {
        let open = pos + offset;
        if s[open..].starts_with(ESCAPED_OPEN) {
            if text_start < open {
                tokens.push(Token::Text(&s[text_start..open]));
            }
            tokens.push(Token::Text("["));
            text_start = open + ESCAPED_OPEN.len();
            pos = text_start;
            continue;
        }
        let directive = s[open + 1..].find(']').and_then(|len| {
            let inner = &s[open + 1..open + 1 + len];
            if inner.contains('[') {
                None
            } else {
                parse_directive(inner).map(|d| (d, open + 2 + len))
            }
        });
        match directive {
            Some((d, end)) => {
                if text_start < open {
                    tokens.push(Token::Text(&s[text_start..open]));
                }
                tokens.push(Token::Directive(d));
                text_start = end;
                pos = end;
            }
            None => pos = open + 1,
        }
    }
    if text_start < s.len() {
        tokens.push(Token::Text(&s[text_start..]));
    }
    tokens
}

/// Removes every directive, keeping literal text.
pub fn strip(s: &str) -> String {
    tokenize(s)
        .into_iter()
        .filter_map(|t| match t {
            Token::Text(text) => Some(text),
            Token::Directive(_) => None,
        })
        .collect()
}

/// Display width in characters, ignoring directives.
pub fn visible_width(s: &str) -> usize {
    strip(s).chars().count()
}

/// Pads with trailing spaces up to `width` visible characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Pads with leading spaces up to `width` visible characters.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", " ".repeat(pad), s)
}

/// Converts one marked-up line into styled spans.
pub fn to_line(s: &str) -> Line<'static> {
    let mut style = Style::default();
    let mut spans = Vec::new();
    for token in tokenize(s) {
        match token {
            Token::Text(text) => spans.push(Span::styled(text.to_string(), style)),
            Token::Directive(d) => style = d.apply(style),
        }
    }
    Line::from(spans)
}

/// Converts marked-up lines into a text block.
pub fn to_text(lines: &[String]) -> Text<'static> {
    Text::from(lines.iter().map(|l| to_line(l)).collect::<Vec<_>>())
}
