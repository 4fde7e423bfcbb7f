use std::{fmt::Display, ops::RangeInclusive};

/// Ordinals of the reserved-word block. `Tag::Var` opens it and `Tag::Mod`
/// closes it; nothing else may fall inside.
pub const RESERVED_RANGE: RangeInclusive<u32> = 457..=479;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Tag {
    Eof,
    Error,

    Geq,    // >=
    Leq,    // <=
    Neq,    // <>
    Assign, // :=

    Id,
    Number,
    String,
    True,
    False,

    // Reserved
    Var,
    Forward,
    Backward,
    Right,
    Left,
    SetX,
    SetY,
    SetXY,
    Home,
    Clear,
    Circle,
    Arc,
    PenUp,
    PenDown,
    Color,
    PenWidth,
    Print,
    While,
    If,
    IfElse,
    Or,
    And,
    Mod,

    /// Any character without a category of its own.
    Char(char),
}

impl Tag {
    /// Every reserved word, in ordinal order.
    pub const RESERVED: [Tag; 23] = [
        Tag::Var,
        Tag::Forward,
        Tag::Backward,
        Tag::Right,
        Tag::Left,
        Tag::SetX,
        Tag::SetY,
        Tag::SetXY,
        Tag::Home,
        Tag::Clear,
        Tag::Circle,
        Tag::Arc,
        Tag::PenUp,
        Tag::PenDown,
        Tag::Color,
        Tag::PenWidth,
        Tag::Print,
        Tag::While,
        Tag::If,
        Tag::IfElse,
        Tag::Or,
        Tag::And,
        Tag::Mod,
    ];

    /// Stable numeric value of the tag. Single-character tags use the
    /// character's code point.
    pub fn ordinal(&self) -> u32 {
        match self {
            Tag::Eof => 65535,
            Tag::Error => 65534,

            Tag::Geq => 258,
            Tag::Leq => 259,
            Tag::Neq => 260,
            Tag::Assign => 261,

            Tag::Id => 358,
            Tag::Number => 359,
            Tag::String => 360,
            Tag::True => 361,
            Tag::False => 362,

            Tag::Var => 457,
            Tag::Forward => 458,
            Tag::Backward => 459,
            Tag::Right => 460,
            Tag::Left => 461,
            Tag::SetX => 462,
            Tag::SetY => 463,
            Tag::SetXY => 464,
            Tag::Home => 465,
            Tag::Clear => 466,
            Tag::Circle => 467,
            Tag::Arc => 468,
            Tag::PenUp => 469,
            Tag::PenDown => 470,
            Tag::Color => 471,
            Tag::PenWidth => 472,
            Tag::Print => 473,
            Tag::While => 474,
            Tag::If => 475,
            Tag::IfElse => 476,
            Tag::Or => 477,
            Tag::And => 478,
            Tag::Mod => 479,

            Tag::Char(c) => *c as u32,
        }
    }

    /// A code point can collide with the reserved block, so single-character
    /// tags are excluded before the bounds check.
    pub fn is_reserved_word(&self) -> bool {
        !matches!(self, Tag::Char(_)) && RESERVED_RANGE.contains(&self.ordinal())
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Tag::Geq | Tag::Leq | Tag::Neq | Tag::Assign)
    }

    /// Canonical uppercase spelling of a reserved word.
    pub fn spelling(&self) -> Option<&'static str> {
        let spelling = match self {
            Tag::Var => "VAR",
            Tag::Forward => "FORWARD",
            Tag::Backward => "BACKWARD",
            Tag::Right => "RIGHT",
            Tag::Left => "LEFT",
            Tag::SetX => "SETX",
            Tag::SetY => "SETY",
            Tag::SetXY => "SETXY",
            Tag::Home => "HOME",
            Tag::Clear => "CLEAR",
            Tag::Circle => "CIRCLE",
            Tag::Arc => "ARC",
            Tag::PenUp => "PENUP",
            Tag::PenDown => "PENDOWN",
            Tag::Color => "COLOR",
            Tag::PenWidth => "PENWIDTH",
            Tag::Print => "PRINT",
            Tag::While => "WHILE",
            Tag::If => "IF",
            Tag::IfElse => "IFELSE",
            Tag::Or => "OR",
            Tag::And => "AND",
            Tag::Mod => "MOD",
            _ => return None,
        };

        Some(spelling)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Number(f64),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(number) => Some(*number),
            TokenValue::Text(_) => None,
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tag: Tag,
    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(tag: Tag, value: Option<TokenValue>) -> Self {
        Token { tag, value }
    }

    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(TokenValue::as_text)
    }

    pub fn number(&self) -> Option<f64> {
        self.value.as_ref().and_then(TokenValue::as_number)
    }

    pub fn is_eof(&self) -> bool {
        self.tag == Tag::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag {
            Tag::Geq => write!(f, "'>='"),
            Tag::Leq => write!(f, "'<='"),
            Tag::Neq => write!(f, "'<>'"),
            Tag::Assign => write!(f, "':='"),
            Tag::True => write!(f, "'#T'"),
            Tag::False => write!(f, "'#F'"),
            Tag::Eof => write!(f, "'EOF'"),
            Tag::Error => write!(f, "'ERROR'"),
            Tag::Number | Tag::String => match &self.value {
                Some(value) => write!(f, "{}", value),
                None => write!(f, ""),
            },
            Tag::Id => write!(f, "ID = '{}'", self.text().unwrap_or_default()),
            Tag::Char(c) => write!(f, "'{}'", c),
            tag => {
                let spelling = self.text().or(tag.spelling()).unwrap_or_default();
                write!(f, "'{}'", spelling)
            }
        }
    }
}
