//! CSS selector subset understood by [`MemoryPage`](super::MemoryPage).
//!
//! Supported: type selectors, `*`, `.class`, `#id`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, compounds of those, the descendant combinator and
//! comma-separated lists. That covers every selector the page behaviors use.

use crate::error::{BehaviorError, BehaviorResult};

use super::{Element, NodeId};

/// A parsed selector list (`a, b c`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    alternatives: Vec<Complex>,
}

/// Compounds joined by descendant combinators, left to right.
#[derive(Debug, Clone, PartialEq)]
struct Complex {
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Class(String),
    Id(String),
    HasAttr(String),
    AttrEquals(String, String),
    AttrPrefix(String, String),
}

impl SelectorList {
    pub fn parse(input: &str) -> BehaviorResult<Self> {
        let mut parser = Parser::new(input);
        let list = parser.list()?;
        Ok(list)
    }

    /// Whether the element at `node` matches any alternative.
    pub(crate) fn matches(&self, elements: &[Element], node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(elements, node))
    }
}

impl Complex {
    fn matches(&self, elements: &[Element], node: NodeId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(&elements[node.index()]) {
            return false;
        }

        let mut cursor = elements[node.index()].parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = cursor else {
                    return false;
                };
                cursor = elements[ancestor.index()].parent;
                if compound.matches(&elements[ancestor.index()]) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.conditions.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&element.tag) {
                return false;
            }
        }
        self.conditions.iter().all(|condition| match condition {
            Condition::Class(class) => element.has_class(class),
            Condition::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Condition::HasAttr(name) => element.attribute(name).is_some(),
            Condition::AttrEquals(name, value) => {
                element.attribute(name).as_deref() == Some(value.as_str())
            }
            Condition::AttrPrefix(name, prefix) => element
                .attribute(name)
                .is_some_and(|value| !prefix.is_empty() && value.starts_with(prefix.as_str())),
        })
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    source: String,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            source: input.to_string(),
        }
    }

    fn error(&self, what: &str) -> BehaviorError {
        BehaviorError::Host(format!(
            "invalid selector '{}' at {}: {}",
            self.source, self.pos, what
        ))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: char) -> BehaviorResult<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    /// Skip whitespace, reporting whether any was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn is_ident_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-' || c == '_'
    }

    fn ident(&mut self) -> BehaviorResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn list(&mut self) -> BehaviorResult<SelectorList> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_ws();
            alternatives.push(self.complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some(_) => return Err(self.error("unexpected character")),
            }
        }
        Ok(SelectorList { alternatives })
    }

    fn complex(&mut self) -> BehaviorResult<Complex> {
        let mut compounds = vec![self.compound()?];
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => break,
                Some(_) if had_ws => compounds.push(self.compound()?),
                Some(_) => return Err(self.error("unsupported combinator")),
            }
        }
        Ok(Complex { compounds })
    }

    fn compound(&mut self) -> BehaviorResult<Compound> {
        let mut compound = Compound::default();
        let mut universal = false;
        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if Self::is_ident_char(c) => compound.tag = Some(self.ident()?),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.conditions.push(Condition::Class(self.ident()?));
                }
                Some('#') => {
                    self.pos += 1;
                    compound.conditions.push(Condition::Id(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    compound.conditions.push(self.attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() && !universal {
            return Err(self.error("empty selector"));
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> BehaviorResult<Condition> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();
        let condition = match self.peek() {
            Some(']') => Condition::HasAttr(name),
            Some('=') => {
                self.pos += 1;
                Condition::AttrEquals(name, self.value()?)
            }
            Some('^') => {
                self.pos += 1;
                self.expect('=')?;
                Condition::AttrPrefix(name, self.value()?)
            }
            _ => return Err(self.error("unsupported attribute operator")),
        };
        self.skip_ws();
        self.expect(']')?;
        Ok(condition)
    }

    fn value(&mut self) -> BehaviorResult<String> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.expect(quote)?;
                Ok(value)
            }
            _ => self.ident(),
        }
    }
}
