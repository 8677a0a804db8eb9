//! Token identifiers and raw token records.

use crate::element::AttrBag;
use std::fmt;

/// Names of the token attributes, in the order they are stored.
pub mod attr {
    pub const ID: &str = "id";
    pub const BASEFORM: &str = "baseform";
    pub const POS_UD: &str = "pos_ud";
    pub const POS: &str = "pos";
    pub const UFEATS: &str = "ufeats";
    pub const DEPHEAD: &str = "dephead_ud";
    pub const DEPREL: &str = "deprel_ud";
    pub const DEPS: &str = "deps";
    pub const MISC: &str = "misc";
}

/// The id column of a token line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenId {
    /// Ordinary word, `7`.
    Plain(usize),
    /// Multiword range, `4-5`, covering plain ids `major..=minor`.
    Range(usize, usize),
    /// Empty node for enhanced dependencies, `5.1`, attached after `major`.
    Empty(usize, usize),
}

// Unsigned decimal only; `usize::from_str` would also take a leading `+`.
fn number(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl TokenId {
    /// Parse an id column. Returns `None` for anything malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some((major, minor)) = raw.split_once('-') {
            let major = number(major)?;
            let minor = number(minor)?;
            if major == 0 || minor <= major {
                return None;
            }
            Some(TokenId::Range(major, minor))
        } else if let Some((major, minor)) = raw.split_once('.') {
            let major = number(major)?;
            let minor = number(minor)?;
            if minor == 0 {
                return None;
            }
            Some(TokenId::Empty(major, minor))
        } else {
            match number(raw)? {
                0 => None,
                n => Some(TokenId::Plain(n)),
            }
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, TokenId::Plain(_))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Plain(n) => write!(f, "{}", n),
            TokenId::Range(major, minor) => write!(f, "{}-{}", major, minor),
            TokenId::Empty(major, minor) => write!(f, "{}.{}", major, minor),
        }
    }
}

/// One token line, fields kept as written (including `_` placeholders).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    pub head: String,
    pub deprel: String,
    pub deps: String,
    pub misc: String,
    /// 1-based source line.
    pub line: usize,
}

fn nullable(value: &str) -> Option<&str> {
    match value {
        "" | "_" => None,
        other => Some(other),
    }
}

/// Serialize a `|`-separated column as `|a|b|`, or `""` when empty.
pub fn pipe_list(value: &str) -> String {
    let Some(value) = nullable(value) else {
        return String::new();
    };
    let entries: Vec<&str> = value.split('|').filter(|entry| !entry.is_empty()).collect();
    if entries.is_empty() {
        return String::new();
    }
    format!("|{}|", entries.join("|"))
}

impl RawToken {
    /// Lemma, where `_` means absent unless the form itself is `_`.
    pub fn lemma(&self) -> Option<&str> {
        if self.lemma.is_empty() || (self.lemma == "_" && self.form != "_") {
            None
        } else {
            Some(&self.lemma)
        }
    }

    pub fn head(&self) -> Option<&str> {
        nullable(&self.head)
    }

    pub fn deprel(&self) -> Option<&str> {
        nullable(&self.deprel)
    }

    /// Entries of the enhanced dependency column as `(head, relation)`.
    pub fn enhanced_deps(&self) -> impl Iterator<Item = (&str, &str)> {
        nullable(&self.deps)
            .into_iter()
            .flat_map(|deps| deps.split('|'))
            .filter_map(|entry| entry.split_once(':'))
    }

    /// Look up `key=value` in the misc column.
    pub fn misc_value(&self, key: &str) -> Option<&str> {
        nullable(&self.misc)?
            .split('|')
            .filter_map(|entry| entry.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn space_after(&self) -> bool {
        self.misc_value("SpaceAfter") != Some("No")
    }

    /// True when a new paragraph begins at this token.
    pub fn starts_paragraph(&self) -> bool {
        self.misc_value("NewPar") == Some("Yes")
    }

    /// The normalized attribute bag. Absent values are left out.
    pub fn attributes(&self) -> AttrBag {
        let mut bag = AttrBag::new();
        bag.insert(attr::ID.to_string(), self.id.to_string());

        let scalar = [
            (attr::BASEFORM, self.lemma()),
            (attr::POS_UD, nullable(&self.upos)),
            (attr::POS, nullable(&self.xpos)),
        ];
        for (name, value) in scalar {
            if let Some(value) = value {
                bag.insert(name.to_string(), value.to_string());
            }
        }

        let feats = pipe_list(&self.feats);
        if !feats.is_empty() {
            bag.insert(attr::UFEATS.to_string(), feats);
        }
        if let Some(head) = self.head() {
            bag.insert(attr::DEPHEAD.to_string(), head.to_string());
        }
        if let Some(deprel) = self.deprel() {
            bag.insert(attr::DEPREL.to_string(), deprel.to_string());
        }
        for (name, value) in [(attr::DEPS, &self.deps), (attr::MISC, &self.misc)] {
            let list = pipe_list(value);
            if !list.is_empty() {
                bag.insert(name.to_string(), list);
            }
        }
        bag
    }
}
