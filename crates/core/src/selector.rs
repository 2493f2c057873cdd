//! Match elements with CSS selectors.
//!
//! Selectors are parsed by [`scraper`], so the full CSS selector grammar it
//! supports is available, including combinators, attribute operators and
//! structural pseudo-classes like `:first-child`.
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

/// An error produced while parsing a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The selector contains nothing but whitespace.
    #[error("selector is empty")]
    Empty,
    /// The selector is not valid CSS.
    #[error("invalid selector {selector:?}: {reason}")]
    Invalid {
        /// The rejected selector.
        selector: SmolStr,
        /// Why the selector was rejected.
        reason: String,
    },
}

/// A validated selector list.
///
/// A [`Selector`] keeps its textual form, so hosts backed by a native
/// selector engine can match with [`Selector::as_str`] directly.
#[derive(Clone)]
pub struct Selector {
    source: SmolStr,
    compiled: scraper::Selector,
}

impl Selector {
    /// Parses a [`Selector`] from its textual form.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let source = source.trim();

        if source.is_empty() {
            return Err(Error::Empty);
        }

        let compiled = scraper::Selector::parse(source).map_err(|error| Error::Invalid {
            selector: SmolStr::new(source),
            reason: error.to_string(),
        })?;

        Ok(Self {
            source: SmolStr::new(source),
            compiled,
        })
    }

    /// Returns the textual form of the [`Selector`].
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn compiled(&self) -> &scraper::Selector {
        &self.compiled
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Selector {}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.source).finish()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeId};

    fn fixture() -> (Document, [NodeId; 4]) {
        let mut document = Document::new();

        let list = document.create_root("ul");
        document.set_id(list, "cards");

        let item = document.append(list, "li");
        document.add_class(item, "card");
        document.set_attribute(item, "data-kind", "task");

        let header = document.append(item, "div");
        document.add_class(header, "header");
        document.add_class(header, "grip");

        let label = document.append(header, "span");

        (document, [list, item, header, label])
    }

    fn matches(document: &Document, node: NodeId, selector: &str) -> bool {
        let selector = Selector::parse(selector).expect("valid selector");
        document.matches(node, &selector)
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(Error::Empty));

        for source in ["a >", "a,", ".", "a!"] {
            let error = Selector::parse(source).expect_err(source);

            assert!(
                matches!(&error, Error::Invalid { selector, .. } if selector == source),
                "{source}: {error:?}"
            );
        }
    }

    #[test]
    fn test_source_is_trimmed() {
        let selector: Selector = "  .grip  ".parse().expect("valid selector");

        assert_eq!(selector.as_str(), ".grip");
        assert_eq!(selector.to_string(), ".grip");
        assert_eq!(selector, Selector::parse(".grip").expect("valid selector"));
    }

    #[test]
    fn test_simple_selectors() {
        let (document, [list, item, header, _]) = fixture();

        assert!(matches(&document, list, "ul"));
        assert!(matches(&document, list, "#cards"));
        assert!(matches(&document, item, "li.card"));
        assert!(matches(&document, item, "[data-kind=task]"));
        assert!(matches(&document, header, ".header.grip"));
        assert!(!matches(&document, header, ".header.missing"));
        assert!(!matches(&document, item, "[data-kind=note]"));
    }

    #[test]
    fn test_combinators() {
        let (document, [_, _, header, label]) = fixture();

        assert!(matches(&document, label, "#cards span"));
        assert!(matches(&document, label, ".card > .header > span"));
        assert!(matches(&document, header, "ul li .grip"));
        assert!(!matches(&document, label, ".card > span"));
        assert!(matches(&document, label, "#missing, .grip > span"));
    }

    #[test]
    fn test_runtime_classes_are_matched() {
        let (mut document, [_, item, _, _]) = fixture();

        assert!(!matches(&document, item, ".dragging"));

        document.add_class(item, "dragging");
        assert!(matches(&document, item, "li.dragging"));

        document.remove_class(item, "dragging");
        assert!(!matches(&document, item, ".dragging"));
    }
}
