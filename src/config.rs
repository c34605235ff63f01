//! Parse configuration
//!
//! Immutable once handed to a `MarkupParser`; shared read-only by every
//! parse it runs.

/// Markup dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingMode {
    /// HTML: element semantics registry applies (void, CDATA-bodied and
    /// auto-open/auto-close elements)
    Html,
    /// XML: every element is plain
    Xml,
}

/// How strictly open and close elements must pair up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementBalancing {
    /// Close elements are reported as written, nothing is checked
    NoBalancing,
    /// Auto-close plus auto-open of missing parent elements
    AutoOpenClose,
    /// Auto-close of siblings, intervening and still-open elements
    AutoClose,
    /// Any imbalance is an error
    RequireBalanced,
}

impl ElementBalancing {
    /// Whether the element stack drives close matching at all
    pub fn tracks_balance(self) -> bool {
        !matches!(self, ElementBalancing::NoBalancing)
    }

    /// Whether synthetic auto-close events may be emitted
    pub fn allows_auto_close(self) -> bool {
        matches!(self, ElementBalancing::AutoClose | ElementBalancing::AutoOpenClose)
    }

    /// Whether synthetic auto-open events may be emitted
    pub fn allows_auto_open(self) -> bool {
        matches!(self, ElementBalancing::AutoOpenClose)
    }
}

/// Root element uniqueness policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueRootElement {
    /// Enforced only when a DOCTYPE is present, and then the root name must
    /// match the DOCTYPE's
    DependsOnPrologDoctype,
    /// Always enforced
    RequiredAlways,
    NotValidated,
}

/// Whether a prolog part must, may or must not appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrologPresence {
    Allowed,
    Required,
    Forbidden,
}

/// Prolog (XML Declaration and DOCTYPE) validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrologConfig {
    /// Master switch: ordering, uniqueness and presence checks
    pub validate: bool,
    pub xml_declaration: PrologPresence,
    pub doctype: PrologPresence,
    /// `DOCTYPE`, `PUBLIC` and `SYSTEM` must be upper case
    pub uppercase_doctype_keywords: bool,
}

impl PrologConfig {
    /// No prolog checks at all
    pub const fn disabled() -> Self {
        PrologConfig {
            validate: false,
            xml_declaration: PrologPresence::Allowed,
            doctype: PrologPresence::Allowed,
            uppercase_doctype_keywords: false,
        }
    }

    /// Ordering and uniqueness checks, both parts optional
    pub const fn validated() -> Self {
        PrologConfig {
            validate: true,
            xml_declaration: PrologPresence::Allowed,
            doctype: PrologPresence::Allowed,
            uppercase_doctype_keywords: true,
        }
    }
}

/// Everything the core branches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    pub mode: ParsingMode,
    pub case_sensitive: bool,
    pub element_balancing: ElementBalancing,
    /// Close elements with no open counterpart are errors instead of
    /// unmatched-close events
    pub no_unmatched_close_elements: bool,
    pub unique_attributes: bool,
    /// Attributes must have an `=` operator and a quoted value
    pub xml_well_formed_attribute_values: bool,
    pub unique_root_element: UniqueRootElement,
    pub prolog: PrologConfig,
    /// Legacy: an unterminated element tag at end of input becomes text
    pub lenient_unfinished_tags: bool,
}

impl ParseConfig {
    /// HTML defaults: case-insensitive, auto-open/auto-close, no prolog checks
    pub fn html() -> Self {
        ParseConfig {
            mode: ParsingMode::Html,
            case_sensitive: false,
            element_balancing: ElementBalancing::AutoOpenClose,
            no_unmatched_close_elements: false,
            unique_attributes: false,
            xml_well_formed_attribute_values: false,
            unique_root_element: UniqueRootElement::NotValidated,
            prolog: PrologConfig::disabled(),
            lenient_unfinished_tags: false,
        }
    }

    /// XML defaults: case-sensitive, balanced, well-formed
    pub fn xml() -> Self {
        ParseConfig {
            mode: ParsingMode::Xml,
            case_sensitive: true,
            element_balancing: ElementBalancing::RequireBalanced,
            no_unmatched_close_elements: true,
            unique_attributes: true,
            xml_well_formed_attribute_values: true,
            unique_root_element: UniqueRootElement::DependsOnPrologDoctype,
            prolog: PrologConfig::validated(),
            lenient_unfinished_tags: false,
        }
    }

    pub fn with_element_balancing(mut self, balancing: ElementBalancing) -> Self {
        self.element_balancing = balancing;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_no_unmatched_close_elements(mut self, required: bool) -> Self {
        self.no_unmatched_close_elements = required;
        self
    }

    pub fn with_unique_attributes(mut self, required: bool) -> Self {
        self.unique_attributes = required;
        self
    }

    pub fn with_xml_well_formed_attribute_values(mut self, required: bool) -> Self {
        self.xml_well_formed_attribute_values = required;
        self
    }

    pub fn with_unique_root_element(mut self, policy: UniqueRootElement) -> Self {
        self.unique_root_element = policy;
        self
    }

    pub fn with_prolog(mut self, prolog: PrologConfig) -> Self {
        self.prolog = prolog;
        self
    }

    pub fn with_lenient_unfinished_tags(mut self, lenient: bool) -> Self {
        self.lenient_unfinished_tags = lenient;
        self
    }

    /// Whether element names are folded to lower case
    #[inline]
    pub fn folds_case(&self) -> bool {
        !self.case_sensitive
    }

    #[inline]
    pub fn is_html(&self) -> bool {
        self.mode == ParsingMode::Html
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::html()
    }
}
