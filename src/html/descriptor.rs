//! Element Behavior Descriptor
//!
//! Per-element-name parsing rules. The Event Processor applies one generic
//! algorithm parameterized by these fields.

use std::borrow::Cow;

/// Element names as written in the standard table
pub type NameSet = &'static [&'static str];

/// How the element's body is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// Ordinary markup
    Normal,
    /// Never has a body: an open tag is reported as a standalone element
    Void,
    /// Body is text up to the matching close tag
    Cdata,
    /// `script`: CDATA unless its `type` attribute names a non-JavaScript
    /// type, in which case the body is ordinary markup
    Script,
}

/// Rules for one element name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Canonical lower-case name
    pub name: Cow<'static, [u8]>,
    pub content: ContentModel,
    /// Ancestors to open, outermost first, when missing from the stack
    pub auto_open_parents: NameSet,
    /// Any of these on the stack suppresses auto-opening
    pub auto_open_limits: NameSet,
    /// Open elements this one implicitly closes
    pub auto_close_siblings: NameSet,
    /// Stack elements that stop the search for siblings to close
    pub auto_close_limits: NameSet,
}

impl ElementDescriptor {
    /// A standard element with no special behavior
    pub fn standard(name: &'static str) -> Self {
        ElementDescriptor {
            name: Cow::Borrowed(name.as_bytes()),
            content: ContentModel::Normal,
            auto_open_parents: &[],
            auto_open_limits: &[],
            auto_close_siblings: &[],
            auto_close_limits: &[],
        }
    }

    /// Descriptor for a name outside the standard set
    pub fn plain(name: &[u8]) -> Self {
        ElementDescriptor {
            name: Cow::Owned(name.to_vec()),
            ..Self::standard("")
        }
    }

    pub fn void(mut self) -> Self {
        self.content = ContentModel::Void;
        self
    }

    pub fn cdata(mut self) -> Self {
        self.content = ContentModel::Cdata;
        self
    }

    pub fn script(mut self) -> Self {
        self.content = ContentModel::Script;
        self
    }

    pub fn auto_open(mut self, parents: NameSet, limits: NameSet) -> Self {
        self.auto_open_parents = parents;
        self.auto_open_limits = limits;
        self
    }

    pub fn auto_close(mut self, siblings: NameSet, limits: NameSet) -> Self {
        self.auto_close_siblings = siblings;
        self.auto_close_limits = limits;
        self
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.content == ContentModel::Void
    }

    #[inline]
    pub fn requests_auto_open(&self) -> bool {
        !self.auto_open_parents.is_empty()
    }

    #[inline]
    pub fn requests_auto_close(&self) -> bool {
        !self.auto_close_siblings.is_empty()
    }
}

/// Whether `name` is one of `set`, ignoring ASCII case
#[inline]
pub fn contains(set: NameSet, name: &[u8]) -> bool {
    set.iter().any(|entry| entry.as_bytes().eq_ignore_ascii_case(name))
}

/// Whether a `script` `type` attribute value designates executable script,
/// whose body must not be parsed as markup
pub fn is_executable_script_type(value: &[u8]) -> bool {
    const SCRIPT_TYPES: &[&str] = &[
        "",
        "module",
        "text/javascript",
        "application/javascript",
        "application/x-javascript",
        "text/x-javascript",
        "text/ecmascript",
        "application/ecmascript",
        "application/x-ecmascript",
        "text/x-ecmascript",
        "text/jscript",
        "text/livescript",
        "text/javascript1.0",
        "text/javascript1.1",
        "text/javascript1.2",
        "text/javascript1.3",
        "text/javascript1.4",
        "text/javascript1.5",
    ];
    let trimmed = value.trim_ascii();
    SCRIPT_TYPES
        .iter()
        .any(|candidate| candidate.as_bytes().eq_ignore_ascii_case(trimmed))
}
