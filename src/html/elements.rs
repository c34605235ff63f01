//! Standard HTML element table
//!
//! Auto-open and auto-close rules follow the HTML5 "optional tags" rules:
//! metadata elements open into `head`, body content opens into `body`, and
//! list items, definition terms, table sections, options and ruby
//! annotations close their open siblings.

use super::descriptor::{ElementDescriptor, NameSet};

const IN_HTML: NameSet = &["html"];
const IN_HEAD: NameSet = &["html", "head"];
const IN_BODY: NameSet = &["html", "body"];
/// Metadata met once the body is open stays where it is
const HEAD_LIMITS: NameSet = &["body"];
/// Body content written inside these stays inside them
const BODY_LIMITS: NameSet = &["template", "noscript"];

const CLOSES_P: NameSet = &["p"];
const CLOSES_HEADING: NameSet = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];
/// "button scope" boundaries: a `p` beyond them is not closed
const P_SCOPE: NameSet = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "th", "template",
];

const LIST_ITEMS: NameSet = &["li"];
const LIST_SCOPE: NameSet = &["ul", "ol", "menu"];
const DEFINITIONS: NameSet = &["dt", "dd"];
const DEFINITION_SCOPE: NameSet = &["dl"];

const TABLE_SCOPE: NameSet = &["table"];
const TABLE_CAPTIONS: NameSet = &["caption", "colgroup"];
const TABLE_SECTIONS: NameSet = &["caption", "colgroup", "thead", "tbody", "tfoot"];
const TABLE_ROWS: NameSet = &["tr"];
const ROW_SCOPE: NameSet = &["table", "thead", "tbody", "tfoot"];
const TABLE_CELLS: NameSet = &["td", "th"];
const CELL_SCOPE: NameSet = &["tr", "table"];

const OPTIONS: NameSet = &["option"];
const OPTION_SCOPE: NameSet = &["select", "datalist", "optgroup"];
const OPTION_GROUPS: NameSet = &["optgroup", "option"];
const OPTION_GROUP_SCOPE: NameSet = &["select"];

const RUBY_BASE: NameSet = &["rb", "rt", "rtc", "rp"];
const RUBY_TEXT: NameSet = &["rb", "rt", "rp"];
const RUBY_SCOPE: NameSet = &["ruby", "rtc"];

/// Block elements that close an open `p`
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "form", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "pre", "section", "summary", "table", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Body content with no sibling rules
const PHRASING: &[&str] = &[
    "a", "abbr", "audio", "b", "bdi", "bdo", "button", "canvas", "cite", "code", "data", "del",
    "dfn", "em", "font", "i", "iframe", "ins", "kbd", "label", "legend", "map", "mark", "math",
    "meter", "nobr", "object", "output", "picture", "progress", "q", "ruby", "s", "samp", "select",
    "slot", "small", "span", "strike", "strong", "sub", "sup", "svg", "time", "tt", "u", "var",
    "video",
];

/// Body content that never has a body
const BODY_VOID: &[&str] = &[
    "area", "br", "embed", "img", "input", "keygen", "param", "source", "track", "wbr",
];

/// Build every standard descriptor
pub fn standard_elements() -> Vec<ElementDescriptor> {
    let mut elements = Vec::with_capacity(140);

    // Root and sections of the document
    elements.push(ElementDescriptor::standard("html"));
    elements.push(ElementDescriptor::standard("head").auto_open(IN_HTML, &[]));
    elements.push(
        ElementDescriptor::standard("body")
            .auto_open(IN_HTML, &[])
            .auto_close(&["head"], &[]),
    );

    // Document metadata and scripting
    let metadata = |name| ElementDescriptor::standard(name).auto_open(IN_HEAD, HEAD_LIMITS);
    elements.push(metadata("title").cdata());
    elements.push(metadata("style").cdata());
    elements.push(metadata("script").script());
    elements.push(metadata("base").void());
    elements.push(metadata("link").void());
    elements.push(metadata("meta").void());
    elements.push(metadata("noscript"));
    elements.push(metadata("template"));

    let body = |name| ElementDescriptor::standard(name).auto_open(IN_BODY, BODY_LIMITS);

    for &name in BLOCKS {
        elements.push(body(name).auto_close(CLOSES_P, P_SCOPE));
    }
    for &name in HEADINGS {
        elements.push(body(name).auto_close(CLOSES_HEADING, P_SCOPE));
    }
    elements.push(body("hr").void().auto_close(CLOSES_P, P_SCOPE));

    for &name in PHRASING {
        elements.push(body(name));
    }
    for &name in BODY_VOID {
        elements.push(body(name).void());
    }
    elements.push(body("textarea").cdata());
    elements.push(body("xmp").cdata().auto_close(CLOSES_P, P_SCOPE));

    // Lists
    elements.push(body("li").auto_close(LIST_ITEMS, LIST_SCOPE));
    elements.push(body("dt").auto_close(DEFINITIONS, DEFINITION_SCOPE));
    elements.push(body("dd").auto_close(DEFINITIONS, DEFINITION_SCOPE));

    // Tables
    elements.push(body("caption").auto_close(TABLE_CAPTIONS, TABLE_SCOPE));
    elements.push(body("colgroup").auto_close(TABLE_CAPTIONS, TABLE_SCOPE));
    elements.push(body("col").void());
    for name in ["thead", "tbody", "tfoot"] {
        elements.push(body(name).auto_close(TABLE_SECTIONS, TABLE_SCOPE));
    }
    elements.push(body("tr").auto_close(TABLE_ROWS, ROW_SCOPE));
    elements.push(body("td").auto_close(TABLE_CELLS, CELL_SCOPE));
    elements.push(body("th").auto_close(TABLE_CELLS, CELL_SCOPE));

    // Forms
    elements.push(body("datalist"));
    elements.push(body("option").auto_close(OPTIONS, OPTION_SCOPE));
    elements.push(body("optgroup").auto_close(OPTION_GROUPS, OPTION_GROUP_SCOPE));

    // Ruby annotations
    elements.push(body("rb").auto_close(RUBY_BASE, RUBY_SCOPE));
    elements.push(body("rtc").auto_close(RUBY_BASE, RUBY_SCOPE));
    elements.push(body("rt").auto_close(RUBY_TEXT, RUBY_SCOPE));
    elements.push(body("rp").auto_close(RUBY_TEXT, RUBY_SCOPE));

    // Interactive and obsolete
    elements.push(body("menuitem"));
    elements.push(ElementDescriptor::standard("frameset").auto_open(IN_HTML, &[]).auto_close(&["head"], &[]));
    elements.push(ElementDescriptor::standard("frame").void());
    elements.push(ElementDescriptor::standard("noframes"));

    elements
}
