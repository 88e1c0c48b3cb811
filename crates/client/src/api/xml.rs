//! Markup (XML) response normalization.
//!
//! ### Payload shape
//!
//! ```xml
//! <RESULT>
//!   <TOTAL_COUNT>1</TOTAL_COUNT> <PAGE_COUNT/> <PAGE_INDEX/> <COUNT_PER_PAGE/> <ITEM_COUNT/>
//!   <ITEMS>
//!     <ITEM>
//!       <NAME_KO>…</NAME_KO> <SEX>1</SEX> …
//!       <REFERENCES>
//!         <REFERENCE>
//!           <BOOK_NAME>…</BOOK_NAME>
//!           <LINKS><LINK><NAME>…</NAME><URL>…</URL></LINK></LINKS>
//!         </REFERENCE>
//!       </REFERENCES>
//!     </ITEM>
//!   </ITEMS>
//! </RESULT>
//! ```
//!
//! ### Guarantees
//! - Never fails: malformed input becomes a `ResultPage` with `error` set.
//! - A missing `ITEMS` container yields the metadata with no items.

use gonghun_core::{Link, Record, Reference, ResultPage};
use roxmltree::{Document, Node};

/// Normalize an XML payload into a `ResultPage`.
pub fn normalize(payload: &str) -> ResultPage {
    match try_normalize(payload) {
        Ok(page) => page,
        Err(message) => {
            tracing::error!("failed to normalize XML response: {}", message);
            ResultPage::failed(message)
        }
    }
}

fn try_normalize(payload: &str) -> Result<ResultPage, String> {
    let doc = Document::parse(payload).map_err(|e| format!("XML parse error: {e}"))?;
    let root = doc.root_element();

    let mut page = ResultPage {
        total_count: count(root, "TOTAL_COUNT")?,
        page_count: count(root, "PAGE_COUNT")?,
        page_index: count(root, "PAGE_INDEX")?,
        count_per_page: count(root, "COUNT_PER_PAGE")?,
        item_count: count(root, "ITEM_COUNT")?,
        ..Default::default()
    };

    let Some(items) = child(root, "ITEMS") else {
        tracing::debug!("XML response has no ITEMS element");
        return Ok(page);
    };

    page.items = elements(items, "ITEM").map(record).collect();
    Ok(page)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && n.tag_name().name() == tag)
}

fn elements<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Metadata counter; absent or blank reads as 0.
fn count(root: Node, tag: &str) -> Result<u64, String> {
    let Some(text) = child(root, tag).and_then(|n| n.text()).map(str::trim) else {
        return Ok(0);
    };
    if text.is_empty() {
        return Ok(0);
    }
    text.parse()
        .map_err(|_| format!("{tag} is not an integer: {text}"))
}

fn text_of(node: Node, tag: &str) -> Option<String> {
    child(node, tag).map(|n| n.text().unwrap_or_default().to_string())
}

fn record(item: Node) -> Record {
    let mut record = Record::default();
    for field in item.children().filter(Node::is_element) {
        let tag = field.tag_name().name();
        if tag == "REFERENCES" {
            record.references = Some(elements(field, "REFERENCE").map(reference).collect());
        } else {
            record.insert(tag.to_lowercase(), field.text().unwrap_or_default());
        }
    }
    record.decorate();
    record
}

fn reference(node: Node) -> Reference {
    let links = child(node, "LINKS")
        .map(|links| {
            elements(links, "LINK")
                .map(|link| Link { name: text_of(link, "NAME"), url: text_of(link, "URL") })
                .collect()
        })
        .unwrap_or_default();

    Reference { book_name: text_of(node, "BOOK_NAME"), links }
}
