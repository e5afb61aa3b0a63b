//! Structural repairs: heading levels and table sections.

use dom_query::{NodeRef, Selection};

use crate::dom;

fn heading_level(sel: &Selection) -> Option<u8> {
    let tag = dom::tag_name(sel)?;
    match tag.as_str() {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Rewrite headings so each level is at most one deeper than the previous
/// heading. The first heading keeps its level. Returns the number renamed.
pub fn repair_headings(content: &Selection) -> usize {
    let mut previous: Option<u8> = None;
    let mut renamed = 0;

    for heading in content.select("h1, h2, h3, h4, h5, h6").iter() {
        let Some(level) = heading_level(&heading) else {
            continue;
        };
        let level = match previous {
            Some(prev) if level > prev + 1 => {
                let fixed = prev + 1;
                dom::rename(&heading, &format!("h{fixed}"));
                renamed += 1;
                fixed
            }
            _ => level,
        };
        previous = Some(level);
    }

    renamed
}

/// Give every table a `thead` and a `tbody`.
///
/// Without a `thead`, the first row moves into a new one and its `td`
/// cells become `th`. Rows outside any section are wrapped in a `tbody`.
pub fn normalize_tables(content: &Selection) {
    let mut tables: Vec<NodeRef> = content
        .nodes()
        .iter()
        .filter(|node| dom::node_is_one_of(node, &["table"]))
        .copied()
        .collect();
    tables.extend(content.select("table").nodes().iter().copied());

    for table in tables {
        normalize_table(&table);
    }
}

fn normalize_table(table: &NodeRef) {
    if sections(table, "thead").is_empty() {
        if let Some(first_row) = own_rows(table).into_iter().next() {
            let thead = dom::new_element(table, "thead");
            insert_section(table, &thead);
            first_row.remove_from_parent();
            thead.append_child(&first_row);
            for cell in first_row.children().into_iter().filter(|c| dom::node_is_one_of(c, &["td"])) {
                dom::rename(&Selection::from(cell), "th");
            }
        }
    }

    let tbody = match sections(table, "tbody").into_iter().next() {
        Some(tbody) => tbody,
        None => {
            let tbody = dom::new_element(table, "tbody");
            match sections(table, "tfoot").into_iter().next() {
                Some(tfoot) => tfoot.insert_before(&tbody),
                None => table.append_child(&tbody),
            }
            tbody
        }
    };

    // Rows sitting directly under the table.
    for row in table.children().into_iter().filter(|c| dom::node_is_one_of(c, &["tr"])) {
        dom::move_to_end(&row, &tbody);
    }
}

/// Direct children of the table with the given tag.
fn sections<'a>(table: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    table.children().into_iter().filter(|child| dom::node_is_one_of(child, &[tag])).collect()
}

/// Rows of this table (not of nested tables), in document order.
fn own_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children() {
        if dom::node_is_one_of(&child, &["tr"]) {
            rows.push(child);
        } else if dom::node_is_one_of(&child, &["tbody", "tfoot"]) {
            rows.extend(child.children().into_iter().filter(|c| dom::node_is_one_of(c, &["tr"])));
        }
    }
    rows
}

/// Insert a section before the first row-bearing child, after any
/// `caption`/`colgroup`.
fn insert_section(table: &NodeRef, section: &NodeRef) {
    let anchor = table
        .children()
        .into_iter()
        .find(|child| dom::node_is_one_of(child, &["tbody", "tr", "tfoot"]));
    match anchor {
        Some(anchor) => anchor.insert_before(section),
        None => table.append_child(section),
    }
}
