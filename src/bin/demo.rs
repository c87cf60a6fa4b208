//! redpot-ui demo - wires a sample admin page in memory and prints the result
//!
//! Run with `RUST_LOG=debug` to see what each behavior attached to.

use anyhow::Result;
use redpot_ui::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== redpot-ui demo: tutor admin page ===\n");

    let config = match std::env::args().nth(1) {
        Some(json) => PageConfig::from_json(&json)?,
        None => PageConfig::default(),
    };

    let (doc, ids) = build_page();
    let mut page = Page::new(doc, config);

    let report = page.ready();
    println!("Ready report: {}", serde_json::to_string_pretty(&report)?);

    // Expand the lesson table
    let table = *page.disclosures()[0].affordance();
    page.dispatch(Event::Click(table));
    println!("Lesson table after click: {:?}", page.disclosures()[0].state());

    // Pick "List B" for right-to-work and tell the page
    page.dom_mut().set_value(ids.rtw_type, "2");
    page.dispatch(Event::Change(ids.rtw_type));

    // Make the fee visible on the website; payable follows
    page.dom_mut().set_checked(&ids.is_visible, true);
    page.dispatch(Event::Click(ids.is_visible));
    page.dispatch(Event::Change(ids.is_visible));
    println!(
        "Fee payable: checked={}, disabled={}",
        page.dom().is_checked(&ids.is_payable),
        page.dom().is_disabled(&ids.is_payable)
    );

    // Select every invoice row
    page.dom_mut().set_checked(&ids.toggle_all, true);
    page.dispatch(Event::Click(ids.toggle_all));

    println!("\n=== Resulting markup ===\n");
    println!("{}", page.dom().to_html());
    Ok(())
}

/// Elements the demo pokes at after wiring
struct DemoIds {
    rtw_type: NodeId,
    is_visible: NodeId,
    is_payable: NodeId,
    toggle_all: NodeId,
}

fn build_page() -> (MemoryDocument, DemoIds) {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    // Sidebar
    let sidenav = doc.append_element(body, "nav", &[("id", "sidenav")]);
    doc.append_element(sidenav, "ul", &[("class", "list-group")]);

    let main = doc.append_element(body, "main", &[]);

    // Lessons: 14 rows, one more than threshold + margin
    doc.append_element(
        main,
        "a",
        &[("class", "section-title"), ("id", "lessons"), ("data-badge-text", "14")],
    );
    doc.append_text_element(main, "h3", &[], "Lessons");
    let table = doc.append_element(main, "table", &[("class", "table collapsible")]);
    for i in 1..=14 {
        let row = doc.append_element(table, "tr", &[]);
        doc.append_text_element(row, "td", &[], &format!("Lesson {}", i));
    }

    // Recent notes
    doc.append_element(
        main,
        "a",
        &[("class", "section-title"), ("id", "notes"), ("data-title", "Recent notes")],
    );
    let notes = doc.append_element(main, "ul", &[("class", "collapsible"), ("data-display", "3")]);
    let today = chrono::Local::now().format("%Y-%m-%d 08:00:00").to_string();
    for i in 1..=8 {
        let created = if i == 1 { today.as_str() } else { "2021-05-06 10:39:00" };
        doc.append_text_element(
            notes,
            "li",
            &[("class", "item"), ("data-created-on", created)],
            &format!("Note {}", i),
        );
    }

    // Right-to-work form
    doc.append_element(
        main,
        "a",
        &[("class", "section-title"), ("id", "rtw"), ("data-title", "Right to work")],
    );
    let form = doc.append_element(main, "form", &[]);
    let rtw_type = doc.append_element(form, "select", &[("id", "id_rtw_type")]);
    doc.append_text_element(rtw_type, "option", &[("value", "")], "---------");
    doc.append_text_element(rtw_type, "option", &[("value", "1")], "List A");
    doc.append_text_element(rtw_type, "option", &[("value", "2")], "List B");
    form_group(
        &mut doc,
        form,
        "id_rtw_document_type",
        &[("data-depends-on", "id_rtw_type"), ("data-depends-value", "1,2")],
    );
    form_group(
        &mut doc,
        form,
        "id_rtw_start_date",
        &[("data-depends-on", "id_rtw_type"), ("data-depends-value", "2")],
    );
    form_group(
        &mut doc,
        form,
        "id_rtw_end_date",
        &[("data-depends-on", "id_rtw_type"), ("data-depends-value", "2")],
    );

    // Fee web options
    let is_visible = doc.append_element(form, "input", &[("type", "checkbox"), ("id", "id_is_visible")]);
    let is_payable = doc.append_element(
        form,
        "input",
        &[
            ("type", "checkbox"),
            ("id", "id_is_payable"),
            ("data-depends-on", "id_is_visible"),
            ("data-depends-effect", "enable"),
            ("data-depends-mirror", ""),
        ],
    );

    // Invoice list
    let invoices = doc.append_element(main, "table", &[("class", "datatable")]);
    let head = doc.append_element(invoices, "tr", &[]);
    let head_cell = doc.append_element(head, "th", &[]);
    let toggle_all = doc.append_element(head_cell, "input", &[("type", "checkbox"), ("id", "toggle-all")]);
    for i in 1..=3 {
        let row = doc.append_element(invoices, "tr", &[]);
        let cell = doc.append_element(row, "td", &[]);
        let id = format!("invoice-{}", i);
        doc.append_element(cell, "input", &[("type", "checkbox"), ("id", id.as_str())]);
    }

    let ids = DemoIds {
        rtw_type,
        is_visible,
        is_payable,
        toggle_all,
    };
    (doc, ids)
}

fn form_group(doc: &mut MemoryDocument, form: NodeId, id: &str, attrs: &[(&str, &str)]) -> NodeId {
    let group = doc.append_element(form, "div", &[("class", "form-group")]);
    doc.append_text_element(group, "label", &[("for", id)], id);
    let mut all = vec![("id", id), ("type", "text")];
    all.extend_from_slice(attrs);
    doc.append_element(group, "input", &all)
}
