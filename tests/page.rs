use chrono::NaiveDateTime;
use redpot_ui::disclosure::AFFORDANCE_CLASS;
use redpot_ui::prelude::*;

struct Fixture {
    doc: MemoryDocument,
    sidebar: NodeId,
    lessons: NodeId,
    notes: Vec<NodeId>,
    is_visible: NodeId,
    is_payable: NodeId,
    toggle_all: NodeId,
    invoices: Vec<NodeId>,
}

/// A tutor admin page touching every behavior
fn admin_page() -> Fixture {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let nav = doc.append_element(body, "nav", &[("id", "sidenav")]);
    let sidebar = doc.append_element(nav, "ul", &[("class", "list-group")]);

    doc.append_element(body, "a", &[("class", "section-title"), ("id", "lessons")]);
    doc.append_text_element(body, "h3", &[], "Lessons");
    let lessons = doc.append_element(body, "table", &[("class", "table collapsible")]);
    for i in 0..14 {
        let row = doc.append_element(lessons, "tr", &[]);
        doc.append_text_element(row, "td", &[], &format!("Lesson {}", i));
    }

    doc.append_text_element(body, "a", &[("class", "section-title"), ("id", "notes")], "Notes");
    let list = doc.append_element(body, "ul", &[("class", "collapsible"), ("data-display", "1")]);
    let stamps = [
        "2026-10-18 09:15:00",
        "2026-10-18T00:00:00",
        "2026-10-17 23:59:59",
        "not a date",
        "2025-01-01",
    ];
    let notes = stamps
        .iter()
        .map(|stamp| {
            doc.append_text_element(list, "li", &[("class", "item"), ("data-created-on", *stamp)], "note")
        })
        .collect();

    doc.append_text_element(
        body,
        "a",
        &[("class", "section-title"), ("id", "fees"), ("data-badge-text", "new")],
        "Fees",
    );
    let is_visible = doc.append_element(body, "input", &[("type", "checkbox"), ("id", "id_is_visible")]);
    let is_payable = doc.append_element(
        body,
        "input",
        &[
            ("type", "checkbox"),
            ("id", "id_is_payable"),
            ("data-depends-on", "id_is_visible"),
            ("data-depends-effect", "enable"),
            ("data-depends-mirror", ""),
        ],
    );

    let table = doc.append_element(body, "table", &[("class", "datatable")]);
    let head = doc.append_element(table, "tr", &[]);
    let toggle_all = doc.append_element(head, "input", &[("type", "checkbox"), ("id", "toggle-all")]);
    let invoices = (0..3)
        .map(|i| {
            let row = doc.append_element(table, "tr", &[]);
            let id = format!("invoice-{}", i);
            doc.append_element(row, "input", &[("type", "checkbox"), ("id", id.as_str())])
        })
        .collect();

    Fixture {
        doc,
        sidebar,
        lessons,
        notes,
        is_visible,
        is_payable,
        toggle_all,
        invoices,
    }
}

fn clock() -> FixedClock {
    FixedClock(NaiveDateTime::parse_from_str("2026-10-18 14:00:00", "%Y-%m-%d %H:%M:%S").unwrap())
}

#[test]
fn ready_wires_every_behavior() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());
    assert!(!page.is_ready());

    let report = page.ready();
    assert_eq!(
        report,
        ReadyReport {
            disclosures: 2,
            dependencies: 1,
            nav_entries: 3,
            highlighted: 2,
            select_all: true,
        }
    );
    assert!(page.is_ready());

    let doc = page.dom();
    let today: Vec<bool> = fixture.notes.iter().map(|n| doc.has_class(n, "today")).collect();
    assert_eq!(today, vec![true, true, false, false, false]);

    let titles: Vec<String> = doc
        .children(&fixture.sidebar)
        .iter()
        .map(|link| doc.text_content(link))
        .collect();
    assert_eq!(titles, vec!["Lessons", "Notes", "Feesnew"]);

    assert!(doc.is_disabled(&fixture.is_payable));
}

#[test]
fn ready_is_idempotent() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());

    let first = page.ready();
    let html = page.dom().to_html();
    let second = page.ready();

    assert_eq!(first, second);
    assert_eq!(page.dom().to_html(), html);
    assert_eq!(page.dom().elements_by_class(AFFORDANCE_CLASS).len(), 2);
    assert_eq!(page.dom().children(&fixture.sidebar).len(), 3);
}

#[test]
fn click_on_icon_bubbles_to_affordance() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());
    page.ready();

    let disclosure = page
        .disclosures()
        .iter()
        .position(|d| *d.container() == fixture.lessons)
        .unwrap();
    let icon = page.dom().elements_by_class("rotate-icon")[0];

    assert_eq!(page.dispatch(Event::Click(icon)), 1);
    assert_eq!(page.disclosures()[disclosure].state(), ToggleState::Expanded);

    // Clicking the table body does nothing
    assert_eq!(page.dispatch(Event::Click(fixture.lessons)), 0);
    assert_eq!(page.disclosures()[disclosure].state(), ToggleState::Expanded);
}

#[test]
fn deliver_does_not_bubble() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());
    page.ready();

    let icon = page.dom().elements_by_class("rotate-icon")[0];
    assert_eq!(page.deliver(Event::Click(icon)), 0);
    let affordance = *page.disclosures()[0].affordance();
    assert_eq!(page.deliver(Event::Click(affordance)), 1);
}

#[test]
fn select_all_covers_every_checkbox() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());
    page.ready();

    page.dom_mut().set_checked(&fixture.toggle_all, true);
    page.dispatch(Event::Click(fixture.toggle_all));
    for invoice in &fixture.invoices {
        assert!(page.dom().is_checked(invoice));
    }
    assert!(page.dom().is_checked(&fixture.is_visible));

    page.dom_mut().set_checked(&fixture.toggle_all, false);
    page.dispatch(Event::Click(fixture.toggle_all));
    for invoice in &fixture.invoices {
        assert!(!page.dom().is_checked(invoice));
    }
    assert!(!page.dom().is_checked(&fixture.is_visible));
}

#[test]
fn select_all_scoped_to_invoice_table() {
    let fixture = admin_page();
    let mut config = PageConfig::default();
    config.select_all.scope_to_table = true;
    let mut page = Page::with_clock(fixture.doc, config, clock());
    page.ready();

    page.dom_mut().set_checked(&fixture.toggle_all, true);
    page.dispatch(Event::Click(fixture.toggle_all));
    for invoice in &fixture.invoices {
        assert!(page.dom().is_checked(invoice));
    }
    // Fee checkboxes live outside the invoice table
    assert!(!page.dom().is_checked(&fixture.is_visible));
}

#[test]
fn listeners_cover_wired_elements_once() {
    let fixture = admin_page();
    let mut page = Page::with_clock(fixture.doc, PageConfig::default(), clock());
    page.ready();

    let listeners = page.listeners();
    assert_eq!(listeners.len(), 5);
    assert!(listeners.contains(&(fixture.is_visible, EventKind::Change)));
    assert!(listeners.contains(&(fixture.is_visible, EventKind::Click)));
    assert!(listeners.contains(&(fixture.toggle_all, EventKind::Click)));
    for disclosure in page.disclosures() {
        assert!(listeners.contains(&(*disclosure.affordance(), EventKind::Click)));
    }
}

#[test]
fn configuration_from_json() {
    let fixture = admin_page();
    let config = PageConfig::from_json(
        r#"{"hidden_class": "d-none", "disclosure": {"threshold": 3, "margin": 0}}"#,
    )
    .unwrap();
    let mut page = Page::with_clock(fixture.doc, config, clock());
    page.ready();

    let rows = page.dom().descendants_by_tag(&fixture.lessons, "tr");
    let hidden = rows.iter().filter(|row| page.dom().has_class(row, "d-none")).count();
    assert_eq!(hidden, 11);
    assert!(rows.iter().all(|row| !page.dom().has_class(row, "hidden")));
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(
        PageConfig::from_json(r#"{"disclosure": {"threshold": 0}}"#),
        Err(UiError::InvalidConfig(_))
    ));
    assert!(matches!(
        PageConfig::from_json("{not json"),
        Err(UiError::Config(_))
    ));
}

#[test]
fn empty_page_wires_nothing() {
    let mut page = Page::with_clock(MemoryDocument::new(), PageConfig::default(), clock());
    assert_eq!(page.ready(), ReadyReport::default());
    assert!(page.listeners().is_empty());
    assert!(page.select_all().is_none());
}
