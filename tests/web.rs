//! Browser tests for the web backend; run with `wasm-pack test --headless --firefox -- --features wasm`
#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use redpot_ui::prelude::*;
use redpot_ui::wasm::WebDom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn page_with(html: &str) -> (web_sys::Document, Page<WebDom>) {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(html);
    let page = Page::new(WebDom::new(document.clone()), PageConfig::default());
    (document, page)
}

fn rows(count: usize) -> String {
    (0..count).map(|i| format!("<tr><td>row {}</td></tr>", i)).collect()
}

#[wasm_bindgen_test]
fn collapses_long_table() {
    let html = format!("<table id=\"t\" class=\"collapsible\"><tbody>{}</tbody></table>", rows(14));
    let (document, mut page) = page_with(&html);

    assert_eq!(page.ready().disclosures, 1);
    let hidden = document.query_selector_all("#t tr.hidden").unwrap().length();
    assert_eq!(hidden, 4);

    let affordance = page.disclosures()[0].affordance().clone();
    page.deliver(Event::Click(affordance));
    let hidden = document.query_selector_all("#t tr.hidden").unwrap().length();
    assert_eq!(hidden, 0);
}

#[wasm_bindgen_test]
fn short_table_untouched() {
    let html = format!("<table class=\"collapsible\">{}</table>", rows(13));
    let (document, mut page) = page_with(&html);

    assert_eq!(page.ready().disclosures, 0);
    assert!(document.query_selector(".hide-toggle").unwrap().is_none());
}

#[wasm_bindgen_test]
fn select_drives_group() {
    let (document, mut page) = page_with(
        r#"<select id="id_rtw_type">
             <option value="">---</option><option value="1">A</option><option value="2">B</option>
           </select>
           <div class="form-group" id="group">
             <input id="id_rtw_start_date" data-depends-on="id_rtw_type" data-depends-value="2">
           </div>"#,
    );
    page.ready();
    let group = document.get_element_by_id("group").unwrap();
    assert!(group.class_list().contains("hidden"));

    let select = document.get_element_by_id("id_rtw_type").unwrap();
    select
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .unwrap()
        .set_value("2");
    page.deliver(Event::Change(select));
    assert!(!group.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn sidenav_links() {
    let (document, mut page) = page_with(
        r#"<nav id="sidenav"><ul></ul></nav>
           <a class="section-title" id="fees" data-title="Fees"></a>
           <a class="section-title" id="notes">Notes</a>"#,
    );
    assert_eq!(page.ready().nav_entries, 2);
    let links = document.query_selector_all("#sidenav ul a").unwrap();
    assert_eq!(links.length(), 2);
}

#[wasm_bindgen_test]
fn second_enhance_is_ignored() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(
        r#"<nav id="sidenav"><ul></ul></nav>
           <a class="section-title" id="fees">Fees</a>"#,
    );

    redpot_ui::wasm::enhance("{}").unwrap();
    redpot_ui::wasm::enhance("{}").unwrap();
    let links = document.query_selector_all("#sidenav ul a").unwrap();
    assert_eq!(links.length(), 1);
}
