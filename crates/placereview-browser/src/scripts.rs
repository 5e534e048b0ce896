//! JavaScript snippets evaluated in the page.
//!
//! Every value interpolated into a script is encoded as a JSON string
//! literal, so selectors containing quotes cannot break out.

use crate::page::ItemQuery;

fn literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Hides the automation flag before any page script runs.
pub(crate) const MASK_WEBDRIVER: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// True once the document has parsed far enough to be scripted.
pub(crate) const DOCUMENT_READY: &str = "document.readyState !== 'loading'";

pub(crate) fn exists(selector: &str) -> String {
    format!("document.querySelector({}) !== null", literal(selector))
}

pub(crate) fn scroll_height(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) return null;
  return Math.max(el.scrollHeight, document.documentElement.scrollHeight);
}})()"#,
        sel = literal(selector)
    )
}

pub(crate) fn scroll_to_bottom(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (el) el.scrollTop = el.scrollHeight;
  window.scrollTo(0, document.documentElement.scrollHeight);
  return true;
}})()"#,
        sel = literal(selector)
    )
}

const VISIBLE_FN: &str = r#"const visible = (el) => {
    const rect = el.getBoundingClientRect();
    const style = window.getComputedStyle(el);
    return rect.width > 0 && rect.height > 0
      && style.visibility !== 'hidden' && style.display !== 'none';
  };"#;

pub(crate) fn click_if_visible(selector: &str) -> String {
    format!(
        r#"(() => {{
  {visible}
  const el = document.querySelector({sel});
  if (!el || !visible(el)) return false;
  el.scrollIntoView({{ block: 'center' }});
  el.click();
  return true;
}})()"#,
        visible = VISIBLE_FN,
        sel = literal(selector)
    )
}

pub(crate) fn click_all_visible(selector: &str) -> String {
    format!(
        r#"(() => {{
  {visible}
  let clicked = 0;
  for (const el of document.querySelectorAll({sel})) {{
    if (!visible(el)) continue;
    el.click();
    clicked += 1;
  }}
  return clicked;
}})()"#,
        visible = VISIBLE_FN,
        sel = literal(selector)
    )
}

pub(crate) fn click_with_text(selector: &str, text: &str) -> String {
    format!(
        r#"(() => {{
  const wanted = {text};
  for (const el of document.querySelectorAll({sel})) {{
    if ((el.innerText || el.textContent || '').includes(wanted)) {{
      el.click();
      return true;
    }}
  }}
  return false;
}})()"#,
        sel = literal(selector),
        text = literal(text)
    )
}

/// Reads every item matching the query into `{field: [values]}` objects.
///
/// Text is taken from `innerText` so hidden "more" affordances do not leak
/// into review bodies.
pub(crate) fn query_items(query: &ItemQuery) -> String {
    let fields = serde_json::to_string(&query.fields).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(() => {{
  const fields = {fields};
  const read = (el, attr) => {{
    const raw = attr ? el.getAttribute(attr) : (el.innerText || el.textContent);
    return (raw || '').trim();
  }};
  return Array.from(document.querySelectorAll({item})).map((node) => {{
    const out = {{}};
    for (const f of fields) {{
      const matches = f.all
        ? Array.from(node.querySelectorAll(f.selector))
        : [node.querySelector(f.selector)].filter(Boolean);
      out[f.name] = matches.map((el) => read(el, f.attribute));
    }}
    return out;
  }});
}})()"#,
        fields = fields,
        item = literal(&query.item)
    )
}
