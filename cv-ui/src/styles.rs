#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-cv-ui]";

/// Default CSS for the page along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --header-offset: 24px;
  --cv-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --cv-bg: #f8fafc;
  --cv-surface: #ffffff;
  --cv-text: #1f2933;
  --cv-muted: #52606d;
  --cv-heading: #11181c;
  --cv-border: rgba(148, 163, 184, 0.35);
  --cv-accent: #2563eb;
  --cv-accent-soft: rgba(37, 99, 235, 0.12);
  --cv-bar-track: rgba(148, 163, 184, 0.25);
  --cv-bar-fill: #2563eb;
  --cv-radius: 14px;
  --cv-shadow: 0 16px 36px rgba(15, 23, 42, 0.08);
}

:root[data-theme="dark"] {
  --cv-bg: #0f1116;
  --cv-surface: #151923;
  --cv-text: #e2e8f0;
  --cv-muted: #94a3b8;
  --cv-heading: #f5f7fb;
  --cv-border: rgba(71, 84, 103, 0.55);
  --cv-accent: #60a5fa;
  --cv-accent-soft: rgba(96, 165, 250, 0.16);
  --cv-bar-track: rgba(71, 84, 103, 0.45);
  --cv-bar-fill: #60a5fa;
  --cv-shadow: 0 16px 36px rgba(0, 0, 0, 0.45);
}

body {
  font-family: var(--cv-font-family);
  background: var(--cv-bg);
  color: var(--cv-text);
  transition: background 200ms ease, color 200ms ease;
}

.cv-wrap {
  max-width: 920px;
  margin: 0 auto;
  padding: 28px;
}

.cv-nav {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
  align-items: center;
}

.cv-nav a {
  color: var(--cv-muted);
  text-decoration: none;
  font-weight: 600;
  font-size: 0.9rem;
}

.cv-nav a:hover,
.cv-nav a:focus-visible {
  color: var(--cv-accent);
  outline: none;
}

.header-actions {
  display: flex;
  gap: 10px;
  align-items: center;
}

.btn {
  border: 1px solid var(--cv-border);
  background: var(--cv-surface);
  color: var(--cv-text);
  border-radius: 999px;
  padding: 8px 16px;
  font-size: 0.88rem;
  font-weight: 600;
  cursor: pointer;
  transition: border 120ms ease, color 120ms ease, transform 120ms ease;
}

.btn:hover,
.btn:focus-visible {
  border-color: var(--cv-accent);
  color: var(--cv-accent);
  outline: none;
  transform: translateY(-1px);
}

.btn:disabled {
  opacity: 0.6;
  cursor: default;
  transform: none;
}

.card {
  background: var(--cv-surface);
  border: 1px solid var(--cv-border);
  border-radius: var(--cv-radius);
  padding: 20px;
  box-shadow: var(--cv-shadow);
  opacity: 0;
  transform: translateY(14px);
  transition: opacity 500ms ease, transform 500ms ease;
}

.card.in-view {
  opacity: 1;
  transform: translateY(0);
}

.skill-bar {
  height: 10px;
  border-radius: 999px;
  background: var(--cv-bar-track);
  overflow: hidden;
}

.skill-bar-fill {
  width: 0;
  height: 100%;
  border-radius: inherit;
  background: var(--cv-bar-fill);
  transition: width 900ms cubic-bezier(0.22, 1, 0.36, 1);
}

.skill-filter {
  border: 1px solid var(--cv-border);
  background: var(--cv-surface);
  color: var(--cv-muted);
  border-radius: 999px;
  padding: 6px 14px;
  font-size: 0.82rem;
  font-weight: 600;
  cursor: pointer;
}

.skill-filter.active {
  background: var(--cv-accent-soft);
  color: var(--cv-accent);
  border-color: transparent;
}

.skill-block {
  display: flex;
  flex-direction: column;
  gap: 8px;
  padding: 12px 0;
}

.skill-block .skill-detail {
  display: none;
  color: var(--cv-muted);
  font-size: 0.9rem;
  line-height: 1.5;
}

.skill-block.expanded .skill-detail {
  display: block;
}

.more-skill {
  align-self: start;
  border: none;
  background: none;
  color: var(--cv-accent);
  font-size: 0.82rem;
  font-weight: 600;
  cursor: pointer;
  padding: 0;
}

.tl-item {
  position: relative;
  border-left: 3px solid var(--cv-border);
  padding: 10px 0 10px 18px;
  cursor: pointer;
}

.tl-item::before {
  content: "";
  position: absolute;
  width: 11px;
  height: 11px;
  border-radius: 50%;
  background: var(--cv-surface);
  border: 2px solid var(--cv-border);
  left: -7px;
  top: 16px;
}

.tl-item.active {
  border-left-color: var(--cv-accent);
  background: var(--cv-accent-soft);
}

.tl-item.active::before {
  border-color: var(--cv-accent);
}

.tl-item:focus-visible {
  outline: 2px solid var(--cv-accent);
  outline-offset: 2px;
}

.hide-on-export {
  display: none !important;
}

@media print {
  .btn,
  .header-actions,
  .cv-nav {
    display: none !important;
  }

  body {
    background: #ffffff;
  }

  .card {
    opacity: 1;
    transform: none;
    box-shadow: none;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-cv-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
