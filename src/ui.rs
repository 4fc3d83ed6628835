use crate::state::SharedTracker;
use crate::view::ViewState;
use std::fmt::Write;

pub fn render_index(tracker: &SharedTracker, view: &ViewState) -> String {
    let totals = tracker.totals();

    let goal_section = if tracker.goal().is_none() {
        format!(
            r#"<form class="goal" method="post" action="/goal">
        <input name="goal" inputmode="decimal" placeholder="Daily goal (kcal)" value="{}" />
        <button type="submit">Set goal</button>
      </form>"#,
            escape(&view.goal_draft)
        )
    } else {
        String::new()
    };

    let remaining = match totals.remaining {
        Some(remaining) => format!(
            r#"<div class="stat"><span>Remaining</span><strong>{remaining} kcal</strong></div>"#
        ),
        None => String::new(),
    };

    let reset = if tracker.items().is_empty() {
        String::new()
    } else {
        RESET_FORM.to_string()
    };

    INDEX_HTML
        .replace("{{GOAL_FORM}}", &goal_section)
        .replace("{{ITEMS}}", &render_items(tracker, view))
        .replace("{{TOTAL}}", &totals.total.to_string())
        .replace("{{REMAINING}}", &remaining)
        .replace("{{RESET}}", &reset)
        .replace("{{HISTORY}}", &render_history(tracker, view))
        .replace("{{LOGS}}", &render_logs(tracker, view))
}

fn render_items(tracker: &SharedTracker, view: &ViewState) -> String {
    let mut html = String::new();
    for item in tracker.items() {
        let delete = if view.active_item() == Some(item.id) {
            format!(
                r#"<form method="post" action="/items/{}/delete"><button class="danger" type="submit">Delete</button></form>"#,
                item.id
            )
        } else {
            String::new()
        };
        let _ = write!(
            html,
            r#"<li><form method="post" action="/items/{id}/activate"><button class="row" type="submit">{name}<span>{kcal} kcal</span></button></form>{delete}</li>"#,
            id = item.id,
            name = escape(&item.name),
            kcal = item.kcal,
        );
    }
    html
}

fn render_history(tracker: &SharedTracker, view: &ViewState) -> String {
    if !view.show_history {
        return String::new();
    }

    let mut rows = String::new();
    for (index, entry) in tracker.history().iter().enumerate() {
        let delete = if view.history_delete_visible(index) {
            format!(
                r#"<form method="post" action="/history/{index}/delete"><button class="danger" type="submit">Delete</button></form>"#
            )
        } else {
            String::new()
        };
        let _ = write!(
            rows,
            r#"<li><form method="post" action="/history/{index}/add"><button class="row" type="submit">{name}<span>{kcal} kcal</span></button></form><form method="post" action="/history/{index}/reveal"><button class="ghost" type="submit">&#8942;</button></form>{delete}</li>"#,
            name = escape(&entry.name),
            kcal = entry.kcal,
        );
    }
    if rows.is_empty() {
        rows.push_str(r#"<li class="empty">No foods yet.</li>"#);
    }

    format!(r#"<aside class="overlay"><h2>History</h2><ul>{rows}</ul></aside>"#)
}

fn render_logs(tracker: &SharedTracker, view: &ViewState) -> String {
    if !view.show_logs {
        return String::new();
    }

    let mut rows = String::new();
    for (index, entry) in tracker.daily_logs().iter().enumerate() {
        let delete = if view.log_delete_visible(index) {
            format!(
                r#"<form method="post" action="/logs/{index}/delete"><button class="danger" type="submit">Delete</button></form>"#
            )
        } else {
            String::new()
        };
        let _ = write!(
            rows,
            r#"<li><form method="post" action="/logs/{index}/reveal"><button class="row" type="submit">{date}<span>{total} kcal</span></button></form>{delete}</li>"#,
            date = escape(&entry.date),
            total = entry.total,
        );
    }
    if rows.is_empty() {
        rows.push_str(r#"<li class="empty">No days archived.</li>"#);
    }

    format!(r#"<section class="logs"><h2>Daily log</h2><ul>{rows}</ul></section>"#)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const RESET_FORM: &str = r#"<form method="post" action="/reset" onsubmit="return confirm('This will clear everything including your goal. Proceed?');">
        <input type="hidden" name="confirm" value="true" />
        <button class="danger" type="submit">Reset day</button>
      </form>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Log</title>
  <style>
    :root {
      --bg: #ffffff;
      --ink: #2c3e50;
      --muted: #7f8c8d;
      --accent: #27ae60;
      --danger: #e74c3c;
      --card: #f7f9fa;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: flex;
      justify-content: center;
      padding: 1rem 2rem;
    }

    .app {
      width: min(600px, 100%);
      display: grid;
      gap: 1.25rem;
      text-align: center;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    form {
      display: inline-flex;
      gap: 0.5rem;
      margin: 0;
    }

    input {
      padding: 0.5rem 0.7rem;
      border: 1px solid #ccd;
      border-radius: 4px;
      font: inherit;
    }

    button {
      padding: 0.4rem 0.8rem;
      border: none;
      border-radius: 4px;
      background: var(--accent);
      color: white;
      font: inherit;
      cursor: pointer;
    }

    button.danger {
      background: var(--danger);
    }

    button.ghost,
    button.row {
      background: transparent;
      color: var(--ink);
    }

    button.row {
      display: flex;
      justify-content: space-between;
      width: 100%;
      gap: 1rem;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      max-height: 320px;
      overflow-y: auto;
    }

    li {
      display: flex;
      align-items: center;
      gap: 0.5rem;
      padding: 0.3rem 0;
      border-bottom: 1px solid #eee;
    }

    li form:first-child {
      flex: 1;
    }

    .empty {
      color: var(--muted);
      justify-content: center;
    }

    .stats {
      display: flex;
      justify-content: center;
      gap: 2rem;
    }

    .stat {
      display: grid;
      gap: 0.2rem;
    }

    .stat span {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .overlay {
      position: fixed;
      top: 4rem;
      right: 2rem;
      width: min(320px, 90vw);
      background: var(--card);
      border-radius: 8px;
      box-shadow: 0 12px 32px rgba(44, 62, 80, 0.18);
      padding: 1rem;
      text-align: left;
    }

    .logs {
      background: var(--card);
      border-radius: 8px;
      padding: 1rem;
      text-align: left;
    }

    h2 {
      margin: 0 0 0.5rem;
      font-size: 1.1rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Calorie Log</h1>
      <div>
        <form method="post" action="/logs/toggle"><button class="ghost" type="submit">Daily log</button></form>
        <form method="post" action="/history/toggle"><button type="submit">History</button></form>
      </div>
    </header>

    {{GOAL_FORM}}

    <form class="add" method="post" action="/items">
      <input name="name" placeholder="Food" />
      <input name="kcal" inputmode="decimal" placeholder="kcal" />
      <button type="submit">Add</button>
    </form>

    <ul class="items">{{ITEMS}}</ul>

    <div class="stats">
      <div class="stat"><span>Total</span><strong>{{TOTAL}} kcal</strong></div>
      {{REMAINING}}
    </div>

    {{RESET}}

    {{LOGS}}
  </main>
  {{HISTORY}}
</body>
</html>
"#;
