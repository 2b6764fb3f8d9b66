//! The interactive operator page.
//!
//! One static HTML page: a query input, a page-count input, run and clear
//! buttons, and one rendered row per surviving profile with a profile-link
//! button and an editable outreach-message block. All interaction goes
//! through the JSON API; the page itself carries no state.

use axum::response::Html;

pub(crate) async fn index() -> Html<&'static str> {
    Html(PAGE)
}

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>leadlens</title>
<style>
  body { font-family: sans-serif; max-width: 900px; margin: 2rem auto; padding: 0 1rem; }
  .controls { display: flex; gap: 0.5rem; align-items: center; margin-bottom: 1rem; }
  .controls input[type=text] { flex: 1; padding: 0.4rem; }
  .controls input[type=number] { width: 5rem; padding: 0.4rem; }
  button { padding: 0.4rem 1rem; cursor: pointer; }
  .row { display: grid; grid-template-columns: 3rem 12rem 6rem 1fr; gap: 0.5rem;
         align-items: start; border-top: 1px solid #ddd; padding: 0.75rem 0; }
  .row textarea { width: 100%; min-height: 8rem; }
  .link-btn { background: #4CAF50; color: white; border: none; border-radius: 4px;
              padding: 8px 16px; font-size: 12px; text-decoration: none; display: inline-block; }
  #status { margin: 0.5rem 0; color: #555; }
</style>
</head>
<body>
<h1>leadlens</h1>
<div class="controls">
  <input id="query" type="text" placeholder="Profession to search for">
  <input id="pages" type="number" min="1" value="1">
  <button id="run">Run</button>
  <button id="clear">Clear</button>
</div>
<div id="status"></div>
<div id="rows"></div>
<script>
const statusEl = document.getElementById('status');
const rowsEl = document.getElementById('rows');

function renderRows(rows) {
  rowsEl.innerHTML = '';
  for (const row of rows) {
    const div = document.createElement('div');
    div.className = 'row';

    const index = document.createElement('div');
    index.textContent = row.index;

    const name = document.createElement('div');
    name.textContent = row.name;

    const link = document.createElement('a');
    link.className = 'link-btn';
    link.href = row.profile_link;
    link.target = '_blank';
    link.rel = 'noopener';
    link.textContent = 'Open';

    const message = document.createElement('textarea');
    message.value = row.message;

    div.append(index, name, link, message);
    rowsEl.append(div);
  }
}

document.getElementById('run').addEventListener('click', async () => {
  const query = document.getElementById('query').value.trim();
  const pages = parseInt(document.getElementById('pages').value, 10);
  if (!query || !pages) {
    statusEl.textContent = 'Enter a profession and a page count first.';
    return;
  }
  statusEl.textContent = 'Running pipeline (this blocks until all stages finish)...';
  const res = await fetch('/api/v1/runs', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ query, pages }),
  });
  const body = await res.json();
  if (!res.ok) {
    statusEl.textContent = 'Run failed: ' + body.error.message;
    return;
  }
  statusEl.textContent = body.data.rows.length + ' profiles in report.';
  renderRows(body.data.rows);
});

document.getElementById('clear').addEventListener('click', async () => {
  const res = await fetch('/api/v1/wipe', { method: 'POST' });
  const body = await res.json();
  statusEl.textContent = res.ok ? 'Prior run state cleared.' : ('Clear failed: ' + body.error.message);
  rowsEl.innerHTML = '';
});
</script>
</body>
</html>
"#;
