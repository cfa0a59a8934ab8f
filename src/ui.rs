pub fn render_index(user: Option<&str>, date: &str) -> String {
    let (login_hidden, tracker_hidden) = match user {
        Some(_) => ("hidden", ""),
        None => ("", "hidden"),
    };
    INDEX_HTML
        .replace("{{USER}}", &escape_html(user.unwrap_or_default()))
        .replace("{{DATE}}", &escape_html(date))
        .replace("{{LOGIN_HIDDEN}}", login_hidden)
        .replace("{{TRACKER_HIDDEN}}", tracker_hidden)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Task Manager</title>
  <style>
    :root {
      --ink: #1f2328;
      --muted: #6b7280;
      --card: rgba(255, 255, 255, 0.92);
      --accent: #2563eb;
      --good: #16a34a;
      --bad: #dc2626;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: #0b0d12;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px;
    }

    .card {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 12px;
      padding: 24px;
      box-shadow: 0 20px 50px rgba(0, 0, 0, 0.4);
    }

    .hidden {
      display: none;
    }

    .row {
      display: flex;
      gap: 8px;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 16px;
    }

    input, select, button {
      font: inherit;
      padding: 6px 10px;
      border-radius: 6px;
      border: 1px solid #d1d5db;
    }

    button {
      cursor: pointer;
      background: var(--accent);
      border: none;
      color: white;
    }

    .comment {
      background: white;
      border-radius: 8px;
      padding: 10px 12px;
      margin-bottom: 8px;
      overflow-wrap: anywhere;
    }

    .comment time {
      display: block;
      font-size: 0.75rem;
      color: var(--muted);
    }

    #status {
      min-height: 1.2em;
      color: var(--bad);
    }
  </style>
</head>
<body>
  <section id="login" class="card {{LOGIN_HIDDEN}}">
    <h2>Task Manager</h2>
    <input id="username" placeholder="Username" />
    <input id="password" type="password" placeholder="Password" />
    <div class="row">
      <button id="login-btn">Login</button>
      <button id="register-btn" style="background: var(--good)">Register</button>
    </div>
  </section>

  <section id="tracker" class="card {{TRACKER_HIDDEN}}">
    <div class="row">
      <h1 id="title">{{USER}}'s Task Manager</h1>
      <button id="logout-btn" style="background: var(--muted)">Logout</button>
    </div>
    <div class="row">
      <button id="prev">&larr;</button>
      <input id="date" type="date" value="{{DATE}}" />
      <button id="next">&rarr;</button>
    </div>
    <div class="row">
      <span>Total Intakes: <strong id="count">0</strong></span>
      <span>
        <button id="inc" style="background: var(--good)">+</button>
        <button id="dec" style="background: var(--bad)">-</button>
      </span>
    </div>
    <div class="row">
      <input id="comment" placeholder="Enter comment" style="flex: 1" />
      <button id="save">Save</button>
    </div>
    <div id="comments"></div>
    <div class="row">
      <select id="range">
        <option value="week">This Week</option>
        <option value="month">This Month</option>
        <option value="year">This Year</option>
      </select>
      <button id="export">Export</button>
    </div>
  </section>
  <p id="status"></p>

  <script>
    const $ = (id) => document.getElementById(id);

    const setStatus = (message) => {
      $('status').textContent = message || '';
    };

    const call = async (method, path, body) => {
      const resp = await fetch(path, {
        method,
        headers: body ? { 'Content-Type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined,
      });
      if (!resp.ok) {
        throw new Error(await resp.text());
      }
      const type = resp.headers.get('content-type') || '';
      return type.includes('json') ? resp.json() : null;
    };

    const renderDay = (day) => {
      $('date').value = day.date;
      $('count').textContent = day.count;
      const list = $('comments');
      list.innerHTML = '';
      day.comments.forEach((comment, index) => {
        const item = document.createElement('div');
        item.className = 'comment';
        const text = document.createElement('div');
        text.textContent = comment.text;
        const time = document.createElement('time');
        time.textContent = comment.time;
        item.append(text, time);
        for (const [label, action] of [['Edit', editComment], ['Delete', deleteComment], ['Copy', copyComment]]) {
          const btn = document.createElement('button');
          btn.textContent = label;
          btn.onclick = () => action(index).catch((err) => setStatus(err.message));
          item.append(btn);
        }
        list.append(item);
      });
    };

    const answer = async (prompt, reply) => {
      const result = await call('POST', '/api/prompts/answer', { prompt, reply });
      renderDay(result.day);
    };

    const editComment = async (index) => {
      const prompt = await call('POST', `/api/comments/${index}/edit`);
      const edited = window.prompt('Edit your comment:', prompt.current);
      await answer(prompt, edited === null ? { reply: 'cancel' } : { reply: 'text', text: edited });
    };

    const deleteComment = async (index) => {
      const prompt = await call('POST', `/api/comments/${index}/delete`);
      const ok = window.confirm('Delete this comment?');
      await answer(prompt, { reply: ok ? 'confirm' : 'cancel' });
    };

    const copyComment = async (index) => {
      const result = await call('GET', `/api/comments/${index}/copy`);
      await navigator.clipboard.writeText(result.text);
      setStatus('Copied to clipboard');
    };

    const showSession = async (session) => {
      const loggedIn = Boolean(session.user);
      $('login').classList.toggle('hidden', loggedIn);
      $('tracker').classList.toggle('hidden', !loggedIn);
      if (loggedIn) {
        $('title').textContent = `${session.user}'s Task Manager`;
        renderDay(await call('GET', '/api/day'));
      }
    };

    const credentials = () => ({ username: $('username').value, password: $('password').value });

    const bind = (id, handler) => {
      $(id).onclick = () => {
        setStatus('');
        handler().catch((err) => setStatus(err.message));
      };
    };

    bind('login-btn', async () => showSession(await call('POST', '/api/login', credentials())));
    bind('register-btn', async () => {
      await call('POST', '/api/register', credentials());
      setStatus('User registered successfully!');
    });
    bind('logout-btn', async () => {
      $('username').value = '';
      $('password').value = '';
      await showSession(await call('POST', '/api/logout'));
    });
    bind('prev', async () => renderDay(await call('POST', '/api/date/shift', { days: -1 })));
    bind('next', async () => renderDay(await call('POST', '/api/date/shift', { days: 1 })));
    bind('inc', async () => renderDay(await call('POST', '/api/count', { delta: 1 })));
    bind('dec', async () => renderDay(await call('POST', '/api/count', { delta: -1 })));
    bind('save', async () => {
      const result = await call('POST', '/api/comments', { text: $('comment').value });
      $('comment').value = '';
      renderDay(result.day);
    });
    bind('export', async () => {
      window.location = `/api/export?range=${$('range').value}`;
    });

    $('date').onchange = () => {
      call('POST', '/api/date', { date: $('date').value })
        .then(renderDay)
        .catch((err) => setStatus(err.message));
    };
    $('comment').onkeydown = (event) => {
      if (event.key === 'Enter') {
        $('save').click();
      }
    };

    call('GET', '/api/session').then(showSession).catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
