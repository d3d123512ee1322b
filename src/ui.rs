use crate::errors::RenderError;
use crate::models::{NutrientType, ProgressCard, ResultSubmission, TrendPoint};
use crate::notify::Notification;
use chrono::NaiveDate;
use tracing::warn;

pub const PROGRESS_CARDS: &str = "PROGRESS_CARDS";
pub const TREND_CHART: &str = "TREND_CHART";
pub const NOTIFICATIONS: &str = "NOTIFICATIONS";
pub const ADD_MODAL: &str = "ADD_MODAL";

/// Everything one render pass of the dashboard page needs.
pub struct PageView<'a> {
    pub cards: &'a [ProgressCard],
    pub trend: &'a [TrendPoint],
    pub notifications: &'a [Notification],
    pub modal: Option<&'a ModalView>,
}

/// State of the add-result form while the modal is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub test_date: String,
    pub nutrient_type: String,
    pub test_value: String,
    pub unit: String,
    pub error: Option<String>,
}

impl ModalView {
    /// A blank form dated today.
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            test_date: today.to_string(),
            nutrient_type: NutrientType::VitaminD.key().to_string(),
            test_value: String::new(),
            unit: String::new(),
            error: None,
        }
    }

    /// Re-opens the form with what the user typed and why it was rejected.
    pub fn rejected(submission: &ResultSubmission, error: impl Into<String>) -> Self {
        Self {
            test_date: submission.test_date.clone(),
            nutrient_type: submission.nutrient_type.clone(),
            test_value: submission.test_value.clone(),
            unit: submission.unit.clone(),
            error: Some(error.into()),
        }
    }
}

pub fn render_index(view: &PageView<'_>) -> String {
    render_page(INDEX_HTML, view)
}

/// Fills every region of `template`. A region whose marker is missing is
/// logged and skipped; the remaining regions still render.
pub fn render_page(template: &str, view: &PageView<'_>) -> String {
    let regions = [
        (PROGRESS_CARDS, render_cards(view.cards)),
        (TREND_CHART, render_trend(view.trend)),
        (NOTIFICATIONS, render_notifications(view.notifications)),
        (ADD_MODAL, view.modal.map(render_modal).unwrap_or_default()),
    ];

    let mut page = template.to_string();
    for (region, fragment) in regions {
        match fill_region(&page, region, &fragment) {
            Ok(filled) => page = filled,
            Err(err) => warn!("{err}; skipping region"),
        }
    }
    page
}

pub fn fill_region(
    page: &str,
    region: &'static str,
    fragment: &str,
) -> Result<String, RenderError> {
    let marker = format!("{{{{{region}}}}}");
    if !page.contains(&marker) {
        return Err(RenderError::MissingRenderTarget(region));
    }
    Ok(page.replace(&marker, fragment))
}

pub fn render_cards(cards: &[ProgressCard]) -> String {
    if cards.is_empty() {
        return r#"<p class="empty">No test results yet. Add one to start tracking.</p>"#
            .to_string();
    }

    cards
        .iter()
        .map(|card| {
            let unit = html_escape(&card.unit);
            let history = card
                .previous_value
                .map(|previous| {
                    let (class, sign) = if card.change >= 0.0 {
                        ("positive", "+")
                    } else {
                        ("negative", "")
                    };
                    format!(
                        r#"<span class="previous">{previous} {unit}</span>
          <span class="change {class}">{sign}{change}</span>"#,
                        previous = format_number(previous),
                        change = format_number(card.change),
                    )
                })
                .unwrap_or_default();

            format!(
                r#"
      <div class="progress-card" data-nutrient="{key}">
        <div class="progress-header">
          <h4>{name}</h4>
          <span class="status {status}">{label}</span>
        </div>
        <div class="progress-bar">
          <div class="progress-fill" style="width: {width}%"></div>
        </div>
        <div class="progress-stats">
          <span class="current">{value} {unit}</span>
          {history}
        </div>
        <div class="test-date">Last tested: {last_tested}</div>
      </div>"#,
                key = card.nutrient_type.key(),
                name = card.nutrient_name,
                status = card.status.key(),
                label = card.status_label,
                width = format_number(card.progress_percentage),
                value = format_number(card.test_value),
                last_tested = card.last_tested,
            )
        })
        .collect()
}

pub fn render_trend(points: &[TrendPoint]) -> String {
    if points.is_empty() {
        return r#"<p class="chart-empty">No results in the last six months.</p>"#.to_string();
    }

    points
        .iter()
        .map(|point| {
            format!(
                concat!(
                    r#"<div class="chart-point" style="left: {left}%; bottom: {bottom}%" "#,
                    r#"title="{month}: {average}"></div>"#,
                ),
                left = format_number(point.left),
                bottom = format_number(point.bottom),
                month = point.month,
                average = format_number(point.average),
            )
        })
        .collect()
}

pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| {
            format!(
                concat!(
                    r#"<div class="notification {class}" role="status" "#,
                    r#"style="background: {color}" data-visible-ms="{visible}" "#,
                    r#"data-transition-ms="{transition}">{message}</div>"#,
                ),
                class = notification.kind.class(),
                color = notification.kind.color(),
                visible = notification.visible_ms,
                transition = notification.transition_ms,
                message = html_escape(&notification.message),
            )
        })
        .collect()
}

pub fn render_modal(modal: &ModalView) -> String {
    let options: String = NutrientType::ALL
        .into_iter()
        .map(|nutrient| {
            let selected = if nutrient.key() == modal.nutrient_type {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{key}"{selected}>{name}</option>"#,
                key = nutrient.key(),
                name = nutrient.display_name(),
            )
        })
        .collect();

    let error = modal
        .error
        .as_deref()
        .map(|error| format!(r#"<p class="form-error" role="alert">{}</p>"#, html_escape(error)))
        .unwrap_or_default();

    format!(
        r#"
  <div id="addResultModal" class="modal">
    <div class="modal-content">
      <div class="modal-header">
        <h3>Add Test Result</h3>
        <a class="close" href="/" aria-label="Close">&times;</a>
      </div>
      {error}
      <form id="addResultForm" method="post" action="/results">
        <label for="testDate">Test date</label>
        <input type="date" id="testDate" name="testDate" value="{date}" required />
        <label for="nutrientType">Nutrient</label>
        <select id="nutrientType" name="nutrientType" required>{options}</select>
        <label for="testValue">Value</label>
        <input type="text" inputmode="decimal" id="testValue" name="testValue"
          value="{value}" required />
        <label for="unit">Unit</label>
        <input type="text" id="unit" name="unit" value="{unit}" placeholder="ng/mL" />
        <div class="form-actions">
          <a class="btn-secondary" href="/">Cancel</a>
          <button class="btn-primary" type="submit">Save result</button>
        </div>
      </form>
    </div>
  </div>"#,
        date = html_escape(&modal.test_date),
        value = html_escape(&modal.test_value),
        unit = html_escape(&modal.unit),
    )
}

/// Up to two decimals, trailing zeros dropped. Non-finite values show as `--`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    if !(value * 100.0).is_finite() {
        return value.to_string();
    }

    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('{', "&#123;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Nutrient Dashboard</title>
  <style>
    :root {
      --bg: #f4f7fb;
      --ink: #22313f;
      --muted: #6c7a89;
      --card: #ffffff;
      --accent: #f39c12;
      --optimal: #27ae60;
      --improving: #2980b9;
      --attention: #c0392b;
      --shadow: 0 12px 32px rgba(34, 49, 63, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .btn-primary,
    .btn-secondary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
      justify-content: center;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-secondary {
      background: rgba(34, 49, 63, 0.08);
      color: var(--ink);
    }

    .progress-cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 18px;
    }

    .progress-card {
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 12px;
    }

    .progress-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .progress-header h4 {
      margin: 0;
      font-size: 1.1rem;
    }

    .status {
      font-size: 0.8rem;
      font-weight: 600;
      padding: 4px 10px;
      border-radius: 999px;
      color: white;
    }

    .status.optimal {
      background: var(--optimal);
    }

    .status.improving {
      background: var(--improving);
    }

    .status.needs-attention {
      background: var(--attention);
    }

    .progress-bar {
      height: 10px;
      background: rgba(34, 49, 63, 0.08);
      border-radius: 999px;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      background: linear-gradient(90deg, var(--accent), var(--optimal));
      transition: width 400ms ease;
    }

    .progress-stats {
      display: flex;
      gap: 12px;
      align-items: baseline;
    }

    .current {
      font-size: 1.3rem;
      font-weight: 700;
    }

    .previous {
      color: var(--muted);
      text-decoration: line-through;
    }

    .change.positive {
      color: var(--optimal);
    }

    .change.negative {
      color: var(--attention);
    }

    .test-date,
    .empty,
    .chart-empty {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .trend {
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
      box-shadow: var(--shadow);
    }

    .trend h2 {
      margin: 0 0 16px;
      font-size: 1.3rem;
    }

    .trend-chart {
      position: relative;
      height: 220px;
      margin: 0 12px;
      border-left: 1px solid rgba(34, 49, 63, 0.2);
      border-bottom: 1px solid rgba(34, 49, 63, 0.2);
    }

    .chart-point {
      position: absolute;
      width: 12px;
      height: 12px;
      margin: 0 0 -6px -6px;
      border-radius: 50%;
      background: var(--accent);
      border: 2px solid white;
      box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
    }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(34, 49, 63, 0.45);
      display: grid;
      place-items: center;
      z-index: 1000;
    }

    .modal-content {
      background: white;
      border-radius: 16px;
      padding: 24px;
      width: min(420px, 92vw);
      display: grid;
      gap: 12px;
    }

    .modal-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .modal-header h3 {
      margin: 0;
    }

    .close {
      font-size: 1.6rem;
      color: var(--muted);
      text-decoration: none;
    }

    #addResultForm {
      display: grid;
      gap: 8px;
    }

    #addResultForm input,
    #addResultForm select {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(34, 49, 63, 0.2);
      font-size: 1rem;
    }

    .form-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
      margin-top: 8px;
    }

    .form-error {
      margin: 0;
      color: var(--attention);
      font-weight: 600;
    }

    .notifications {
      position: fixed;
      top: 20px;
      right: 20px;
      display: grid;
      gap: 10px;
      z-index: 1001;
    }

    .notification {
      color: white;
      padding: 15px 25px;
      border-radius: 10px;
      box-shadow: 0 4px 15px rgba(0, 0, 0, 0.2);
      animation: slideIn 0.3s ease-out;
    }

    .notification.leaving {
      animation: slideOut 0.3s ease-out forwards;
    }

    @keyframes slideIn {
      from { transform: translateX(100%); opacity: 0; }
      to { transform: translateX(0); opacity: 1; }
    }

    @keyframes slideOut {
      from { transform: translateX(0); opacity: 1; }
      to { transform: translateX(100%); opacity: 0; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Nutrient Dashboard</h1>
        <p class="subtitle">Latest lab results against their reference ranges.</p>
      </div>
      <a class="btn-primary" id="open-add-modal" href="/?modal=add">Add Result</a>
    </header>

    <section id="progressCards" class="progress-cards">{{PROGRESS_CARDS}}</section>

    <section class="trend">
      <h2>Six-month trend</h2>
      <div id="trendChart" class="trend-chart">{{TREND_CHART}}</div>
    </section>
  </main>

  <div id="notifications" class="notifications">{{NOTIFICATIONS}}</div>
  {{ADD_MODAL}}

  <script>
    document.querySelectorAll('.notification[data-visible-ms]').forEach((el) => {
      const visible = Number(el.dataset.visibleMs);
      const transition = Number(el.dataset.transitionMs);
      setTimeout(() => {
        el.classList.add('leaving');
        setTimeout(() => el.remove(), transition);
      }, visible);
    });

    if (window.location.search.includes('notice=')) {
      window.history.replaceState(null, '', '/');
    }

    const modal = document.getElementById('addResultModal');
    const closeAddResultModal = () => {
      window.location.href = '/';
    };

    if (modal) {
      modal.addEventListener('click', (event) => {
        if (event.target === modal) {
          closeAddResultModal();
        }
      });
      document.addEventListener('keydown', (event) => {
        if (event.key === 'Escape') {
          closeAddResultModal();
        }
      });
    }
  </script>
</body>
</html>
"#;
